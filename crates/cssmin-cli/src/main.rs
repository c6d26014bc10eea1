use clap::{ArgAction, Parser};
use colored::Colorize;
use cssmin_core::{minify_with, Error, Options};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

/// cssmin — stylesheet minifier
///
/// Strips comments and whitespace, sorts declarations by property name and
/// shortens numeric values.
#[derive(Parser)]
#[command(name = "cssmin", version, about, long_about = None)]
struct Cli {
    /// Path to the stylesheet to minify
    input: PathBuf,

    /// Output path (stdout when omitted or not writable)
    output: Option<PathBuf>,

    /// Drop the closing brace plus one preceding character of each rule block
    #[arg(long)]
    legacy_truncation: bool,

    /// Print a JSON summary of the run to stderr
    #[arg(long)]
    report: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Print more diagnostics (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

const EXIT_OK: i32 = 0;
const EXIT_FATAL: i32 = 1;
const EXIT_IO: i32 = 2;

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    process::exit(run(&cli));
}

fn init_logging(cli: &Cli) {
    let filter = match (cli.quiet, cli.verbose) {
        (true, _) => EnvFilter::new("error"),
        (false, 0) => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        (false, 1) => EnvFilter::new("debug"),
        (false, _) => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> i32 {
    let css = match fs::read_to_string(&cli.input) {
        Ok(css) => css,
        Err(e) => {
            eprintln!(
                "{} cannot read {}: {}",
                "error:".red().bold(),
                cli.input.display(),
                e
            );
            return EXIT_IO;
        }
    };

    let options = Options {
        legacy_truncation: cli.legacy_truncation,
    };

    // Nothing is opened for writing until the transform has succeeded.
    let minified = match minify_with(&css, &options) {
        Ok(minified) => minified,
        Err(e) => {
            eprintln!("{} {}: {}", "error:".red().bold(), cli.input.display(), e);
            return exit_code(&e);
        }
    };

    let mut sink = open_sink(cli.output.as_deref());
    if let Err(e) = write_output(&mut sink, &minified.css) {
        eprintln!("{} {}", "error:".red().bold(), e);
        return exit_code(&e);
    }
    tracing::debug!("wrote {} bytes", minified.css.len());

    if cli.report {
        match serde_json::to_string_pretty(&minified.report) {
            Ok(json) => eprintln!("{}", json),
            Err(e) => {
                eprintln!("{} cannot serialize report: {}", "error:".red().bold(), e);
                return EXIT_IO;
            }
        }
    }

    EXIT_OK
}

fn exit_code(err: &Error) -> i32 {
    match err {
        Error::Io(_) => EXIT_IO,
        _ => EXIT_FATAL,
    }
}

/// Open the output file, falling back to stdout if it cannot be created
fn open_sink(output: Option<&Path>) -> Box<dyn Write> {
    let Some(path) = output else {
        return Box::new(io::stdout().lock());
    };

    match fs::File::create(path) {
        Ok(file) => Box::new(io::BufWriter::new(file)),
        Err(e) => {
            eprintln!(
                "{} error outputting to {} ({}); redirecting to stdout",
                "warning:".yellow().bold(),
                path.display(),
                e
            );
            Box::new(io::stdout().lock())
        }
    }
}

fn write_output(sink: &mut dyn Write, css: &str) -> Result<(), Error> {
    sink.write_all(css.as_bytes())?;
    sink.flush()?;
    Ok(())
}
