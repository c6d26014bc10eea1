//! Stylesheet model — rules, declarations and value tokens
//!
//! Every node owns its children outright and is immutable once built.
//! Failed children are never stored; the parser simply leaves them out.
//!
//! `Display` on each node renders its canonical minified text, so
//! `rule.to_string()` is exactly what ends up in the output.

use std::fmt;

use serde::Serialize;

use crate::Error;

/// A parsed stylesheet: the rules that survived parsing, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    pub rules: Vec<Rule>,
    /// Recoverable errors for rules and declarations left out of `rules`
    #[serde(skip)]
    pub diagnostics: Vec<Error>,
}

impl Stylesheet {
    /// Number of rule spans that were dropped
    pub fn skipped_rules(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| !matches!(d, Error::IncompleteProperty(_)))
            .count()
    }

    /// Number of declarations that were dropped from surviving rules
    pub fn skipped_declarations(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| matches!(d, Error::IncompleteProperty(_)))
            .count()
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rule in &self.rules {
            write!(f, "{}", rule)?;
        }
        Ok(())
    }
}

/// A selector plus its declaration block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rule {
    /// Raw selector text, trimmed but otherwise untouched (`div.foo > p`)
    pub selector: String,
    /// Declarations in canonical order
    pub declarations: Vec<Declaration>,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{{", self.selector)?;
        for decl in &self.declarations {
            write!(f, "{}", decl)?;
        }
        f.write_str("}")
    }
}

/// One `name:value` pair inside a rule block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Declaration {
    /// Property name, lower-cased and trimmed
    pub name: String,
    /// Comma-separated pieces of the value, each normalized on its own
    pub values: Vec<ValueToken>,
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", value)?;
        }
        f.write_str(";")
    }
}

/// One comma-separated slice of a declaration value (`.5`, `0`, `1px solid #112233`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValueToken(String);

impl ValueToken {
    pub fn new(text: impl Into<String>) -> Self {
        ValueToken(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ValueToken {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decl(name: &str, values: &[&str]) -> Declaration {
        Declaration {
            name: name.to_string(),
            values: values.iter().map(|v| ValueToken::new(*v)).collect(),
        }
    }

    #[test]
    fn test_declaration_display() {
        assert_eq!(decl("color", &["red"]).to_string(), "color:red;");
        assert_eq!(
            decl("font-family", &["Arial", "sans-serif"]).to_string(),
            "font-family:Arial,sans-serif;"
        );
    }

    #[test]
    fn test_declaration_without_values_display() {
        assert_eq!(decl("color", &[]).to_string(), "color:;");
    }

    #[test]
    fn test_rule_display() {
        let rule = Rule {
            selector: "div.foo > p".to_string(),
            declarations: vec![decl("border", &["0"]), decl("color", &["RED"])],
        };
        assert_eq!(rule.to_string(), "div.foo > p{border:0;color:RED;}");
    }

    #[test]
    fn test_empty_rule_display() {
        let rule = Rule {
            selector: "a".to_string(),
            declarations: vec![],
        };
        assert_eq!(rule.to_string(), "a{}");
    }

    #[test]
    fn test_stylesheet_display_concatenates_rules() {
        let sheet = Stylesheet {
            rules: vec![
                Rule {
                    selector: "a".into(),
                    declarations: vec![decl("b", &["c"])],
                },
                Rule {
                    selector: "d".into(),
                    declarations: vec![decl("e", &["f"])],
                },
            ],
            diagnostics: vec![],
        };
        assert_eq!(sheet.to_string(), "a{b:c;}d{e:f;}");
    }

    #[test]
    fn test_skip_counts() {
        let sheet = Stylesheet {
            rules: vec![],
            diagnostics: vec![
                Error::IncompleteSelector("x}".into()),
                Error::IncompleteProperty("color red".into()),
                Error::UnterminatedSelector("y{z".into()),
            ],
        };
        assert_eq!(sheet.skipped_rules(), 2);
        assert_eq!(sheet.skipped_declarations(), 1);
    }

    #[test]
    fn test_serialize_model() {
        let rule = Rule {
            selector: "a".into(),
            declarations: vec![decl("margin", &["0", ".5em"])],
        };
        let json = serde_json::to_value(&rule).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "selector": "a",
                "declarations": [{ "name": "margin", "values": ["0", ".5em"] }]
            })
        );
    }
}
