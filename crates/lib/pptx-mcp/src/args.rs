//! Typed access to a tool call's argument map.
//!
//! Handlers pull arguments through these accessors instead of touching raw
//! JSON. A missing or wrong-typed argument is a protocol fault, not a domain
//! failure: it surfaces as [`ArgError`] and the dispatch layer turns it into
//! an MCP `invalid_params` error rather than tool output.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// A request that does not match the advertised parameter schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A required argument was absent (or JSON null).
    Missing(&'static str),
    /// An argument was present but had the wrong shape.
    Invalid {
        name: &'static str,
        expected: &'static str,
    },
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing(name) => write!(f, "missing required argument '{name}'"),
            Self::Invalid { name, expected } => {
                write!(f, "invalid argument '{name}': expected {expected}")
            }
        }
    }
}

impl std::error::Error for ArgError {}

/// One call's argument map, with declared defaults already filled in.
#[derive(Debug, Clone, Default)]
pub struct ToolArgs {
    values: Map<String, Value>,
}

impl ToolArgs {
    #[must_use]
    pub fn new(values: Map<String, Value>) -> Self {
        Self { values }
    }

    /// JSON null counts as absent, matching how clients omit optionals.
    fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|value| !value.is_null())
    }

    /// A required string.
    pub fn string(&self, name: &'static str) -> Result<&str, ArgError> {
        match self.get(name) {
            Some(value) => value.as_str().ok_or(ArgError::Invalid {
                name,
                expected: "a string",
            }),
            None => Err(ArgError::Missing(name)),
        }
    }

    /// An optional string; absent and null both read as `None`.
    pub fn opt_string(&self, name: &'static str) -> Result<Option<&str>, ArgError> {
        self.get(name)
            .map(|value| {
                value.as_str().ok_or(ArgError::Invalid {
                    name,
                    expected: "a string",
                })
            })
            .transpose()
    }

    /// A required integer. Fractional numbers are rejected.
    pub fn integer(&self, name: &'static str) -> Result<i64, ArgError> {
        match self.get(name) {
            Some(value) => value.as_i64().ok_or(ArgError::Invalid {
                name,
                expected: "an integer",
            }),
            None => Err(ArgError::Missing(name)),
        }
    }

    /// A required array of strings. Numbers and booleans are accepted and
    /// stringified; nested containers are not.
    pub fn strings(&self, name: &'static str) -> Result<Vec<String>, ArgError> {
        const EXPECTED: &str = "an array of strings";
        let Some(value) = self.get(name) else {
            return Err(ArgError::Missing(name));
        };
        let Some(items) = value.as_array() else {
            return Err(ArgError::Invalid {
                name,
                expected: EXPECTED,
            });
        };
        items
            .iter()
            .map(|item| {
                scalar_string(item).ok_or(ArgError::Invalid {
                    name,
                    expected: EXPECTED,
                })
            })
            .collect()
    }

    /// A required array of string arrays (table rows).
    pub fn string_rows(&self, name: &'static str) -> Result<Vec<Vec<String>>, ArgError> {
        const EXPECTED: &str = "an array of string arrays";
        let Some(value) = self.get(name) else {
            return Err(ArgError::Missing(name));
        };
        let Some(rows) = value.as_array() else {
            return Err(ArgError::Invalid {
                name,
                expected: EXPECTED,
            });
        };
        rows.iter()
            .map(|row| {
                let Some(cells) = row.as_array() else {
                    return Err(ArgError::Invalid {
                        name,
                        expected: EXPECTED,
                    });
                };
                cells
                    .iter()
                    .map(|cell| {
                        scalar_string(cell).ok_or(ArgError::Invalid {
                            name,
                            expected: EXPECTED,
                        })
                    })
                    .collect()
            })
            .collect()
    }

    /// A required argument deserialized into a typed shape, for the
    /// object-array parameters (series, events, text blocks).
    pub fn parsed<T: DeserializeOwned>(
        &self,
        name: &'static str,
        expected: &'static str,
    ) -> Result<T, ArgError> {
        let Some(value) = self.get(name) else {
            return Err(ArgError::Missing(name));
        };
        serde_json::from_value(value.clone()).map_err(|_| ArgError::Invalid { name, expected })
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn args(value: Value) -> ToolArgs {
        ToolArgs::new(value.as_object().cloned().expect("object literal"))
    }

    #[test]
    fn missing_and_null_both_read_as_absent() {
        let args = args(json!({ "present": "x", "nulled": null }));
        assert_eq!(args.string("present"), Ok("x"));
        assert_eq!(args.string("nulled"), Err(ArgError::Missing("nulled")));
        assert_eq!(args.opt_string("nulled"), Ok(None));
        assert_eq!(args.opt_string("absent"), Ok(None));
    }

    #[test]
    fn wrong_type_is_invalid_not_missing() {
        let args = args(json!({ "title": 7 }));
        assert_eq!(
            args.string("title"),
            Err(ArgError::Invalid {
                name: "title",
                expected: "a string"
            })
        );
    }

    #[test]
    fn integers_reject_fractions() {
        let args = args(json!({ "whole": 2, "frac": 1.5 }));
        assert_eq!(args.integer("whole"), Ok(2));
        assert!(args.integer("frac").is_err());
    }

    #[test]
    fn string_arrays_stringify_scalars() {
        let args = args(json!({ "content": ["a", 100, 1.5, true] }));
        assert_eq!(
            args.strings("content").expect("scalars coerce"),
            ["a", "100", "1.5", "true"]
        );
    }

    #[test]
    fn string_arrays_reject_nested_containers() {
        let args = args(json!({ "content": ["a", ["b"]] }));
        assert!(args.strings("content").is_err());
    }

    #[test]
    fn string_rows_build_a_matrix() {
        let args = args(json!({ "rows": [["a", 1], ["b", 2]] }));
        assert_eq!(
            args.string_rows("rows").expect("matrix coerces"),
            vec![vec!["a".to_string(), "1".to_string()], vec![
                "b".to_string(),
                "2".to_string()
            ]]
        );
    }

    #[test]
    fn error_messages_name_the_argument() {
        assert_eq!(
            ArgError::Missing("title").to_string(),
            "missing required argument 'title'"
        );
        assert_eq!(
            ArgError::Invalid {
                name: "rows",
                expected: "an array of string arrays"
            }
            .to_string(),
            "invalid argument 'rows': expected an array of string arrays"
        );
    }
}
