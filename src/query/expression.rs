//! Query expressions and their wire serialization.
//!
//! Expressions are opaque strings for the server's query parser; only the
//! match-all query and single field terms get dedicated constructors.

use std::fmt;

/// Characters that force a field value to be quoted.
const SPECIAL_CHARS: &[char] = &[
    ' ', '\t', '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':',
    '\\', '/',
];

/// A query expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Matches every document (`*:*`).
    All,
    /// A raw expression passed through verbatim.
    Raw(String),
    /// `field:value`, with the value quoted when needed.
    Field { field: String, value: String },
}

impl Query {
    pub fn all() -> Self {
        Query::All
    }

    pub fn raw<S: Into<String>>(expression: S) -> Self {
        Query::Raw(expression.into())
    }

    pub fn field<F: Into<String>, V: Into<String>>(field: F, value: V) -> Self {
        Query::Field {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<&str> for Query {
    fn from(expression: &str) -> Self {
        Query::Raw(expression.to_string())
    }
}

impl From<String> for Query {
    fn from(expression: String) -> Self {
        Query::Raw(expression)
    }
}

/// Turns a [`Query`] into the string sent as `q`/`fq`.
pub trait QuerySerializer: Send + Sync {
    fn serialize(&self, query: &Query) -> String;
}

/// Standard query parser syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultQuerySerializer;

impl QuerySerializer for DefaultQuerySerializer {
    fn serialize(&self, query: &Query) -> String {
        match query {
            Query::All => "*:*".to_string(),
            Query::Raw(expression) => expression.clone(),
            Query::Field { field, value } => format!("{field}:{}", quote(value)),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&DefaultQuerySerializer.serialize(self))
    }
}

fn quote(value: &str) -> String {
    if !value.is_empty() && !value.contains(SPECIAL_CHARS) {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_queries() {
        let serializer = DefaultQuerySerializer;
        assert_eq!(serializer.serialize(&Query::all()), "*:*");
        assert_eq!(
            serializer.serialize(&Query::raw("title:rust AND year:[2020 TO *]")),
            "title:rust AND year:[2020 TO *]"
        );
        assert_eq!(serializer.serialize(&Query::field("color", "red")), "color:red");
    }

    #[test]
    fn test_field_values_are_quoted_when_needed() {
        assert_eq!(Query::field("color", "dark red").to_string(), "color:\"dark red\"");
        assert_eq!(
            Query::field("path", "a\\b \"c\"").to_string(),
            "path:\"a\\\\b \\\"c\\\"\""
        );
        assert_eq!(Query::field("name", "").to_string(), "name:\"\"");
    }
}
