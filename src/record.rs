//! Log record representation.
//!
//! A [`Record`] captures one log event: severity, message, creation time,
//! structured attributes (possibly nested in groups) and an optional source
//! location. Records are produced by the logging front-end and borrowed by a
//! handler for the duration of a single `handle` call.

use std::time::SystemTime;

use crate::level::Level;

/// The value carried by an [`Attr`].
///
/// Scalar values reuse [`serde_json::Value`] so callers can attach strings,
/// numbers, booleans or pre-built JSON without a bespoke value type. A
/// [`AttrValue::Group`] nests further attributes under the attribute's key.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Scalar(serde_json::Value),
    Group(Vec<Attr>),
}

impl From<serde_json::Value> for AttrValue {
    fn from(value: serde_json::Value) -> Self {
        Self::Scalar(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Scalar(serde_json::Value::from(value))
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Scalar(serde_json::Value::from(value))
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Scalar(serde_json::Value::from(value))
    }
}

impl From<u64> for AttrValue {
    fn from(value: u64) -> Self {
        Self::Scalar(serde_json::Value::from(value))
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Scalar(serde_json::Value::from(value))
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Scalar(serde_json::Value::from(value))
    }
}

/// A single key-value attribute attached to a record or bound to a handler.
#[derive(Clone, Debug, PartialEq)]
pub struct Attr {
    pub key: String,
    pub value: AttrValue,
}

impl Attr {
    /// Construct an attribute from a key and any scalar-convertible value.
    pub fn new(key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Construct a group attribute nesting `attrs` under `key`.
    pub fn group(key: impl Into<String>, attrs: Vec<Attr>) -> Self {
        Self {
            key: key.into(),
            value: AttrValue::Group(attrs),
        }
    }
}

/// Source location of the log call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    pub file: String,
    pub line: u32,
}

/// One log event.
#[derive(Clone, Debug)]
pub struct Record {
    pub level: Level,
    pub message: String,
    /// Time the record was created.
    pub timestamp: SystemTime,
    /// Record-specific attributes, in the order they were attached.
    pub attrs: Vec<Attr>,
    /// Source file and line of the log call, when the front-end captures it.
    pub source: Option<Source>,
}

impl Record {
    /// Construct a record with the current time and no attributes.
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: SystemTime::now(),
            attrs: Vec::new(),
            source: None,
        }
    }

    /// Attach attributes to the record, preserving order.
    pub fn with_attrs(mut self, attrs: Vec<Attr>) -> Self {
        self.attrs.extend(attrs);
        self
    }

    /// Attach the source location of the log call.
    pub fn with_source(mut self, file: impl Into<String>, line: u32) -> Self {
        self.source = Some(Source {
            file: file.into(),
            line,
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_accumulates_attrs_in_order() {
        let record = Record::new(Level::Info, "hi")
            .with_attrs(vec![Attr::new("a", 1i64)])
            .with_attrs(vec![Attr::new("b", "two")]);
        let keys: Vec<_> = record.attrs.iter().map(|a| a.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn group_attr_nests_children() {
        let attr = Attr::group("user", vec![Attr::new("id", "user-123")]);
        match attr.value {
            AttrValue::Group(children) => {
                assert_eq!(children, vec![Attr::new("id", "user-123")]);
            }
            AttrValue::Scalar(_) => panic!("expected a group"),
        }
    }

    #[test]
    fn scalar_conversions_cover_common_types() {
        assert_eq!(
            Attr::new("n", 3i64).value,
            AttrValue::Scalar(serde_json::Value::from(3i64))
        );
        assert_eq!(
            Attr::new("ok", true).value,
            AttrValue::Scalar(serde_json::Value::from(true))
        );
        assert_eq!(
            Attr::new("name", String::from("x")).value,
            AttrValue::Scalar(serde_json::Value::from("x"))
        );
    }

    #[test]
    fn with_source_records_file_and_line() {
        let record = Record::new(Level::Warn, "w").with_source("main.rs", 42);
        assert_eq!(
            record.source,
            Some(Source {
                file: "main.rs".into(),
                line: 42
            })
        );
    }
}
