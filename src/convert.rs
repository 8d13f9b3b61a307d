//! Conversion of a record plus bound context into outbound message text.
//!
//! The [`Converter`] trait is a replaceable strategy: the Telegram handler
//! only fixes that bound attributes are rendered before record attributes
//! and that group nesting is visible in the rendered key paths. The exact
//! layout belongs to the converter implementation.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::context::BoundAttr;
use crate::record::{Attr, AttrValue, Record};

/// Per-attribute filter applied before rendering.
///
/// Receives the group path owning the attribute and the attribute itself;
/// returning `None` omits the attribute from the output. Used to redact or
/// rewrite sensitive values.
pub type ReplaceAttr = dyn Fn(&[String], Attr) -> Option<Attr> + Send + Sync;

/// Strategy turning one record and its bound context into message text.
///
/// Implementations must be pure: no side effects, identical output for
/// identical inputs, and no panics for any well-formed record (a record
/// with zero attributes included).
pub trait Converter: Send + Sync {
    fn convert(
        &self,
        add_source: bool,
        replace_attr: Option<&ReplaceAttr>,
        bound: &[BoundAttr],
        groups: &[String],
        record: &Record,
    ) -> String;
}

/// Plain-text layout used when no custom converter is configured.
///
/// Renders `LEVEL message`, the RFC 3339 UTC timestamp, one
/// `dotted.key.path: value` line per attribute (bound attributes first, in
/// binding order, then record attributes under the current group path) and,
/// when requested, a final `src: file:line` line.
#[derive(Copy, Clone, Debug, Default)]
pub struct DefaultConverter;

impl Converter for DefaultConverter {
    fn convert(
        &self,
        add_source: bool,
        replace_attr: Option<&ReplaceAttr>,
        bound: &[BoundAttr],
        groups: &[String],
        record: &Record,
    ) -> String {
        let mut lines = Vec::new();
        lines.push(format!("{} {}", record.level, record.message));
        lines.push(
            DateTime::<Utc>::from(record.timestamp).to_rfc3339_opts(SecondsFormat::Secs, true),
        );

        for bound_attr in bound {
            render_attr(&mut lines, &bound_attr.groups, &bound_attr.attr, replace_attr);
        }
        for attr in &record.attrs {
            render_attr(&mut lines, groups, attr, replace_attr);
        }

        if add_source {
            if let Some(source) = &record.source {
                lines.push(format!("src: {}:{}", source.file, source.line));
            }
        }

        lines.join("\n")
    }
}

fn render_attr(lines: &mut Vec<String>, path: &[String], attr: &Attr, replace: Option<&ReplaceAttr>) {
    match &attr.value {
        AttrValue::Group(children) => {
            let mut child_path = path.to_vec();
            child_path.push(attr.key.clone());
            for child in children {
                render_attr(lines, &child_path, child, replace);
            }
        }
        AttrValue::Scalar(_) => {
            let resolved = match replace {
                Some(f) => f(path, attr.clone()),
                None => Some(attr.clone()),
            };
            let Some(resolved) = resolved else {
                return;
            };
            match resolved.value {
                // A filter may rewrite a scalar into a group; render it nested.
                AttrValue::Group(_) => render_attr(lines, path, &resolved, None),
                AttrValue::Scalar(value) => {
                    lines.push(format!("{}: {}", key_path(path, &resolved.key), scalar(&value)));
                }
            }
        }
    }
}

fn key_path(path: &[String], key: &str) -> String {
    if path.is_empty() {
        key.to_owned()
    } else {
        format!("{}.{}", path.join("."), key)
    }
}

/// Strings render bare; everything else uses its JSON representation.
fn scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BoundContext;
    use crate::level::Level;

    fn convert(ctx: &BoundContext, record: &Record) -> String {
        DefaultConverter.convert(false, None, ctx.attrs(), ctx.groups(), record)
    }

    #[test]
    fn renders_level_message_and_timestamp() {
        let record = Record::new(Level::Error, "Hello");
        let text = convert(&BoundContext::new(), &record);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("ERROR Hello"));
        let stamp = lines.next().expect("timestamp line");
        assert!(stamp.ends_with('Z'), "expected UTC timestamp, got {stamp}");
    }

    #[test]
    fn bound_attrs_render_before_record_attrs() {
        let ctx = BoundContext::new().with_attrs(vec![Attr::new("release", "v1.0.0")]);
        let record = Record::new(Level::Info, "m").with_attrs(vec![Attr::new("env", "dev")]);
        let text = convert(&ctx, &record);
        let release = text.find("release: v1.0.0").expect("release line");
        let env = text.find("env: dev").expect("env line");
        assert!(release < env);
    }

    #[test]
    fn group_nesting_shows_in_key_paths() {
        let ctx = BoundContext::new()
            .with_attrs(vec![Attr::new("release", "v1.0.0")])
            .with_group("user")
            .with_attrs(vec![Attr::new("id", "user-123")]);
        let record = Record::new(Level::Error, "Hello").with_attrs(vec![Attr::new("step", 2i64)]);
        let text = convert(&ctx, &record);

        assert!(text.contains("release: v1.0.0"));
        assert!(text.contains("user.id: user-123"));
        // Record attrs inherit the handler's current group path.
        assert!(text.contains("user.step: 2"));
    }

    #[test]
    fn nested_group_attrs_use_dotted_paths() {
        let record = Record::new(Level::Info, "m").with_attrs(vec![Attr::group(
            "user",
            vec![Attr::new("id", "user-123"), Attr::new("age", 30i64)],
        )]);
        let text = convert(&BoundContext::new(), &record);
        assert!(text.contains("user.id: user-123"));
        assert!(text.contains("user.age: 30"));
    }

    #[test]
    fn replace_attr_can_omit_and_rewrite() {
        let record = Record::new(Level::Info, "m").with_attrs(vec![
            Attr::new("password", "hunter2"),
            Attr::new("user", "alice"),
        ]);
        let replace: Box<ReplaceAttr> = Box::new(|_groups, attr| {
            if attr.key == "password" {
                None
            } else {
                Some(Attr::new(attr.key, "[seen]"))
            }
        });
        let text = DefaultConverter.convert(false, Some(&*replace), &[], &[], &record);
        assert!(!text.contains("hunter2"));
        assert!(!text.contains("password"));
        assert!(text.contains("user: [seen]"));
    }

    #[test]
    fn replace_attr_receives_the_owning_group_path() {
        let ctx = BoundContext::new()
            .with_group("user")
            .with_attrs(vec![Attr::new("id", "user-123")]);
        let record = Record::new(Level::Info, "m");
        let replace: Box<ReplaceAttr> = Box::new(|groups, attr| {
            assert_eq!(groups, ["user"]);
            Some(attr)
        });
        let text =
            DefaultConverter.convert(false, Some(&*replace), ctx.attrs(), ctx.groups(), &record);
        assert!(text.contains("user.id: user-123"));
    }

    #[test]
    fn add_source_appends_file_and_line() {
        let record = Record::new(Level::Warn, "w").with_source("main.rs", 42);
        let with = DefaultConverter.convert(true, None, &[], &[], &record);
        let without = DefaultConverter.convert(false, None, &[], &[], &record);
        assert!(with.ends_with("src: main.rs:42"));
        assert!(!without.contains("src:"));
    }

    #[test]
    fn conversion_is_deterministic() {
        let ctx = BoundContext::new().with_attrs(vec![Attr::new("release", "v1.0.0")]);
        let record = Record::new(Level::Error, "Hello").with_attrs(vec![Attr::new("n", 1i64)]);
        let first = convert(&ctx, &record);
        let second = convert(&ctx, &record);
        assert_eq!(first, second);
    }

    #[test]
    fn record_without_attrs_converts_cleanly() {
        let record = Record::new(Level::Debug, "bare");
        let text = convert(&BoundContext::new(), &record);
        assert_eq!(text.lines().count(), 2);
    }
}
