//! Immutable per-handler bound context.
//!
//! Each derived handler carries a [`BoundContext`]: the attributes bound by
//! earlier `with_attrs` calls (each remembering the group path it was bound
//! under) and the current group path. Derivation always produces a new
//! value; an existing context is never mutated, which is what makes
//! concurrent derivation from a shared parent handler safe.

use crate::record::Attr;

/// An attribute together with the group path it was bound under.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundAttr {
    pub groups: Vec<String>,
    pub attr: Attr,
}

/// Accumulated attributes and group path for one handler instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BoundContext {
    attrs: Vec<BoundAttr>,
    groups: Vec<String>,
}

impl BoundContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attributes bound so far, in binding order.
    pub fn attrs(&self) -> &[BoundAttr] {
        &self.attrs
    }

    /// The current group path.
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// A new context with `attrs` appended under the current group path.
    pub fn with_attrs(&self, attrs: Vec<Attr>) -> Self {
        let mut next = self.clone();
        next.attrs.extend(attrs.into_iter().map(|attr| BoundAttr {
            groups: self.groups.clone(),
            attr,
        }));
        next
    }

    /// A new context with the group path extended by `name`.
    pub fn with_group(&self, name: &str) -> Self {
        let mut next = self.clone();
        next.groups.push(name.to_owned());
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_attrs_appends_in_call_order() {
        let ctx = BoundContext::new()
            .with_attrs(vec![Attr::new("a", 1i64)])
            .with_attrs(vec![Attr::new("b", 2i64)]);
        let keys: Vec<_> = ctx.attrs().iter().map(|b| b.attr.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
    }

    #[test]
    fn chained_with_attrs_matches_single_call() {
        let chained = BoundContext::new()
            .with_attrs(vec![Attr::new("a", 1i64)])
            .with_attrs(vec![Attr::new("b", 2i64)]);
        let single = BoundContext::new().with_attrs(vec![Attr::new("a", 1i64), Attr::new("b", 2i64)]);
        assert_eq!(chained, single);
    }

    #[test]
    fn attrs_remember_their_owning_group_path() {
        let ctx = BoundContext::new()
            .with_attrs(vec![Attr::new("release", "v1.0.0")])
            .with_group("user")
            .with_attrs(vec![Attr::new("id", "user-123")]);

        assert_eq!(ctx.attrs()[0].groups, Vec::<String>::new());
        assert_eq!(ctx.attrs()[1].groups, vec!["user".to_owned()]);
        assert_eq!(ctx.groups(), ["user"]);
    }

    #[test]
    fn derivation_leaves_the_parent_untouched() {
        let parent = BoundContext::new().with_attrs(vec![Attr::new("a", 1i64)]);
        let child = parent.with_group("g").with_attrs(vec![Attr::new("b", 2i64)]);

        assert_eq!(parent.attrs().len(), 1);
        assert!(parent.groups().is_empty());
        assert_eq!(child.attrs().len(), 2);
    }
}
