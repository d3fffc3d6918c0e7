//! Href resolution for one configured association.

use serde_json::Value as JsonValue;

use crate::model::{Reflection, Resourceful};
use crate::url::UrlResolver;

/// A relation of one record, exposed as `<label>_href`.
///
/// Built fresh for every serialization; nothing here is persisted.
pub struct Association<'s> {
    subject: &'s dyn Resourceful,
    resource_key: &'s str,
    name: String,
    label: String,
    resolver: &'s UrlResolver,
}

impl<'s> Association<'s> {
    pub fn new(
        subject: &'s dyn Resourceful,
        resource_key: &'s str,
        name: String,
        label: String,
        resolver: &'s UrlResolver,
    ) -> Self {
        Self {
            subject,
            resource_key,
            name,
            label,
            resolver,
        }
    }

    /// The relation name on the model.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The output label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Key of the href field in the document.
    pub fn field(&self) -> String {
        format!("{}_href", self.label)
    }

    pub fn reflection(&self) -> Option<Reflection> {
        self.subject.reflect_on_association(&self.name)
    }

    /// True for belongs-to and has-one relations. Relations the model does not
    /// declare are treated as collections.
    pub fn is_singular(&self) -> bool {
        self.reflection().is_some_and(|reflection| reflection.kind.is_singular())
    }

    /// Singular relations resolve the related record's member route, keyed by
    /// the association name. Collections try the nested route
    /// (`<resource>_<association>` with the owner's id) before the bare one.
    pub fn href(&self) -> Option<String> {
        match self.reflection() {
            Some(reflection) if reflection.kind.is_singular() => {
                let id = reflection.related_id?;
                self.resolver.resolve(&[self.name.as_str()], &[id])
            }
            _ => {
                let owner: Vec<JsonValue> = self.subject.id().into_iter().collect();
                self.resolver
                    .resolve(&[self.resource_key, self.name.as_str()], &owner)
                    .or_else(|| self.resolver.resolve(&[self.name.as_str()], &[]))
            }
        }
    }
}

impl std::fmt::Debug for Association<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Association")
            .field("resource_key", &self.resource_key)
            .field("name", &self.name)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::Record;
    use crate::url::{RouteSet, UrlOptions};
    use serde_json::json;
    use std::sync::Arc;

    fn resolver() -> UrlResolver {
        let routes = RouteSet::new()
            .route("foo", "/foos/:id")
            .route("bars", "/bars")
            .route("dingos", "/dingos")
            .route("bar_dingos", "/bars/:bar_id/dingos");
        let mut options = UrlOptions::new();
        options.insert("host".into(), json!("test.org"));
        UrlResolver::new(Arc::new(routes), None, options)
    }

    fn bar() -> Record {
        Record::new("Bar")
            .attribute("id", 1)
            .belongs_to("foo", Record::new("Foo").attribute("id", 7))
            .has_many("dingos", vec![])
            .has_one("one", None)
    }

    #[test]
    fn singular_relations_use_the_member_route() {
        let resolver = resolver();
        let bar = bar();
        let special = Association::new(&bar, "bar", "foo".into(), "special".into(), &resolver);
        assert!(special.is_singular());
        assert_eq!(special.field(), "special_href");
        assert_eq!(special.href().as_deref(), Some("http://test.org/foos/7"));

        let one = Association::new(&bar, "bar", "one".into(), "one".into(), &resolver);
        assert!(one.is_singular());
        assert_eq!(one.href(), None);
    }

    #[test]
    fn collections_prefer_the_nested_route() {
        let resolver = resolver();
        let bar = bar();
        let dingos = Association::new(&bar, "bar", "dingos".into(), "dingos".into(), &resolver);
        assert!(!dingos.is_singular());
        assert_eq!(dingos.href().as_deref(), Some("http://test.org/bars/1/dingos"));
    }

    #[test]
    fn collections_fall_back_to_the_bare_route() {
        let resolver = resolver();
        let foo = Record::new("Foo").attribute("id", 7).has_many("bars", vec![]);
        let bars = Association::new(&foo, "foo", "bars".into(), "bars".into(), &resolver);
        assert_eq!(bars.href().as_deref(), Some("http://test.org/bars"));

        // Undeclared relations are treated as collections.
        let undeclared = Association::new(&foo, "foo", "dingos".into(), "dingos".into(), &resolver);
        assert!(undeclared.reflection().is_none());
        assert_eq!(undeclared.href().as_deref(), Some("http://test.org/dingos"));
    }
}
