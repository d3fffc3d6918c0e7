//! # In-Memory Records
//!
//! [`Record`] is a [`Resourceful`] value assembled at runtime: a type name, an
//! ordered attribute list, computed methods and relations to other records. It
//! lets tests (and applications without a typed domain model) exercise the
//! serializer without writing a `Resourceful` impl per type.
//!
//! ## Introspection rules
//!
//! [`Record::serializable_record`] follows the usual attribute-serialization
//! contract:
//!
//! 1. `only` (when non-empty) keeps the listed attributes, otherwise `except`
//!    drops the listed ones. Attribute order is preserved.
//! 2. Each name in `methods` appends the computed value. Unknown methods fail
//!    with [`Error::Introspection`](crate::Error::Introspection).
//! 3. Each entry in `include` nests the related record(s), serialized with the
//!    entry's own options: an array for has-many, an object (or `null`) for
//!    singular relations. Unknown relations fail the same way.
//!
//! ## Example
//!
//! ```rust
//! use restful::mock::Record;
//! use restful::model::{Resourceful, SerializationOptions};
//! use serde_json::json;
//!
//! let foo = Record::new("Foo")
//!     .attribute("id", 7)
//!     .attribute("name", "A foo")
//!     .method("fancy_name", "fancy: A foo")
//!     .has_many("bars", vec![Record::new("Bar").attribute("id", 1)]);
//!
//! let options = SerializationOptions {
//!     only: vec!["name".into()],
//!     methods: vec!["fancy_name".into()],
//!     ..Default::default()
//! };
//! let document = foo.serializable_record(&options)?;
//! assert_eq!(
//!     serde_json::Value::Object(document),
//!     json!({ "name": "A foo", "fancy_name": "fancy: A foo" })
//! );
//! # Ok::<(), restful::Error>(())
//! ```

use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use crate::error::Result;
use crate::model::{nest_many, nest_one, Document, Reflection, RelationKind, Resourceful, SerializationOptions};

/// Related records of one relation.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub kind: RelationKind,
    pub records: Vec<Record>,
}

/// A runtime-assembled domain record.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    type_name: String,
    base_type_name: Option<String>,
    attributes: Document,
    methods: BTreeMap<String, JsonValue>,
    relations: BTreeMap<String, Relation>,
}

impl Record {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            base_type_name: None,
            attributes: Document::new(),
            methods: BTreeMap::new(),
            relations: BTreeMap::new(),
        }
    }

    /// Marks this record as a subtype of `base_type_name`.
    pub fn with_base(mut self, base_type_name: &str) -> Self {
        self.base_type_name = Some(base_type_name.to_string());
        self
    }

    /// Appends (or replaces) a stored attribute.
    pub fn attribute(mut self, name: &str, value: impl Into<JsonValue>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    /// Adds a computed method.
    pub fn method(mut self, name: &str, value: impl Into<JsonValue>) -> Self {
        self.methods.insert(name.to_string(), value.into());
        self
    }

    pub fn belongs_to(self, name: &str, record: Record) -> Self {
        self.relation(name, RelationKind::BelongsTo, vec![record])
    }

    pub fn has_one(self, name: &str, record: Option<Record>) -> Self {
        self.relation(name, RelationKind::HasOne, record.into_iter().collect())
    }

    pub fn has_many(self, name: &str, records: Vec<Record>) -> Self {
        self.relation(name, RelationKind::HasMany, records)
    }

    pub fn relation(mut self, name: &str, kind: RelationKind, records: Vec<Record>) -> Self {
        self.relations.insert(name.to_string(), Relation { kind, records });
        self
    }

    pub fn related(&self, name: &str) -> Option<&[Record]> {
        self.relations.get(name).map(|relation| relation.records.as_slice())
    }

    fn nested(&self, name: &str, options: &SerializationOptions) -> Option<Result<JsonValue>> {
        let relation = self.relations.get(name)?;
        Some(if relation.kind.is_singular() {
            nest_one(relation.records.first(), options)
        } else {
            nest_many(&relation.records, options)
        })
    }
}

impl Resourceful for Record {
    fn type_name(&self) -> &str {
        &self.type_name
    }

    fn base_type_name(&self) -> Option<&str> {
        self.base_type_name.as_deref()
    }

    fn call(&self, method: &str) -> Option<JsonValue> {
        self.attributes
            .get(method)
            .or_else(|| self.methods.get(method))
            .cloned()
    }

    fn serializable_record(&self, options: &SerializationOptions) -> Result<Document> {
        options.project(self, self.attributes.clone(), |name, nested| self.nested(name, nested))
    }

    fn reflect_on_association(&self, name: &str) -> Option<Reflection> {
        let relation = self.relations.get(name)?;
        let related_id = if relation.kind.is_singular() {
            relation.records.first().and_then(|record| record.id())
        } else {
            None
        };
        Some(Reflection {
            kind: relation.kind,
            related_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use serde_json::json;

    fn bar() -> Record {
        Record::new("Bar")
            .attribute("id", 1)
            .attribute("name", "The bar1")
            .attribute("foo_id", 7)
            .belongs_to("foo", Record::new("Foo").attribute("id", 7))
            .has_many(
                "dingos",
                vec![
                    Record::new("Dingo").attribute("id", 1).attribute("name", "The dingo1"),
                    Record::new("Dingo").attribute("id", 2).attribute("name", "The dingo2"),
                ],
            )
    }

    fn serialize(record: &Record, options: SerializationOptions) -> JsonValue {
        JsonValue::Object(record.serializable_record(&options).unwrap())
    }

    #[test]
    fn serializes_all_attributes_in_order() {
        let document = bar().serializable_record(&SerializationOptions::default()).unwrap();
        assert_eq!(document.keys().collect::<Vec<_>>(), vec!["id", "name", "foo_id"]);
    }

    #[test]
    fn only_takes_precedence_over_except() {
        let options = SerializationOptions {
            only: vec!["name".into()],
            except: vec!["name".into()],
            ..Default::default()
        };
        assert_eq!(serialize(&bar(), options), json!({ "name": "The bar1" }));

        let options = SerializationOptions {
            except: vec!["foo_id".into()],
            ..Default::default()
        };
        assert_eq!(serialize(&bar(), options), json!({ "id": 1, "name": "The bar1" }));
    }

    #[test]
    fn includes_related_records() {
        let options = SerializationOptions {
            only: vec!["name".into()],
            include: BTreeMap::from([(
                "dingos".to_string(),
                SerializationOptions {
                    only: vec!["name".into(), "id".into()],
                    ..Default::default()
                },
            )]),
            ..Default::default()
        };
        assert_eq!(
            serialize(&bar(), options),
            json!({
                "name": "The bar1",
                "dingos": [
                    { "id": 1, "name": "The dingo1" },
                    { "id": 2, "name": "The dingo2" },
                ],
            })
        );
    }

    #[test]
    fn unknown_methods_and_relations_fail() {
        let options = SerializationOptions {
            methods: vec!["missing".into()],
            ..Default::default()
        };
        assert!(matches!(
            bar().serializable_record(&options),
            Err(Error::Introspection { .. })
        ));

        let options = SerializationOptions {
            include: BTreeMap::from([("missing".to_string(), SerializationOptions::default())]),
            ..Default::default()
        };
        assert!(matches!(
            bar().serializable_record(&options),
            Err(Error::Introspection { .. })
        ));
    }

    #[test]
    fn reflects_on_relations() {
        let bar = bar();
        assert_eq!(
            bar.reflect_on_association("foo"),
            Some(Reflection {
                kind: RelationKind::BelongsTo,
                related_id: Some(json!(7)),
            })
        );
        assert_eq!(
            bar.reflect_on_association("dingos"),
            Some(Reflection {
                kind: RelationKind::HasMany,
                related_id: None,
            })
        );
        assert_eq!(bar.reflect_on_association("missing"), None);
        assert_eq!(bar.related("dingos").map(<[Record]>::len), Some(2));
    }

    #[test]
    fn responds_to_attributes_and_methods() {
        let foo = Record::new("Foo").attribute("id", 7).method("a_method", "calculated value");
        assert_eq!(foo.id(), Some(json!(7)));
        assert_eq!(foo.call("a_method"), Some(json!("calculated value")));
        assert_eq!(foo.call("missing"), None);
        assert_eq!(Record::new("Foo").attribute("id", JsonValue::Null).id(), None);
    }
}
