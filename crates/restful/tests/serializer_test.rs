use std::sync::Arc;

use restful::configuration::Value;
use restful::mock::Record;
use restful::{Error, Registry, Resource, Restful, RouteSet};
use serde_json::json;

fn routes() -> RouteSet {
    RouteSet::new()
        .route("foo", "/foos/:id")
        .route("foos", "/foos")
        .route("bar", "/bars/:id")
        .route("bars", "/bars")
        .route("bar_dingos", "/bars/:bar_id/dingos")
        .route("dingo", "/dingos/:id")
        .route("thing", "/things/:id")
        .route("custom_foo", "/custom_foo/:id")
        .route("prefix_foo", "/prefix/foos/:id")
        .route("line_item", "/line_items/:id")
}

fn registry() -> Registry {
    let registry = Registry::new(Arc::new(routes()));
    registry
        .set_default_url_options(json!({ "host": "test.org" }))
        .expect("Failed to set url options");
    registry
}

fn foo() -> Record {
    Record::new("Foo")
        .attribute("id", 7)
        .attribute("name", "A foo")
        .method("fancy_name", "fancy: A foo")
        .method("a_method", "calculated value")
        .has_many("bars", vec![bar(1), bar(2)])
}

fn dingo(id: i64) -> Record {
    Record::new("Dingo")
        .attribute("id", id)
        .attribute("name", format!("The dingo{id}"))
        .attribute("bar_id", 1)
}

fn bar(id: i64) -> Record {
    Record::new("Bar")
        .attribute("id", id)
        .attribute("name", format!("The bar{id}"))
        .attribute("foo_id", 7)
        .belongs_to("foo", Record::new("Foo").attribute("id", 7))
        .has_many("dingos", vec![dingo(1), dingo(2)])
}

fn sub() -> Record {
    Record::new("Sub")
        .with_base("Thing")
        .attribute("id", 2)
        .attribute("name", "a sub thing")
        .attribute("secret", "another secret")
}

fn register_bar_service(registry: &Registry) {
    registry
        .register_web_service(
            "bar",
            json!({
                "resources": {
                    "foo": { "associations": "bars" },
                    "bar": { "associations": { "dingos": null, "special": "foo" } },
                    "thing": { "serialization": { "except": "secret" } },
                },
            }),
        )
        .expect("Failed to register bar service");
}

#[test]
fn serializes_a_record_without_configuration() {
    let registry = registry();
    registry.register_web_service("test", Value::Nil).unwrap();
    assert_eq!(
        foo().restful(&registry).serialize().unwrap(),
        json!({
            "foo": { "id": 7, "name": "A foo" },
            "name": "A foo",
            "href": "http://test.org/foos/7",
        })
    );
}

#[test]
fn uses_the_api_prefix_and_name_method() {
    let registry = registry();
    registry
        .register_web_service(
            "test",
            json!({
                "api_prefix": "prefix",
                "resources": {
                    "foo": {
                        "name_method": "fancy_name",
                        "serialization": { "only": "name", "methods": "a_method" },
                    },
                },
            }),
        )
        .unwrap();
    assert_eq!(
        foo().restful(&registry).web_service("test").serialize().unwrap(),
        json!({
            "foo": { "name": "A foo", "a_method": "calculated value" },
            "name": "fancy: A foo",
            "href": "http://test.org/prefix/foos/7",
        })
    );
}

#[test]
fn declared_resource_names_match_record_types() {
    let registry = registry();
    registry
        .register_web_service(
            "test",
            json!({
                "resources": {
                    "LineItem": { "name_method": "label", "serialization": { "only": "id" } },
                },
            }),
        )
        .unwrap();
    let line_item = Record::new("LineItem")
        .attribute("id", 3)
        .attribute("quantity", 12)
        .method("label", "Twelve widgets");
    assert_eq!(
        line_item.restful(&registry).serialize().unwrap(),
        json!({
            "line_item": { "id": 3 },
            "name": "Twelve widgets",
            "href": "http://test.org/line_items/3",
        })
    );
}

#[test]
fn resource_configurations_are_accepted_as_options() {
    let registry = registry();
    register_bar_service(&registry);
    let mut options = Resource::default();
    options
        .set_url_for("custom_foo")
        .unwrap()
        .set_shallow(true)
        .unwrap();
    let document = foo()
        .restful(&registry)
        .web_service("bar")
        .options(options)
        .serialize()
        .unwrap();
    assert_eq!(
        document,
        json!({
            "foo": { "id": 7, "name": "A foo" },
            "name": "A foo",
            "href": "http://test.org/custom_foo/7",
        })
    );
}

#[test]
fn url_for_overrides_the_href() {
    let registry = registry();
    registry
        .register_web_service("test", json!({ "resources": { "foo": { "url_for": "custom_foo" } } }))
        .unwrap();
    let document = foo().restful(&registry).serialize().unwrap();
    assert_eq!(document["href"], json!("http://test.org/custom_foo/7"));
}

#[test]
fn url_for_without_a_route_falls_back_to_the_resource_route() {
    let registry = registry();
    registry
        .register_web_service("test", json!({ "resources": { "foo": { "url_for": "nowhere" } } }))
        .unwrap();
    let document = foo().restful(&registry).serialize().unwrap();
    assert_eq!(document["href"], json!("http://test.org/foos/7"));
}

#[test]
fn collection_associations_use_the_bare_route() {
    let registry = registry();
    register_bar_service(&registry);
    assert_eq!(
        foo().restful(&registry).serialize().unwrap(),
        json!({
            "foo": { "id": 7, "name": "A foo" },
            "name": "A foo",
            "href": "http://test.org/foos/7",
            "bars_href": "http://test.org/bars",
        })
    );
}

#[test]
fn labelled_and_nested_associations() {
    let registry = registry();
    register_bar_service(&registry);
    assert_eq!(
        bar(1).restful(&registry).serialize().unwrap(),
        json!({
            "bar": { "id": 1, "name": "The bar1", "foo_id": 7 },
            "name": "The bar1",
            "href": "http://test.org/bars/1",
            "dingos_href": "http://test.org/bars/1/dingos",
            "special_href": "http://test.org/foos/7",
        })
    );
}

#[test]
fn subtypes_inherit_from_their_base() {
    let registry = registry();
    register_bar_service(&registry);
    assert_eq!(
        sub().restful(&registry).serialize().unwrap(),
        json!({
            "sub": { "id": 2, "name": "a sub thing" },
            "name": "a sub thing",
            "href": "http://test.org/things/2",
        })
    );
}

#[test]
fn arrays_are_shallow_unless_asked_otherwise() {
    let registry = registry();
    register_bar_service(&registry);
    let bars = vec![bar(1), bar(2)];

    assert_eq!(
        bars.restful(&registry).serialize().unwrap(),
        json!([
            {
                "bar": { "id": 1, "name": "The bar1", "foo_id": 7 },
                "name": "The bar1",
                "href": "http://test.org/bars/1",
            },
            {
                "bar": { "id": 2, "name": "The bar2", "foo_id": 7 },
                "name": "The bar2",
                "href": "http://test.org/bars/2",
            },
        ])
    );

    let deep = bars
        .restful(&registry)
        .options(json!({
            "shallow": false,
            "serialization": { "only": "name", "include": { "dingos": { "only": "id" } } },
        }))
        .serialize()
        .unwrap();
    assert_eq!(
        deep[0],
        json!({
            "bar": { "name": "The bar1", "dingos": [{ "id": 1 }, { "id": 2 }] },
            "name": "The bar1",
            "href": "http://test.org/bars/1",
            "dingos_href": "http://test.org/bars/1/dingos",
            "special_href": "http://test.org/foos/7",
        })
    );
}

#[test]
fn shallow_records_drop_includes_and_associations() {
    let registry = registry();
    register_bar_service(&registry);
    let document = bar(1)
        .restful(&registry)
        .options(json!({
            "shallow": true,
            "serialization": { "include": { "dingos": null } },
        }))
        .serialize()
        .unwrap();
    assert_eq!(
        document,
        json!({
            "bar": { "id": 1, "name": "The bar1", "foo_id": 7 },
            "name": "The bar1",
            "href": "http://test.org/bars/1",
        })
    );
}

#[test]
fn configure_callback_edits_every_element() {
    let registry = registry();
    register_bar_service(&registry);
    let bars = vec![bar(1), bar(2)];
    let document = bars
        .restful(&registry)
        .configure(|resource| {
            resource.set_name_method("foo_id")?;
            Ok(())
        })
        .serialize()
        .unwrap();
    assert_eq!(document[0]["name"], json!(7));
    assert_eq!(document[1]["name"], json!(7));
}

#[test]
fn call_time_lists_extend_configured_ones() {
    let registry = registry();
    registry
        .register_web_service(
            "test",
            json!({ "resources": { "foo": { "serialization": { "only": "id" } } } }),
        )
        .unwrap();
    let document = foo()
        .restful(&registry)
        .options(json!({ "serialization": { "only": "name" } }))
        .serialize()
        .unwrap();
    assert_eq!(document["foo"], json!({ "id": 7, "name": "A foo" }));
}

#[test]
fn configured_documents_are_not_mutated_by_calls() {
    let registry = registry();
    register_bar_service(&registry);
    let before = registry.web_service_configuration("bar").unwrap();
    bar(1)
        .restful(&registry)
        .options(json!({ "associations": "foo", "shallow": true }))
        .serialize()
        .unwrap();
    assert_eq!(registry.web_service_configuration("bar").unwrap(), before);
}

#[test]
fn unknown_web_service_fails() {
    let registry = registry();
    register_bar_service(&registry);
    let result = foo().restful(&registry).web_service("baz").serialize();
    assert!(matches!(result, Err(Error::MissingWebService(name)) if name == "baz"));
}
