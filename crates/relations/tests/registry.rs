mod support;

use pretty_assertions::assert_eq;
use relations::{Config, Registry, Source};
use support::MockConnection;

#[test]
fn borrowed_connection_is_handed_back() {
    let (connection, log) = MockConnection::new();
    let source = Source::new("unit", "init", Box::new(connection));

    assert_eq!(source.name(), "unit");
    assert_eq!(source.database(), "init");
    assert_eq!(source.schema(), None);
    assert!(!source.is_created());

    let connection = source.close().unwrap();
    assert!(connection.is_some());
    assert!(!log.is_closed());
}

#[test]
fn owned_connection_is_closed() {
    let (connection, log) = MockConnection::new();
    let source = Source::new("test", "init", Box::new(connection))
        .with_schema("private")
        .owned();

    assert_eq!(source.schema(), Some("private"));
    assert!(source.is_created());

    assert!(source.close().unwrap().is_none());
    assert!(log.is_closed());
}

#[test]
fn registry_lookup_and_close() {
    let mut registry = Registry::new();

    let (first, first_log) = MockConnection::new();
    let (second, second_log) = MockConnection::new();
    let (third, _) = MockConnection::new();

    assert!(registry
        .insert(Source::new("unit", "init", Box::new(first)).owned())
        .is_none());
    assert!(registry
        .insert(Source::new("test", "init", Box::new(second)).owned())
        .is_none());

    let replaced = registry
        .insert(Source::new("unit", "other", Box::new(third)))
        .unwrap();
    assert_eq!(replaced.database(), "init");
    replaced.close().unwrap();
    assert!(first_log.is_closed());

    assert_eq!(registry.names().collect::<Vec<_>>(), vec!["unit", "test"]);
    assert_eq!(registry.get("unit").unwrap().database(), "other");
    assert!(registry.get_mut("test").is_some());
    assert!(registry.get("nope").is_none());

    let removed = registry.remove("unit").unwrap();
    assert_eq!(removed.name(), "unit");
    assert_eq!(registry.len(), 1);

    registry.close().unwrap();
    assert!(second_log.is_closed());
}

#[test]
fn registry_close_reports_first_failure() {
    let mut registry = Registry::new();

    let (first, first_log) = MockConnection::new();
    let (second, second_log) = MockConnection::new();
    let (third, third_log) = MockConnection::new();
    first_log.fail_close("connection reset");
    second_log.fail_close("broken pipe");

    registry.insert(Source::new("unit", "init", Box::new(first)).owned());
    registry.insert(Source::new("test", "init", Box::new(second)).owned());
    registry.insert(Source::new("meta", "init", Box::new(third)).owned());

    let err = registry.close().unwrap_err();
    assert_eq!(err.to_string(), "closing source `unit`: connection reset");
    assert!(second_log.is_closed());
    assert!(third_log.is_closed());
}

#[cfg(not(feature = "postgresql"))]
#[test]
fn connect_without_driver_feature() {
    let err = Source::connect(&Config::new("unit", "people", "postgresql://localhost/people"))
        .unwrap_err();
    assert_eq!(err.to_string(), "`postgresql` feature not enabled");
}

#[test]
fn config_deserializes() {
    let config: Config = serde_json::from_str(
        r#"{"name": "unit", "database": "people", "url": "postgresql://localhost:5432"}"#,
    )
    .unwrap();

    assert_eq!(
        config,
        Config::new("unit", "people", "postgresql://localhost:5432")
    );

    let config: Config = serde_json::from_str(
        r#"{"name": "unit", "database": "people", "schema": "private", "url": "postgresql://localhost"}"#,
    )
    .unwrap();
    assert_eq!(config.schema.as_deref(), Some("private"));
}

#[test]
fn connect_rejects_unknown_schemes() {
    let err = Source::connect(&Config::new("unit", "people", "mysql://localhost/people")).unwrap_err();
    assert!(err.is_invalid_connection_url());

    let err = Source::connect(&Config::new("unit", "people", "not a url")).unwrap_err();
    assert!(err.is_invalid_connection_url());
}
