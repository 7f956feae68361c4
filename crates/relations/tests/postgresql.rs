//! Runs against a live server. Set `POSTGRES_URL` (for example
//! `postgresql://postgres@localhost:5432`) to enable.
#![cfg(feature = "postgresql")]

use pretty_assertions::assert_eq;
use relations::{Config, Connection, Field, Model, Query, Relation, Source, Value};

fn source() -> Option<Source> {
    let url = std::env::var("POSTGRES_URL").ok()?;
    let mut source = Source::connect(&Config::new("live", "postgres", url)).unwrap();

    for table in ["plain", "simple", "meta"] {
        source
            .connection()
            .execute(&format!("DROP TABLE IF EXISTS \"{table}\""), &[])
            .unwrap();
    }

    source.register(
        Model::new("Simple")
            .field(Field::int("id"))
            .field(Field::text("name")),
    );
    source.register(
        Model::new("Plain")
            .field(Field::int("simple_id"))
            .field(Field::text("name")),
    );
    source.register(
        Model::new("Meta")
            .field(Field::int("id"))
            .field(Field::text("name"))
            .field(Field::bool("flag"))
            .field(Field::float("spend"))
            .field(Field::list("stuff"))
            .field(Field::map("things")),
    );
    source
        .relate(Relation::one_to_many("Simple", "Plain"))
        .unwrap();

    for model in ["Simple", "Plain", "Meta"] {
        source.define(model).unwrap();
    }

    Some(source)
}

#[test]
fn cascade_and_structured_round_trip() {
    let Some(mut source) = source() else {
        return;
    };

    let mut simple = source.instance("Simple").unwrap().with("name", "sure").unwrap();
    simple.add(source.instance("Plain").unwrap().with("name", "fine").unwrap());
    source.create(&mut simple).unwrap();

    let plain = source.retrieve_one("Plain", &Query::new()).unwrap();
    assert_eq!(plain.get("simple_id").unwrap(), simple.id().unwrap());
    assert_eq!(plain.get("name").unwrap(), &Value::from("fine"));

    let mut things = indexmap::IndexMap::new();
    things.insert("a".to_string(), Value::I64(1));

    let mut meta = source
        .instance("Meta")
        .unwrap()
        .with("name", "yep")
        .unwrap()
        .with("flag", true)
        .unwrap()
        .with("spend", 1.1)
        .unwrap()
        .with("stuff", vec![1])
        .unwrap()
        .with("things", Value::Map(things.clone()))
        .unwrap();
    source.create(&mut meta).unwrap();

    let meta = source
        .retrieve_one("Meta", &Query::new().eq("name", "yep"))
        .unwrap();
    assert_eq!(meta.get("flag").unwrap(), &Value::Bool(true));
    assert_eq!(meta.get("spend").unwrap(), &Value::F64(1.1));
    assert_eq!(meta.get("stuff").unwrap(), &Value::from(vec![1]));
    assert_eq!(meta.get("things").unwrap(), &Value::Map(things));

    assert!(source
        .retrieve_many("Simple", &Query::new().limit(1))
        .map(|retrieved| !retrieved.overflow)
        .unwrap());

    source.close().unwrap();
}
