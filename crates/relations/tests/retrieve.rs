mod support;

use pretty_assertions::assert_eq;
use relations::{Action, Query, Value};
use support::{row, ExecOp};

fn unit(id: i64, name: &str) -> relations::Row {
    row(&[("id", Value::I64(id)), ("name", Value::from(name))])
}

fn test(id: i64, unit_id: i64, name: &str) -> relations::Row {
    row(&[
        ("id", Value::I64(id)),
        ("unit_id", Value::I64(unit_id)),
        ("name", Value::from(name)),
    ])
}

#[test]
fn retrieve_one_cardinality() {
    let (mut source, log) = support::source();

    log.rows(vec![unit(1, "people"), unit(2, "stuff")]);
    let err = source
        .retrieve_one("Unit", &Query::new().by("name__in", vec!["people", "stuff"]))
        .unwrap_err();
    assert!(err.is_too_many_records());
    assert_eq!(err.to_string(), "unit: more than one retrieved");

    assert_eq!(
        log.ops()[0],
        ExecOp {
            sql: r#"SELECT * FROM "unit" WHERE "name" IN ($1,$2) ORDER BY "name" LIMIT $3"#.into(),
            params: vec![Value::from("people"), Value::from("stuff"), Value::I64(2)],
        }
    );

    let err = source
        .retrieve_one("Unit", &Query::new().eq("name", "things"))
        .unwrap_err();
    assert!(err.is_record_not_found());
    assert_eq!(err.to_string(), "unit: none retrieved");

    assert!(source
        .retrieve_optional("Unit", &Query::new().eq("name", "things"))
        .unwrap()
        .is_none());

    log.rows(vec![unit(2, "people")]);
    let people = source
        .retrieve_one("Unit", &Query::new().eq("name", "people"))
        .unwrap();
    assert_eq!(people.id(), Some(&Value::I64(2)));
    assert_eq!(people.action, Action::Update);
    assert_eq!(people.record.action, Action::Update);
    assert!(!people.record.is_changed());
}

#[test]
fn limit_fetches_one_past() {
    let (mut source, log) = support::source();

    log.rows(vec![unit(1, "people"), unit(2, "people")]);
    let retrieved = source
        .retrieve_many("Unit", &Query::new().eq("name", "people").limit(1))
        .unwrap();
    assert!(retrieved.overflow);
    assert_eq!(retrieved.len(), 1);
    assert_eq!(
        log.ops()[0],
        ExecOp {
            sql: r#"SELECT * FROM "unit" WHERE "name"=$1 ORDER BY "name" LIMIT $2"#.into(),
            params: vec![Value::from("people"), Value::I64(2)],
        }
    );

    log.rows(vec![unit(1, "people")]);
    let retrieved = source
        .retrieve_many("Unit", &Query::new().eq("name", "people").limit(2))
        .unwrap();
    assert!(!retrieved.overflow);
    assert_eq!(retrieved.len(), 1);

    log.rows(vec![unit(1, "people")]);
    let retrieved = source
        .retrieve_many("Unit", &Query::new().eq("name", "people").limit(1))
        .unwrap();
    assert!(!retrieved.overflow);
}

#[test]
fn sort_and_page() {
    let (mut source, log) = support::source();

    log.rows(vec![unit(2, "people")]);
    let retrieved = source
        .retrieve_many("Unit", &Query::new().sort(&["-name"]).limit(1).offset(1))
        .unwrap();

    assert_eq!(retrieved.values("name").unwrap(), vec![Value::from("people")]);
    assert_eq!(
        log.ops()[0],
        ExecOp {
            sql: r#"SELECT * FROM "unit" ORDER BY "name" DESC LIMIT $1 OFFSET $2"#.into(),
            params: vec![Value::I64(2), Value::I64(1)],
        }
    );
}

#[test]
fn like_matches_titles_and_parents() {
    let (mut source, log) = support::source();

    log.rows(vec![unit(2, "people")])
        .rows(vec![test(1, 2, "things")]);
    let retrieved = source
        .retrieve_many("Test", &Query::new().like("p"))
        .unwrap();

    assert_eq!(retrieved.values("name").unwrap(), vec![Value::from("things")]);
    assert!(!retrieved.overflow);
    assert_eq!(
        log.ops(),
        vec![
            ExecOp {
                sql: r#"SELECT * FROM "unit" WHERE ("name"::varchar(255) ILIKE $1) ORDER BY "name""#.into(),
                params: vec![Value::from("%p%")],
            },
            ExecOp {
                sql: r#"SELECT * FROM "test" WHERE ("unit_id" IN ($1) OR "name"::varchar(255) ILIKE $2) ORDER BY "name""#.into(),
                params: vec![Value::I64(2), Value::from("%p%")],
            },
        ]
    );
}

#[test]
fn like_without_matching_parents() {
    let (mut source, log) = support::source();

    source
        .retrieve_many("Test", &Query::new().like("zz"))
        .unwrap();

    assert_eq!(
        log.sql()[1],
        r#"SELECT * FROM "test" WHERE ("name"::varchar(255) ILIKE $1) ORDER BY "name""#
    );
}

#[test]
fn like_chunk_overflow() {
    let (mut source, log) = support::source();

    log.rows(vec![unit(2, "people"), unit(3, "pets")])
        .rows(vec![test(1, 2, "things")]);
    let retrieved = source
        .retrieve_many("Test", &Query::new().like("p").chunk(1))
        .unwrap();

    assert!(retrieved.overflow);
    assert_eq!(
        log.ops()[0].sql,
        r#"SELECT * FROM "unit" WHERE ("name"::varchar(255) ILIKE $1) ORDER BY "name" LIMIT $2"#
    );
    assert_eq!(log.ops()[0].params, vec![Value::from("%p%"), Value::I64(2)]);
    assert_eq!(log.ops()[1].params, vec![Value::I64(2), Value::from("%p%")]);

    log.rows(vec![unit(2, "people")]).rows(vec![test(1, 2, "things")]);
    let retrieved = source
        .retrieve_many("Test", &Query::new().like("p").chunk(1))
        .unwrap();
    assert!(!retrieved.overflow);
}

#[test]
fn model_like_hook() {
    let (mut source, log) = support::source();
    let unit = source.model("Unit").unwrap();

    let mut query = unit.query.clone();
    let mut params = vec![];
    assert!(!source
        .model_like(&unit, "", None, &mut query, &mut params)
        .unwrap());
    assert_eq!(query.where_clause(), "");
    assert!(params.is_empty());

    assert!(!source
        .model_like(&unit, "p", None, &mut query, &mut params)
        .unwrap());
    assert_eq!(query.where_clause(), r#"("name"::varchar(255) ILIKE $1)"#);
    assert_eq!(params, vec![Value::from("%p%")]);
    assert!(log.ops().is_empty());
}

#[test]
fn filter_through_child_relation() {
    let (mut source, log) = support::source();

    log.rows(vec![test(1, 2, "things")]).rows(vec![unit(2, "people")]);
    let retrieved = source
        .retrieve_many("Unit", &Query::new().by("test__name", "things"))
        .unwrap();

    assert_eq!(retrieved.values("id").unwrap(), vec![Value::I64(2)]);
    assert_eq!(
        log.ops(),
        vec![
            ExecOp {
                sql: r#"SELECT * FROM "test" WHERE "name"=$1 ORDER BY "name""#.into(),
                params: vec![Value::from("things")],
            },
            ExecOp {
                sql: r#"SELECT * FROM "unit" WHERE "id" IN ($1) ORDER BY "name""#.into(),
                params: vec![Value::I64(2)],
            },
        ]
    );
}

#[test]
fn filter_through_parent_relation() {
    let (mut source, log) = support::source();

    log.rows(vec![unit(2, "people")]);
    source
        .retrieve_many("Test", &Query::new().by("unit__name__in", vec!["people"]))
        .unwrap();

    assert_eq!(
        log.sql(),
        vec![
            r#"SELECT * FROM "unit" WHERE "name" IN ($1) ORDER BY "name""#,
            r#"SELECT * FROM "test" WHERE "unit_id" IN ($1) ORDER BY "name""#,
        ]
    );
}

#[test]
fn unknown_filter_field() {
    let (mut source, _) = support::source();

    let err = source
        .retrieve_many("Unit", &Query::new().eq("nope", 1))
        .unwrap_err();
    assert!(err.is_invalid_schema());
}

#[test]
fn retrieve_children_loads_by_key() {
    let (mut source, log) = support::source();

    log.rows(vec![unit(2, "people")]);
    let mut people = source.retrieve_one("Unit", &Query::new().eq("id", 2)).unwrap();

    log.clear();
    log.rows(vec![test(1, 2, "things"), test(3, 2, "stuff")]);
    source.retrieve_children(&mut people, "Test").unwrap();

    assert_eq!(
        log.ops(),
        vec![ExecOp {
            sql: r#"SELECT * FROM "test" WHERE "unit_id"=$1 ORDER BY "name""#.into(),
            params: vec![Value::I64(2)],
        }]
    );
    assert_eq!(people.children("Test").len(), 2);
    assert_eq!(people.children("Test")[0].action, Action::Update);
}

#[test]
fn count() {
    let (mut source, log) = support::source();

    log.count(3);
    assert_eq!(
        source
            .count("Unit", &Query::new().eq("name", "people").limit(1))
            .unwrap(),
        3
    );
    assert_eq!(
        log.ops()[0],
        ExecOp {
            sql: r#"SELECT COUNT(*) FROM "unit" WHERE "name"=$1"#.into(),
            params: vec![Value::from("people")],
        }
    );
}
