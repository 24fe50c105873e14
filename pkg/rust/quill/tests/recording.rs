// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use common::{Order, Person};
use quill::{Executed, Patch, Postgres, Query, Session, Value};
use quill_testing::{Event, RecordingBackend};

fn session() -> (Session<RecordingBackend>, RecordingBackend) {
	quill_testing::init_tracing();
	let backend = RecordingBackend::new();
	(Session::new(backend.clone()), backend)
}

#[test]
fn test_one_unit_per_operation() {
	let (session, backend) = session();
	backend.respond_rows(3);

	let rows = session.update_add(&Patch::new().set(Person::AGE, 5), ()).unwrap();
	assert_eq!(rows, 3);

	let events = backend.events();
	assert_eq!(events.len(), 3);
	assert_eq!(events[0], Event::Acquire);
	assert!(matches!(&events[1], Event::Execute(rendered) if rendered.sql == r#"UPDATE "person" SET "age" = "age" + ?1"#));
	assert_eq!(events[2], Event::Release);
}

#[test]
fn test_ambiguous_filter_never_reaches_backend() {
	let (session, backend) = session();
	let filter = (Query::of::<Person>().filter(Person::AGE.gt(10)), Person::LAST_NAME.eq("Page"));

	let err = session.update_only(&Patch::new().set(Person::FIRST_NAME, "JJ"), filter).unwrap_err();
	assert_eq!(err.code, "MUTATE_004");
	assert!(backend.events().is_empty());
}

#[test]
fn test_filter_on_other_record_never_reaches_backend() {
	let (session, backend) = session();
	let err = session.delete::<Person>(Order::PAID.eq(true)).unwrap_err();
	assert_eq!(err.code, "MUTATE_005");
	assert!(backend.events().is_empty());
}

#[test]
fn test_non_numeric_increment_never_reaches_backend() {
	let (session, backend) = session();
	let err = session.update_add(&Patch::new().set(Person::LAST_NAME, "x"), ()).unwrap_err();
	assert_eq!(err.code, "MUTATE_003");
	assert!(backend.events().is_empty());
}

#[test]
fn test_unknown_field_never_reaches_backend() {
	let (session, backend) = session();
	let err = session.insert_only_fields(&Person::default(), ["first_name", "nickname"]).unwrap_err();
	assert_eq!(err.code, "MUTATE_001");
	assert!(backend.events().is_empty());
}

#[test]
fn test_unsupported_dialect_feature_never_reaches_backend() {
	let (session, backend) = session();
	let err = session.delete::<Person>(Person::LAST_NAME.ilike("hen%")).unwrap_err();
	assert_eq!(err.code, "DIALECT_001");
	assert!(backend.events().is_empty());
}

#[test]
fn test_unit_released_on_storage_error() {
	let (session, backend) = session();
	backend.fail_with("database is locked");

	let err = session.delete::<Person>(Person::AGE.lt(18)).unwrap_err();
	assert_eq!(err.message, "database is locked");
	assert_eq!(backend.events().last(), Some(&Event::Release));
	assert!(backend.is_balanced());
}

#[test]
fn test_insert_returns_backend_result() {
	let (session, backend) = session();
	backend.respond(Ok(Executed {
		rows_affected: 1,
		last_insert_id: Some(7),
	}));

	let executed = session.insert_only(&Patch::new().set(Person::FIRST_NAME, "Amy")).unwrap();
	assert_eq!(executed.last_insert_id, Some(7));

	let rendered = &backend.executed()[0];
	assert_eq!(rendered.sql, r#"INSERT INTO "person" ("first_name") VALUES (?1)"#);
	assert_eq!(rendered.params, vec![Value::utf8("Amy")]);
}

#[test]
fn test_postgres_dialect() {
	let backend = RecordingBackend::with_dialect(Postgres);
	let session = Session::new(backend.clone());

	session.update_only(&Patch::new().set(Person::FIRST_NAME, "JJ"), Person::LAST_NAME.ilike("hen%")).unwrap();

	let rendered = &backend.executed()[0];
	assert_eq!(rendered.sql, r#"UPDATE "person" SET "first_name" = $1 WHERE "last_name" ILIKE $2"#);
	assert_eq!(rendered.params, vec![Value::utf8("JJ"), Value::utf8("hen%")]);
}
