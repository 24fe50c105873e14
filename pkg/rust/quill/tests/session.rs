// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod common;

use common::{Order, Person, ages, people, session};
use quill::{Patch, Projection, Query, StatementKind, Value, col, lit, plan};

#[test]
fn test_update_only_hendrix() {
	let session = session();

	let statement = plan::update_only(&Patch::new().set(Person::FIRST_NAME, "JJ"), Person::LAST_NAME.eq("Hendrix"))
		.unwrap();
	assert_eq!(statement.kind(), StatementKind::UpdateOnly);
	assert_eq!(statement.selection().names().collect::<Vec<_>>(), vec!["first_name"]);

	let rows = session.execute(&statement).unwrap().rows_affected;
	assert_eq!(rows, 1);

	let people = people(&session);
	assert_eq!(people[0].first_name, "JJ");
	assert_eq!(people[1].first_name, "Jimmy");
	assert_eq!(people[2].first_name, "Eric");
}

#[test]
fn test_update_only_named_fields_hendrix() {
	let session = session();
	let person = Person {
		first_name: "JJ".to_string(),
		..Default::default()
	};

	let rows = session.update_only_fields(&person, ["first_name"], Person::LAST_NAME.eq("Hendrix")).unwrap();
	assert_eq!(rows, 1);

	let hendrix = &people(&session)[0];
	assert_eq!(hendrix.first_name, "JJ");
	assert_eq!(hendrix.age, 20);
}

#[test]
fn test_insert_only_named_fields_amy() {
	let session = session();
	let person = Person {
		id: 99,
		first_name: "Amy".to_string(),
		last_name: "ignored".to_string(),
		age: 27,
	};

	let statement = plan::insert_only_fields(&person, ["first_name"]).unwrap();
	assert_eq!(statement.kind(), StatementKind::Insert);
	assert!(statement.predicate().is_none());

	session.execute(&statement).unwrap();
	let amy = &people(&session)[3];
	assert_eq!((amy.id, amy.last_name.as_str(), amy.age), (4, "", 0));
}

#[test]
fn test_update_only_fields_from_record() {
	let session = session();
	let person = Person {
		first_name: "James".to_string(),
		age: 99,
		..Default::default()
	};

	let rows = session.update_only_fields(&person, Person::FIRST_NAME, Person::LAST_NAME.eq("Page")).unwrap();
	assert_eq!(rows, 1);

	let page = &people(&session)[1];
	assert_eq!(page.first_name, "James");
	assert_eq!(page.age, 30);
}

#[test]
fn test_update_add_everyone() {
	let session = session();
	assert_eq!(ages(&session), vec![20, 30, 40]);

	let rows = session.update_add(&Patch::new().set(Person::AGE, 5), ()).unwrap();
	assert_eq!(rows, 3);
	assert_eq!(ages(&session), vec![25, 35, 45]);
}

#[test]
fn test_update_add_with_query() {
	let session = session();
	let query = Query::of::<Person>().filter(Person::AGE.ge(30));

	let rows = session.update_add(&Patch::new().set(Person::AGE, -1), query).unwrap();
	assert_eq!(rows, 2);
	assert_eq!(ages(&session), vec![20, 29, 39]);
}

#[test]
fn test_update_non_defaults() {
	let session = session();
	let person = Person {
		age: 50,
		..Default::default()
	};

	let rows = session.update_non_defaults(&person, Person::LAST_NAME.is_in(["Page", "Clapton"])).unwrap();
	assert_eq!(rows, 2);
	assert_eq!(ages(&session), vec![20, 50, 50]);
	assert_eq!(people(&session)[1].first_name, "Jimmy");
}

#[test]
fn test_update_whole_record() {
	let session = session();
	let person = Person {
		id: 1,
		first_name: "Jimi".to_string(),
		last_name: "Hendrix".to_string(),
		age: 27,
	};

	let rows = session.update(&person, Person::ID.eq(1)).unwrap();
	assert_eq!(rows, 1);
	assert_eq!(people(&session)[0], person);
}

#[test]
fn test_unconstrained_update_touches_every_row() {
	let session = session();
	let rows = session.update_only(&Patch::new().set(Person::LAST_NAME, "Smith"), ()).unwrap();
	assert_eq!(rows, 3);
	assert!(people(&session).iter().all(|person| person.last_name == "Smith"));
}

#[test]
fn test_insert_only_keeps_defaults() {
	let session = session();

	let executed = session.insert_only(&Patch::new().set(Person::FIRST_NAME, "Amy")).unwrap();
	assert_eq!(executed.rows_affected, 1);
	assert_eq!(executed.last_insert_id, Some(4));

	let amy = &people(&session)[3];
	assert_eq!(
		amy,
		&Person {
			id: 4,
			first_name: "Amy".to_string(),
			last_name: String::new(),
			age: 0,
		}
	);
}

#[test]
fn test_insert_only_fields() {
	let session = session();
	let person = Person {
		id: 42,
		first_name: "Amy".to_string(),
		last_name: "Winehouse".to_string(),
		age: 27,
	};

	let executed =
		session.insert_only_fields(&person, Projection::of(Person::FIRST_NAME).and(Person::LAST_NAME)).unwrap();
	assert_eq!(executed.last_insert_id, Some(4));

	let amy = &people(&session)[3];
	assert_eq!(amy.last_name, "Winehouse");
	assert_eq!(amy.age, 0);
}

#[test]
fn test_delete_with_expression() {
	let session = session();
	let rows = session.delete::<Person>(Person::AGE.between(25, 35)).unwrap();
	assert_eq!(rows, 1);
	assert_eq!(ages(&session), vec![20, 40]);
}

#[test]
fn test_unconstrained_delete() {
	let session = session();
	let rows = session.delete::<Person>(()).unwrap();
	assert_eq!(rows, 3);
	assert!(people(&session).is_empty());
}

#[test]
fn test_delete_non_defaults() {
	let session = session();
	let rows = session.delete_non_defaults(&Patch::new().set(Person::LAST_NAME, "Page").set(Person::AGE, 30)).unwrap();
	assert_eq!(rows, 1);
	assert_eq!(ages(&session), vec![20, 40]);
}

#[test]
fn test_untyped_columns() {
	let session = session();
	let rows = session.delete::<Person>(col("first_name").like(lit("Jim%"))).unwrap();
	assert_eq!(rows, 2);
}

#[test]
fn test_nullable_and_boolean_columns() {
	let session = session();
	session.insert_only(&Patch::new().set(Order::PAID, true)).unwrap();
	session.insert_only(&Patch::new().set(Order::NICKNAME, Some("rush".to_string()))).unwrap();

	let rows = session.update_only(&Patch::new().set(Order::NICKNAME, Some("paid".to_string())), Order::PAID.expr()).unwrap();
	assert_eq!(rows, 1);

	let rows = session.delete::<Order>(Order::NICKNAME.is_null()).unwrap();
	assert_eq!(rows, 0);

	let rows = session.delete::<Order>(!Order::PAID.expr()).unwrap();
	assert_eq!(rows, 1);
}

#[test]
fn test_assign_null() {
	let session = session();
	session.insert_only(&Patch::new().set(Order::NICKNAME, Some("rush".to_string()))).unwrap();

	let rows = session.update_only(&Patch::new().set(Order::NICKNAME, None::<String>), ()).unwrap();
	assert_eq!(rows, 1);
	assert_eq!(session.delete::<Order>(Order::NICKNAME.eq(None::<String>)).unwrap(), 1);
}

#[test]
fn test_preview_matches_execution() {
	let session = session();
	let statement = plan::update_add(&Patch::new().set(Person::AGE, 1), Person::LAST_NAME.ne("Page")).unwrap();

	let rendered = session.preview(&statement).unwrap();
	assert_eq!(rendered.sql, r#"UPDATE "person" SET "age" = "age" + ?1 WHERE "last_name" <> ?2"#);
	assert_eq!(rendered.params, vec![Value::Int8(1), Value::utf8("Page")]);

	assert_eq!(session.execute(&statement).unwrap().rows_affected, 2);
}

#[test]
fn test_storage_error_is_reported() {
	let session = session();
	session.backend().with_connection(|conn| conn.execute_batch("DROP TABLE person")).unwrap();

	let err = session.update_add(&Patch::new().set(Person::AGE, 5), ()).unwrap_err();
	assert_eq!(err.code, "SQLITE_002");
	assert!(err.message.contains("no such table: person"));
	assert!(err.statement.is_some());

	// the connection is usable again
	assert_eq!(session.delete::<Order>(()).unwrap(), 0);
}
