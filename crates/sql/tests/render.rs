// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_core::{
	Expr, Field, FieldDef, FieldSelection, FieldValueMap, Fields, Filter, MutationStatement, Patch, Record,
	RecordShape, Selector, StatementKind, Value, compile, select,
};
use quill_sql::{Postgres, Sqlite, render};

#[derive(Debug, Default)]
struct Person {
	id: i64,
	first_name: String,
	last_name: String,
	age: i64,
}

impl Record for Person {
	fn describe() -> RecordShape {
		RecordShape::new("Person", "person")
			.with_field(FieldDef::of::<i64>("id"))
			.with_field(FieldDef::of::<String>("first_name"))
			.with_field(FieldDef::of::<String>("last_name"))
			.with_field(FieldDef::of::<i64>("age"))
	}

	fn values(&self) -> Vec<Value> {
		vec![
			Value::Int8(self.id),
			Value::Utf8(self.first_name.clone()),
			Value::Utf8(self.last_name.clone()),
			Value::Int8(self.age),
		]
	}
}

impl Person {
	const FIRST_NAME: Field<Person, String> = Field::new("first_name");
	const LAST_NAME: Field<Person, String> = Field::new("last_name");
	const AGE: Field<Person, i64> = Field::new("age");
}

#[derive(Debug, Default)]
struct Order {
	nickname: Option<String>,
	paid: bool,
}

impl Record for Order {
	fn describe() -> RecordShape {
		RecordShape::new("Order", "orders")
			.with_field(FieldDef::of::<Option<String>>("nickname"))
			.with_field(FieldDef::of::<bool>("paid"))
	}

	fn values(&self) -> Vec<Value> {
		vec![self.nickname.clone().map(Value::Utf8).unwrap_or(Value::Undefined), Value::Boolean(self.paid)]
	}
}

impl Order {
	const NICKNAME: Field<Order, Option<String>> = Field::new("nickname");
	const PAID: Field<Order, bool> = Field::new("paid");
}

fn delete<R: Record>(filter: impl Into<Filter>) -> MutationStatement {
	let predicate = filter.into().normalize(R::shape()).unwrap();
	compile(StatementKind::Delete, FieldSelection::empty(R::shape()), FieldValueMap::empty(), predicate).unwrap()
}

fn hendrix_update() -> MutationStatement {
	let person = Person {
		first_name: "JJ".to_string(),
		..Default::default()
	};
	let fields: Fields<Person> = Person::FIRST_NAME.into();
	let selection = select(Selector::Only(&fields)).unwrap();
	let values = FieldValueMap::from_record(&selection, &person).unwrap();
	let predicate = Filter::from(Person::LAST_NAME.eq("Hendrix")).normalize(Person::shape()).unwrap();
	compile(StatementKind::UpdateOnly, selection, values, predicate).unwrap()
}

fn where_clause(expr: Expr) -> String {
	let rendered = render(&delete::<Person>(expr), &Sqlite).unwrap();
	rendered.sql.trim_start_matches("DELETE FROM \"person\" WHERE ").to_string()
}

#[test]
fn test_update_only_sqlite() {
	let rendered = render(&hendrix_update(), &Sqlite).unwrap();
	assert_eq!(rendered.kind, StatementKind::UpdateOnly);
	assert_eq!(rendered.sql, r#"UPDATE "person" SET "first_name" = ?1 WHERE "last_name" = ?2"#);
	assert_eq!(rendered.params, vec![Value::utf8("JJ"), Value::utf8("Hendrix")]);
}

#[test]
fn test_update_only_postgres() {
	let rendered = render(&hendrix_update(), &Postgres).unwrap();
	assert_eq!(rendered.sql, r#"UPDATE "person" SET "first_name" = $1 WHERE "last_name" = $2"#);
}

#[test]
fn test_update_add_without_predicate() {
	let patch = Patch::new().set(Person::AGE, 5);
	let selection = select(Selector::Sparse(&patch)).unwrap();
	let values = FieldValueMap::increments(&selection, &patch).unwrap();
	let statement = compile(StatementKind::UpdateAdd, selection, values, None).unwrap();

	let rendered = render(&statement, &Sqlite).unwrap();
	assert_eq!(rendered.sql, r#"UPDATE "person" SET "age" = "age" + ?1"#);
	assert_eq!(rendered.params, vec![Value::Int8(5)]);
}

#[test]
fn test_insert() {
	let patch = Patch::new().set(Person::FIRST_NAME, "Amy").set(Person::AGE, 31);
	let selection = select(Selector::Sparse(&patch)).unwrap();
	let values = FieldValueMap::from_patch(&selection, &patch).unwrap();
	let statement = compile(StatementKind::Insert, selection, values, None).unwrap();

	let rendered = render(&statement, &Sqlite).unwrap();
	assert_eq!(rendered.sql, r#"INSERT INTO "person" ("first_name", "age") VALUES (?1, ?2)"#);
	let rendered = render(&statement, &Postgres).unwrap();
	assert_eq!(rendered.sql, r#"INSERT INTO "person" ("first_name", "age") VALUES ($1, $2)"#);
}

#[test]
fn test_delete_all_rows() {
	let rendered = render(&delete::<Person>(()), &Sqlite).unwrap();
	assert_eq!(rendered.sql, r#"DELETE FROM "person""#);
	assert!(rendered.params.is_empty());
}

#[test]
fn test_precedence() {
	let either = Person::AGE.gt(60).or(Person::AGE.lt(18));
	assert_eq!(where_clause(either.clone().and(Person::LAST_NAME.eq("x"))), r#"("age" > ?1 OR "age" < ?2) AND "last_name" = ?3"#);
	assert_eq!(
		where_clause(Person::LAST_NAME.eq("x").or(Person::AGE.gt(1).and(Person::AGE.lt(9)))),
		r#""last_name" = ?1 OR "age" > ?2 AND "age" < ?3"#
	);
	assert_eq!(
		where_clause(!(Person::AGE.gt(1).and(Person::AGE.lt(9)))),
		r#"NOT ("age" > ?1 AND "age" < ?2)"#
	);
	assert_eq!(where_clause(!either), r#"NOT ("age" > ?1 OR "age" < ?2)"#);
}

#[test]
fn test_in_list() {
	assert_eq!(where_clause(Person::AGE.is_in([20, 30])), r#""age" IN (?1, ?2)"#);
	assert_eq!(where_clause(Person::AGE.is_in(Vec::<i64>::new())), "1 = 0");
	assert_eq!(where_clause(!Person::AGE.is_in(Vec::<i64>::new())), "1 = 1");
}

#[test]
fn test_between_and_like() {
	assert_eq!(where_clause(Person::AGE.between(20, 30)), r#""age" BETWEEN ?1 AND ?2"#);
	assert_eq!(where_clause(!Person::FIRST_NAME.like("J%")), r#""first_name" NOT LIKE ?1"#);
}

#[test]
fn test_ilike() {
	let statement = delete::<Person>(Person::FIRST_NAME.ilike("j%"));
	let err = render(&statement, &Sqlite).unwrap_err();
	assert_eq!(err.code, "DIALECT_001");
	assert_eq!(err.message, "sqlite does not support ILIKE");

	let rendered = render(&statement, &Postgres).unwrap();
	assert_eq!(rendered.sql, r#"DELETE FROM "person" WHERE "first_name" ILIKE $1"#);
}

#[test]
fn test_null_and_boolean_conditions() {
	let rendered = render(&delete::<Order>(Order::NICKNAME.eq(None::<String>)), &Sqlite).unwrap();
	assert_eq!(rendered.sql, r#"DELETE FROM "orders" WHERE "nickname" IS NULL"#);
	assert!(rendered.params.is_empty());

	let rendered = render(&delete::<Order>(Order::PAID.expr()), &Sqlite).unwrap();
	assert_eq!(rendered.sql, r#"DELETE FROM "orders" WHERE "paid""#);
}

#[test]
fn test_predicate_params_follow_assignments() {
	let person = Person {
		first_name: "Jimi".to_string(),
		age: 27,
		..Default::default()
	};
	let fields: Fields<Person> = ["age", "first_name"].into();
	let selection = select(Selector::Only(&fields)).unwrap();
	let values = FieldValueMap::from_record(&selection, &person).unwrap();
	let predicate =
		Filter::from(Person::LAST_NAME.is_in(["Hendrix", "Page"])).normalize(Person::shape()).unwrap();
	let statement = compile(StatementKind::UpdateOnly, selection, values, predicate).unwrap();

	let rendered = render(&statement, &Postgres).unwrap();
	assert_eq!(rendered.sql, r#"UPDATE "person" SET "age" = $1, "first_name" = $2 WHERE "last_name" IN ($3, $4)"#);
	assert_eq!(
		rendered.params,
		vec![Value::Int8(27), Value::utf8("Jimi"), Value::utf8("Hendrix"), Value::utf8("Page")]
	);
}
