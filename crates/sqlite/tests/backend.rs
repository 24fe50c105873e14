// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_sql::{Backend, Rendered, StatementKind, UnitOfWork};
use quill_sqlite::{SqliteBackend, SqliteConfig};
use quill_testing::temp_dir;
use quill_type::Value;

fn backend() -> SqliteBackend {
	let backend = SqliteBackend::in_memory().unwrap();
	backend
		.with_connection(|conn| {
			conn.execute_batch(
				"CREATE TABLE person (
					id INTEGER PRIMARY KEY AUTOINCREMENT,
					first_name TEXT NOT NULL DEFAULT '',
					last_name TEXT NOT NULL DEFAULT '',
					age INTEGER NOT NULL DEFAULT 0
				);
				INSERT INTO person (first_name, last_name, age) VALUES ('Jimi', 'Hendrix', 20);
				INSERT INTO person (first_name, last_name, age) VALUES ('Jimmy', 'Page', 30);
				INSERT INTO person (first_name, last_name, age) VALUES ('Eric', 'Clapton', 40);",
			)
		})
		.unwrap();
	backend
}

fn rendered(kind: StatementKind, sql: &str, params: Vec<Value>) -> Rendered {
	Rendered {
		kind,
		sql: sql.to_string(),
		params,
	}
}

fn ages(backend: &SqliteBackend) -> Vec<i64> {
	backend
		.with_connection(|conn| {
			let mut stmt = conn.prepare("SELECT age FROM person ORDER BY id")?;
			let rows = stmt.query_map([], |row| row.get(0))?;
			rows.collect()
		})
		.unwrap()
}

#[test]
fn test_update_reports_rows_affected() {
	let backend = backend();
	let mut unit = backend.acquire().unwrap();
	let executed = unit
		.execute(&rendered(StatementKind::UpdateAdd, r#"UPDATE "person" SET "age" = "age" + ?1"#, vec![Value::Int8(5)]))
		.unwrap();
	drop(unit);

	assert_eq!(executed.rows_affected, 3);
	assert_eq!(executed.last_insert_id, None);
	assert_eq!(ages(&backend), vec![25, 35, 45]);
}

#[test]
fn test_insert_reports_row_id() {
	let backend = backend();
	let mut unit = backend.acquire().unwrap();
	let executed = unit
		.execute(&rendered(
			StatementKind::Insert,
			r#"INSERT INTO "person" ("first_name") VALUES (?1)"#,
			vec![Value::utf8("Amy")],
		))
		.unwrap();
	drop(unit);

	assert_eq!(executed.rows_affected, 1);
	assert_eq!(executed.last_insert_id, Some(4));
}

#[test]
fn test_unit_refuses_second_statement() {
	let backend = backend();
	let mut unit = backend.acquire().unwrap();
	let delete = rendered(StatementKind::Delete, r#"DELETE FROM "person" WHERE "age" > ?1"#, vec![Value::Int8(35)]);
	assert_eq!(unit.execute(&delete).unwrap().rows_affected, 1);

	let err = unit.execute(&delete).unwrap_err();
	assert_eq!(err.code, "SQLITE_003");
}

#[test]
fn test_failure_carries_driver_message_and_releases() {
	let backend = backend();
	{
		let mut unit = backend.acquire().unwrap();
		let err = unit
			.execute(&rendered(StatementKind::UpdateOnly, r#"UPDATE "nobody" SET "x" = ?1"#, vec![Value::Int8(1)]))
			.unwrap_err();
		assert_eq!(err.code, "SQLITE_002");
		assert!(err.message.contains("no such table: nobody"));
		assert_eq!(err.statement.as_deref(), Some(r#"UPDATE "nobody" SET "x" = ?1"#));
	}

	// the connection lock was released with the failed unit
	let mut unit = backend.acquire().unwrap();
	let executed = unit.execute(&rendered(StatementKind::Delete, r#"DELETE FROM "person""#, vec![])).unwrap();
	assert_eq!(executed.rows_affected, 3);
}

#[test]
fn test_null_binding() {
	let backend = SqliteBackend::in_memory().unwrap();
	backend.with_connection(|conn| conn.execute_batch("CREATE TABLE orders (nickname TEXT)")).unwrap();

	let mut unit = backend.acquire().unwrap();
	unit.execute(&rendered(StatementKind::Insert, r#"INSERT INTO "orders" ("nickname") VALUES (?1)"#, vec![Value::Undefined]))
		.unwrap();
	drop(unit);

	let nulls: i64 = backend
		.with_connection(|conn| conn.query_row("SELECT COUNT(*) FROM orders WHERE nickname IS NULL", [], |row| row.get(0)))
		.unwrap();
	assert_eq!(nulls, 1);
}

#[test]
fn test_file_backend_persists() {
	temp_dir(|path| {
		let config = SqliteConfig::fast(path.join("people.db"));
		{
			let backend = SqliteBackend::new(config.clone()).unwrap();
			backend.with_connection(|conn| conn.execute_batch("CREATE TABLE person (age INTEGER)")).unwrap();
			let mut unit = backend.acquire().unwrap();
			unit.execute(&rendered(StatementKind::Insert, r#"INSERT INTO "person" ("age") VALUES (?1)"#, vec![Value::Int8(27)]))
				.unwrap();
		}

		let backend = SqliteBackend::new(config).unwrap();
		assert_eq!(backend.config().journal_mode.as_str(), "WAL");
		let age: i64 = backend.with_connection(|conn| conn.query_row("SELECT age FROM person", [], |row| row.get(0))).unwrap();
		assert_eq!(age, 27);
		Ok(())
	})
	.expect("test failed");
}
