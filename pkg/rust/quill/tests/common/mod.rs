// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use quill::{Record, Session, SqliteBackend};

#[derive(Record, Debug, Clone, Default, PartialEq)]
pub struct Person {
	pub id: i64,
	pub first_name: String,
	pub last_name: String,
	pub age: i64,
}

#[derive(Record, Debug, Clone, Default, PartialEq)]
#[quill(table = "orders")]
pub struct Order {
	pub id: i64,
	pub nickname: Option<String>,
	pub paid: bool,
}

/// An in-memory database holding Hendrix (20), Page (30) and Clapton (40).
pub fn session() -> Session<SqliteBackend> {
	quill_testing::init_tracing();

	let session = Session::in_memory().unwrap();
	session
		.backend()
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
				INSERT INTO person (first_name, last_name, age) VALUES ('Eric', 'Clapton', 40);
				CREATE TABLE orders (
					id INTEGER PRIMARY KEY AUTOINCREMENT,
					nickname TEXT,
					paid INTEGER NOT NULL DEFAULT 0
				);",
			)
		})
		.unwrap();
	session
}

pub fn people(session: &Session<SqliteBackend>) -> Vec<Person> {
	session
		.backend()
		.with_connection(|conn| {
			let mut stmt = conn.prepare("SELECT id, first_name, last_name, age FROM person ORDER BY id")?;
			let rows = stmt.query_map([], |row| {
				Ok(Person {
					id: row.get(0)?,
					first_name: row.get(1)?,
					last_name: row.get(2)?,
					age: row.get(3)?,
				})
			})?;
			rows.collect()
		})
		.unwrap()
}

pub fn ages(session: &Session<SqliteBackend>) -> Vec<i64> {
	people(session).into_iter().map(|person| person.age).collect()
}
