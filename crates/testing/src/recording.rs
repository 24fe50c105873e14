// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::VecDeque, sync::Arc};

use parking_lot::Mutex;
use quill_sql::{Backend, Dialect, Executed, Rendered, Sqlite, UnitOfWork};
use quill_type::{Diagnostic, Error, Result};

/// What happened to a [`RecordingBackend`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
	Acquire,
	Execute(Rendered),
	Release,
}

/// A backend that runs nothing. It records every acquire, execute and
/// release, and answers executes with scripted results (default: zero rows).
#[derive(Clone)]
pub struct RecordingBackend {
	events: Arc<Mutex<Vec<Event>>>,
	responses: Arc<Mutex<VecDeque<Result<Executed>>>>,
	dialect: Arc<dyn Dialect>,
}

impl RecordingBackend {
	pub fn new() -> Self {
		Self::with_dialect(Sqlite)
	}

	pub fn with_dialect(dialect: impl Dialect + 'static) -> Self {
		Self {
			events: Arc::new(Mutex::new(Vec::new())),
			responses: Arc::new(Mutex::new(VecDeque::new())),
			dialect: Arc::new(dialect),
		}
	}

	/// Queues the result of the next execute.
	pub fn respond(&self, result: Result<Executed>) {
		self.responses.lock().push_back(result);
	}

	pub fn respond_rows(&self, rows_affected: u64) {
		self.respond(Ok(Executed {
			rows_affected,
			last_insert_id: None,
		}));
	}

	/// Queues a storage failure carrying `message`.
	pub fn fail_with(&self, message: &str) {
		self.respond(Err(Error(Diagnostic {
			code: "STORAGE_TEST".to_string(),
			statement: None,
			message: message.to_string(),
			column: None,
			label: None,
			help: None,
			notes: vec![],
			cause: None,
		})));
	}

	pub fn events(&self) -> Vec<Event> {
		self.events.lock().clone()
	}

	pub fn executed(&self) -> Vec<Rendered> {
		self.events()
			.into_iter()
			.filter_map(|event| match event {
				Event::Execute(rendered) => Some(rendered),
				_ => None,
			})
			.collect()
	}

	/// Whether every acquired unit was released.
	pub fn is_balanced(&self) -> bool {
		let events = self.events.lock();
		let acquired = events.iter().filter(|event| **event == Event::Acquire).count();
		let released = events.iter().filter(|event| **event == Event::Release).count();
		acquired == released
	}
}

impl Default for RecordingBackend {
	fn default() -> Self {
		Self::new()
	}
}

impl Backend for RecordingBackend {
	type Unit<'a> = RecordingUnit<'a>;

	fn dialect(&self) -> &dyn Dialect {
		self.dialect.as_ref()
	}

	fn acquire(&self) -> Result<RecordingUnit<'_>> {
		self.events.lock().push(Event::Acquire);
		Ok(RecordingUnit {
			backend: self,
		})
	}
}

pub struct RecordingUnit<'a> {
	backend: &'a RecordingBackend,
}

impl UnitOfWork for RecordingUnit<'_> {
	fn execute(&mut self, statement: &Rendered) -> Result<Executed> {
		self.backend.events.lock().push(Event::Execute(statement.clone()));
		self.backend.responses.lock().pop_front().unwrap_or_else(|| Ok(Executed::default()))
	}
}

impl Drop for RecordingUnit<'_> {
	fn drop(&mut self) {
		self.backend.events.lock().push(Event::Release);
	}
}
