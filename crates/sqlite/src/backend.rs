// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ops::Deref, sync::Arc};

use parking_lot::{Mutex, MutexGuard};
use quill_sql::{Backend, Dialect, Executed, Rendered, Sqlite, StatementKind, UnitOfWork};
use quill_type::{Error, Result};
use rusqlite::{Connection, params_from_iter};
use tracing::{error, instrument, trace};

use crate::{SqliteConfig, SqliteError, connection::connect, value::SqlParam};

/// Executes mutation statements against one SQLite connection.
#[derive(Clone)]
pub struct SqliteBackend(Arc<SqliteBackendInner>);

pub struct SqliteBackendInner {
	conn: Mutex<Connection>,
	config: SqliteConfig,
}

impl Deref for SqliteBackend {
	type Target = SqliteBackendInner;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl SqliteBackend {
	#[instrument(name = "sqlite::backend::new", level = "info", skip(config), fields(
		db_path = ?config.path,
		journal_mode = %config.journal_mode.as_str()
	))]
	pub fn new(config: SqliteConfig) -> Result<Self> {
		let conn = connect(&config)?;
		Ok(Self(Arc::new(SqliteBackendInner {
			conn: Mutex::new(conn),
			config,
		})))
	}

	pub fn in_memory() -> Result<Self> {
		Self::new(SqliteConfig::in_memory())
	}

	/// Runs `f` on the underlying connection, e.g. to create or inspect
	/// fixture tables.
	pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
		let conn = self.conn.lock();
		f(&conn).map_err(|err| Error::from(SqliteError::from(err)))
	}
}

impl SqliteBackendInner {
	pub fn config(&self) -> &SqliteConfig {
		&self.config
	}
}

impl Backend for SqliteBackend {
	type Unit<'a> = SqliteUnit<'a>;

	fn dialect(&self) -> &dyn Dialect {
		&Sqlite
	}

	fn acquire(&self) -> Result<SqliteUnit<'_>> {
		let conn = self.conn.lock();
		trace!("acquired unit of work");
		Ok(SqliteUnit {
			conn,
			used: false,
		})
	}
}

/// Holds the connection lock for one statement; releases it on drop.
pub struct SqliteUnit<'a> {
	conn: MutexGuard<'a, Connection>,
	used: bool,
}

impl UnitOfWork for SqliteUnit<'_> {
	#[instrument(name = "sqlite::unit::execute", level = "debug", skip_all, fields(kind = %statement.kind))]
	fn execute(&mut self, statement: &Rendered) -> Result<Executed> {
		if self.used {
			return Err(SqliteError::UnitReused.into());
		}
		self.used = true;

		let rows = self
			.conn
			.prepare(&statement.sql)
			.and_then(|mut prepared| prepared.execute(params_from_iter(statement.params.iter().map(SqlParam))))
			.map_err(|err| {
				error!(sql = %statement.sql, error = %err, "statement failed");
				Error::from(SqliteError::from(err)).with_statement(statement.sql.clone())
			})?;

		let last_insert_id = match statement.kind {
			StatementKind::Insert => Some(self.conn.last_insert_rowid()),
			_ => None,
		};

		trace!(rows, "statement executed");
		Ok(Executed {
			rows_affected: rows as u64,
			last_insert_id,
		})
	}
}

impl Drop for SqliteUnit<'_> {
	fn drop(&mut self) {
		trace!(used = self.used, "released unit of work");
	}
}
