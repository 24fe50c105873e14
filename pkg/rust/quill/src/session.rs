// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_core::{Fields, Filter, MutationStatement, Patch, Record};
use quill_sql::{Backend, Executed, Rendered, UnitOfWork, render};
use quill_sqlite::{SqliteBackend, SqliteConfig};
use quill_type::Result;
use tracing::{debug, instrument};

use crate::plan;

/// Entry point for mutations against one backend.
///
/// Every operation plans its statement, renders it for the backend's dialect
/// and runs it in a freshly acquired unit of work. The unit is released
/// before the operation returns, whether it succeeded or not. Nothing reaches
/// the backend when planning or rendering fails.
pub struct Session<B: Backend> {
	backend: B,
}

impl<B: Backend> Session<B> {
	pub fn new(backend: B) -> Self {
		Self {
			backend,
		}
	}

	pub fn backend(&self) -> &B {
		&self.backend
	}

	/// Renders `statement` the way [`Session::execute`] would, without
	/// running it.
	pub fn preview(&self, statement: &MutationStatement) -> Result<Rendered> {
		render(statement, self.backend.dialect())
	}

	/// Runs an already planned statement.
	#[instrument(name = "session::execute", level = "debug", skip_all, fields(kind = %statement.kind(), record = statement.shape().name()))]
	pub fn execute(&self, statement: &MutationStatement) -> Result<Executed> {
		let rendered = self.preview(statement)?;

		let mut unit = self.backend.acquire()?;
		let executed = unit.execute(&rendered)?;

		debug!(rows_affected = executed.rows_affected, "executed");
		Ok(executed)
	}

	#[instrument(name = "session::update_only", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn update_only<R: Record>(&self, patch: &Patch<R>, filter: impl Into<Filter>) -> Result<u64> {
		let statement = plan::update_only(patch, filter)?;
		Ok(self.execute(&statement)?.rows_affected)
	}

	#[instrument(name = "session::update_only_fields", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn update_only_fields<R: Record>(
		&self,
		record: &R,
		fields: impl Into<Fields<R>>,
		filter: impl Into<Filter>,
	) -> Result<u64> {
		let statement = plan::update_only_fields(record, fields, filter)?;
		Ok(self.execute(&statement)?.rows_affected)
	}

	#[instrument(name = "session::update_add", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn update_add<R: Record>(&self, patch: &Patch<R>, filter: impl Into<Filter>) -> Result<u64> {
		let statement = plan::update_add(patch, filter)?;
		Ok(self.execute(&statement)?.rows_affected)
	}

	#[instrument(name = "session::update_non_defaults", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn update_non_defaults<R: Record>(&self, record: &R, filter: impl Into<Filter>) -> Result<u64> {
		let statement = plan::update_non_defaults(record, filter)?;
		Ok(self.execute(&statement)?.rows_affected)
	}

	#[instrument(name = "session::update", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn update<R: Record>(&self, record: &R, filter: impl Into<Filter>) -> Result<u64> {
		let statement = plan::update(record, filter)?;
		Ok(self.execute(&statement)?.rows_affected)
	}

	#[instrument(name = "session::insert_only", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn insert_only<R: Record>(&self, patch: &Patch<R>) -> Result<Executed> {
		let statement = plan::insert_only(patch)?;
		self.execute(&statement)
	}

	#[instrument(name = "session::insert_only_fields", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn insert_only_fields<R: Record>(&self, record: &R, fields: impl Into<Fields<R>>) -> Result<Executed> {
		let statement = plan::insert_only_fields(record, fields)?;
		self.execute(&statement)
	}

	#[instrument(name = "session::delete", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn delete<R: Record>(&self, filter: impl Into<Filter>) -> Result<u64> {
		let statement = plan::delete::<R>(filter)?;
		Ok(self.execute(&statement)?.rows_affected)
	}

	#[instrument(name = "session::delete_non_defaults", level = "debug", skip_all, fields(record = R::shape().name()))]
	pub fn delete_non_defaults<R: Record>(&self, patch: &Patch<R>) -> Result<u64> {
		let statement = plan::delete_non_defaults(patch)?;
		Ok(self.execute(&statement)?.rows_affected)
	}
}

impl Session<SqliteBackend> {
	pub fn sqlite(config: SqliteConfig) -> Result<Self> {
		Ok(Self::new(SqliteBackend::new(config)?))
	}

	pub fn in_memory() -> Result<Self> {
		Ok(Self::new(SqliteBackend::in_memory()?))
	}
}
