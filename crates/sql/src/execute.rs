// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::Result;

use crate::{Dialect, Rendered};

/// Outcome of one executed statement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Executed {
	pub rows_affected: u64,
	/// Row id of the inserted row, when the backend reports one.
	pub last_insert_id: Option<i64>,
}

/// A scoped execution resource used for exactly one statement.
///
/// The resource is released when the unit is dropped.
pub trait UnitOfWork {
	fn execute(&mut self, statement: &Rendered) -> Result<Executed>;
}

/// Something that runs rendered statements.
pub trait Backend {
	type Unit<'a>: UnitOfWork
	where
		Self: 'a;

	fn dialect(&self) -> &dyn Dialect;

	fn acquire(&self) -> Result<Self::Unit<'_>>;
}
