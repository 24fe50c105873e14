// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Selective inserts, updates and deletes over typed records.
//!
//! ```ignore
//! use quill::{Patch, Record, Session};
//!
//! #[derive(Record, Default)]
//! struct Person {
//!     id: i64,
//!     first_name: String,
//!     last_name: String,
//!     age: i64,
//! }
//!
//! let session = Session::in_memory()?;
//! session.update_only(&Patch::new().set(Person::FIRST_NAME, "JJ"), Person::LAST_NAME.eq("Hendrix"))?;
//! session.update_add(&Patch::new().set(Person::AGE, 5), ())?;
//! ```

pub mod plan;
mod session;

pub use quill_core as core;
pub use quill_core::{
	ColumnRef, CompareOp, Expr, Field, FieldDef, FieldRef, FieldSelection, FieldValueMap, Fields, Filter,
	MutationStatement, Patch, Predicate, Projection, Query, Record, RecordShape, StatementKind, ValueMode, col, lit,
	shape_of,
};
pub use quill_derive::Record;
pub use quill_sql as sql;
pub use quill_sql::{Backend, Dialect, Executed, Postgres, Rendered, Sqlite, UnitOfWork};
pub use quill_sqlite::{DbPath, JournalMode, SqliteBackend, SqliteConfig, SynchronousMode};
pub use quill_type::{Diagnostic, Error, GetType, IntoValue, Result, Type, Value};
pub use session::Session;
