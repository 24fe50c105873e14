// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Building blocks of a selective mutation.
//!
//! A mutation is assembled from a [`FieldSelection`] (which columns take
//! part), a [`FieldValueMap`] (what they are set or incremented to) and an
//! optional [`Predicate`] (which rows are touched). [`compile`] checks the
//! combination and produces a [`MutationStatement`] that a SQL renderer can
//! turn into text.

pub mod error;
pub mod expr;
pub mod extract;
pub mod field;
pub mod filter;
pub mod patch;
pub mod predicate;
pub mod record;
pub mod select;
pub mod statement;

pub use error::{ExpressionError, MutationError};
pub use expr::{ColumnRef, CompareOp, Expr, col, lit};
pub use extract::{FieldValueMap, ValueMode};
pub use field::{Field, FieldRef, Projection};
pub use filter::{Filter, Query};
pub use patch::Patch;
pub use predicate::{Condition, Operand, Predicate};
pub use quill_type::{Error, GetType, IntoValue, Result, Type, Value};
pub use record::{FieldDef, Record, RecordShape, shape_of};
pub use select::{FieldSelection, Fields, Selector, select};
pub use statement::{MutationStatement, StatementKind, compile};
