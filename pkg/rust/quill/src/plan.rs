// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Pure planners: each mutation as a fixed composition of field selection,
//! value extraction, predicate normalization and compilation.
//!
//! Nothing here touches a backend. [`crate::Session`] renders and executes
//! what these functions return.

use quill_core::{
	ColumnRef, CompareOp, Expr, FieldSelection, FieldValueMap, Fields, Filter, MutationError, MutationStatement,
	Patch, Record, Selector, StatementKind, compile, select,
};
use quill_type::Result;

/// Assigns the fields present in `patch` on every row matching `filter`.
pub fn update_only<R: Record>(patch: &Patch<R>, filter: impl Into<Filter>) -> Result<MutationStatement> {
	let selection = select::<R>(Selector::Sparse(patch))?;
	let values = FieldValueMap::from_patch(&selection, patch)?;
	let predicate = filter.into().normalize(R::shape())?;
	compile(StatementKind::UpdateOnly, selection, values, predicate)
}

/// Assigns the named fields of `record` on every row matching `filter`.
pub fn update_only_fields<R: Record>(
	record: &R,
	fields: impl Into<Fields<R>>,
	filter: impl Into<Filter>,
) -> Result<MutationStatement> {
	let fields = fields.into();
	let selection = select::<R>(Selector::Only(&fields))?;
	let values = FieldValueMap::from_record(&selection, record)?;
	let predicate = filter.into().normalize(R::shape())?;
	compile(StatementKind::UpdateOnly, selection, values, predicate)
}

/// Adds the deltas in `patch` to their columns on every row matching
/// `filter`.
pub fn update_add<R: Record>(patch: &Patch<R>, filter: impl Into<Filter>) -> Result<MutationStatement> {
	let selection = select::<R>(Selector::Sparse(patch))?;
	let values = FieldValueMap::increments(&selection, patch)?;
	let predicate = filter.into().normalize(R::shape())?;
	compile(StatementKind::UpdateAdd, selection, values, predicate)
}

/// Assigns every field of `record` that differs from its default.
pub fn update_non_defaults<R: Record>(record: &R, filter: impl Into<Filter>) -> Result<MutationStatement> {
	let sparse = Patch::non_defaults(record);
	let selection = select::<R>(Selector::Sparse(&sparse))?;
	let values = FieldValueMap::from_record(&selection, record)?;
	let predicate = filter.into().normalize(R::shape())?;
	compile(StatementKind::UpdateNonDefault, selection, values, predicate)
}

/// Assigns every field of `record`.
pub fn update<R: Record>(record: &R, filter: impl Into<Filter>) -> Result<MutationStatement> {
	let selection = select::<R>(Selector::All)?;
	let values = FieldValueMap::from_record(&selection, record)?;
	let predicate = filter.into().normalize(R::shape())?;
	compile(StatementKind::UpdateOnly, selection, values, predicate)
}

/// Inserts one row with the fields present in `patch`; the storage engine
/// fills in the rest.
pub fn insert_only<R: Record>(patch: &Patch<R>) -> Result<MutationStatement> {
	let selection = select::<R>(Selector::Sparse(patch))?;
	let values = FieldValueMap::from_patch(&selection, patch)?;
	compile(StatementKind::Insert, selection, values, None)
}

/// Inserts one row with the named fields of `record`.
pub fn insert_only_fields<R: Record>(record: &R, fields: impl Into<Fields<R>>) -> Result<MutationStatement> {
	let fields = fields.into();
	let selection = select::<R>(Selector::Only(&fields))?;
	let values = FieldValueMap::from_record(&selection, record)?;
	compile(StatementKind::Insert, selection, values, None)
}

/// Deletes every row matching `filter`. An empty filter deletes all rows.
pub fn delete<R: Record>(filter: impl Into<Filter>) -> Result<MutationStatement> {
	let predicate = filter.into().normalize(R::shape())?;
	compile(StatementKind::Delete, FieldSelection::empty(R::shape()), FieldValueMap::empty(), predicate)
}

/// Deletes the rows equal to `patch` on every field it sets. An undefined
/// value matches NULL.
pub fn delete_non_defaults<R: Record>(patch: &Patch<R>) -> Result<MutationStatement> {
	let shape = R::shape();
	FieldSelection::resolve(shape, patch.names())?;

	let conditions = patch.entries().iter().map(|(name, value)| {
		let column = Expr::Column(ColumnRef::of(shape, *name));
		if value.is_undefined() {
			column.is_null()
		} else {
			column.compare(CompareOp::Equal, Expr::Constant(value.clone()))
		}
	});

	let Some(expr) = Expr::all(conditions) else {
		return Err(MutationError::EmptySelection {
			record: shape.name().to_string(),
			kind: StatementKind::Delete,
		}
		.into());
	};

	delete::<R>(expr)
}
