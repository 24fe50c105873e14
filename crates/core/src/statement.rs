// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use quill_type::{Result, Value};
use tracing::{debug, instrument};

use crate::{FieldDef, FieldSelection, FieldValueMap, MutationError, Predicate, RecordShape, ValueMode};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
	Insert,
	UpdateOnly,
	UpdateAdd,
	UpdateNonDefault,
	Delete,
}

impl StatementKind {
	pub fn is_update(&self) -> bool {
		matches!(self, StatementKind::UpdateOnly | StatementKind::UpdateAdd | StatementKind::UpdateNonDefault)
	}
}

impl Display for StatementKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			StatementKind::Insert => f.write_str("INSERT"),
			StatementKind::UpdateOnly => f.write_str("UPDATE ONLY"),
			StatementKind::UpdateAdd => f.write_str("UPDATE ADD"),
			StatementKind::UpdateNonDefault => f.write_str("UPDATE NON DEFAULTS"),
			StatementKind::Delete => f.write_str("DELETE"),
		}
	}
}

/// A checked, backend-agnostic insert, update or delete.
#[derive(Debug, Clone, PartialEq)]
pub struct MutationStatement {
	kind: StatementKind,
	selection: FieldSelection,
	values: FieldValueMap,
	predicate: Option<Predicate>,
}

impl MutationStatement {
	pub fn kind(&self) -> StatementKind {
		self.kind
	}

	pub fn shape(&self) -> &'static RecordShape {
		self.selection.shape()
	}

	pub fn selection(&self) -> &FieldSelection {
		&self.selection
	}

	pub fn values(&self) -> &FieldValueMap {
		&self.values
	}

	/// `None` matches every row.
	pub fn predicate(&self) -> Option<&Predicate> {
		self.predicate.as_ref()
	}

	pub fn is_increment(&self) -> bool {
		self.values.is_increment()
	}

	/// Columns and their values in selection order. Empty for deletes.
	pub fn assignments(&self) -> impl Iterator<Item = (&'static FieldDef, &Value)> + '_ {
		self.selection.fields().filter_map(|field| self.values.get(field.name()).map(|value| (field, value)))
	}
}

/// Combines selection, values and predicate into a statement of `kind`.
///
/// Deletes drop selection and values. For every other kind the statement
/// must end up with at least one assignment; selected fields without a value
/// are skipped.
#[instrument(name = "statement::compile", level = "debug", skip_all, fields(kind = %kind, record = selection.shape().name()))]
pub fn compile(
	kind: StatementKind,
	selection: FieldSelection,
	values: FieldValueMap,
	predicate: Option<Predicate>,
) -> Result<MutationStatement> {
	let shape = selection.shape();

	if let Some(predicate) = &predicate {
		if !predicate.shape().same(shape) {
			return Err(MutationError::ShapeMismatch {
				expected: shape.name().to_string(),
				actual: predicate.shape().name().to_string(),
			}
			.into());
		}
	}

	if kind == StatementKind::Delete {
		debug!(constrained = predicate.is_some(), "compiled delete");
		return Ok(MutationStatement {
			kind,
			selection: FieldSelection::empty(shape),
			values: FieldValueMap::empty(),
			predicate,
		});
	}

	if kind == StatementKind::Insert && predicate.is_some() {
		return Err(MutationError::InsertWithPredicate {
			record: shape.name().to_string(),
		}
		.into());
	}

	let expected = if kind == StatementKind::UpdateAdd {
		ValueMode::Increment
	} else {
		ValueMode::Assign
	};
	if values.mode() != expected {
		return Err(MutationError::ValueModeMismatch {
			kind,
			mode: values.mode(),
		}
		.into());
	}

	if let Some(name) = values.names().find(|name| !selection.contains(name)) {
		return Err(MutationError::UnselectedValue {
			record: shape.name().to_string(),
			field: name.to_string(),
		}
		.into());
	}

	if kind == StatementKind::UpdateAdd {
		if let Some(field) = selection.fields().find(|field| !field.is_numeric()) {
			return Err(MutationError::NonNumericIncrement {
				record: shape.name().to_string(),
				field: field.name().to_string(),
				r#type: field.get_type(),
			}
			.into());
		}
	}

	let statement = MutationStatement {
		kind,
		selection,
		values,
		predicate,
	};

	let assignments = statement.assignments().count();
	if assignments == 0 {
		return Err(MutationError::EmptySelection {
			record: shape.name().to_string(),
			kind,
		}
		.into());
	}

	debug!(assignments, constrained = statement.predicate.is_some(), "compiled statement");
	Ok(statement)
}
