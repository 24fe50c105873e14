// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;
use quill_type::{Result, Value, return_internal_error};
use tracing::instrument;

use crate::{FieldSelection, MutationError, Patch, Record};

/// How the values of a [`FieldValueMap`] are applied to their columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueMode {
	/// `column = value`
	Assign,
	/// `column = column + value`
	Increment,
}

impl Display for ValueMode {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			ValueMode::Assign => f.write_str("assigned"),
			ValueMode::Increment => f.write_str("increment"),
		}
	}
}

/// New values of the selected fields, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldValueMap {
	mode: ValueMode,
	values: IndexMap<&'static str, Value>,
}

impl FieldValueMap {
	pub fn empty() -> Self {
		Self::with_mode(ValueMode::Assign)
	}

	pub fn with_mode(mode: ValueMode) -> Self {
		Self {
			mode,
			values: IndexMap::new(),
		}
	}

	/// The current value of every selected field of `record`.
	#[instrument(name = "extract::record", level = "trace", skip_all, fields(fields = selection.len()))]
	pub fn from_record<R: Record>(selection: &FieldSelection, record: &R) -> Result<Self> {
		check_shape::<R>(selection)?;

		let values = record.values();
		if values.len() != R::shape().len() {
			return_internal_error!(
				"record '{}' produced {} values for {} fields",
				R::shape().name(),
				values.len(),
				R::shape().len()
			);
		}

		let mut result = Self::empty();
		for (&position, field) in selection.positions().iter().zip(selection.fields()) {
			result.insert(field.name(), values[position].clone());
		}
		Ok(result)
	}

	/// The values a patch sets for the selected fields. Selected fields the
	/// patch does not mention are left out.
	#[instrument(name = "extract::patch", level = "trace", skip_all, fields(fields = selection.len()))]
	pub fn from_patch<R: Record>(selection: &FieldSelection, patch: &Patch<R>) -> Result<Self> {
		check_shape::<R>(selection)?;

		let mut result = Self::empty();
		for name in selection.names() {
			if let Some(value) = patch.get(name) {
				result.insert(name, value.clone());
			}
		}
		Ok(result)
	}

	/// Reads the values of a patch as deltas. Every selected field and every
	/// delta must be numeric.
	#[instrument(name = "extract::increments", level = "trace", skip_all, fields(fields = selection.len()))]
	pub fn increments<R: Record>(selection: &FieldSelection, patch: &Patch<R>) -> Result<Self> {
		check_shape::<R>(selection)?;

		let shape = selection.shape();
		let mut result = Self::with_mode(ValueMode::Increment);
		for field in selection.fields() {
			if !field.is_numeric() {
				return Err(MutationError::NonNumericIncrement {
					record: shape.name().to_string(),
					field: field.name().to_string(),
					r#type: field.get_type(),
				}
				.into());
			}

			let Some(delta) = patch.get(field.name()) else {
				continue;
			};

			if !delta.get_type().is_number() {
				return Err(MutationError::NonNumericIncrement {
					record: shape.name().to_string(),
					field: field.name().to_string(),
					r#type: delta.get_type(),
				}
				.into());
			}

			result.insert(field.name(), delta.clone());
		}
		Ok(result)
	}

	/// Inserts or replaces the value of `name`.
	pub fn insert(&mut self, name: &'static str, value: Value) {
		self.values.insert(name, value);
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.values.get(name)
	}

	pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
		self.values.iter().map(|(name, value)| (*name, value))
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.values.keys().copied()
	}

	pub fn mode(&self) -> ValueMode {
		self.mode
	}

	pub fn is_increment(&self) -> bool {
		self.mode == ValueMode::Increment
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

impl Default for FieldValueMap {
	fn default() -> Self {
		Self::empty()
	}
}

fn check_shape<R: Record>(selection: &FieldSelection) -> Result<()> {
	if !selection.shape().same(R::shape()) {
		return Err(MutationError::ShapeMismatch {
			expected: selection.shape().name().to_string(),
			actual: R::shape().name().to_string(),
		}
		.into());
	}
	Ok(())
}
