// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Debug, Formatter};

use quill_type::Result;
use tracing::{instrument, trace};

use crate::{Field, FieldDef, MutationError, Patch, Projection, Record, RecordShape};

/// Ordered, duplicate-free subset of a record's fields.
///
/// Order is the order in which fields were named and determines the column
/// order of the rendered statement.
#[derive(Clone, PartialEq)]
pub struct FieldSelection {
	shape: &'static RecordShape,
	positions: Vec<usize>,
}

impl FieldSelection {
	pub fn empty(shape: &'static RecordShape) -> Self {
		Self {
			shape,
			positions: Vec::new(),
		}
	}

	/// Every field of `shape`, in declaration order.
	pub fn all(shape: &'static RecordShape) -> Self {
		Self {
			shape,
			positions: (0..shape.len()).collect(),
		}
	}

	/// Resolves `names` against `shape`. Repeated names keep their first
	/// position.
	pub fn resolve<'n>(shape: &'static RecordShape, names: impl IntoIterator<Item = &'n str>) -> Result<Self> {
		let mut positions = Vec::new();
		for name in names {
			let Some(position) = shape.position(name) else {
				return Err(MutationError::UnknownField {
					record: shape.name().to_string(),
					field: name.to_string(),
				}
				.into());
			};
			if positions.contains(&position) {
				trace!(field = name, "dropping duplicate field");
				continue;
			}
			positions.push(position);
		}

		Ok(Self {
			shape,
			positions,
		})
	}

	pub fn shape(&self) -> &'static RecordShape {
		self.shape
	}

	pub fn len(&self) -> usize {
		self.positions.len()
	}

	pub fn is_empty(&self) -> bool {
		self.positions.is_empty()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.fields().any(|field| field.name() == name)
	}

	pub fn fields(&self) -> impl Iterator<Item = &'static FieldDef> + '_ {
		let fields = self.shape.fields();
		self.positions.iter().map(move |&position| &fields[position])
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.fields().map(FieldDef::name)
	}

	/// Positions of the selected fields within the record shape.
	pub fn positions(&self) -> &[usize] {
		&self.positions
	}
}

impl Debug for FieldSelection {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldSelection")
			.field("record", &self.shape.name())
			.field("fields", &self.names().collect::<Vec<_>>())
			.finish()
	}
}

/// An explicit list of fields: plain names or typed field identifiers.
pub enum Fields<R> {
	Names(Vec<String>),
	Projection(Projection<R>),
}

impl<R> Fields<R> {
	pub fn names(&self) -> Vec<&str> {
		match self {
			Fields::Names(names) => names.iter().map(String::as_str).collect(),
			Fields::Projection(projection) => projection.names().collect(),
		}
	}
}

impl<R> Clone for Fields<R> {
	fn clone(&self) -> Self {
		match self {
			Fields::Names(names) => Fields::Names(names.clone()),
			Fields::Projection(projection) => Fields::Projection(projection.clone()),
		}
	}
}

impl<R> Debug for Fields<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}

impl<R> From<&[&str]> for Fields<R> {
	fn from(names: &[&str]) -> Self {
		Fields::Names(names.iter().map(|name| name.to_string()).collect())
	}
}

impl<R, const N: usize> From<[&str; N]> for Fields<R> {
	fn from(names: [&str; N]) -> Self {
		Fields::Names(names.iter().map(|name| name.to_string()).collect())
	}
}

impl<R> From<Vec<&str>> for Fields<R> {
	fn from(names: Vec<&str>) -> Self {
		Fields::Names(names.into_iter().map(str::to_string).collect())
	}
}

impl<R> From<Vec<String>> for Fields<R> {
	fn from(names: Vec<String>) -> Self {
		Fields::Names(names)
	}
}

impl<R> From<Projection<R>> for Fields<R> {
	fn from(projection: Projection<R>) -> Self {
		Fields::Projection(projection)
	}
}

impl<R, V> From<Field<R, V>> for Fields<R> {
	fn from(field: Field<R, V>) -> Self {
		Fields::Projection(Projection::of(field))
	}
}

/// Where the participating fields come from.
pub enum Selector<'a, R> {
	/// No selector given: the whole record.
	All,
	Only(&'a Fields<R>),
	/// The fields present in a sparse record.
	Sparse(&'a Patch<R>),
}

/// Resolves the fields of `R` that take part in a mutation.
#[instrument(name = "select::resolve", level = "trace", skip(selector), fields(record = R::shape().name()))]
pub fn select<R: Record>(selector: Selector<'_, R>) -> Result<FieldSelection> {
	let shape = R::shape();
	match selector {
		Selector::All => Ok(FieldSelection::all(shape)),
		Selector::Only(fields) => FieldSelection::resolve(shape, fields.names()),
		Selector::Sparse(patch) => FieldSelection::resolve(shape, patch.names()),
	}
}
