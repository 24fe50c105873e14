// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Debug, Formatter},
	marker::PhantomData,
};

use quill_type::{IntoValue, Value};

use crate::{Field, Record};

/// A sparse record: only the fields that were explicitly set.
///
/// Presence is recorded when a field is set, so a field explicitly set to its
/// zero value is still part of the patch. Fields keep the order in which they
/// were first set; setting a field again replaces its value in place.
pub struct Patch<R> {
	entries: Vec<(&'static str, Value)>,
	_marker: PhantomData<fn() -> R>,
}

impl<R> Patch<R> {
	pub fn new() -> Self {
		Self {
			entries: Vec::new(),
			_marker: PhantomData,
		}
	}

	pub fn set<V: IntoValue>(self, field: Field<R, V>, value: impl Into<V>) -> Self {
		let value: V = value.into();
		self.set_value(field.name(), value.into_value())
	}

	/// Sets a field by name. Unknown names are reported when the patch is
	/// used to select fields.
	pub fn set_value(mut self, name: &'static str, value: Value) -> Self {
		match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
			Some((_, slot)) => *slot = value,
			None => self.entries.push((name, value)),
		}
		self
	}

	pub fn get(&self, name: &str) -> Option<&Value> {
		self.entries.iter().find(|(existing, _)| *existing == name).map(|(_, value)| value)
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.entries.iter().map(|(name, _)| *name)
	}

	pub fn entries(&self) -> &[(&'static str, Value)] {
		&self.entries
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

impl<R: Record> Patch<R> {
	/// Captures every field of `record` whose value differs from the
	/// field's default, in shape order.
	pub fn non_defaults(record: &R) -> Self {
		let shape = R::shape();
		let mut patch = Self::new();
		for (field, value) in shape.fields().iter().zip(record.values()) {
			if value != field.default_value() {
				patch = patch.set_value(field.name(), value);
			}
		}
		patch
	}
}

impl<R> Default for Patch<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> Clone for Patch<R> {
	fn clone(&self) -> Self {
		Self {
			entries: self.entries.clone(),
			_marker: PhantomData,
		}
	}
}

impl<R> Debug for Patch<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_map().entries(self.entries.iter().map(|(name, value)| (name, value))).finish()
	}
}
