// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Debug, Formatter},
	marker::PhantomData,
};

/// Typed identifier of field `name` on record `R`, holding values of type `V`.
///
/// Generated as associated constants by `#[derive(Record)]`, e.g.
/// `Person::FIRST_NAME: Field<Person, String>`.
pub struct Field<R, V> {
	name: &'static str,
	_marker: PhantomData<fn() -> (R, V)>,
}

impl<R, V> Field<R, V> {
	pub const fn new(name: &'static str) -> Self {
		Self {
			name,
			_marker: PhantomData,
		}
	}

	pub const fn name(&self) -> &'static str {
		self.name
	}
}

impl<R, V> Clone for Field<R, V> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<R, V> Copy for Field<R, V> {}

impl<R, V> Debug for Field<R, V> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("Field").field(&self.name).finish()
	}
}

/// A field of `R` with its value type erased.
pub struct FieldRef<R> {
	name: &'static str,
	_marker: PhantomData<fn() -> R>,
}

impl<R> FieldRef<R> {
	pub fn name(&self) -> &'static str {
		self.name
	}
}

impl<R> Clone for FieldRef<R> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<R> Copy for FieldRef<R> {}

impl<R> Debug for FieldRef<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("FieldRef").field(&self.name).finish()
	}
}

impl<R, V> From<Field<R, V>> for FieldRef<R> {
	fn from(field: Field<R, V>) -> Self {
		Self {
			name: field.name,
			_marker: PhantomData,
		}
	}
}

/// Ordered list of fields naming the columns a mutation touches.
///
/// `Projection::of(Person::FIRST_NAME).and(Person::AGE)`
pub struct Projection<R> {
	fields: Vec<FieldRef<R>>,
}

impl<R> Projection<R> {
	pub fn new() -> Self {
		Self {
			fields: Vec::new(),
		}
	}

	pub fn of(field: impl Into<FieldRef<R>>) -> Self {
		Self::new().and(field)
	}

	pub fn and(mut self, field: impl Into<FieldRef<R>>) -> Self {
		self.fields.push(field.into());
		self
	}

	pub fn fields(&self) -> &[FieldRef<R>] {
		&self.fields
	}

	pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
		self.fields.iter().map(FieldRef::name)
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

impl<R> Default for Projection<R> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R> Clone for Projection<R> {
	fn clone(&self) -> Self {
		Self {
			fields: self.fields.clone(),
		}
	}
}

impl<R> Debug for Projection<R> {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.names()).finish()
	}
}

impl<R, V> From<Field<R, V>> for Projection<R> {
	fn from(field: Field<R, V>) -> Self {
		Self::of(field)
	}
}
