// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{any::TypeId, collections::HashMap};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use quill_type::{GetType, Type, Value};
use tracing::debug;

/// One persisted field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
	name: &'static str,
	r#type: Type,
	nullable: bool,
}

impl FieldDef {
	pub fn new(name: &'static str, r#type: Type) -> Self {
		Self {
			name,
			r#type,
			nullable: false,
		}
	}

	/// Describes a field holding values of the Rust type `T`.
	pub fn of<T: GetType>(name: &'static str) -> Self {
		Self {
			name,
			r#type: T::get_type(),
			nullable: T::is_nullable(),
		}
	}

	pub fn nullable(mut self) -> Self {
		self.nullable = true;
		self
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn get_type(&self) -> Type {
		self.r#type
	}

	pub fn is_nullable(&self) -> bool {
		self.nullable
	}

	pub fn is_numeric(&self) -> bool {
		self.r#type.is_number()
	}

	/// The value this field holds when it was never assigned.
	pub fn default_value(&self) -> Value {
		if self.nullable {
			Value::Undefined
		} else {
			self.r#type.default_value()
		}
	}
}

/// Structural description of a persisted record type.
///
/// A shape is derived once per type through [`shape_of`] and never mutated
/// afterwards. Field order is declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordShape {
	name: &'static str,
	table: &'static str,
	fields: Vec<FieldDef>,
}

impl RecordShape {
	pub fn new(name: &'static str, table: &'static str) -> Self {
		Self {
			name,
			table,
			fields: Vec::new(),
		}
	}

	pub fn with_field(mut self, field: FieldDef) -> Self {
		self.fields.push(field);
		self
	}

	pub fn name(&self) -> &'static str {
		self.name
	}

	pub fn table(&self) -> &'static str {
		self.table
	}

	pub fn fields(&self) -> &[FieldDef] {
		&self.fields
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn field(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|field| field.name == name)
	}

	pub fn position(&self, name: &str) -> Option<usize> {
		self.fields.iter().position(|field| field.name == name)
	}

	/// Whether both shapes describe the same record type.
	pub fn same(&self, other: &RecordShape) -> bool {
		std::ptr::eq(self, other) || (self.name == other.name && self.table == other.table)
	}
}

/// A type that can be persisted as one row of a table.
///
/// Usually implemented through `#[derive(Record)]`.
pub trait Record: Sized + 'static {
	/// Builds the shape of this record. Called once per type; use
	/// [`Record::shape`] to get the cached shape.
	fn describe() -> RecordShape;

	/// The current value of every field, in shape order.
	fn values(&self) -> Vec<Value>;

	fn shape() -> &'static RecordShape {
		shape_of::<Self>()
	}
}

static SHAPES: Lazy<RwLock<HashMap<TypeId, &'static RecordShape>>> = Lazy::new(|| RwLock::new(HashMap::new()));

/// Returns the memoized shape of `R`, deriving it on first use.
pub fn shape_of<R: Record>() -> &'static RecordShape {
	let id = TypeId::of::<R>();

	let cached = SHAPES.read().get(&id).copied();
	if let Some(shape) = cached {
		return shape;
	}

	let mut shapes = SHAPES.write();
	*shapes.entry(id).or_insert_with(|| {
		let shape = R::describe();
		debug!(record = shape.name(), table = shape.table(), fields = shape.len(), "derived record shape");
		Box::leak(Box::new(shape))
	})
}
