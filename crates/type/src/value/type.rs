// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::Value;

/// All column types a record field can declare
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// A 4-byte floating point
	Float4,
	/// An 8-byte floating point
	Float8,
	/// A 1-byte signed integer
	Int1,
	/// A 2-byte signed integer
	Int2,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// A 1-byte unsigned integer
	Uint1,
	/// A 2-byte unsigned integer
	Uint2,
	/// A 4-byte unsigned integer
	Uint4,
	/// A 8-byte unsigned integer
	Uint8,
	/// A UTF-8 encoded text.
	Utf8,
	/// A binary large object (BLOB)
	Blob,
	/// Value is not defined (think null in common programming languages)
	Undefined,
}

impl Type {
	pub fn is_number(&self) -> bool {
		self.is_integer() || self.is_floating_point()
	}

	pub fn is_bool(&self) -> bool {
		matches!(self, Type::Boolean)
	}

	pub fn is_signed_integer(&self) -> bool {
		matches!(self, Type::Int1 | Type::Int2 | Type::Int4 | Type::Int8)
	}

	pub fn is_unsigned_integer(&self) -> bool {
		matches!(self, Type::Uint1 | Type::Uint2 | Type::Uint4 | Type::Uint8)
	}

	pub fn is_integer(&self) -> bool {
		self.is_signed_integer() || self.is_unsigned_integer()
	}

	pub fn is_floating_point(&self) -> bool {
		matches!(self, Type::Float4 | Type::Float8)
	}

	pub fn is_utf8(&self) -> bool {
		matches!(self, Type::Utf8)
	}

	pub fn is_blob(&self) -> bool {
		matches!(self, Type::Blob)
	}

	/// The value a field of this type holds when nothing was assigned to it.
	pub fn default_value(&self) -> Value {
		match self {
			Type::Boolean => Value::Boolean(false),
			Type::Float4 => Value::Float4(0.0),
			Type::Float8 => Value::Float8(0.0),
			Type::Int1 => Value::Int1(0),
			Type::Int2 => Value::Int2(0),
			Type::Int4 => Value::Int4(0),
			Type::Int8 => Value::Int8(0),
			Type::Uint1 => Value::Uint1(0),
			Type::Uint2 => Value::Uint2(0),
			Type::Uint4 => Value::Uint4(0),
			Type::Uint8 => Value::Uint8(0),
			Type::Utf8 => Value::Utf8(String::new()),
			Type::Blob => Value::Blob(Vec::new()),
			Type::Undefined => Value::Undefined,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("BOOL"),
			Type::Float4 => f.write_str("FLOAT4"),
			Type::Float8 => f.write_str("FLOAT8"),
			Type::Int1 => f.write_str("INT1"),
			Type::Int2 => f.write_str("INT2"),
			Type::Int4 => f.write_str("INT4"),
			Type::Int8 => f.write_str("INT8"),
			Type::Uint1 => f.write_str("UINT1"),
			Type::Uint2 => f.write_str("UINT2"),
			Type::Uint4 => f.write_str("UINT4"),
			Type::Uint8 => f.write_str("UINT8"),
			Type::Utf8 => f.write_str("UTF8"),
			Type::Blob => f.write_str("BLOB"),
			Type::Undefined => f.write_str("UNDEFINED"),
		}
	}
}
