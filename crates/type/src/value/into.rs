// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::Value;

pub trait IntoValue {
	fn into_value(self) -> Value;
}

macro_rules! impl_into_value {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl IntoValue for $ty {
				fn into_value(self) -> Value {
					Value::$variant(self)
				}
			}
		)*
	};
}

impl_into_value! {
	bool => Boolean,
	f32 => Float4,
	f64 => Float8,
	i8 => Int1,
	i16 => Int2,
	i32 => Int4,
	i64 => Int8,
	u8 => Uint1,
	u16 => Uint2,
	u32 => Uint4,
	u64 => Uint8,
	String => Utf8,
	Vec<u8> => Blob,
}

impl IntoValue for Value {
	fn into_value(self) -> Value {
		self
	}
}

impl IntoValue for &str {
	fn into_value(self) -> Value {
		Value::Utf8(self.to_string())
	}
}

impl IntoValue for &[u8] {
	fn into_value(self) -> Value {
		Value::Blob(self.to_vec())
	}
}

impl<T: IntoValue> IntoValue for Option<T> {
	fn into_value(self) -> Value {
		match self {
			Some(value) => value.into_value(),
			None => Value::Undefined,
		}
	}
}
