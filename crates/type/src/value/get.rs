// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::Type;

pub trait GetType {
	fn get_type() -> Type;

	fn is_nullable() -> bool {
		false
	}
}

macro_rules! impl_get_type {
	($($ty:ty => $variant:ident),* $(,)?) => {
		$(
			impl GetType for $ty {
				fn get_type() -> Type {
					Type::$variant
				}
			}
		)*
	};
}

impl_get_type! {
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

impl<T: GetType> GetType for Option<T> {
	fn get_type() -> Type {
		T::get_type()
	}

	fn is_nullable() -> bool {
		true
	}
}
