// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::Value;
use rusqlite::{
	ToSql,
	types::{ToSqlOutput, Value as SqliteValue, ValueRef},
};

/// Binds a [`Value`] as a SQLite parameter. `Undefined` binds as NULL.
pub(crate) struct SqlParam<'a>(pub &'a Value);

impl ToSql for SqlParam<'_> {
	fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
		let integer = |value: i64| ToSqlOutput::Owned(SqliteValue::Integer(value));

		Ok(match self.0 {
			Value::Undefined => ToSqlOutput::Owned(SqliteValue::Null),
			Value::Boolean(value) => integer(i64::from(*value)),
			Value::Float4(value) => ToSqlOutput::Owned(SqliteValue::Real(f64::from(*value))),
			Value::Float8(value) => ToSqlOutput::Owned(SqliteValue::Real(*value)),
			Value::Int1(value) => integer(i64::from(*value)),
			Value::Int2(value) => integer(i64::from(*value)),
			Value::Int4(value) => integer(i64::from(*value)),
			Value::Int8(value) => integer(*value),
			Value::Uint1(value) => integer(i64::from(*value)),
			Value::Uint2(value) => integer(i64::from(*value)),
			Value::Uint4(value) => integer(i64::from(*value)),
			Value::Uint8(value) => integer(
				i64::try_from(*value).map_err(|err| rusqlite::Error::ToSqlConversionFailure(Box::new(err)))?,
			),
			Value::Utf8(value) => ToSqlOutput::Borrowed(ValueRef::Text(value.as_bytes())),
			Value::Blob(value) => ToSqlOutput::Borrowed(ValueRef::Blob(value)),
		})
	}
}
