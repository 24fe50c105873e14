// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::{Diagnostic, Error, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SqliteError {
	#[error("failed to open database at {path}: {message}")]
	ConnectionFailed {
		path: String,
		message: String,
	},

	#[error("{message}")]
	StatementFailed {
		message: String,
	},

	#[error("unit of work was already used for a statement")]
	UnitReused,
}

impl IntoDiagnostic for SqliteError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, help) = match &self {
			SqliteError::ConnectionFailed {
				..
			} => ("SQLITE_001", Some("Check that the path exists and is writable".to_string())),
			SqliteError::StatementFailed {
				..
			} => ("SQLITE_002", None),
			SqliteError::UnitReused => ("SQLITE_003", Some("Acquire a new unit of work per statement".to_string())),
		};

		Diagnostic {
			code: code.to_string(),
			statement: None,
			message,
			column: None,
			label: None,
			help,
			notes: vec![],
			cause: None,
		}
	}
}

impl From<SqliteError> for Error {
	fn from(err: SqliteError) -> Self {
		Error(err.into_diagnostic())
	}
}

impl From<rusqlite::Error> for SqliteError {
	fn from(err: rusqlite::Error) -> Self {
		SqliteError::StatementFailed {
			message: err.to_string(),
		}
	}
}
