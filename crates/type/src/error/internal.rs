// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use super::diagnostic::Diagnostic;

/// An invariant inside Quill was violated
pub fn internal(reason: impl Into<String>) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		statement: None,
		message: format!("Internal error: {}", reason.into()),
		column: None,
		label: None,
		help: Some("This is an internal error that should never occur in normal operation".to_string()),
		notes: vec![],
		cause: None,
	}
}
