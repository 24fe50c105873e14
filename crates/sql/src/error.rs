// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::{Diagnostic, Error, IntoDiagnostic};

use crate::Feature;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DialectError {
	#[error("{dialect} does not support {feature}")]
	UnsupportedFeature {
		dialect: &'static str,
		feature: Feature,
	},
}

impl IntoDiagnostic for DialectError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			DialectError::UnsupportedFeature {
				feature,
				..
			} => Diagnostic {
				code: "DIALECT_001".to_string(),
				statement: None,
				message,
				column: None,
				label: Some(format!("{feature} cannot be rendered")),
				help: match feature {
					Feature::CaseInsensitiveLike => {
						Some("Use LIKE; it is case-insensitive for ASCII in SQLite".to_string())
					}
				},
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<DialectError> for Error {
	fn from(err: DialectError) -> Self {
		Error(err.into_diagnostic())
	}
}
