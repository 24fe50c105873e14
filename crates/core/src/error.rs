// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::{Diagnostic, DiagnosticColumn, Error, IntoDiagnostic, Type};

use crate::{StatementKind, ValueMode};

/// Failures while assembling a mutation statement.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MutationError {
	#[error("unknown field '{field}' on record '{record}'")]
	UnknownField {
		record: String,
		field: String,
	},

	#[error("{kind} on record '{record}' selects no fields")]
	EmptySelection {
		record: String,
		kind: StatementKind,
	},

	#[error("cannot increment non-numeric field '{field}' of record '{record}'")]
	NonNumericIncrement {
		record: String,
		field: String,
		r#type: Type,
	},

	#[error("predicate for '{record}' was given both as query and as expression")]
	AmbiguousPredicate {
		record: String,
	},

	#[error("predicate is scoped to '{actual}' but the mutation targets '{expected}'")]
	ShapeMismatch {
		expected: String,
		actual: String,
	},

	#[error("INSERT into '{record}' cannot carry a predicate")]
	InsertWithPredicate {
		record: String,
	},

	#[error("{kind} cannot take {mode} values")]
	ValueModeMismatch {
		kind: StatementKind,
		mode: ValueMode,
	},

	#[error("value given for field '{field}' of '{record}' which is not selected")]
	UnselectedValue {
		record: String,
		field: String,
	},
}

impl IntoDiagnostic for MutationError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		match self {
			MutationError::UnknownField {
				record,
				field,
			} => Diagnostic {
				code: "MUTATE_001".to_string(),
				statement: None,
				message,
				column: None,
				label: Some(format!("'{field}' is not a field of '{record}'")),
				help: Some("Use one of the fields declared on the record".to_string()),
				notes: vec![],
				cause: None,
			},

			MutationError::EmptySelection {
				record,
				kind,
			} => Diagnostic {
				code: "MUTATE_002".to_string(),
				statement: None,
				message,
				column: None,
				label: Some(format!("no field of '{record}' to write")),
				help: Some("Set at least one field to a non-default value".to_string()),
				notes: vec![format!("{kind} refuses to emit a statement without assignments")],
				cause: None,
			},

			MutationError::NonNumericIncrement {
				field,
				r#type,
				..
			} => Diagnostic {
				code: "MUTATE_003".to_string(),
				statement: None,
				message,
				column: Some(DiagnosticColumn {
					name: field,
					r#type,
				}),
				label: Some("increment requires a numeric field".to_string()),
				help: Some("Use UPDATE ONLY to assign non-numeric fields".to_string()),
				notes: vec![],
				cause: None,
			},

			MutationError::AmbiguousPredicate {
				..
			} => Diagnostic {
				code: "MUTATE_004".to_string(),
				statement: None,
				message,
				column: None,
				label: None,
				help: Some("Pass either a query or an expression, not both".to_string()),
				notes: vec!["Combine conditions with Query::filter or Expr::and".to_string()],
				cause: None,
			},

			MutationError::ShapeMismatch {
				expected,
				..
			} => Diagnostic {
				code: "MUTATE_005".to_string(),
				statement: None,
				message,
				column: None,
				label: None,
				help: Some(format!("Build the query with Query::of::<{expected}>()")),
				notes: vec![],
				cause: None,
			},

			MutationError::InsertWithPredicate {
				..
			} => Diagnostic {
				code: "MUTATE_006".to_string(),
				statement: None,
				message,
				column: None,
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},

			MutationError::ValueModeMismatch {
				..
			} => Diagnostic {
				code: "MUTATE_007".to_string(),
				statement: None,
				message,
				column: None,
				label: None,
				help: Some("Increments are only valid for UPDATE ADD".to_string()),
				notes: vec![],
				cause: None,
			},

			MutationError::UnselectedValue {
				..
			} => Diagnostic {
				code: "MUTATE_008".to_string(),
				statement: None,
				message,
				column: None,
				label: None,
				help: None,
				notes: vec![],
				cause: None,
			},
		}
	}
}

impl From<MutationError> for Error {
	fn from(err: MutationError) -> Self {
		Error(err.into_diagnostic())
	}
}

/// Failures while turning an expression into a predicate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExpressionError {
	#[error("column '{column}' does not exist on record '{record}'")]
	UnknownColumn {
		record: String,
		column: String,
	},

	#[error("column '{column}' belongs to record '{owner}', not '{record}'")]
	ForeignColumn {
		record: String,
		owner: String,
		column: String,
	},

	#[error("`{expression}` is not a boolean condition")]
	NotBoolean {
		expression: String,
	},

	#[error("{operator} does not accept `{operand}` as operand")]
	UnsupportedOperand {
		operator: String,
		operand: String,
	},

	#[error("{operator} requires text, got `{operand}`")]
	LikeRequiresText {
		operator: String,
		operand: String,
	},
}

impl IntoDiagnostic for ExpressionError {
	fn into_diagnostic(self) -> Diagnostic {
		let message = self.to_string();
		let (code, label, help) = match &self {
			ExpressionError::UnknownColumn {
				..
			} => ("EXPR_001", "unknown column", "Reference a field declared on the record"),
			ExpressionError::ForeignColumn {
				..
			} => (
				"EXPR_002",
				"column of another record",
				"Use the field constants of the record being mutated",
			),
			ExpressionError::NotBoolean {
				..
			} => ("EXPR_003", "not a condition", "Compare the value, e.g. `field.eq(value)`"),
			ExpressionError::UnsupportedOperand {
				..
			} => ("EXPR_004", "unsupported operand", "Operands must be a column or a constant"),
			ExpressionError::LikeRequiresText {
				..
			} => ("EXPR_005", "not text", "LIKE patterns apply to text columns only"),
		};

		Diagnostic {
			code: code.to_string(),
			statement: None,
			message,
			column: None,
			label: Some(label.to_string()),
			help: Some(help.to_string()),
			notes: vec![],
			cause: None,
		}
	}
}

impl From<ExpressionError> for Error {
	fn from(err: ExpressionError) -> Self {
		Error(err.into_diagnostic())
	}
}
