// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::{Result, Type, Value};
use tracing::{instrument, trace};

use crate::{CompareOp, Expr, ExpressionError, FieldDef, RecordShape, expr::ColumnRef};

/// A leaf of a lowered condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
	Column(&'static str),
	/// Index into [`Predicate::params`].
	Param(usize),
}

/// A validated condition tree whose constants were lifted into parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
	Compare {
		op: CompareOp,
		left: Operand,
		right: Operand,
	},
	And(Box<Condition>, Box<Condition>),
	Or(Box<Condition>, Box<Condition>),
	Not(Box<Condition>),
	IsNull {
		operand: Operand,
		negated: bool,
	},
	InList {
		operand: Operand,
		list: Vec<Operand>,
		negated: bool,
	},
	Between {
		operand: Operand,
		low: Operand,
		high: Operand,
		negated: bool,
	},
	Like {
		operand: Operand,
		pattern: Operand,
		case_insensitive: bool,
		negated: bool,
	},
	/// A boolean column used as a condition on its own.
	Column(&'static str),
	Constant(bool),
}

/// Row-matching condition scoped to exactly one record.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
	shape: &'static RecordShape,
	condition: Condition,
	params: Vec<Value>,
}

impl Predicate {
	/// Validates `expr` against `shape` and lowers it.
	#[instrument(name = "predicate::build", level = "trace", skip(shape), fields(record = shape.name()))]
	pub fn build(shape: &'static RecordShape, expr: &Expr) -> Result<Self> {
		let mut builder = Builder {
			shape,
			params: Vec::new(),
		};
		let condition = builder.condition(expr)?;
		trace!(params = builder.params.len(), "predicate built");

		Ok(Self {
			shape,
			condition,
			params: builder.params,
		})
	}

	pub fn shape(&self) -> &'static RecordShape {
		self.shape
	}

	pub fn condition(&self) -> &Condition {
		&self.condition
	}

	pub fn params(&self) -> &[Value] {
		&self.params
	}
}

struct Builder {
	shape: &'static RecordShape,
	params: Vec<Value>,
}

impl Builder {
	fn condition(&mut self, expr: &Expr) -> Result<Condition> {
		match expr {
			Expr::Compare {
				op,
				left,
				right,
			} => {
				if matches!(op, CompareOp::Equal | CompareOp::NotEqual) {
					let negated = *op == CompareOp::NotEqual;
					if is_absent(right) {
						return Ok(Condition::IsNull {
							operand: self.operand(op.symbol(), left)?,
							negated,
						});
					}
					if is_absent(left) {
						return Ok(Condition::IsNull {
							operand: self.operand(op.symbol(), right)?,
							negated,
						});
					}
				}

				Ok(Condition::Compare {
					op: *op,
					left: self.operand(op.symbol(), left)?,
					right: self.operand(op.symbol(), right)?,
				})
			}

			Expr::And(left, right) => {
				Ok(Condition::And(Box::new(self.condition(left)?), Box::new(self.condition(right)?)))
			}

			Expr::Or(left, right) => {
				Ok(Condition::Or(Box::new(self.condition(left)?), Box::new(self.condition(right)?)))
			}

			Expr::Not(inner) => Ok(Condition::Not(Box::new(self.condition(inner)?))),

			Expr::IsNull {
				expr,
				negated,
			} => Ok(Condition::IsNull {
				operand: self.operand("IS NULL", expr)?,
				negated: *negated,
			}),

			Expr::InList {
				expr,
				list,
				negated,
			} => {
				let operand = self.operand("IN", expr)?;
				let list = list.iter().map(|item| self.operand("IN", item)).collect::<Result<Vec<_>>>()?;
				Ok(Condition::InList {
					operand,
					list,
					negated: *negated,
				})
			}

			Expr::Between {
				expr,
				low,
				high,
				negated,
			} => Ok(Condition::Between {
				operand: self.operand("BETWEEN", expr)?,
				low: self.operand("BETWEEN", low)?,
				high: self.operand("BETWEEN", high)?,
				negated: *negated,
			}),

			Expr::Like {
				expr,
				pattern,
				case_insensitive,
				negated,
			} => {
				let operator = if *case_insensitive { "ILIKE" } else { "LIKE" };
				self.require_text(operator, expr)?;
				self.require_text(operator, pattern)?;
				Ok(Condition::Like {
					operand: self.operand(operator, expr)?,
					pattern: self.operand(operator, pattern)?,
					case_insensitive: *case_insensitive,
					negated: *negated,
				})
			}

			Expr::Column(column) => {
				let field = self.resolve(column)?;
				if field.get_type() != Type::Boolean {
					return Err(ExpressionError::NotBoolean {
						expression: expr.to_string(),
					}
					.into());
				}
				Ok(Condition::Column(field.name()))
			}

			Expr::Constant(Value::Boolean(value)) => Ok(Condition::Constant(*value)),

			Expr::Constant(_) => Err(ExpressionError::NotBoolean {
				expression: expr.to_string(),
			}
			.into()),
		}
	}

	fn operand(&mut self, operator: &str, expr: &Expr) -> Result<Operand> {
		match expr {
			Expr::Column(column) => Ok(Operand::Column(self.resolve(column)?.name())),
			Expr::Constant(value) => {
				self.params.push(value.clone());
				Ok(Operand::Param(self.params.len() - 1))
			}
			other => Err(ExpressionError::UnsupportedOperand {
				operator: operator.to_string(),
				operand: other.to_string(),
			}
			.into()),
		}
	}

	fn resolve(&self, column: &ColumnRef) -> Result<&'static FieldDef> {
		if let Some(owner) = column.owner() {
			if !owner.same(self.shape) {
				return Err(ExpressionError::ForeignColumn {
					record: self.shape.name().to_string(),
					owner: owner.name().to_string(),
					column: column.name().to_string(),
				}
				.into());
			}
		}

		let shape: &'static RecordShape = self.shape;
		shape.field(column.name()).ok_or_else(|| {
			ExpressionError::UnknownColumn {
				record: shape.name().to_string(),
				column: column.name().to_string(),
			}
			.into()
		})
	}

	fn require_text(&self, operator: &str, expr: &Expr) -> Result<()> {
		let is_text = match expr {
			Expr::Column(column) => self.resolve(column)?.get_type().is_utf8(),
			Expr::Constant(value) => value.get_type().is_utf8(),
			_ => true,
		};

		if !is_text {
			return Err(ExpressionError::LikeRequiresText {
				operator: operator.to_string(),
				operand: expr.to_string(),
			}
			.into());
		}
		Ok(())
	}
}

fn is_absent(expr: &Expr) -> bool {
	matches!(expr, Expr::Constant(Value::Undefined))
}
