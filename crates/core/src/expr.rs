// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	borrow::Cow,
	fmt::{Display, Formatter},
	ops::Not,
};

use quill_type::{IntoValue, Value};

use crate::{Field, Record, RecordShape};

/// A column reference inside an expression.
///
/// Columns taken from a typed [`Field`] remember the record they belong to,
/// so they can be rejected when used against another record.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnRef {
	owner: Option<&'static RecordShape>,
	name: Cow<'static, str>,
}

impl ColumnRef {
	pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
		Self {
			owner: None,
			name: name.into(),
		}
	}

	pub fn of(owner: &'static RecordShape, name: &'static str) -> Self {
		Self {
			owner: Some(owner),
			name: Cow::Borrowed(name),
		}
	}

	pub fn owner(&self) -> Option<&'static RecordShape> {
		self.owner
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
	Equal,
	NotEqual,
	LessThan,
	LessThanEqual,
	GreaterThan,
	GreaterThanEqual,
}

impl CompareOp {
	pub fn symbol(&self) -> &'static str {
		match self {
			CompareOp::Equal => "=",
			CompareOp::NotEqual => "<>",
			CompareOp::LessThan => "<",
			CompareOp::LessThanEqual => "<=",
			CompareOp::GreaterThan => ">",
			CompareOp::GreaterThanEqual => ">=",
		}
	}
}

impl Display for CompareOp {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.symbol())
	}
}

/// A boolean or value expression over the columns of one record.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
	Column(ColumnRef),
	Constant(Value),
	Compare {
		op: CompareOp,
		left: Box<Expr>,
		right: Box<Expr>,
	},
	And(Box<Expr>, Box<Expr>),
	Or(Box<Expr>, Box<Expr>),
	Not(Box<Expr>),
	IsNull {
		expr: Box<Expr>,
		negated: bool,
	},
	InList {
		expr: Box<Expr>,
		list: Vec<Expr>,
		negated: bool,
	},
	Between {
		expr: Box<Expr>,
		low: Box<Expr>,
		high: Box<Expr>,
		negated: bool,
	},
	Like {
		expr: Box<Expr>,
		pattern: Box<Expr>,
		case_insensitive: bool,
		negated: bool,
	},
}

/// Untyped column reference, resolved by name when the predicate is built.
pub fn col(name: impl Into<Cow<'static, str>>) -> Expr {
	Expr::Column(ColumnRef::new(name))
}

pub fn lit(value: impl IntoValue) -> Expr {
	Expr::Constant(value.into_value())
}

impl Expr {
	pub fn and(self, other: Expr) -> Expr {
		Expr::And(Box::new(self), Box::new(other))
	}

	pub fn or(self, other: Expr) -> Expr {
		Expr::Or(Box::new(self), Box::new(other))
	}

	pub fn compare(self, op: CompareOp, other: Expr) -> Expr {
		Expr::Compare {
			op,
			left: Box::new(self),
			right: Box::new(other),
		}
	}

	pub fn is_null(self) -> Expr {
		Expr::IsNull {
			expr: Box::new(self),
			negated: false,
		}
	}

	pub fn is_not_null(self) -> Expr {
		Expr::IsNull {
			expr: Box::new(self),
			negated: true,
		}
	}

	pub fn is_in(self, list: impl IntoIterator<Item = Expr>) -> Expr {
		Expr::InList {
			expr: Box::new(self),
			list: list.into_iter().collect(),
			negated: false,
		}
	}

	pub fn between(self, low: Expr, high: Expr) -> Expr {
		Expr::Between {
			expr: Box::new(self),
			low: Box::new(low),
			high: Box::new(high),
			negated: false,
		}
	}

	pub fn like(self, pattern: Expr) -> Expr {
		Expr::Like {
			expr: Box::new(self),
			pattern: Box::new(pattern),
			case_insensitive: false,
			negated: false,
		}
	}

	/// Joins `exprs` with AND. `None` when there is nothing to join.
	pub fn all(exprs: impl IntoIterator<Item = Expr>) -> Option<Expr> {
		exprs.into_iter().reduce(Expr::and)
	}

	/// Every column the expression references, left to right.
	pub fn columns(&self) -> Vec<&ColumnRef> {
		let mut columns = Vec::new();
		self.collect_columns(&mut columns);
		columns
	}

	fn collect_columns<'a>(&'a self, out: &mut Vec<&'a ColumnRef>) {
		match self {
			Expr::Column(column) => out.push(column),
			Expr::Constant(_) => {}
			Expr::Compare {
				left,
				right,
				..
			}
			| Expr::And(left, right)
			| Expr::Or(left, right) => {
				left.collect_columns(out);
				right.collect_columns(out);
			}
			Expr::Not(expr)
			| Expr::IsNull {
				expr,
				..
			} => expr.collect_columns(out),
			Expr::InList {
				expr,
				list,
				..
			} => {
				expr.collect_columns(out);
				for item in list {
					item.collect_columns(out);
				}
			}
			Expr::Between {
				expr,
				low,
				high,
				..
			} => {
				expr.collect_columns(out);
				low.collect_columns(out);
				high.collect_columns(out);
			}
			Expr::Like {
				expr,
				pattern,
				..
			} => {
				expr.collect_columns(out);
				pattern.collect_columns(out);
			}
		}
	}
}

impl Not for Expr {
	type Output = Expr;

	fn not(self) -> Expr {
		match self {
			Expr::IsNull {
				expr,
				negated,
			} => Expr::IsNull {
				expr,
				negated: !negated,
			},
			Expr::InList {
				expr,
				list,
				negated,
			} => Expr::InList {
				expr,
				list,
				negated: !negated,
			},
			Expr::Between {
				expr,
				low,
				high,
				negated,
			} => Expr::Between {
				expr,
				low,
				high,
				negated: !negated,
			},
			Expr::Like {
				expr,
				pattern,
				case_insensitive,
				negated,
			} => Expr::Like {
				expr,
				pattern,
				case_insensitive,
				negated: !negated,
			},
			other => Expr::Not(Box::new(other)),
		}
	}
}

impl Display for Expr {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		let not = |negated: bool| if negated { "NOT " } else { "" };
		match self {
			Expr::Column(column) => f.write_str(column.name()),
			Expr::Constant(Value::Utf8(text)) => write!(f, "'{text}'"),
			Expr::Constant(value) => write!(f, "{value}"),
			Expr::Compare {
				op,
				left,
				right,
			} => write!(f, "{left} {op} {right}"),
			Expr::And(left, right) => write!(f, "({left} AND {right})"),
			Expr::Or(left, right) => write!(f, "({left} OR {right})"),
			Expr::Not(inner) => write!(f, "NOT {inner}"),
			Expr::IsNull {
				expr,
				negated,
			} => write!(f, "{expr} IS {}NULL", not(*negated)),
			Expr::InList {
				expr,
				list,
				negated,
			} => {
				write!(f, "{expr} {}IN (", not(*negated))?;
				for (idx, item) in list.iter().enumerate() {
					if idx > 0 {
						f.write_str(", ")?;
					}
					write!(f, "{item}")?;
				}
				f.write_str(")")
			}
			Expr::Between {
				expr,
				low,
				high,
				negated,
			} => write!(f, "{expr} {}BETWEEN {low} AND {high}", not(*negated)),
			Expr::Like {
				expr,
				pattern,
				case_insensitive,
				negated,
			} => {
				let keyword = if *case_insensitive { "ILIKE" } else { "LIKE" };
				write!(f, "{expr} {}{keyword} {pattern}", not(*negated))
			}
		}
	}
}

/// Typed predicate builders.
///
/// `Person::LAST_NAME.eq("Hendrix").and(Person::AGE.gt(20))`
impl<R: Record, V: IntoValue> Field<R, V> {
	pub fn expr(self) -> Expr {
		Expr::Column(ColumnRef::of(R::shape(), self.name()))
	}

	pub fn eq(self, value: impl Into<V>) -> Expr {
		self.compare_value(CompareOp::Equal, value)
	}

	pub fn ne(self, value: impl Into<V>) -> Expr {
		self.compare_value(CompareOp::NotEqual, value)
	}

	pub fn lt(self, value: impl Into<V>) -> Expr {
		self.compare_value(CompareOp::LessThan, value)
	}

	pub fn le(self, value: impl Into<V>) -> Expr {
		self.compare_value(CompareOp::LessThanEqual, value)
	}

	pub fn gt(self, value: impl Into<V>) -> Expr {
		self.compare_value(CompareOp::GreaterThan, value)
	}

	pub fn ge(self, value: impl Into<V>) -> Expr {
		self.compare_value(CompareOp::GreaterThanEqual, value)
	}

	/// Inclusive on both ends.
	pub fn between(self, low: impl Into<V>, high: impl Into<V>) -> Expr {
		let (low, high): (V, V) = (low.into(), high.into());
		self.expr().between(lit(low), lit(high))
	}

	pub fn is_in<T: Into<V>>(self, values: impl IntoIterator<Item = T>) -> Expr {
		self.expr().is_in(values.into_iter().map(|value| {
			let value: V = value.into();
			lit(value)
		}))
	}

	pub fn is_null(self) -> Expr {
		self.expr().is_null()
	}

	pub fn is_not_null(self) -> Expr {
		self.expr().is_not_null()
	}

	pub fn like(self, pattern: impl Into<String>) -> Expr {
		self.expr().like(lit(pattern.into()))
	}

	pub fn ilike(self, pattern: impl Into<String>) -> Expr {
		Expr::Like {
			expr: Box::new(self.expr()),
			pattern: Box::new(lit(pattern.into())),
			case_insensitive: true,
			negated: false,
		}
	}

	/// Compares this column with another column of the same record.
	pub fn eq_field<W: IntoValue>(self, other: Field<R, W>) -> Expr {
		self.expr().compare(CompareOp::Equal, other.expr())
	}

	fn compare_value(self, op: CompareOp, value: impl Into<V>) -> Expr {
		let value: V = value.into();
		self.expr().compare(op, lit(value))
	}
}
