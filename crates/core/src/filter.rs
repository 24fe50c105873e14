// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::{Diagnostic, IntoDiagnostic, Result, return_error};
use tracing::instrument;

use crate::{ColumnRef, Expr, MutationError, Predicate, Record, RecordShape};

/// A reusable predicate bound to one record.
///
/// A query without filters matches every row. Successive filters are joined
/// with AND.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
	shape: &'static RecordShape,
	filter: Option<Expr>,
}

impl Query {
	pub fn of<R: Record>() -> Self {
		Self {
			shape: R::shape(),
			filter: None,
		}
	}

	pub fn filter(mut self, expr: Expr) -> Self {
		self.filter = Some(match self.filter.take() {
			Some(existing) => existing.and(expr),
			None => expr,
		});
		self
	}

	pub fn shape(&self) -> &'static RecordShape {
		self.shape
	}

	pub fn expr(&self) -> Option<&Expr> {
		self.filter.as_ref()
	}

	/// Lowers the query against its own record.
	pub fn predicate(&self) -> Result<Option<Predicate>> {
		self.filter.as_ref().map(|expr| Predicate::build(self.shape, expr)).transpose()
	}
}

/// The row filter handed to a mutation: a query, an expression, or neither.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
	query: Option<Query>,
	expr: Option<Expr>,
}

impl Filter {
	pub fn new(query: Option<Query>, expr: Option<Expr>) -> Self {
		Self {
			query,
			expr,
		}
	}

	/// No filter: the mutation applies to every row.
	pub fn all() -> Self {
		Self::default()
	}

	pub fn query(query: Query) -> Self {
		Self::new(Some(query), None)
	}

	pub fn expr(expr: Expr) -> Self {
		Self::new(None, Some(expr))
	}

	pub fn is_all(&self) -> bool {
		self.query.is_none() && self.expr.is_none()
	}

	/// Turns the filter into a predicate over `shape`. `None` matches all
	/// rows.
	///
	/// A query, or an expression whose columns all belong to one other
	/// record, is rejected as a shape mismatch. Expressions mixing records
	/// fail in the predicate builder.
	#[instrument(name = "filter::normalize", level = "trace", skip_all, fields(record = shape.name()))]
	pub fn normalize(&self, shape: &'static RecordShape) -> Result<Option<Predicate>> {
		match (&self.query, &self.expr) {
			(Some(_), Some(_)) => {
				return_error!(
					MutationError::AmbiguousPredicate {
						record: shape.name().to_string(),
					}
					.into_diagnostic()
				)
			}
			(Some(query), None) => {
				if !query.shape().same(shape) {
					return_error!(shape_mismatch(shape, query.shape()));
				}
				query.predicate()
			}
			(None, Some(expr)) => {
				if let Some(owner) = foreign_shape(expr, shape) {
					return_error!(shape_mismatch(shape, owner));
				}
				Ok(Some(Predicate::build(shape, expr)?))
			}
			(None, None) => Ok(None),
		}
	}
}

fn shape_mismatch(expected: &RecordShape, actual: &RecordShape) -> Diagnostic {
	MutationError::ShapeMismatch {
		expected: expected.name().to_string(),
		actual: actual.name().to_string(),
	}
	.into_diagnostic()
}

/// The record owning every column of `expr`, if that is a single record
/// other than `shape`.
fn foreign_shape(expr: &Expr, shape: &RecordShape) -> Option<&'static RecordShape> {
	let mut owners = expr.columns().into_iter().map(ColumnRef::owner);
	let first = owners.next()??;
	if first.same(shape) {
		return None;
	}
	owners.all(|owner| owner.is_some_and(|owner| owner.same(first))).then_some(first)
}

impl From<()> for Filter {
	fn from(_: ()) -> Self {
		Self::all()
	}
}

impl From<Query> for Filter {
	fn from(query: Query) -> Self {
		Self::query(query)
	}
}

impl From<Expr> for Filter {
	fn from(expr: Expr) -> Self {
		Self::expr(expr)
	}
}

impl From<Option<Expr>> for Filter {
	fn from(expr: Option<Expr>) -> Self {
		Self::new(None, expr)
	}
}

impl From<(Query, Expr)> for Filter {
	fn from((query, expr): (Query, Expr)) -> Self {
		Self::new(Some(query), Some(expr))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		Condition, Operand,
		record::tests::{Order, Person},
	};

	#[test]
	fn test_absent_matches_all() {
		assert!(Filter::from(()).normalize(Person::shape()).unwrap().is_none());
		assert!(Filter::query(Query::of::<Person>()).normalize(Person::shape()).unwrap().is_none());
	}

	#[test]
	fn test_query_filters_are_anded() {
		let query = Query::of::<Person>().filter(Person::LAST_NAME.eq("Hendrix")).filter(Person::AGE.gt(20));
		let predicate = Filter::from(query).normalize(Person::shape()).unwrap().unwrap();
		assert!(matches!(predicate.condition(), Condition::And(_, _)));
		assert_eq!(predicate.params().len(), 2);
	}

	#[test]
	fn test_expr() {
		let predicate = Filter::from(Person::AGE.is_null()).normalize(Person::shape()).unwrap().unwrap();
		assert_eq!(
			predicate.condition(),
			&Condition::IsNull {
				operand: Operand::Column("age"),
				negated: false,
			}
		);
	}

	#[test]
	fn test_ambiguous() {
		let filter = Filter::from((Query::of::<Person>(), Person::AGE.gt(1)));
		let err = filter.normalize(Person::shape()).unwrap_err();
		assert_eq!(err.code, "MUTATE_004");
	}

	#[test]
	fn test_query_of_other_record() {
		let filter = Filter::from(Query::of::<Order>().filter(Order::PAID.eq(true)));
		let err = filter.normalize(Person::shape()).unwrap_err();
		assert_eq!(err.code, "MUTATE_005");
	}

	#[test]
	fn test_expr_of_other_record() {
		let err = Filter::from(Order::PAID.eq(true)).normalize(Person::shape()).unwrap_err();
		assert_eq!(err.code, "MUTATE_005");
		assert_eq!(err.message, "predicate is scoped to 'Order' but the mutation targets 'Person'");
	}

	#[test]
	fn test_expr_mixing_records() {
		let expr = Person::AGE.gt(1).and(Order::PAID.eq(true));
		let err = Filter::from(expr).normalize(Person::shape()).unwrap_err();
		assert_eq!(err.code, "EXPR_002");
	}

	#[test]
	fn test_untyped_columns_resolve_by_name() {
		let predicate = Filter::from(crate::col("age").compare(crate::expr::CompareOp::GreaterThan, crate::lit(1))).normalize(Person::shape()).unwrap();
		assert!(predicate.is_some());
	}
}
