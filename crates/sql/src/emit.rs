// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_core::{Condition, MutationStatement, Operand, Predicate, StatementKind};
use quill_type::{Result, Value};
use tracing::{instrument, trace};

use crate::{Dialect, DialectError, Feature};

/// SQL text plus its positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
	pub kind: StatementKind,
	pub sql: String,
	pub params: Vec<Value>,
}

/// Renders `statement` for `dialect`.
///
/// Assignment parameters come first, predicate parameters follow them.
#[instrument(name = "sql::render", level = "trace", skip_all, fields(kind = %statement.kind(), dialect = dialect.name()))]
pub fn render(statement: &MutationStatement, dialect: &dyn Dialect) -> Result<Rendered> {
	let mut params = Vec::new();
	let table = dialect.quote_identifier(statement.shape().table());

	let sql = match statement.kind() {
		StatementKind::Insert => emit_insert(statement, dialect, &table, &mut params),
		StatementKind::UpdateOnly | StatementKind::UpdateAdd | StatementKind::UpdateNonDefault => {
			emit_update(statement, dialect, &table, &mut params)?
		}
		StatementKind::Delete => emit_delete(statement, dialect, &table, &mut params)?,
	};

	trace!(sql = %sql, params = params.len(), "rendered statement");
	Ok(Rendered {
		kind: statement.kind(),
		sql,
		params,
	})
}

// ── INSERT ──────────────────────────────────────────────────────────────

fn emit_insert(statement: &MutationStatement, dialect: &dyn Dialect, table: &str, params: &mut Vec<Value>) -> String {
	let mut columns = Vec::new();
	let mut placeholders = Vec::new();
	for (field, value) in statement.assignments() {
		columns.push(dialect.quote_identifier(field.name()));
		params.push(value.clone());
		placeholders.push(dialect.placeholder(params.len()));
	}

	format!("INSERT INTO {table} ({}) VALUES ({})", columns.join(", "), placeholders.join(", "))
}

// ── UPDATE ──────────────────────────────────────────────────────────────

fn emit_update(
	statement: &MutationStatement,
	dialect: &dyn Dialect,
	table: &str,
	params: &mut Vec<Value>,
) -> Result<String> {
	let mut assignments = Vec::new();
	for (field, value) in statement.assignments() {
		let column = dialect.quote_identifier(field.name());
		params.push(value.clone());
		let placeholder = dialect.placeholder(params.len());
		if statement.is_increment() {
			assignments.push(format!("{column} = {column} + {placeholder}"));
		} else {
			assignments.push(format!("{column} = {placeholder}"));
		}
	}

	let mut result = format!("UPDATE {table} SET {}", assignments.join(", "));
	if let Some(predicate) = statement.predicate() {
		result.push_str(&format!(" WHERE {}", emit_predicate(predicate, dialect, params)?));
	}
	Ok(result)
}

// ── DELETE ──────────────────────────────────────────────────────────────

fn emit_delete(
	statement: &MutationStatement,
	dialect: &dyn Dialect,
	table: &str,
	params: &mut Vec<Value>,
) -> Result<String> {
	let mut result = format!("DELETE FROM {table}");
	if let Some(predicate) = statement.predicate() {
		result.push_str(&format!(" WHERE {}", emit_predicate(predicate, dialect, params)?));
	}
	Ok(result)
}

// ── WHERE ───────────────────────────────────────────────────────────────

struct ConditionEmitter<'a> {
	dialect: &'a dyn Dialect,
	// number of parameters bound before the predicate
	offset: usize,
}

fn emit_predicate(predicate: &Predicate, dialect: &dyn Dialect, params: &mut Vec<Value>) -> Result<String> {
	let emitter = ConditionEmitter {
		dialect,
		offset: params.len(),
	};
	let sql = emitter.condition(predicate.condition(), 0)?;
	params.extend(predicate.params().iter().cloned());
	Ok(sql)
}

const PREC_OR: u8 = 1;
const PREC_AND: u8 = 2;
const PREC_NOT: u8 = 3;
const PREC_ATOM: u8 = 4;

fn precedence(condition: &Condition) -> u8 {
	match condition {
		Condition::Or(..) => PREC_OR,
		Condition::And(..) => PREC_AND,
		Condition::Not(..) => PREC_NOT,
		_ => PREC_ATOM,
	}
}

impl ConditionEmitter<'_> {
	fn condition(&self, condition: &Condition, parent: u8) -> Result<String> {
		let own = precedence(condition);
		let sql = match condition {
			Condition::Or(left, right) => {
				format!("{} OR {}", self.condition(left, PREC_OR)?, self.condition(right, PREC_OR)?)
			}
			Condition::And(left, right) => {
				format!("{} AND {}", self.condition(left, PREC_AND)?, self.condition(right, PREC_AND)?)
			}
			Condition::Not(inner) => format!("NOT {}", self.condition(inner, PREC_NOT)?),
			Condition::Compare {
				op,
				left,
				right,
			} => format!("{} {op} {}", self.operand(left), self.operand(right)),
			Condition::IsNull {
				operand,
				negated,
			} => {
				let keyword = if *negated { "IS NOT NULL" } else { "IS NULL" };
				format!("{} {keyword}", self.operand(operand))
			}
			Condition::InList {
				operand,
				list,
				negated,
			} => {
				if list.is_empty() {
					if *negated { "1 = 1" } else { "1 = 0" }.to_string()
				} else {
					let keyword = if *negated { "NOT IN" } else { "IN" };
					let items: Vec<_> = list.iter().map(|item| self.operand(item)).collect();
					format!("{} {keyword} ({})", self.operand(operand), items.join(", "))
				}
			}
			Condition::Between {
				operand,
				low,
				high,
				negated,
			} => {
				let keyword = if *negated { "NOT BETWEEN" } else { "BETWEEN" };
				format!("{} {keyword} {} AND {}", self.operand(operand), self.operand(low), self.operand(high))
			}
			Condition::Like {
				operand,
				pattern,
				case_insensitive,
				negated,
			} => {
				if *case_insensitive && !self.dialect.supports(Feature::CaseInsensitiveLike) {
					return Err(DialectError::UnsupportedFeature {
						dialect: self.dialect.name(),
						feature: Feature::CaseInsensitiveLike,
					}
					.into());
				}
				let keyword = match (*case_insensitive, *negated) {
					(false, false) => "LIKE",
					(false, true) => "NOT LIKE",
					(true, false) => "ILIKE",
					(true, true) => "NOT ILIKE",
				};
				format!("{} {keyword} {}", self.operand(operand), self.operand(pattern))
			}
			Condition::Column(name) => self.dialect.quote_identifier(name),
			Condition::Constant(true) => "1 = 1".to_string(),
			Condition::Constant(false) => "1 = 0".to_string(),
		};

		if own < parent {
			Ok(format!("({sql})"))
		} else {
			Ok(sql)
		}
	}

	fn operand(&self, operand: &Operand) -> String {
		match operand {
			Operand::Column(name) => self.dialect.quote_identifier(name),
			Operand::Param(index) => self.dialect.placeholder(self.offset + index + 1),
		}
	}
}
