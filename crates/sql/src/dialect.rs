// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

/// Optional SQL features a dialect may lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
	CaseInsensitiveLike,
}

impl Display for Feature {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Feature::CaseInsensitiveLike => f.write_str("ILIKE"),
		}
	}
}

/// One SQL flavour.
pub trait Dialect: Send + Sync {
	fn name(&self) -> &'static str;

	fn quote_identifier(&self, ident: &str) -> String {
		format!("\"{}\"", ident.replace('"', "\"\""))
	}

	/// Placeholder of the 1-based parameter `index`.
	fn placeholder(&self, index: usize) -> String;

	fn supports(&self, feature: Feature) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Sqlite;

impl Dialect for Sqlite {
	fn name(&self) -> &'static str {
		"sqlite"
	}

	fn placeholder(&self, index: usize) -> String {
		format!("?{index}")
	}

	fn supports(&self, feature: Feature) -> bool {
		match feature {
			Feature::CaseInsensitiveLike => false,
		}
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Postgres;

impl Dialect for Postgres {
	fn name(&self) -> &'static str {
		"postgres"
	}

	fn placeholder(&self, index: usize) -> String {
		format!("${index}")
	}

	fn supports(&self, feature: Feature) -> bool {
		match feature {
			Feature::CaseInsensitiveLike => true,
		}
	}
}
