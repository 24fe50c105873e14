// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

pub mod error;
pub mod value;

pub use error::{
	Error,
	diagnostic::{Diagnostic, DiagnosticColumn, IntoDiagnostic},
};
pub use value::{GetType, IntoValue, Type, Value};

pub type Result<T> = std::result::Result<T, Error>;
