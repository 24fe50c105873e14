// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod dialect;
mod emit;
pub mod error;
pub mod execute;

pub use dialect::{Dialect, Feature, Postgres, Sqlite};
pub use emit::{Rendered, render};
pub use error::DialectError;
pub use execute::{Backend, Executed, UnitOfWork};
pub use quill_core::StatementKind;
