// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! SQLite execution backend.
//!
//! One connection is shared behind a mutex; a [`SqliteUnit`] holds the lock
//! for the duration of a single statement.

mod backend;
mod config;
mod connection;
mod error;
mod value;

pub use backend::{SqliteBackend, SqliteUnit};
pub use config::{DbPath, JournalMode, OpenFlags, SqliteConfig, SynchronousMode};
pub use error::SqliteError;
