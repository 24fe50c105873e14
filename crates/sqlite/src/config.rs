// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	path::{Path, PathBuf},
	time::Duration,
};

/// Where the database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbPath {
	Memory,
	/// A database file, or a directory in which `quill.db` is created.
	File(PathBuf),
}

/// Flags passed to `sqlite3_open_v2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenFlags {
	pub read_write: bool,
	pub create: bool,
	pub full_mutex: bool,
	pub no_mutex: bool,
	pub shared_cache: bool,
	pub private_cache: bool,
	pub uri: bool,
}

impl Default for OpenFlags {
	fn default() -> Self {
		Self {
			read_write: true,
			create: true,
			full_mutex: true,
			no_mutex: false,
			shared_cache: false,
			private_cache: false,
			uri: false,
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalMode {
	Delete,
	Truncate,
	Persist,
	Memory,
	Wal,
	Off,
}

impl JournalMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			JournalMode::Delete => "DELETE",
			JournalMode::Truncate => "TRUNCATE",
			JournalMode::Persist => "PERSIST",
			JournalMode::Memory => "MEMORY",
			JournalMode::Wal => "WAL",
			JournalMode::Off => "OFF",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynchronousMode {
	Off,
	Normal,
	Full,
	Extra,
}

impl SynchronousMode {
	pub fn as_str(&self) -> &'static str {
		match self {
			SynchronousMode::Off => "OFF",
			SynchronousMode::Normal => "NORMAL",
			SynchronousMode::Full => "FULL",
			SynchronousMode::Extra => "EXTRA",
		}
	}
}

/// Configuration of a [`crate::SqliteBackend`]. Pragmas are applied when the
/// connection is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqliteConfig {
	pub path: DbPath,
	pub flags: OpenFlags,
	pub journal_mode: JournalMode,
	pub synchronous_mode: SynchronousMode,
	pub busy_timeout: Duration,
}

impl SqliteConfig {
	/// Durable defaults: WAL journal, NORMAL sync.
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: DbPath::File(path.as_ref().to_path_buf()),
			flags: OpenFlags::default(),
			journal_mode: JournalMode::Wal,
			synchronous_mode: SynchronousMode::Normal,
			busy_timeout: Duration::from_secs(5),
		}
	}

	/// Full sync on every commit.
	pub fn safe(path: impl AsRef<Path>) -> Self {
		Self::new(path).with_synchronous_mode(SynchronousMode::Full)
	}

	/// Trades durability for speed. Meant for tests and scratch data.
	pub fn fast(path: impl AsRef<Path>) -> Self {
		Self::new(path).with_synchronous_mode(SynchronousMode::Off).with_busy_timeout(Duration::from_millis(500))
	}

	pub fn in_memory() -> Self {
		Self {
			path: DbPath::Memory,
			flags: OpenFlags::default(),
			journal_mode: JournalMode::Memory,
			synchronous_mode: SynchronousMode::Off,
			busy_timeout: Duration::from_millis(500),
		}
	}

	pub fn with_flags(mut self, flags: OpenFlags) -> Self {
		self.flags = flags;
		self
	}

	pub fn with_journal_mode(mut self, journal_mode: JournalMode) -> Self {
		self.journal_mode = journal_mode;
		self
	}

	pub fn with_synchronous_mode(mut self, synchronous_mode: SynchronousMode) -> Self {
		self.synchronous_mode = synchronous_mode;
		self
	}

	pub fn with_busy_timeout(mut self, busy_timeout: Duration) -> Self {
		self.busy_timeout = busy_timeout;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_in_memory() {
		let config = SqliteConfig::in_memory();
		assert_eq!(config.path, DbPath::Memory);
		assert_eq!(config.journal_mode, JournalMode::Memory);
	}

	#[test]
	fn test_builders() {
		let config = SqliteConfig::fast("/tmp/db.sqlite").with_journal_mode(JournalMode::Delete);
		assert_eq!(config.path, DbPath::File(PathBuf::from("/tmp/db.sqlite")));
		assert_eq!(config.synchronous_mode, SynchronousMode::Off);
		assert_eq!(config.journal_mode.as_str(), "DELETE");

		assert_eq!(SqliteConfig::safe("a.db").synchronous_mode.as_str(), "FULL");
	}
}
