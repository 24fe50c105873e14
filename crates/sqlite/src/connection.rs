// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use quill_type::Result;
use rusqlite::Connection;
use tracing::debug;

use crate::{DbPath, OpenFlags, SqliteConfig, SqliteError};

/// Opens the connection described by `config` and applies its pragmas.
pub(crate) fn connect(config: &SqliteConfig) -> Result<Connection> {
	let flags = convert_flags(&config.flags);
	let path = resolve_db_path(config.path.clone());

	let connection_failed = |err: rusqlite::Error| SqliteError::ConnectionFailed {
		path: describe(&path),
		message: err.to_string(),
	};

	let conn = match &path {
		DbPath::Memory => Connection::open_in_memory_with_flags(flags),
		DbPath::File(file) => {
			if file.to_string_lossy().contains(':') {
				Connection::open_with_flags(file, flags | rusqlite::OpenFlags::SQLITE_OPEN_URI)
			} else {
				Connection::open_with_flags(file, flags)
			}
		}
	}
	.map_err(connection_failed)?;

	conn.pragma_update(None, "journal_mode", config.journal_mode.as_str()).map_err(connection_failed)?;
	conn.pragma_update(None, "synchronous", config.synchronous_mode.as_str()).map_err(connection_failed)?;
	conn.busy_timeout(config.busy_timeout).map_err(connection_failed)?;

	debug!(path = %describe(&path), "opened sqlite connection");
	Ok(conn)
}

/// A path without extension is treated as a directory holding `quill.db`.
/// Missing directories are created.
pub(crate) fn resolve_db_path(path: DbPath) -> DbPath {
	match path {
		DbPath::Memory => DbPath::Memory,
		DbPath::File(path) => {
			if path.to_string_lossy().contains(':') {
				DbPath::File(path)
			} else if path.extension().is_none() {
				std::fs::create_dir_all(&path).ok();
				DbPath::File(path.join("quill.db"))
			} else {
				if let Some(parent) = path.parent() {
					std::fs::create_dir_all(parent).ok();
				}
				DbPath::File(path)
			}
		}
	}
}

pub(crate) fn convert_flags(flags: &OpenFlags) -> rusqlite::OpenFlags {
	let mut result = rusqlite::OpenFlags::empty();

	if flags.read_write {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE;
	}
	if flags.create {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_CREATE;
	}
	if flags.full_mutex {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_FULL_MUTEX;
	}
	if flags.no_mutex {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX;
	}
	if flags.shared_cache {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_SHARED_CACHE;
	}
	if flags.private_cache {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_PRIVATE_CACHE;
	}
	if flags.uri {
		result |= rusqlite::OpenFlags::SQLITE_OPEN_URI;
	}

	result
}

fn describe(path: &DbPath) -> String {
	match path {
		DbPath::Memory => ":memory:".to_string(),
		DbPath::File(file) => file.display().to_string(),
	}
}
