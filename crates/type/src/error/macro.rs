// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Wraps a diagnostic into an `Error`
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error($diagnostic)
	};
}

/// Returns early with an `Error` built from a diagnostic
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return Err($crate::error!($diagnostic))
	};
}

/// Returns early with an internal error
#[macro_export]
macro_rules! return_internal_error {
	($reason:expr) => {
		return Err($crate::error!($crate::error::internal::internal($reason)))
	};
	($fmt:expr, $($arg:tt)*) => {
		return Err($crate::error!($crate::error::internal::internal(format!($fmt, $($arg)*))))
	};
}
