// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Implementation of the `Record` derive.
//!
//! Not meant to be used directly; use `quill-derive` or the `quill` crate.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod generate;
pub mod parse;
pub mod record;

use proc_macro2::TokenStream;

/// Derive `Record` against the `quill` crate.
pub fn derive_record(input: TokenStream) -> TokenStream {
	derive_record_with_crate(input, "quill")
}

/// Derive `Record` against a custom crate path, e.g. `quill_core`.
pub fn derive_record_with_crate(input: TokenStream, crate_path: &str) -> TokenStream {
	match parse::parse_struct_with_crate(input, crate_path) {
		Ok(parsed) => record::expand(parsed),
		Err(err) => err,
	}
}
