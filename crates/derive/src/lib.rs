// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! `#[derive(Record)]` for plain structs with named fields.
//!
//! ```ignore
//! #[derive(Record)]
//! #[quill(table = "people")]
//! struct Person {
//!     id: i64,
//!     #[quill(rename = "given_name")]
//!     first_name: String,
//! }
//!
//! let patch = Patch::new().set(Person::FIRST_NAME, "JJ");
//! ```

use proc_macro::TokenStream;

#[proc_macro_derive(Record, attributes(quill))]
pub fn derive_record(input: TokenStream) -> TokenStream {
	quill_macro_impl::derive_record(input.into()).into()
}
