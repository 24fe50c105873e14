// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Minimal struct parser for the `Record` derive.

use proc_macro2::{Delimiter, Group, TokenStream, TokenTree};

use crate::generate::compile_error;

/// A struct with named fields.
pub struct ParsedStruct {
	pub name: String,
	pub table: String,
	pub fields: Vec<ParsedField>,
	pub crate_path: String,
}

pub struct ParsedField {
	/// Rust field name, without a raw identifier prefix.
	pub ident: String,
	pub raw: bool,
	/// Column name, `#[quill(rename = "..")]` or the field name.
	pub column: String,
	pub ty: TokenStream,
}

pub fn parse_struct_with_crate(input: TokenStream, crate_path: &str) -> Result<ParsedStruct, TokenStream> {
	let mut tokens = input.into_iter().peekable();
	let mut table = None;

	let name = loop {
		match tokens.next() {
			Some(TokenTree::Punct(p)) if p.as_char() == '#' => {
				let Some(TokenTree::Group(attr)) = tokens.next() else {
					return Err(compile_error("malformed attribute"));
				};
				for (key, value) in quill_attribute(&attr)? {
					match key.as_str() {
						"table" => table = Some(value),
						other => {
							return Err(compile_error(&format!("unknown struct attribute `{other}`")));
						}
					}
				}
			}
			Some(TokenTree::Ident(ident)) if ident == "struct" => match tokens.next() {
				Some(TokenTree::Ident(name)) => break name.to_string(),
				_ => return Err(compile_error("expected struct name")),
			},
			Some(TokenTree::Ident(ident)) if ident == "enum" || ident == "union" => {
				return Err(compile_error("Record can only be derived for structs"));
			}
			Some(_) => continue,
			None => return Err(compile_error("expected a struct")),
		}
	};

	let body = match tokens.next() {
		Some(TokenTree::Group(group)) if group.delimiter() == Delimiter::Brace => group,
		Some(TokenTree::Punct(p)) if p.as_char() == '<' => {
			return Err(compile_error("Record cannot be derived for generic structs"));
		}
		_ => return Err(compile_error("Record requires a struct with named fields")),
	};

	let fields = parse_fields(body.stream())?;
	if fields.is_empty() {
		return Err(compile_error("Record requires at least one field"));
	}

	Ok(ParsedStruct {
		table: table.unwrap_or_else(|| snake_case(&name)),
		name,
		fields,
		crate_path: crate_path.to_string(),
	})
}

fn parse_fields(body: TokenStream) -> Result<Vec<ParsedField>, TokenStream> {
	let mut fields = Vec::new();
	let mut tokens = body.into_iter().peekable();

	loop {
		let mut rename = None;

		// attributes and visibility
		let ident = loop {
			match tokens.next() {
				Some(TokenTree::Punct(p)) if p.as_char() == '#' => {
					let Some(TokenTree::Group(attr)) = tokens.next() else {
						return Err(compile_error("malformed attribute"));
					};
					for (key, value) in quill_attribute(&attr)? {
						match key.as_str() {
							"rename" => rename = Some(value),
							other => {
								return Err(compile_error(&format!(
									"unknown field attribute `{other}`"
								)));
							}
						}
					}
				}
				Some(TokenTree::Ident(ident)) if ident == "pub" => {
					if matches!(tokens.peek(), Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Parenthesis)
					{
						tokens.next();
					}
				}
				Some(TokenTree::Ident(ident)) => break ident.to_string(),
				Some(_) => return Err(compile_error("expected field name")),
				None => return Ok(fields),
			}
		};

		match tokens.next() {
			Some(TokenTree::Punct(p)) if p.as_char() == ':' => {}
			_ => return Err(compile_error("expected `:` after field name")),
		}

		// type runs until the next top-level comma
		let mut ty = Vec::new();
		let mut depth = 0usize;
		while let Some(token) = tokens.peek() {
			if let TokenTree::Punct(p) = token {
				match p.as_char() {
					',' if depth == 0 => {
						tokens.next();
						break;
					}
					'<' => depth += 1,
					'>' => depth = depth.saturating_sub(1),
					_ => {}
				}
			}
			if let Some(token) = tokens.next() {
				ty.push(token);
			}
		}

		let (ident, raw) = match ident.strip_prefix("r#") {
			Some(stripped) => (stripped.to_string(), true),
			None => (ident, false),
		};

		fields.push(ParsedField {
			column: rename.unwrap_or_else(|| ident.clone()),
			ident,
			raw,
			ty: ty.into_iter().collect(),
		});
	}
}

/// Extracts `key = "value"` pairs of a `#[quill(..)]` attribute. Other
/// attributes yield nothing.
fn quill_attribute(attr: &Group) -> Result<Vec<(String, String)>, TokenStream> {
	let mut tokens = attr.stream().into_iter();

	match tokens.next() {
		Some(TokenTree::Ident(ident)) if ident == "quill" => {}
		_ => return Ok(vec![]),
	}

	let Some(TokenTree::Group(args)) = tokens.next() else {
		return Err(compile_error("expected #[quill(key = \"value\")]"));
	};

	let mut result = Vec::new();
	let mut args = args.stream().into_iter();
	loop {
		let key = match args.next() {
			Some(TokenTree::Ident(key)) => key.to_string(),
			None => return Ok(result),
			_ => return Err(compile_error("expected attribute key")),
		};

		match args.next() {
			Some(TokenTree::Punct(p)) if p.as_char() == '=' => {}
			_ => return Err(compile_error(&format!("expected `=` after `{key}`"))),
		}

		let value = match args.next() {
			Some(TokenTree::Literal(literal)) => {
				let text = literal.to_string();
				match text.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
					Some(value) => value.to_string(),
					None => return Err(compile_error(&format!("`{key}` expects a string literal"))),
				}
			}
			_ => return Err(compile_error(&format!("`{key}` expects a string literal"))),
		};
		result.push((key, value));

		match args.next() {
			Some(TokenTree::Punct(p)) if p.as_char() == ',' => continue,
			None => return Ok(result),
			_ => return Err(compile_error("expected `,` between attribute arguments")),
		}
	}
}

/// `OrderLine` -> `order_line`
pub fn snake_case(name: &str) -> String {
	let mut result = String::new();
	for (idx, ch) in name.chars().enumerate() {
		if ch.is_uppercase() {
			if idx > 0 {
				result.push('_');
			}
			result.extend(ch.to_lowercase());
		} else {
			result.push(ch);
		}
	}
	result
}
