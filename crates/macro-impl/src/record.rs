// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Expansion of `#[derive(Record)]`.

use proc_macro2::{TokenStream, TokenTree};

use crate::{
	generate::{arrow, braces, brackets, generics, ident, ident_raw, literal_str, parens, path, path_sep, punct},
	parse::{ParsedField, ParsedStruct},
};

pub fn expand(parsed: ParsedStruct) -> TokenStream {
	let mut tokens: Vec<TokenTree> = Vec::new();
	tokens.extend(record_impl(&parsed));
	tokens.extend(field_consts(&parsed));
	tokens.into_iter().collect()
}

/// `impl ::quill::Record for Person { fn describe() .. fn values(&self) .. }`
fn record_impl(parsed: &ParsedStruct) -> Vec<TokenTree> {
	let krate = parsed.crate_path.as_str();

	let mut describe = path(&["", krate, "RecordShape", "new"]);
	describe.push(parens([literal_str(&parsed.name), punct(','), literal_str(&parsed.table)]));
	for field in &parsed.fields {
		describe.push(punct('.'));
		describe.push(ident("with_field"));
		describe.push(parens(field_def(krate, field)));
	}

	let mut values = Vec::new();
	for field in &parsed.fields {
		values.extend(path(&["", krate, "IntoValue", "into_value"]));
		let mut clone = path(&["", "std", "clone", "Clone", "clone"]);
		clone.push(parens([punct('&'), ident("self"), punct('.'), ident_raw(&field.ident, field.raw)]));
		values.push(parens(clone));
		values.push(punct(','));
	}

	let mut body = Vec::new();

	// fn describe() -> ::quill::RecordShape { .. }
	body.push(ident("fn"));
	body.push(ident("describe"));
	body.push(parens([]));
	body.extend(arrow());
	body.extend(path(&["", krate, "RecordShape"]));
	body.push(braces(describe));

	// fn values(&self) -> ::std::vec::Vec<::quill::Value> { ::std::vec![..] }
	body.push(ident("fn"));
	body.push(ident("values"));
	body.push(parens([punct('&'), ident("self")]));
	body.extend(arrow());
	body.extend(path(&["", "std", "vec", "Vec"]));
	body.extend(generics(path(&["", krate, "Value"])));
	let mut vec_macro = path(&["", "std", "vec"]);
	vec_macro.push(punct('!'));
	vec_macro.push(brackets(values));
	body.push(braces(vec_macro));

	let mut tokens = vec![ident("impl")];
	tokens.extend(path(&["", krate, "Record"]));
	tokens.push(ident("for"));
	tokens.push(ident(&parsed.name));
	tokens.push(braces(body));
	tokens
}

/// `.with_field(::quill::FieldDef::of::<String>("first_name"))`
fn field_def(krate: &str, field: &ParsedField) -> Vec<TokenTree> {
	let mut tokens = path(&["", krate, "FieldDef", "of"]);
	tokens.extend(path_sep());
	tokens.extend(generics(field.ty.clone()));
	tokens.push(parens([literal_str(&field.column)]));
	tokens
}

/// `impl Person { pub const FIRST_NAME: ::quill::Field<Person, String> = ::quill::Field::new("first_name"); }`
fn field_consts(parsed: &ParsedStruct) -> Vec<TokenTree> {
	let krate = parsed.crate_path.as_str();
	let mut body = Vec::new();

	for field in &parsed.fields {
		body.push(ident("pub"));
		body.push(ident("const"));
		body.push(ident(&field.ident.to_uppercase()));
		body.push(punct(':'));
		body.extend(path(&["", krate, "Field"]));
		let mut args = vec![ident(&parsed.name), punct(',')];
		args.extend(field.ty.clone());
		body.extend(generics(args));
		body.push(punct('='));
		body.extend(path(&["", krate, "Field", "new"]));
		body.push(parens([literal_str(&field.column)]));
		body.push(punct(';'));
	}

	let mut tokens = vec![ident("impl"), ident(&parsed.name)];
	tokens.push(braces(body));
	tokens
}
