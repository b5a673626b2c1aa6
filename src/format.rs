//! Bracketed-Table Format
//!
//! This module documents the text format as read and written by this library.
//!
//! # Overview
//!
//! The format hands relational data to an optimization model. A document is a
//! sequence of named tables; each table is a list of rows; each row is a list of
//! strings and numbers.
//!
//! ```text
//! table_one = {
//! <1, "a", 2.5>
//! <2, "b", 3>
//! };
//!
//! table_two = {
//! <"x">
//! };
//! ```
//!
//! # Core Syntax
//!
//! ## Tables
//!
//! `name = { rows };` declares one table.
//!
//! **Rules**:
//! - The name is every non-whitespace character before `=`; it can't be blank
//! - A name may appear only once per document
//! - `{` and `;` are ignored outside strings, so `name = rows }` also reads;
//!   the writer always emits both
//!
//! ## Rows
//!
//! `<v1, v2, ..., vn>` holds one row. Rows of one table may differ in length;
//! matching rows to a schema is left to the caller
//! ([`Dataset::from_tables`](crate::Dataset::from_tables)).
//!
//! | Text | Row |
//! |------|-----|
//! | `<1, "a">` | `[1, "a"]` |
//! | `<>` | `[]` |
//! | `<1,>` | `[1]` |
//! | `<,1>` | `["", 1]` |
//!
//! ## Values
//!
//! | Type | Syntax | Example |
//! |------|--------|---------|
//! | String | double-quoted, `\"` for a literal quote | `"he said \"hi\""` |
//! | Number | bare token parsed as `f64` | `2.5`, `-1e3`, `inf` |
//!
//! A backslash not followed by `"` is kept as is; there are no other escapes.
//!
//! Bare numbers may group digits with `_` (`1_000`), one underscore at a time
//! and only between two digits. They are never written that way.
//! Whitespace (including newlines) inside quotes is kept. Outside quotes all
//! whitespace is skipped, including inside bare tokens: `<1 2>` reads as `12`.
//!
//! # Writing
//!
//! - Tables appear in schema order, each followed by `};\n`, with one blank line
//!   between tables
//! - Values in a row are separated by `, `
//! - Numbers use Rust's shortest round-trip `f64` display: `3.0` is written `3`
//! - An empty table is written `name = {\n};\n`
//!
//! # Errors
//!
//! Reading stops at the first problem. Every error carries a 0-based character
//! position (plus line and column):
//!
//! | Input | Error |
//! |-------|-------|
//! | `a = {<1>};a = {<2>};` | duplicate table `a` |
//! | `a = {<1x>};` | `1x` is not a number |
//! | `= {<1>};` | blank table name |
//! | `a = {1};` | unrecognized `1` inside a table body |
//! | `a = {<1>` | unexpected end of input (strict mode) |
//!
//! # Limitations
//!
//! - **Values**: strings and numbers only; no booleans, nulls or nesting
//! - **Backslashes**: a string ending in `\` can't be written, since `\"` would
//!   read as an escaped quote
//! - **Comments**: not supported
