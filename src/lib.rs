//! # opl_text
//!
//! Reader and writer for the bracketed-table text format used to exchange
//! relational data with OPL optimization models.
//!
//! ## What is the bracketed-table format?
//!
//! Each table is written as a name, `=`, and a brace-delimited list of rows:
//!
//! ```text
//! foods = {
//! <"bread", 2.49>
//! <"milk", 0.89>
//! };
//!
//! nutrition = {
//! <"bread", "protein", 4>
//! };
//! ```
//!
//! Values are double-quoted strings or bare numbers. See [`format`] for the
//! complete description.
//!
//! ## Key Features
//!
//! - **Schema-driven writing**: keyed and plain tables flatten into rows in
//!   declared field order
//! - **State-machine reading**: a single pass over the characters, with an
//!   explicit [`State`] per step
//! - **Precise errors**: every parse error names the character or token and its
//!   character position
//! - **Explicit configuration**: [`OplOptions`] is passed into each call
//!
//! ## Quick Start
//!
//! ```rust
//! use opl_text::{from_str, key, record, to_string, Dataset, Schema, TableSchema, Value};
//!
//! let schema = Schema::new(vec![
//!     TableSchema::keyed("foods", ["name"], ["cost"]),
//!     TableSchema::plain("notes", ["text"]),
//! ])
//! .unwrap();
//!
//! let mut dat = Dataset::new();
//! dat.insert_keyed("foods", key!("milk"), record! { "cost" => 0.89 }).unwrap();
//! dat.push_plain("notes", record! { "text" => "weekly" }).unwrap();
//!
//! let text = to_string(&schema, &dat).unwrap();
//! assert_eq!(
//!     text,
//!     "foods = {\n<\"milk\", 0.89>\n};\n\nnotes = {\n<\"weekly\">\n};\n"
//! );
//!
//! let tables = from_str(&text).unwrap();
//! assert_eq!(tables["foods"], vec![vec![Value::from("milk"), Value::from(0.89)]]);
//! ```
//!
//! ### Reading back into a dataset
//!
//! ```rust
//! use opl_text::{read_dataset, Schema, TableData, TableSchema};
//!
//! let schema = Schema::new(vec![TableSchema::keyed("foods", ["name"], ["cost"])]).unwrap();
//! let dat = read_dataset(&schema, "foods = { <\"milk\", 0.89> };").unwrap();
//! assert!(matches!(dat.table("foods"), Some(TableData::Keyed(rows)) if rows.len() == 1));
//! ```
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade: operation summaries at `debug`,
//! table and row events at `trace`. No logger is installed.

pub mod dataset;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod record;
pub mod schema;
pub mod ser;
pub mod value;

pub use dataset::{Dataset, Key, TableData};
pub use de::{Parser, Row, State, Tables};
pub use error::{Error, Result};
pub use options::OplOptions;
pub use record::Record;
pub use schema::{Schema, TableKind, TableSchema};
pub use ser::Serializer;
pub use value::Value;

use std::io;

/// Serialize a dataset to bracketed-table text.
///
/// # Errors
///
/// Returns an error if the schema declares generator or generic tables, the
/// dataset does not fit the schema, or a value can't be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(schema: &Schema, dataset: &Dataset) -> Result<String> {
    to_string_with_options(schema, dataset, OplOptions::default())
}

/// Serialize a dataset to bracketed-table text with custom options.
///
/// # Examples
///
/// ```rust
/// use opl_text::{record, to_string_with_options, Dataset, OplOptions, Schema, TableSchema};
///
/// let schema = Schema::new(vec![TableSchema::plain("t", ["v"])]).unwrap();
/// let mut dat = Dataset::new();
/// dat.push_plain("t", record! { "v" => 1, "extra" => 2 }).unwrap();
///
/// // The up-front shape check rejects the extra field...
/// assert!(to_string_with_options(&schema, &dat, OplOptions::new()).is_err());
///
/// // ...while an unchecked write just ignores it.
/// let options = OplOptions::new().with_check_shape(false);
/// assert_eq!(to_string_with_options(&schema, &dat, options).unwrap(), "t = {\n<1>\n};\n");
/// ```
///
/// # Errors
///
/// Returns an error if the dataset can't be written.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(
    schema: &Schema,
    dataset: &Dataset,
    options: OplOptions,
) -> Result<String> {
    let mut serializer = Serializer::new(options);
    serializer.serialize(schema, dataset)?;
    Ok(serializer.into_inner())
}

/// Serialize a dataset to a writer as bracketed-table text.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, schema: &Schema, dataset: &Dataset) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, schema, dataset, OplOptions::default())
}

/// Serialize a dataset to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(
    mut writer: W,
    schema: &Schema,
    dataset: &Dataset,
    options: OplOptions,
) -> Result<()>
where
    W: io::Write,
{
    let text = to_string_with_options(schema, dataset, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Parse bracketed-table text into rows grouped by table.
///
/// # Examples
///
/// ```rust
/// use opl_text::{from_str, Value};
///
/// let tables = from_str("a = {\n<1,2>\n<3>\n};\n").unwrap();
/// assert_eq!(tables["a"], vec![
///     vec![Value::from(1), Value::from(2)],
///     vec![Value::from(3)],
/// ]);
/// ```
///
/// # Errors
///
/// Returns an error on the first malformed character, invalid number or
/// duplicate table, and on truncated input. Errors carry character positions.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Tables> {
    from_str_with_options(s, OplOptions::default())
}

/// Parse bracketed-table text with custom options.
///
/// # Errors
///
/// As [`from_str`]; truncated input is accepted when `options.strict` is off.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str_with_options(s: &str, options: OplOptions) -> Result<Tables> {
    Parser::new(options).parse(s)
}

/// Parse bracketed-table text from UTF-8 bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not valid UTF-8 or not valid text.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Tables> {
    let s = std::str::from_utf8(v).map_err(|e| Error::io(&e.to_string()))?;
    from_str(s)
}

/// Parse bracketed-table text from an I/O stream.
///
/// # Examples
///
/// ```rust
/// use opl_text::from_reader;
/// use std::io::Cursor;
///
/// let tables = from_reader(Cursor::new(b"t = {\n};\n")).unwrap();
/// assert!(tables["t"].is_empty());
/// ```
///
/// # Errors
///
/// Returns an error if reading fails or the text is not valid.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Tables>
where
    R: io::Read,
{
    let mut string = String::new();
    reader
        .read_to_string(&mut string)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_str(&string)
}

/// Parse bracketed-table text and rebuild a dataset for `schema`.
///
/// # Errors
///
/// Returns parse errors as [`from_str`] does, and [`Error::Shape`] if the rows
/// don't fit the schema.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_dataset(schema: &Schema, s: &str) -> Result<Dataset> {
    read_dataset_with_options(schema, s, OplOptions::default())
}

/// Parse bracketed-table text with custom options and rebuild a dataset.
///
/// # Errors
///
/// As [`read_dataset`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn read_dataset_with_options(schema: &Schema, s: &str, options: OplOptions) -> Result<Dataset> {
    let tables = from_str_with_options(s, options)?;
    Dataset::from_tables(schema, tables)
}
