//! Bracketed-table serialization.
//!
//! This module provides the [`Serializer`], which writes a [`Dataset`] as
//! bracketed-table text using the table and field order of its [`Schema`].
//!
//! ## Output Format
//!
//! One block per table, in schema order, separated by a blank line:
//!
//! ```text
//! foods = {
//! <"milk", 0.89>
//! };
//!
//! log = {
//! };
//! ```
//!
//! Keyed rows start with the key components, followed by the data fields in
//! declared order. Plain rows contain the data fields only. Strings are
//! double-quoted with `"` escaped as `\"`; numbers are written as Rust prints
//! an `f64` (`3`, `2.5`, `inf`).
//!
//! ## Usage
//!
//! ```rust
//! use opl_text::{key, record, to_string, Dataset, Schema, TableSchema};
//!
//! let schema = Schema::new(vec![TableSchema::keyed("foods", ["name"], ["cost"])]).unwrap();
//! let mut dat = Dataset::new();
//! dat.insert_keyed("foods", key!("milk"), record! { "cost" => 0.89 }).unwrap();
//!
//! assert_eq!(to_string(&schema, &dat).unwrap(), "foods = {\n<\"milk\", 0.89>\n};\n");
//! ```

use crate::{Dataset, Error, OplOptions, Result, Row, Schema, Value};
use log::{debug, trace};

/// The bracketed-table serializer.
///
/// Created via [`Serializer::new`]; [`Serializer::serialize`] appends one
/// document to the output buffer.
pub struct Serializer {
    output: String,
    options: OplOptions,
}

impl Serializer {
    pub fn new(options: OplOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes `dataset` using the tables of `schema`.
    ///
    /// Nothing is appended to the output if an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTable`] if the schema declares generator or
    /// generic tables, [`Error::Shape`] if the dataset does not fit the schema,
    /// and [`Error::UnsupportedValue`] for strings ending in a backslash.
    pub fn serialize(&mut self, schema: &Schema, dataset: &Dataset) -> Result<()> {
        if let Some(table) = schema.unsupported_tables().next() {
            return Err(Error::unsupported_table(table.name(), table.kind().as_str()));
        }
        if self.options.check_shape {
            let problems = schema.check_dataset(dataset);
            if !problems.is_empty() {
                return Err(Error::shape(problems.join("\n")));
            }
        }

        let tables = dataset.to_tables(schema)?;
        let mut text = String::with_capacity(64 * tables.len());
        let mut rows_written = 0;
        for (i, (name, rows)) in tables.iter().enumerate() {
            if i > 0 {
                text.push('\n');
            }
            Self::write_table(&mut text, name, rows)?;
            rows_written += rows.len();
        }

        debug!(
            "serialized {} table(s), {} row(s), {} byte(s)",
            tables.len(),
            rows_written,
            text.len()
        );
        self.output.push_str(&text);
        Ok(())
    }

    fn write_table(out: &mut String, name: &str, rows: &[Row]) -> Result<()> {
        trace!("writing table '{}' with {} row(s)", name, rows.len());
        out.push_str(name);
        out.push_str(" = {\n");
        for row in rows {
            Self::write_row(out, name, row)?;
        }
        out.push_str("};\n");
        Ok(())
    }

    fn write_row(out: &mut String, table: &str, row: &[Value]) -> Result<()> {
        out.push('<');
        for (i, value) in row.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            if !value.is_representable() {
                return Err(Error::unsupported_value(format!(
                    "string {:?} in table '{}' ends with a backslash, which would escape its closing quote",
                    value.as_str().unwrap_or_default(),
                    table
                )));
            }
            out.push_str(&value.to_string());
        }
        out.push_str(">\n");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key, record, Record, TableSchema};

    fn serialize(schema: &Schema, dataset: &Dataset) -> Result<String> {
        let mut serializer = Serializer::new(OplOptions::default());
        serializer.serialize(schema, dataset)?;
        Ok(serializer.into_inner())
    }

    #[test]
    fn test_blocks_and_separators() {
        let schema = Schema::new(vec![
            TableSchema::keyed("table_one", ["id"], ["name", "size"]),
            TableSchema::plain("table_two", ["label"]),
        ])
        .unwrap();
        let mut dat = Dataset::new();
        dat.insert_keyed("table_one", key!(1), record! { "name" => "a", "size" => 2.5 })
            .unwrap();
        dat.insert_keyed("table_one", key!(2), record! { "size" => 3.0, "name" => "b" })
            .unwrap();
        dat.push_plain("table_two", record! { "label" => "x" }).unwrap();

        assert_eq!(
            serialize(&schema, &dat).unwrap(),
            "table_one = {\n<1, \"a\", 2.5>\n<2, \"b\", 3>\n};\n\ntable_two = {\n<\"x\">\n};\n"
        );
    }

    #[test]
    fn test_empty_table_block() {
        let schema = Schema::new(vec![TableSchema::plain("t", ["v"])]).unwrap();
        assert_eq!(serialize(&schema, &Dataset::new()).unwrap(), "t = {\n};\n");
    }

    #[test]
    fn test_compound_keys_lead_the_row() {
        let schema =
            Schema::new(vec![TableSchema::keyed("arcs", ["from", "to"], ["cap"])]).unwrap();
        let mut dat = Dataset::new();
        dat.insert_keyed("arcs", key!("Boston", "Denver"), record! { "cap" => 120 })
            .unwrap();
        assert_eq!(
            serialize(&schema, &dat).unwrap(),
            "arcs = {\n<\"Boston\", \"Denver\", 120>\n};\n"
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let schema = Schema::new(vec![TableSchema::plain("t", ["v"])]).unwrap();
        let mut dat = Dataset::new();
        dat.push_plain("t", record! { "v" => "he said \"hi\"" }).unwrap();
        assert_eq!(
            serialize(&schema, &dat).unwrap(),
            "t = {\n<\"he said \\\"hi\\\"\">\n};\n"
        );
    }

    #[test]
    fn test_rejects_generator_and_generic_tables() {
        for table in [TableSchema::generator("g", ["v"]), TableSchema::generic("g")] {
            let schema = Schema::new(vec![TableSchema::plain("ok", ["v"]), table]).unwrap();
            let err = serialize(&schema, &Dataset::new()).unwrap_err();
            assert!(matches!(err, Error::UnsupportedTable { ref table, .. } if table == "g"));
        }
    }

    #[test]
    fn test_shape_problems_are_collected() {
        let schema = Schema::new(vec![TableSchema::keyed("t", ["k"], ["v"])]).unwrap();
        let mut dat = Dataset::new();
        dat.insert_keyed("t", key!(1), record! { "w" => 1 }).unwrap();
        dat.push_plain("extra", Record::new()).unwrap();

        let err = serialize(&schema, &dat).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'extra' is not in the schema"), "{}", msg);
        assert!(msg.contains("missing data field 'v'"), "{}", msg);
        assert!(msg.contains("unknown field 'w'"), "{}", msg);
    }

    #[test]
    fn test_unchecked_shape_tolerates_extra_fields() {
        let schema = Schema::new(vec![TableSchema::plain("t", ["v"])]).unwrap();
        let mut dat = Dataset::new();
        dat.push_plain("t", record! { "v" => 1, "note" => "ignored" })
            .unwrap();

        let mut serializer = Serializer::new(OplOptions::new().with_check_shape(false));
        serializer.serialize(&schema, &dat).unwrap();
        assert_eq!(serializer.into_inner(), "t = {\n<1>\n};\n");
    }

    #[test]
    fn test_trailing_backslash_rejected() {
        let schema = Schema::new(vec![TableSchema::plain("t", ["v"])]).unwrap();
        let mut dat = Dataset::new();
        dat.push_plain("t", record! { "v" => "C:\\" }).unwrap();

        let mut serializer = Serializer::new(OplOptions::default());
        let err = serializer.serialize(&schema, &dat).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue(_)));
        assert!(serializer.into_inner().is_empty());
    }
}
