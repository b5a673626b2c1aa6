//! Table schemas.
//!
//! A [`Schema`] is an ordered list of [`TableSchema`]s. Each table has a name,
//! a primary-key field list, a data field list and a [`TableKind`]. The kind is
//! an explicit tag, so code that handles keyed and plain tables differently
//! matches on it instead of inspecting field lists.
//!
//! ## Examples
//!
//! ```rust
//! use opl_text::{Schema, TableKind, TableSchema};
//!
//! let schema = Schema::new(vec![
//!     TableSchema::keyed("foods", ["name"], ["cost"]),
//!     TableSchema::plain("log", ["message"]),
//! ])
//! .unwrap();
//!
//! assert_eq!(schema.table("foods").unwrap().kind(), TableKind::Keyed);
//! assert_eq!(schema.table("log").unwrap().kind(), TableKind::Plain);
//! ```
//!
//! Schemas can also be loaded from JSON; the same invariants are checked:
//!
//! ```rust
//! use opl_text::Schema;
//!
//! let json = r#"[{"name": "foods", "kind": "keyed",
//!                 "primary_key_fields": ["name"], "data_fields": ["cost"]}]"#;
//! let schema: Schema = serde_json::from_str(json).unwrap();
//! assert_eq!(schema.len(), 1);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Characters that carry meaning outside a table body and so cannot appear in table names.
const RESERVED_NAME_CHARS: &[char] = &['=', '{', '}', ';', '<', '>', ',', '"'];

/// The kind of a table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableKind {
    /// Rows addressed by a primary key (non-empty key field list).
    Keyed,
    /// Ordered rows with no key.
    Plain,
    /// Rows produced lazily on demand. Cannot be written as text.
    Generator,
    /// Shape not statically known. Cannot be written as text.
    Generic,
}

impl TableKind {
    /// Returns `true` for kinds whose rows can be written as bracketed-table text.
    #[inline]
    #[must_use]
    pub const fn is_supported(self) -> bool {
        matches!(self, TableKind::Keyed | TableKind::Plain)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            TableKind::Keyed => "keyed",
            TableKind::Plain => "plain",
            TableKind::Generator => "generator",
            TableKind::Generic => "generic",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declaration of one table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    name: String,
    kind: TableKind,
    #[serde(default)]
    primary_key_fields: Vec<String>,
    #[serde(default)]
    data_fields: Vec<String>,
}

fn to_strings<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(Into::into).collect()
}

impl TableSchema {
    /// Declares a table, choosing [`TableKind::Keyed`] when `primary_key_fields`
    /// is non-empty and [`TableKind::Plain`] otherwise.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::{TableKind, TableSchema};
    ///
    /// let table = TableSchema::new("arcs", ["source", "dest"], ["capacity"]);
    /// assert_eq!(table.kind(), TableKind::Keyed);
    ///
    /// let table = TableSchema::new("notes", Vec::<String>::new(), ["text"]);
    /// assert_eq!(table.kind(), TableKind::Plain);
    /// ```
    pub fn new<P, D, S1, S2>(name: impl Into<String>, primary_key_fields: P, data_fields: D) -> Self
    where
        P: IntoIterator<Item = S1>,
        D: IntoIterator<Item = S2>,
        S1: Into<String>,
        S2: Into<String>,
    {
        let primary_key_fields = to_strings(primary_key_fields);
        let kind = if primary_key_fields.is_empty() {
            TableKind::Plain
        } else {
            TableKind::Keyed
        };
        TableSchema {
            name: name.into(),
            kind,
            primary_key_fields,
            data_fields: to_strings(data_fields),
        }
    }

    pub fn keyed<P, D, S1, S2>(name: impl Into<String>, primary_key_fields: P, data_fields: D) -> Self
    where
        P: IntoIterator<Item = S1>,
        D: IntoIterator<Item = S2>,
        S1: Into<String>,
        S2: Into<String>,
    {
        TableSchema {
            name: name.into(),
            kind: TableKind::Keyed,
            primary_key_fields: to_strings(primary_key_fields),
            data_fields: to_strings(data_fields),
        }
    }

    pub fn plain<D, S>(name: impl Into<String>, data_fields: D) -> Self
    where
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableSchema {
            name: name.into(),
            kind: TableKind::Plain,
            primary_key_fields: Vec::new(),
            data_fields: to_strings(data_fields),
        }
    }

    /// Declares a table whose rows are generated on demand.
    pub fn generator<D, S>(name: impl Into<String>, data_fields: D) -> Self
    where
        D: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TableSchema {
            name: name.into(),
            kind: TableKind::Generator,
            primary_key_fields: Vec::new(),
            data_fields: to_strings(data_fields),
        }
    }

    /// Declares a table whose fields are not known up front.
    pub fn generic(name: impl Into<String>) -> Self {
        TableSchema {
            name: name.into(),
            kind: TableKind::Generic,
            primary_key_fields: Vec::new(),
            data_fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn kind(&self) -> TableKind {
        self.kind
    }

    #[must_use]
    pub fn primary_key_fields(&self) -> &[String] {
        &self.primary_key_fields
    }

    #[must_use]
    pub fn data_fields(&self) -> &[String] {
        &self.data_fields
    }

    /// Number of values in one flattened row: key fields then data fields.
    #[must_use]
    pub fn row_width(&self) -> usize {
        self.primary_key_fields.len() + self.data_fields.len()
    }

    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::schema("table name can't be blank"));
        }
        if let Some(c) = self
            .name
            .chars()
            .find(|c| c.is_whitespace() || RESERVED_NAME_CHARS.contains(c))
        {
            return Err(Error::schema(format!(
                "table name '{}' contains reserved character {:?}",
                self.name, c
            )));
        }

        match self.kind {
            TableKind::Keyed if self.primary_key_fields.is_empty() => {
                return Err(Error::schema(format!(
                    "keyed table '{}' needs at least one primary key field",
                    self.name
                )));
            }
            TableKind::Plain | TableKind::Generator if !self.primary_key_fields.is_empty() => {
                return Err(Error::schema(format!(
                    "{} table '{}' can't declare primary key fields",
                    self.kind, self.name
                )));
            }
            _ => {}
        }

        let mut seen = HashSet::new();
        for field in self.primary_key_fields.iter().chain(&self.data_fields) {
            if !seen.insert(field.as_str()) {
                return Err(Error::schema(format!(
                    "table '{}' declares field '{}' more than once",
                    self.name, field
                )));
            }
        }
        Ok(())
    }
}

/// An ordered collection of uniquely named tables.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TableSchema>", into = "Vec<TableSchema>")]
pub struct Schema {
    tables: Vec<TableSchema>,
}

impl Schema {
    /// Builds a schema, checking table and field name invariants.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] if two tables share a name, a table repeats a
    /// field name, a name could not be read back from text, or a table's kind
    /// disagrees with its primary key fields.
    pub fn new(tables: Vec<TableSchema>) -> Result<Self> {
        let mut names = HashSet::new();
        for table in &tables {
            table.validate()?;
            if !names.insert(table.name.as_str()) {
                return Err(Error::schema(format!(
                    "duplicate table name '{}'",
                    table.name
                )));
            }
        }
        Ok(Schema { tables })
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableSchema> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// Returns an iterator over the tables in declaration order.
    pub fn tables(&self) -> std::slice::Iter<'_, TableSchema> {
        self.tables.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the tables the text format cannot carry (generator and generic tables).
    pub fn unsupported_tables(&self) -> impl Iterator<Item = &TableSchema> {
        self.tables.iter().filter(|t| !t.kind.is_supported())
    }
}

impl TryFrom<Vec<TableSchema>> for Schema {
    type Error = Error;

    fn try_from(tables: Vec<TableSchema>) -> Result<Self> {
        Schema::new(tables)
    }
}

impl From<Schema> for Vec<TableSchema> {
    fn from(schema: Schema) -> Self {
        schema.tables
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a TableSchema;
    type IntoIter = std::slice::Iter<'a, TableSchema>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.iter()
    }
}
