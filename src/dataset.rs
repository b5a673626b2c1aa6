//! In-memory relational data.
//!
//! A [`Dataset`] holds one [`TableData`] container per table. Keyed tables map a
//! [`Key`] to a [`Record`]; plain tables are an ordered list of records. Which
//! container a table uses is an explicit enum case, matching the schema's
//! [`TableKind`](crate::TableKind).
//!
//! Flattening ([`Dataset::to_tables`]) turns every container into the ordered
//! rows that the text format carries, and [`Dataset::from_tables`] rebuilds a
//! dataset from parsed rows.
//!
//! ## Examples
//!
//! ```rust
//! use opl_text::{key, record, Dataset, Schema, TableSchema, Value};
//!
//! let schema = Schema::new(vec![TableSchema::keyed("foods", ["name"], ["cost"])]).unwrap();
//!
//! let mut dat = Dataset::new();
//! dat.insert_keyed("foods", key!("milk"), record! { "cost" => 0.89 }).unwrap();
//!
//! let tables = dat.to_tables(&schema).unwrap();
//! assert_eq!(tables["foods"], vec![vec![Value::from("milk"), Value::from(0.89)]]);
//! ```

use crate::{Error, Record, Result, Row, Schema, TableKind, TableSchema, Tables, Value};
use indexmap::IndexMap;
use std::hash::{Hash, Hasher};

/// The primary key of a row in a keyed table.
///
/// Keys compare by their components, so `Scalar(v)` and `Compound(vec![v])`
/// address the same row.
#[derive(Clone, Debug)]
pub enum Key {
    /// A key made of one field.
    Scalar(Value),
    /// A key made of several fields, in primary-key field order.
    Compound(Vec<Value>),
}

impl Key {
    /// Returns the key's values in primary-key field order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::{Key, Value};
    ///
    /// assert_eq!(Key::from("a").components(), &[Value::from("a")]);
    /// assert_eq!(Key::from(vec![Value::from(1), Value::from(2)]).components().len(), 2);
    /// ```
    #[must_use]
    pub fn components(&self) -> &[Value] {
        match self {
            Key::Scalar(v) => std::slice::from_ref(v),
            Key::Compound(vs) => vs,
        }
    }

    #[must_use]
    pub fn arity(&self) -> usize {
        self.components().len()
    }

    /// Builds a key from row values: a scalar for one value, compound otherwise.
    #[must_use]
    pub fn from_values(mut values: Vec<Value>) -> Self {
        if values.len() == 1 {
            Key::Scalar(values.remove(0))
        } else {
            Key::Compound(values)
        }
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.components() == other.components()
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.components().hash(state);
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Key::Scalar(value)
    }
}

impl From<&str> for Key {
    fn from(value: &str) -> Self {
        Key::Scalar(Value::from(value))
    }
}

impl From<String> for Key {
    fn from(value: String) -> Self {
        Key::Scalar(Value::from(value))
    }
}

impl From<f64> for Key {
    fn from(value: f64) -> Self {
        Key::Scalar(Value::from(value))
    }
}

impl From<i32> for Key {
    fn from(value: i32) -> Self {
        Key::Scalar(Value::from(value))
    }
}

impl From<Vec<Value>> for Key {
    fn from(values: Vec<Value>) -> Self {
        Key::Compound(values)
    }
}

/// The rows of one table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TableData {
    Keyed(IndexMap<Key, Record>),
    Plain(Vec<Record>),
}

impl TableData {
    /// Creates an empty container of the right variant for `kind`.
    ///
    /// Generator and generic tables get a plain container; they are rejected
    /// before anything is written.
    #[must_use]
    pub fn empty_for(kind: TableKind) -> Self {
        match kind {
            TableKind::Keyed => TableData::Keyed(IndexMap::new()),
            _ => TableData::Plain(Vec::new()),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            TableData::Keyed(rows) => rows.len(),
            TableData::Plain(rows) => rows.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn kind(&self) -> TableKind {
        match self {
            TableData::Keyed(_) => TableKind::Keyed,
            TableData::Plain(_) => TableKind::Plain,
        }
    }
}

/// One container per table, in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    tables: IndexMap<String, TableData>,
}

impl Dataset {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a dataset with an empty container for every table in `schema`.
    #[must_use]
    pub fn empty(schema: &Schema) -> Self {
        Dataset {
            tables: schema
                .tables()
                .map(|t| (t.name().to_string(), TableData::empty_for(t.kind())))
                .collect(),
        }
    }

    /// Sets the rows of a table, returning its previous rows.
    pub fn set_table(&mut self, name: impl Into<String>, data: TableData) -> Option<TableData> {
        self.tables.insert(name.into(), data)
    }

    #[must_use]
    pub fn table(&self, name: &str) -> Option<&TableData> {
        self.tables.get(name)
    }

    /// Returns an iterator over `(name, rows)` pairs in insertion order.
    pub fn tables(&self) -> indexmap::map::Iter<'_, String, TableData> {
        self.tables.iter()
    }

    /// Inserts a row into a keyed table, creating the table if needed.
    ///
    /// Returns the record previously stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `table` already holds plain rows.
    pub fn insert_keyed(
        &mut self,
        table: &str,
        key: impl Into<Key>,
        record: Record,
    ) -> Result<Option<Record>> {
        match self
            .tables
            .entry(table.to_string())
            .or_insert_with(|| TableData::Keyed(IndexMap::new()))
        {
            TableData::Keyed(rows) => Ok(rows.insert(key.into(), record)),
            TableData::Plain(_) => Err(Error::shape(format!(
                "table '{}' holds plain rows, can't insert a keyed row",
                table
            ))),
        }
    }

    /// Appends a row to a plain table, creating the table if needed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] if `table` already holds keyed rows.
    pub fn push_plain(&mut self, table: &str, record: Record) -> Result<()> {
        match self
            .tables
            .entry(table.to_string())
            .or_insert_with(|| TableData::Plain(Vec::new()))
        {
            TableData::Plain(rows) => {
                rows.push(record);
                Ok(())
            }
            TableData::Keyed(_) => Err(Error::shape(format!(
                "table '{}' holds keyed rows, can't append a plain row",
                table
            ))),
        }
    }

    /// Flattens every table declared by `schema` into ordered rows.
    ///
    /// Keyed rows are the key components followed by the data fields in
    /// declared order; plain rows are the data fields alone. Tables missing from
    /// the dataset flatten to no rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedTable`] for generator or generic tables, and
    /// [`Error::Shape`] when a container has the wrong variant, a key has the
    /// wrong arity, or a record lacks a data field.
    pub fn to_tables(&self, schema: &Schema) -> Result<Tables> {
        let mut tables = Tables::with_capacity(schema.len());
        for table in schema {
            let rows = match self.tables.get(table.name()) {
                Some(data) => flatten_table(table, data)?,
                None => {
                    if !table.kind().is_supported() {
                        return Err(Error::unsupported_table(table.name(), table.kind().as_str()));
                    }
                    Vec::new()
                }
            };
            tables.insert(table.name().to_string(), rows);
        }
        Ok(tables)
    }

    /// Rebuilds a dataset from parsed rows.
    ///
    /// Each row must hold exactly one value per key and data field. For keyed
    /// tables the leading values form the key. Tables declared by `schema` but
    /// absent from `tables` come back empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Shape`] for tables unknown to the schema, rows of the
    /// wrong width, or repeated keys, and [`Error::UnsupportedTable`] for
    /// generator or generic tables.
    pub fn from_tables(schema: &Schema, tables: Tables) -> Result<Self> {
        let mut dataset = Dataset::empty(schema);
        for (name, rows) in tables {
            let table = schema
                .table(&name)
                .ok_or_else(|| Error::shape(format!("table '{}' is not in the schema", name)))?;
            let data = unflatten_table(table, rows)?;
            dataset.tables.insert(name, data);
        }
        Ok(dataset)
    }
}

impl Schema {
    /// Checks that `dataset` fits this schema, returning one message per distinct problem.
    ///
    /// An empty result means the dataset can be flattened. Tables the schema
    /// declares but the dataset lacks are fine; they are written empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opl_text::{record, Dataset, Schema, TableSchema};
    ///
    /// let schema = Schema::new(vec![TableSchema::plain("notes", ["text"])]).unwrap();
    /// let mut dat = Dataset::new();
    /// dat.push_plain("notes", record! { "txt" => "typo" }).unwrap();
    ///
    /// let problems = schema.check_dataset(&dat);
    /// assert_eq!(problems.len(), 2);
    /// ```
    #[must_use]
    pub fn check_dataset(&self, dataset: &Dataset) -> Vec<String> {
        let mut problems = Vec::new();
        let mut report = |msg: String| {
            if !problems.contains(&msg) {
                problems.push(msg);
            }
        };

        for (name, data) in dataset.tables() {
            let Some(table) = self.table(name) else {
                report(format!("table '{}' is not in the schema", name));
                continue;
            };
            if !table.kind().is_supported() {
                continue;
            }
            if table.kind() != data.kind() {
                report(format!(
                    "table '{}' is declared {} but holds {} rows",
                    name,
                    table.kind(),
                    data.kind()
                ));
                continue;
            }

            let key_width = table.primary_key_fields().len();
            let records: Box<dyn Iterator<Item = &Record>> = match data {
                TableData::Keyed(rows) => {
                    for key in rows.keys().filter(|k| k.arity() != key_width) {
                        report(format!(
                            "table '{}' has a key with {} value(s), expected {}",
                            name,
                            key.arity(),
                            key_width
                        ));
                    }
                    Box::new(rows.values())
                }
                TableData::Plain(rows) => Box::new(rows.iter()),
            };

            for record in records {
                for field in table.data_fields() {
                    if !record.contains_field(field) {
                        report(format!(
                            "table '{}' has a row missing data field '{}'",
                            name, field
                        ));
                    }
                }
                for field in record.fields() {
                    if !table.data_fields().contains(field) {
                        report(format!(
                            "table '{}' has a row with unknown field '{}'",
                            name, field
                        ));
                    }
                }
            }
        }
        problems
    }
}

fn data_values(table: &TableSchema, record: &Record, row: &mut Row) -> Result<()> {
    for field in table.data_fields() {
        let value = record.get(field).ok_or_else(|| {
            Error::shape(format!(
                "table '{}' has a row missing data field '{}'",
                table.name(),
                field
            ))
        })?;
        row.push(value.clone());
    }
    Ok(())
}

fn flatten_table(table: &TableSchema, data: &TableData) -> Result<Vec<Row>> {
    match (table.kind(), data) {
        (TableKind::Keyed, TableData::Keyed(rows)) => {
            let key_width = table.primary_key_fields().len();
            rows.iter()
                .map(|(key, record)| {
                    if key.arity() != key_width {
                        return Err(Error::shape(format!(
                            "table '{}' has a key with {} value(s), expected {}",
                            table.name(),
                            key.arity(),
                            key_width
                        )));
                    }
                    let mut row = Vec::with_capacity(table.row_width());
                    row.extend_from_slice(key.components());
                    data_values(table, record, &mut row)?;
                    Ok(row)
                })
                .collect()
        }
        (TableKind::Plain, TableData::Plain(rows)) => rows
            .iter()
            .map(|record| {
                let mut row = Vec::with_capacity(table.row_width());
                data_values(table, record, &mut row)?;
                Ok(row)
            })
            .collect(),
        (kind, _) if !kind.is_supported() => {
            Err(Error::unsupported_table(table.name(), kind.as_str()))
        }
        (kind, data) => Err(Error::shape(format!(
            "table '{}' is declared {} but holds {} rows",
            table.name(),
            kind,
            data.kind()
        ))),
    }
}

fn unflatten_table(table: &TableSchema, rows: Vec<Row>) -> Result<TableData> {
    if !table.kind().is_supported() {
        return Err(Error::unsupported_table(table.name(), table.kind().as_str()));
    }
    let width = table.row_width();
    let key_width = table.primary_key_fields().len();
    let mut data = TableData::empty_for(table.kind());

    for (index, mut row) in rows.into_iter().enumerate() {
        if row.len() != width {
            return Err(Error::shape(format!(
                "row {} of table '{}' has {} value(s), expected {}",
                index,
                table.name(),
                row.len(),
                width
            )));
        }
        let values = row.split_off(key_width);
        let record: Record = table
            .data_fields()
            .iter()
            .cloned()
            .zip(values)
            .collect();

        match &mut data {
            TableData::Keyed(keyed) => {
                let key = Key::from_values(row);
                if keyed.contains_key(&key) {
                    return Err(Error::shape(format!(
                        "row {} of table '{}' repeats primary key {:?}",
                        index,
                        table.name(),
                        key.components()
                    )));
                }
                keyed.insert(key, record);
            }
            TableData::Plain(plain) => plain.push(record),
        }
    }
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{key, record};

    fn schema() -> Schema {
        Schema::new(vec![
            TableSchema::keyed("arcs", ["source", "dest"], ["capacity"]),
            TableSchema::keyed("nodes", ["name"], Vec::<String>::new()),
            TableSchema::plain("notes", ["text", "weight"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_flatten_keyed_and_plain() {
        let mut dat = Dataset::new();
        dat.insert_keyed("arcs", key!("a", "b"), record! { "capacity" => 10 })
            .unwrap();
        dat.insert_keyed("nodes", key!("a"), Record::new()).unwrap();
        dat.push_plain("notes", record! { "weight" => 1.5, "text" => "x" })
            .unwrap();

        let tables = dat.to_tables(&schema()).unwrap();
        assert_eq!(
            tables["arcs"],
            vec![vec![Value::from("a"), Value::from("b"), Value::from(10)]]
        );
        assert_eq!(tables["nodes"], vec![vec![Value::from("a")]]);
        assert_eq!(tables["notes"], vec![vec![Value::from("x"), Value::from(1.5)]]);
    }

    #[test]
    fn test_missing_tables_flatten_empty() {
        let tables = Dataset::new().to_tables(&schema()).unwrap();
        let names: Vec<_> = tables.keys().cloned().collect();
        assert_eq!(names, vec!["arcs", "nodes", "notes"]);
        assert!(tables.values().all(Vec::is_empty));
    }

    #[test]
    fn test_single_field_compound_key_flattens() {
        let mut dat = Dataset::new();
        dat.insert_keyed("nodes", Key::Compound(vec![Value::from("z")]), Record::new())
            .unwrap();
        let tables = dat.to_tables(&schema()).unwrap();
        assert_eq!(tables["nodes"], vec![vec![Value::from("z")]]);
    }

    #[test]
    fn test_scalar_and_single_compound_key_are_one_row() {
        let mut dat = Dataset::new();
        dat.insert_keyed("nodes", Key::Scalar(Value::from("a")), Record::new())
            .unwrap();
        let previous = dat
            .insert_keyed("nodes", Key::Compound(vec![Value::from("a")]), Record::new())
            .unwrap();
        assert_eq!(previous, Some(Record::new()));
        assert_eq!(dat.table("nodes").map(TableData::len), Some(1));
        assert!(schema().check_dataset(&dat).is_empty());

        let text = crate::to_string(&schema(), &dat).unwrap();
        assert!(text.contains("nodes = {\n<\"a\">\n};\n"), "{}", text);
        let back = crate::read_dataset(&schema(), &text).unwrap();
        assert_eq!(crate::to_string(&schema(), &back).unwrap(), text);
    }

    #[test]
    fn test_wrong_key_arity_fails() {
        let mut dat = Dataset::new();
        dat.insert_keyed("arcs", key!("a"), record! { "capacity" => 1 })
            .unwrap();
        let err = dat.to_tables(&schema()).unwrap_err();
        assert!(err.to_string().contains("key with 1 value(s), expected 2"));
    }

    #[test]
    fn test_missing_data_field_fails() {
        let mut dat = Dataset::new();
        dat.push_plain("notes", record! { "text" => "x" }).unwrap();
        let err = dat.to_tables(&schema()).unwrap_err();
        assert!(err.to_string().contains("missing data field 'weight'"));
    }

    #[test]
    fn test_wrong_container_variant_fails() {
        let mut dat = Dataset::new();
        dat.push_plain("arcs", Record::new()).unwrap();
        let err = dat.to_tables(&schema()).unwrap_err();
        assert!(err.to_string().contains("declared keyed but holds plain rows"));
    }

    #[test]
    fn test_mixed_inserts_rejected() {
        let mut dat = Dataset::new();
        dat.push_plain("t", Record::new()).unwrap();
        assert!(dat.insert_keyed("t", key!(1), Record::new()).is_err());
    }

    #[test]
    fn test_from_tables_rebuilds_dataset() {
        let mut tables = Tables::new();
        tables.insert(
            "arcs".to_string(),
            vec![vec![Value::from("a"), Value::from("b"), Value::from(3)]],
        );
        tables.insert(
            "notes".to_string(),
            vec![vec![Value::from("hello"), Value::from(0.5)]],
        );
        let dat = Dataset::from_tables(&schema(), tables).unwrap();

        match dat.table("arcs") {
            Some(TableData::Keyed(rows)) => {
                assert_eq!(rows.get(&key!("a", "b")), Some(&record! { "capacity" => 3 }));
            }
            other => panic!("Expected keyed table, got {:?}", other),
        }
        assert_eq!(dat.table("nodes").map(TableData::len), Some(0));
        assert_eq!(dat.table("notes").map(TableData::kind), Some(TableKind::Plain));
    }

    #[test]
    fn test_from_tables_rejects_bad_rows() {
        let mut tables = Tables::new();
        tables.insert("notes".to_string(), vec![vec![Value::from("x")]]);
        assert!(Dataset::from_tables(&schema(), tables).is_err());

        let mut tables = Tables::new();
        tables.insert("nodes".to_string(), vec![vec![Value::from("a")], vec![Value::from("a")]]);
        let err = Dataset::from_tables(&schema(), tables).unwrap_err();
        assert!(err.to_string().contains("repeats primary key"));

        let mut tables = Tables::new();
        tables.insert("unknown".to_string(), Vec::new());
        assert!(Dataset::from_tables(&schema(), tables).is_err());
    }
}
