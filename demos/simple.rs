//! Write a dataset as bracketed-table text and read it back.
//!
//! Run with: cargo run --example simple

use opl_text::{from_str, key, record, to_string, Dataset, Schema, TableSchema};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let schema = Schema::new(vec![
        TableSchema::keyed("table_one", ["id"], ["name", "size"]),
        TableSchema::plain("table_two", ["label"]),
    ])?;

    let mut dat = Dataset::new();
    dat.insert_keyed("table_one", key!(1), record! { "name" => "a", "size" => 2.5 })?;
    dat.insert_keyed("table_one", key!(2), record! { "name" => "b", "size" => 3.0 })?;
    dat.push_plain("table_two", record! { "label" => "x" })?;

    let text = to_string(&schema, &dat)?;
    println!("Text output:\n{}", text);

    let tables = from_str(&text)?;
    assert_eq!(tables, dat.to_tables(&schema)?);
    println!("✓ Round-trip successful");

    Ok(())
}
