//! Read a diet problem's input tables, check them, and write them out again.
//!
//! Run with: cargo run --example diet

use opl_text::{read_dataset, to_string, Error, Schema, TableData, TableSchema};

const DIET_DAT: &str = r#"
categories = {
<"calories", 1800, 2200>
<"protein", 91, inf>
<"fat", 0, 65>
<"sodium", 0, 1779>
};

foods = {
<"hamburger", 2.49>
<"chicken", 2.89>
<"hot dog", 1.5>
<"milk", 0.89>
};

nutrition = {
<"hamburger", "calories", 410> <"hamburger", "protein", 24>
<"chicken", "calories", 420> <"chicken", "protein", 32>
<"hot dog", "calories", 560> <"hot dog", "fat", 32>
<"milk", "calories", 110> <"milk", "sodium", 107>
};
"#;

fn main() -> Result<(), Error> {
    let schema: Schema = Schema::new(vec![
        TableSchema::keyed("categories", ["name"], ["min_nutrition", "max_nutrition"]),
        TableSchema::keyed("foods", ["name"], ["cost"]),
        TableSchema::keyed("nutrition", ["food", "category"], ["quantity"]),
    ])?;

    let dat = read_dataset(&schema, DIET_DAT)?;
    for (name, data) in dat.tables() {
        let kind = match data {
            TableData::Keyed(_) => "keyed",
            TableData::Plain(_) => "plain",
        };
        println!("{:<12} {:>3} {} row(s)", name, data.len(), kind);
    }

    println!("\nNormalized text:\n{}", to_string(&schema, &dat)?);

    match read_dataset(&schema, "foods = {\n<\"milk\", 0.89x>\n};\n") {
        Err(err) => println!("Bad input reported as: {}", err),
        Ok(_) => println!("unexpectedly parsed bad input"),
    }
    Ok(())
}
