use opl_text::{
    from_str, from_str_with_options, key, read_dataset, record, to_string,
    to_string_with_options, Dataset, Error, Key, OplOptions, Record, Schema, TableData,
    TableKind, TableSchema, Value,
};

fn netflow_schema() -> Schema {
    Schema::new(vec![
        TableSchema::keyed("commodities", ["name"], Vec::<String>::new()),
        TableSchema::keyed("nodes", ["name"], Vec::<String>::new()),
        TableSchema::keyed("arcs", ["source", "destination"], ["capacity"]),
        TableSchema::keyed("cost", ["commodity", "source", "destination"], ["cost"]),
        TableSchema::keyed("inflow", ["commodity", "node"], ["quantity"]),
        TableSchema::plain("notes", ["author", "text"]),
    ])
    .unwrap()
}

fn netflow_dataset() -> Dataset {
    let mut dat = Dataset::new();
    for c in ["Pencils", "Pens"] {
        dat.insert_keyed("commodities", key!(c), Record::new()).unwrap();
    }
    for n in ["Detroit", "Denver", "Boston", "New York", "Seattle"] {
        dat.insert_keyed("nodes", key!(n), Record::new()).unwrap();
    }
    for (s, d, cap) in [
        ("Detroit", "Boston", 100.0),
        ("Detroit", "New York", 80.0),
        ("Denver", "Seattle", 120.0),
    ] {
        dat.insert_keyed("arcs", key!(s, d), record! { "capacity" => cap })
            .unwrap();
    }
    for (c, s, d, cost) in [
        ("Pencils", "Detroit", "Boston", 10.0),
        ("Pens", "Denver", "Seattle", 30.5),
    ] {
        dat.insert_keyed("cost", key!(c, s, d), record! { "cost" => cost })
            .unwrap();
    }
    for (c, n, q) in [("Pencils", "Detroit", 50.0), ("Pencils", "Boston", -50.0)] {
        dat.insert_keyed("inflow", key!(c, n), record! { "quantity" => q })
            .unwrap();
    }
    dat.push_plain(
        "notes",
        record! { "author" => "ops", "text" => "capacities are \"soft\" limits" },
    )
    .unwrap();
    dat
}

#[test]
fn test_full_document_text() {
    let text = to_string(&netflow_schema(), &netflow_dataset()).unwrap();
    println!("Netflow text:\n{}", text);

    assert!(text.starts_with("commodities = {\n<\"Pencils\">\n<\"Pens\">\n};\n\nnodes = {\n"));
    assert!(text.contains("arcs = {\n<\"Detroit\", \"Boston\", 100>\n"));
    assert!(text.contains("<\"Pens\", \"Denver\", \"Seattle\", 30.5>\n"));
    assert!(text.contains("<\"Pencils\", \"Boston\", -50>\n"));
    assert!(text.ends_with("notes = {\n<\"ops\", \"capacities are \\\"soft\\\" limits\">\n};\n"));
    assert_eq!(text.matches("};\n\n").count(), 5);
}

#[test]
fn test_parse_matches_flattened_rows() {
    let schema = netflow_schema();
    let dat = netflow_dataset();
    let tables = from_str(&to_string(&schema, &dat).unwrap()).unwrap();
    let expected = dat.to_tables(&schema).unwrap();

    assert_eq!(tables.len(), expected.len());
    for (name, rows) in &expected {
        assert_eq!(&tables[name.as_str()], rows, "table {}", name);
    }
}

#[test]
fn test_reserialization_is_stable() {
    let schema = netflow_schema();
    let text = to_string(&schema, &netflow_dataset()).unwrap();
    let back = read_dataset(&schema, &text).unwrap();
    assert_eq!(to_string(&schema, &back).unwrap(), text);
}

#[test]
fn test_read_dataset_uses_scalar_and_compound_keys() {
    let schema = netflow_schema();
    let dat = read_dataset(&schema, &to_string(&schema, &netflow_dataset()).unwrap()).unwrap();

    match dat.table("nodes") {
        Some(TableData::Keyed(rows)) => {
            assert!(rows.contains_key(&Key::Scalar(Value::from("Seattle"))));
        }
        other => panic!("Expected keyed nodes, got {:?}", other),
    }
    match dat.table("arcs") {
        Some(TableData::Keyed(rows)) => {
            let cap = rows
                .get(&key!("Denver", "Seattle"))
                .and_then(|r| r.get("capacity"))
                .and_then(Value::as_f64);
            assert_eq!(cap, Some(120.0));
        }
        other => panic!("Expected keyed arcs, got {:?}", other),
    }
    assert_eq!(dat.table("notes").map(TableData::kind), Some(TableKind::Plain));
}

#[test]
fn test_read_dataset_rejects_ragged_rows() {
    let schema = Schema::new(vec![TableSchema::keyed("t", ["k"], ["v"])]).unwrap();
    // The parser accepts ragged rows; fitting them to the schema does not.
    assert!(from_str("t = {\n<1,2>\n<3>\n};\n").is_ok());
    let err = read_dataset(&schema, "t = {\n<1,2>\n<3>\n};\n").unwrap_err();
    assert!(matches!(err, Error::Shape(ref m) if m.contains("row 1")));
}

#[test]
fn test_generator_table_rejected_even_when_unused() {
    let schema = Schema::new(vec![
        TableSchema::plain("t", ["v"]),
        TableSchema::generator("lazy", ["v"]),
    ])
    .unwrap();
    let err = to_string(&schema, &Dataset::new()).unwrap_err();
    assert_eq!(err, Error::unsupported_table("lazy", "generator"));
}

#[test]
fn test_plain_rows_keep_order_and_duplicates() {
    let schema = Schema::new(vec![TableSchema::plain("log", ["event"])]).unwrap();
    let mut dat = Dataset::new();
    for event in ["start", "tick", "tick", "stop"] {
        dat.push_plain("log", record! { "event" => event }).unwrap();
    }
    let text = to_string(&schema, &dat).unwrap();
    assert_eq!(
        text,
        "log = {\n<\"start\">\n<\"tick\">\n<\"tick\">\n<\"stop\">\n};\n"
    );
    assert_eq!(read_dataset(&schema, &text).unwrap(), dat);
}

#[test]
fn test_lenient_options_roundtrip_partial_documents() {
    let tables =
        from_str_with_options("a = {\n<1>\n};\nb = {\n<2>\n<3", OplOptions::lenient()).unwrap();
    assert_eq!(tables["a"].len(), 1);
    assert_eq!(tables["b"], vec![vec![Value::from(2)]]);
}

#[test]
fn test_shape_check_can_be_disabled() {
    let schema = Schema::new(vec![TableSchema::plain("t", ["v"])]).unwrap();
    let mut dat = Dataset::new();
    dat.push_plain("t", record! { "v" => 1 }).unwrap();
    dat.push_plain("unknown", record! { "v" => 1 }).unwrap();

    assert!(to_string(&schema, &dat).is_err());
    let text =
        to_string_with_options(&schema, &dat, OplOptions::new().with_check_shape(false)).unwrap();
    assert_eq!(text, "t = {\n<1>\n};\n");
}
