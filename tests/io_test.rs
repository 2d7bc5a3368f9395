use std::fs;

use colframe::io::{
    read_csv, read_csv_from_reader, read_json, read_json_str, to_json_string, write_csv,
    write_csv_to_writer, write_json,
};
use colframe::{CsvSettings, DataFrame, Series, SeriesType, Value};
use tempfile::tempdir;

fn people() -> DataFrame {
    DataFrame::new(vec![
        Series::new(vec!["Alice", "Bob", "Charlie"], SeriesType::String, "name"),
        Series::new(vec![Some(30), None, Some(35)], SeriesType::Int, "age"),
    ])
    .unwrap()
}

#[test]
fn test_csv_roundtrip_through_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.csv");
    let settings = CsvSettings::default().null_token("NA");

    write_csv(&people(), &path, &settings).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    assert_eq!(contents, "name,age\nAlice,30\nBob,NA\nCharlie,35\n");

    let df = read_csv(&path, &settings).unwrap();
    assert_eq!(df.shape(), (3, 2));
    assert_eq!(df.names(), vec!["name", "age"]);
    // reading yields string columns
    assert_eq!(df.column("age").unwrap().series_type(), SeriesType::String);
    assert_eq!(df.at(0, 1).unwrap(), Value::from("30"));
    assert!(df.column("age").unwrap().is_null(1));
}

#[test]
fn test_csv_without_header() {
    let data = "1,x\n2,y\n";
    let settings = CsvSettings::default().header(false);
    let df = read_csv_from_reader(data.as_bytes(), &settings).unwrap();
    assert_eq!(df.names(), vec!["Column 0", "Column 1"]);
    assert_eq!(df.nrows(), 2);
    assert_eq!(df.at(0, 1).unwrap(), Value::from("x"));
}

#[test]
fn test_csv_separator_and_empty_as_null() {
    let data = "a;b\n1;\n;2\n";
    let settings = CsvSettings::new().separator(';').treat_empty_as_null(true);
    let df = read_csv_from_reader(data.as_bytes(), &settings).unwrap();
    assert_eq!(df.column("a").unwrap().null_mask(), vec![false, true]);
    assert_eq!(df.column("b").unwrap().null_mask(), vec![true, false]);

    let plain = read_csv_from_reader(data.as_bytes(), &CsvSettings::new().separator(';')).unwrap();
    assert_eq!(plain.at(0, 1).unwrap(), Value::from(""));
    assert!(read_csv_from_reader(data.as_bytes(), &CsvSettings::new().separator('€')).is_err());
}

#[test]
fn test_csv_skip_rows_and_index_column() {
    let data = "id,v\nr0,1\nr1,2\nr2,3\n";
    let settings = CsvSettings::default().skip_rows([1]).index_column("id");
    let df = read_csv_from_reader(data.as_bytes(), &settings).unwrap();
    assert_eq!(df.names(), vec!["v"]);
    assert_eq!(df.index().to_string(), "{id [r0 r2] string}");

    let mut out = Vec::new();
    write_csv_to_writer(&df, &mut out, &settings).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "id,v\nr0,1\nr2,3\n");

    let missing = CsvSettings::default().index_column("nope");
    assert!(read_csv_from_reader(data.as_bytes(), &missing).is_err());
}

#[test]
fn test_csv_errors() {
    let dir = tempdir().unwrap();
    assert!(read_csv(dir.path().join("missing.csv"), &CsvSettings::default()).is_err());
    assert!(read_csv_from_reader("".as_bytes(), &CsvSettings::default()).is_err());
    // ragged records
    assert!(read_csv_from_reader("a,b\n1\n".as_bytes(), &CsvSettings::default()).is_err());
}

#[test]
fn test_csv_settings_deserialize_with_defaults() {
    let settings: CsvSettings = serde_json::from_str(r#"{"separator": "\t"}"#).unwrap();
    assert!(settings.header);
    assert_eq!(settings.separator, '\t');
    assert_eq!(settings.null_token, None);
}

#[test]
fn test_json_read() {
    let text = r#"[
        {"name": "Alice", "age": 30, "ok": true},
        {"name": "Bob", "age": null, "ok": false},
        {"name": "Eve", "ok": true}
    ]"#;
    let df = read_json_str(text).unwrap();
    assert_eq!(df.names(), vec!["age", "name", "ok"]);
    assert_eq!(df.at(0, 0).unwrap(), Value::from("30"));
    assert_eq!(df.at(1, 2).unwrap(), Value::from("false"));
    assert_eq!(df.column("age").unwrap().null_mask(), vec![false, true, true]);

    assert!(read_json_str("[]").is_err());
    assert!(read_json_str("{\"a\": 1}").is_err());
}

#[test]
fn test_json_write_keeps_types() {
    let df = DataFrame::new(vec![
        Series::new(vec![1, 2], SeriesType::Int, "i"),
        Series::new(vec![Some(0.5), None], SeriesType::Float, "f"),
        Series::new(vec![true, false], SeriesType::Boolean, "b"),
    ])
    .unwrap();
    let text = to_json_string(&df).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(
        parsed,
        serde_json::json!([
            {"i": 1, "f": 0.5, "b": true},
            {"i": 2, "f": null, "b": false}
        ])
    );
    assert!(text.contains("\n  {"));
}

#[test]
fn test_json_file_roundtrip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("people.json");
    write_json(&people(), &path).unwrap();

    let df = read_json(&path).unwrap();
    assert_eq!(df.names(), vec!["age", "name"]);
    assert_eq!(df.column("name").unwrap().to_string(), "{name [Alice Bob Charlie] string}");
    assert_eq!(df.column("age").unwrap().to_string(), "{age [30 NA 35] string}");
}
