use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::{SeriesType, Value};

/// Reads a JSON file holding an array of objects into a DataFrame of String columns
pub fn read_json<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let text = fs::read_to_string(path.as_ref())?;
    read_json_str(&text)
}

/// Parses an array of objects into a DataFrame of String columns
///
/// Column names come from the first object, sorted. Missing keys and `null`
/// become NA; every other value is stored as its text form.
pub fn read_json_str(text: &str) -> Result<DataFrame> {
    let records: Vec<Map<String, JsonValue>> = serde_json::from_str(text)?;
    let first = records
        .first()
        .ok_or_else(|| Error::EmptyData("empty JSON array".to_string()))?;

    let mut names: Vec<&String> = first.keys().collect();
    names.sort();
    let mut columns: Vec<Series> = names
        .iter()
        .map(|name| Series::new_empty(SeriesType::String, 0, name.as_str()))
        .collect();

    for record in &records {
        for (column, name) in columns.iter_mut().zip(&names) {
            column.append(json_to_text(record.get(name.as_str())));
        }
    }

    let df = DataFrame::new(columns)?;
    log::debug!("read {} JSON records into {} columns", df.nrows(), df.ncols());
    Ok(df)
}

fn json_to_text(value: Option<&JsonValue>) -> Value {
    match value {
        None | Some(JsonValue::Null) => Value::Null,
        Some(JsonValue::String(s)) => Value::String(s.clone()),
        Some(other) => Value::String(other.to_string()),
    }
}

/// Renders a DataFrame as a pretty-printed array of objects
///
/// Cells keep their JSON type; NA cells are written as `null`.
pub fn to_json_string(df: &DataFrame) -> Result<String> {
    let records = to_records(df)?;
    Ok(serde_json::to_string_pretty(&records)?)
}

/// Writes a DataFrame to a JSON file as a pretty-printed array of objects
pub fn write_json<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let records = to_records(df)?;
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    log::debug!("wrote {} JSON records", records.len());
    Ok(())
}

fn to_records(df: &DataFrame) -> Result<Vec<Map<String, JsonValue>>> {
    let names = df.names();
    let mut records = Vec::with_capacity(df.nrows());
    for i in 0..df.nrows() {
        let mut record = Map::new();
        for (j, name) in names.iter().enumerate() {
            let cell: Value = df.at(i, j)?;
            record.insert(name.clone(), serde_json::to_value(cell)?);
        }
        records.push(record);
    }
    Ok(records)
}
