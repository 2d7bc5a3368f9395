use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use csv::{ReaderBuilder, WriterBuilder};
use serde::{Deserialize, Serialize};

use crate::dataframe::DataFrame;
use crate::error::{Error, Result};
use crate::series::Series;
use crate::value::{SeriesType, Value};

/// Options for reading and writing CSV
///
/// Reading produces String columns only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvSettings {
    /// The first record holds column names
    pub header: bool,
    /// Field delimiter, must be ASCII
    pub separator: char,
    /// Column to use as the row index
    pub index_column: Option<String>,
    /// Zero-based data record positions to leave out (the header is not counted)
    pub skip_rows: Vec<usize>,
    /// Empty fields are read as NA
    pub treat_empty_as_null: bool,
    /// Field text that stands for NA, both ways
    pub null_token: Option<String>,
}

impl Default for CsvSettings {
    fn default() -> Self {
        CsvSettings {
            header: true,
            separator: ',',
            index_column: None,
            skip_rows: Vec::new(),
            treat_empty_as_null: false,
            null_token: None,
        }
    }
}

impl CsvSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    pub fn index_column(mut self, name: impl Into<String>) -> Self {
        self.index_column = Some(name.into());
        self
    }

    pub fn skip_rows(mut self, rows: impl IntoIterator<Item = usize>) -> Self {
        self.skip_rows = rows.into_iter().collect();
        self
    }

    pub fn treat_empty_as_null(mut self, enabled: bool) -> Self {
        self.treat_empty_as_null = enabled;
        self
    }

    pub fn null_token(mut self, token: impl Into<String>) -> Self {
        self.null_token = Some(token.into());
        self
    }

    fn delimiter(&self) -> Result<u8> {
        u8::try_from(self.separator)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| {
                Error::InvalidInput(format!("separator must be ASCII, got {:?}", self.separator))
            })
    }

    fn is_null(&self, field: &str) -> bool {
        (self.treat_empty_as_null && field.is_empty())
            || self.null_token.as_deref().map_or(false, |token| token == field)
    }
}

/// Reads a CSV file into a DataFrame of String columns
pub fn read_csv<P: AsRef<Path>>(path: P, settings: &CsvSettings) -> Result<DataFrame> {
    let file = File::open(path.as_ref())?;
    read_csv_from_reader(file, settings)
}

/// Reads CSV data from any reader into a DataFrame of String columns
pub fn read_csv_from_reader<R: Read>(reader: R, settings: &CsvSettings) -> Result<DataFrame> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(settings.delimiter()?)
        .from_reader(reader);
    let mut records = rdr.records();

    // the first record names the columns, or is data when there is no header
    let first = match records.next() {
        Some(record) => record?,
        None => return Err(Error::EmptyData("empty CSV input".to_string())),
    };
    let names: Vec<String> = if settings.header {
        first.iter().map(|h| h.to_string()).collect()
    } else {
        (0..first.len()).map(|i| format!("Column {}", i)).collect()
    };
    let mut columns: Vec<Series> = names
        .iter()
        .map(|name| Series::new_empty(SeriesType::String, 0, name.as_str()))
        .collect();

    let mut push_record = |ordinal: usize, record: &csv::StringRecord| {
        if settings.skip_rows.contains(&ordinal) {
            return;
        }
        for (column, field) in columns.iter_mut().zip(record.iter()) {
            if settings.is_null(field) {
                column.append(Value::Null);
            } else {
                column.append(field);
            }
        }
    };

    let mut ordinal = 0;
    if !settings.header {
        push_record(ordinal, &first);
        ordinal += 1;
    }
    for record in records {
        push_record(ordinal, &record?);
        ordinal += 1;
    }

    let index = match &settings.index_column {
        Some(name) => match columns.iter().position(|c| c.name() == name) {
            Some(position) => Some(columns.remove(position)),
            None => return Err(Error::ColumnNotFound(name.clone())),
        },
        None => None,
    };
    let mut df = DataFrame::new(columns)?;
    if let Some(index) = index {
        df.set_index(index)?;
    }
    log::debug!("read {} CSV records into {} columns", df.nrows(), df.ncols());
    Ok(df)
}

/// Writes a DataFrame to a CSV file
pub fn write_csv<P: AsRef<Path>>(df: &DataFrame, path: P, settings: &CsvSettings) -> Result<()> {
    let file = File::create(path.as_ref())?;
    write_csv_to_writer(df, file, settings)
}

/// Writes a DataFrame as CSV to any writer
///
/// NA cells are written as the null token, or left empty when none is set.
/// With `index_column` set, the index is written first under that name.
pub fn write_csv_to_writer<W: Write>(df: &DataFrame, writer: W, settings: &CsvSettings) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(settings.delimiter()?)
        .from_writer(writer);
    let null_text = settings.null_token.clone().unwrap_or_default();

    let mut columns: Vec<&Series> = Vec::with_capacity(df.ncols() + 1);
    let mut header: Vec<String> = Vec::with_capacity(df.ncols() + 1);
    if let Some(name) = &settings.index_column {
        columns.push(df.index());
        header.push(name.clone());
    }
    columns.extend(df.columns().iter());
    header.extend(df.names());

    if settings.header {
        wtr.write_record(&header)?;
    }
    for i in 0..df.nrows() {
        let record: Vec<String> = columns
            .iter()
            .map(|column| {
                if column.is_null(i) {
                    null_text.clone()
                } else {
                    column.value_at(i).to_string()
                }
            })
            .collect();
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    log::debug!("wrote {} CSV records", df.nrows());
    Ok(())
}
