pub mod csv;
pub mod json;

// Re-export commonly used functions
pub use self::csv::{read_csv, read_csv_from_reader, write_csv, write_csv_to_writer, CsvSettings};
pub use self::json::{read_json, read_json_str, to_json_string, write_json};
