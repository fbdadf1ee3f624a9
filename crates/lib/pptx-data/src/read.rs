//! File loading: extension dispatch over CSV, Excel workbooks and JSON.

use std::error::Error;
use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use serde_json::Value;
use tracing::debug;

use crate::table::{CellValue, TableData};

/// Failures while loading a data file.
#[derive(Debug)]
pub enum DataError {
    Io(io::Error),
    Csv(csv::Error),
    Excel(calamine::Error),
    Json(serde_json::Error),
    /// Extension (with leading dot, lowercased) no loader accepts.
    Unsupported(String),
    Malformed(&'static str),
}

impl fmt::Display for DataError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Csv(err) => write!(f, "csv error: {err}"),
            Self::Excel(err) => write!(f, "spreadsheet error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Unsupported(ext) => write!(f, "unsupported file format '{ext}'"),
            Self::Malformed(what) => write!(f, "malformed data file: {what}"),
        }
    }
}

impl Error for DataError {}

impl From<io::Error> for DataError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DataError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<calamine::Error> for DataError {
    fn from(err: calamine::Error) -> Self {
        Self::Excel(err)
    }
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// The file extension with its leading dot, lowercased; empty when the
/// path has none.
#[must_use]
pub fn dotted_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy().to_lowercase()))
        .unwrap_or_default()
}

/// Loads any supported file by extension. `sheet` only applies to
/// workbook formats; other loaders ignore it.
///
/// # Errors
/// Returns [`DataError::Unsupported`] for unknown extensions, or the
/// loader's failure.
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<TableData, DataError> {
    match dotted_extension(path).as_str() {
        ".csv" => read_csv(path),
        ".xlsx" | ".xls" | ".xlsm" | ".xlsb" | ".ods" => read_excel(path, sheet),
        ".json" => read_json(path),
        other => Err(DataError::Unsupported(other.to_string())),
    }
}

/// Loads a CSV file; the first record names the columns.
///
/// # Errors
/// Returns [`DataError`] when the file cannot be opened or parsed.
pub fn read_csv(path: &Path) -> Result<TableData, DataError> {
    let mut reader = ReaderBuilder::new().from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(parse_field).collect());
    }
    debug!(path = %path.display(), rows = rows.len(), "read csv");
    Ok(TableData::new(columns, rows))
}

fn parse_field(field: &str) -> CellValue {
    if field.is_empty() {
        return CellValue::Empty;
    }
    if let Ok(number) = field.parse::<f64>() {
        return CellValue::Number(number);
    }
    match field {
        "true" | "True" | "TRUE" => CellValue::Bool(true),
        "false" | "False" | "FALSE" => CellValue::Bool(false),
        _ => CellValue::Text(field.to_string()),
    }
}

/// Loads a worksheet; the first row names the columns. Without an
/// explicit `sheet` the first sheet of the workbook is used.
///
/// # Errors
/// Returns [`DataError`] when the workbook cannot be opened or the sheet
/// does not exist.
pub fn read_excel(path: &Path, sheet: Option<&str>) -> Result<TableData, DataError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = match sheet {
        Some(name) => workbook.worksheet_range(name)?,
        None => {
            let first = workbook
                .sheet_names()
                .first()
                .cloned()
                .ok_or(DataError::Malformed("workbook has no sheets"))?;
            workbook.worksheet_range(&first)?
        }
    };
    let mut rows_iter = range.rows();
    let columns: Vec<String> = rows_iter
        .next()
        .map(|header| header.iter().map(ToString::to_string).collect())
        .unwrap_or_default();
    let rows: Vec<Vec<CellValue>> = rows_iter
        .map(|row| row.iter().map(convert_cell).collect())
        .collect();
    debug!(path = %path.display(), rows = rows.len(), "read workbook");
    Ok(TableData::new(columns, rows))
}

#[allow(clippy::cast_precision_loss)]
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Bool(b) => CellValue::Bool(*b),
        // Dates keep their Excel serial number.
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Empty | Data::Error(_) => CellValue::Empty,
    }
}

/// Loads a JSON array of objects; columns are object keys in first
/// appearance order.
///
/// # Errors
/// Returns [`DataError`] when the file is not valid JSON or not an
/// array.
pub fn read_json(path: &Path) -> Result<TableData, DataError> {
    let file = File::open(path)?;
    let value: Value = serde_json::from_reader(BufReader::new(file))?;
    let Value::Array(items) = value else {
        return Err(DataError::Malformed("json data must be an array of objects"));
    };
    let mut columns: Vec<String> = Vec::new();
    for item in &items {
        if let Value::Object(map) = item {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }
    let rows: Vec<Vec<CellValue>> = items
        .iter()
        .map(|item| {
            columns
                .iter()
                .map(|column| item.get(column).map_or(CellValue::Empty, json_cell))
                .collect()
        })
        .collect();
    debug!(path = %path.display(), rows = rows.len(), "read json");
    Ok(TableData::new(columns, rows))
}

fn json_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Empty,
        Value::Bool(b) => CellValue::Bool(*b),
        Value::Number(n) => n.as_f64().map_or(CellValue::Empty, CellValue::Number),
        Value::String(s) => CellValue::Text(s.clone()),
        other => CellValue::Text(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("create fixture");
        file.write_all(contents.as_bytes()).expect("write fixture");
        path
    }

    #[test]
    fn dotted_extension_lowercases() {
        assert_eq!(dotted_extension(Path::new("a/b/Data.CSV")), ".csv");
        assert_eq!(dotted_extension(Path::new("report.xlsx")), ".xlsx");
        assert_eq!(dotted_extension(Path::new("noext")), "");
    }

    #[test]
    fn csv_types_are_inferred() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, "t.csv", "name,score,active\nalice,91.5,true\nbob,,false\n");
        let table = read_csv(&path).expect("read csv");
        assert_eq!(table.columns, ["name", "score", "active"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0][1], CellValue::Number(91.5));
        assert_eq!(table.rows[0][2], CellValue::Bool(true));
        assert_eq!(table.rows[1][1], CellValue::Empty);
    }

    #[test]
    fn json_columns_keep_first_appearance_order() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(
            &dir,
            "t.json",
            r#"[{"quarter":"Q1","revenue":100},{"quarter":"Q2","revenue":150,"cost":90}]"#,
        );
        let table = read_json(&path).expect("read json");
        assert_eq!(table.columns, ["quarter", "revenue", "cost"]);
        assert_eq!(table.rows[0][2], CellValue::Empty);
        assert_eq!(table.rows[1][2], CellValue::Number(90.0));
    }

    #[test]
    fn json_must_be_an_array() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = write_fixture(&dir, "t.json", r#"{"not":"an array"}"#);
        assert!(matches!(
            read_json(&path),
            Err(DataError::Malformed(_))
        ));
    }

    #[test]
    fn read_table_rejects_unknown_extensions() {
        let err = read_table(Path::new("notes.txt"), None);
        match err {
            Err(DataError::Unsupported(ext)) => assert_eq!(ext, ".txt"),
            other => panic!("expected unsupported format, got {other:?}"),
        }
    }

    #[test]
    fn excel_cells_convert_to_table_cells() {
        assert_eq!(convert_cell(&Data::Int(3)), CellValue::Number(3.0));
        assert_eq!(convert_cell(&Data::Float(2.5)), CellValue::Number(2.5));
        assert_eq!(
            convert_cell(&Data::String("x".into())),
            CellValue::Text("x".into())
        );
        assert_eq!(convert_cell(&Data::Bool(true)), CellValue::Bool(true));
        assert_eq!(convert_cell(&Data::Empty), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2026-01-01".into())),
            CellValue::Text("2026-01-01".into())
        );
    }
}
