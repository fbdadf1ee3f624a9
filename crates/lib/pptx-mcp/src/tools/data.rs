//! Data-file tools: chart a file directly, or summarize it as text.

use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

use pptx_core::{Chart, ChartData, ChartKind, Frame, Series, SlideLayout};
use pptx_data::{DataError, TableData, read_table};
use tokio::task;

use crate::args::ToolArgs;
use crate::outcome::ToolOutcome;
use crate::store::DeckStore;
use crate::tools::{HandlerResult, not_found, title_box};

/// Loads a table off the blocking pool, distinguishing a missing file from
/// a failed parse.
async fn load_table(
    data_file: &str,
    sheet: Option<String>,
) -> Result<Result<TableData, DataError>, ToolOutcome> {
    let path = PathBuf::from(data_file);
    let loaded = task::spawn_blocking(move || {
        if path.exists() {
            Some(read_table(&path, sheet.as_deref()))
        } else {
            None
        }
    })
    .await;
    match loaded {
        Ok(Some(result)) => Ok(result),
        Ok(None) => Err(ToolOutcome::failed(format!(
            "Error: Data file '{data_file}' not found."
        ))),
        Err(err) => Ok(Err(DataError::Io(io_from_join(&err)))),
    }
}

fn io_from_join(err: &task::JoinError) -> std::io::Error {
    std::io::Error::other(err.to_string())
}

pub(crate) async fn analyze_and_chart(store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let filename = args.string("filename")?;
    let data_file = args.string("data_file")?;
    let chart_type = args.string("chart_type")?;
    let title = args
        .opt_string("title")?
        .filter(|t| !t.is_empty())
        .map(str::to_string);
    let x_column = args.string("x_column")?;
    let y_columns = args.strings("y_columns")?;
    let Some(deck) = store.get(filename).await else {
        return Ok(not_found(filename));
    };

    let table = match load_table(data_file, None).await {
        Ok(Ok(table)) => table,
        Ok(Err(DataError::Unsupported(ext))) => {
            return Ok(ToolOutcome::failed(format!(
                "Error: Unsupported file format '{ext}'"
            )));
        }
        Ok(Err(err)) => {
            return Ok(ToolOutcome::failed(format!("Error analyzing data: {err}")));
        }
        Err(outcome) => return Ok(outcome),
    };

    let Some(x_index) = table.column_index(x_column) else {
        return Ok(ToolOutcome::failed(format!(
            "Error: Column '{x_column}' not found in data"
        )));
    };
    let mut series = Vec::with_capacity(y_columns.len());
    for column in &y_columns {
        let Some(index) = table.column_index(column) else {
            return Ok(ToolOutcome::failed(format!(
                "Error: Column '{column}' not found in data"
            )));
        };
        let Some(values) = table.numeric_column(index) else {
            return Ok(ToolOutcome::failed(format!(
                "Error analyzing data: column '{column}' is not numeric"
            )));
        };
        series.push(Series::new(column.clone(), values));
    }
    let Some(kind) = ChartKind::from_key(chart_type) else {
        return Ok(ToolOutcome::failed(format!(
            "Error: unsupported type '{chart_type}'"
        )));
    };

    let categories = table.text_column(x_index);
    let points = table.row_count();
    let title = title.unwrap_or_else(|| format!("{} by {x_column}", y_columns.join(", ")));

    let mut pres = deck.lock().await;
    let slide = pres.add_slide(SlideLayout::Blank);
    slide.push(title_box(&title));
    slide.push(Chart::new(
        Frame::from_inches(1.0, 1.5, 8.0, 5.0),
        kind,
        ChartData::new(categories, series),
    ));
    Ok(ToolOutcome::success(format!(
        "Analyzed '{data_file}' and added {chart_type} chart to '{filename}' ({points} data points)"
    )))
}

pub(crate) async fn read_data_file(_store: Arc<DeckStore>, args: ToolArgs) -> HandlerResult {
    let data_file = args.string("data_file")?;
    let sheet = args
        .opt_string("sheet_name")?
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let table = match load_table(data_file, sheet).await {
        Ok(Ok(table)) => table,
        Ok(Err(DataError::Unsupported(ext))) => {
            return Ok(ToolOutcome::failed(format!(
                "Error: Unsupported file format '{ext}'"
            )));
        }
        Ok(Err(err)) => {
            return Ok(ToolOutcome::failed(format!(
                "Error reading data file: {err}"
            )));
        }
        Err(outcome) => return Ok(outcome),
    };

    Ok(ToolOutcome::success(summarize(data_file, &table)))
}

/// The text report `read_data_file` answers with: shape, column kinds, a
/// preview and per-column statistics.
fn summarize(data_file: &str, table: &TableData) -> String {
    let mut summary = format!(
        "Data File: {data_file}\nRows: {}\nColumns: {}\n\nColumn Names:\n",
        table.row_count(),
        table.column_count()
    );
    for (name, kind) in table.columns.iter().zip(table.column_kinds()) {
        let _ = writeln!(summary, "  - {name} ({})", kind.label());
    }
    let _ = write!(
        summary,
        "\nFirst 5 rows:\n{}\n\nSummary Statistics:\n{}",
        table.preview(5),
        table.describe()
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use pptx_data::read_csv;
    use std::io::Write as _;

    #[test]
    fn summaries_report_shape_and_columns() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sales.csv");
        let mut file = std::fs::File::create(&path).expect("create csv");
        writeln!(file, "region,revenue").expect("write");
        writeln!(file, "east,100").expect("write");
        writeln!(file, "west,250").expect("write");
        drop(file);

        let table = read_csv(&path).expect("parse csv");
        let summary = summarize("sales.csv", &table);
        assert!(summary.starts_with("Data File: sales.csv\nRows: 2\nColumns: 2\n"));
        assert!(summary.contains("  - region (text)"));
        assert!(summary.contains("  - revenue (number)"));
        assert!(summary.contains("First 5 rows:"));
        assert!(summary.contains("Summary Statistics:"));
    }
}
