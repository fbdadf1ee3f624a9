//! The in-memory table and its summaries.

use std::fmt;

/// One cell of a loaded table.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(f64),
    Bool(bool),
    Empty,
}

impl CellValue {
    /// Numeric view of the cell; booleans count as 0/1, text does not
    /// coerce.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Self::Text(_) | Self::Empty => None,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Empty => Ok(()),
        }
    }
}

/// Dominant type of a column, reported in file summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Number,
    Text,
    Bool,
    Empty,
    Mixed,
}

impl ColumnKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::Text => "text",
            Self::Bool => "bool",
            Self::Empty => "empty",
            Self::Mixed => "mixed",
        }
    }
}

const EMPTY_CELL: CellValue = CellValue::Empty;

/// A loaded table: named columns over rows of cells. Rows shorter than
/// the header read as empty cells.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl TableData {
    #[must_use]
    pub const fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &CellValue> {
        self.rows
            .iter()
            .map(move |row| row.get(index).unwrap_or(&EMPTY_CELL))
    }

    /// Classifies a column by the non-empty cells it holds.
    #[must_use]
    pub fn column_kind(&self, index: usize) -> ColumnKind {
        let mut kind = None;
        for cell in self.column_values(index) {
            let next = match cell {
                CellValue::Number(_) => ColumnKind::Number,
                CellValue::Text(_) => ColumnKind::Text,
                CellValue::Bool(_) => ColumnKind::Bool,
                CellValue::Empty => continue,
            };
            match kind {
                None => kind = Some(next),
                Some(seen) if seen == next => {}
                Some(_) => return ColumnKind::Mixed,
            }
        }
        kind.unwrap_or(ColumnKind::Empty)
    }

    #[must_use]
    pub fn column_kinds(&self) -> Vec<ColumnKind> {
        (0..self.columns.len())
            .map(|i| self.column_kind(i))
            .collect()
    }

    /// Column rendered as display strings, the category-axis view.
    #[must_use]
    pub fn text_column(&self, index: usize) -> Vec<String> {
        self.column_values(index)
            .map(ToString::to_string)
            .collect()
    }

    /// Column as numbers, or `None` when any cell is text. Empty cells
    /// read as zero.
    #[must_use]
    pub fn numeric_column(&self, index: usize) -> Option<Vec<f64>> {
        self.column_values(index)
            .map(|cell| {
                if cell.is_empty() {
                    Some(0.0)
                } else {
                    cell.as_number()
                }
            })
            .collect()
    }

    /// The first `limit` rows rendered as an aligned text grid.
    #[must_use]
    pub fn preview(&self, limit: usize) -> String {
        let take = self.rows.len().min(limit);
        let mut widths: Vec<usize> = self.columns.iter().map(String::len).collect();
        let rendered: Vec<Vec<String>> = self.rows[..take]
            .iter()
            .map(|row| {
                (0..self.columns.len())
                    .map(|i| row.get(i).unwrap_or(&EMPTY_CELL).to_string())
                    .collect()
            })
            .collect();
        for row in &rendered {
            for (i, cell) in row.iter().enumerate() {
                if cell.len() > widths[i] {
                    widths[i] = cell.len();
                }
            }
        }
        let mut out = String::new();
        let push_row = |cells: Vec<&str>, out: &mut String| {
            let line = cells
                .iter()
                .enumerate()
                .map(|(i, cell)| format!("{cell:<width$}", width = widths[i]))
                .collect::<Vec<_>>()
                .join("  ");
            out.push_str(line.trim_end());
            out.push('\n');
        };
        push_row(self.columns.iter().map(String::as_str).collect(), &mut out);
        for row in &rendered {
            push_row(row.iter().map(String::as_str).collect(), &mut out);
        }
        out.pop();
        out
    }

    /// Summary statistics over the numeric columns, one line per column.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for (index, name) in self.columns.iter().enumerate() {
            let Some(values) = self.numeric_column(index) else {
                continue;
            };
            if values.is_empty() {
                continue;
            }
            let count = values.len();
            let mean = values.iter().sum::<f64>() / count as f64;
            // Sample standard deviation; a single value reports NaN.
            let std = (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / (count as f64 - 1.0))
                .sqrt();
            let min = values.iter().copied().fold(f64::INFINITY, f64::min);
            let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            out.push_str(&format!(
                "{name}: count={count} mean={mean:.2} std={std:.2} min={min:.2} max={max:.2}\n"
            ));
        }
        if out.is_empty() {
            return "no numeric columns".to_string();
        }
        out.pop();
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TableData {
        TableData::new(
            vec!["quarter".into(), "revenue".into(), "flag".into()],
            vec![
                vec![
                    CellValue::Text("Q1".into()),
                    CellValue::Number(100.0),
                    CellValue::Bool(true),
                ],
                vec![
                    CellValue::Text("Q2".into()),
                    CellValue::Number(150.0),
                    CellValue::Bool(false),
                ],
                vec![CellValue::Text("Q3".into()), CellValue::Number(200.0)],
            ],
        )
    }

    #[test]
    fn column_kinds_classify_cells() {
        let table = sample();
        assert_eq!(table.column_kind(0), ColumnKind::Text);
        assert_eq!(table.column_kind(1), ColumnKind::Number);
        assert_eq!(table.column_kind(2), ColumnKind::Bool);
    }

    #[test]
    fn numeric_column_rejects_text() {
        let table = sample();
        assert!(table.numeric_column(0).is_none());
        assert_eq!(table.numeric_column(1), Some(vec![100.0, 150.0, 200.0]));
        // Missing trailing cell reads as zero.
        assert_eq!(table.numeric_column(2), Some(vec![1.0, 0.0, 0.0]));
    }

    #[test]
    fn text_column_renders_every_cell() {
        let table = sample();
        assert_eq!(table.text_column(0), ["Q1", "Q2", "Q3"]);
        assert_eq!(table.text_column(1), ["100", "150", "200"]);
    }

    #[test]
    fn preview_aligns_and_truncates() {
        let table = sample();
        let preview = table.preview(2);
        let lines: Vec<&str> = preview.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("quarter  revenue"));
        assert!(lines[1].starts_with("Q1"));
        assert!(lines[2].starts_with("Q2"));
    }

    #[test]
    fn describe_reports_numeric_columns_only() {
        let table = sample();
        let stats = table.describe();
        assert!(stats.contains("revenue: count=3 mean=150.00"));
        assert!(stats.contains("min=100.00 max=200.00"));
        assert!(!stats.contains("quarter:"));
    }

    #[test]
    fn describe_without_numbers_says_so() {
        let table = TableData::new(
            vec!["name".into()],
            vec![vec![CellValue::Text("a".into())]],
        );
        assert_eq!(table.describe(), "no numeric columns");
    }
}
