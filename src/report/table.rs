//! Report sections: fixed column definitions and rows of scalar cells.
//!
//! No cell ever holds an error. Absent data resolves to the placeholder of
//! the column kind: `N/A` for text, `0` for numbers, `0%` for percentages.

use crate::diagnostics::DiagnosticSink;
use crate::metrics::{format_percentage, Precision, PLACEHOLDER_PERCENT};
use crate::record::NOT_AVAILABLE;
use serde::Serialize;

/// First cell of the row emitted for a section with no records.
pub const NO_DATA: &str = "Sin datos";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Text,
    Integer,
    Number,
    /// Pre-formatted percentage label such as `75.0%`
    Percent,
}

impl ColumnKind {
    pub fn placeholder(self) -> Cell {
        match self {
            ColumnKind::Text => Cell::Text(NOT_AVAILABLE.to_string()),
            ColumnKind::Integer => Cell::Integer(0),
            ColumnKind::Number => Cell::Number(0.0),
            ColumnKind::Percent => Cell::Text(PLACEHOLDER_PERCENT.to_string()),
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, ColumnKind::Text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub header: String,
    pub kind: ColumnKind,
}

impl Column {
    pub fn new(header: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            header: header.into(),
            kind,
        }
    }
}

/// Build a column list from `(header, kind)` pairs.
pub fn columns(defs: &[(&str, ColumnKind)]) -> Vec<Column> {
    defs.iter()
        .map(|&(header, kind)| Column::new(header, kind))
        .collect()
}

/// One scalar value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Integer(u64),
    Number(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn percent(value: f64, precision: Precision) -> Self {
        Cell::Text(format_percentage(value, precision))
    }

    /// Integer when present, `N/A` otherwise.
    pub fn optional_integer(value: Option<u64>) -> Self {
        value.map_or_else(|| Cell::text(NOT_AVAILABLE), Cell::Integer)
    }

    pub fn render(&self) -> String {
        match self {
            Cell::Text(text) => text.clone(),
            Cell::Integer(n) => n.to_string(),
            Cell::Number(n) => n.to_string(),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<u64> for Cell {
    fn from(value: u64) -> Self {
        Cell::Integer(value)
    }
}

impl From<usize> for Cell {
    fn from(value: usize) -> Self {
        Cell::Integer(value as u64)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

pub type Row = Vec<Cell>;

/// One titled table of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub title: String,
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn new(title: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            title: title.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row; it must match the column count.
    pub fn push(&mut self, row: Row) {
        debug_assert_eq!(row.len(), self.columns.len(), "row width in '{}'", self.title);
        self.rows.push(row);
    }

    /// Row of placeholders, one per column kind.
    pub fn placeholder_row(&self) -> Row {
        self.columns.iter().map(|c| c.kind.placeholder()).collect()
    }

    /// Row explaining that the section had no input.
    pub fn no_data_row(&self) -> Row {
        let mut row = self.placeholder_row();
        if let Some(first) = row.first_mut() {
            *first = Cell::text(NO_DATA);
        }
        row
    }

    /// Close the section: an empty section gets exactly one `Sin datos` row.
    pub fn finish(mut self, sink: &dyn DiagnosticSink) -> Self {
        if self.rows.is_empty() {
            sink.on_empty_input(&self.title);
            let row = self.no_data_row();
            self.rows.push(row);
        }
        self
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.header.as_str()).collect()
    }

    pub fn is_placeholder_only(&self) -> bool {
        self.rows.len() == 1
            && matches!(self.rows[0].first(), Some(Cell::Text(t)) if t == NO_DATA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{DiagnosticEvent, RecordingSink};

    fn top_section() -> Section {
        Section::new(
            "Top 10",
            columns(&[
                ("Servicio", ColumnKind::Text),
                ("Solicitudes", ColumnKind::Integer),
                ("% del Total", ColumnKind::Percent),
            ]),
        )
    }

    #[test]
    fn test_placeholder_row_shape() {
        assert_eq!(
            top_section().placeholder_row(),
            vec![Cell::text("N/A"), Cell::Integer(0), Cell::text("0%")]
        );
    }

    #[test]
    fn test_empty_section_gets_one_no_data_row() {
        let sink = RecordingSink::new();
        let section = top_section().finish(&sink);
        assert_eq!(section.rows.len(), 1);
        assert_eq!(section.rows[0][0], Cell::text("Sin datos"));
        assert!(section.is_placeholder_only());
        assert_eq!(
            sink.events(),
            vec![DiagnosticEvent::EmptyInput {
                section: "Top 10".into()
            }]
        );
    }

    #[test]
    fn test_finish_keeps_existing_rows() {
        let sink = RecordingSink::new();
        let mut section = top_section();
        section.push(vec!["A".into(), 30u64.into(), Cell::percent(75.0, Precision::ONE)]);
        let section = section.finish(&sink);
        assert_eq!(section.rows.len(), 1);
        assert_eq!(section.rows[0][2], Cell::text("75.0%"));
        assert!(sink.events().is_empty());
    }

    #[test]
    fn test_cells_serialize_as_plain_scalars() {
        let row = vec![Cell::text("A"), Cell::Integer(3), Cell::Number(1.5)];
        assert_eq!(serde_json::to_string(&row).unwrap(), r#"["A",3,1.5]"#);
    }

    #[test]
    fn test_optional_integer() {
        assert_eq!(Cell::optional_integer(Some(42)), Cell::Integer(42));
        assert_eq!(Cell::optional_integer(None), Cell::text("N/A"));
    }
}
