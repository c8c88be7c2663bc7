use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a recording
// ---------------------------------------------------------------------------

/// A dynamically-typed cell: either free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Text(String),
    Number(f64),
}

impl CellValue {
    /// Classify a raw cell the way the parsers do: numeric-looking text
    /// becomes a number, anything else stays text.
    pub fn guess(raw: &str) -> Self {
        match parse_finite(raw) {
            Some(v) => CellValue::Number(v),
            None => CellValue::Text(raw.to_string()),
        }
    }

    /// Interpret the cell as a finite `f64`.
    ///
    /// Text is trimmed and parsed; anything unparsable or non-finite is
    /// `None`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) if v.is_finite() => Some(*v),
            CellValue::Number(_) => None,
            CellValue::Text(s) => parse_finite(s),
        }
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Number(v)
    }
}

// ---------------------------------------------------------------------------
// Row – one sample line of a recording
// ---------------------------------------------------------------------------

/// One row of a recording: column name → cell. Columns with empty cells are
/// simply absent.
pub type Row = BTreeMap<String, CellValue>;

/// Numeric value of `column` in `row`, or `0.0` when the cell is missing,
/// unparsable or non-finite.
pub fn numeric_value(row: &Row, column: &str) -> f64 {
    row.get(column).and_then(CellValue::as_f64).unwrap_or(0.0)
}

// ---------------------------------------------------------------------------
// Table – a complete loaded recording
// ---------------------------------------------------------------------------

/// A parsed recording: ordered header names plus the surviving rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// Non-empty column names in file order.
    pub headers: Vec<String>,
    /// Rows that kept at least one non-empty cell.
    pub rows: Vec<Row>,
}

impl Table {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.headers.iter().any(|h| h == column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_cells_coerce_through_trimmed_parse() {
        assert_eq!(CellValue::from(" 1.5 ").as_f64(), Some(1.5));
        assert_eq!(CellValue::from("abc").as_f64(), None);
        assert_eq!(CellValue::from("inf").as_f64(), None);
        assert_eq!(CellValue::from("NaN").as_f64(), None);
        assert_eq!(CellValue::Number(f64::NAN).as_f64(), None);
    }

    #[test]
    fn guess_keeps_text_that_is_not_numeric() {
        assert_eq!(CellValue::guess("-3.25"), CellValue::Number(-3.25));
        assert_eq!(CellValue::guess("Fp1"), CellValue::Text("Fp1".into()));
    }

    #[test]
    fn missing_column_reads_as_zero() {
        let mut row = Row::new();
        row.insert("ch".into(), CellValue::Number(2.0));
        assert_eq!(numeric_value(&row, "ch"), 2.0);
        assert_eq!(numeric_value(&row, "other"), 0.0);
    }
}
