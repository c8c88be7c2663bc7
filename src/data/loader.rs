use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, Row, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a recording from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.txt` – delimited text, first record holds the channel names
/// * `.json`         – `[{ "Fp1": 12.5, "Fp2": -3.1, ... }, ...]`
/// * `.parquet`      – flat scalar columns, one row per sample
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" | "txt" => {
            let text = std::fs::read_to_string(path).context("reading CSV file")?;
            parse_table(&text)?
        }
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => bail!("Unsupported file extension: .{other}"),
    };

    log::debug!(
        "{}: {} rows, columns {:?}",
        path.display(),
        table.len(),
        table.headers
    );
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV parser
// ---------------------------------------------------------------------------

/// Parse delimited text whose first record is the header row.
///
/// * Headers that are empty or whitespace-only are dropped, together with
///   their column. Later columns keep their own positions rather than
///   shifting left into the dropped slot.
/// * Empty cells are left out of the row; numeric-looking cells become
///   [`CellValue::Number`].
/// * Rows that end up with no cells at all are dropped.
pub fn parse_table(text: &str) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let header_record = match records.next() {
        Some(result) => result.context("reading CSV header row")?,
        None => return Ok(Table::default()),
    };

    // (column position, header name) for every usable header
    let columns: Vec<(usize, String)> = header_record
        .iter()
        .enumerate()
        .filter(|(_, h)| !h.trim().is_empty())
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in records.enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let row: Row = columns
            .iter()
            .filter_map(|(idx, name)| {
                let value = record.get(*idx)?;
                if value.is_empty() {
                    return None;
                }
                Some((name.clone(), CellValue::guess(value)))
            })
            .collect();

        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(Table {
        headers: columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Headers follow key order of first appearance in the file.
///
/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Fp1": 12.5, "Fp2": -3.1, "marker": "eyes-closed" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut headers: Vec<String> = Vec::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = Row::new();
        for (key, val) in obj {
            if key.trim().is_empty() {
                continue;
            }
            if !headers.contains(key) {
                headers.push(key.clone());
            }
            if let Some(cell) = json_to_cell(val) {
                row.insert(key.clone(), cell);
            }
        }

        if !row.is_empty() {
            rows.push(row);
        }
    }

    Ok(Table { headers, rows })
}

fn json_to_cell(val: &JsonValue) -> Option<CellValue> {
    match val {
        JsonValue::Null => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(CellValue::guess(s)),
        JsonValue::Number(n) => Some(match n.as_f64() {
            Some(f) => CellValue::Number(f),
            None => CellValue::Text(n.to_string()),
        }),
        other => Some(CellValue::Text(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file with one scalar column per channel.
///
/// Utf8, Int32/Int64, Float32/Float64 and Boolean columns are read; nulls
/// are treated like empty cells.  Works with files written by **Pandas**
/// (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let columns: Vec<(usize, String)> = builder
        .schema()
        .fields()
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.name().trim().is_empty())
        .map(|(i, f)| (i, f.name().clone()))
        .collect();

    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        for row_idx in 0..batch.num_rows() {
            let row: Row = columns
                .iter()
                .filter_map(|(col_idx, name)| {
                    let cell = extract_cell(batch.column(*col_idx), row_idx)?;
                    Some((name.clone(), cell))
                })
                .collect();

            if !row.is_empty() {
                rows.push(row);
            }
        }
    }

    Ok(Table {
        headers: columns.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}

/// Extract a single cell from an Arrow column; `None` for nulls, empty
/// strings and unsupported types.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> Option<CellValue> {
    if col.is_null(row) {
        return None;
    }
    let cell = match col.data_type() {
        DataType::Utf8 => {
            let s = col.as_any().downcast_ref::<StringArray>()?.value(row);
            if s.is_empty() {
                return None;
            }
            CellValue::guess(s)
        }
        DataType::LargeUtf8 => {
            let s = col.as_string::<i64>().value(row);
            if s.is_empty() {
                return None;
            }
            CellValue::guess(s)
        }
        DataType::Int32 => {
            let arr = col.as_any().downcast_ref::<Int32Array>()?;
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Int64 => {
            let arr = col.as_any().downcast_ref::<Int64Array>()?;
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float32 => {
            let arr = col.as_any().downcast_ref::<Float32Array>()?;
            CellValue::Number(arr.value(row) as f64)
        }
        DataType::Float64 => {
            let arr = col.as_any().downcast_ref::<Float64Array>()?;
            CellValue::Number(arr.value(row))
        }
        DataType::Boolean => {
            let arr = col.as_any().downcast_ref::<BooleanArray>()?;
            CellValue::Text(arr.value(row).to_string())
        }
        other => {
            log::warn!("skipping unsupported parquet column type {other:?}");
            return None;
        }
    };
    Some(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headers_and_numeric_cells() {
        let table = parse_table("time,Fp1,marker\n0,1.5,rest\n1,-2.25,task\n").unwrap();
        assert_eq!(table.headers, vec!["time", "Fp1", "marker"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0]["Fp1"], CellValue::Number(1.5));
        assert_eq!(table.rows[1]["marker"], CellValue::Text("task".into()));
    }

    #[test]
    fn blank_headers_drop_their_column() {
        let table = parse_table("Fp1, ,Fp2\n1,99,2\n").unwrap();
        assert_eq!(table.headers, vec!["Fp1", "Fp2"]);
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[0]["Fp2"], CellValue::Number(2.0));
    }

    #[test]
    fn empty_cells_and_empty_rows_are_dropped() {
        let table = parse_table("Fp1,Fp2\n1,\n,\n\n3,4\n").unwrap();
        assert_eq!(table.len(), 2);
        assert!(!table.rows[0].contains_key("Fp2"));
        assert_eq!(table.rows[1]["Fp2"], CellValue::Number(4.0));
    }

    #[test]
    fn short_records_are_tolerated() {
        let table = parse_table("a,b,c\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0].len(), 1);
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn empty_input_is_an_empty_table() {
        let table = parse_table("").unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn json_scalars_map_to_cells() {
        assert_eq!(json_to_cell(&JsonValue::Null), None);
        assert_eq!(json_to_cell(&serde_json::json!("")), None);
        assert_eq!(
            json_to_cell(&serde_json::json!("2.5")),
            Some(CellValue::Number(2.5))
        );
        assert_eq!(
            json_to_cell(&serde_json::json!(7)),
            Some(CellValue::Number(7.0))
        );
        assert_eq!(
            json_to_cell(&serde_json::json!(true)),
            Some(CellValue::Text("true".into()))
        );
    }
}
