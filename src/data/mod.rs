/// Data layer: recording types and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (headers + rows)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Table    │  Vec<Row>, each Row: column → CellValue
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
