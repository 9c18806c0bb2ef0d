/// Data layer: core types, parsing, loading and export.
///
/// Architecture:
/// ```text
///  .xy / .dat / .txt / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  read bytes → analysis::analyze
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐     ┌──────────┐
///   │  parser   │ ◀── │  filter   │  comment / header line rules
///   └──────────┘     └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │    Series     │  ordered finite (x, y) samples
///   └──────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  export   │  Measurement → CSV / JSON
///   └──────────┘
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod parser;
