/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  Vec<Observation> (period, rate)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive date range → private copy
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
