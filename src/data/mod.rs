/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Record>, distinct genders / activities
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterInputs → Criteria → matching records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
