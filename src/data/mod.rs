/// Data layer: core types, loading, and the projection pipeline.
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
///   │  Dataset  │  Vec<PlayerRow>, team index
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  project  │  FilterSpec → Vec<PlottedPoint>
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod project;
