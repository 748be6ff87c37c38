/// Data layer: core types, loading, filtering and aggregation.
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
///   │  Dataset  │  Vec<Record>, distinct values per dimension
///   └──────────┘
///        │  FilterSet
///        ▼
///   ┌──────────┐
///   │  filter   │  conjunctive membership → filtered view
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  sums, means, group-bys → Snapshot
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod labels;
pub mod loader;
pub mod model;
pub mod snapshot;
