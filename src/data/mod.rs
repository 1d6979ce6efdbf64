/// Data layer: core types, loading, and the filtering pipeline.
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
///   ┌───────────┐
///   │ normalize  │  coerce Year / Global_Sales to numbers (bad cells → missing)
///   └───────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ controls  │  year bounds, genre options, ControlState
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + genre → filtered Dataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  platform → summed sales
///   └───────────┘
/// ```

pub mod aggregate;
pub mod controls;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
