/// Data layer: table model, loading, and the transform stages.
///
/// Architecture:
/// ```text
///  diet_data.csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Table (typed columns)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  keep the eight required columns
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐    ┌──────────┐
///   │ normalize  │ +  │  encode   │  mean_* → [0, 1], diet_group → diet_code
///   └───────────┘    └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ dimensions  │  (label, values) per parallel-coordinates axis
///   └────────────┘
/// ```

pub mod dimensions;
pub mod encode;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod select;
