/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file once → HousingDataset (categoricals lowercased)
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ HousingDataset │  Vec<HousingRecord>, distinct-value index
///   └────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterCriteria → filtered HousingDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate │  feature counts, price histogram, scatter points
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;

pub use aggregate::{count_by_value, price_histogram, ValueCount};
pub use error::{DataError, DataResult};
pub use filter::{filter, FilterCriteria, ValueRange};
pub use loader::DatasetLoader;
pub use model::{CategoricalField, HousingDataset, HousingRecord, NumericField};
