/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → EmployeeDataset   (awaited once)
///   └──────────┘
///        │
///        ▼
///   ┌─────────────────┐
///   │ EmployeeDataset │  Vec<Employee>, areas in first-use order
///   └─────────────────┘
/// ```

pub mod loader;
pub mod model;
