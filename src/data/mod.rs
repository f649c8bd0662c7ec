//! Data layer: core types, enrichment, filtering, aggregation, I/O.
//!
//! Architecture:
//! ```text
//!  .csv / .parquet / .json
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  loader   │  parse file → Vec<RawRecord>
//!   └──────────┘
//!        │
//!        ▼
//!   ┌────────────┐
//!   │ transform   │  decode codes, derive categories → SalaryDataset
//!   └────────────┘
//!        │
//!        ▼
//!   ┌──────────┐        ┌──────────┐
//!   │  filter   │───────▶│  stats    │  aggregate the surviving rows
//!   └──────────┘ indices └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  export   │  filtered subset → CSV
//!   └──────────┘
//! ```
//!
//! The enriched `SalaryDataset` is built once per loaded file and treated as
//! immutable; every downstream step borrows it and works off index lists.

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod transform;
