//! # calcdeck-store
//!
//! CRUD persistence for calculator records.
//!
//! Records live in a single JSON document on disk. The store owns the
//! consistency contract between a record's `formula` and its derived
//! `variables`: every create and update re-derives the variable list and
//! rejects formulas that fail to parse, so a persisted record never carries a
//! stale or invalid variable set.
//!
//! ## Example
//!
//! ```rust,no_run
//! use calcdeck_store::{CalculatorDraft, CalculatorStore, StoreConfig};
//!
//! let store = CalculatorStore::open(StoreConfig::new("calculators.json"));
//! let record = store.create(CalculatorDraft::new("Circle area", "3.14159*r^2"))?;
//! assert_eq!(record.variables, vec!['r']);
//! # Ok::<(), calcdeck_store::StoreError>(())
//! ```

pub mod calculator;
mod document;
pub mod error;
pub mod store;

pub use calculator::{Calculator, CalculatorDraft};
pub use error::{StoreError, StoreResult};
pub use store::{CalculatorStore, StoreConfig};

// Re-exported so callers can name record ids without a direct uuid dependency
pub use uuid::Uuid;
