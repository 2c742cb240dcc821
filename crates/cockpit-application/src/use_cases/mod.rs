//! Use cases
//!
//! - [`transformation`]: per-metric fetch, classification and freshness
//! - [`comparison`]: selection management and cross-database ranking

pub mod comparison;
pub mod transformation;

pub use comparison::{ComparisonService, IncompleteDatabase, IncompleteReason, Ranking};
pub use transformation::{
    DEFAULT_FETCH_TIMEOUT, DEFAULT_REFRESH_INTERVAL, DEFAULT_SNAPSHOT_CAPACITY, RefreshTiming,
    TransformationUnit, UnitDependencies, UnitSettings,
};
