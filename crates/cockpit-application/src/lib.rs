//! Application Layer - Cockpit metric pipeline
//!
//! This crate implements the metric transformation and classification
//! pipeline on top of the domain ports.
//!
//! ## Architecture
//!
//! The application layer:
//! - Owns the metric registry (static metadata plus one unit per metric)
//! - Runs transformation units that fetch, reduce, classify and cache values
//! - Ranks databases for comparison views
//! - Has no dependencies on transport or configuration crates
//!
//! ## Components
//!
//! | Component | Module |
//! |-----------|--------|
//! | Metric Registry | `registry` |
//! | Transformation Unit | `use_cases::transformation` |
//! | Selection/Comparison Layer | `use_cases::comparison` |
//! | Classifiers and ranking | `domain_services` |
//!
//! ## Dependencies
//!
//! This crate depends only on:
//! - `cockpit-domain`: For metric identities, value objects and ports
//! - Pure Rust libraries for async, caching and concurrency

pub mod domain_services;
pub mod registry;
pub mod use_cases;

pub use domain_services::*;
pub use registry::*;
pub use use_cases::*;
