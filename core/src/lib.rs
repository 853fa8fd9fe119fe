#![deny(missing_docs)]

//! # OACheck Core
//!
//! Core library for the open/hosted API compatibility checker.
//!
//! The checker walks two parsed API descriptions — an "open" variant and the
//! "hosted" variant that nests every open route under account/workspace
//! scoping — and reports every structural divergence between them.

/// Shared error types.
pub mod error;

/// Parsed API description documents and derived indices.
pub mod document;

/// Internal `$ref` resolution.
pub mod resolve;

/// Open-to-hosted path translation and route grouping.
pub mod translate;

/// Type-shape extraction and normalization.
pub mod shape;

/// Exception tables and run configuration.
pub mod tables;

/// Diagnostics and aggregated reports.
pub mod report;

/// The compatibility checkers.
pub mod check;

/// The check-run driver.
pub mod run;

pub use document::{ApiDocument, RouteEntry, TypeEntry};
pub use error::{CheckError, CheckResult};
pub use report::{CheckReport, ConfigurationGap, Incompatibility, PropertyFacet, TypeFacet};
pub use run::{run_checks, ComparisonMode, RunContext};
pub use shape::{
    extract_format, extract_type_set, normalize_default, property_shape, strip_null_marker,
    wrap_optional_as_nullable_union, NormalizedDefault, PropertyShape,
};
pub use tables::CheckConfig;
pub use translate::{translate_path, RouteGroup};
