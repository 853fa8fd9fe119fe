#![deny(missing_docs)]

//! # Compatibility Checkers
//!
//! - **routes**: every open route must exist at its translated hosted path.
//! - **params**: shared routes must declare equal parameter sets.
//! - **bodies**: open request-body fields must be present and
//!   subset-compatible on the hosted side.
//! - **types**: open named types must be structurally compatible with their
//!   hosted counterparts.

pub mod bodies;
pub mod params;
pub mod routes;
pub mod types;
