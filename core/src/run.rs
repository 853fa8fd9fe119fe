#![deny(missing_docs)]

//! # Check Run Driver
//!
//! Builds the immutable context shared by every checker and aggregates their
//! diagnostics into a single report. Checkers are pure functions over the
//! context; a failure in one entry never prevents evaluation of the rest.

use crate::check;
use crate::document::{ApiDocument, RouteEntry};
use crate::report::CheckReport;
use crate::tables::CheckConfig;

/// Which optional-field convention the open document was generated under.
///
/// Derived once from the open document's declared version and threaded
/// through every checker call; never a process-wide global.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonMode {
    /// Both documents spell optionality as explicit null unions.
    Unified,
    /// The hosted document predates null-union spelling; its optional fields
    /// are wrapped before structural comparison.
    LegacyNullable,
}

impl ComparisonMode {
    /// Derives the mode from the open document's declared version string.
    pub fn from_version(version: Option<&str>, unified_prefix: &str) -> Self {
        match version {
            Some(version) if version.starts_with(unified_prefix) => Self::Unified,
            _ => Self::LegacyNullable,
        }
    }
}

/// Everything a checker needs: both documents, the exception tables, and the
/// comparison mode.
#[derive(Debug, Clone, Copy)]
pub struct RunContext<'a> {
    /// The open-variant document.
    pub open: &'a ApiDocument,
    /// The hosted-variant document.
    pub hosted: &'a ApiDocument,
    /// The exception tables and tunables.
    pub config: &'a CheckConfig,
    /// The optional-field convention in play, derived once at load time.
    pub mode: ComparisonMode,
}

impl<'a> RunContext<'a> {
    /// Builds a context, deriving the comparison mode from the open
    /// document's version.
    pub fn new(open: &'a ApiDocument, hosted: &'a ApiDocument, config: &'a CheckConfig) -> Self {
        let mode = ComparisonMode::from_version(open.version(), &config.unified_version_prefix);
        Self {
            open,
            hosted,
            config,
            mode,
        }
    }

    /// The open routes subject to cross-document checks, with the ignore
    /// patterns applied.
    pub fn open_routes(&self) -> Vec<RouteEntry<'a>> {
        self.open
            .routes()
            .into_iter()
            .filter(|entry| !self.config.is_ignored_route(entry.path))
            .collect()
    }
}

/// Runs every checker over both documents and aggregates all diagnostics.
///
/// The report contains every mismatch found across the full route and type
/// sets, not just the first.
pub fn run_checks(
    open: &ApiDocument,
    hosted: &ApiDocument,
    config: &CheckConfig,
) -> CheckReport {
    let cx = RunContext::new(open, hosted, config);

    let mut report = CheckReport::default();
    report
        .incompatibilities
        .extend(check::routes::check_route_existence(&cx));
    report
        .incompatibilities
        .extend(check::params::check_parameters(&cx));
    report
        .incompatibilities
        .extend(check::bodies::check_request_bodies(&cx));

    let (issues, gaps) = check::types::check_types(&cx);
    report.incompatibilities.extend(issues);
    report.gaps.extend(gaps);

    report
}
