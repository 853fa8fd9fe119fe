#![deny(missing_docs)]

//! # Route Existence
//!
//! Asserts that every open route, minus the ignore-list and the excluded tag
//! groups, exists at its translated path in the hosted document.

use crate::report::Incompatibility;
use crate::run::RunContext;
use crate::translate::translate_path;
use serde_json::Value;

/// Checks that each open (method, path) pair exists on the hosted side.
///
/// All failures are collected across the full route set; none aborts the
/// sweep.
pub fn check_route_existence(cx: &RunContext<'_>) -> Vec<Incompatibility> {
    let mut failures = Vec::new();

    for entry in cx.open_routes() {
        let excluded = operation_tags(entry.operation)
            .iter()
            .any(|tag| cx.config.is_excluded_tag(tag));
        if excluded {
            continue;
        }

        let hosted_path = translate_path(entry.path, &cx.config.unscoped_paths);
        if !cx.hosted.has_route(&hosted_path, entry.method) {
            failures.push(Incompatibility::MissingRoute {
                method: entry.method.to_uppercase(),
                path: hosted_path,
            });
        }
    }

    failures
}

/// The classification tags attached to an operation descriptor.
pub(crate) fn operation_tags(operation: &Value) -> Vec<&str> {
    operation
        .get("tags")
        .and_then(Value::as_array)
        .map(|tags| tags.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default()
}
