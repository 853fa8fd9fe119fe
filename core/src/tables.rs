#![deny(missing_docs)]

//! # Exception Tables
//!
//! The declarative allow-lists threaded through every checker: known
//! forward-compatible divergences, known incompatibilities to skip, and the
//! routing quirks of the hosted namespace. Kept as plain data so they can be
//! audited, diffed, and unit-tested independently of the comparison
//! algorithms.

use crate::report::PropertyFacet;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

/// Open-only routes, matched as regular expressions against the full path.
pub const IGNORED_ROUTE_PATTERNS: &[&str] = &[
    // CSRF protection is open-variant only.
    r"^/api/csrf-token$",
    // Experimental routes iterate too quickly to track.
    r".*experimental.*",
    // UI support routes are open-variant only.
    r"^/api/ui/.*",
];

/// Operation tags excluded from cross-document existence checks.
pub const EXCLUDED_ROUTE_TAGS: &[&str] = &["Admin", "Flow Run Notification Policies", "Root"];

/// Parameters injected by the hosted routing layer; they have no open-side
/// counterpart and are dropped before comparison.
pub const INFRASTRUCTURE_PARAMS: &[&str] = &["account_id", "workspace_id", "token_cost"];

/// The version header that non-orchestration route groups do not require in
/// the hosted document.
pub const VERSION_HEADER: &str = "x-api-version";

/// Literal paths that are not nested under accounts and workspaces in the
/// hosted namespace.
pub const UNSCOPED_PATHS: &[&str] = &["/api/collections/views/{view}"];

/// Version prefix selecting the unified optional-field convention.
pub const UNIFIED_VERSION_PREFIX: &str = "3.";

/// Open-side request-body fields accepted as forward compatible, per path.
pub const FORWARD_COMPATIBLE_REQUEST_PROPS: &[(&str, &[&str])] = &[
    ("/api/deployments/", &["job_variables"]),
    ("/api/deployments/{id}", &["job_variables"]),
];

/// Open-side named-type fields accepted as forward compatible, per type name.
pub const FORWARD_COMPATIBLE_TYPE_PROPS: &[(&str, &[&str])] = &[
    ("DeploymentCreate", &["job_variables"]),
    ("DeploymentUpdate", &["job_variables"]),
    ("DeploymentResponse", &["job_variables"]),
];

/// Named-type fields with known incompatibilities under the legacy nullable
/// convention, skipped only in that mode.
pub const KNOWN_INCOMPATIBLE_TYPE_PROPS: &[(&str, &[&str])] =
    &[("DeploymentResponse", &["parameter_openapi_schema"])];

/// Fields the two documents spell differently, keyed by
/// (path, method, open-side field name).
pub const REQUEST_FIELD_ALIASES: &[((&str, &str, &str), &str)] = &[(
    ("/api/work_pools/", "post", "base_job_template"),
    "base_job_configuration",
)];

/// Per-field comparison facets to skip, keyed by (path, method, field name).
pub const SKIPPED_REQUEST_FACETS: &[((&str, &str, &str), &[PropertyFacet])] = &[(
    ("/api/flow_runs/", "post", "idempotency_key"),
    &[PropertyFacet::Default],
)];

/// The tunable inputs of a check run, assembled from the static tables.
///
/// Checkers only ever read this struct, so extending a table is a data edit
/// that never touches comparison logic.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Compiled ignore patterns for open-only routes.
    pub ignored_routes: Vec<Regex>,
    /// Tags excluding an operation from existence checks.
    pub excluded_tags: Vec<String>,
    /// Hosted-side parameters dropped before comparison.
    pub infrastructure_params: Vec<String>,
    /// The version header name.
    pub version_header: String,
    /// Paths returned unchanged by the translator.
    pub unscoped_paths: Vec<String>,
    /// Version prefix selecting the unified comparison mode.
    pub unified_version_prefix: String,
    /// Forward-compatible request-body fields per path.
    pub forward_compatible_request_props: HashMap<String, Vec<String>>,
    /// Forward-compatible type fields per type name.
    pub forward_compatible_type_props: HashMap<String, Vec<String>>,
    /// Known-incompatible type fields per type name (legacy mode only).
    pub known_incompatible_type_props: HashMap<String, Vec<String>>,
    /// Field-name aliases keyed by (path, method, open-side field).
    pub request_field_aliases: HashMap<(String, String, String), String>,
    /// Facets to skip per (path, method, field).
    pub skipped_request_facets: HashMap<(String, String, String), BTreeSet<PropertyFacet>>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            ignored_routes: IGNORED_ROUTE_PATTERNS
                .iter()
                .map(|pattern| Regex::new(pattern).expect("Invalid regex constant"))
                .collect(),
            excluded_tags: to_strings(EXCLUDED_ROUTE_TAGS),
            infrastructure_params: to_strings(INFRASTRUCTURE_PARAMS),
            version_header: VERSION_HEADER.to_string(),
            unscoped_paths: to_strings(UNSCOPED_PATHS),
            unified_version_prefix: UNIFIED_VERSION_PREFIX.to_string(),
            forward_compatible_request_props: to_field_table(FORWARD_COMPATIBLE_REQUEST_PROPS),
            forward_compatible_type_props: to_field_table(FORWARD_COMPATIBLE_TYPE_PROPS),
            known_incompatible_type_props: to_field_table(KNOWN_INCOMPATIBLE_TYPE_PROPS),
            request_field_aliases: REQUEST_FIELD_ALIASES
                .iter()
                .map(|((path, method, field), alias)| {
                    (
                        (path.to_string(), method.to_string(), field.to_string()),
                        alias.to_string(),
                    )
                })
                .collect(),
            skipped_request_facets: SKIPPED_REQUEST_FACETS
                .iter()
                .map(|((path, method, field), facets)| {
                    (
                        (path.to_string(), method.to_string(), field.to_string()),
                        facets.iter().copied().collect(),
                    )
                })
                .collect(),
        }
    }
}

impl CheckConfig {
    /// True if `path` matches any open-only ignore pattern.
    pub fn is_ignored_route(&self, path: &str) -> bool {
        self.ignored_routes.iter().any(|regex| regex.is_match(path))
    }

    /// True if `tag` excludes its operation from existence checks.
    pub fn is_excluded_tag(&self, tag: &str) -> bool {
        self.excluded_tags.iter().any(|excluded| excluded == tag)
    }

    /// True if `name` is injected by the hosted routing layer.
    pub fn is_infrastructure_param(&self, name: &str) -> bool {
        self.infrastructure_params
            .iter()
            .any(|injected| injected == name)
    }

    /// True if `field` is an accepted forward-compatible request-body field
    /// for `path`.
    pub fn is_forward_compatible_request_prop(&self, path: &str, field: &str) -> bool {
        self.forward_compatible_request_props
            .get(path)
            .is_some_and(|fields| fields.iter().any(|accepted| accepted == field))
    }

    /// True if `field` is an accepted forward-compatible field of type
    /// `name`.
    pub fn is_forward_compatible_type_prop(&self, name: &str, field: &str) -> bool {
        self.forward_compatible_type_props
            .get(name)
            .is_some_and(|fields| fields.iter().any(|accepted| accepted == field))
    }

    /// True if `field` of type `name` is a known incompatibility to skip.
    pub fn is_known_incompatible_type_prop(&self, name: &str, field: &str) -> bool {
        self.known_incompatible_type_props
            .get(name)
            .is_some_and(|fields| fields.iter().any(|known| known == field))
    }

    /// The hosted-side spelling of `field`, when the alias table remaps it
    /// for this exact route.
    pub fn alias_for(&self, path: &str, method: &str, field: &str) -> Option<&str> {
        self.request_field_aliases
            .get(&(path.to_string(), method.to_string(), field.to_string()))
            .map(String::as_str)
    }

    /// True if `facet` is skipped for `field` on this exact route.
    pub fn is_skipped_facet(
        &self,
        path: &str,
        method: &str,
        field: &str,
        facet: PropertyFacet,
    ) -> bool {
        self.skipped_request_facets
            .get(&(path.to_string(), method.to_string(), field.to_string()))
            .is_some_and(|facets| facets.contains(&facet))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

fn to_field_table(entries: &[(&str, &[&str])]) -> HashMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, fields)| (key.to_string(), to_strings(fields)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ignore_patterns() {
        let config = CheckConfig::default();
        assert!(config.is_ignored_route("/api/csrf-token"));
        assert!(config.is_ignored_route("/api/experimental/flows/"));
        assert!(config.is_ignored_route("/api/ui/flow_runs/count"));
        assert!(!config.is_ignored_route("/api/flows/"));
    }

    #[test]
    fn test_excluded_tags() {
        let config = CheckConfig::default();
        assert!(config.is_excluded_tag("Admin"));
        assert!(config.is_excluded_tag("Root"));
        assert!(!config.is_excluded_tag("Flows"));
    }

    #[test]
    fn test_forward_compatible_request_props() {
        let config = CheckConfig::default();
        assert!(config.is_forward_compatible_request_prop("/api/deployments/", "job_variables"));
        assert!(
            config.is_forward_compatible_request_prop("/api/deployments/{id}", "job_variables")
        );
        assert!(!config.is_forward_compatible_request_prop("/api/deployments/", "name"));
        assert!(!config.is_forward_compatible_request_prop("/api/flows/", "job_variables"));
    }

    #[test]
    fn test_alias_lookup_is_exact() {
        let config = CheckConfig::default();
        assert_eq!(
            config.alias_for("/api/work_pools/", "post", "base_job_template"),
            Some("base_job_configuration")
        );
        assert_eq!(
            config.alias_for("/api/work_pools/", "patch", "base_job_template"),
            None
        );
    }

    #[test]
    fn test_skipped_facets() {
        let config = CheckConfig::default();
        assert!(config.is_skipped_facet(
            "/api/flow_runs/",
            "post",
            "idempotency_key",
            PropertyFacet::Default
        ));
        assert!(!config.is_skipped_facet(
            "/api/flow_runs/",
            "post",
            "idempotency_key",
            PropertyFacet::Types
        ));
    }

    #[test]
    fn test_infrastructure_params() {
        let config = CheckConfig::default();
        for name in ["account_id", "workspace_id", "token_cost"] {
            assert!(config.is_infrastructure_param(name));
        }
        assert!(!config.is_infrastructure_param("flow_id"));
    }
}
