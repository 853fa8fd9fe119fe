#![deny(missing_docs)]

//! # Path Translation
//!
//! Maps route paths from the open namespace into the hosted namespace, which
//! nests everything under account/workspace scoping, and classifies hosted
//! paths into subsystem groups.

/// The literal routing-prefix segment shared by both namespaces.
pub const ROUTING_PREFIX: &str = "api";

/// The hosted namespace's replacement for the routing prefix.
pub const HOSTED_PREFIX: &str = "api/accounts/{account_id}/workspaces/{workspace_id}";

/// Translates an open-namespace route path into the hosted namespace.
///
/// Paths listed in `unscoped` are returned unchanged; they are not nested
/// under accounts and workspaces in the hosted document. Every other path has
/// the routing prefix replaced at its first occurrence, exactly once —
/// translation is not meant to be applied to an already-translated path.
pub fn translate_path(path: &str, unscoped: &[String]) -> String {
    if unscoped.iter().any(|exception| exception == path) {
        return path.to_string();
    }
    path.replacen(ROUTING_PREFIX, HOSTED_PREFIX, 1)
}

/// Subsystem grouping for hosted routes.
///
/// Derived from the hosted path's segments; replaces ad-hoc substring probing
/// with a single tested classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteGroup {
    /// Shared package/collection metadata views.
    Collections,
    /// Event ingest and queries.
    Events,
    /// Automation management.
    Automations,
    /// Notification and report templates.
    Templates,
    /// Everything else: core orchestration routes.
    Orchestration,
}

impl RouteGroup {
    /// Classifies a hosted-namespace path by its segments.
    pub fn classify(path: &str) -> Self {
        for segment in path.split('/') {
            match segment {
                "collections" => return Self::Collections,
                "events" => return Self::Events,
                "automations" => return Self::Automations,
                "templates" => return Self::Templates,
                _ => {}
            }
        }
        Self::Orchestration
    }

    /// Whether routes in this group require the version header.
    ///
    /// Groups outside orchestration are served by separate subsystems that do
    /// not take the header in the hosted document.
    pub fn requires_version_header(self) -> bool {
        matches!(self, Self::Orchestration)
    }
}
