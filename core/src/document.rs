#![deny(missing_docs)]

//! # API Description Documents
//!
//! Wraps a fully-parsed API description (a `serde_json::Value` tree) and
//! exposes the sections the compatibility checkers read: `paths`,
//! `components.schemas`, and `info.version`. A document is loaded once and
//! treated as immutable for the duration of a check run; checkers that need
//! to rewrite a descriptor work on their own deep copies.

use crate::error::{CheckError, CheckResult};
use serde_json::{Map, Value};

/// An immutable, fully-parsed API description document.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiDocument {
    root: Value,
}

/// One flattened route entry: a method + path pair and its operation
/// descriptor.
#[derive(Debug, Clone, Copy)]
pub struct RouteEntry<'a> {
    /// Lowercase HTTP method key (e.g. `get`).
    pub method: &'a str,
    /// Route path as spelled in the document (e.g. `/api/flows/`).
    pub path: &'a str,
    /// The operation descriptor under `paths.{path}.{method}`.
    pub operation: &'a Value,
}

/// One flattened named type entry from `components.schemas`.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry<'a> {
    /// The declared type name.
    pub name: &'a str,
    /// The type descriptor.
    pub descriptor: &'a Value,
}

impl ApiDocument {
    /// Wraps an already-parsed document tree.
    ///
    /// Fails if the top level is not a mapping; everything below that is
    /// tolerated so partially-filled fixtures remain loadable.
    pub fn new(root: Value) -> CheckResult<Self> {
        if !root.is_object() {
            return Err(CheckError::Document(
                "top level is not a mapping".to_string(),
            ));
        }
        Ok(Self { root })
    }

    /// Parses a document from JSON or YAML text (YAML is a superset of JSON,
    /// so a single parse path covers both).
    pub fn parse(content: &str) -> CheckResult<Self> {
        let root: Value = serde_yaml::from_str(content).map_err(|e| {
            CheckError::Document(format!("failed to parse API description: {}", e))
        })?;
        Self::new(root)
    }

    /// The raw document tree. References resolve against this root.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// The `paths` section, if declared.
    pub fn paths(&self) -> Option<&Map<String, Value>> {
        self.root.get("paths").and_then(Value::as_object)
    }

    /// The `components.schemas` section, if declared.
    pub fn schemas(&self) -> Option<&Map<String, Value>> {
        self.root
            .pointer("/components/schemas")
            .and_then(Value::as_object)
    }

    /// The declared `info.version` string, if any.
    pub fn version(&self) -> Option<&str> {
        self.root.pointer("/info/version").and_then(Value::as_str)
    }

    /// The operation descriptor at `paths.{path}.{method}`, if present.
    pub fn operation(&self, path: &str, method: &str) -> Option<&Value> {
        self.paths()?.get(path)?.get(method)
    }

    /// True if `paths` contains `path` with `method` as a nested key.
    pub fn has_route(&self, path: &str, method: &str) -> bool {
        self.operation(path, method).is_some()
    }

    /// Flattens `paths` into (method, path, operation) triples in document
    /// order.
    pub fn routes(&self) -> Vec<RouteEntry<'_>> {
        let mut out = Vec::new();
        if let Some(paths) = self.paths() {
            for (path, item) in paths {
                if let Some(methods) = item.as_object() {
                    for (method, operation) in methods {
                        out.push(RouteEntry {
                            method,
                            path,
                            operation,
                        });
                    }
                }
            }
        }
        out
    }

    /// Flattens `components.schemas` into (name, descriptor) pairs in
    /// document order.
    pub fn types(&self) -> Vec<TypeEntry<'_>> {
        self.schemas()
            .map(|schemas| {
                schemas
                    .iter()
                    .map(|(name, descriptor)| TypeEntry { name, descriptor })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ApiDocument {
        ApiDocument::parse(
            r#"
info:
  title: Example API
  version: 3.1.0
paths:
  /api/flows/:
    get:
      tags: [Flows]
    post:
      tags: [Flows]
  /api/deployments/:
    post: {}
components:
  schemas:
    FlowCreate:
      type: object
      properties:
        name:
          type: string
"#,
        )
        .unwrap()
    }

    #[test]
    fn test_parse_rejects_non_mapping_root() {
        let err = ApiDocument::parse("- a\n- b\n").unwrap_err();
        assert!(matches!(err, CheckError::Document(_)));
    }

    #[test]
    fn test_parse_accepts_json() {
        let doc = ApiDocument::parse(r#"{"info": {"version": "2.19.0"}, "paths": {}}"#).unwrap();
        assert_eq!(doc.version(), Some("2.19.0"));
    }

    #[test]
    fn test_routes_flatten_in_document_order() {
        let doc = sample();
        let flattened: Vec<(&str, &str)> = doc
            .routes()
            .iter()
            .map(|entry| (entry.method, entry.path))
            .collect();
        assert_eq!(
            flattened,
            vec![
                ("get", "/api/flows/"),
                ("post", "/api/flows/"),
                ("post", "/api/deployments/"),
            ]
        );
    }

    #[test]
    fn test_has_route_requires_method_key() {
        let doc = sample();
        assert!(doc.has_route("/api/flows/", "get"));
        assert!(!doc.has_route("/api/flows/", "delete"));
        assert!(!doc.has_route("/api/unknown/", "get"));
    }

    #[test]
    fn test_types_index() {
        let doc = sample();
        let types = doc.types();
        assert_eq!(types.len(), 1);
        assert_eq!(types[0].name, "FlowCreate");
        assert!(types[0].descriptor.get("properties").is_some());
    }

    #[test]
    fn test_missing_sections_are_empty() {
        let doc = ApiDocument::parse("info:\n  title: bare\n").unwrap();
        assert!(doc.routes().is_empty());
        assert!(doc.types().is_empty());
        assert_eq!(doc.version(), None);
    }
}
