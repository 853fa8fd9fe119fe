#![deny(missing_docs)]

//! # Compatibility Reporting
//!
//! Diagnostic types yielded by the checkers. Every incompatibility carries
//! the entry identity, the facet that differed, and both compared values, so
//! the external reporting layer can surface actionable output. A run fails in
//! aggregate if any incompatibility was found; configuration gaps are
//! informational only.

use serde::Serialize;
use std::fmt;

/// One comparison facet of a field's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyFacet {
    /// The (possibly alias-remapped) field name.
    Name,
    /// The logical type set.
    Types,
    /// The format annotation.
    Format,
    /// The normalized default value.
    Default,
    /// The deprecated flag.
    Deprecated,
}

impl fmt::Display for PropertyFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PropertyFacet::Name => "name",
            PropertyFacet::Types => "types",
            PropertyFacet::Format => "format",
            PropertyFacet::Default => "default",
            PropertyFacet::Deprecated => "deprecated",
        };
        write!(f, "{}", label)
    }
}

/// One structural facet of a named type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFacet {
    /// The `properties` mapping.
    Properties,
    /// The `required` field-name list.
    Required,
    /// The `enum` literal-value list.
    Enum,
    /// The declared `type` kind tag.
    Kind,
}

impl fmt::Display for TypeFacet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TypeFacet::Properties => "properties",
            TypeFacet::Required => "required",
            TypeFacet::Enum => "enum",
            TypeFacet::Kind => "type",
        };
        write!(f, "{}", label)
    }
}

/// A specific incompatibility between the open and hosted documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Incompatibility {
    /// The translated route is missing from the hosted document.
    MissingRoute {
        /// Uppercase HTTP method.
        method: String,
        /// The translated hosted-namespace path.
        path: String,
    },

    /// A parameter differs between the two sides of a shared route.
    ParameterMismatch {
        /// Uppercase HTTP method.
        method: String,
        /// The translated hosted-namespace path.
        path: String,
        /// The parameter name.
        name: String,
        /// The open side's record, or `None` if the parameter is absent there.
        open: Option<String>,
        /// The hosted side's record, or `None` if the parameter is absent
        /// there.
        hosted: Option<String>,
    },

    /// The two sides' request bodies declare different top-level kinds.
    BodyKindMismatch {
        /// Uppercase HTTP method.
        method: String,
        /// The translated hosted-namespace path.
        path: String,
        /// The open side's declared kind.
        open: String,
        /// The hosted side's declared kind.
        hosted: String,
    },

    /// An open-side request-body field is missing from the hosted side.
    BodyFieldMissing {
        /// Uppercase HTTP method.
        method: String,
        /// The translated hosted-namespace path.
        path: String,
        /// The (possibly alias-remapped) field name looked up on the hosted
        /// side.
        field: String,
    },

    /// A request-body field differs on one comparison facet.
    BodyFacetMismatch {
        /// Uppercase HTTP method.
        method: String,
        /// The translated hosted-namespace path.
        path: String,
        /// The open-side field name.
        field: String,
        /// The facet that differed.
        facet: PropertyFacet,
        /// The open side's value, rendered.
        open: String,
        /// The hosted side's value, rendered.
        hosted: String,
    },

    /// An open-side type field is missing from the hosted declaration.
    TypeFieldMissing {
        /// The named type.
        name: String,
        /// The missing field.
        field: String,
    },

    /// An open-side type field's type set is not a subset of the hosted
    /// side's.
    TypeFieldMismatch {
        /// The named type.
        name: String,
        /// The field that differed.
        field: String,
        /// The open side's type set, rendered.
        open: String,
        /// The hosted side's type set, rendered.
        hosted: String,
    },

    /// A non-field facet of a named type differs.
    TypeFacetMismatch {
        /// The named type.
        name: String,
        /// The facet that differed.
        facet: TypeFacet,
        /// The open side's value, rendered.
        open: String,
        /// The hosted side's value, rendered.
        hosted: String,
    },
}

impl fmt::Display for Incompatibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Incompatibility::MissingRoute { method, path } => {
                write!(f, "Missing hosted route {}: {}", method, path)
            }
            Incompatibility::ParameterMismatch {
                method,
                path,
                name,
                open,
                hosted,
            } => {
                write!(
                    f,
                    "Parameter '{}' differs on {}: {} (open: {}, hosted: {})",
                    name,
                    method,
                    path,
                    open.as_deref().unwrap_or("absent"),
                    hosted.as_deref().unwrap_or("absent"),
                )
            }
            Incompatibility::BodyKindMismatch {
                method,
                path,
                open,
                hosted,
            } => {
                write!(
                    f,
                    "Request body kind differs on {}: {} (open: {}, hosted: {})",
                    method, path, open, hosted
                )
            }
            Incompatibility::BodyFieldMissing {
                method,
                path,
                field,
            } => {
                write!(
                    f,
                    "Request body field '{}' missing from hosted side on {}: {}",
                    field, method, path
                )
            }
            Incompatibility::BodyFacetMismatch {
                method,
                path,
                field,
                facet,
                open,
                hosted,
            } => {
                write!(
                    f,
                    "Request body field '{}' differs on {} for {}: {} (open: {}, hosted: {})",
                    field, facet, method, path, open, hosted
                )
            }
            Incompatibility::TypeFieldMissing { name, field } => {
                write!(f, "Type field '{}.{}' missing from hosted side", name, field)
            }
            Incompatibility::TypeFieldMismatch {
                name,
                field,
                open,
                hosted,
            } => {
                write!(
                    f,
                    "Type field '{}.{}' differs (open: {}, hosted: {})",
                    name, field, open, hosted
                )
            }
            Incompatibility::TypeFacetMismatch {
                name,
                facet,
                open,
                hosted,
            } => {
                write!(
                    f,
                    "Type '{}' differs on {} (open: {}, hosted: {})",
                    name, facet, open, hosted
                )
            }
        }
    }
}

/// A divergence reported for information only; never fails the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigurationGap {
    /// A named type declared on the open side has no hosted counterpart.
    /// Name-level additions are a tracked relaxation, not a failure.
    MissingType {
        /// The open-side type name.
        name: String,
    },
}

impl fmt::Display for ConfigurationGap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigurationGap::MissingType { name } => {
                write!(f, "Type '{}' has no hosted counterpart", name)
            }
        }
    }
}

/// Aggregated outcome of a full check run.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CheckReport {
    /// Every incompatibility found, across all checkers.
    pub incompatibilities: Vec<Incompatibility>,
    /// Informational gaps that do not fail the run.
    pub gaps: Vec<ConfigurationGap>,
}

impl CheckReport {
    /// True when no checker found an incompatibility.
    pub fn is_compatible(&self) -> bool {
        self.incompatibilities.is_empty()
    }
}
