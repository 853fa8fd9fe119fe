#![deny(missing_docs)]

//! # Type Compatibility
//!
//! Compares every named type declared in the open document against its hosted
//! counterpart across four structural facets: `properties`, `required`,
//! `enum`, and `type`. List facets compare as subset-or-equal (the hosted
//! side may declare more), scalar facets as equality. Under the legacy
//! nullable convention the hosted descriptor's optional fields are wrapped
//! into null unions — on a checker-local copy — before comparison.

use crate::report::{ConfigurationGap, Incompatibility, TypeFacet};
use crate::run::{ComparisonMode, RunContext};
use crate::shape::{
    extract_type_set, render_type_set, strip_null_marker, wrap_optional_as_nullable_union,
};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

const TYPE_FACETS: &[(&str, TypeFacet)] = &[
    ("properties", TypeFacet::Properties),
    ("required", TypeFacet::Required),
    ("enum", TypeFacet::Enum),
    ("type", TypeFacet::Kind),
];

/// Checks structural compatibility for every named type in the open
/// document.
///
/// Types with no hosted counterpart are reported as configuration gaps, not
/// failures; name-level additions are a tracked relaxation.
pub fn check_types(cx: &RunContext<'_>) -> (Vec<Incompatibility>, Vec<ConfigurationGap>) {
    let mut failures = Vec::new();
    let mut gaps = Vec::new();

    let hosted_types = cx.hosted.schemas();

    for entry in cx.open.types() {
        let Some(hosted_descriptor) = hosted_types.and_then(|types| types.get(entry.name)) else {
            gaps.push(ConfigurationGap::MissingType {
                name: entry.name.to_string(),
            });
            continue;
        };

        let hosted_descriptor = match cx.mode {
            ComparisonMode::LegacyNullable => wrap_optional_as_nullable_union(hosted_descriptor),
            ComparisonMode::Unified => hosted_descriptor.clone(),
        };

        failures.extend(check_one_type(
            cx,
            entry.name,
            entry.descriptor,
            &hosted_descriptor,
        ));
    }

    (failures, gaps)
}

fn check_one_type(
    cx: &RunContext<'_>,
    name: &str,
    open_descriptor: &Value,
    hosted_descriptor: &Value,
) -> Vec<Incompatibility> {
    let mut failures = Vec::new();

    for (key, facet) in TYPE_FACETS {
        let hosted_value = hosted_descriptor.get(key);

        match open_descriptor.get(key) {
            // An absent facet compares as an empty mapping: nothing to check.
            None => continue,
            Some(Value::Object(open_properties)) => {
                failures.extend(check_properties(cx, name, open_properties, hosted_value));
            }
            Some(Value::Array(open_list)) => {
                let open_set: BTreeSet<&str> =
                    open_list.iter().filter_map(Value::as_str).collect();
                let hosted_set: BTreeSet<&str> = hosted_value
                    .and_then(Value::as_array)
                    .map(|list| list.iter().filter_map(Value::as_str).collect())
                    .unwrap_or_default();
                if !open_set.is_subset(&hosted_set) {
                    failures.push(Incompatibility::TypeFacetMismatch {
                        name: name.to_string(),
                        facet: *facet,
                        open: render_str_set(&open_set),
                        hosted: render_str_set(&hosted_set),
                    });
                }
                // The first non-mapping facet ends evaluation for this type.
                break;
            }
            Some(open_scalar) => {
                if hosted_value != Some(open_scalar) {
                    failures.push(Incompatibility::TypeFacetMismatch {
                        name: name.to_string(),
                        facet: *facet,
                        open: render_scalar(Some(open_scalar)),
                        hosted: render_scalar(hosted_value),
                    });
                }
                break;
            }
        }
    }

    failures
}

fn check_properties(
    cx: &RunContext<'_>,
    name: &str,
    open_properties: &Map<String, Value>,
    hosted_value: Option<&Value>,
) -> Vec<Incompatibility> {
    let mut failures = Vec::new();
    let hosted_properties = hosted_value.and_then(Value::as_object);

    for (field, fragment) in open_properties {
        if cx.config.is_forward_compatible_type_prop(name, field) {
            continue;
        }
        if cx.mode == ComparisonMode::LegacyNullable
            && cx.config.is_known_incompatible_type_prop(name, field)
        {
            continue;
        }

        let Some(hosted_fragment) = hosted_properties.and_then(|properties| properties.get(field))
        else {
            failures.push(Incompatibility::TypeFieldMissing {
                name: name.to_string(),
                field: field.clone(),
            });
            continue;
        };

        let open_types = strip_null_marker(&extract_type_set(fragment));
        let hosted_types = extract_type_set(hosted_fragment);
        if !open_types.is_subset(&hosted_types) {
            failures.push(Incompatibility::TypeFieldMismatch {
                name: name.to_string(),
                field: field.clone(),
                open: render_type_set(&open_types),
                hosted: render_type_set(&hosted_types),
            });
        }
    }

    failures
}

fn render_str_set(set: &BTreeSet<&str>) -> String {
    let items: Vec<&str> = set.iter().copied().collect();
    format!("[{}]", items.join(", "))
}

fn render_scalar(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => "absent".to_string(),
    }
}
