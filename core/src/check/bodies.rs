#![deny(missing_docs)]

//! # Request Body Compatibility
//!
//! Resolves each side's request-body reference, extracts the per-field
//! comparison shape, and asserts every open field is present on the hosted
//! side with a compatible shape. Request bodies stay compatible as long as
//! open fields are always present on the hosted side; the hosted side may
//! declare more.

use crate::document::ApiDocument;
use crate::report::{Incompatibility, PropertyFacet};
use crate::resolve::resolve_ref;
use crate::run::RunContext;
use crate::shape::{
    property_shape, render_type_set, strip_null_marker, NormalizedDefault, PropertyShape,
    NULL_TYPE,
};
use crate::translate::translate_path;
use indexmap::IndexMap;
use serde_json::{json, Value};

/// Checks request-body compatibility for every route present on both sides.
pub fn check_request_bodies(cx: &RunContext<'_>) -> Vec<Incompatibility> {
    let mut failures = Vec::new();

    for entry in cx.open_routes() {
        let hosted_path = translate_path(entry.path, &cx.config.unscoped_paths);
        let Some(hosted_operation) = cx.hosted.operation(&hosted_path, entry.method) else {
            continue;
        };

        let open_body = resolve_body(cx.open, entry.operation);
        let hosted_body = resolve_body(cx.hosted, hosted_operation);
        let method = entry.method.to_uppercase();

        let open_kind = body_kind(&open_body);
        let hosted_kind = body_kind(&hosted_body);
        if open_kind != hosted_kind {
            failures.push(Incompatibility::BodyKindMismatch {
                method: method.clone(),
                path: hosted_path.clone(),
                open: open_kind.unwrap_or_else(|| "none".to_string()),
                hosted: hosted_kind.unwrap_or_else(|| "none".to_string()),
            });
        }

        let hosted_shapes = property_shapes(&hosted_body);

        for (field, fragment) in properties(&open_body) {
            if cx
                .config
                .is_forward_compatible_request_prop(entry.path, field)
            {
                continue;
            }

            let open_shape = property_shape(fragment);
            let hosted_name = cx
                .config
                .alias_for(entry.path, entry.method, field)
                .unwrap_or(field);

            let Some((hosted_key, hosted_shape)) = hosted_shapes.get_key_value(hosted_name)
            else {
                failures.push(Incompatibility::BodyFieldMissing {
                    method: method.clone(),
                    path: hosted_path.clone(),
                    field: hosted_name.to_string(),
                });
                continue;
            };

            let skip = |facet| cx.config.is_skipped_facet(entry.path, entry.method, field, facet);
            let mut push = |facet, open: String, hosted: String| {
                failures.push(Incompatibility::BodyFacetMismatch {
                    method: method.clone(),
                    path: hosted_path.clone(),
                    field: field.to_string(),
                    facet,
                    open,
                    hosted,
                });
            };

            // Optional open fields may omit the format their hosted
            // counterpart echoes.
            let mut hosted_format = hosted_shape.format.clone();
            if open_shape.types.contains(NULL_TYPE)
                && open_shape.format.is_none()
                && hosted_format.is_some()
            {
                hosted_format = None;
            }
            let open_types = strip_null_marker(&open_shape.types);

            if !skip(PropertyFacet::Name) && hosted_name != hosted_key.as_str() {
                push(
                    PropertyFacet::Name,
                    hosted_name.to_string(),
                    hosted_key.clone(),
                );
            }
            if !skip(PropertyFacet::Types) && !open_types.is_subset(&hosted_shape.types) {
                push(
                    PropertyFacet::Types,
                    render_type_set(&open_types),
                    render_type_set(&hosted_shape.types),
                );
            }
            if !skip(PropertyFacet::Format) && open_shape.format != hosted_format {
                push(
                    PropertyFacet::Format,
                    render_option(&open_shape.format),
                    render_option(&hosted_format),
                );
            }
            if !skip(PropertyFacet::Default) && open_shape.default != hosted_shape.default {
                push(
                    PropertyFacet::Default,
                    render_default(&open_shape.default),
                    render_default(&hosted_shape.default),
                );
            }
            if !skip(PropertyFacet::Deprecated) && open_shape.deprecated != hosted_shape.deprecated
            {
                push(
                    PropertyFacet::Deprecated,
                    render_deprecated(open_shape.deprecated),
                    render_deprecated(hosted_shape.deprecated),
                );
            }
        }
    }

    failures
}

/// Extracts the request-body schema reference, trying the direct form first
/// and then the composition-wrapper form (`allOf` with the reference as its
/// first entry).
fn body_ref(operation: &Value) -> Option<String> {
    let schema = operation
        .get("requestBody")?
        .get("content")?
        .get("application/json")?
        .get("schema")?;
    if let Some(direct) = schema.get("$ref").and_then(Value::as_str) {
        return Some(direct.to_string());
    }
    schema
        .get("allOf")?
        .as_array()?
        .first()?
        .get("$ref")
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Resolves an operation's request body, substituting the empty descriptor
/// when there is no reference or it does not resolve. This is the one call
/// site where a lookup failure is recovered rather than propagated.
fn resolve_body(document: &ApiDocument, operation: &Value) -> Value {
    let reference = body_ref(operation);
    match resolve_ref(document.root(), reference.as_deref()) {
        Ok(Some(descriptor)) => descriptor.clone(),
        Ok(None) | Err(_) => empty_descriptor(),
    }
}

fn empty_descriptor() -> Value {
    json!({ "type": null, "properties": {} })
}

fn body_kind(descriptor: &Value) -> Option<String> {
    descriptor
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn properties(descriptor: &Value) -> Vec<(&String, &Value)> {
    descriptor
        .get("properties")
        .and_then(Value::as_object)
        .map(|properties| properties.iter().collect())
        .unwrap_or_default()
}

fn property_shapes(descriptor: &Value) -> IndexMap<String, PropertyShape> {
    properties(descriptor)
        .into_iter()
        .map(|(name, fragment)| (name.clone(), property_shape(fragment)))
        .collect()
}

fn render_option(value: &Option<String>) -> String {
    value.clone().unwrap_or_else(|| "none".to_string())
}

fn render_default(default: &NormalizedDefault) -> String {
    match default {
        NormalizedDefault::Absent => "none".to_string(),
        NormalizedDefault::EmptyList => "[]".to_string(),
        NormalizedDefault::EmptyMap => "{}".to_string(),
        NormalizedDefault::Literal(value) => value.to_string(),
    }
}

fn render_deprecated(deprecated: Option<bool>) -> String {
    match deprecated {
        None => "none".to_string(),
        Some(flag) => flag.to_string(),
    }
}
