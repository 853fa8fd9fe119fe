#![deny(missing_docs)]

//! # Type-Shape Normalization
//!
//! Extracts the comparable shape of a field's schema fragment — its logical
//! type set, format annotation, default value, and deprecation flag — and
//! equalizes the two documents' conventions for spelling optional fields.
//!
//! One convention wraps every non-required field in a nullable union
//! (`anyOf: [T, null]`); the other does not. [`wrap_optional_as_nullable_union`]
//! rewrites a descriptor copy into the wrapped form so both sides compare on
//! equal footing. The rewrite never touches the loaded document.

use serde_json::{json, Value};
use std::collections::BTreeSet;

/// The type tag marking nullability inside union types.
pub const NULL_TYPE: &str = "null";

/// A field default made comparable across documents.
///
/// Structurally-empty composite defaults collapse to sentinels so the two
/// documents' internal spellings of "empty" compare equal.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedDefault {
    /// No default declared.
    Absent,
    /// An empty list default, regardless of spelling.
    EmptyList,
    /// An empty mapping default, regardless of spelling.
    EmptyMap,
    /// Any other declared default, compared literally.
    Literal(Value),
}

/// The comparison tuple extracted from one field's schema fragment.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyShape {
    /// The logical type set (singular `type`, or the tags of an `anyOf`
    /// union).
    pub types: BTreeSet<String>,
    /// The format annotation, if any.
    pub format: Option<String>,
    /// The normalized default.
    pub default: NormalizedDefault,
    /// The deprecated flag; absent and declared-false are distinct.
    pub deprecated: Option<bool>,
}

/// Returns the logical type set of a fragment.
///
/// A singular `type` wins; otherwise the type tags of the `anyOf`
/// alternatives are collected (alternatives without a tag are skipped).
/// Order of alternatives never matters.
pub fn extract_type_set(fragment: &Value) -> BTreeSet<String> {
    let mut types = BTreeSet::new();
    if let Some(tag) = fragment.get("type").and_then(Value::as_str) {
        types.insert(tag.to_string());
    } else if let Some(alternatives) = fragment.get("anyOf").and_then(Value::as_array) {
        for alternative in alternatives {
            if let Some(tag) = alternative.get("type").and_then(Value::as_str) {
                types.insert(tag.to_string());
            }
        }
    }
    types
}

/// Returns the fragment's format annotation, falling back to the first
/// declared format among `anyOf` alternatives.
pub fn extract_format(fragment: &Value) -> Option<String> {
    if let Some(format) = fragment.get("format").and_then(Value::as_str) {
        return Some(format.to_string());
    }
    fragment
        .get("anyOf")?
        .as_array()?
        .iter()
        .find_map(|alternative| alternative.get("format").and_then(Value::as_str))
        .map(str::to_string)
}

/// Collapses a fragment's declared default into a comparable token.
pub fn normalize_default(fragment: &Value) -> NormalizedDefault {
    match fragment.get("default") {
        None => NormalizedDefault::Absent,
        Some(Value::Array(items)) if items.is_empty() => NormalizedDefault::EmptyList,
        Some(Value::Object(map)) if map.is_empty() => NormalizedDefault::EmptyMap,
        Some(other) => NormalizedDefault::Literal(other.clone()),
    }
}

/// Removes the null marker from a copy of `types`.
///
/// Used when comparing a field's non-null type options while tolerating one
/// document's habit of listing nullability explicitly.
pub fn strip_null_marker(types: &BTreeSet<String>) -> BTreeSet<String> {
    let mut stripped = types.clone();
    stripped.remove(NULL_TYPE);
    stripped
}

/// Renders a type set for diagnostics, e.g. `{string, null}`.
pub fn render_type_set(types: &BTreeSet<String>) -> String {
    let tags: Vec<&str> = types.iter().map(String::as_str).collect();
    format!("{{{}}}", tags.join(", "))
}

/// Extracts the full comparison tuple for one field.
pub fn property_shape(fragment: &Value) -> PropertyShape {
    PropertyShape {
        types: extract_type_set(fragment),
        format: extract_format(fragment),
        default: normalize_default(fragment),
        deprecated: fragment.get("deprecated").and_then(Value::as_bool),
    }
}

/// Rewrites every optional property of a type descriptor into a nullable
/// union, in a deep copy.
///
/// Each property not listed in `required` becomes `anyOf: [original, null]`
/// (merging into an existing union when one is present) and is added to the
/// copied `required` list. Re-applying the function to its own output is a
/// no-op, and the input descriptor is never mutated.
pub fn wrap_optional_as_nullable_union(descriptor: &Value) -> Value {
    let Some(source) = descriptor.as_object() else {
        return descriptor.clone();
    };
    let mut copy = source.clone();

    let required: BTreeSet<String> = copy
        .get("required")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    let mut wrapped_names = Vec::new();
    if let Some(properties) = copy.get_mut("properties").and_then(Value::as_object_mut) {
        for (name, fragment) in properties.iter_mut() {
            if required.contains(name) {
                continue;
            }
            wrap_fragment_nullable(fragment);
            wrapped_names.push(name.clone());
        }
    }

    if !wrapped_names.is_empty() {
        let required_list = copy
            .entry("required")
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Some(items) = required_list.as_array_mut() {
            for name in wrapped_names {
                items.push(Value::String(name));
            }
        }
    }

    Value::Object(copy)
}

fn wrap_fragment_nullable(fragment: &mut Value) {
    if let Some(alternatives) = fragment.get_mut("anyOf").and_then(Value::as_array_mut) {
        let has_null = alternatives
            .iter()
            .any(|alternative| alternative.get("type").and_then(Value::as_str) == Some(NULL_TYPE));
        if !has_null {
            alternatives.push(json!({ "type": NULL_TYPE }));
        }
        return;
    }
    *fragment = json!({ "anyOf": [fragment.clone(), { "type": NULL_TYPE }] });
}
