#![deny(missing_docs)]

//! # Parameter Compatibility
//!
//! Compares the parameter sets of routes present in both documents.
//! Hosted-side infrastructure parameters are discarded before comparison, and
//! the version header is dropped from the open side on route groups that do
//! not require it.

use crate::report::Incompatibility;
use crate::run::RunContext;
use crate::shape::NULL_TYPE;
use crate::translate::{translate_path, RouteGroup};
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;

/// One parameter's comparison record: location, required flag, and the
/// null-stripped (type, format) alternatives.
#[derive(Debug, Clone, PartialEq)]
struct ParamRecord {
    location: Option<String>,
    required: bool,
    schema: Vec<(Option<String>, Option<String>)>,
}

impl fmt::Display for ParamRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alternatives: Vec<String> = self
            .schema
            .iter()
            .map(|(ty, format)| match (ty, format) {
                (Some(ty), Some(format)) => format!("{}/{}", ty, format),
                (Some(ty), None) => ty.clone(),
                (None, Some(format)) => format!("?/{}", format),
                (None, None) => "?".to_string(),
            })
            .collect();
        write!(
            f,
            "({}, required={}, [{}])",
            self.location.as_deref().unwrap_or("?"),
            self.required,
            alternatives.join(", ")
        )
    }
}

/// Checks that each shared route declares the same parameters on both sides.
///
/// Pairs whose translated path is absent from the hosted document are
/// skipped; existence is the route checker's job. Every differing parameter
/// name yields its own diagnostic.
pub fn check_parameters(cx: &RunContext<'_>) -> Vec<Incompatibility> {
    let mut failures = Vec::new();

    for entry in cx.open_routes() {
        let hosted_path = translate_path(entry.path, &cx.config.unscoped_paths);
        let Some(hosted_operation) = cx.hosted.operation(&hosted_path, entry.method) else {
            continue;
        };

        let hosted_records = parameter_records(hosted_operation, |name| {
            !cx.config.is_infrastructure_param(name)
        });
        let mut open_records = parameter_records(entry.operation, |_| true);

        if !RouteGroup::classify(&hosted_path).requires_version_header() {
            open_records.shift_remove(cx.config.version_header.as_str());
        }

        let method = entry.method.to_uppercase();

        for (name, open_record) in &open_records {
            match hosted_records.get(name) {
                Some(hosted_record) if hosted_record == open_record => {}
                hosted_record => failures.push(Incompatibility::ParameterMismatch {
                    method: method.clone(),
                    path: hosted_path.clone(),
                    name: name.clone(),
                    open: Some(open_record.to_string()),
                    hosted: hosted_record.map(|record| record.to_string()),
                }),
            }
        }

        for (name, hosted_record) in &hosted_records {
            if !open_records.contains_key(name) {
                failures.push(Incompatibility::ParameterMismatch {
                    method: method.clone(),
                    path: hosted_path.clone(),
                    name: name.clone(),
                    open: None,
                    hosted: Some(hosted_record.to_string()),
                });
            }
        }
    }

    failures
}

fn parameter_records(
    operation: &Value,
    keep: impl Fn(&str) -> bool,
) -> IndexMap<String, ParamRecord> {
    let mut records = IndexMap::new();
    let Some(parameters) = operation.get("parameters").and_then(Value::as_array) else {
        return records;
    };
    for parameter in parameters {
        let Some(name) = parameter.get("name").and_then(Value::as_str) else {
            continue;
        };
        if !keep(name) {
            continue;
        }
        records.insert(name.to_string(), param_record(parameter));
    }
    records
}

fn param_record(parameter: &Value) -> ParamRecord {
    let schema = parameter.get("schema");
    ParamRecord {
        location: parameter
            .get("in")
            .and_then(Value::as_str)
            .map(str::to_string),
        required: parameter
            .get("required")
            .and_then(Value::as_bool)
            .unwrap_or(false),
        schema: schema.map(type_format_alternatives).unwrap_or_default(),
    }
}

/// Yields the (type, format) alternatives of a parameter schema with the null
/// alternative filtered, so union and singular schemas normalize identically
/// on both sides.
fn type_format_alternatives(schema: &Value) -> Vec<(Option<String>, Option<String>)> {
    if let Some(alternatives) = schema.get("anyOf").and_then(Value::as_array) {
        return alternatives
            .iter()
            .filter(|alternative| {
                alternative.get("type").and_then(Value::as_str) != Some(NULL_TYPE)
            })
            .map(|alternative| (field_str(alternative, "type"), field_str(alternative, "format")))
            .collect();
    }
    vec![(field_str(schema, "type"), field_str(schema, "format"))]
}

fn field_str(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}
