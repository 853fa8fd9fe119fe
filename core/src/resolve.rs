#![deny(missing_docs)]

//! # Reference Resolution
//!
//! Resolves internal reference pointers of the form `#/a/b/c` against the
//! document they appear in. References never cross documents.

use crate::error::{CheckError, CheckResult};
use serde_json::Value;

/// Resolves `reference` against `root`.
///
/// Returns `Ok(None)` when no reference was given. Fails with
/// [`CheckError::UnresolvedReference`] when any path segment is absent; call
/// sites that tolerate a missing target substitute their own default
/// descriptor.
pub fn resolve_ref<'a>(
    root: &'a Value,
    reference: Option<&str>,
) -> CheckResult<Option<&'a Value>> {
    let Some(reference) = reference else {
        return Ok(None);
    };
    if reference.is_empty() {
        return Ok(None);
    }

    let mut current = root;
    for segment in reference.split('/') {
        if segment == "#" {
            continue;
        }
        let key = decode_pointer_segment(segment);
        current = current
            .get(key.as_str())
            .ok_or_else(|| CheckError::UnresolvedReference {
                reference: reference.to_string(),
                segment: key.clone(),
            })?;
    }
    Ok(Some(current))
}

/// Decodes a JSON Pointer segment (handles `~1` and `~0`).
fn decode_pointer_segment(segment: &str) -> String {
    segment.replace("~1", "/").replace("~0", "~")
}
