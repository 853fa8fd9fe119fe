#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `CheckError` enum used across the workspace.

use derive_more::{Display, From};

/// Errors raised while loading or walking an API description document.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum CheckError {
    /// A reference pointer could not be resolved within its own document.
    #[from(ignore)]
    #[display("Unresolved reference '{reference}': missing segment '{segment}'")]
    UnresolvedReference {
        /// The full reference string (e.g. `#/components/schemas/Missing`).
        reference: String,
        /// The path segment that was absent.
        segment: String,
    },

    /// The document could not be parsed or lacks a required section.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display("Malformed document: {_0}")]
    Document(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CheckError {}

/// Helper type alias for Result using CheckError.
pub type CheckResult<T> = Result<T, CheckError>;
