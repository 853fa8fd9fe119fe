#![deny(missing_docs)]

//! # Check Command
//!
//! Loads the open and hosted API descriptions, runs the full compatibility
//! check, and surfaces every diagnostic. The core engine only sees
//! fully-parsed documents; acquisition and reporting both live here.

use crate::error::{CliError, CliResult};
use oacheck_core::{run_checks, ApiDocument, CheckConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the check command.
#[derive(clap::Args, Debug, Clone)]
pub struct CheckArgs {
    /// Path to the open-variant API description (JSON or YAML).
    pub open: PathBuf,

    /// Path to the hosted-variant API description (JSON or YAML).
    pub hosted: PathBuf,

    /// Emit the report as JSON instead of plain text.
    #[clap(long)]
    pub json: bool,
}

/// Executes the check command.
///
/// Returns `Err(CliError::Incompatible)` when any checker found a divergence,
/// so the process exits nonzero for CI.
pub fn execute(args: &CheckArgs) -> CliResult<()> {
    let open = load_document(&args.open)?;
    let hosted = load_document(&args.hosted)?;

    let config = CheckConfig::default();
    let report = run_checks(&open, &hosted, &config);

    if args.json {
        let rendered = serde_json::to_string_pretty(&report)
            .map_err(|e| CliError::General(e.to_string()))?;
        println!("{}", rendered);
    } else {
        for gap in &report.gaps {
            println!("note: {}", gap);
        }
        for issue in &report.incompatibilities {
            println!("{}", issue);
        }
        if report.is_compatible() {
            println!("Documents are compatible.");
        }
    }

    if report.is_compatible() {
        Ok(())
    } else {
        Err(CliError::Incompatible(report.incompatibilities.len()))
    }
}

/// Reads and parses one API description from disk.
fn load_document(path: &Path) -> CliResult<ApiDocument> {
    let content = fs::read_to_string(path)?;
    let document = ApiDocument::parse(&content)?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_fixture(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_document_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "open.yaml", "info:\n  version: 3.1.0\npaths: {}\n");
        let document = load_document(&path).unwrap();
        assert_eq!(document.version(), Some("3.1.0"));
    }

    #[test]
    fn test_load_document_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(&dir, "open.json", r#"{"info": {"version": "2.19.0"}}"#);
        let document = load_document(&path).unwrap();
        assert_eq!(document.version(), Some("2.19.0"));
    }

    #[test]
    fn test_load_document_missing_file() {
        let err = load_document(Path::new("/definitely/not/here.yaml")).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_execute_reports_incompatibility() {
        let dir = tempfile::tempdir().unwrap();
        let open = write_fixture(
            &dir,
            "open.yaml",
            "info:\n  version: 3.1.0\npaths:\n  /api/flows/:\n    get:\n      tags: [Flows]\n",
        );
        let hosted = write_fixture(&dir, "hosted.yaml", "paths: {}\n");

        let args = CheckArgs {
            open,
            hosted,
            json: false,
        };
        let err = execute(&args).unwrap_err();
        assert!(matches!(err, CliError::Incompatible(1)));
    }

    #[test]
    fn test_execute_passes_for_identical_documents() {
        let dir = tempfile::tempdir().unwrap();
        let open = write_fixture(
            &dir,
            "open.yaml",
            "info:\n  version: 3.1.0\npaths:\n  /api/collections/views/{view}:\n    get: {}\n",
        );
        let hosted = write_fixture(
            &dir,
            "hosted.yaml",
            "paths:\n  /api/collections/views/{view}:\n    get: {}\n",
        );

        let args = CheckArgs {
            open,
            hosted,
            json: true,
        };
        execute(&args).unwrap();
    }
}
