//! Directory walker shared by the schema registry and the example store.
//!
//! Both trees use the same layout: `<root>/<namespace>/<name>.json`. Files
//! at the root, non-JSON files, and directories nested below a namespace
//! are skipped.

use std::path::{Path, PathBuf};

use mhr_core::SchemaRef;
use serde_json::Value;
use tracing::{trace, warn};

/// A JSON document found under a namespaced directory tree.
#[derive(Debug, Clone)]
pub(crate) struct LoadedDocument {
    pub reference: SchemaRef,
    pub path: PathBuf,
    pub value: Value,
}

/// Why a document could not be loaded.
#[derive(Debug, Clone)]
pub(crate) struct LoadFailure {
    pub path: PathBuf,
    pub reason: String,
}

/// Read every `<namespace>/<name>.json` under `root`, sorted by reference.
pub(crate) fn load_namespaced_json(root: &Path) -> Result<Vec<LoadedDocument>, LoadFailure> {
    let fail = |path: &Path, reason: String| LoadFailure {
        path: path.to_path_buf(),
        reason,
    };

    let entries = std::fs::read_dir(root)
        .map_err(|e| fail(root, format!("cannot read directory: {e}")))?;

    let mut documents = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| fail(root, e.to_string()))?;
        let ns_path = entry.path();
        if !ns_path.is_dir() {
            trace!(path = %ns_path.display(), "skipping file outside a namespace");
            continue;
        }
        let Some(namespace) = ns_path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        let files = std::fs::read_dir(&ns_path)
            .map_err(|e| fail(&ns_path, format!("cannot read directory: {e}")))?;
        for file in files {
            let file = file.map_err(|e| fail(&ns_path, e.to_string()))?;
            let path = file.path();
            if path.is_dir() {
                warn!(path = %path.display(), "nested directories are not part of any namespace");
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|n| n.to_str()) else {
                continue;
            };
            let reference = SchemaRef::new(namespace, name)
                .map_err(|e| fail(&path, e.to_string()))?;

            let content = std::fs::read_to_string(&path)
                .map_err(|e| fail(&path, format!("cannot read file: {e}")))?;
            let value: Value = serde_json::from_str(&content)
                .map_err(|e| fail(&path, format!("invalid JSON: {e}")))?;

            documents.push(LoadedDocument {
                reference,
                path,
                value,
            });
        }
    }

    documents.sort_by(|a, b| a.reference.cmp(&b.reference));
    Ok(documents)
}
