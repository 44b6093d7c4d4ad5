//! Key coverage check across the catalogs of one directory.
//!
//! Every catalog next to a reference catalog must carry all of the
//! reference's keys. Extra keys are fine.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use glob::{Pattern, glob};

use crate::catalog::{CATALOG_EXTENSION, Catalog};

/// A reference key absent from a sibling catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingKey {
    pub file_path: PathBuf,
    pub key: String,
}

#[derive(Debug)]
pub struct CompareReport {
    pub reference: PathBuf,
    /// Sibling catalogs that were compared against the reference.
    pub compared: Vec<PathBuf>,
    /// Missing keys in discovery order. The order is not part of the
    /// contract and may change between releases.
    pub missing: Vec<MissingKey>,
}

impl CompareReport {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Compare every `*.json` catalog in the reference's directory against it.
///
/// Unreadable or malformed catalogs are errors, as is a reference without
/// entries.
pub fn compare_catalogs(reference: &Path) -> Result<CompareReport> {
    if reference.extension().and_then(|e| e.to_str()) != Some(CATALOG_EXTENSION) {
        bail!(
            "Reference catalog must end with .{}: {}",
            CATALOG_EXTENSION,
            reference.display()
        );
    }
    let reference_catalog = Catalog::read(reference)?;
    if reference_catalog.is_empty() {
        bail!("No entries read from {}", reference.display());
    }

    let dir = reference
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let pattern = format!(
        "{}/*.{}",
        Pattern::escape(&dir.to_string_lossy()).trim_end_matches('/'),
        CATALOG_EXTENSION
    );

    let mut report = CompareReport {
        reference: reference.to_path_buf(),
        compared: Vec::new(),
        missing: Vec::new(),
    };
    for entry in glob(&pattern)? {
        let path = entry?;
        if path.file_name() == reference.file_name() || !path.is_file() {
            continue;
        }
        tracing::debug!(file = %path.display(), "comparing catalog");
        let catalog = Catalog::read(&path)?;
        report.missing.extend(
            reference_catalog
                .keys()
                .filter(|key| !catalog.contains_key(key))
                .map(|key| MissingKey {
                    file_path: path.clone(),
                    key: key.to_string(),
                }),
        );
        report.compared.push(path);
    }
    Ok(report)
}
