use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

pub const MANIFEST_FILE: &str = "package.json";
pub const DEFAULT_MODEL_FILE: &str = "docmodel.json";

#[derive(Error, Debug)]
pub enum PackageError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// The declared fields this system reads from a package manifest. Unknown
/// fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub main: Option<String>,
    /// Linked model document, relative to the package root.
    #[serde(default)]
    pub doctest_model: Option<String>,
}

/// A located package manifest: the declared fields plus the path it was
/// found at.
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    pub path: PathBuf,
    pub manifest: PackageManifest,
}

impl PackageDescriptor {
    /// Directory containing the manifest.
    pub fn root(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Path of the linked model document this package declares, or the
    /// default document beside the manifest.
    pub fn model_path(&self) -> PathBuf {
        let relative = self
            .manifest
            .doctest_model
            .as_deref()
            .unwrap_or(DEFAULT_MODEL_FILE);
        self.root().join(relative)
    }
}

/// Walks from `start` toward the filesystem root and returns the nearest
/// package descriptor, or `None` when no ancestor carries one. Absence is
/// left for the caller to treat as fatal.
pub fn locate_package(start: &Path) -> Result<Option<PackageDescriptor>, PackageError> {
    for dir in start.ancestors() {
        let candidate = dir.join(MANIFEST_FILE);
        if !candidate.is_file() {
            continue;
        }

        let raw = fs::read_to_string(&candidate).map_err(|source| PackageError::Io {
            path: candidate.clone(),
            source,
        })?;
        let manifest = serde_json::from_str(&raw).map_err(|source| PackageError::Parse {
            path: candidate.clone(),
            source,
        })?;

        debug!("Located package manifest at {}", candidate.display());
        return Ok(Some(PackageDescriptor {
            path: candidate,
            manifest,
        }));
    }

    Ok(None)
}
