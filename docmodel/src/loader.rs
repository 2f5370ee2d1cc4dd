use crate::types::LinkedProgram;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read linked model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse linked model {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loads the linked program document produced by the documentation
/// toolchain. A missing or malformed document is fatal for the run: there
/// is nothing to extract from.
pub fn load_program(path: &Path) -> Result<LinkedProgram, LoadError> {
    let raw = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let program: LinkedProgram = serde_json::from_str(&raw).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        "Loaded linked model from {} ({} files)",
        path.display(),
        program.files.len()
    );
    Ok(program)
}
