use docmodel::extract::ProgramTests;
use docmodel::loader::{self, LoadError};
use docmodel::package::{self, PackageDescriptor, PackageError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ProjectError {
    #[error("No package manifest found at or above {path}")]
    PackageNotFound { path: PathBuf },

    #[error(transparent)]
    Package(#[from] PackageError),

    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Resolves the package at `path` and extracts its doctest tree. Both fatal
/// setup paths surface here — before any report line is printed: a missing
/// package manifest and an unloadable linked model.
pub fn load_project(
    path: &Path,
    model_override: Option<&Path>,
) -> Result<(PackageDescriptor, ProgramTests), ProjectError> {
    let descriptor =
        package::locate_package(path)?.ok_or_else(|| ProjectError::PackageNotFound {
            path: path.to_path_buf(),
        })?;

    let model_path = model_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| descriptor.model_path());
    let program = loader::load_program(&model_path)?;

    let tests = ProgramTests::from_program(&program);
    info!(
        "Extracted {} symbols / {} test units from {} files",
        tests.total_symbols(),
        tests.total_units(),
        tests.files.len()
    );
    Ok((descriptor, tests))
}
