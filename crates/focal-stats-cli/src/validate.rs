//! Input and output directory checks run before scanning.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

/// A directory argument that cannot be used.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// An input path is missing or not a directory.
    #[error("input directory {} does not exist or is not a directory", .0.display())]
    InputMissing(PathBuf),

    /// An input directory cannot be listed.
    #[error("input directory {} is not readable", path.display())]
    InputUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory cannot be created.
    #[error("cannot create output directory {}", path.display())]
    OutputCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output directory exists but files cannot be created in it.
    #[error("output directory {} is not writable", path.display())]
    OutputNotWritable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Checks that every input directory exists and can be listed.
///
/// # Errors
///
/// Returns the first directory that fails.
pub fn validate_input_dirs(dirs: &[PathBuf]) -> Result<(), ValidationError> {
    for dir in dirs {
        if !dir.is_dir() {
            return Err(ValidationError::InputMissing(dir.clone()));
        }
        fs::read_dir(dir).map_err(|source| ValidationError::InputUnreadable {
            path: dir.clone(),
            source,
        })?;
    }
    Ok(())
}

/// Creates the output directory (and parents) if needed and checks that a
/// file can be created in it.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or written to.
pub fn prepare_output_dir(dir: &Path) -> Result<(), ValidationError> {
    fs::create_dir_all(dir).map_err(|source| ValidationError::OutputCreate {
        path: dir.to_path_buf(),
        source,
    })?;

    // the probe file is removed when dropped
    let probe = tempfile::Builder::new()
        .prefix(".focal-stats-")
        .tempfile_in(dir)
        .map_err(|source| ValidationError::OutputNotWritable {
            path: dir.to_path_buf(),
            source,
        })?;
    debug!("Output directory writable: {}", probe.path().display());

    Ok(())
}
