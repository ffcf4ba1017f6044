use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("version mismatch in package {id}: {first} vs. {second}")]
    DependencyConflict {
        id: String,
        first: String,
        second: String,
    },

    #[error("line {line} refers to package '{id}', which is not a known dependency")]
    UnknownDependency { id: String, line: usize },

    #[error("line {line}: `<<VERSION>>` placeholder does not name a package")]
    MissingPackageId { line: usize },

    #[error("invalid packages.config '{path}': {reason}")]
    InvalidPackagesConfig { path: String, reason: String },
}
