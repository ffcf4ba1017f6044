use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "version mismatch for class '{class}': found {}, expected '{expected}'",
        found.as_deref().map_or("no version".to_string(), |v| format!("'{v}'"))
    )]
    VersionMismatch {
        class: String,
        found: Option<String>,
        expected: String,
    },

    #[error("entry-point class '{class}' is not declared in library '{library}'")]
    UnknownEntryPoint { class: String, library: String },

    #[error("failed to write '{path}'")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
