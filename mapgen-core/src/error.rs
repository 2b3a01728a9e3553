use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Result type for batch generation.
pub type Result<T> = std::result::Result<T, Error>;

/// Boxed error returned by an engine, kept as the source of [`Error::Generation`].
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Fatal conditions raised while processing a batch.
///
/// Every variant aborts the remainder of the batch. Artifacts written before
/// the failure stay on disk.
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    #[diagnostic(
        code(mapgen::read),
        help("check that the file exists and is readable UTF-8 text")
    )]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to generate {}: {source}", path.display())]
    #[diagnostic(code(mapgen::generation))]
    Generation {
        path: PathBuf,
        #[source]
        source: EngineError,
    },

    #[error("failed to write {}: {source}", path.display())]
    #[diagnostic(code(mapgen::write))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Read {
            path: path.into(),
            source,
        }
    }

    pub fn generation(path: impl Into<PathBuf>, source: impl Into<EngineError>) -> Self {
        Error::Generation {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Write {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the failure is attributed to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Error::Read { path, .. } | Error::Generation { path, .. } | Error::Write { path, .. } => {
                path
            }
        }
    }
}
