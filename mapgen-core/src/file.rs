use std::path::{Path, PathBuf};

use tracing::info;

use crate::{Error, Result};

/// Generated source destined for one file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    path: PathBuf,
    content: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Write the artifact, replacing any existing file.
    pub fn write(&self) -> Result<()> {
        write_file(&self.path, &self.content).map_err(|e| Error::write(&self.path, e))?;
        info!(path = %self.path.display(), bytes = self.content.len(), "wrote artifact");
        Ok(())
    }
}

fn write_file(path: &Path, content: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}
