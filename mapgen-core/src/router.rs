//! Decides where generated code goes.

use std::{io::Write, path::PathBuf};

use crate::{Artifact, DefinitionFile, Error, Layout, Result, invoker::GenerationResult};

/// Flags that influence routing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    /// Force per-file artifacts.
    pub write: bool,
    /// Also write the magic number registry. Implies `write`.
    pub magic: bool,
}

/// Where a batch writes generated code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Everything goes to one aggregate stream.
    Combined,
    /// One artifact per definition file.
    PerFile,
}

impl OutputMode {
    /// Several files cannot share one stream, and the registry needs the
    /// per-file artifacts next to it.
    pub fn select(file_count: usize, options: BatchOptions) -> Self {
        if options.write || options.magic || file_count > 1 {
            OutputMode::PerFile
        } else {
            OutputMode::Combined
        }
    }
}

/// Routes each file's result according to a mode fixed for the batch.
pub struct Router<'a, W> {
    mode: OutputMode,
    layout: &'a Layout,
    stream: W,
}

impl<'a, W: Write> Router<'a, W> {
    pub fn new(mode: OutputMode, layout: &'a Layout, stream: W) -> Self {
        Self {
            mode,
            layout,
            stream,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Emit one file's code. Returns the artifact path in per-file mode.
    pub fn route(
        &mut self,
        file: &DefinitionFile,
        result: &GenerationResult,
    ) -> Result<Option<PathBuf>> {
        match self.mode {
            OutputMode::Combined => {
                self.stream
                    .write_all(result.code().as_bytes())
                    .and_then(|_| self.stream.flush())
                    .map_err(|e| Error::write("<stdout>", e))?;
                Ok(None)
            }
            OutputMode::PerFile => {
                let artifact = Artifact::new(self.layout.artifact_path(file), result.code());
                artifact.write()?;
                Ok(Some(artifact.path().to_path_buf()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::engine::Descriptors;

    fn result(lines: &[&str]) -> GenerationResult {
        GenerationResult {
            module_name: "minimal".to_string(),
            lines: lines.iter().map(|l| l.to_string()).collect(),
            descriptors: Descriptors::default(),
        }
    }

    #[test]
    fn test_single_file_without_flags_is_combined() {
        assert_eq!(
            OutputMode::select(1, BatchOptions::default()),
            OutputMode::Combined
        );
    }

    #[test]
    fn test_multiple_files_force_per_file() {
        assert_eq!(
            OutputMode::select(2, BatchOptions::default()),
            OutputMode::PerFile
        );
    }

    #[test]
    fn test_write_flag_forces_per_file() {
        let options = BatchOptions {
            write: true,
            magic: false,
        };
        assert_eq!(OutputMode::select(1, options), OutputMode::PerFile);
    }

    #[test]
    fn test_magic_flag_implies_per_file() {
        let options = BatchOptions {
            write: false,
            magic: true,
        };
        assert_eq!(OutputMode::select(1, options), OutputMode::PerFile);
    }

    #[test]
    fn test_combined_writes_to_stream() {
        let layout = Layout::default();
        let mut out = Vec::new();
        let mut router = Router::new(OutputMode::Combined, &layout, &mut out);

        let written = router
            .route(&DefinitionFile::new("minimal.xml"), &result(&["a", "b"]))
            .unwrap();

        assert_eq!(written, None);
        assert_eq!(String::from_utf8(out).unwrap(), "a\nb\n");
    }

    #[test]
    fn test_per_file_writes_artifact() {
        let temp = TempDir::new().unwrap();
        let file = DefinitionFile::new(temp.path().join("minimal.xml"));
        let layout = Layout::default();
        let mut out = Vec::new();
        let mut router = Router::new(OutputMode::PerFile, &layout, &mut out);

        let written = router.route(&file, &result(&["a", "b"])).unwrap();

        let expected = temp.path().join("minimal.ts");
        assert_eq!(written, Some(expected.clone()));
        assert_eq!(fs::read_to_string(expected).unwrap(), "a\nb\n");
        assert!(out.is_empty());
    }
}
