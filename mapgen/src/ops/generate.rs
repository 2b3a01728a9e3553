//! Generate operation - batch generation from definition files.

use std::{io, path::PathBuf};

use mapgen_core::{BatchOptions, BatchReport, DefinitionFile, Layout, Result, run_batch};
use mapgen_mavlink::MavlinkEngine;
use tracing::debug;

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Definition files in processing order.
    pub files: &'a [PathBuf],
    /// Force per-file artifacts.
    pub write: bool,
    /// Also write the magic number registry.
    pub magic: bool,
}

impl GenerateOptions<'_> {
    fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            write: self.write || self.magic,
            magic: self.magic,
        }
    }
}

/// Execute the generate operation.
///
/// Combined output goes to stdout, progress to stderr.
pub fn generate(opts: GenerateOptions) -> Result<BatchReport> {
    let files: Vec<DefinitionFile> = opts.files.iter().map(|p| DefinitionFile::new(p.as_path())).collect();

    let report = run_batch(
        &MavlinkEngine::new(),
        &files,
        opts.batch_options(),
        &Layout::default(),
        io::stdout().lock(),
        io::stderr().lock(),
    )?;

    debug!(
        mode = ?report.mode,
        artifacts = report.artifacts.len(),
        registry = ?report.registry,
        "batch complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_magic_implies_write() {
        let files = [PathBuf::from("a.xml")];
        let opts = GenerateOptions {
            files: &files,
            write: false,
            magic: true,
        };

        assert_eq!(
            opts.batch_options(),
            BatchOptions {
                write: true,
                magic: true
            }
        );
    }

    #[test]
    fn test_flags_default_off() {
        let files = [PathBuf::from("a.xml")];
        let opts = GenerateOptions {
            files: &files,
            write: false,
            magic: false,
        };

        assert_eq!(opts.batch_options(), BatchOptions::default());
    }
}
