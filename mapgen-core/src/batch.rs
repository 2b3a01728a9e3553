//! Sequential processing of a batch of definition files.

use std::{io::Write, path::PathBuf};

use tracing::info;

use crate::{
    Artifact, DefinitionFile, Layout, Result,
    engine::Engine,
    invoker::Invoker,
    registry::{MagicNumberRegistry, fold_messages, generate_magic_numbers},
    router::{BatchOptions, OutputMode, Router},
};

/// Summary of a completed batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    pub mode: OutputMode,
    /// Per-file artifacts in processing order.
    pub artifacts: Vec<PathBuf>,
    /// Registry artifact, when requested.
    pub registry: Option<PathBuf>,
    pub magic_numbers: MagicNumberRegistry,
}

/// Generate every file in order.
///
/// `stream` receives combined output, `progress` receives one
/// `Generating <file>... done` line per file. The first failure aborts the
/// batch; artifacts written up to that point are kept.
pub fn run_batch<E, W, P>(
    engine: &E,
    files: &[DefinitionFile],
    options: BatchOptions,
    layout: &Layout,
    stream: W,
    mut progress: P,
) -> Result<BatchReport>
where
    E: Engine,
    W: Write,
    P: Write,
{
    let mode = OutputMode::select(files.len(), options);
    info!(?mode, files = files.len(), "starting batch");

    let invoker = Invoker::new(engine, layout);
    let mut router = Router::new(mode, layout, stream);
    let mut registry = MagicNumberRegistry::new();
    let mut artifacts = Vec::new();

    for file in files {
        let _ = write!(progress, "Generating {}...", file.display_name());
        let _ = progress.flush();

        let step = invoker.invoke(file).and_then(|result| {
            registry = fold_messages(std::mem::take(&mut registry), &result.descriptors.messages);
            router.route(file, &result)
        });

        match step {
            Ok(written) => {
                let _ = writeln!(progress, " done");
                artifacts.extend(written);
            }
            Err(e) => {
                let _ = writeln!(progress);
                return Err(e);
            }
        }
    }

    let registry_path = match (options.magic, files.first()) {
        (true, Some(first)) => {
            let artifact = Artifact::new(
                layout.registry_path(first),
                generate_magic_numbers(&registry),
            );
            artifact.write()?;
            Some(artifact.path().to_path_buf())
        }
        _ => None,
    };

    Ok(BatchReport {
        mode: router.mode(),
        artifacts,
        registry: registry_path,
        magic_numbers: registry,
    })
}
