//! Runs the engine for a single definition file.

use std::{fs, io};

use tracing::debug;

use crate::{
    DefinitionFile, Error, Layout, Result,
    engine::{Descriptors, Engine, LineBuffer, LineSink},
};

/// Output of one engine run, held in memory until it is routed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub module_name: String,
    /// Emitted lines, import template first.
    pub lines: Vec<String>,
    pub descriptors: Descriptors,
}

impl GenerationResult {
    /// Generated code as written to an artifact or the aggregate stream.
    pub fn code(&self) -> String {
        let mut code = self.lines.join("\n");
        code.push('\n');
        code
    }
}

/// Invokes an [`Engine`] once per definition file.
pub struct Invoker<'a, E> {
    engine: &'a E,
    layout: &'a Layout,
}

impl<'a, E: Engine> Invoker<'a, E> {
    pub fn new(engine: &'a E, layout: &'a Layout) -> Self {
        Self { engine, layout }
    }

    /// Generate code for `file` without touching the disk.
    pub fn invoke(&self, file: &DefinitionFile) -> Result<GenerationResult> {
        let source = fs::read_to_string(file.path()).map_err(|e| Error::read(file.path(), e))?;

        let mut sink = LineBuffer::new();
        if let Some(template) = self.read_template(file)? {
            sink.append_line(&template);
        }

        debug!(module = file.module_name(), "invoking engine");
        let descriptors = self
            .engine
            .generate(&source, &mut sink, file.module_name())
            .map_err(|e| Error::generation(file.path(), e))?;

        debug!(
            module = file.module_name(),
            lines = sink.len(),
            messages = descriptors.messages.len(),
            "engine finished"
        );

        Ok(GenerationResult {
            module_name: file.module_name().to_string(),
            lines: sink.drain(),
            descriptors,
        })
    }

    fn read_template(&self, file: &DefinitionFile) -> Result<Option<String>> {
        let path = self.layout.template_path(file);
        match fs::read(&path) {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| Error::read(&path, io::Error::new(io::ErrorKind::InvalidData, e))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::read(&path, e)),
        }
    }
}
