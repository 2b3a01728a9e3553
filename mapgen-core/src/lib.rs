//! Batch orchestration for MAVLink mapping generation.
//!
//! This crate drives a code-generation [`Engine`] over an ordered list of
//! definition files. It takes care of the concerns that span files:
//!
//! - [`invoker`] - runs the engine for one file, prefixing the import template
//! - [`registry`] - folds message magic numbers into one registry
//! - [`router`] - sends generated code to stdout or to per-file artifacts
//! - [`batch`] - processes a batch in order, failing fast

pub mod batch;
mod definition;
pub mod engine;
mod error;
mod file;
pub mod invoker;
pub mod registry;
pub mod router;

#[cfg(test)]
mod testing;

pub use batch::{BatchReport, run_batch};
pub use definition::{DefinitionFile, Layout};
pub use engine::{
    CommandDescriptor, Descriptors, Engine, EnumDescriptor, LineBuffer, LineSink,
    MessageDescriptor,
};
pub use error::{EngineError, Error, Result};
pub use file::Artifact;
pub use invoker::{GenerationResult, Invoker};
pub use registry::{MagicNumberRegistry, fold_messages, generate_magic_numbers};
pub use router::{BatchOptions, OutputMode, Router};
