//! Core operations.
//!
//! Business logic behind the command line, separated from argument parsing.

pub mod generate;

pub use generate::{GenerateOptions, generate};
