use std::{path::PathBuf, process};

use clap::{
    ArgAction, Parser,
    error::{ContextKind, ErrorKind},
};
use eyre::Result;
use tracing::debug;

use crate::ops::{self, GenerateOptions};

/// Exit status for unknown flags.
const EXIT_USAGE: i32 = 2;

/// A bare dash is rejected like any other unknown flag.
const STDIN_MARKER: &str = "-";

/// Extension trait for exiting on batch errors with a one-line diagnostic.
///
/// The full miette report, with code and help, is logged at debug level.
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for mapgen_core::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("ERROR: {}", e);
                debug!("{:?}", miette::Report::new(e));
                process::exit(1);
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mavlink-mapping-gen")]
#[command(disable_version_flag = true)]
#[command(about = "Generate TypeScript MAVLink mappings from XML definitions")]
pub(crate) struct Cli {
    /// Definition files, processed in the given order
    #[arg(value_name = "DEFINITIONS")]
    pub files: Vec<PathBuf>,

    /// Write each file's code next to it as <name>.ts instead of stdout
    #[arg(short, long)]
    pub write: bool,

    /// Also write magic-numbers.ts next to the first file (implies --write)
    #[arg(short, long)]
    pub magic: bool,

    /// Print version
    #[arg(short = 'V', long, action = ArgAction::SetTrue)]
    pub version: bool,
}

impl Cli {
    /// Parse process arguments, exiting on anything but a usable command line.
    ///
    /// `--help` and `--version` exit with status 0. Unknown flags, including a
    /// bare `-`, print one diagnostic line and exit with status 2.
    pub fn parse_args() -> Self {
        let cli = Self::try_parse().unwrap_or_else(|e| match e.kind() {
            ErrorKind::DisplayHelp => e.exit(),
            ErrorKind::UnknownArgument => {
                let arg = e
                    .get(ContextKind::InvalidArg)
                    .map(|v| v.to_string())
                    .unwrap_or_default();
                eprintln!("ERROR: unknown parameter: {}", arg);
                process::exit(EXIT_USAGE);
            }
            _ => {
                eprintln!("ERROR: {}", first_line(&e.to_string()));
                process::exit(EXIT_USAGE);
            }
        });

        if let Some(arg) = cli.unknown_positional() {
            eprintln!("ERROR: unknown parameter: {}", arg);
            process::exit(EXIT_USAGE);
        }

        if cli.version {
            println!("{}", env!("CARGO_PKG_VERSION"));
            process::exit(0);
        }

        cli
    }

    /// A positional that looks like a flag but was not parsed as one.
    fn unknown_positional(&self) -> Option<&str> {
        self.files
            .iter()
            .filter_map(|f| f.to_str())
            .find(|f| *f == STDIN_MARKER)
    }

    pub fn run(&self) -> Result<()> {
        if self.files.is_empty() {
            eprintln!("ERROR: no input specified");
            process::exit(1);
        }

        ops::generate(GenerateOptions {
            files: &self.files,
            write: self.write,
            magic: self.magic,
        })
        .unwrap_or_exit();

        Ok(())
    }
}

fn first_line(rendered: &str) -> &str {
    let line = rendered.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("mavlink-mapping-gen").chain(args.iter().copied()))
    }

    #[test]
    fn test_positional_files_keep_order() {
        let cli = parse(&["b.xml", "a.xml"]).unwrap();
        assert_eq!(cli.files, vec![PathBuf::from("b.xml"), PathBuf::from("a.xml")]);
        assert!(!cli.write);
        assert!(!cli.magic);
    }

    #[test]
    fn test_short_and_long_flags() {
        let cli = parse(&["-w", "--magic", "a.xml"]).unwrap();
        assert!(cli.write);
        assert!(cli.magic);

        let cli = parse(&["-wm", "a.xml"]).unwrap();
        assert!(cli.write && cli.magic);
    }

    #[test]
    fn test_no_files_parses() {
        let cli = parse(&[]).unwrap();
        assert!(cli.files.is_empty());
    }

    #[test]
    fn test_unknown_flag_reports_argument() {
        let err = parse(&["--bogus", "a.xml"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
        assert_eq!(
            err.get(ContextKind::InvalidArg).map(|v| v.to_string()),
            Some("--bogus".to_string())
        );
    }

    #[test]
    fn test_help_is_display_kind() {
        assert_eq!(parse(&["-h"]).unwrap_err().kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_is_a_plain_flag() {
        assert!(parse(&["-V"]).unwrap().version);
        assert!(parse(&["--version", "a.xml"]).unwrap().version);
        assert!(!parse(&["a.xml"]).unwrap().version);
    }

    #[test]
    fn test_bare_dash_is_unknown() {
        let cli = parse(&["a.xml", "-"]).unwrap();
        assert_eq!(cli.unknown_positional(), Some("-"));

        let cli = parse(&["a.xml", "b.xml"]).unwrap();
        assert_eq!(cli.unknown_positional(), None);
    }

    #[test]
    fn test_first_line_strips_prefix() {
        assert_eq!(first_line("error: bad thing\n\nUsage: x"), "bad thing");
        assert_eq!(first_line(""), "");
    }
}
