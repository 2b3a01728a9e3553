mod commands;
mod logging;
mod ops;

use eyre::Result;

use crate::commands::Cli;

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init();

    Cli::parse_args().run()
}
