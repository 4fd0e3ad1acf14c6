mod hierarchy;
mod range;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    match cli.command {
        Commands::Hierarchy(args) => hierarchy::run(&args, &output),
        Commands::Range(args) => range::run(&args, &output),
    }
}
