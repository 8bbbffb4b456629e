//! CLI entry point for the level solver and generator

use clap::Parser;
use minesetter::io::cli::{Cli, CommandRunner};

fn main() -> minesetter::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level())
        .parse_default_env()
        .init();

    let mut runner = CommandRunner::new(cli);
    runner.run()
}
