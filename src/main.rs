use anyhow::Context;
use clap::Parser;
use oxcgrt_augment::cli::{init_logging, run, Cli};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    run(cli).context("oxcgrt-augment failed")
}
