//! `inv`: a single-user inventory tracker backed by a plain-text file.

use clap::Parser;

mod cli;

fn main() -> anyhow::Result<()> {
    cli::Cli::parse().run()
}
