use clap::Parser;
use stockroom::table;
use tracing::instrument;

use super::{Session, list::OutputFormat};

/// Command arguments for `inv summary`.
#[derive(Debug, Parser)]
pub struct Summary {
    /// Output format (default: table).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,

    /// Print `count=N quantity=Q` for scripting.
    #[arg(long, conflicts_with = "output")]
    quiet: bool,
}

impl Summary {
    #[instrument(level = "debug", skip(session))]
    pub fn run(self, session: &Session) -> anyhow::Result<()> {
        let summary = session.load()?.summary();

        if self.quiet {
            println!("count={} quantity={}", summary.count, summary.total_quantity);
            return Ok(());
        }

        match self.output {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
            OutputFormat::Table => println!("{}", table::render_summary(&summary)),
        }
        Ok(())
    }
}
