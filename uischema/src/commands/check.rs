use clap::Args;
use eyre::Result;

use super::EngineArgs;
use crate::{ops, reports};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let engine = self.engine.load()?;
        let report = ops::check(&engine, &self.engine.catalogues);
        reports::print(&report, self.json)?;

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
