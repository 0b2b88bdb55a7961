use clap::Args;
use eyre::{Result, bail};
use uischema_ir::TypeExpression;

use super::{EngineArgs, UnwrapOrExit};
use crate::{ops, reports};

#[derive(Args)]
pub struct ExplainCommand {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Type name, optionally applied to arguments (e.g. `UI.Metal(UI.Text)`)
    #[arg(value_name = "TYPE")]
    pub ty: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExplainCommand {
    pub fn run(&self) -> Result<()> {
        let expr = uischema_catalogue::parse(&self.ty).unwrap_or_exit();
        let (name, args) = match &expr {
            TypeExpression::Reference(name) => (name.as_str(), &[][..]),
            TypeExpression::Generic(name, args) => (name.as_str(), args.as_slice()),
            other => bail!("'{}' is not a type name", other),
        };

        let engine = self.engine.load()?;
        let report = ops::explain(&engine, name, args).unwrap_or_exit();
        reports::print(&report, self.json)
    }
}
