use std::{io::Read, path::PathBuf};

use clap::Args;
use eyre::{Context, Result};
use uischema_ir::Value;

use super::{EngineArgs, UnwrapOrExit};
use crate::{ops, reports};

#[derive(Args)]
pub struct ValidateCommand {
    #[command(flatten)]
    pub engine: EngineArgs,

    /// Type expression the value must satisfy (e.g. `UI.List` or `[UI.Item]?`)
    #[arg(value_name = "TYPE")]
    pub ty: String,

    /// JSON file holding the value, or `-` for stdin
    #[arg(value_name = "VALUE")]
    pub value: PathBuf,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,
}

impl ValidateCommand {
    pub fn run(&self) -> Result<()> {
        let target = uischema_catalogue::parse(&self.ty).unwrap_or_exit();
        let value = self.read_value()?;

        let engine = self.engine.load()?;
        let report = ops::validate(&engine, &target, &value, &self.value).unwrap_or_exit();
        reports::print(&report, self.json)?;

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }

    fn read_value(&self) -> Result<Value> {
        let content = if self.value.as_os_str() == "-" {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .wrap_err("Failed to read value from stdin")?;
            buf
        } else {
            std::fs::read_to_string(&self.value)
                .wrap_err_with(|| format!("Failed to read {}", self.value.display()))?
        };

        let json: serde_json::Value = serde_json::from_str(&content)
            .wrap_err_with(|| format!("{} is not valid JSON", self.value.display()))?;
        Ok(Value::from(json))
    }
}
