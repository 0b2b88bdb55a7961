mod check;
mod explain;
mod validate;

use std::path::PathBuf;

use check::CheckCommand;
use clap::{Args, Parser, Subcommand};
use eyre::{Context, Result};
use explain::ExplainCommand;
use uischema_catalogue::Catalogue;
use uischema_engine::{Engine, EngineConfig};
use validate::ValidateCommand;

/// Extension trait for exiting on catalogue and engine errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for uischema_catalogue::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for std::result::Result<T, uischema_catalogue::SyntaxError> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for uischema_engine::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "uischema")]
#[command(version)]
#[command(about = "Check widget catalogues and validate values against them")]
pub(crate) struct Cli {
    /// Increase log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Check(cmd) => cmd.run(),
            Commands::Explain(cmd) => cmd.run(),
            Commands::Validate(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve every definition and run the catalogue lints
    Check(CheckCommand),

    /// Show the flattened fields of a widget type
    Explain(ExplainCommand),

    /// Validate a JSON value against a type expression
    Validate(ValidateCommand),
}

/// Catalogue files plus engine settings, shared by every subcommand.
#[derive(Args, Debug)]
pub(crate) struct EngineArgs {
    /// Catalogue file (TOML, or JSON by extension); repeat to layer catalogues
    #[arg(short, long = "catalogue", required = true)]
    pub catalogues: Vec<PathBuf>,

    /// Engine settings file (`max-depth`, `prelude`)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Deepest supertype nesting and alias chain
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Do not register the bundled `Flag`, `Text` and `Maybe` types
    #[arg(long)]
    pub no_prelude: bool,
}

impl EngineArgs {
    /// Settings from the config file, overridden by flags.
    pub fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let content = std::fs::read_to_string(path)
                    .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
                toml::from_str(&content)
                    .wrap_err_with(|| format!("Invalid engine config in {}", path.display()))?
            }
            None => EngineConfig::default(),
        };
        if let Some(max_depth) = self.max_depth {
            config.max_depth = max_depth;
        }
        if self.no_prelude {
            config.prelude = false;
        }
        Ok(config)
    }

    /// Parse every catalogue and build the engine, exiting on the first
    /// malformed catalogue or rejected definition.
    pub fn load(&self) -> Result<Engine> {
        let config = self.engine_config()?;
        let catalogues: Vec<Catalogue> = self
            .catalogues
            .iter()
            .map(|path| Catalogue::from_file(path).unwrap_or_exit())
            .collect();
        tracing::debug!(catalogues = catalogues.len(), ?config, "loading engine");
        Ok(Engine::load(&catalogues, config).unwrap_or_exit())
    }
}
