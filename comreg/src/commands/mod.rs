mod check;
mod completions;
mod generate;
mod next_version;
mod stamp;

use check::CheckCommand;
use clap::{Parser, Subcommand};
use completions::CompletionsCommand;
use eyre::Result;
use generate::GenerateCommand;
use next_version::NextVersionCommand;
use stamp::StampCommand;

/// Extension trait for exiting on source errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for comreg_manifest::Result<T> {
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

impl<T> UnwrapOrExit<T> for comreg_idl::Result<T> {
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
#[command(name = "comreg")]
#[command(version)]
#[command(about = "Generate COM registrar scripts from IDL type libraries")]
pub(crate) struct Cli {
    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        match &self.command {
            Commands::Generate(cmd) => cmd.run(),
            Commands::Check(cmd) => cmd.run(),
            Commands::NextVersion(cmd) => cmd.run(),
            Commands::Stamp(cmd) => cmd.run(),
            Commands::Completions(cmd) => cmd.run(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Generate .rgs scripts from comreg.toml
    Generate(GenerateCommand),

    /// Validate comreg.toml and the IDL without writing files
    Check(CheckCommand),

    /// Print the next release version derived from git tags
    NextVersion(NextVersionCommand),

    /// Fill in version, URL and dependencies of a .nuspec or .autopkg file
    Stamp(StampCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),
}
