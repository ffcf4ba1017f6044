use std::path::PathBuf;

use clap::{Args, ValueEnum};
use comreg_core::VersionPart;
use eyre::Result;

use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

/// Version component to increment
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Increment {
    Major,
    Minor,
    Patch,
}

impl From<Increment> for VersionPart {
    fn from(increment: Increment) -> Self {
        match increment {
            Increment::Major => VersionPart::Major,
            Increment::Minor => VersionPart::Minor,
            Increment::Patch => VersionPart::Patch,
        }
    }
}

#[derive(Args)]
pub struct NextVersionCommand {
    /// Component to increment
    #[arg(value_enum)]
    pub increment: Increment,

    /// Git repository to read tags from (defaults to current directory)
    #[arg(long, default_value = ".")]
    pub repo: PathBuf,
}

impl NextVersionCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::next_version(&self.repo, self.increment.into())?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
