use std::path::PathBuf;

use clap::Args;
use eyre::Result;

use crate::{
    ops::{self, stamp::StampOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct StampCommand {
    /// The .nuspec or .autopkg template, rewritten in place
    pub file: PathBuf,

    /// Package version substituted for <<GIT-VERSION>>
    #[arg(long)]
    pub version: String,

    /// Release URL substituted for <<SOURCE-URL>>
    #[arg(long)]
    pub url: String,

    /// packages.config files to read dependency versions from
    #[arg(short, long = "packages")]
    pub packages: Vec<PathBuf>,
}

impl StampCommand {
    pub fn run(&self) -> Result<()> {
        let report = ops::stamp(StampOptions {
            file: &self.file,
            version: &self.version,
            url: &self.url,
            packages: &self.packages,
        })?;
        report.render(&mut TerminalOutput::new());

        Ok(())
    }
}
