use std::path::PathBuf;

use clap::Args;
use comreg_idl::Idl;
use comreg_manifest::ComregToml;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to comreg.toml (defaults to ./comreg.toml)
    #[arg(short, long, default_value = "comreg.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    /// Run the check command
    pub fn run(&self) -> Result<()> {
        let comreg_toml = ComregToml::open(&self.config).unwrap_or_exit();
        let idl = Idl::from_file(comreg_toml.idl_path()).unwrap_or_exit();
        let expected_version = comreg_toml
            .version_source()
            .map(|source| source.canonical_version())
            .transpose()
            .unwrap_or_exit();

        let report = ops::check(&comreg_toml, &idl, expected_version);
        report.render(&mut TerminalOutput::new());

        if !report.is_valid() {
            std::process::exit(1);
        }

        Ok(())
    }
}
