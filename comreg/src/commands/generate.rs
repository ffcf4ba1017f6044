use std::path::PathBuf;

use clap::Args;
use comreg_idl::Idl;
use comreg_manifest::ComregToml;
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, generate::GenerateOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to comreg.toml (defaults to ./comreg.toml)
    #[arg(short, long, default_value = "comreg.toml")]
    pub config: PathBuf,

    /// Output directory (overrides comreg.toml)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview generated scripts without writing to disk
    #[arg(long)]
    pub dry_run: bool,
}

impl GenerateCommand {
    /// Run the generate command
    pub fn run(&self) -> Result<()> {
        let comreg_toml = ComregToml::open(&self.config).unwrap_or_exit();
        let idl = Idl::from_file(comreg_toml.idl_path()).unwrap_or_exit();
        let expected_version = comreg_toml
            .version_source()
            .map(|source| source.canonical_version())
            .transpose()
            .unwrap_or_exit();

        let output_dir = self
            .output
            .clone()
            .unwrap_or_else(|| comreg_toml.output_dir());

        let mut out = TerminalOutput::new();
        let report = ops::generate(
            &comreg_toml,
            &idl,
            GenerateOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
                expected_version,
            },
            &mut out,
        )?;
        report.render(&mut out);

        Ok(())
    }
}
