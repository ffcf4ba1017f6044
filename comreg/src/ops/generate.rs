//! Generate operation - registrar scripts from the IDL.

use std::path::Path;

use comreg_codegen::Generator;
use comreg_core::ApiVersion;
use comreg_idl::Idl;
use comreg_manifest::ComregToml;
use eyre::{Context, Result};

use crate::reports::{GenerateReport, GenerationResult, Output, PreviewFile, Report, WrittenFile};

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory receiving the per-class scripts.
    pub output_dir: &'a Path,
    /// Whether to preview without writing files.
    pub dry_run: bool,
    /// Canonical version every class must declare.
    pub expected_version: Option<ApiVersion>,
}

/// Execute the generate operation.
///
/// A `Written <path>` line goes to `out` as each file lands.
pub fn generate(
    config: &ComregToml,
    idl: &Idl,
    opts: GenerateOptions,
    out: &mut dyn Output,
) -> Result<GenerateReport> {
    let manifest = config.manifest();
    let generator = Generator::new(idl)
        .threading_model(manifest.library.threading_model)
        .entry_point(super::entry_point(manifest))
        .expected_version(opts.expected_version)
        .aggregate(config.aggregate_path(opts.output_dir));

    let result = if opts.dry_run {
        let files = generator
            .preview(opts.output_dir)
            .wrap_err("Failed to render scripts")?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path.display().to_string(),
                content: f.content,
            })
            .collect();
        GenerationResult::Preview(files)
    } else {
        let result = generator
            .generate_with(opts.output_dir, |path| WrittenFile(path).render(out))
            .wrap_err("Failed to generate scripts")?;
        GenerationResult::Written(result.written)
    };

    Ok(GenerateReport {
        library: idl.library.name.clone(),
        result,
    })
}
