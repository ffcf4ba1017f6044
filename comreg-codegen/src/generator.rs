//! Rendering and writing of the registrar scripts for one library.

use std::path::{Path, PathBuf};

use comreg_core::{ApiVersion, File, GeneratedFile, ThreadingModel};
use comreg_idl::{CoClass, Idl, Library};

use crate::{EntryPoint, Error, Result, check_versions, files::RgsScript, resolve_entry_point};

/// Scripts rendered in class declaration order.
///
/// `aggregate` accumulates every script so it can be written as a single
/// file for registration-free activation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderedScripts {
    pub scripts: Vec<File>,
    pub aggregate: String,
}

impl RenderedScripts {
    pub fn push(&mut self, file: File) {
        self.aggregate.push_str(file.content());
        self.scripts.push(file);
    }
}

/// A generated file for preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    pub path: PathBuf,
    pub content: String,
}

/// Result of writing the scripts
#[derive(Debug, Default)]
pub struct GenerateResult {
    /// Paths in write order, aggregate last
    pub written: Vec<PathBuf>,
}

/// Registrar script generator.
///
/// Entry-point resolution and the version cross-check both run before any
/// script is rendered, so a failing run never touches the disk.
pub struct Generator<'a> {
    library: &'a Library,
    classes: &'a [CoClass],
    threading_model: ThreadingModel,
    entry_point: Option<EntryPoint>,
    expected_version: Option<ApiVersion>,
    aggregate: Option<PathBuf>,
}

impl<'a> Generator<'a> {
    pub fn new(idl: &'a Idl) -> Self {
        Self {
            library: &idl.library,
            classes: &idl.classes,
            threading_model: ThreadingModel::default(),
            entry_point: None,
            expected_version: None,
            aggregate: None,
        }
    }

    pub fn threading_model(mut self, threading_model: ThreadingModel) -> Self {
        self.threading_model = threading_model;
        self
    }

    pub fn entry_point(mut self, entry_point: Option<EntryPoint>) -> Self {
        self.entry_point = entry_point;
        self
    }

    /// Canonical version every class must declare.
    pub fn expected_version(mut self, version: Option<ApiVersion>) -> Self {
        self.expected_version = version;
        self
    }

    /// Path of the aggregate script. Relative paths are taken as given.
    pub fn aggregate(mut self, path: Option<PathBuf>) -> Self {
        self.aggregate = path;
        self
    }

    /// Annotate and check the classes.
    fn prepare(&self) -> Result<Vec<CoClass>> {
        let mut classes = self.classes.to_vec();
        resolve_entry_point(
            &mut classes,
            self.entry_point.as_ref(),
            &self.library.name,
        )?;
        if let Some(expected) = self.expected_version {
            check_versions(&classes, expected)?;
        }
        Ok(classes)
    }

    /// Render every class into a script placed under `output_dir`.
    pub fn render(&self, output_dir: &Path) -> Result<RenderedScripts> {
        let classes = self.prepare()?;

        let mut rendered = RenderedScripts::default();
        for class in &classes {
            let script = RgsScript::new(self.library, self.threading_model, class);
            rendered.push(script.to_file(output_dir));
        }
        Ok(rendered)
    }

    fn files(&self, output_dir: &Path) -> Result<Vec<File>> {
        let RenderedScripts {
            mut scripts,
            aggregate,
        } = self.render(output_dir)?;

        if let Some(path) = &self.aggregate {
            scripts.push(File::new(path, aggregate));
        }
        Ok(scripts)
    }

    /// Preview generated files without writing to disk.
    pub fn preview(&self, output_dir: &Path) -> Result<Vec<PreviewFile>> {
        Ok(self
            .files(output_dir)?
            .into_iter()
            .map(|f| PreviewFile {
                path: f.path().to_path_buf(),
                content: f.content().to_string(),
            })
            .collect())
    }

    /// Write every script, then the aggregate if configured.
    pub fn generate(&self, output_dir: &Path) -> Result<GenerateResult> {
        self.generate_with(output_dir, |_| {})
    }

    /// Like [`Generator::generate`], calling `on_written` after each file lands.
    ///
    /// A failed write stops the run; files reported before it stay on disk.
    pub fn generate_with<F>(&self, output_dir: &Path, mut on_written: F) -> Result<GenerateResult>
    where
        F: FnMut(&Path),
    {
        let files = self.files(output_dir)?;

        let mut result = GenerateResult::default();
        for file in files {
            file.write().map_err(|source| Error::Write {
                path: file.path().to_path_buf(),
                source,
            })?;
            tracing::debug!(path = %file.path().display(), "wrote script");
            on_written(file.path());
            result.written.push(file.path().to_path_buf());
        }
        Ok(result)
    }
}
