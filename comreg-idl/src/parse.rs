//! IDL parsing from files and strings.

use std::{ops::Range, path::Path, str::FromStr};

use crate::{
    CoClass, Error, Guid, Library, Result,
    attrs::{self, Attribute},
    error::SourceContext,
    model::is_dotted_numeric,
    scan::{DeclKind, Declaration, Scanner},
};

/// The library and component classes extracted from an IDL source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Idl {
    pub library: Library,
    /// Classes in declaration order
    pub classes: Vec<CoClass>,
}

impl FromStr for Idl {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_idl(s, "input.idl")
    }
}

impl Idl {
    /// Read and parse an IDL file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_idl(&content, &path.display().to_string())
    }

    /// Parse IDL text with a custom filename for error reporting.
    pub fn parse(content: &str, filename: &str) -> Result<Self> {
        parse_idl(content, filename)
    }

    /// Look up a class by name.
    pub fn class(&self, name: &str) -> Option<&CoClass> {
        self.classes.iter().find(|c| c.name == name)
    }
}

/// Parse IDL content with the given filename for error reporting.
pub fn parse_idl(content: &str, filename: &str) -> Result<Idl> {
    let ctx = SourceContext::new(content, filename);
    let decls = Scanner::new(&ctx).declarations()?;

    let mut library: Option<(Library, Range<usize>)> = None;
    let mut classes = Vec::new();

    for decl in &decls {
        match decl.kind {
            DeclKind::Library => {
                if let Some((first, first_span)) = &library {
                    return Err(ctx.duplicate_library(
                        &first.name,
                        first_span.clone(),
                        decl.name_span.clone(),
                    ));
                }
                let typelib = required_uuid(&ctx, decl)?;
                library = Some((
                    Library {
                        name: decl.name.to_string(),
                        typelib,
                    },
                    decl.name_span.clone(),
                ));
            }
            DeclKind::CoClass => {
                let clsid = required_uuid(&ctx, decl)?;
                let version = class_version(&ctx, decl)?;
                classes.push(CoClass::new(decl.name, clsid, version));
            }
        }
    }

    let Some((library, _)) = library else {
        return Err(ctx.missing_library());
    };

    tracing::debug!(
        library = %library.name,
        classes = classes.len(),
        "parsed {}",
        filename
    );

    Ok(Idl { library, classes })
}

fn required_uuid(ctx: &SourceContext, decl: &Declaration<'_>) -> Result<Guid> {
    let attr = attrs::find(&decl.attrs, "uuid")
        .ok_or_else(|| ctx.missing_uuid(decl.kind.keyword(), decl.name, decl.name_span.clone()))?;
    let value = attr_value(ctx, attr, "uuid")?;
    Guid::parse(value).map_err(|e| ctx.invalid_uuid(value, e.to_string(), attr.span.clone()))
}

fn class_version(ctx: &SourceContext, decl: &Declaration<'_>) -> Result<Option<String>> {
    let Some(attr) = attrs::find(&decl.attrs, "version") else {
        return Ok(None);
    };
    let value = attr_value(ctx, attr, "version")?;
    if !is_dotted_numeric(value) {
        return Err(ctx.invalid_version(value, decl.name, attr.span.clone()));
    }
    Ok(Some(value.to_string()))
}

fn attr_value<'a>(ctx: &SourceContext, attr: &Attribute<'a>, name: &str) -> Result<&'a str> {
    attr.unquoted_arg()
        .ok_or_else(|| ctx.malformed(format!("`{}` requires an argument", name), attr.span.clone()))
}
