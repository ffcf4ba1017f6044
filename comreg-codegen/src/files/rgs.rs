//! Registrar script for a single component class.

use std::path::{Path, PathBuf};

use comreg_core::{GeneratedFile, ThreadingModel};
use comreg_idl::{CoClass, Library};

use crate::CodeBuilder;

/// The `<Class>.rgs` registry script.
///
/// Creatable classes get version-dependent and version-independent ProgID
/// keys bound to the class CLSID; non-creatable classes only get the CLSID key.
pub struct RgsScript<'a> {
    library: &'a Library,
    threading_model: ThreadingModel,
    class: &'a CoClass,
}

impl<'a> RgsScript<'a> {
    pub fn new(library: &'a Library, threading_model: ThreadingModel, class: &'a CoClass) -> Self {
        Self {
            library,
            threading_model,
            class,
        }
    }

    /// Version-independent ProgID, `<Library>.<Class>`.
    pub fn prog_id(&self) -> String {
        format!("{}.{}", self.library.name, self.class.name)
    }

    fn description(&self) -> String {
        format!("{} Object", self.class.name)
    }

    fn clsid_value(&self) -> String {
        format!("CLSID = s '{{{}}}'", self.class.clsid)
    }

    fn prog_id_keys(&self, builder: CodeBuilder) -> CodeBuilder {
        let prog_id = self.prog_id();
        builder
            .braced(
                &format!("{prog_id}.1 = s '{}'", self.description()),
                |b| b.line(&self.clsid_value()),
            )
            .braced(&format!("{prog_id} = s '{}'", self.description()), |b| {
                b.line(&self.clsid_value())
                    .line(&format!("CurVer = s '{prog_id}.1'"))
            })
    }

    fn class_key(&self, builder: CodeBuilder) -> CodeBuilder {
        let prog_id = self.prog_id();
        let header = format!(
            "ForceRemove {{{}}} = s '{}'",
            self.class.clsid,
            self.description()
        );

        builder.braced(&header, |b| {
            let b = b
                .when(self.class.creatable, |b| {
                    b.line(&format!("ProgID = s '{prog_id}.1'"))
                        .line(&format!("VersionIndependentProgID = s '{prog_id}'"))
                })
                .braced("InprocServer32 = s '%MODULE%'", |b| {
                    b.line(&format!("val ThreadingModel = s '{}'", self.threading_model))
                })
                .line(&format!("TypeLib = s '{{{}}}'", self.library.typelib));

            let b = match &self.class.version {
                Some(version) => b.line(&format!("Version = s '{version}'")),
                None => b,
            };

            b.splice(&self.class.additional_entries)
        })
    }
}

impl GeneratedFile for RgsScript<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(format!("{}.rgs", self.class.name))
    }

    fn render(&self) -> String {
        CodeBuilder::rgs()
            .braced("HKCR", |b| {
                b.when(self.class.creatable, |b| self.prog_id_keys(b))
                    .braced("NoRemove CLSID", |b| self.class_key(b))
            })
            .build()
    }
}

#[cfg(test)]
mod tests {
    use comreg_idl::Guid;

    use super::*;

    fn library() -> Library {
        Library {
            name: "Lib".into(),
            typelib: Guid::parse("67E59584-3F6A-4852-8051-103A4583CA5E").unwrap(),
        }
    }

    fn foo() -> CoClass {
        let clsid = Guid::parse("8E754A72-0067-462B-9267-E84AF84828F1").unwrap();
        CoClass::new("Foo", clsid, Some("1.0".into()))
    }

    #[test]
    fn test_path() {
        let library = library();
        let class = foo();
        let script = RgsScript::new(&library, ThreadingModel::Both, &class);

        assert_eq!(script.path(Path::new("out")), Path::new("out/Foo.rgs"));
    }

    #[test]
    fn test_creatable_class() {
        let library = library();
        let class = foo();
        let content = RgsScript::new(&library, ThreadingModel::Both, &class).render();

        let expected = "\
HKCR
{
\tLib.Foo.1 = s 'Foo Object'
\t{
\t\tCLSID = s '{8E754A72-0067-462B-9267-E84AF84828F1}'
\t}
\tLib.Foo = s 'Foo Object'
\t{
\t\tCLSID = s '{8E754A72-0067-462B-9267-E84AF84828F1}'
\t\tCurVer = s 'Lib.Foo.1'
\t}
\tNoRemove CLSID
\t{
\t\tForceRemove {8E754A72-0067-462B-9267-E84AF84828F1} = s 'Foo Object'
\t\t{
\t\t\tProgID = s 'Lib.Foo.1'
\t\t\tVersionIndependentProgID = s 'Lib.Foo'
\t\t\tInprocServer32 = s '%MODULE%'
\t\t\t{
\t\t\t\tval ThreadingModel = s 'Both'
\t\t\t}
\t\t\tTypeLib = s '{67E59584-3F6A-4852-8051-103A4583CA5E}'
\t\t\tVersion = s '1.0'
\t\t\t
\t\t}
\t}
}
";
        assert_eq!(content, expected);
    }

    #[test]
    fn test_non_creatable_class_has_no_prog_id() {
        let library = library();
        let mut class = foo();
        class.creatable = false;
        let content = RgsScript::new(&library, ThreadingModel::Apartment, &class).render();

        assert!(!content.contains("Lib.Foo"));
        assert!(!content.contains("ProgID"));
        assert!(content.contains("ForceRemove {8E754A72-0067-462B-9267-E84AF84828F1}"));
        assert!(content.contains("val ThreadingModel = s 'Apartment'"));
    }

    #[test]
    fn test_missing_version_omits_line() {
        let library = library();
        let mut class = foo();
        class.version = None;
        let content = RgsScript::new(&library, ThreadingModel::Both, &class).render();

        assert!(!content.contains("Version = s"));
        assert!(content.contains("TypeLib = s"));
    }

    #[test]
    fn test_additional_entries_follow_version_verbatim() {
        let library = library();
        let mut class = foo();
        class.additional_entries = "\n\t\t\tval AppID = s '%APPID%'  \n\t\t\tModels\n\t\t\t{\n\t\t\t\tval 'A' = s 'B'\n\t\t\t}".into();
        let content = RgsScript::new(&library, ThreadingModel::Both, &class).render();

        assert!(content.contains(&class.additional_entries));
        assert!(content.contains(
            "\t\t\tVersion = s '1.0'\n\t\t\t\n\t\t\tval AppID = s '%APPID%'  \n\t\t\tModels\n\t\t\t{\n\t\t\t\tval 'A' = s 'B'\n\t\t\t}\n\t\t}\n"
        ));
    }

    #[test]
    fn test_fragment_whitespace_is_not_normalised() {
        let library = library();
        let mut class = foo();
        class.additional_entries = "val X = s 'y'\r\n\n\n   ".into();
        let content = RgsScript::new(&library, ThreadingModel::Both, &class).render();

        assert!(content.contains("\t\t\tval X = s 'y'\r\n\n\n   \n\t\t}\n"));
    }
}
