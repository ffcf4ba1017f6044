//! Parsing of a complete loader IDL file.

use comreg_idl::{Error, Idl};

const LOADER_IDL: &str = r#"
/* Dummy 3D image loader */
import "oaidl.idl";
import "ocidl.idl";
import "../Image3dAPI/IImage3d.idl";

[
    object,
    uuid(8D5B8D35-5D5B-4E6C-B3B1-4A0AB7A6D6A1),
    helpstring("Internal helper [not registered]"),
    pointer_default(unique)
]
interface IImage3dFileLoaderExt : IUnknown {
    HRESULT Samples([in] unsigned int count, [out, size_is(count)] float samples[]);
};

[
    version(1.0),
    uuid(67E59584-3F6A-4852-8051-103A4583CA5E),
    helpstring("DummyLoader module")
]
library DummyLoader
{
    importlib("stdole2.tlb");

    // Only the file loader is creatable from outside
    [
        version(1.2),
        uuid(8E754A72-0067-462B-9267-E84AF84828F1),
        helpstring("3D image file loader")
    ]
    coclass Image3dFileLoader
    {
        [default] interface IImage3dFileLoader;
    };

    [version(1.2), uuid(6FA82ED5-6A49-4A8E-9F4A-3D2E1C5C8A81)]
    coclass Image3dSource
    {
        [default] interface IImage3dSource;
    };

    [version(1.2), uuid(B4D6E2A8-2B7F-4E6A-8B41-0E3A1C9E5F02)]
    coclass Image3dStream
    {
        [default] interface IImage3dStream;
    };
};
"#;

#[test]
fn test_loader_library() {
    let idl = Idl::parse(LOADER_IDL, "DummyLoader.idl").unwrap();

    assert_eq!(idl.library.name, "DummyLoader");
    assert_eq!(
        idl.library.typelib.as_str(),
        "67E59584-3F6A-4852-8051-103A4583CA5E"
    );
}

#[test]
fn test_loader_classes_in_declaration_order() {
    let idl = Idl::parse(LOADER_IDL, "DummyLoader.idl").unwrap();

    let names: Vec<&str> = idl.classes.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Image3dFileLoader", "Image3dSource", "Image3dStream"]
    );
    assert!(idl.classes.iter().all(|c| c.version.as_deref() == Some("1.2")));
    assert!(idl.classes.iter().all(|c| c.creatable));
    assert!(idl.classes.iter().all(|c| c.additional_entries.is_empty()));
}

#[test]
fn test_from_file() {
    let temp = tempfile::TempDir::new().unwrap();
    let path = temp.path().join("DummyLoader.idl");
    std::fs::write(&path, LOADER_IDL).unwrap();

    let idl = Idl::from_file(&path).unwrap();
    assert_eq!(idl.classes.len(), 3);
}

#[test]
fn test_from_missing_file() {
    let err = Idl::from_file("/nonexistent/DummyLoader.idl").unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_malformed_class_attributes_are_fatal() {
    let src = LOADER_IDL.replace(
        "[version(1.2), uuid(6FA82ED5-6A49-4A8E-9F4A-3D2E1C5C8A81)]",
        "[version(1.2) uuid(6FA82ED5-6A49-4A8E-9F4A-3D2E1C5C8A81)]",
    );

    let err = Idl::parse(&src, "DummyLoader.idl").unwrap_err();
    assert!(matches!(*err, Error::MalformedAttributes { .. }));
}

#[test]
fn test_library_without_classes() {
    let idl = Idl::parse(
        "[uuid(67E59584-3F6A-4852-8051-103A4583CA5E)] library Empty { };",
        "Empty.idl",
    )
    .unwrap();

    assert_eq!(idl.library.name, "Empty");
    assert!(idl.classes.is_empty());
}
