mod common;

use common::{
    ACC_ANNOTATION, ACC_ENUM, ACC_INTERFACE, ACC_PUBLIC_SUPER, class_bytes, write_file,
};
use fathom_api::TypeKind;
use fathom_core::{LoadingContext, Reflection, TagFilter, TypeResolver, TypedRecord};
use fathom_java::{ClassFileResolver, ResolveError, class_file::parse_type};
use std::io::Write;
use std::sync::Arc;
use tempfile::tempdir;
use zip::write::SimpleFileOptions;

const COMPONENT: &str = "Lcom/example/Component;";

#[test]
fn given_annotated_class_when_parsed_then_kind_and_tags_are_read() {
    let bytes = class_bytes(
        "com/example/HelloService",
        ACC_PUBLIC_SUPER,
        &[COMPONENT, "Lcom/example/Route;"],
    );

    let handle = parse_type(&bytes).unwrap();

    assert_eq!(handle.name, "com.example.HelloService");
    assert_eq!(handle.kind, TypeKind::Class);
    assert!(handle.has_tag("com.example.Component"));
    assert!(handle.has_tag("com.example.Route"));
}

#[test]
fn given_type_flags_when_parsed_then_kind_follows_flags() {
    let cases = [
        (ACC_INTERFACE, TypeKind::Interface),
        (ACC_ANNOTATION, TypeKind::Annotation),
        (ACC_ENUM, TypeKind::Enum),
        (ACC_PUBLIC_SUPER, TypeKind::Class),
    ];
    for (flags, expected) in cases {
        let handle = parse_type(&class_bytes("com/example/T", flags, &[])).unwrap();
        assert_eq!(handle.kind, expected, "flags {flags:#06x}");
        assert!(handle.tags.is_empty());
    }
}

#[test]
fn given_garbage_bytes_when_parsed_then_malformed() {
    assert!(matches!(
        parse_type(b"not a class file"),
        Err(ResolveError::Malformed(_))
    ));
}

#[test]
fn given_directory_origin_when_resolved_then_handle_is_returned() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "com/example/Outer$Inner.class",
        &class_bytes("com/example/Outer$Inner", ACC_PUBLIC_SUPER, &[COMPONENT]),
    );
    let resolver = Arc::new(ClassFileResolver::new());
    let ctx = LoadingContext::builder("app")
        .origin(dir.path())
        .resolver(resolver.clone())
        .build();

    let handle = ctx.resolve("com.example.Outer$Inner").unwrap();
    assert!(handle.has_tag("com.example.Component"));
    assert!(ctx.resolve("com.example.Missing").is_none());
    assert!(matches!(
        resolver.read_type(&ctx, "com.example.Missing"),
        Err(ResolveError::NotFound(_))
    ));
}

#[test]
fn given_failed_resolution_when_definition_appears_then_load_resolves_it() {
    let dir = tempdir().unwrap();
    let ctx = LoadingContext::builder("app")
        .origin(dir.path())
        .resolver(Arc::new(ClassFileResolver::new()))
        .build();
    let record = TypedRecord::new("com/example/Late.class", ctx).unwrap();

    assert!(record.load().is_none());

    write_file(
        dir.path(),
        "com/example/Late.class",
        &class_bytes("com/example/Late", ACC_PUBLIC_SUPER, &[]),
    );

    let handle = record.load().unwrap();
    assert_eq!(handle.name, "com.example.Late");
}

#[test]
fn given_misplaced_definition_when_resolved_then_none() {
    let dir = tempdir().unwrap();
    write_file(
        dir.path(),
        "com/example/Expected.class",
        &class_bytes("com/example/Other", ACC_PUBLIC_SUPER, &[]),
    );
    let resolver = ClassFileResolver::new();
    let ctx = LoadingContext::builder("app").origin(dir.path()).build();

    assert!(matches!(
        resolver.read_type(&ctx, "com.example.Expected"),
        Err(ResolveError::NameMismatch { .. })
    ));
    assert!(resolver.resolve(&ctx, "com.example.Expected").is_none());
}

#[test]
fn given_parent_context_when_resolved_then_parent_definition_wins() {
    let dir = tempdir().unwrap();
    let platform = dir.path().join("platform");
    let app = dir.path().join("app");
    write_file(
        &platform,
        "com/example/Shared.class",
        &class_bytes("com/example/Shared", ACC_INTERFACE, &[]),
    );
    write_file(
        &app,
        "com/example/Shared.class",
        &class_bytes("com/example/Shared", ACC_PUBLIC_SUPER, &[]),
    );
    let resolver: Arc<ClassFileResolver> = Arc::new(ClassFileResolver::new());
    let parent = LoadingContext::builder("platform")
        .origin(platform)
        .resolver(resolver.clone())
        .build();
    let child = LoadingContext::builder("app")
        .parent(parent)
        .origin(app)
        .resolver(resolver)
        .build();

    assert_eq!(
        child.resolve("com.example.Shared").unwrap().kind,
        TypeKind::Interface
    );
}

#[test]
fn given_archive_origin_when_scanned_with_tag_filter_then_only_tagged_types_remain() {
    let dir = tempdir().unwrap();
    let jar = dir.path().join("app.jar");
    let mut zip = zip::ZipWriter::new(std::fs::File::create(&jar).unwrap());
    let options = SimpleFileOptions::default();
    for (name, annotations) in [
        ("com/example/HelloService", vec![COMPONENT]),
        ("com/example/Plain", vec![]),
    ] {
        zip.start_file(format!("{name}.class"), options).unwrap();
        zip.write_all(&class_bytes(name, ACC_PUBLIC_SUPER, &annotations))
            .unwrap();
    }
    zip.start_file("com/example/app.properties", options).unwrap();
    zip.write_all(b"greeting=hello").unwrap();
    zip.finish().unwrap();

    let ctx = LoadingContext::builder("app")
        .origin(jar)
        .resolver(Arc::new(ClassFileResolver::new()))
        .build();
    let reflection = Reflection::builder(ctx)
        .filter(TagFilter::new(["com.example.Component"]).unwrap())
        .scan();

    let names: Vec<_> = reflection
        .load_types()
        .into_iter()
        .map(|handle| handle.name)
        .collect();
    assert_eq!(names, vec!["com.example.HelloService"]);
}
