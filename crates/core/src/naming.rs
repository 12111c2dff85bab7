//! Resource and type naming conventions.
//!
//! Resource names are slash-delimited paths relative to an origin
//! (`com/example/Foo.class`). Type names are dotted (`com.example.Foo`),
//! with `$` separating an enclosing type from a nested one.

/// Suffix marking a resource as a loadable type.
pub const TYPE_FILE_SUFFIX: &str = ".class";

/// Separator between an enclosing type and a nested type.
pub const NESTED_TYPE_MARKER: char = '$';

/// Separator used in resource names.
pub const PATH_SEPARATOR: char = '/';

/// Separator used in type and package names.
pub const NAMESPACE_SEPARATOR: char = '.';

/// Reserved entry holding an archive's index descriptor.
pub const INDEX_DESCRIPTOR: &str = "META-INF/MANIFEST.MF";

/// Index descriptor attribute listing cross-referenced archive locations.
pub const CROSS_REFERENCE_ATTRIBUTE: &str = "Class-Path";

pub fn is_type_file(resource_name: &str) -> bool {
    resource_name.ends_with(TYPE_FILE_SUFFIX)
}

/// Converts `com/example/Foo.class` into `com.example.Foo`.
///
/// Returns `None` when the resource does not carry the type-file suffix.
pub fn type_name_of(resource_name: &str) -> Option<String> {
    resource_name
        .strip_suffix(TYPE_FILE_SUFFIX)
        .map(|stem| stem.replace(PATH_SEPARATOR, "."))
}

/// Converts `com.example.Foo` back into `com/example/Foo.class`.
pub fn type_file_name(type_name: &str) -> String {
    format!(
        "{}{}",
        type_name.replace(NAMESPACE_SEPARATOR, "/"),
        TYPE_FILE_SUFFIX
    )
}

/// Package of a dotted type name, empty for the root package.
pub fn package_of(type_name: &str) -> &str {
    type_name
        .rfind(NAMESPACE_SEPARATOR)
        .map(|idx| &type_name[..idx])
        .unwrap_or("")
}

/// Dotted namespace of a resource name, or `None` if it sits at the root.
pub fn namespace_of(resource_name: &str) -> Option<String> {
    resource_name
        .rfind(PATH_SEPARATOR)
        .map(|idx| resource_name[..idx].replace(PATH_SEPARATOR, "."))
}

pub fn is_nested_type(type_name: &str) -> bool {
    type_name.contains(NESTED_TYPE_MARKER)
}
