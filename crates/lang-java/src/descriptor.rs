use fathom_core::naming::PATH_SEPARATOR;

/// Prefix of an object type descriptor, e.g. `Lcom/example/Component;`.
pub const OBJECT_DESCRIPTOR_PREFIX: char = 'L';

/// Terminator of an object type descriptor.
pub const OBJECT_DESCRIPTOR_SUFFIX: char = ';';

/// Converts an object type descriptor to a dotted type name.
///
/// ```ignore
/// type_name_of_descriptor("Lcom/example/Component;") => Some("com.example.Component")
/// type_name_of_descriptor("I") => None
/// ```
pub fn type_name_of_descriptor(descriptor: &str) -> Option<String> {
    let internal = descriptor
        .strip_prefix(OBJECT_DESCRIPTOR_PREFIX)?
        .strip_suffix(OBJECT_DESCRIPTOR_SUFFIX)?;
    if internal.is_empty() {
        return None;
    }
    Some(internal_to_type_name(internal))
}

/// Converts an internal (slash-separated) class name to a dotted type name.
pub fn internal_to_type_name(internal: &str) -> String {
    internal.replace(PATH_SEPARATOR, ".")
}
