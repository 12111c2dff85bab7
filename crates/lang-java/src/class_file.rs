use crate::descriptor::{internal_to_type_name, type_name_of_descriptor};
use fathom_api::{TypeHandle, TypeKind};
use fathom_core::context::LoadingContext;
use fathom_core::error::FathomError;
use fathom_core::naming;
use fathom_core::resolver::TypeResolver;
use ristretto_classfile::attributes::Attribute;
use ristretto_classfile::{ClassAccessFlags, ClassFile};
use std::collections::BTreeSet;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no definition for {0}")]
    NotFound(String),

    #[error("cannot read definition: {0}")]
    Read(#[from] FathomError),

    #[error("malformed class file: {0}")]
    Malformed(String),

    #[error("definition declares {found}, expected {expected}")]
    NameMismatch { expected: String, found: String },
}

/// Resolves type names by parsing the matching `.class` file found in the
/// context's own origins.
///
/// Parent contexts are consulted by [`LoadingContext::resolve`] before this
/// resolver runs, so only the context's own origins are searched here.
/// Nothing is cached: every call reads the definition again.
#[derive(Debug, Default, Clone, Copy)]
pub struct ClassFileResolver;

impl ClassFileResolver {
    pub fn new() -> Self {
        Self
    }

    /// Reads and parses the definition of `type_name`.
    pub fn read_type(
        &self,
        context: &LoadingContext,
        type_name: &str,
    ) -> Result<TypeHandle, ResolveError> {
        let file_name = naming::type_file_name(type_name);
        let location = context
            .find_own_resource(&file_name)
            .ok_or_else(|| ResolveError::NotFound(type_name.to_string()))?;
        let bytes = location.read()?;
        let handle = parse_type(&bytes)?;

        if handle.name != type_name {
            return Err(ResolveError::NameMismatch {
                expected: type_name.to_string(),
                found: handle.name,
            });
        }
        Ok(handle)
    }
}

impl TypeResolver for ClassFileResolver {
    fn resolve(&self, context: &LoadingContext, type_name: &str) -> Option<TypeHandle> {
        match self.read_type(context, type_name) {
            Ok(handle) => Some(handle),
            Err(e) => {
                debug!("Cannot resolve {} in '{}': {}", type_name, context.name(), e);
                None
            }
        }
    }
}

/// Parses a class file into a handle carrying its kind and the annotations
/// declared on the type, visible or not at runtime.
pub fn parse_type(bytes: &[u8]) -> Result<TypeHandle, ResolveError> {
    let class = ClassFile::from_bytes(&mut Cursor::new(bytes.to_vec()))
        .map_err(|e| ResolveError::Malformed(format!("{e:?}")))?;

    let internal_name = class
        .class_name()
        .map_err(|e| ResolveError::Malformed(format!("{e:?}")))?;
    let name = internal_to_type_name(internal_name);

    // Annotation types also carry the interface flag.
    let kind = if class.access_flags.contains(ClassAccessFlags::ANNOTATION) {
        TypeKind::Annotation
    } else if class.access_flags.contains(ClassAccessFlags::INTERFACE) {
        TypeKind::Interface
    } else if class.access_flags.contains(ClassAccessFlags::ENUM) {
        TypeKind::Enum
    } else {
        TypeKind::Class
    };

    let mut tags = BTreeSet::new();
    for attribute in &class.attributes {
        let annotations = match attribute {
            Attribute::RuntimeVisibleAnnotations { annotations, .. }
            | Attribute::RuntimeInvisibleAnnotations { annotations, .. } => annotations,
            _ => continue,
        };
        for annotation in annotations {
            let descriptor = class
                .constant_pool
                .try_get_utf8(annotation.type_index)
                .map_err(|e| ResolveError::Malformed(format!("{e:?}")))?;
            if let Some(tag) = type_name_of_descriptor(descriptor) {
                tags.insert(tag);
            }
        }
    }

    Ok(TypeHandle::new(name, kind).with_tags(tags))
}
