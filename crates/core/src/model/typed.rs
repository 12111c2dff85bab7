use crate::context::LoadingContext;
use crate::model::resource::ResourceRecord;
use crate::naming::{self, NESTED_TYPE_MARKER};
use fathom_api::TypeHandle;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A resource recognized as a loadable type through its file suffix.
///
/// Nothing is resolved at construction: [`TypedRecord::load`] asks the
/// owning context each time it is called.
#[derive(Clone)]
pub struct TypedRecord {
    resource: ResourceRecord,
    type_name: String,
    package_name: String,
}

impl TypedRecord {
    /// Returns `None` if `resource_name` does not end with the type-file suffix.
    pub fn new(resource_name: impl Into<String>, owner: Arc<LoadingContext>) -> Option<Self> {
        let resource_name = resource_name.into();
        let type_name = naming::type_name_of(&resource_name)?;
        let package_name = naming::package_of(&type_name).to_string();
        Some(Self {
            resource: ResourceRecord::new(resource_name, owner),
            type_name,
            package_name,
        })
    }

    pub fn resource(&self) -> &ResourceRecord {
        &self.resource
    }

    pub fn name(&self) -> &str {
        self.resource.name()
    }

    pub fn owner(&self) -> &Arc<LoadingContext> {
        self.resource.owner()
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn simple_name(&self) -> &str {
        if let Some(idx) = self.type_name.rfind(NESTED_TYPE_MARKER) {
            return &self.type_name[idx + 1..];
        }
        if self.package_name.is_empty() {
            &self.type_name
        } else {
            &self.type_name[self.package_name.len() + 1..]
        }
    }

    pub fn is_top_level(&self) -> bool {
        !naming::is_nested_type(&self.type_name)
    }

    pub fn load(&self) -> Option<TypeHandle> {
        self.owner().resolve(&self.type_name)
    }
}

impl PartialEq for TypedRecord {
    fn eq(&self, other: &Self) -> bool {
        self.resource == other.resource
    }
}

impl Eq for TypedRecord {}

impl Hash for TypedRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.resource.hash(state);
    }
}

impl fmt::Debug for TypedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypedRecord")
            .field("type_name", &self.type_name)
            .field("owner", &self.owner().name())
            .finish()
    }
}

impl fmt::Display for TypedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_name)
    }
}
