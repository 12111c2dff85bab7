//! Resource data model.
//!
//! - [`ResourceRecord`]: any named artifact owned by a loading context
//! - [`TypedRecord`]: an artifact recognized as a loadable type
//! - [`Resource`]: either of the two, as produced by a scan

pub mod resource;
pub mod typed;

pub use resource::ResourceRecord;
pub use typed::TypedRecord;

use crate::context::LoadingContext;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Resource {
    Simple(ResourceRecord),
    Typed(TypedRecord),
}

impl Resource {
    /// Builds a typed record when the name carries the type-file suffix,
    /// a simple record otherwise.
    pub fn create(name: impl Into<String>, owner: Arc<LoadingContext>) -> Self {
        let name = name.into();
        if crate::naming::is_type_file(&name) {
            if let Some(typed) = TypedRecord::new(name.clone(), Arc::clone(&owner)) {
                return Resource::Typed(typed);
            }
        }
        Resource::Simple(ResourceRecord::new(name, owner))
    }

    pub fn name(&self) -> &str {
        self.record().name()
    }

    pub fn owner(&self) -> &Arc<LoadingContext> {
        self.record().owner()
    }

    pub fn record(&self) -> &ResourceRecord {
        match self {
            Resource::Simple(record) => record,
            Resource::Typed(typed) => typed.resource(),
        }
    }

    pub fn as_typed(&self) -> Option<&TypedRecord> {
        match self {
            Resource::Typed(typed) => Some(typed),
            Resource::Simple(_) => None,
        }
    }

    pub fn is_typed(&self) -> bool {
        matches!(self, Resource::Typed(_))
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
