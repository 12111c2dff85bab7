use crate::classpath::ResourceLocation;
use crate::context::LoadingContext;
use crate::error::{FathomError, Result};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// One discovered artifact: its full resource name and the loading context
/// that owns it.
///
/// Two records are equal when they carry the same name under the same
/// context; the same name under different contexts yields distinct records.
#[derive(Clone)]
pub struct ResourceRecord {
    name: String,
    owner: Arc<LoadingContext>,
}

impl ResourceRecord {
    pub fn new(name: impl Into<String>, owner: Arc<LoadingContext>) -> Self {
        Self {
            name: name.into(),
            owner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> &Arc<LoadingContext> {
        &self.owner
    }

    /// Finds where this resource lives in its owner's origins.
    pub fn locate(&self) -> Result<ResourceLocation> {
        self.owner
            .find_resource(&self.name)
            .ok_or_else(|| FathomError::NotFound(self.name.clone()))
    }
}

impl PartialEq for ResourceRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.owner.id() == other.owner.id()
    }
}

impl Eq for ResourceRecord {}

impl Hash for ResourceRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.owner.id().hash(state);
    }
}

impl fmt::Debug for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResourceRecord")
            .field("name", &self.name)
            .field("owner", &self.owner.name())
            .finish()
    }
}

impl fmt::Display for ResourceRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
