use crate::context::LoadingContext;
use fathom_api::TypeHandle;
use std::collections::HashMap;

/// Capability turning a dotted type name into a live [`TypeHandle`].
///
/// Implementations must not panic; any failure (type absent, unreadable
/// or malformed definition) is reported as `None`.
pub trait TypeResolver: Send + Sync {
    fn resolve(&self, context: &LoadingContext, type_name: &str) -> Option<TypeHandle>;
}

impl<F> TypeResolver for F
where
    F: Fn(&LoadingContext, &str) -> Option<TypeHandle> + Send + Sync,
{
    fn resolve(&self, context: &LoadingContext, type_name: &str) -> Option<TypeHandle> {
        self(context, type_name)
    }
}

/// Resolver that never resolves anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResolver;

impl TypeResolver for NoopResolver {
    fn resolve(&self, _context: &LoadingContext, _type_name: &str) -> Option<TypeHandle> {
        None
    }
}

/// Resolver backed by an explicitly populated registry of handles.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    types: HashMap<String, TypeHandle>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, handle: TypeHandle) -> Self {
        self.types.insert(handle.name.clone(), handle);
        self
    }
}

impl FromIterator<TypeHandle> for StaticResolver {
    fn from_iter<I: IntoIterator<Item = TypeHandle>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().map(|h| (h.name.clone(), h)).collect(),
        }
    }
}

impl TypeResolver for StaticResolver {
    fn resolve(&self, _context: &LoadingContext, type_name: &str) -> Option<TypeHandle> {
        self.types.get(type_name).cloned()
    }
}
