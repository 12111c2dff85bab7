//! Loading contexts: named search roots arranged in an explicit parent tree.
//!
//! A context lists origin locations and owns a [`TypeResolver`]. Type and
//! resource lookups delegate to the parent first, then fall back to the
//! context itself.

use crate::classpath::{self, ResourceLocation};
use crate::error::{FathomError, Result};
use crate::resolver::{NoopResolver, TypeResolver};
use fathom_api::TypeHandle;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use url::Url;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a loading context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(u64);

impl ContextId {
    fn next() -> Self {
        ContextId(NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// An origin location. Only local origins take part in scanning and lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Origin {
    Local(PathBuf),
    Remote(Url),
}

impl Origin {
    pub fn from_url(url: Url) -> Self {
        if url.scheme() == "file" {
            if let Ok(path) = url.to_file_path() {
                return Origin::Local(path);
            }
        }
        Origin::Remote(url)
    }

    /// Parses a profile entry. Entries with a URL scheme are taken as URLs,
    /// anything else is a filesystem path relative to `base_dir`.
    pub fn parse(raw: &str, base_dir: &Path) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(FathomError::InvalidArgument(
                "Origin location cannot be empty".to_string(),
            ));
        }
        match Url::parse(raw) {
            // Single-letter schemes are Windows drive letters.
            Ok(url) if url.scheme().len() > 1 => Ok(Self::from_url(url)),
            _ => Ok(Origin::Local(base_dir.join(raw))),
        }
    }

    pub fn local_path(&self) -> Option<&Path> {
        match self {
            Origin::Local(path) => Some(path),
            Origin::Remote(_) => None,
        }
    }
}

impl From<PathBuf> for Origin {
    fn from(path: PathBuf) -> Self {
        Origin::Local(path)
    }
}

impl From<&Path> for Origin {
    fn from(path: &Path) -> Self {
        Origin::Local(path.to_path_buf())
    }
}

impl From<Url> for Origin {
    fn from(url: Url) -> Self {
        Origin::from_url(url)
    }
}

pub struct LoadingContext {
    id: ContextId,
    name: String,
    parent: Option<Arc<LoadingContext>>,
    origins: Vec<Origin>,
    resolver: Arc<dyn TypeResolver>,
}

impl LoadingContext {
    pub fn builder(name: impl Into<String>) -> LoadingContextBuilder {
        LoadingContextBuilder {
            name: name.into(),
            parent: None,
            origins: Vec::new(),
            resolver: Arc::new(NoopResolver),
        }
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<&Arc<LoadingContext>> {
        self.parent.as_ref()
    }

    pub fn origins(&self) -> &[Origin] {
        &self.origins
    }

    /// Paths of the origins that are local files or directories.
    pub fn local_origins(&self) -> Vec<PathBuf> {
        self.origins
            .iter()
            .filter_map(|origin| origin.local_path().map(Path::to_path_buf))
            .collect()
    }

    /// The chain from the outermost ancestor down to this context.
    pub fn hierarchy(self: &Arc<Self>) -> Vec<Arc<LoadingContext>> {
        let mut chain = vec![Arc::clone(self)];
        let mut current = self.parent.clone();
        while let Some(ctx) = current {
            current = ctx.parent.clone();
            chain.push(ctx);
        }
        chain.reverse();
        chain
    }

    pub fn resolve(&self, type_name: &str) -> Option<TypeHandle> {
        if let Some(handle) = self.parent.as_ref().and_then(|p| p.resolve(type_name)) {
            return Some(handle);
        }
        self.resolver.resolve(self, type_name)
    }

    pub fn find_resource(&self, resource_name: &str) -> Option<ResourceLocation> {
        if let Some(location) = self
            .parent
            .as_ref()
            .and_then(|p| p.find_resource(resource_name))
        {
            return Some(location);
        }
        self.find_own_resource(resource_name)
    }

    /// Looks a resource up in this context's own origins only.
    pub fn find_own_resource(&self, resource_name: &str) -> Option<ResourceLocation> {
        classpath::locate(&self.local_origins(), resource_name)
    }
}

impl fmt::Debug for LoadingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadingContext")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("parent", &self.parent.as_ref().map(|p| p.name()))
            .field("origins", &self.origins)
            .finish()
    }
}

impl fmt::Display for LoadingContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

pub struct LoadingContextBuilder {
    name: String,
    parent: Option<Arc<LoadingContext>>,
    origins: Vec<Origin>,
    resolver: Arc<dyn TypeResolver>,
}

impl LoadingContextBuilder {
    pub fn parent(mut self, parent: Arc<LoadingContext>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn origin(mut self, origin: impl Into<Origin>) -> Self {
        self.origins.push(origin.into());
        self
    }

    pub fn origins<I, O>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = O>,
        O: Into<Origin>,
    {
        self.origins.extend(origins.into_iter().map(Into::into));
        self
    }

    pub fn resolver(mut self, resolver: Arc<dyn TypeResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn build(self) -> Arc<LoadingContext> {
        Arc::new(LoadingContext {
            id: ContextId::next(),
            name: self.name,
            parent: self.parent,
            origins: self.origins,
            resolver: self.resolver,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::StaticResolver;
    use fathom_api::TypeKind;

    #[test]
    fn test_hierarchy_is_root_first() {
        let system = LoadingContext::builder("system").build();
        let platform = LoadingContext::builder("platform")
            .parent(system.clone())
            .build();
        let app = LoadingContext::builder("app").parent(platform).build();

        let names: Vec<_> = app.hierarchy().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["system", "platform", "app"]);
    }

    #[test]
    fn test_ids_are_unique() {
        let a = LoadingContext::builder("same").build();
        let b = LoadingContext::builder("same").build();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_resolution_delegates_to_parent_first() {
        let parent = LoadingContext::builder("parent")
            .resolver(Arc::new(
                StaticResolver::new()
                    .register(TypeHandle::new("com.example.Shared", TypeKind::Interface)),
            ))
            .build();
        let child = LoadingContext::builder("child")
            .parent(parent)
            .resolver(Arc::new(
                StaticResolver::new()
                    .register(TypeHandle::new("com.example.Shared", TypeKind::Class))
                    .register(TypeHandle::new("com.example.Own", TypeKind::Class)),
            ))
            .build();

        assert_eq!(
            child.resolve("com.example.Shared").map(|h| h.kind),
            Some(TypeKind::Interface)
        );
        assert!(child.resolve("com.example.Own").is_some());
        assert!(child.resolve("com.example.Missing").is_none());
    }

    #[test]
    fn test_remote_origins_are_not_local() {
        let base = Path::new("/srv/app");
        let remote = Origin::parse("https://repo.example.com/lib.jar", base).unwrap();
        let relative = Origin::parse("lib/util.jar", base).unwrap();
        let file_url = Origin::parse("file:///opt/lib/core.jar", base).unwrap();

        assert!(matches!(remote, Origin::Remote(_)));
        assert_eq!(relative, Origin::Local(base.join("lib/util.jar")));
        assert_eq!(file_url.local_path(), Some(Path::new("/opt/lib/core.jar")));
        assert!(Origin::parse("  ", base).is_err());

        let ctx = LoadingContext::builder("app")
            .origins([remote, relative])
            .build();
        assert_eq!(ctx.local_origins(), vec![base.join("lib/util.jar")]);
    }
}
