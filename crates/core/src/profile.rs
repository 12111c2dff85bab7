//! Scan profiles: JSON description of a context hierarchy and its filters.
//!
//! ```json
//! {
//!   "root": "app",
//!   "contexts": [
//!     { "name": "platform", "origins": ["lib/platform.jar"] },
//!     { "name": "app", "parent": "platform", "origins": ["classes"] }
//!   ],
//!   "filters": {
//!     "skip_index_descriptor": true,
//!     "package": { "name": "com.example", "subpackages": true },
//!     "tags": { "markers": ["com.example.Component"], "all": false }
//!   }
//! }
//! ```
//!
//! Relative origins are resolved against the directory holding the profile.

use crate::context::{LoadingContext, Origin};
use crate::error::{FathomError, Result};
use crate::filter::{Filter, ManifestFilter, PackageFilter, TagFilter};
use crate::reflection::Reflection;
use crate::resolver::TypeResolver;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanProfile {
    /// Context to scan; defaults to the last declared context.
    #[serde(default)]
    pub root: Option<String>,
    pub contexts: Vec<ContextSpec>,
    #[serde(default)]
    pub filters: FilterSpec,
    #[serde(skip)]
    base_dir: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContextSpec {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub origins: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterSpec {
    #[serde(default)]
    pub skip_index_descriptor: bool,
    #[serde(default)]
    pub package: Option<PackageSpec>,
    #[serde(default)]
    pub tags: Option<TagSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PackageSpec {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subpackages: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagSpec {
    #[serde(default)]
    pub markers: Vec<String>,
    #[serde(default)]
    pub all: bool,
}

impl ScanProfile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_json(&content, base_dir)
    }

    pub fn from_json(content: &str, base_dir: &Path) -> Result<Self> {
        let mut profile: ScanProfile = serde_json::from_str(content)?;
        profile.base_dir = base_dir.to_path_buf();
        Ok(profile)
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn root_name(&self) -> Result<&str> {
        match &self.root {
            Some(root) => Ok(root),
            None => self
                .contexts
                .last()
                .map(|c| c.name.as_str())
                .ok_or_else(|| {
                    FathomError::InvalidArgument("Profile declares no context".to_string())
                }),
        }
    }

    /// Builds the root context and its ancestors, every context sharing
    /// `resolver`.
    pub fn build_contexts(&self, resolver: Arc<dyn TypeResolver>) -> Result<Arc<LoadingContext>> {
        let mut specs: HashMap<&str, &ContextSpec> = HashMap::new();
        for spec in &self.contexts {
            if specs.insert(spec.name.as_str(), spec).is_some() {
                return Err(FathomError::InvalidArgument(format!(
                    "Duplicate context name '{}'",
                    spec.name
                )));
            }
        }

        let root = self.root_name()?;
        let mut builder = ContextGraph {
            specs,
            base_dir: &self.base_dir,
            resolver,
            built: HashMap::new(),
            visiting: HashSet::new(),
        };
        for spec in &self.contexts {
            builder.build(&spec.name)?;
        }
        builder.build(root)
    }

    pub fn filters(&self) -> Result<Vec<Box<dyn Filter>>> {
        let mut filters: Vec<Box<dyn Filter>> = Vec::new();
        if self.filters.skip_index_descriptor {
            filters.push(Box::new(ManifestFilter));
        }
        if let Some(package) = &self.filters.package {
            let mut filter = PackageFilter::from_optional(package.name.as_deref())?;
            if package.subpackages {
                filter = filter.allow_subpackages();
            }
            filters.push(Box::new(filter));
        }
        if let Some(tags) = &self.filters.tags {
            let mut filter = TagFilter::new(tags.markers.iter().cloned())?;
            if tags.all {
                filter = filter.all_required();
            }
            filters.push(Box::new(filter));
        }
        Ok(filters)
    }

    /// Builds the contexts and filters, then scans.
    pub fn reflection(&self, resolver: Arc<dyn TypeResolver>) -> Result<Reflection> {
        let filters = self.filters()?;
        let root = self.build_contexts(resolver)?;
        Ok(Reflection::builder(root).filters(filters).scan())
    }
}

struct ContextGraph<'a> {
    specs: HashMap<&'a str, &'a ContextSpec>,
    base_dir: &'a Path,
    resolver: Arc<dyn TypeResolver>,
    built: HashMap<String, Arc<LoadingContext>>,
    visiting: HashSet<String>,
}

impl ContextGraph<'_> {
    fn build(&mut self, name: &str) -> Result<Arc<LoadingContext>> {
        if let Some(ctx) = self.built.get(name) {
            return Ok(Arc::clone(ctx));
        }
        let spec = *self
            .specs
            .get(name)
            .ok_or_else(|| FathomError::InvalidArgument(format!("Unknown context '{name}'")))?;
        if !self.visiting.insert(name.to_string()) {
            return Err(FathomError::InvalidArgument(format!(
                "Context '{name}' is its own ancestor"
            )));
        }

        let mut builder = LoadingContext::builder(&spec.name).resolver(Arc::clone(&self.resolver));
        if let Some(parent) = &spec.parent {
            builder = builder.parent(self.build(parent)?);
        }
        for raw in &spec.origins {
            builder = builder.origin(Origin::parse(raw, self.base_dir)?);
        }

        let ctx = builder.build();
        self.visiting.remove(name);
        self.built.insert(name.to_string(), Arc::clone(&ctx));
        Ok(ctx)
    }
}
