//! Entry point of the reflection API.
//!
//! Use [`Reflection::builder`] to configure a scan of a loading context,
//! add [`Filter`]s to decide which resources are kept, then call
//! [`ReflectionBuilder::scan`] to obtain an immutable [`Reflection`]
//! snapshot. Every query returns a fresh set; the snapshot itself never
//! changes.

use crate::context::LoadingContext;
use crate::filter::Filter;
use crate::model::{Resource, ResourceRecord, TypedRecord};
use crate::scanner::{ScanReport, Scanner};
use crate::error::FathomError;
use fathom_api::{ApiResult, TypeHandle, TypeQuery};
use indexmap::IndexSet;
use std::sync::Arc;

#[derive(Debug, Clone, Default)]
pub struct Reflection {
    resources: IndexSet<Resource>,
    report: Option<ScanReport>,
}

impl Reflection {
    pub fn builder(context: Arc<LoadingContext>) -> ReflectionBuilder {
        ReflectionBuilder {
            scanner: Scanner::new(context),
        }
    }

    /// Wraps an existing set of resources without scanning.
    pub fn from_resources(resources: impl IntoIterator<Item = Resource>) -> Self {
        Self {
            resources: resources.into_iter().collect(),
            report: None,
        }
    }

    /// Report of the scan that produced this snapshot, if any.
    pub fn report(&self) -> Option<&ScanReport> {
        self.report.as_ref()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn resources(&self) -> IndexSet<Resource> {
        self.resources.clone()
    }

    /// Resources that are not types.
    pub fn simple_resources(&self) -> IndexSet<ResourceRecord> {
        self.resources
            .iter()
            .filter_map(|resource| match resource {
                Resource::Simple(record) => Some(record.clone()),
                Resource::Typed(_) => None,
            })
            .collect()
    }

    pub fn types(&self) -> IndexSet<TypedRecord> {
        self.typed().cloned().collect()
    }

    /// Types declared exactly in `package`.
    pub fn types_in(&self, package: &str) -> IndexSet<TypedRecord> {
        self.typed()
            .filter(|t| t.package_name() == package)
            .cloned()
            .collect()
    }

    /// Types whose package name starts with `prefix`.
    pub fn types_recursively(&self, prefix: &str) -> IndexSet<TypedRecord> {
        self.typed()
            .filter(|t| t.package_name().starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Types that are not nested in another type.
    pub fn top_level_types(&self) -> IndexSet<TypedRecord> {
        self.top_level().cloned().collect()
    }

    pub fn top_level_types_in(&self, package: &str) -> IndexSet<TypedRecord> {
        self.top_level()
            .filter(|t| t.package_name() == package)
            .cloned()
            .collect()
    }

    pub fn top_level_types_recursively(&self, prefix: &str) -> IndexSet<TypedRecord> {
        self.top_level()
            .filter(|t| t.package_name().starts_with(prefix))
            .cloned()
            .collect()
    }

    /// Resolves every type; types that fail to resolve are left out.
    pub fn load_types(&self) -> IndexSet<TypeHandle> {
        load_all(self.typed())
    }

    pub fn load_types_in(&self, package: &str) -> IndexSet<TypeHandle> {
        load_all(self.typed().filter(|t| t.package_name() == package))
    }

    pub fn load_types_recursively(&self, prefix: &str) -> IndexSet<TypeHandle> {
        load_all(self.typed().filter(|t| t.package_name().starts_with(prefix)))
    }

    /// Resolved types carrying `tag`.
    pub fn annotated_types(&self, tag: &str) -> IndexSet<TypeHandle> {
        retain_tagged(self.load_types(), tag)
    }

    pub fn annotated_types_in(&self, tag: &str, package: &str) -> IndexSet<TypeHandle> {
        retain_tagged(self.load_types_in(package), tag)
    }

    pub fn annotated_types_recursively(&self, tag: &str, prefix: &str) -> IndexSet<TypeHandle> {
        retain_tagged(self.load_types_recursively(prefix), tag)
    }

    fn typed(&self) -> impl Iterator<Item = &TypedRecord> {
        self.resources.iter().filter_map(Resource::as_typed)
    }

    fn top_level(&self) -> impl Iterator<Item = &TypedRecord> {
        self.typed().filter(|t| t.is_top_level())
    }
}

fn load_all<'a>(records: impl Iterator<Item = &'a TypedRecord>) -> IndexSet<TypeHandle> {
    records.filter_map(TypedRecord::load).collect()
}

fn retain_tagged(mut handles: IndexSet<TypeHandle>, tag: &str) -> IndexSet<TypeHandle> {
    handles.retain(|handle| handle.has_tag(tag));
    handles
}

impl TypeQuery for Reflection {
    fn annotated_types_recursively(
        &self,
        tag: &str,
        namespace_prefix: &str,
    ) -> ApiResult<Vec<TypeHandle>> {
        if tag.trim().is_empty() {
            return Err(FathomError::InvalidArgument("Tag cannot be blank".to_string()).into());
        }
        Ok(Reflection::annotated_types_recursively(self, tag, namespace_prefix)
            .into_iter()
            .collect())
    }
}

/// Configuration object for a [`Reflection`] scan.
pub struct ReflectionBuilder {
    scanner: Scanner,
}

impl ReflectionBuilder {
    /// Adds a filter applied to the scanned resources.
    pub fn filter(mut self, filter: impl Filter + 'static) -> Self {
        self.scanner = self.scanner.filter(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = Box<dyn Filter>>) -> Self {
        self.scanner = self.scanner.with_filters(filters);
        self
    }

    pub fn scan(self) -> Reflection {
        let output = self.scanner.scan();
        Reflection {
            resources: output.resources(),
            report: Some(output.report),
        }
    }
}
