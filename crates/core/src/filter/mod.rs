//! Acceptance filters applied to every resource a scan encounters.
//!
//! Filters compose with AND semantics: a resource is kept only if every
//! registered filter accepts it, and an empty set accepts everything.

pub mod manifest;
pub mod package;
pub mod tag;

pub use manifest::ManifestFilter;
pub use package::{PackageFilter, PackageMode};
pub use tag::{TagFilter, TagMode};

use crate::context::LoadingContext;

pub trait Filter: Send + Sync {
    /// Returns `true` if the resource should be kept.
    fn accept(&self, context: &LoadingContext, resource_name: &str) -> bool;
}

impl<F> Filter for F
where
    F: Fn(&LoadingContext, &str) -> bool + Send + Sync,
{
    fn accept(&self, context: &LoadingContext, resource_name: &str) -> bool {
        self(context, resource_name)
    }
}

/// Ordered set of filters evaluated with AND semantics.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Box<dyn Filter>) {
        self.filters.push(filter);
    }

    pub fn accept(&self, context: &LoadingContext, resource_name: &str) -> bool {
        self.filters
            .iter()
            .all(|filter| filter.accept(context, resource_name))
    }
}

impl FromIterator<Box<dyn Filter>> for FilterChain {
    fn from_iter<I: IntoIterator<Item = Box<dyn Filter>>>(iter: I) -> Self {
        Self {
            filters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain_accepts_everything() {
        let ctx = LoadingContext::builder("test").build();
        let chain = FilterChain::new();

        assert!(chain.accept(&ctx, "anything"));
        assert!(chain.accept(&ctx, "META-INF/MANIFEST.MF"));
    }

    #[test]
    fn test_chain_is_conjunction_of_filters() {
        let ctx = LoadingContext::builder("test").build();
        let names = [
            "com/example/App.class",
            "com/example/app.properties",
            "com/other/App.class",
            "META-INF/MANIFEST.MF",
            "root.txt",
        ];

        let filters = || -> Vec<Box<dyn Filter>> {
            vec![
                Box::new(ManifestFilter),
                Box::new(PackageFilter::new("com").unwrap().allow_subpackages()),
                Box::new(|_: &LoadingContext, name: &str| name.ends_with(".class")),
            ]
        };
        let individual = filters();
        let chain: FilterChain = filters().into_iter().collect();

        for name in names {
            let expected = individual.iter().all(|f| f.accept(&ctx, name));
            assert_eq!(chain.accept(&ctx, name), expected, "{name}");
        }

        assert!(chain.accept(&ctx, "com/example/App.class"));
        assert!(!chain.accept(&ctx, "com/example/app.properties"));
        assert!(!chain.accept(&ctx, "root.txt"));
    }
}
