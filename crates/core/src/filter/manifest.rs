use crate::context::LoadingContext;
use crate::filter::Filter;
use crate::naming::INDEX_DESCRIPTOR;

/// Accepts every resource except the archive index descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct ManifestFilter;

impl Filter for ManifestFilter {
    fn accept(&self, _context: &LoadingContext, resource_name: &str) -> bool {
        resource_name != INDEX_DESCRIPTOR
    }
}
