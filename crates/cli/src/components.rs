use crate::Source;
use crate::view::{HandleView, print_rows};
use fathom_api::TypeQuery;
use fathom_core::TypeResolver;
use std::sync::Arc;

pub(crate) fn run(
    source: Source,
    resolver: Arc<dyn TypeResolver>,
    tag: &str,
    prefix: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let reflection = source.reflection(resolver, Vec::new())?;
    let query: &dyn TypeQuery = &reflection;

    let rows: Vec<_> = query
        .annotated_types_recursively(tag, prefix)?
        .iter()
        .map(HandleView::from_handle)
        .collect();
    print_rows(&rows, json)
}
