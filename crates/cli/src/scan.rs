use crate::view::{ResourceView, TypeView, print_rows};
use crate::{Show, Source};
use fathom_core::{Filter, PackageFilter, TagFilter, TypeResolver};
use std::sync::Arc;
use tracing::info;

pub(crate) struct ScanOptions {
    pub package: Option<String>,
    pub subpackages: bool,
    pub tags: Vec<String>,
    pub all_tags: bool,
    pub show: Show,
    pub json: bool,
}

impl ScanOptions {
    fn filters(&self) -> fathom_core::Result<Vec<Box<dyn Filter>>> {
        let mut filters: Vec<Box<dyn Filter>> = Vec::new();
        if let Some(package) = &self.package {
            let mut filter = PackageFilter::new(package.as_str())?;
            if self.subpackages {
                filter = filter.allow_subpackages();
            }
            filters.push(Box::new(filter));
        }
        if !self.tags.is_empty() {
            let mut filter = TagFilter::new(self.tags.iter().cloned())?;
            if self.all_tags {
                filter = filter.all_required();
            }
            filters.push(Box::new(filter));
        }
        Ok(filters)
    }
}

pub(crate) fn run(
    source: Source,
    resolver: Arc<dyn TypeResolver>,
    options: ScanOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let reflection = source.reflection(resolver, options.filters()?)?;
    if let Some(report) = reflection.report() {
        info!(
            "Scanned {} origins ({} missing, {} failed), {} resources kept",
            report.origins_scanned,
            report.origins_missing,
            report.origins_failed,
            report.resources_accepted
        );
    }

    match options.show {
        Show::All => {
            let rows: Vec<_> = reflection
                .resources()
                .iter()
                .map(ResourceView::from_resource)
                .collect();
            print_rows(&rows, options.json)
        }
        Show::Simple => {
            let rows: Vec<_> = reflection
                .simple_resources()
                .into_iter()
                .map(|record| ResourceView {
                    context: record.owner().name().to_string(),
                    kind: "resource",
                    name: record.name().to_string(),
                })
                .collect();
            print_rows(&rows, options.json)
        }
        Show::Types => {
            let rows: Vec<_> = reflection.types().iter().map(TypeView::from_record).collect();
            print_rows(&rows, options.json)
        }
        Show::TopLevel => {
            let rows: Vec<_> = reflection
                .top_level_types()
                .iter()
                .map(TypeView::from_record)
                .collect();
            print_rows(&rows, options.json)
        }
    }
}
