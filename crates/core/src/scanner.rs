//! Classpath scanner.
//!
//! The scanner walks a loading-context hierarchy root-first and collects the
//! name of every resource its filters accept:
//! 1. Local origins of every context are flattened, parent contexts first
//! 2. Directories are enumerated recursively; archives are opened and their
//!    index descriptor's cross-references are scanned before their entries
//! 3. Each file is visited once per run, whichever context reaches it first
//!
//! A failure on one origin never stops the scan; it is logged, counted in the
//! [`ScanReport`] and the scan moves on to the next origin.

use crate::archive::Archive;
use crate::classpath::file_identity;
use crate::context::{ContextId, LoadingContext};
use crate::filter::{Filter, FilterChain};
use crate::model::Resource;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

pub struct Scanner {
    root: Arc<LoadingContext>,
    filters: FilterChain,
}

impl Scanner {
    pub fn new(root: Arc<LoadingContext>) -> Self {
        Self {
            root,
            filters: FilterChain::new(),
        }
    }

    /// Add a filter
    pub fn filter(self, filter: impl Filter + 'static) -> Self {
        self.add_filter(Box::new(filter))
    }

    /// Add a boxed filter
    pub fn add_filter(mut self, filter: Box<dyn Filter>) -> Self {
        self.filters.push(filter);
        self
    }

    /// Add multiple filters
    pub fn with_filters(mut self, filters: impl IntoIterator<Item = Box<dyn Filter>>) -> Self {
        for filter in filters {
            self.filters.push(filter);
        }
        self
    }

    /// Run a full scan of the root context and its ancestors.
    ///
    /// Every call starts from an empty working state.
    pub fn scan(&self) -> ScanOutput {
        let start = Instant::now();
        let mut run = ScanRun::new(&self.filters);

        let hierarchy = self.root.hierarchy();
        for context in &hierarchy {
            run.accepted
                .entry(context.id())
                .or_insert_with(|| (Arc::clone(context), IndexSet::new()));
        }

        for (origin, context) in flatten_origins(&hierarchy) {
            run.scan_origin(&origin, &context);
        }

        let mut report = run.report;
        report.duration = start.elapsed();
        info!(
            "Classpath scan of '{}' complete: {} origins, {} archives, {} cross-references, {} accepted, {} rejected in {:?}",
            self.root.name(),
            report.origins_scanned,
            report.archives_opened,
            report.cross_references,
            report.resources_accepted,
            report.resources_rejected,
            report.duration
        );

        let contexts = run
            .accepted
            .into_values()
            .filter(|(_, names)| !names.is_empty())
            .map(|(context, names)| ContextResources {
                resources: names
                    .into_iter()
                    .map(|name| Resource::create(name, Arc::clone(&context)))
                    .collect(),
                context,
            })
            .collect();

        ScanOutput { contexts, report }
    }
}

/// Ordered `(origin, owner)` pairs, parents first. A path listed by more than
/// one context stays with the first context listing it.
fn flatten_origins(hierarchy: &[Arc<LoadingContext>]) -> Vec<(PathBuf, Arc<LoadingContext>)> {
    let mut entries: IndexMap<PathBuf, (PathBuf, Arc<LoadingContext>)> = IndexMap::new();
    for context in hierarchy {
        for origin in context.local_origins() {
            entries
                .entry(file_identity(&origin))
                .or_insert_with(|| (origin, Arc::clone(context)));
        }
    }
    entries.into_values().collect()
}

/// Working state of one scan.
struct ScanRun<'a> {
    filters: &'a FilterChain,
    visited: HashSet<PathBuf>,
    accepted: IndexMap<ContextId, (Arc<LoadingContext>, IndexSet<String>)>,
    report: ScanReport,
}

impl<'a> ScanRun<'a> {
    fn new(filters: &'a FilterChain) -> Self {
        Self {
            filters,
            visited: HashSet::new(),
            accepted: IndexMap::new(),
            report: ScanReport::default(),
        }
    }

    fn scan_origin(&mut self, origin: &Path, context: &Arc<LoadingContext>) {
        if !self.visited.insert(file_identity(origin)) {
            debug!("Already scanned {:?}", origin);
            return;
        }

        let metadata = match std::fs::metadata(origin) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Origin {:?} does not exist", origin);
                self.report.origins_missing += 1;
                return;
            }
            Err(e) => {
                warn!("Cannot access origin {:?}: {}", origin, e);
                self.report.origins_failed += 1;
                return;
            }
        };

        if metadata.is_dir() {
            self.scan_directory(origin, context);
        } else {
            self.scan_archive(origin, context);
        }
    }

    fn scan_directory(&mut self, dir: &Path, context: &Arc<LoadingContext>) {
        debug!("Scanning directory {:?} for '{}'", dir, context.name());
        self.report.origins_scanned += 1;

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .follow_links(true)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    debug!("Skipping unreadable entry under {:?}: {}", dir, e);
                    continue;
                }
            };
            if entry.file_type().is_dir() {
                continue;
            }
            if let Some(name) = resource_name(dir, entry.path()) {
                self.record(context, name);
            }
        }
    }

    fn scan_archive(&mut self, path: &Path, context: &Arc<LoadingContext>) {
        // The handle is drained and dropped before any cross-reference is
        // scanned, so at most one archive is open at a time.
        let (cross_references, names) = match Archive::open(path) {
            Ok(mut archive) => {
                let cross_references = archive.cross_references().unwrap_or_else(|e| {
                    warn!("Ignoring index descriptor of {:?}: {}", path, e);
                    Vec::new()
                });
                match archive.resource_names() {
                    Ok(names) => (cross_references, names),
                    Err(e) => {
                        warn!("Failed to read archive {:?}: {}", path, e);
                        self.report.origins_failed += 1;
                        return;
                    }
                }
            }
            Err(e) => {
                debug!("Skipping {:?}, not a readable archive: {}", path, e);
                self.report.origins_failed += 1;
                return;
            }
        };

        debug!("Scanning archive {:?} for '{}'", path, context.name());
        self.report.origins_scanned += 1;
        self.report.archives_opened += 1;

        for reference in cross_references {
            self.report.cross_references += 1;
            self.scan_origin(&reference, context);
        }

        for name in names {
            self.record(context, name);
        }
    }

    fn record(&mut self, context: &Arc<LoadingContext>, name: String) {
        if !self.filters.accept(context, &name) {
            self.report.resources_rejected += 1;
            return;
        }
        let (_, names) = self
            .accepted
            .entry(context.id())
            .or_insert_with(|| (Arc::clone(context), IndexSet::new()));
        if names.insert(name) {
            self.report.resources_accepted += 1;
        }
    }
}

/// Slash-delimited name of `path` relative to `root`.
fn resource_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Resources accepted for one loading context, in discovery order.
#[derive(Debug, Clone)]
pub struct ContextResources {
    pub context: Arc<LoadingContext>,
    pub resources: IndexSet<Resource>,
}

#[derive(Debug, Clone)]
pub struct ScanOutput {
    /// Per-context results, outermost ancestor first.
    pub contexts: Vec<ContextResources>,
    pub report: ScanReport,
}

impl ScanOutput {
    /// All accepted resources, contexts in hierarchy order.
    pub fn resources(&self) -> IndexSet<Resource> {
        self.contexts
            .iter()
            .flat_map(|c| c.resources.iter().cloned())
            .collect()
    }
}

/// Result of a scan operation
#[derive(Debug, Default, Clone)]
pub struct ScanReport {
    /// Directories and archives that were enumerated
    pub origins_scanned: usize,
    /// Origins that did not exist
    pub origins_missing: usize,
    /// Origins that could not be read (access denied, not an archive, corrupt)
    pub origins_failed: usize,
    /// Number of archives opened
    pub archives_opened: usize,
    /// Cross-references followed from index descriptors
    pub cross_references: usize,
    /// Resources accepted by every filter
    pub resources_accepted: usize,
    /// Resources rejected by at least one filter
    pub resources_rejected: usize,
    /// Time taken for the scan
    pub duration: Duration,
}
