mod components;
mod scan;
mod view;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fathom_core::{Filter, LoadingContext, Origin, Reflection, ScanProfile, TypeResolver};
use fathom_java::ClassFileResolver;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Parser)]
#[command(
    name = "fathom",
    version,
    about = "Classpath resource and type discovery",
    long_about = "Fathom walks a hierarchy of loading contexts (directories and JAR archives, \
                  following their manifest Class-Path references) and reports the resources \
                  and types it finds, optionally narrowed by package or annotation."
)]
pub struct Cli {
    /// Also print logs to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the resources found on a classpath
    #[command(
        long_about = "Scans the given origins, or the contexts of a profile, and lists every \
                      resource accepted by the filters. Resources are grouped by owning context, \
                      parent contexts first."
    )]
    Scan {
        #[command(flatten)]
        source: SourceArgs,

        /// Keep only resources in this package (dot-separated, "" for the root package)
        #[arg(long, value_name = "NS")]
        package: Option<String>,

        /// Also accept resources in subpackages of --package
        #[arg(long, requires = "package")]
        subpackages: bool,

        /// Keep only types carrying this annotation (repeatable)
        #[arg(long = "tag", value_name = "TYPE")]
        tags: Vec<String>,

        /// Require every --tag instead of any
        #[arg(long, requires = "tags")]
        all_tags: bool,

        /// Which part of the snapshot to print
        #[arg(long, value_enum, default_value_t = Show::All)]
        show: Show,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// List the types carrying an annotation under a namespace prefix
    #[command(
        long_about = "Scans the classpath, resolves every type under the prefix from its class \
                      file and prints those declaring the annotation."
    )]
    Components {
        #[command(flatten)]
        source: SourceArgs,

        /// Fully qualified annotation type name
        #[arg(long, value_name = "TYPE")]
        tag: String,

        /// Namespace prefix, e.g. com.example
        #[arg(long, value_name = "NS", default_value = "")]
        prefix: String,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
pub struct SourceArgs {
    /// Directories, archives or file URLs forming the scanned context
    #[arg(value_name = "ORIGINS")]
    pub origins: Vec<String>,

    /// Scan profile describing a context hierarchy and its filters
    #[arg(long, value_name = "FILE", conflicts_with = "origins")]
    pub profile: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Show {
    All,
    Simple,
    Types,
    TopLevel,
}

/// Where a scan starts: a profile, or a single context built from origins.
pub(crate) enum Source {
    Profile(ScanProfile),
    Context(Arc<LoadingContext>),
}

impl SourceArgs {
    pub(crate) fn into_source(
        self,
        resolver: Arc<dyn TypeResolver>,
    ) -> Result<Source, Box<dyn std::error::Error>> {
        if let Some(path) = self.profile {
            return Ok(Source::Profile(ScanProfile::load(&path)?));
        }

        let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let origins = if self.origins.is_empty() {
            vec![Origin::Local(cwd.clone())]
        } else {
            self.origins
                .iter()
                .map(|raw| Origin::parse(raw, Path::new(&cwd)))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(Source::Context(
            LoadingContext::builder("app")
                .origins(origins)
                .resolver(resolver)
                .build(),
        ))
    }
}

impl Source {
    /// Scans the source. Profile filters run before `extra` filters.
    pub(crate) fn reflection(
        self,
        resolver: Arc<dyn TypeResolver>,
        extra: Vec<Box<dyn Filter>>,
    ) -> fathom_core::Result<Reflection> {
        let (root, mut filters) = match self {
            Source::Profile(profile) => (profile.build_contexts(resolver)?, profile.filters()?),
            Source::Context(root) => (root, Vec::new()),
        };
        filters.extend(extra);
        Ok(Reflection::builder(root).filters(filters).scan())
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = fathom_core::logging::init_logging("cli", cli.verbose);

    let resolver: Arc<dyn TypeResolver> = Arc::new(ClassFileResolver::new());

    match cli.command {
        Commands::Scan {
            source,
            package,
            subpackages,
            tags,
            all_tags,
            show,
            json,
        } => scan::run(
            source.into_source(resolver.clone())?,
            resolver,
            scan::ScanOptions {
                package,
                subpackages,
                tags,
                all_tags,
                show,
                json,
            },
        ),
        Commands::Components {
            source,
            tag,
            prefix,
            json,
        } => components::run(
            source.into_source(resolver.clone())?,
            resolver,
            &tag,
            &prefix,
            json,
        ),
    }
}
