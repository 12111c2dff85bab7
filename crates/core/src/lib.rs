pub mod archive;
pub mod classpath;
pub mod context;
pub mod error;
pub mod filter;
pub mod logging;
pub mod model;
pub mod naming;
pub mod profile;
pub mod reflection;
pub mod resolver;
pub mod scanner;

pub use classpath::{ResourceLocation, locate};
pub use context::{ContextId, LoadingContext, LoadingContextBuilder, Origin};
pub use error::{FathomError, Result};
pub use filter::{Filter, FilterChain, ManifestFilter, PackageFilter, PackageMode, TagFilter, TagMode};
pub use model::{Resource, ResourceRecord, TypedRecord};
pub use profile::ScanProfile;
pub use reflection::{Reflection, ReflectionBuilder};
pub use resolver::{NoopResolver, StaticResolver, TypeResolver};
pub use scanner::{ContextResources, ScanOutput, ScanReport, Scanner};
