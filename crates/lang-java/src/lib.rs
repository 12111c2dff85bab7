//! Type resolution for JVM class files.
//!
//! [`ClassFileResolver`] reads `.class` definitions straight from a loading
//! context's origins and turns them into [`fathom_api::TypeHandle`]s, without
//! running any code from them.

pub mod class_file;
pub mod descriptor;

pub use class_file::{ClassFileResolver, ResolveError};
