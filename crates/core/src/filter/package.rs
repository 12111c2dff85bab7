use crate::context::LoadingContext;
use crate::error::{FathomError, Result};
use crate::filter::Filter;
use crate::naming::{self, NAMESPACE_SEPARATOR, PATH_SEPARATOR};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PackageMode {
    #[default]
    Strict,
    WithSubpackages,
}

/// Accepts only resources located in a given package.
///
/// The empty package name stands for the root package and matches only
/// resources without any path separator, whatever the mode.
#[derive(Debug, Clone)]
pub struct PackageFilter {
    package: String,
    mode: PackageMode,
}

impl PackageFilter {
    pub fn new(package: impl Into<String>) -> Result<Self> {
        let package = package.into();
        validate(&package)?;
        Ok(Self {
            package,
            mode: PackageMode::Strict,
        })
    }

    /// Variant for optional configuration values: an unset package is a
    /// configuration error, the root package must be spelled `""`.
    pub fn from_optional(package: Option<&str>) -> Result<Self> {
        match package {
            Some(package) => Self::new(package),
            None => Err(FathomError::InvalidArgument(
                "Package name cannot be unset. Use an empty string if you meant the root package."
                    .to_string(),
            )),
        }
    }

    pub fn allow_subpackages(mut self) -> Self {
        self.mode = PackageMode::WithSubpackages;
        self
    }

    pub fn with_mode(mut self, mode: PackageMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn mode(&self) -> PackageMode {
        self.mode
    }
}

fn validate(package: &str) -> Result<()> {
    if package.is_empty() {
        return Ok(());
    }
    if package.contains(PATH_SEPARATOR) {
        return Err(FathomError::InvalidArgument(format!(
            "Package name {package:?} must use '{NAMESPACE_SEPARATOR}' as separator"
        )));
    }
    if package.split(NAMESPACE_SEPARATOR).any(str::is_empty) {
        return Err(FathomError::InvalidArgument(format!(
            "Package name {package:?} contains an empty segment"
        )));
    }
    Ok(())
}

impl Filter for PackageFilter {
    fn accept(&self, _context: &LoadingContext, resource_name: &str) -> bool {
        let namespace = naming::namespace_of(resource_name);

        if self.package.is_empty() {
            return namespace.is_none();
        }

        match (namespace, self.mode) {
            (None, _) => false,
            (Some(ns), PackageMode::Strict) => ns == self.package,
            (Some(ns), PackageMode::WithSubpackages) => ns.starts_with(&self.package),
        }
    }
}
