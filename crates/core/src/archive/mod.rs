//! Archive container access (ZIP/JAR).
//!
//! An [`Archive`] is a scoped handle: open it, drain what is needed and let
//! it drop before moving on to the next origin.

pub mod manifest;

pub use manifest::Manifest;

use crate::error::{FathomError, Result};
use crate::naming::INDEX_DESCRIPTOR;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;
use zip::ZipArchive;
use zip::result::ZipError;

pub struct Archive {
    path: PathBuf,
    inner: ZipArchive<File>,
}

impl Archive {
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let inner = ZipArchive::new(file)?;
        Ok(Self {
            path: path.to_path_buf(),
            inner,
        })
    }

    /// Reads the index descriptor, if the archive carries one.
    pub fn manifest(&mut self) -> Result<Option<Manifest>> {
        match self.read_entry(INDEX_DESCRIPTOR)? {
            Some(bytes) => {
                let content = String::from_utf8(bytes).map_err(|e| {
                    FathomError::Manifest(format!("{}: {}", self.path.display(), e))
                })?;
                Manifest::parse(&content).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Names of the file entries in central-directory order, without
    /// directory markers and without the index descriptor.
    ///
    /// Entries are listed raw, so encrypted entries or unsupported
    /// compression methods do not hide the rest of the archive.
    pub fn resource_names(&mut self) -> Result<Vec<String>> {
        let mut names = Vec::with_capacity(self.inner.len());
        for i in 0..self.inner.len() {
            let entry = self.inner.by_index_raw(i)?;
            if entry.is_dir() || entry.name() == INDEX_DESCRIPTOR {
                continue;
            }
            names.push(entry.name().to_string());
        }
        Ok(names)
    }

    pub fn contains(&mut self, name: &str) -> bool {
        let Some(index) = self.inner.index_for_name(name) else {
            return false;
        };
        match self.inner.by_index_raw(index) {
            Ok(entry) => !entry.is_dir(),
            Err(_) => false,
        }
    }

    pub fn read_entry(&mut self, name: &str) -> Result<Option<Vec<u8>>> {
        let mut entry = match self.inner.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(Some(bytes))
    }

    /// Local locations referenced by this archive's `Class-Path` attribute.
    pub fn cross_references(&mut self) -> Result<Vec<PathBuf>> {
        Ok(match self.manifest()? {
            Some(manifest) => manifest
                .class_path()
                .map(|class_path| resolve_cross_references(&self.path, class_path))
                .unwrap_or_default(),
            None => Vec::new(),
        })
    }
}

/// Resolves a whitespace-separated list of relative references against the
/// archive's own location. Entries that do not form a valid URL, or that do
/// not point to a local file, are skipped.
pub fn resolve_cross_references(archive: &Path, class_path: &str) -> Vec<PathBuf> {
    let base = match std::path::absolute(archive)
        .ok()
        .and_then(|abs| Url::from_file_path(abs).ok())
    {
        Some(base) => base,
        None => {
            debug!("Cannot express {:?} as a file URL", archive);
            return Vec::new();
        }
    };

    let mut locations = Vec::new();
    for reference in class_path.split_whitespace() {
        let url = match base.join(reference) {
            Ok(url) => url,
            Err(e) => {
                debug!("Skipping malformed cross-reference {:?} in {:?}: {}", reference, archive, e);
                continue;
            }
        };
        if url.scheme() != "file" {
            debug!("Skipping non-local cross-reference {} in {:?}", url, archive);
            continue;
        }
        match url.to_file_path() {
            Ok(path) if !locations.contains(&path) => locations.push(path),
            Ok(_) => {}
            Err(()) => debug!("Skipping unmappable cross-reference {}", url),
        }
    }
    locations
}
