//! Lookup of single resources across a list of origin locations.
//!
//! Origins are searched in order. An archive's cross-references are appended
//! to the end of the search list when the archive is first opened, so they
//! are probed after every origin listed before them.

use crate::archive::Archive;
use crate::error::{FathomError, Result};
use serde::Serialize;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Where a resource physically lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResourceLocation {
    File(PathBuf),
    ArchiveEntry { archive: PathBuf, entry: String },
}

impl ResourceLocation {
    pub fn read(&self) -> Result<Vec<u8>> {
        match self {
            ResourceLocation::File(path) => Ok(std::fs::read(path)?),
            ResourceLocation::ArchiveEntry { archive, entry } => Archive::open(archive)?
                .read_entry(entry)?
                .ok_or_else(|| {
                    FathomError::NotFound(format!("{} in {}", entry, archive.display()))
                }),
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceLocation::File(path) => write!(f, "{}", path.display()),
            ResourceLocation::ArchiveEntry { archive, entry } => {
                write!(f, "{}!/{}", archive.display(), entry)
            }
        }
    }
}

/// Canonical identity used to deduplicate origins. Falls back to the given
/// path when it cannot be canonicalized (e.g. it does not exist).
pub(crate) fn file_identity(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

pub fn locate(origins: &[PathBuf], resource_name: &str) -> Option<ResourceLocation> {
    let mut queue: VecDeque<PathBuf> = origins.iter().cloned().collect();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    while let Some(origin) = queue.pop_front() {
        if !seen.insert(file_identity(&origin)) {
            continue;
        }

        if origin.is_dir() {
            let candidate = origin.join(resource_name);
            if candidate.is_file() {
                return Some(ResourceLocation::File(candidate));
            }
            continue;
        }

        if !origin.is_file() {
            continue;
        }

        let mut archive = match Archive::open(&origin) {
            Ok(archive) => archive,
            Err(e) => {
                debug!("Skipping unreadable origin {:?}: {}", origin, e);
                continue;
            }
        };
        if archive.contains(resource_name) {
            return Some(ResourceLocation::ArchiveEntry {
                archive: origin,
                entry: resource_name.to_string(),
            });
        }
        match archive.cross_references() {
            Ok(refs) => queue.extend(refs),
            Err(e) => debug!("Ignoring index descriptor of {:?}: {}", origin, e),
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::INDEX_DESCRIPTOR;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;

    fn write_jar(path: &Path, class_path: Option<&str>, entries: &[&str]) {
        let mut zip = zip::ZipWriter::new(File::create(path).unwrap());
        let options = SimpleFileOptions::default();
        if let Some(class_path) = class_path {
            zip.start_file(INDEX_DESCRIPTOR, options).unwrap();
            write!(zip, "Manifest-Version: 1.0\nClass-Path: {}\n", class_path).unwrap();
        }
        for entry in entries {
            zip.start_file(*entry, options).unwrap();
            zip.write_all(entry.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_directories_are_probed_in_order() {
        let dir = tempdir().unwrap();
        let first = dir.path().join("first");
        let second = dir.path().join("second");
        std::fs::create_dir_all(first.join("conf")).unwrap();
        std::fs::create_dir_all(second.join("conf")).unwrap();
        std::fs::write(second.join("conf/app.properties"), "b").unwrap();

        let found = locate(&[first, second.clone()], "conf/app.properties");
        assert_eq!(
            found,
            Some(ResourceLocation::File(second.join("conf/app.properties")))
        );
    }

    #[test]
    fn test_cross_referenced_archives_are_searched() {
        let dir = tempdir().unwrap();
        write_jar(&dir.path().join("util.jar"), None, &["com/example/Util.class"]);
        write_jar(&dir.path().join("app.jar"), Some("util.jar"), &["app.properties"]);

        let found = locate(&[dir.path().join("app.jar")], "com/example/Util.class").unwrap();
        match &found {
            ResourceLocation::ArchiveEntry { archive, entry } => {
                assert!(archive.ends_with("util.jar"));
                assert_eq!(entry, "com/example/Util.class");
            }
            other => panic!("unexpected location {other:?}"),
        }
        assert_eq!(found.read().unwrap(), b"com/example/Util.class".to_vec());
    }

    #[test]
    fn test_missing_resource() {
        let dir = tempdir().unwrap();
        assert_eq!(locate(&[dir.path().to_path_buf()], "nothing.here"), None);
        assert_eq!(locate(&[dir.path().join("absent.jar")], "nothing.here"), None);
    }
}
