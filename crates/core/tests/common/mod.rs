#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// Writes a ZIP archive at `path`, with an index descriptor carrying
/// `class_path` as cross-references when given.
pub fn write_jar(path: &Path, class_path: Option<&str>, entries: &[&str]) {
    let file = std::fs::File::create(path).expect("create archive");
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default();

    if let Some(class_path) = class_path {
        zip.start_file("META-INF/MANIFEST.MF", options)
            .expect("start manifest");
        write!(
            zip,
            "Manifest-Version: 1.0\r\nClass-Path: {class_path}\r\n\r\n"
        )
        .expect("write manifest");
    }
    for entry in entries {
        zip.start_file(*entry, options).expect("start entry");
        zip.write_all(entry.as_bytes()).expect("write entry");
    }
    zip.finish().expect("finish archive");
}

/// Creates empty files under `root`, one per slash-delimited name.
pub fn write_tree(root: &Path, names: &[&str]) {
    for name in names {
        let path = root.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create dirs");
        }
        std::fs::write(&path, name.as_bytes()).expect("write file");
    }
}
