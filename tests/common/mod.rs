#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use annofactory::ir::{Annotation, Region};

/// The record used throughout the end-to-end examples.
pub fn apples() -> Annotation {
    Annotation::new(Region::new(0.288039029, 0.411838, 0.291451037, 0.4237842))
        .with_tag_name("apples")
        .with_tag_id(0)
}

pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(&path, contents).expect("write fixture file");
    path
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}
