//! File unit provider: walks the requested paths, applies exclude
//! patterns, and yields file units in a stable order.
//!
//! The engine never discovers files itself; this is its only source. Read
//! and decode failures are not fatal here — they are passed through as
//! [`FileAccessError`] entries so the engine can record them as diagnostic
//! findings and keep going.

use anyhow::{bail, Result};
use kansa_engine::{FileAccessError, FileUnit, Language, ProvidedFile};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub fn collect(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<ProvidedFile>> {
    let mut discovered = Vec::new();

    for path in paths {
        if path.is_file() {
            if is_supported(path) && !is_excluded(path, exclude) {
                discovered.push(path.clone());
            }
        } else if path.is_dir() {
            for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
                let entry_path = entry.path();
                if entry_path.is_file()
                    && is_supported(entry_path)
                    && !is_excluded(entry_path, exclude)
                {
                    discovered.push(entry_path.to_path_buf());
                }
            }
        } else {
            bail!("input path does not exist: {}", path.display());
        }
    }

    // Stable discovery order; the engine re-sorts by path anyway, but a
    // deterministic provider keeps logs and partial runs reproducible too.
    discovered.sort();
    discovered.dedup();

    Ok(discovered.iter().map(|p| load(p)).collect())
}

fn load(path: &Path) -> ProvidedFile {
    let display = path.to_string_lossy().to_string();
    match fs::read_to_string(path) {
        Ok(content) => Ok(FileUnit::new(display, content)),
        Err(error) => Err(FileAccessError {
            path: display,
            detail: error.to_string(),
        }),
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| Language::supported_extensions().contains(&ext))
}

/// Exclude patterns match either a whole path component (`node_modules`,
/// `.git`) or a filename suffix (`.min.js`).
fn is_excluded(path: &Path, patterns: &[String]) -> bool {
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    patterns.iter().any(|pattern| {
        path.components()
            .any(|c| c.as_os_str().to_str() == Some(pattern.as_str()))
            || (pattern.starts_with('.') && file_name.ends_with(pattern.as_str()) && file_name != pattern)
    })
}
