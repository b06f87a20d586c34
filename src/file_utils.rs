use anyhow::{Context, Result};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::video_id::VideoId;

// @module: File and directory utilities

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().is_file()
    }

    // @creates: Directory and parents if needed
    pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.exists() {
            fs::create_dir_all(path)
                .with_context(|| format!("Failed to create directory: {:?}", path))?;
        }
        Ok(())
    }

    // @generates: `<dir>/<videoId>.<ext>` path of a pre-supplied subtitle file
    pub fn subtitle_path<P: AsRef<Path>>(dir: P, video_id: &VideoId, extension: &str) -> PathBuf {
        let extension = extension.trim_start_matches('.');
        dir.as_ref().join(format!("{}.{}", video_id, extension))
    }

    /// Read a file to a string
    pub fn read_to_string<P: AsRef<Path>>(path: P) -> Result<String> {
        fs::read_to_string(&path)
            .with_context(|| format!("Failed to read file: {:?}", path.as_ref()))
    }

    /// Write a string to a file
    pub fn write_to_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
        if let Some(parent) = path.as_ref().parent().filter(|p| !p.as_os_str().is_empty()) {
            Self::ensure_dir(parent)?;
        }

        fs::write(&path, content)
            .with_context(|| format!("Failed to write to file: {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Remove a file, ignoring a file that is already gone
    pub fn remove_quietly<P: AsRef<Path>>(path: P) {
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                debug!("Failed to remove {:?}: {}", path.as_ref(), e);
            }
        }
    }

    /// List video ids that have a pre-supplied subtitle file in `dir`.
    ///
    /// Files whose stem is not a valid video id are ignored. The result is
    /// sorted and free of duplicates.
    pub fn list_local_video_ids<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<VideoId>> {
        let dir = dir.as_ref();
        let extension = extension.trim_start_matches('.');

        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in WalkDir::new(dir).max_depth(1).follow_links(true) {
            let entry = entry.context("Failed to read directory entry")?;
            let path = entry.path();

            if !path.is_file() {
                continue;
            }

            let matches_extension = path
                .extension()
                .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(extension));
            if !matches_extension {
                continue;
            }

            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy()) else {
                continue;
            };

            match VideoId::parse(&stem) {
                Ok(id) => ids.push(id),
                Err(_) => debug!("Ignoring subtitle file with a non-id name: {:?}", path),
            }
        }

        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        ids.dedup();
        Ok(ids)
    }
}
