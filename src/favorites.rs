use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::file_utils::FileManager;
use crate::video_id::VideoId;

// @module: Favorite videos persisted as a JSON file

// @struct: One saved video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteVideo {
    // @field: Video identifier
    pub video_id: VideoId,

    // @field: Display title
    pub title: String,

    // @field: Thumbnail URL
    pub thumbnail: String,

    // @field: RFC 3339 time the video was saved
    pub added_at: String,
}

/// Favorites list stored as a JSON array in a single file.
///
/// Every call reads the file afresh, so several processes see each other's
/// changes. A missing file is an empty list; an unreadable or corrupt one
/// is logged and treated as empty.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    path: PathBuf,
}

impl FavoritesStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> Vec<FavoriteVideo> {
        if !FileManager::file_exists(&self.path) {
            return Vec::new();
        }

        let content = match FileManager::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                error!("Could not read favorites: {:#}", e);
                return Vec::new();
            }
        };

        if content.trim().is_empty() {
            return Vec::new();
        }

        serde_json::from_str(&content).unwrap_or_else(|e| {
            error!("Ignoring corrupt favorites file {}: {}", self.path.display(), e);
            Vec::new()
        })
    }

    pub fn is_favorite(&self, video_id: &VideoId) -> bool {
        self.list().iter().any(|favorite| &favorite.video_id == video_id)
    }

    /// Save a video; returns `false` when it was already saved
    pub fn add(&self, video_id: &VideoId, title: &str, thumbnail: Option<&str>) -> Result<bool> {
        let mut favorites = self.list();
        if favorites.iter().any(|favorite| &favorite.video_id == video_id) {
            debug!("{} is already a favorite", video_id);
            return Ok(false);
        }

        favorites.push(FavoriteVideo {
            video_id: video_id.clone(),
            title: title.to_string(),
            thumbnail: thumbnail.map_or_else(|| video_id.thumbnail_url(), str::to_string),
            added_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        });

        self.save(&favorites)?;
        Ok(true)
    }

    /// Remove a video; returns `false` when it was not saved
    pub fn remove(&self, video_id: &VideoId) -> Result<bool> {
        let mut favorites = self.list();
        let before = favorites.len();
        favorites.retain(|favorite| &favorite.video_id != video_id);

        if favorites.len() == before {
            return Ok(false);
        }

        self.save(&favorites)?;
        Ok(true)
    }

    fn save(&self, favorites: &[FavoriteVideo]) -> Result<()> {
        let json = serde_json::to_string_pretty(favorites).context("Failed to serialize favorites")?;
        FileManager::write_to_file(&self.path, &json)
    }
}
