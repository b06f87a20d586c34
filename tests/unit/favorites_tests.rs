/*!
 * Tests for the favorites store
 */

use anyhow::Result;
use chrono::DateTime;

use shadowsub::favorites::FavoritesStore;
use shadowsub::video_id::VideoId;
use crate::common;

fn id(value: &str) -> VideoId {
    VideoId::parse(value).unwrap()
}

#[test]
fn test_list_withMissingFile_shouldBeEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = FavoritesStore::new(temp_dir.path().join("favorites.json"));

    assert!(store.list().is_empty());
    assert!(!store.is_favorite(&id("dQw4w9WgXcQ")));
    Ok(())
}

#[test]
fn test_add_withNewVideo_shouldPersistWithTimestamp() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = temp_dir.path().join("nested").join("favorites.json");
    let store = FavoritesStore::new(&path);

    assert!(store.add(&id("dQw4w9WgXcQ"), "Interview", None)?);

    let reopened = FavoritesStore::new(&path);
    let favorites = reopened.list();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title, "Interview");
    assert_eq!(favorites[0].thumbnail, "https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg");
    assert!(DateTime::parse_from_rfc3339(&favorites[0].added_at).is_ok());
    assert!(reopened.is_favorite(&id("dQw4w9WgXcQ")));
    Ok(())
}

#[test]
fn test_add_withDuplicate_shouldKeepSingleEntry() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = FavoritesStore::new(temp_dir.path().join("favorites.json"));

    assert!(store.add(&id("dQw4w9WgXcQ"), "first", Some("thumb.jpg"))?);
    assert!(!store.add(&id("dQw4w9WgXcQ"), "second", None)?);

    let favorites = store.list();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].title, "first");
    assert_eq!(favorites[0].thumbnail, "thumb.jpg");
    Ok(())
}

#[test]
fn test_remove_withSavedAndUnknownVideos_shouldOnlyRemoveSaved() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let store = FavoritesStore::new(temp_dir.path().join("favorites.json"));
    store.add(&id("dQw4w9WgXcQ"), "one", None)?;
    store.add(&id("abc_DEF-123"), "two", None)?;

    assert!(store.remove(&id("dQw4w9WgXcQ"))?);
    assert!(!store.remove(&id("dQw4w9WgXcQ"))?);

    let ids: Vec<String> = store.list().into_iter().map(|f| f.video_id.to_string()).collect();
    assert_eq!(ids, vec!["abc_DEF-123".to_string()]);
    Ok(())
}

#[test]
fn test_list_withCorruptFile_shouldTreatAsEmpty() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let path = common::create_test_file(temp_dir.path(), "favorites.json", "{ not json")?;
    let store = FavoritesStore::new(path);

    assert!(store.list().is_empty());
    assert!(store.add(&id("dQw4w9WgXcQ"), "recovered", None)?);
    assert_eq!(store.list().len(), 1);
    Ok(())
}

#[test]
fn test_list_withCamelCaseFile_shouldReadExistingEntries() -> Result<()> {
    let temp_dir = common::create_temp_dir()?;
    let content = r#"[{"videoId":"dQw4w9WgXcQ","title":"Saved","thumbnail":"t.jpg","addedAt":"2024-05-01T10:00:00.000Z"}]"#;
    let path = common::create_test_file(temp_dir.path(), "favorites.json", content)?;

    let favorites = FavoritesStore::new(path).list();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].added_at, "2024-05-01T10:00:00.000Z");
    Ok(())
}
