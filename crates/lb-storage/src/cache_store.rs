//! File system storage for the leaderboard cache

use lb_core::cache::{CacheFile, CacheStorage, LeaderboardCache};
use lb_core::error::{LeaderboardError, Result};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CACHE_FILE_NAME: &str = "leaderboard.json";

/// File system based cache storage
pub struct FileSystemStorage {
    /// Base directory for storage
    base_dir: PathBuf,
    /// Cache subdirectory
    cache_dir: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file system storage
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let base_dir = base_dir.into();
        let cache_dir = base_dir.join("cache");

        let storage = Self {
            base_dir,
            cache_dir,
        };

        storage.ensure_dirs()?;
        Ok(storage)
    }

    /// Create storage in the platform data directory (~/.leaderboard as fallback)
    pub fn default_location() -> Result<Self> {
        Self::new(Self::default_base_dir())
    }

    /// Platform data directory used by [`FileSystemStorage::default_location`]
    pub fn default_base_dir() -> PathBuf {
        directories::ProjectDirs::from("com", "leaderboard", "leaderboard")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join(".leaderboard")
            })
    }

    fn ensure_dirs(&self) -> Result<()> {
        if !self.cache_dir.exists() {
            fs::create_dir_all(&self.cache_dir).map_err(|e| {
                LeaderboardError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create cache directory: {}", e),
                ))
            })?;
            debug!("Created cache directory: {:?}", self.cache_dir);
        }
        Ok(())
    }

    /// Path of the cache file
    pub fn cache_path(&self) -> PathBuf {
        self.cache_dir.join(CACHE_FILE_NAME)
    }

    fn temp_path(&self) -> PathBuf {
        self.cache_dir.join(format!(".{}.tmp", CACHE_FILE_NAME))
    }

    /// Write the cache atomically (write to temp, then rename)
    fn atomic_write(&self, cache: &LeaderboardCache) -> Result<()> {
        let temp_path = self.temp_path();
        let final_path = self.cache_path();

        let file = CacheFile::new(cache.clone());

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            LeaderboardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            LeaderboardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!(
            "Saved {} leaderboard entries to {:?}",
            cache.entries.len(),
            final_path
        );
        Ok(())
    }

    fn read_cache(&self, path: &Path) -> Result<LeaderboardCache> {
        let file = fs::File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LeaderboardError::CacheNotFound(path.to_path_buf())
            } else {
                LeaderboardError::Io(e)
            }
        })?;

        let reader = BufReader::new(file);
        let cache_file: CacheFile = serde_json::from_reader(reader)
            .map_err(|e| LeaderboardError::Serde(e).with_context(format!("reading {:?}", path)))?;
        cache_file.into_cache()
    }

    /// Load the cache, failing with [`LeaderboardError::CacheNotFound`] when absent
    pub fn load_required(&self) -> Result<LeaderboardCache> {
        self.read_cache(&self.cache_path())
    }

    /// Get base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get cache directory
    pub fn cache_dir(&self) -> &PathBuf {
        &self.cache_dir
    }
}

impl CacheStorage for FileSystemStorage {
    fn load(&self) -> Result<Option<LeaderboardCache>> {
        match self.load_required() {
            Ok(cache) => Ok(Some(cache)),
            Err(LeaderboardError::CacheNotFound(_)) => Ok(None),
            Err(e) => {
                warn!("Unreadable cache at {:?}: {}", self.cache_path(), e);
                Err(e)
            }
        }
    }

    fn save(&self, cache: &LeaderboardCache) -> Result<()> {
        self.atomic_write(cache)
    }

    fn clear(&self) -> Result<bool> {
        let path = self.cache_path();
        if !path.exists() {
            return Ok(false);
        }

        fs::remove_file(&path).map_err(|e| {
            LeaderboardError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to delete cache file: {}", e),
            ))
        })?;

        debug!("Cleared cache at {:?}", path);
        Ok(true)
    }

    fn exists(&self) -> bool {
        self.cache_path().exists()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use lb_core::leaderboard::LeaderboardEntry;
    use lb_core::types::ContentDigest;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn create_test_storage() -> (FileSystemStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileSystemStorage::new(temp_dir.path()).unwrap();
        (storage, temp_dir)
    }

    fn create_test_cache() -> LeaderboardCache {
        LeaderboardCache::fetched_at(
            vec![
                LeaderboardEntry::new("Alice", 50.0).with_avatar("https://img/a.png"),
                LeaderboardEntry::new("Bob", 12.5),
            ],
            Utc.with_ymd_and_hms(2025, 9, 1, 12, 0, 0).unwrap(),
        )
        .with_source("comments.json")
        .with_digest(ContentDigest::of_bytes(b"comments"))
    }

    #[test]
    fn test_storage_creation() {
        let (storage, temp) = create_test_storage();
        assert!(storage.cache_dir().exists());
        assert_eq!(storage.base_dir(), &temp.path().to_path_buf());
        assert!(storage.cache_path().ends_with("cache/leaderboard.json"));
    }

    #[test]
    fn test_load_empty() {
        let (storage, _temp) = create_test_storage();
        assert!(!storage.exists());
        assert_eq!(storage.load().unwrap(), None);
        assert!(matches!(
            storage.load_required(),
            Err(LeaderboardError::CacheNotFound(_))
        ));
    }

    #[test]
    fn test_save_and_load() {
        let (storage, _temp) = create_test_storage();
        let cache = create_test_cache();

        storage.save(&cache).unwrap();
        assert!(storage.exists());
        assert_eq!(storage.load().unwrap(), Some(cache));
    }

    #[test]
    fn test_save_replaces_previous() {
        let (storage, _temp) = create_test_storage();
        storage.save(&create_test_cache()).unwrap();

        let newer = LeaderboardCache::new(vec![LeaderboardEntry::new("Carol", 7.0)]);
        storage.save(&newer).unwrap();

        let loaded = storage.load().unwrap().unwrap();
        assert_eq!(loaded.entries.len(), 1);
        assert_eq!(loaded.entries[0].name, "Carol");
    }

    #[test]
    fn test_atomic_write() {
        let (storage, _temp) = create_test_storage();
        storage.save(&create_test_cache()).unwrap();

        assert!(!storage.temp_path().exists());

        let content = fs::read_to_string(storage.cache_path()).unwrap();
        assert!(content.contains("schema_version"));
        assert!(content.contains("Alice"));
    }

    #[test]
    fn test_clear() {
        let (storage, _temp) = create_test_storage();
        assert!(!storage.clear().unwrap());

        storage.save(&create_test_cache()).unwrap();
        assert!(storage.clear().unwrap());
        assert!(!storage.exists());
    }

    #[test]
    fn test_corrupt_cache_is_an_error() {
        let (storage, _temp) = create_test_storage();
        fs::write(storage.cache_path(), "{ not json").unwrap();
        assert!(storage.load().is_err());
    }

    #[test]
    fn test_unknown_schema_version() {
        let (storage, _temp) = create_test_storage();
        let mut file = serde_json::to_value(CacheFile::new(create_test_cache())).unwrap();
        file["schema_version"] = serde_json::json!("9.9");
        fs::write(storage.cache_path(), file.to_string()).unwrap();

        assert!(matches!(
            storage.load(),
            Err(LeaderboardError::UnsupportedSchemaVersion(v)) if v == "9.9"
        ));
    }
}
