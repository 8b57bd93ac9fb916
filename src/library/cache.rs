use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// On-disk record for one locally-persisted text.
#[derive(Debug, Serialize, Deserialize)]
struct CachedText {
    title: String,
    passages: Vec<String>,
}

/// JSON-file cache for flat-file texts, one record per title. Records
/// are written once after the first successful download and trusted
/// from then on; there is no expiry, versioning, or integrity check.
pub struct TextCache {
    dir: PathBuf,
}

impl TextCache {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create cache dir {}", dir.display()))?;
        Ok(Self { dir })
    }

    /// Filesystem-safe key: spaces become underscores.
    fn path_for(&self, title: &str) -> PathBuf {
        self.dir.join(format!("{}.json", title.replace(' ', "_")))
    }

    /// Read a title's cached passages, or `None` if no record exists.
    pub fn read(&self, title: &str) -> Result<Option<Vec<String>>> {
        let path = self.path_for(title);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path)
            .with_context(|| format!("Failed to read cache file {}", path.display()))?;
        let record: CachedText = serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse cache file {}", path.display()))?;
        Ok(Some(record.passages))
    }

    pub fn write(&self, title: &str, passages: &[String]) -> Result<()> {
        let record = CachedText {
            title: title.to_string(),
            passages: passages.to_vec(),
        };
        let json = serde_json::to_string_pretty(&record).context("Failed to serialize cache record")?;
        let path = self.path_for(title);
        std::fs::write(&path, json)
            .with_context(|| format!("Failed to write cache file {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passages(texts: &[&str]) -> Vec<String> {
        texts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TextCache::new(dir.path()).unwrap();
        let written = passages(&["First passage.", "Second passage."]);
        cache.write("Dhammapada", &written).unwrap();
        assert_eq!(cache.read("Dhammapada").unwrap(), Some(written));
    }

    #[test]
    fn test_key_replaces_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TextCache::new(dir.path()).unwrap();
        cache.write("Bhagavad Gita", &passages(&["one"])).unwrap();
        assert!(dir.path().join("Bhagavad_Gita.json").exists());
    }

    #[test]
    fn test_missing_record_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TextCache::new(dir.path()).unwrap();
        assert_eq!(cache.read("Upanishads").unwrap(), None);
    }

    #[test]
    fn test_record_format() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TextCache::new(dir.path()).unwrap();
        cache.write("Dhammapada", &passages(&["a", "b"])).unwrap();

        let raw = std::fs::read_to_string(dir.path().join("Dhammapada.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["title"], "Dhammapada");
        assert_eq!(value["passages"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_corrupt_record_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let cache = TextCache::new(dir.path()).unwrap();
        std::fs::write(dir.path().join("Broken.json"), "not json").unwrap();
        assert!(cache.read("Broken").is_err());
    }
}
