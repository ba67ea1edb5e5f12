use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use quill_types::BlogId;

use crate::error::{EngineError, EngineResult};

/// Startup configuration for the engine.
///
/// Constructed once, from defaults or a TOML file, and passed into the
/// controller; nothing reconfigures it afterwards. The config also owns the
/// blob naming scheme, so no other layer ever derives a storage key.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Root directory for persisted snapshots.
    pub data_dir: PathBuf,
    /// Optional `username:digest` credential file. When absent the built-in
    /// fixture users are seeded.
    pub credentials_file: Option<PathBuf>,
    /// When `false` the engine runs purely in memory and never writes a
    /// snapshot. Default `true`.
    pub autosave: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            credentials_file: None,
            autosave: true,
        }
    }
}

impl EngineConfig {
    /// Load a configuration from a TOML file. Missing fields fall back to
    /// their defaults.
    pub fn from_file(path: &Path) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&raw).map_err(|e| EngineError::Config(format!("{}: {e}", path.display())))
    }

    /// Snapshot key of the blog collection blob.
    pub fn blogs_key(&self) -> String {
        "blogs.json".to_string()
    }

    /// Snapshot key of one blog's post collection blob.
    pub fn posts_key(&self, blog_id: BlogId) -> String {
        format!("records/{blog_id}.dat")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(config.credentials_file.is_none());
        assert!(config.autosave);
    }

    #[test]
    fn key_naming() {
        let config = EngineConfig::default();
        assert_eq!(config.blogs_key(), "blogs.json");
        assert_eq!(config.posts_key(1111114444), "records/1111114444.dat");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(&path, "autosave = false\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert!(!config.autosave);
        assert_eq!(config.data_dir, PathBuf::from("data"));
    }

    #[test]
    fn full_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quill.toml");
        std::fs::write(
            &path,
            "data_dir = \"/var/lib/quill\"\ncredentials_file = \"users.txt\"\nautosave = true\n",
        )
        .unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/quill"));
        assert_eq!(config.credentials_file, Some(PathBuf::from("users.txt")));
    }

    #[test]
    fn missing_or_malformed_file_is_config_error() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/quill.toml")).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "autosave = maybe").unwrap();
        let err = EngineConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
