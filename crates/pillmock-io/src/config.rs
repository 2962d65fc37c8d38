use std::fs;
use std::path::{Path, PathBuf};

use pillmock_core::{KeyScope, MockError};
use serde::{Deserialize, Serialize};

/// Settings for a mock session, read from `pillmock.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    /// Library that generated cells are tagged with.
    pub library: String,
    /// Layer-map file, relative to the working directory.
    pub layermap: PathBuf,
    /// Whether cells are keyed by name alone or by library and name.
    pub key_scope: KeyScope,
    /// Reject rectangles on layers missing from the layer map.
    pub strict_layers: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            library: "mytech".to_string(),
            layermap: PathBuf::from("mytech.layermap"),
            key_scope: KeyScope::Name,
            strict_layers: false,
        }
    }
}

impl MockConfig {
    pub const FILE_NAME: &'static str = "pillmock.json";

    pub fn from_json(json: &str) -> Result<Self, MockError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, MockError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Load `pillmock.json` from `dir` if it exists, defaults otherwise.
    pub fn discover(dir: impl AsRef<Path>) -> Result<Self, MockError> {
        let path = dir.as_ref().join(Self::FILE_NAME);
        if path.is_file() {
            log::info!("Using configuration {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let cfg = MockConfig::from_json(r#"{ "key_scope": "library_and_name" }"#).unwrap();
        assert_eq!(cfg.key_scope, KeyScope::LibraryAndName);
        assert_eq!(cfg.library, "mytech");
        assert_eq!(cfg.layermap, PathBuf::from("mytech.layermap"));
        assert!(!cfg.strict_layers);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            MockConfig::from_json(r#"{ "key_scope": "global" }"#),
            Err(MockError::Json(_))
        ));
    }

    #[test]
    fn test_discover() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(MockConfig::discover(dir.path()).unwrap(), MockConfig::default());

        fs::write(
            dir.path().join(MockConfig::FILE_NAME),
            r#"{ "library": "sky", "strict_layers": true }"#,
        )
        .unwrap();
        let cfg = MockConfig::discover(dir.path()).unwrap();
        assert_eq!(cfg.library, "sky");
        assert!(cfg.strict_layers);
    }
}
