//! Book profile registry.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::builtin::builtin_profiles;
use super::types::BookProfile;
use crate::error::{Result, SplitterError};

#[derive(Deserialize)]
struct ProfileFile {
    profiles: Vec<BookProfile>,
}

/// Registry of book profiles keyed by their short identifier.
pub struct ProfileRegistry {
    profiles: BTreeMap<String, BookProfile>,
}

impl ProfileRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            profiles: BTreeMap::new(),
        }
    }

    /// Create a registry holding the built-in profiles.
    pub fn with_builtins() -> Result<Self> {
        let mut registry = Self::new();
        for profile in builtin_profiles() {
            registry.register(profile)?;
        }
        Ok(registry)
    }

    /// Validate and register a profile, replacing any with the same key.
    pub fn register(&mut self, profile: BookProfile) -> Result<()> {
        profile.validate()?;
        if self.profiles.contains_key(&profile.key) {
            tracing::debug!(key = %profile.key, "Replacing profile");
        }
        self.profiles.insert(profile.key.clone(), profile);
        Ok(())
    }

    /// Register every profile in a YAML document.
    ///
    /// The document has a top-level `profiles` list. Returns the number of
    /// profiles registered.
    pub fn load_yaml_str(&mut self, yaml: &str) -> Result<usize> {
        let file: ProfileFile = serde_yaml_ng::from_str(yaml)?;
        let count = file.profiles.len();
        for profile in file.profiles {
            self.register(profile)?;
        }
        Ok(count)
    }

    /// Register every profile in a YAML file.
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let yaml = fs::read_to_string(path).map_err(|e| SplitterError::io(path, e))?;
        let count = self.load_yaml_str(&yaml)?;
        tracing::info!(count, path = %path.display(), "Loaded book profiles");
        Ok(count)
    }

    /// Get a profile by key.
    pub fn get(&self, key: &str) -> Result<&BookProfile> {
        self.profiles
            .get(key)
            .ok_or_else(|| SplitterError::UnknownProfile(key.to_string()))
    }

    /// Profiles in key order.
    pub fn iter(&self) -> impl Iterator<Item = &BookProfile> {
        self.profiles.values()
    }

    /// Number of registered profiles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
profiles:
  - key: tale
    book:
      title: A Short Tale
      author: Anonymous
    heading:
      pattern: '^PART (\d+)$'
    output:
      template: 'Tale_Part_{label}.txt'
      layout: compact
    discovery:
      pattern: '^Tale_Part_(\d+)\.txt$'
    chapter_title: 'Part {label}'
"#;

    #[test]
    fn test_registry_register_and_get() {
        let mut registry = ProfileRegistry::new();
        assert_eq!(registry.load_yaml_str(YAML).unwrap(), 1);

        let profile = registry.get("tale").unwrap();
        assert_eq!(profile.book.author, "Anonymous");
        assert_eq!(profile.chapter_title.format("3", 3), "Part 3");
    }

    #[test]
    fn test_unknown_profile() {
        let registry = ProfileRegistry::new();
        let err = registry.get("missing").unwrap_err();
        assert!(matches!(err, SplitterError::UnknownProfile(ref k) if k == "missing"));
    }

    #[test]
    fn test_yaml_overrides_builtin() {
        let mut registry = ProfileRegistry::with_builtins().unwrap();
        let before = registry.len();

        let yaml = YAML.replace("key: tale", "key: gatsby");
        registry.load_yaml_str(&yaml).unwrap();

        assert_eq!(registry.len(), before);
        assert_eq!(registry.get("gatsby").unwrap().book.title, "A Short Tale");
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let yaml = YAML.replace(r"'^Tale_Part_(\d+)\.txt$'", r"'^Tale_Part_\d+\.txt$'");
        let mut registry = ProfileRegistry::new();

        let err = registry.load_yaml_str(&yaml).unwrap_err();

        assert!(matches!(err, SplitterError::InvalidPattern { .. }));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_malformed_yaml() {
        let mut registry = ProfileRegistry::new();
        let err = registry.load_yaml_str("profiles: [").unwrap_err();
        assert!(matches!(err, SplitterError::ProfileParse(_)));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profiles.yaml");
        fs::write(&path, YAML).unwrap();

        let mut registry = ProfileRegistry::new();
        registry.load_file(&path).unwrap();

        assert!(registry.get("tale").is_ok());
    }
}
