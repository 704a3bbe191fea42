//! The list of selectable models.
//!
//! Models live in a newline-delimited text file, one identifier per line.
//! Each non-blank line becomes an entry keyed by its 1-based position among
//! the non-blank lines. When the file does not exist a default list is
//! written and returned.

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Error, Result};

/// File name used when no other path is configured.
pub const DEFAULT_MODELS_FILE: &str = "models.txt";

/// Identifiers written on first run.
pub const DEFAULT_MODELS: [&str; 3] = [
    "nvidia/llama-3.3-nemotron-super-49b-v1:free",
    "meta-llama/llama-4-maverick:free",
    "google/gemma-3-12b-it:free",
];

/// One selectable model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelEntry {
    /// Short selection key, "1", "2", ...
    pub key: String,
    /// Opaque model identifier sent to the endpoint.
    pub identifier: String,
}

/// Ordered mapping of selection keys to model identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelRegistry {
    entries: Vec<ModelEntry>,
}

impl ModelRegistry {
    /// Builds a registry from identifiers, numbering them from 1.
    pub fn from_identifiers<I, S>(identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = identifiers
            .into_iter()
            .enumerate()
            .map(|(idx, identifier)| ModelEntry {
                key: (idx + 1).to_string(),
                identifier: identifier.into(),
            })
            .collect();
        Self { entries }
    }

    /// Parses the file format: trimmed, non-blank lines in order.
    pub fn parse(text: &str) -> Self {
        Self::from_identifiers(text.lines().map(str::trim).filter(|line| !line.is_empty()))
    }

    /// The built-in default list.
    pub fn defaults() -> Self {
        Self::from_identifiers(DEFAULT_MODELS)
    }

    /// Loads the registry from `path`, creating the file with defaults if absent.
    ///
    /// A failure to write the default file is logged and otherwise ignored;
    /// the defaults are still returned. Any other read failure is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Ok(Self::parse(&text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                let defaults = Self::defaults();
                if let Err(err) = fs::write(path, defaults.to_file_contents()) {
                    tracing::warn!(
                        path = %path.display(),
                        error = %err,
                        "could not persist default model list"
                    );
                }
                Ok(defaults)
            }
            Err(err) => Err(Error::io(
                format!("failed to read model list {}", path.display()),
                err,
            )),
        }
    }

    /// Renders the registry in file format, one identifier per line.
    pub fn to_file_contents(&self) -> String {
        self.entries
            .iter()
            .map(|entry| format!("{}\n", entry.identifier))
            .collect()
    }

    /// Looks up an identifier by selection key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.identifier.as_str())
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[ModelEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_numbers_non_blank_lines() {
        let registry = ModelRegistry::parse("a/one\n\n  b/two  \n\t\nc/three\n");
        let keys: Vec<&str> = registry.entries().iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["1", "2", "3"]);
        assert_eq!(registry.get("1"), Some("a/one"));
        assert_eq!(registry.get("2"), Some("b/two"));
        assert_eq!(registry.get("3"), Some("c/three"));
        assert_eq!(registry.get("4"), None);
    }

    #[test]
    fn duplicates_are_kept() {
        let registry = ModelRegistry::parse("same\nsame\n");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("2"), Some("same"));
    }

    #[test]
    fn load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.txt");
        fs::write(&path, "x/1\ny/2\n\nz/3\nw/4\n").unwrap();

        let registry = ModelRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("4"), Some("w/4"));
    }

    #[test]
    fn load_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.txt");

        let registry = ModelRegistry::load(&path).unwrap();
        assert_eq!(registry, ModelRegistry::defaults());
        assert_eq!(registry.len(), 3);

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written.lines().collect::<Vec<_>>(), DEFAULT_MODELS.to_vec());

        // Second load reads the file it just wrote.
        assert_eq!(ModelRegistry::load(&path).unwrap(), registry);
    }

    #[test]
    fn unwritable_location_still_returns_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("models.txt");

        let registry = ModelRegistry::load(&path).unwrap();
        assert_eq!(registry.len(), 3);
        assert!(!path.exists());
    }

    #[test]
    fn empty_file_gives_empty_registry() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("models.txt");
        fs::write(&path, "\n\n").unwrap();

        let registry = ModelRegistry::load(&path).unwrap();
        assert!(registry.is_empty());
    }
}
