//! Importer configuration: content root, type registry and marker header
//!
//! Settings are built in code or loaded from a JSON file. Any top-level
//! field missing from the file keeps its default; a `types` table, when
//! given, replaces the built-in registry as a whole.

use crate::error::{ImportError, Result};
use crate::filename::FilenameRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// Header used to mark emails that have already been imported
pub const DEFAULT_MARKER_HEADER: &str = "X-Email-Import-Marker";

/// Sentinel value of the marker header
pub const DEFAULT_MARKER_VALUE: &str = "processed";

/// Top-level importer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory all content paths are resolved under
    pub content_root: PathBuf,

    /// Extension used by numbered filenames, without the dot
    pub file_format: String,

    /// Mailbox folders drained by a run, in order
    pub folders: Vec<String>,

    pub marker: Marker,

    /// Content types by lower-cased name
    pub types: BTreeMap<String, TypeRule>,
}

/// Header name and sentinel value for the processed marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Marker {
    pub header: String,
    pub value: String,
}

/// Destination rule for one content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRule {
    /// Directory template relative to the content root, with `{field}` placeholders
    pub path: String,

    #[serde(default)]
    pub filename: FilenameRule,
}

impl TypeRule {
    #[must_use]
    pub fn new(path: impl Into<String>, filename: FilenameRule) -> Self {
        Self {
            path: path.into(),
            filename,
        }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self {
            header: DEFAULT_MARKER_HEADER.to_string(),
            value: DEFAULT_MARKER_VALUE.to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        let mut types = BTreeMap::new();
        types.insert(
            "comment".to_string(),
            TypeRule::new("comments/{slug}", FilenameRule::Number),
        );
        types.insert(
            "article".to_string(),
            TypeRule::new("articles/{category}", FilenameRule::Metadata),
        );
        types.insert(
            "page".to_string(),
            TypeRule::new("pages/{category}", FilenameRule::Metadata),
        );

        Self {
            content_root: PathBuf::from("content"),
            file_format: "md".to_string(),
            folders: Vec::new(),
            marker: Marker::default(),
            types,
        }
    }
}

impl Settings {
    /// Parse settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        Ok(settings.normalized())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ImportError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json(&contents)?;
        info!(path = %path.display(), types = settings.types.len(), "Loaded settings");
        Ok(settings)
    }

    /// Register or replace a content type
    #[must_use]
    pub fn with_type(mut self, name: &str, rule: TypeRule) -> Self {
        self.types.insert(name.to_lowercase(), rule);
        self
    }

    #[must_use]
    pub fn with_content_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.content_root = root.into();
        self
    }

    #[must_use]
    pub fn type_rule(&self, name: &str) -> Option<&TypeRule> {
        self.types.get(name)
    }

    /// Incoming type names are lower-cased, so registry keys must be too.
    fn normalized(mut self) -> Self {
        self.types = std::mem::take(&mut self.types)
            .into_iter()
            .map(|(name, rule)| (name.to_lowercase(), rule))
            .collect();
        self
    }
}
