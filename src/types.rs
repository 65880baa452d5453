//! Core types for imported emails

use crate::error::Rejection;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, btree_map};
use std::fmt;
use std::path::PathBuf;

/// Key/value pairs from an email's import block.
///
/// Keys are lower-cased and values trimmed on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata(BTreeMap<String, String>);

impl Metadata {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry. A repeated key replaces the earlier value.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.0
            .insert(key.trim().to_lowercase(), value.trim().to_string());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a Metadata {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: AsRef<str>, V: AsRef<str>> FromIterator<(K, V)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut metadata = Self::new();
        for (k, v) in iter {
            metadata.insert(k.as_ref(), v.as_ref());
        }
        metadata
    }
}

/// The parsed import and content blocks of one email body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBlock {
    /// Routing metadata from the import block
    pub metadata: Metadata,

    /// Content block lines, each terminated with CRLF
    pub content: String,
}

/// A validated import block with its destination resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Lower-cased content type
    pub kind: String,

    /// Rendered path template, relative to the content root
    pub relative_dir: PathBuf,

    pub metadata: Metadata,
    pub content: String,
}

/// A file written for an imported email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Imported {
    /// Content type the email was filed under
    pub kind: String,

    /// Full path of the written file
    pub path: PathBuf,
}

/// What happened to one email
#[derive(Debug)]
pub enum Outcome {
    /// A new content file was written
    Imported(Imported),

    /// The email already carries the processed marker
    AlreadyProcessed,

    /// The email was skipped
    Rejected(Rejection),
}

impl Outcome {
    #[must_use]
    pub const fn is_imported(&self) -> bool {
        matches!(self, Self::Imported(_))
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Imported(imported) => {
                write!(f, "imported {} as {}", imported.kind, imported.path.display())
            }
            Self::AlreadyProcessed => write!(f, "already processed"),
            Self::Rejected(reason) => write!(f, "rejected: {reason}"),
        }
    }
}

/// Summary of draining one mailbox folder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderReport {
    pub folder: String,

    /// When processing of the folder began
    pub started_at: DateTime<Utc>,

    /// Files written, in processing order
    pub imported: Vec<Imported>,

    /// Emails already carrying the marker
    pub already_processed: usize,

    /// Emails without an import block
    pub ignored: usize,

    /// Emails with an import block that could not be imported
    pub rejected: usize,
}

impl FolderReport {
    #[must_use]
    pub fn new(folder: impl Into<String>) -> Self {
        Self {
            folder: folder.into(),
            started_at: Utc::now(),
            imported: Vec::new(),
            already_processed: 0,
            ignored: 0,
            rejected: 0,
        }
    }

    /// Tally one outcome
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Imported(imported) => self.imported.push(imported),
            Outcome::AlreadyProcessed => self.already_processed += 1,
            Outcome::Rejected(reason) if reason.is_routine() => self.ignored += 1,
            Outcome::Rejected(_) => self.rejected += 1,
        }
    }

    /// Total number of emails seen
    #[must_use]
    pub fn total(&self) -> usize {
        self.imported.len() + self.already_processed + self.ignored + self.rejected
    }
}
