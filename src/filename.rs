//! Filename strategies, including sequential auto-numbering

use crate::settings::Settings;
use crate::sort::natural_sort;
use crate::types::Metadata;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::num::IntErrorKind;
use std::path::Path;
use tracing::debug;

/// User-supplied filename strategy.
///
/// Receives the resolved directory, the metadata, the content and the
/// settings. Returning `None` rejects the email.
pub type FilenameFn = fn(&Path, &Metadata, &str, &Settings) -> Option<String>;

/// How a content type names its files
#[derive(Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilenameRule {
    /// Use the `filename` entry of the import block
    #[default]
    Metadata,

    /// Next free number in the directory, e.g. `4.md`
    Number,

    /// Custom strategy, only available when building settings in code
    #[serde(skip)]
    Custom(FilenameFn),
}

impl FilenameRule {
    /// Pick a filename for content going into `dir`
    #[must_use]
    pub fn resolve(
        &self,
        dir: &Path,
        metadata: &Metadata,
        content: &str,
        settings: &Settings,
    ) -> Option<String> {
        match self {
            Self::Metadata => metadata.get("filename").map(str::to_string),
            Self::Number => match next_filename(dir, &settings.file_format) {
                Ok(Some(name)) => Some(name),
                Ok(None) => {
                    debug!(dir = %dir.display(), "Highest numbered file has no successor");
                    None
                }
                Err(e) => {
                    debug!(dir = %dir.display(), error = %e, "Could not list directory");
                    None
                }
            },
            Self::Custom(rule) => rule(dir, metadata, content, settings),
        }
    }
}

impl fmt::Debug for FilenameRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metadata => write!(f, "Metadata"),
            Self::Number => write!(f, "Number"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

impl PartialEq for FilenameRule {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Metadata, Self::Metadata) | (Self::Number, Self::Number) => true,
            (Self::Custom(a), Self::Custom(b)) => std::ptr::fn_addr_eq(*a, *b),
            _ => false,
        }
    }
}

impl Eq for FilenameRule {}

/// Next sequential filename for the entries of `dir`
pub fn next_filename(dir: &Path, extension: &str) -> io::Result<Option<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        names.push(entry?.file_name().to_string_lossy().into_owned());
    }
    Ok(next_in_listing(&names, extension))
}

/// Next sequential filename for a directory listing.
///
/// Entries whose stem is not an integer are ignored. The listing is
/// naturally sorted and scanned from the end, so the first numeric stem
/// found is the highest one. Returns `None` when that number has no
/// successor in `i128`.
#[must_use]
pub fn next_in_listing<S: AsRef<str>>(names: &[S], extension: &str) -> Option<String> {
    let mut sorted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    natural_sort(&mut sorted);

    let next = match sorted.iter().rev().find_map(|name| numeric_stem(name)) {
        None => 1,
        Some(Stem::Number(n)) => n.checked_add(1)?,
        Some(Stem::TooLarge) => return None,
    };

    Some(format!("{next}.{extension}"))
}

enum Stem {
    Number(i128),
    TooLarge,
}

fn numeric_stem(name: &str) -> Option<Stem> {
    let stem = Path::new(name).file_stem()?.to_str()?;
    match stem.trim().parse::<i128>() {
        Ok(n) => Some(Stem::Number(n)),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(Stem::TooLarge),
        Err(_) => None,
    }
}
