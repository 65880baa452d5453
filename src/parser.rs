//! Import block parser and metadata validation
//!
//! An importable body looks like:
//!
//! ```text
//! -----BEGIN IMPORT BLOCK-----
//! type: comment
//! slug: hello-world
//!
//! -----BEGIN CONTENT BLOCK-----
//! author: someone
//!
//! Nice post!
//! -----END CONTENT/IMPORT BLOCK-----
//! ```
//!
//! Delimiters are matched case-insensitively after trimming. Lines before
//! the first delimiter and after the last are ignored.

use crate::error::Rejection;
use crate::path::{is_relative_subpath, render_template};
use crate::settings::Settings;
use crate::types::{ImportBlock, Metadata, Route};
use std::path::PathBuf;
use tracing::{debug, warn};

pub const BEGIN_IMPORT: &str = "-----BEGIN IMPORT BLOCK-----";
pub const BEGIN_CONTENT: &str = "-----BEGIN CONTENT BLOCK-----";
pub const END_BLOCK: &str = "-----END CONTENT/IMPORT BLOCK-----";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Scanning,
    Metadata,
    Content,
    Done,
}

fn is_delimiter(line: &str, delimiter: &str) -> bool {
    line.trim().eq_ignore_ascii_case(delimiter)
}

/// Scan a text body for an import block followed by a content block
pub fn parse_block(body: &str) -> Result<ImportBlock, Rejection> {
    let mut state = State::Scanning;
    let mut metadata = Metadata::new();
    let mut content = String::new();

    for line in body.lines() {
        match state {
            State::Scanning => {
                if is_delimiter(line, BEGIN_IMPORT) {
                    state = State::Metadata;
                }
            }
            State::Metadata => {
                if is_delimiter(line, BEGIN_CONTENT) {
                    state = State::Content;
                } else if let Some((key, value)) = line.split_once(':') {
                    metadata.insert(key, value);
                } else if !line.trim().is_empty() {
                    warn!(line, "Ignoring metadata line without ':'");
                }
            }
            State::Content => {
                if is_delimiter(line, END_BLOCK) {
                    state = State::Done;
                    break;
                }
                content.push_str(line);
                content.push_str("\r\n");
            }
            State::Done => break,
        }
    }

    if state != State::Done {
        return Err(Rejection::NoBlock);
    }

    debug!(fields = metadata.len(), bytes = content.len(), "Parsed import block");

    Ok(ImportBlock { metadata, content })
}

/// Check the block's metadata against the type registry and render its path
pub fn validate(block: ImportBlock, settings: &Settings) -> Result<Route, Rejection> {
    let ImportBlock {
        mut metadata,
        content,
    } = block;

    let kind = metadata
        .get("type")
        .ok_or(Rejection::MissingType)?
        .to_lowercase();
    metadata.insert("type", &kind);

    let rule = settings
        .type_rule(&kind)
        .ok_or_else(|| Rejection::UnknownType(kind.clone()))?;

    let relative_dir = render_template(&rule.path, &metadata).map_err(|field| {
        Rejection::MissingField {
            kind: kind.clone(),
            field,
        }
    })?;

    let relative_dir = PathBuf::from(relative_dir);
    if !is_relative_subpath(&relative_dir) {
        return Err(Rejection::InvalidPath {
            kind,
            path: relative_dir,
        });
    }

    Ok(Route {
        kind,
        relative_dir,
        metadata,
        content,
    })
}
