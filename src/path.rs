//! Destination paths and content file creation

use crate::error::Rejection;
use crate::settings::Settings;
use crate::types::{Imported, Metadata, Route};
use regex::Regex;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Component, Path};
use std::sync::LazyLock;
use tracing::info;

static PLACEHOLDER_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{|\}\}|\{([^{}]*)\}").unwrap());

/// Substitute `{field}` placeholders with metadata values.
///
/// `{{` and `}}` produce literal braces. On failure the name of the first
/// missing field is returned.
pub fn render_template(template: &str, metadata: &Metadata) -> Result<String, String> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in PLACEHOLDER_REGEX.captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        rendered.push_str(&template[last..whole.start()]);
        match (whole.as_str(), caps.get(1)) {
            ("{{", _) => rendered.push('{'),
            ("}}", _) => rendered.push('}'),
            (_, Some(name)) => {
                let field = name.as_str();
                let value = metadata.get(field).ok_or_else(|| field.to_string())?;
                rendered.push_str(value);
            }
            _ => {}
        }
        last = whole.end();
    }
    rendered.push_str(&template[last..]);

    Ok(rendered)
}

/// Write a routed email's content to a new file under the content root.
///
/// Creates the destination directory, picks a filename with the type's
/// rule and refuses to touch an existing file.
pub fn materialize(route: &Route, settings: &Settings) -> Result<Imported, Rejection> {
    if !is_relative_subpath(&route.relative_dir) {
        return Err(Rejection::InvalidPath {
            kind: route.kind.clone(),
            path: route.relative_dir.clone(),
        });
    }

    let dir = settings.content_root.join(&route.relative_dir);
    std::fs::create_dir_all(&dir).map_err(|source| Rejection::CreateDirectory {
        path: dir.clone(),
        source,
    })?;

    let filename = settings
        .type_rule(&route.kind)
        .map(|rule| rule.filename)
        .unwrap_or_default()
        .resolve(&dir, &route.metadata, &route.content, settings)
        .ok_or_else(|| Rejection::NoFilename(route.kind.clone()))?;

    if !is_plain_filename(&filename) {
        return Err(Rejection::InvalidFilename(filename));
    }

    let path = dir.join(&filename);
    write_new(&path, &route.content)?;

    info!(kind = %route.kind, path = %path.display(), "Created new file");

    Ok(Imported {
        kind: route.kind.clone(),
        path,
    })
}

/// Only normal components, so joining it cannot leave the base directory
pub(crate) fn is_relative_subpath(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// A single normal path component: no separators, no `.` or `..`
fn is_plain_filename(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) && !name.contains(['/', '\\'])
}

fn write_new(path: &Path, content: &str) -> Result<(), Rejection> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == ErrorKind::AlreadyExists {
                Rejection::FileExists(path.to_path_buf())
            } else {
                Rejection::Write {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

    writeln!(file, "{content}").map_err(|source| Rejection::Write {
        path: path.to_path_buf(),
        source,
    })
}
