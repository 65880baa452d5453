//! Processed-marker header handling
//!
//! IMAP cannot change the headers of a stored message, so an imported
//! email is re-appended with the marker header added and the original is
//! deleted. The marker is what makes later runs skip it.

use crate::settings::Marker;
use mailparse::{MailHeader, MailHeaderMap};

/// Whether the headers carry the marker with its sentinel value
#[must_use]
pub fn is_marked(headers: &[MailHeader], marker: &Marker) -> bool {
    headers
        .get_all_values(&marker.header)
        .iter()
        .any(|value| value.trim() == marker.value)
}

/// Copy of `raw` with any existing marker headers replaced by a fresh one.
///
/// The new header goes last in the header section. The body is copied
/// unchanged and the message's line endings are kept.
#[must_use]
pub fn mark_processed(raw: &[u8], marker: &Marker) -> Vec<u8> {
    let eol: &[u8] = if raw.windows(2).any(|w| w == b"\r\n") {
        b"\r\n"
    } else {
        b"\n"
    };

    let mut out = Vec::with_capacity(raw.len() + marker.header.len() + marker.value.len() + 4);
    let mut skipping = false;
    let mut offset = 0;

    for line in raw.split_inclusive(|&b| b == b'\n') {
        if is_blank(line) {
            break;
        }
        let continuation = matches!(line.first().copied(), Some(b' ' | b'\t'));
        if !continuation {
            skipping = header_name(line)
                .is_some_and(|name| name.eq_ignore_ascii_case(&marker.header));
        }
        if !skipping {
            out.extend_from_slice(line);
        }
        offset += line.len();
    }

    // Header section without a final newline
    if !out.is_empty() && !out.ends_with(b"\n") {
        out.extend_from_slice(eol);
    }

    out.extend_from_slice(marker.header.as_bytes());
    out.extend_from_slice(b": ");
    out.extend_from_slice(marker.value.as_bytes());
    out.extend_from_slice(eol);

    if offset < raw.len() {
        out.extend_from_slice(&raw[offset..]);
    } else {
        out.extend_from_slice(eol);
    }

    out
}

fn is_blank(line: &[u8]) -> bool {
    line == b"\n" || line == b"\r\n"
}

fn header_name(line: &[u8]) -> Option<&str> {
    let colon = line.iter().position(|&b| b == b':')?;
    std::str::from_utf8(&line[..colon]).ok().map(str::trim)
}
