//! Text body extraction

use crate::error::Rejection;
use encoding_rs::Encoding;
use mailparse::ParsedMail;

/// Decoded, trimmed text of an email.
///
/// A multipart email yields its first direct text subpart, a text email
/// its own body. Anything else has no usable body and yields `None`.
pub fn extract_text(mail: &ParsedMail) -> Result<Option<String>, Rejection> {
    match main_type(mail).as_str() {
        "multipart" => mail
            .subparts
            .iter()
            .find(|part| main_type(part) == "text")
            .map(decode)
            .transpose(),
        "text" => decode(mail).map(Some),
        _ => Ok(None),
    }
}

fn main_type(mail: &ParsedMail) -> String {
    let mimetype = mail.ctype.mimetype.to_lowercase();
    mimetype
        .split_once('/')
        .map_or(mimetype.as_str(), |(main, _)| main)
        .trim()
        .to_string()
}

/// Undo the transfer encoding, then convert from the declared charset.
///
/// Unknown charsets and bytes invalid in the charset are errors; nothing
/// is replaced with U+FFFD.
fn decode(part: &ParsedMail) -> Result<String, Rejection> {
    let raw = part
        .get_body_raw()
        .map_err(|e| Rejection::Decode(e.to_string()))?;

    let charset = part.ctype.charset.trim();
    let encoding = Encoding::for_label(charset.as_bytes())
        .ok_or_else(|| Rejection::Decode(format!("unknown charset '{charset}'")))?;

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&raw)
        .ok_or_else(|| Rejection::Decode(format!("invalid {} text", encoding.name())))?;

    Ok(text.trim().to_string())
}
