//! Single-email import pipeline

use crate::body::extract_text;
use crate::error::Rejection;
use crate::marker::is_marked;
use crate::parser::{parse_block, validate};
use crate::path::materialize;
use crate::settings::Settings;
use crate::types::{Imported, Outcome};
use mailparse::{MailHeaderMap, ParsedMail};
use tracing::{debug, info, info_span, warn};

/// Import one raw email according to `settings`.
///
/// Never fails: every problem with the email itself becomes
/// [`Outcome::Rejected`] and is logged with the sender and subject.
#[must_use]
pub fn process_email(raw: &[u8], settings: &Settings) -> Outcome {
    let mail = match mailparse::parse_mail(raw) {
        Ok(mail) => mail,
        Err(e) => {
            warn!(error = %e, "Couldn't parse email");
            return Outcome::Rejected(Rejection::Malformed(e.to_string()));
        }
    };

    let from = header_or_unknown(&mail, "From");
    let subject = header_or_unknown(&mail, "Subject");
    let _span = info_span!("email", %from, %subject).entered();

    if is_marked(&mail.headers, &settings.marker) {
        debug!("Skipping already processed email");
        return Outcome::AlreadyProcessed;
    }

    info!("Processing email");
    match import(&mail, settings) {
        Ok(imported) => Outcome::Imported(imported),
        Err(reason) => {
            if reason.is_routine() {
                info!("{reason}");
            } else {
                warn!("{reason}");
            }
            Outcome::Rejected(reason)
        }
    }
}

fn import(mail: &ParsedMail, settings: &Settings) -> Result<Imported, Rejection> {
    let body = extract_text(mail)?.ok_or(Rejection::NoBody)?;
    let block = parse_block(&body)?;
    let route = validate(block, settings)?;
    materialize(&route, settings)
}

fn header_or_unknown(mail: &ParsedMail, name: &str) -> String {
    mail.headers
        .get_first_value(name)
        .unwrap_or_else(|| "(unknown)".to_string())
}
