//! Draining mailbox folders through a transport
//!
//! Connecting and authenticating are left to the [`Mailbox`]
//! implementation. A folder is fully processed and expunged before the
//! next one is selected.

use crate::marker::mark_processed;
use crate::pipeline::process_email;
use crate::settings::Settings;
use crate::types::FolderReport;
use tracing::info;

/// Operations the importer needs from an IMAP-like store
pub trait Mailbox {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Select `folder` and list the ids of all its messages
    fn select(&mut self, folder: &str) -> Result<Vec<u32>, Self::Error>;

    /// Raw RFC 5322 bytes of a message in the selected folder
    fn fetch(&mut self, id: u32) -> Result<Vec<u8>, Self::Error>;

    /// Flag a message in the selected folder as deleted
    fn mark_deleted(&mut self, id: u32) -> Result<(), Self::Error>;

    /// Store a new message in `folder`, flagged as seen
    fn append(&mut self, folder: &str, raw: &[u8]) -> Result<(), Self::Error>;

    /// Remove messages flagged as deleted from the selected folder
    fn expunge(&mut self) -> Result<(), Self::Error>;
}

/// Import every message of one folder.
///
/// Imported messages are replaced by a copy carrying the marker header.
/// Only transport errors are returned; rejected emails are counted in
/// the report.
pub fn import_folder<M: Mailbox>(
    mailbox: &mut M,
    folder: &str,
    settings: &Settings,
) -> Result<FolderReport, M::Error> {
    let mut report = FolderReport::new(folder);

    for id in mailbox.select(folder)? {
        let raw = mailbox.fetch(id)?;
        let outcome = process_email(&raw, settings);

        if outcome.is_imported() {
            let marked = mark_processed(&raw, &settings.marker);
            mailbox.mark_deleted(id)?;
            mailbox.append(folder, &marked)?;
        }

        report.record(outcome);
    }

    mailbox.expunge()?;

    info!(
        folder,
        imported = report.imported.len(),
        skipped = report.already_processed,
        ignored = report.ignored,
        rejected = report.rejected,
        "Finished folder"
    );

    Ok(report)
}

/// Import every folder listed in the settings, in order
pub fn import_all<M: Mailbox>(
    mailbox: &mut M,
    settings: &Settings,
) -> Result<Vec<FolderReport>, M::Error> {
    settings
        .folders
        .iter()
        .map(|folder| import_folder(mailbox, folder, settings))
        .collect()
}
