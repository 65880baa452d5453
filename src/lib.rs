// Enforce at crate level
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]
#![allow(clippy::significant_drop_tightening)]

//! Email Content Importer
//!
//! Turns specially formatted emails into content files for a static site
//! generator.
//!
//! An email body carries an import block with routing metadata and a
//! content block with the file's text. The metadata's `type` selects a
//! configured path template and filename rule, and the content is written
//! to a new file under the content root. Imported emails are re-stored
//! with a marker header so later runs skip them.
//!
//! # Example
//!
//! ```rust
//! use email_import::{Outcome, Settings, process_email};
//!
//! let settings = Settings::default().with_content_root(std::env::temp_dir());
//! let raw = b"From: sender@example.com\r\nSubject: Hello\r\n\r\nJust a regular email";
//!
//! match process_email(raw, &settings) {
//!     Outcome::Imported(imported) => println!("Wrote {}", imported.path.display()),
//!     Outcome::AlreadyProcessed => println!("Seen before"),
//!     Outcome::Rejected(reason) => println!("Skipped: {reason}"),
//! }
//! ```

mod body;
mod error;
mod filename;
mod mailbox;
mod marker;
mod parser;
mod path;
mod pipeline;
mod settings;
mod sort;
mod types;

pub use body::extract_text;
pub use error::{ImportError, Rejection, Result};
pub use filename::{FilenameFn, FilenameRule, next_filename, next_in_listing};
pub use mailbox::{Mailbox, import_all, import_folder};
pub use marker::{is_marked, mark_processed};
pub use parser::{BEGIN_CONTENT, BEGIN_IMPORT, END_BLOCK, parse_block, validate};
pub use path::{materialize, render_template};
pub use pipeline::process_email;
pub use settings::{DEFAULT_MARKER_HEADER, DEFAULT_MARKER_VALUE, Marker, Settings, TypeRule};
pub use sort::{Chunk, natural_cmp, natural_key, natural_sort};
pub use types::*;
