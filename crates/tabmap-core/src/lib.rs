//! Import session orchestration.
//!
//! [`ImportSession`] drives one import through four steps: upload, header
//! row selection, column mapping and completion. It owns the decoded file and
//! the live mappings, translates user-facing messages, and reports progress
//! to the host through [`ImportListener`]s.
//!
//! # Example
//!
//! ```ignore
//! use tabmap_core::{ImportSession, SessionOptions};
//!
//! let mut session = ImportSession::new(template_json, SessionOptions::default())?;
//! session.upload("people.csv", &bytes)?;
//! session.confirm_header_row()?;
//! let result = session.submit()?;
//! ```

mod error;
mod event;
pub mod i18n;
mod options;
mod session;
mod step;

pub use error::{Result, SessionError};
pub use event::{ImportEvent, ImportListener};
pub use i18n::Translations;
pub use options::{ImporterConfig, SessionOptions};
pub use session::ImportSession;
pub use step::ImportStep;
