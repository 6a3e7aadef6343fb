//! ICS calendar generation.
//!
//! Output follows RFC 5545 text escaping with CRLF line endings.

mod escape;
mod generate;

pub use escape::{escape_text, unescape_text};
pub use generate::{build_calendar, build_calendar_at, event_uid, FALLBACK_SUMMARY, PRODID};
