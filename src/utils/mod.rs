//! Identifier and formatting utilities.
//!
//! Pure functions, no side effects.
//!
//! - [`slug`]: URI-safe identifiers (`slug`, `looks_like_uri`, `csvw_column_name`)
//! - [`plural`]: count formatting for log and diagnostic output

pub mod plural;
pub mod slug;

pub use plural::{plural_count, plural_s};
pub use slug::{csvw_column_name, looks_like_uri, slug, uri_tail_identifier};
