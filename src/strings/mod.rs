//! # Strings
//!
//! User-facing message text, kept out of the handlers.

pub mod messages;
