//! # Application Layer
//!
//! Contains the core logic of the bot: message eligibility filtering,
//! the command registry, and command dispatch.

pub mod filter;
pub mod registry;
pub mod router;
