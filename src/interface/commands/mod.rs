//! # Command Handlers
//!
//! Handler functions for each supported command. Invoked by the Router.

pub mod help;
pub mod usage;
pub mod wiki;
