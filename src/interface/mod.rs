//! # Interface Layer
//!
//! Handlers for the user-visible command surface, invoked by the Router.

pub mod commands;
