//! # Infrastructure Layer
//!
//! Handles interactions with external systems: the Matrix gateway and the
//! Wikipedia HTTP endpoint. Implements the traits defined in the Domain layer.

pub mod matrix;
pub mod wiki;
