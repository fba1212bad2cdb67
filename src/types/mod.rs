//! Shared type definitions
//!
//! Record and manifest types used across the crate.

pub mod manifest;
pub mod model;
