//! # Domain Models
//!
//! Configuration models, shared constants and the slice registry.
//! Keep it lean: `serde` is the only dependency; no I/O or networking here.

pub mod config;
pub mod constants;
pub mod registry;
