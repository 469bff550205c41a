//! board-comment/crates/domains/src/lib.rs
//!
//! Entities, persistence ports, and error types shared by every other crate.
//! Nothing in here performs I/O.

pub mod errors;
pub mod models;
pub mod ports;

pub use errors::*;
pub use models::*;
pub use ports::*;
