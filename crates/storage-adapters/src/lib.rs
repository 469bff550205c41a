//! # storage-adapters
//!
//! Implementations of the `domains` persistence ports.
//!
//! - [`memory`]: process-local tables, always compiled. Default backend and
//!   the one the test suites run against.
//! - `postgres`: sqlx-backed store, behind the `db-postgres` feature.

pub mod memory;
#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::{MemoryBoardRepository, MemoryCommentRepository, MemoryDatabase};
#[cfg(feature = "db-postgres")]
pub use postgres::{PgBoardRepository, PgCommentRepository};
