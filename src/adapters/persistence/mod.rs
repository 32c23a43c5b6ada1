//! Content storage: SQLite (libsql) store, in-memory store, JSON fixtures.

pub mod fixtures;
pub mod memory_repo;
pub mod sqlite_repo;

pub use fixtures::{FixtureStats, Fixtures};
pub use memory_repo::InMemoryRepo;
pub use sqlite_repo::SqliteRepo;
