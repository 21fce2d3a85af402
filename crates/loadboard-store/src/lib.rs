//! Persistent store for load postings
//!
//! Postings live in the `mock_loads` table of a SQLite database file. The
//! store assigns identifiers and creation timestamps and computes
//! `rate_per_mile`.

mod schema;
mod sqlite_store;

pub use sqlite_store::SqlitePostingStore;
