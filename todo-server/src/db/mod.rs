//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - Connection pool, no Arc<Mutex<Connection>>
//! - Rely on DB constraints (FK + cascade), no check-then-insert
//! - Single-statement operations, transient failures retried in `retry`

pub mod error;
pub mod pool;
pub mod repos;
pub mod retry;
pub mod schema;

pub use error::DbError;
pub use pool::{connect_with_retry, create_memory_pool, create_pool};
pub use repos::{ItemRepo, ListRepo};
pub use schema::ensure_schema;
