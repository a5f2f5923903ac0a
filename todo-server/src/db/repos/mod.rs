//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Borrows the pool, constructed per request
//! - Single statement per operation, wrapped in `with_retry`
//! - Mutations use RETURNING rather than a follow-up SELECT

pub mod items;
pub mod lists;

pub use items::ItemRepo;
pub use lists::ListRepo;
