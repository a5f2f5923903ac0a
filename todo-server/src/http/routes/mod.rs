//! Route handlers organized by resource

pub mod docs;
pub mod health;
pub mod items;
pub mod lists;
