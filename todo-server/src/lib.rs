//! todo-server: HTTP API for named to-do lists and their items
//!
//! Lists and items live in SQLite; deleting a list removes its items.
//! The OpenAPI description is served at `/openapi.yaml` with an explorer at `/`.

pub mod db;
pub mod http;

pub use db::{connect_with_retry, create_memory_pool, create_pool, ensure_schema, DbError};
pub use http::{build_router, run_server, ApiError, AppState, ServerConfig, ServerError};
