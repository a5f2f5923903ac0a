pub mod config;
pub mod error;
pub mod item;
pub mod list;
pub mod validation;
pub mod view;

pub use config::TodoConfig;
pub use error::{CoreError, Result};
pub use item::{reconcile_completed_date, ItemFields, ItemPayload, TodoItem, TodoItemState};
pub use list::{ListFields, ListPayload, TodoList};
pub use validation::{Name, ValidationError};
pub use view::{Action, AppState, GroupStates};

/// Generate a new record identifier (UUID v4, hyphenated).
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
