//! To-do lists

use serde::{Deserialize, Serialize};

use crate::item::TodoItem;
use crate::validation::{normalize_description, Name, ValidationError};

/// A named collection of items.
///
/// `items` is only populated when a single list is fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoList {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<TodoItem>>,
}

/// List body as sent by clients on create and update
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ListPayload {
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: Some(name.into()),
            description,
        }
    }
}

/// Validated mutable fields of a list
#[derive(Debug, Clone, PartialEq)]
pub struct ListFields {
    pub name: Name,
    pub description: Option<String>,
}

impl TryFrom<ListPayload> for ListFields {
    type Error = ValidationError;

    fn try_from(payload: ListPayload) -> Result<Self, Self::Error> {
        Ok(Self {
            name: Name::parse(payload.name.as_deref())?,
            description: normalize_description(payload.description),
        })
    }
}
