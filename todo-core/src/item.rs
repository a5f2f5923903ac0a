//! To-do items and their lifecycle state

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::validation::{normalize_description, Name, ValidationError};

/// Lifecycle stage of an item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoItemState {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TodoItemState {
    /// All states in display order.
    pub const ALL: [TodoItemState; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inprogress",
            Self::Done => "done",
        }
    }

    /// Human-readable group heading.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TodoItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TodoItemState {
    type Err = ValidationError;

    /// Case-insensitive, so `inProgress` is accepted alongside `inprogress`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            _ => Err(ValidationError::InvalidVariant {
                field: "state",
                value: s.to_owned(),
            }),
        }
    }
}

/// A single to-do entry belonging to exactly one list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub id: String,
    pub list_id: String,
    pub name: String,
    pub description: Option<String>,
    pub state: TodoItemState,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

impl TodoItem {
    /// Request body that replaces this item with its current field values.
    pub fn to_payload(&self) -> ItemPayload {
        ItemPayload {
            name: Some(self.name.clone()),
            description: self.description.clone(),
            state: Some(self.state.as_str().to_owned()),
            due_date: self.due_date,
            completed_date: self.completed_date,
        }
    }
}

/// Item body as sent by clients on create and update.
///
/// Every field is optional at the wire level so that a missing name
/// surfaces as a validation error rather than a deserialization failure.
/// Server-managed fields (`id`, `listId`, timestamps) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,
}

impl ItemPayload {
    /// Payload for a fresh item with only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// Validated mutable fields of an item, ready to persist
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFields {
    pub name: Name,
    pub description: Option<String>,
    pub state: TodoItemState,
    pub due_date: Option<DateTime<Utc>>,
    pub completed_date: Option<DateTime<Utc>>,
}

impl ItemFields {
    /// Validate a payload. A missing state means Todo; the completion date
    /// is reconciled with the state (see [`reconcile_completed_date`]).
    pub fn from_payload(payload: ItemPayload, now: DateTime<Utc>) -> Result<Self, ValidationError> {
        let name = Name::parse(payload.name.as_deref())?;
        let state = payload
            .state
            .as_deref()
            .map(str::parse::<TodoItemState>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            name,
            description: normalize_description(payload.description),
            state,
            due_date: payload.due_date,
            completed_date: reconcile_completed_date(state, payload.completed_date, now),
        })
    }
}

/// Keep `completedDate` consistent with `state`.
///
/// Non-Done items never carry a completion date. Done items keep the
/// supplied date verbatim, or get `now` when none was supplied.
pub fn reconcile_completed_date(
    state: TodoItemState,
    completed_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Option<DateTime<Utc>> {
    match state {
        TodoItemState::Done => Some(completed_date.unwrap_or(now)),
        TodoItemState::Todo | TodoItemState::InProgress => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn state_wire_format() {
        assert_eq!(serde_json::to_string(&TodoItemState::InProgress).unwrap(), "\"inprogress\"");
        let state: TodoItemState = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(state, TodoItemState::Done);
    }

    #[test]
    fn state_parse_is_case_insensitive() {
        assert_eq!("inProgress".parse::<TodoItemState>().unwrap(), TodoItemState::InProgress);
        assert_eq!("TODO".parse::<TodoItemState>().unwrap(), TodoItemState::Todo);
        let err = "blocked".parse::<TodoItemState>().unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "state", .. }));
    }

    #[test]
    fn missing_state_defaults_to_todo() {
        let fields = ItemFields::from_payload(ItemPayload::named("Milk"), ts(1)).unwrap();
        assert_eq!(fields.state, TodoItemState::Todo);
        assert_eq!(fields.completed_date, None);
    }

    #[test]
    fn done_keeps_supplied_completed_date() {
        let payload = ItemPayload {
            state: Some("done".into()),
            completed_date: Some(ts(1)),
            ..ItemPayload::named("Milk")
        };
        let fields = ItemFields::from_payload(payload, ts(9)).unwrap();
        assert_eq!(fields.completed_date, Some(ts(1)));
    }

    #[test]
    fn done_without_date_is_stamped() {
        let payload = ItemPayload {
            state: Some("done".into()),
            ..ItemPayload::named("Milk")
        };
        let fields = ItemFields::from_payload(payload, ts(9)).unwrap();
        assert_eq!(fields.completed_date, Some(ts(9)));
    }

    #[test]
    fn reopening_clears_completed_date() {
        let payload = ItemPayload {
            state: Some("inprogress".into()),
            completed_date: Some(ts(1)),
            ..ItemPayload::named("Milk")
        };
        let fields = ItemFields::from_payload(payload, ts(9)).unwrap();
        assert_eq!(fields.completed_date, None);
    }

    #[test]
    fn payload_ignores_server_fields() {
        let payload: ItemPayload = serde_json::from_str(
            r#"{"id":"x","listId":"y","name":"Milk","dueDate":"2024-01-02T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(payload.name.as_deref(), Some("Milk"));
        assert_eq!(payload.due_date, Some(ts(2)));
    }

    #[test]
    fn item_serializes_camel_case() {
        let item = TodoItem {
            id: "i1".into(),
            list_id: "l1".into(),
            name: "Milk".into(),
            description: None,
            state: TodoItemState::Done,
            due_date: None,
            completed_date: Some(ts(1)),
            created_date: ts(1),
            updated_date: ts(1),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["listId"], "l1");
        assert_eq!(json["state"], "done");
        assert_eq!(json["completedDate"], "2024-01-01T00:00:00Z");
    }
}
