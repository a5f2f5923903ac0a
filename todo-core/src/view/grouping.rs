//! Client-side ordering and grouping of a list's items

use serde::{Deserialize, Serialize};

use crate::item::{TodoItem, TodoItemState};

/// Which item-state sections are collapsed in the list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupStates {
    pub todo: bool,
    pub inprogress: bool,
    pub done: bool,
}

impl GroupStates {
    /// Every group collapsed, or every group expanded.
    pub fn all(collapsed: bool) -> Self {
        Self {
            todo: collapsed,
            inprogress: collapsed,
            done: collapsed,
        }
    }

    pub fn is_collapsed(&self, state: TodoItemState) -> bool {
        match state {
            TodoItemState::Todo => self.todo,
            TodoItemState::InProgress => self.inprogress,
            TodoItemState::Done => self.done,
        }
    }

    pub fn set(&mut self, state: TodoItemState, collapsed: bool) {
        match state {
            TodoItemState::Todo => self.todo = collapsed,
            TodoItemState::InProgress => self.inprogress = collapsed,
            TodoItemState::Done => self.done = collapsed,
        }
    }

    pub fn toggle(&mut self, state: TodoItemState) {
        self.set(state, !self.is_collapsed(state));
    }
}

/// One section of the grouped view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGroup {
    pub state: TodoItemState,
    pub label: &'static str,
    /// Index of the group's first item in the sorted slice, if it has any
    pub start_index: Option<usize>,
    pub count: usize,
    pub collapsed: bool,
}

/// Order items by state (Todo, In Progress, Done), then by name.
pub fn sort_items(items: &mut [TodoItem]) {
    items.sort_by(|a, b| a.state.cmp(&b.state).then_with(|| a.name.cmp(&b.name)));
}

/// Build one group per state over an already sorted slice.
///
/// Groups are always emitted in state order, including empty ones.
pub fn group_items(sorted: &[TodoItem], group_states: &GroupStates) -> Vec<ItemGroup> {
    TodoItemState::ALL
        .iter()
        .map(|&state| ItemGroup {
            state,
            label: state.label(),
            start_index: sorted.iter().position(|i| i.state == state),
            count: sorted.iter().filter(|i| i.state == state).count(),
            collapsed: group_states.is_collapsed(state),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn item(name: &str, state: TodoItemState) -> TodoItem {
        let now = Utc::now();
        TodoItem {
            id: name.to_lowercase(),
            list_id: "l1".into(),
            name: name.into(),
            description: None,
            state,
            due_date: None,
            completed_date: None,
            created_date: now,
            updated_date: now,
        }
    }

    #[test]
    fn sorts_by_state_then_name() {
        let mut items = vec![
            item("Bread", TodoItemState::Done),
            item("Milk", TodoItemState::Todo),
            item("Eggs", TodoItemState::InProgress),
            item("Apples", TodoItemState::Todo),
        ];
        sort_items(&mut items);

        let names: Vec<_> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Apples", "Milk", "Eggs", "Bread"]);
    }

    #[test]
    fn groups_report_offsets_and_counts() {
        let mut items = vec![
            item("Milk", TodoItemState::Todo),
            item("Bread", TodoItemState::Done),
            item("Apples", TodoItemState::Todo),
        ];
        sort_items(&mut items);

        let mut states = GroupStates::default();
        states.set(TodoItemState::Done, true);
        let groups = group_items(&items, &states);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].start_index, Some(0));
        assert_eq!(groups[0].count, 2);
        assert!(!groups[0].collapsed);
        assert_eq!(groups[1].label, "In Progress");
        assert_eq!(groups[1].start_index, None);
        assert_eq!(groups[1].count, 0);
        assert_eq!(groups[2].start_index, Some(2));
        assert!(groups[2].collapsed);
    }

    #[test]
    fn toggle_flips_one_group() {
        let mut states = GroupStates::default();
        states.toggle(TodoItemState::InProgress);
        assert_eq!(
            states,
            GroupStates {
                todo: false,
                inprogress: true,
                done: false
            }
        );
        states.toggle(TodoItemState::InProgress);
        assert_eq!(states, GroupStates::all(false));
    }

    #[test]
    fn group_states_json_shape() {
        let json = serde_json::to_string(&GroupStates::all(true)).unwrap();
        assert_eq!(json, r#"{"todo":true,"inprogress":true,"done":true}"#);

        let partial: GroupStates = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert!(partial.done && !partial.todo && !partial.inprogress);
    }
}
