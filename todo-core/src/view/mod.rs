//! Client view state
//!
//! A single [`AppState`] value owns everything the list view renders.
//! It is only mutated through [`AppState::dispatch`], one [`Action`] at a
//! time, after the corresponding API call has succeeded. A failed call
//! dispatches nothing, so the previous state stays on screen.

pub mod grouping;
pub mod storage;

use crate::item::{TodoItem, TodoItemState};
use crate::list::TodoList;

pub use grouping::{group_items, sort_items, GroupStates, ItemGroup};
pub use storage::{FileStore, KeyValueStore, MemoryStore, GROUP_STATES_KEY};

/// State transitions of the client
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// All lists fetched
    ListsLoaded(Vec<TodoList>),
    /// One list fetched; becomes the selection
    ListLoaded(TodoList),
    /// List created or updated
    ListSaved(TodoList),
    ListRemoved(String),
    ListSelected(Option<TodoList>),
    /// Items of a list fetched
    ItemsLoaded { list_id: String, items: Vec<TodoItem> },
    /// One item fetched; becomes the selection
    ItemLoaded(TodoItem),
    /// Item created or updated
    ItemSaved(TodoItem),
    ItemRemoved { list_id: String, item_id: String },
    ItemSelected(Option<TodoItem>),
    GroupToggled(TodoItemState),
    AllGroupsSet { collapsed: bool },
}

/// Everything the list view renders
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub lists: Vec<TodoList>,
    pub selected_list: Option<TodoList>,
    pub selected_item: Option<TodoItem>,
    pub group_states: GroupStates,
}

/// Sorted items of the selected list with their group sections
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedView {
    pub items: Vec<TodoItem>,
    pub groups: Vec<ItemGroup>,
}

impl AppState {
    pub fn new(group_states: GroupStates) -> Self {
        Self {
            group_states,
            ..Self::default()
        }
    }

    /// Apply one action.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!(?action, "dispatch");

        match action {
            Action::ListsLoaded(lists) => self.lists = lists,
            Action::ListLoaded(list) => self.selected_list = Some(list),
            Action::ListSaved(list) => self.save_list(list),
            Action::ListRemoved(id) => {
                self.lists.retain(|l| l.id != id);
                if self.selected_list.as_ref().is_some_and(|l| l.id == id) {
                    self.selected_list = None;
                    self.selected_item = None;
                }
            }
            Action::ListSelected(list) => self.selected_list = list,
            Action::ItemsLoaded { list_id, items } => {
                if let Some(list) = self.selected_list.as_mut().filter(|l| l.id == list_id) {
                    list.items = Some(items);
                }
            }
            Action::ItemLoaded(item) => self.selected_item = Some(item),
            Action::ItemSaved(item) => self.save_item(item),
            Action::ItemRemoved { list_id, item_id } => {
                if let Some(list) = self.selected_list.as_mut().filter(|l| l.id == list_id) {
                    if let Some(items) = list.items.as_mut() {
                        items.retain(|i| i.id != item_id);
                    }
                }
                if self.selected_item.as_ref().is_some_and(|i| i.id == item_id) {
                    self.selected_item = None;
                }
            }
            Action::ItemSelected(item) => self.selected_item = item,
            Action::GroupToggled(state) => self.group_states.toggle(state),
            Action::AllGroupsSet { collapsed } => self.group_states = GroupStates::all(collapsed),
        }
    }

    fn save_list(&mut self, list: TodoList) {
        let summary = TodoList {
            items: None,
            ..list.clone()
        };
        match self.lists.iter_mut().find(|l| l.id == list.id) {
            Some(existing) => *existing = summary,
            None => self.lists.push(summary),
        }

        if let Some(selected) = self.selected_list.as_mut().filter(|l| l.id == list.id) {
            selected.name = list.name;
            selected.description = list.description;
        }
    }

    fn save_item(&mut self, item: TodoItem) {
        if self.selected_item.as_ref().is_some_and(|i| i.id == item.id) {
            self.selected_item = Some(item.clone());
        }

        let Some(list) = self.selected_list.as_mut().filter(|l| l.id == item.list_id) else {
            return;
        };
        let items = list.items.get_or_insert_with(Vec::new);
        match items.iter_mut().find(|i| i.id == item.id) {
            Some(existing) => *existing = item,
            None => items.push(item),
        }
    }

    /// Sorted, grouped items of the selected list.
    pub fn grouped_view(&self) -> GroupedView {
        let mut items = self
            .selected_list
            .as_ref()
            .and_then(|l| l.items.clone())
            .unwrap_or_default();
        sort_items(&mut items);
        let groups = group_items(&items, &self.group_states);
        GroupedView { items, groups }
    }
}
