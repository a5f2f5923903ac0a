//! Command implementations for the todo CLI

pub mod items;
pub mod lists;
pub mod serve;
pub mod view;

pub use items::{run_add, run_delete_item, run_set_state};
pub use lists::{run_delete_list, run_lists, run_new_list};
pub use serve::run_serve;
pub use view::{run_set_all_groups, run_set_group, run_show};

use anyhow::{anyhow, Context, Result};
use todo_core::view::FileStore;
use todo_core::{Action, AppState, GroupStates, ListPayload, TodoConfig, TodoItem, TodoList};

use crate::client::ApiClient;

/// Name of the list created when the service has none
pub const DEFAULT_LIST_NAME: &str = "My List";

/// Client-side state for one CLI invocation.
///
/// Every successful API call is mirrored into `state` through an [`Action`];
/// group collapse state is persisted between invocations in `store`.
pub struct Session {
    pub client: ApiClient,
    pub state: AppState,
    store: FileStore,
}

impl Session {
    pub fn open(api_url: &str, config: &TodoConfig) -> Result<Self> {
        let store = FileStore::new(config.ui_state_path());
        let state = AppState::new(GroupStates::load(&store));
        tracing::debug!(api_url, ui_state = %store.path().display(), "session opened");

        Ok(Self {
            client: ApiClient::new(api_url)?,
            state,
            store,
        })
    }

    pub fn save_group_states(&mut self) -> Result<()> {
        self.state
            .group_states
            .save(&mut self.store)
            .with_context(|| format!("Failed to save {}", self.store.path().display()))
    }

    pub async fn load_lists(&mut self) -> Result<&[TodoList]> {
        let lists = self.client.get_lists().await?;
        self.state.dispatch(Action::ListsLoaded(lists));
        Ok(&self.state.lists)
    }

    /// Select a list by id or name (case-insensitive) and load its items.
    ///
    /// Without a query the first list is selected; when the service has no
    /// lists at all, one named [`DEFAULT_LIST_NAME`] is created first.
    pub async fn select_list(&mut self, query: Option<&str>) -> Result<&TodoList> {
        self.load_lists().await?;

        let id = match query {
            Some(query) => find_list(&self.state.lists, query)
                .map(|l| l.id.clone())
                .ok_or_else(|| anyhow!("No list matches '{}'", query))?,
            None => match self.state.lists.first().map(|l| l.id.clone()) {
                Some(id) => id,
                None => {
                    let payload = ListPayload::new(DEFAULT_LIST_NAME, None);
                    let list = self.client.create_list(&payload).await?;
                    tracing::info!(list_id = %list.id, "created default list");
                    let id = list.id.clone();
                    self.state.dispatch(Action::ListSaved(list));
                    id
                }
            },
        };

        let list = self.client.get_list(&id).await?;
        self.state.dispatch(Action::ListLoaded(list));
        self.state
            .selected_list
            .as_ref()
            .ok_or_else(|| anyhow!("List '{}' could not be selected", id))
    }

    /// Find an item of the selected list by id or name and select it.
    pub fn select_item(&mut self, query: &str) -> Result<TodoItem> {
        let item = self
            .state
            .selected_list
            .as_ref()
            .and_then(|l| l.items.as_deref())
            .and_then(|items| find_item(items, query))
            .cloned()
            .ok_or_else(|| anyhow!("No item matches '{}'", query))?;

        self.state.dispatch(Action::ItemSelected(Some(item.clone())));
        Ok(item)
    }
}

/// Exact id match wins over a name match.
fn find_list<'a>(lists: &'a [TodoList], query: &str) -> Option<&'a TodoList> {
    lists
        .iter()
        .find(|l| l.id == query)
        .or_else(|| lists.iter().find(|l| l.name.eq_ignore_ascii_case(query)))
}

fn find_item<'a>(items: &'a [TodoItem], query: &str) -> Option<&'a TodoItem> {
    items
        .iter()
        .find(|i| i.id == query)
        .or_else(|| items.iter().find(|i| i.name.eq_ignore_ascii_case(query)))
}
