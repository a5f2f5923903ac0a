//! Item commands: add, complete, start, delete-item

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use clap::Parser;
use todo_core::{Action, ItemPayload, TodoItemState};

use super::Session;
use crate::ui;

#[derive(Parser, Debug)]
pub struct AddArgs {
    /// Name of the item
    pub name: String,

    /// List id or name (default: first list)
    #[arg(long, short)]
    pub list: Option<String>,

    /// Optional description
    #[arg(long, short)]
    pub description: Option<String>,

    /// Due date, RFC 3339 (e.g. 2024-05-01T09:00:00Z)
    #[arg(long)]
    pub due: Option<DateTime<Utc>>,
}

#[derive(Parser, Debug)]
pub struct ItemRefArgs {
    /// Item id or name
    pub item: String,

    /// List id or name (default: first list)
    #[arg(long, short)]
    pub list: Option<String>,
}

pub async fn run_add(session: &mut Session, args: AddArgs) -> Result<()> {
    let list_id = session.select_list(args.list.as_deref()).await?.id.clone();
    let payload = ItemPayload {
        description: args.description,
        due_date: args.due,
        ..ItemPayload::named(args.name)
    };

    let item = ui::with_spinner(
        "Adding item",
        "Item added",
        session.client.create_item(&list_id, &payload),
    )
    .await?;

    session.state.dispatch(Action::ItemSaved(item));
    super::view::print_selected(session);
    Ok(())
}

/// Move an item to `state`. Completing stamps the completion time;
/// any other state clears it.
pub async fn run_set_state(
    session: &mut Session,
    args: ItemRefArgs,
    state: TodoItemState,
) -> Result<()> {
    session.select_list(args.list.as_deref()).await?;
    let item = session.select_item(&args.item)?;

    let mut payload = item.to_payload();
    payload.state = Some(state.as_str().to_owned());
    payload.completed_date = match state {
        TodoItemState::Done => Some(Utc::now()),
        TodoItemState::Todo | TodoItemState::InProgress => None,
    };

    let updated = ui::with_spinner(
        format!("Updating '{}'", item.name),
        format!("'{}' is now {}", item.name, state.label()),
        session.client.update_item(&item.list_id, &item.id, &payload),
    )
    .await?;

    session.state.dispatch(Action::ItemSaved(updated));
    super::view::print_selected(session);
    Ok(())
}

pub async fn run_delete_item(session: &mut Session, args: ItemRefArgs) -> Result<()> {
    session.select_list(args.list.as_deref()).await?;
    let item = session
        .select_item(&args.item)
        .map_err(|e| anyhow!("{} (nothing deleted)", e))?;

    ui::with_spinner(
        format!("Deleting '{}'", item.name),
        format!("Deleted '{}'", item.name),
        session.client.delete_item(&item.list_id, &item.id),
    )
    .await?;

    session.state.dispatch(Action::ItemRemoved {
        list_id: item.list_id,
        item_id: item.id,
    });
    super::view::print_selected(session);
    Ok(())
}
