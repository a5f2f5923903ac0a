//! List commands: lists, new-list, delete-list

use anyhow::Result;
use clap::Parser;
use todo_core::{Action, ListPayload};

use super::Session;
use crate::ui;

#[derive(Parser, Debug)]
pub struct ListsArgs {
    /// Print JSON instead of text (for piping to jq)
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct NewListArgs {
    /// Name of the new list
    pub name: String,

    /// Optional description
    #[arg(long, short)]
    pub description: Option<String>,
}

#[derive(Parser, Debug)]
pub struct ListRefArgs {
    /// List id or name
    pub list: String,
}

pub async fn run_lists(session: &mut Session, args: ListsArgs) -> Result<()> {
    let lists = ui::with_spinner("Fetching lists", "Lists loaded", session.load_lists()).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(lists)?);
    } else {
        print!("{}", ui::render_lists(lists));
    }
    Ok(())
}

pub async fn run_new_list(session: &mut Session, args: NewListArgs) -> Result<()> {
    let payload = ListPayload::new(args.name, args.description);
    let list = ui::with_spinner(
        "Creating list",
        "List created",
        session.client.create_list(&payload),
    )
    .await?;

    println!("{}  #{}", list.name, list.id);
    session.state.dispatch(Action::ListSaved(list));
    Ok(())
}

/// Delete a list by id or name. Unknown names are an error; the delete itself
/// is idempotent on the server.
pub async fn run_delete_list(session: &mut Session, args: ListRefArgs) -> Result<()> {
    let list = session.select_list(Some(&args.list)).await?;
    let (id, name) = (list.id.clone(), list.name.clone());

    ui::with_spinner(
        format!("Deleting '{}'", name),
        format!("Deleted '{}' and its items", name),
        session.client.delete_list(&id),
    )
    .await?;

    session.state.dispatch(Action::ListRemoved(id));
    Ok(())
}
