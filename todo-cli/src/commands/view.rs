//! Grouped list view and group collapse commands

use anyhow::Result;
use clap::Parser;
use todo_core::{Action, TodoItemState};

use super::Session;
use crate::ui;

#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// List id or name (default: first list)
    pub list: Option<String>,

    /// Print JSON instead of text, items sorted by state then name
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct GroupArgs {
    /// Group to change: todo, inprogress or done
    pub state: TodoItemState,
}

/// Print the selected list through the grouped view.
pub fn print_selected(session: &Session) {
    if let Some(list) = &session.state.selected_list {
        print!("{}", ui::render_list_view(list, &session.state.grouped_view()));
    }
}

pub async fn run_show(session: &mut Session, args: ShowArgs) -> Result<()> {
    ui::with_spinner(
        "Loading list",
        "List loaded",
        session.select_list(args.list.as_deref()),
    )
    .await?;

    if args.json {
        if let Some(list) = &session.state.selected_list {
            let mut list = list.clone();
            list.items = Some(session.state.grouped_view().items);
            println!("{}", serde_json::to_string_pretty(&list)?);
        }
    } else {
        print_selected(session);
    }
    Ok(())
}

/// Collapse or expand one state group; the choice persists across runs.
pub fn run_set_group(session: &mut Session, args: GroupArgs, collapsed: bool) -> Result<()> {
    if session.state.group_states.is_collapsed(args.state) != collapsed {
        session.state.dispatch(Action::GroupToggled(args.state));
    }
    session.save_group_states()?;

    let verb = if collapsed { "collapsed" } else { "expanded" };
    println!("{} group {}", args.state.label(), verb);
    Ok(())
}

pub fn run_set_all_groups(session: &mut Session, collapsed: bool) -> Result<()> {
    session.state.dispatch(Action::AllGroupsSet { collapsed });
    session.save_group_states()?;

    let verb = if collapsed { "collapsed" } else { "expanded" };
    println!("All groups {}", verb);
    Ok(())
}
