//! Terminal output for the todo CLI
//!
//! # Quiet Mode
//!
//! Spinners are suppressed when:
//! - `--quiet` flag is passed
//! - `TODO_QUIET=1` environment variable is set
//! - stderr is not a TTY (piped output)
//!
//! Rendered lists always go to stdout, so quiet mode only affects progress feedback.

use std::fmt::Write as _;
use std::io::IsTerminal;
use std::sync::OnceLock;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use todo_core::view::GroupedView;
use todo_core::{TodoItem, TodoItemState, TodoList};

static QUIET_MODE: OnceLock<bool> = OnceLock::new();

/// Initialize quiet mode from the --quiet flag, `TODO_QUIET` and TTY status.
pub fn init_quiet_mode(quiet_flag: bool) {
    let is_quiet = quiet_flag
        || std::env::var("TODO_QUIET").map(|v| v == "1").unwrap_or(false)
        || !std::io::stderr().is_terminal();

    QUIET_MODE.set(is_quiet).ok();
}

pub fn is_quiet() -> bool {
    *QUIET_MODE.get().unwrap_or(&false)
}

/// Create a spinner that respects quiet mode
pub fn spinner(msg: impl Into<String>) -> Option<ProgressBar> {
    if is_quiet() {
        return None;
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(msg.into());
    pb.enable_steady_tick(Duration::from_millis(80));
    Some(pb)
}

fn finish(pb: Option<ProgressBar>, msg: String) {
    if let Some(pb) = pb {
        if let Ok(style) = ProgressStyle::default_spinner().template("{msg}") {
            pb.set_style(style);
        }
        pb.finish_with_message(msg);
    }
}

pub fn finish_success(pb: Option<ProgressBar>, msg: impl Into<String>) {
    finish(pb, format!("✓ {}", msg.into()));
}

pub fn finish_error(pb: Option<ProgressBar>, msg: impl Into<String>) {
    finish(pb, format!("✗ {}", msg.into()));
}

/// Await `f` behind a spinner, then report success or failure.
pub async fn with_spinner<T, E: std::fmt::Display>(
    msg: impl Into<String>,
    success_msg: impl Into<String>,
    f: impl std::future::Future<Output = Result<T, E>>,
) -> Result<T, E> {
    let msg = msg.into();
    let pb = spinner(&msg);

    match f.await {
        Ok(result) => {
            finish_success(pb, success_msg);
            Ok(result)
        }
        Err(e) => {
            finish_error(pb, format!("{}: {}", msg, e));
            Err(e)
        }
    }
}

fn checkbox(state: TodoItemState) -> &'static str {
    match state {
        TodoItemState::Todo => "[ ]",
        TodoItemState::InProgress => "[~]",
        TodoItemState::Done => "[x]",
    }
}

fn render_item(out: &mut String, item: &TodoItem) {
    let _ = write!(out, "  {} {}", checkbox(item.state), item.name);
    if let Some(due) = item.due_date {
        let _ = write!(out, " (due {})", due.format("%Y-%m-%d"));
    }
    let _ = writeln!(out, "  #{}", item.id);
}

/// One line per list: name, description and id.
pub fn render_lists(lists: &[TodoList]) -> String {
    if lists.is_empty() {
        return "No lists yet\n".to_string();
    }

    let mut out = String::new();
    for list in lists {
        let _ = write!(out, "{}", list.name);
        if let Some(description) = &list.description {
            let _ = write!(out, " - {}", description);
        }
        let _ = writeln!(out, "  #{}", list.id);
    }
    out
}

/// A list with its items under one header per state group.
///
/// Collapsed groups show only their header and count.
pub fn render_list_view(list: &TodoList, view: &GroupedView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", list.name);
    if let Some(description) = &list.description {
        let _ = writeln!(out, "{}", description);
    }

    for group in &view.groups {
        let marker = if group.collapsed { "▸" } else { "▾" };
        let _ = writeln!(out, "{} {} ({})", marker, group.label, group.count);

        if group.collapsed {
            continue;
        }
        if let Some(start) = group.start_index {
            for item in &view.items[start..start + group.count] {
                render_item(&mut out, item);
            }
        }
    }
    out
}
