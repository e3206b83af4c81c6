//! Table prompts used by the CLI commands.
//!
//! Each prompt prints a heading, builds rows with the matching schema and
//! hands them to [`run`].

use std::io::{self, Write};

use crossterm::style::Stylize;
use crossterm::tty::IsTty;

use crate::error::Result;
use crate::format::{format_workspace, profile_rows};
use crate::types::{Profile, Schema, Selection, Workspace};

use super::run::run;
use super::state::TableData;

/// Let the user pick a profile.
///
/// With `with_create_option`, a synthetic "Add new profile" row (id
/// [`NEW_PROFILE_ID`](crate::types::NEW_PROFILE_ID)) is appended.
pub fn select_profile(
    profiles: &[Profile],
    active_id: &str,
    title: &str,
    with_create_option: bool,
) -> Result<Selection> {
    print_heading(title)?;

    let mut entries = profiles.to_vec();
    if with_create_option {
        entries.push(Profile::create_option());
    }

    run(profile_table(&entries, active_id), true)
}

/// Print the profile table without taking over the terminal.
pub fn show_profiles(profiles: &[Profile], active_id: &str) -> Result<()> {
    print_heading("Profiles")?;
    run(profile_table(profiles, active_id), false)?;
    Ok(())
}

/// Let the user pick a workspace; the selection is the workspace name.
pub fn select_workspace(workspaces: &[Workspace], verb: &str) -> Result<Selection> {
    print_heading(&format!("Select a workspace to {}", verb))?;
    run(workspace_table(workspaces), true)
}

/// Print the workspace table without taking over the terminal.
pub fn show_workspaces(workspaces: &[Workspace]) -> Result<()> {
    print_heading("Workspaces")?;
    run(workspace_table(workspaces), false)?;
    Ok(())
}

fn profile_table(profiles: &[Profile], active_id: &str) -> TableData {
    let (rows, active_index) = profile_rows(profiles, active_id);
    TableData {
        schema: Schema::profiles(),
        rows,
        active_index,
        active_id: active_id.to_string(),
    }
}

fn workspace_table(workspaces: &[Workspace]) -> TableData {
    TableData {
        schema: Schema::workspaces(),
        rows: workspaces.iter().map(format_workspace).collect(),
        active_index: 0,
        active_id: String::new(),
    }
}

fn print_heading(title: &str) -> io::Result<()> {
    let tty = io::stdout().is_tty();
    let mut stdout = io::stdout().lock();
    writeln!(stdout)?;
    writeln!(stdout, "{}", heading_text(title, tty))?;
    stdout.flush()
}

/// Green bold on a terminal, plain text when redirected.
fn heading_text(title: &str, tty: bool) -> String {
    if tty {
        title.green().bold().to_string()
    } else {
        title.to_string()
    }
}
