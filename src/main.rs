//! wsctl CLI
//!
//! Manage connection profiles and workspaces.

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wsctl::config::{self, Config};
use wsctl::error::Result;
use wsctl::tui::prompt::{select_profile, select_workspace, show_profiles, show_workspaces};
use wsctl::types::{NEW_PROFILE_ID, Profile, ProfileAuth, Selection};
use wsctl::workspace::{RegistryService, WORKSPACE_NAME_ENV, WorkspaceService, resolve_name};

#[derive(Parser)]
#[command(name = "wsctl")]
#[command(about = "Manage workspace profiles and workspaces")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage connection profiles
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Manage workspaces
    #[command(subcommand)]
    Workspace(WorkspaceCommand),
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// List profiles
    #[command(alias = "ls")]
    List,

    /// Set the active profile (prompts when no id is given)
    Use {
        /// Profile id
        id: Option<String>,
    },

    /// Add a profile
    Add(AddProfileArgs),
}

#[derive(Args)]
struct AddProfileArgs {
    /// Unique profile id
    #[arg(long)]
    id: String,

    /// Display name
    #[arg(long)]
    name: String,

    /// Server hostname
    #[arg(long)]
    host: String,

    /// SSH port
    #[arg(long, default_value_t = 22)]
    port: u16,

    /// SSH user
    #[arg(long)]
    user: String,

    /// SSH password
    #[arg(long, conflicts_with = "key", required_unless_present = "key")]
    password: Option<String>,

    /// Path to the SSH private key
    #[arg(long)]
    key: Option<String>,
}

#[derive(Subcommand)]
enum WorkspaceCommand {
    /// List workspaces
    #[command(alias = "ls")]
    List,

    /// Delete a workspace (prompts when no name is given)
    #[command(aliases = ["remove", "rm"])]
    Delete {
        /// Workspace name
        name: Option<String>,

        /// Remove the workspace even if it is running
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Profile(ProfileCommand::List) => cmd_profile_list(),
        Commands::Profile(ProfileCommand::Use { id }) => cmd_profile_use(id),
        Commands::Profile(ProfileCommand::Add(args)) => cmd_profile_add(args),
        Commands::Workspace(WorkspaceCommand::List) => cmd_workspace_list(),
        Commands::Workspace(WorkspaceCommand::Delete { name, force }) => {
            cmd_workspace_delete(name, force)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// ============================================================================
// PROFILE COMMANDS
// ============================================================================

fn cmd_profile_list() -> Result<()> {
    let config = config::load(&config::config_dir())?;
    show_profiles(&config.profiles, &config.active_profile)
}

fn cmd_profile_use(id: Option<String>) -> Result<()> {
    let dir = config::config_dir();
    let mut config = config::load(&dir)?;

    let id = match id {
        Some(id) => id,
        None => {
            let selection = select_profile(
                &config.profiles,
                &config.active_profile,
                "Choose a profile",
                true,
            )?;
            match selection {
                Selection::Cancelled => return Ok(()),
                Selection::Chosen(id) if id == NEW_PROFILE_ID => {
                    println!("To add a profile: wsctl profile add --id <ID> --name <NAME> --host <HOST> --user <USER> --key <PATH>");
                    return Ok(());
                }
                Selection::Chosen(id) => id,
            }
        }
    };

    config.set_active_profile(&id)?;
    config::save(&config, &dir)?;
    println!("Active profile set to {}", id);
    Ok(())
}

fn cmd_profile_add(args: AddProfileArgs) -> Result<()> {
    let dir = config::config_dir();
    let mut config = config::load(&dir)?;

    let profile = Profile {
        id: args.id,
        name: args.name,
        hostname: args.host,
        port: args.port,
        auth: ProfileAuth {
            user: args.user,
            password: args.password,
            private_key_path: args.key,
        },
    };
    let id = profile.id.clone();

    config.add_profile(profile)?;
    config::save(&config, &dir)?;
    println!("Profile {} added", id);
    Ok(())
}

// ============================================================================
// WORKSPACE COMMANDS
// ============================================================================

fn cmd_workspace_list() -> Result<()> {
    let service = RegistryService::new(&config::config_dir());
    show_workspaces(&service.list()?)
}

fn cmd_workspace_delete(name: Option<String>, force: bool) -> Result<()> {
    let dir = config::config_dir();
    let config: Config = config::load(&dir)?;
    let active_profile = config.active_profile()?;
    let service = RegistryService::new(&dir);

    let name = match resolve_name(std::env::var(WORKSPACE_NAME_ENV).ok(), name) {
        Some(name) => name,
        None => match select_workspace(&service.list()?, "delete")?.into_id() {
            Some(name) => name,
            None => return Ok(()),
        },
    };

    service.remove(&name, force)?;
    config::remove_workspace_ssh_entries(&config::ssh_config_path(), &active_profile.id, &name)?;
    println!("Workspace {} deleted", name);
    Ok(())
}
