//! Local configuration: profiles, the active profile, SSH config entries.
//!
//! Structure:
//! - Pure functions: path computation, profile lookup, SSH config editing
//! - Effect functions: config and SSH file I/O

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::types::{DEFAULT_PROFILE_ID, NEW_PROFILE_ID, Profile};

/// Config filename within the config directory.
const CONFIG_FILENAME: &str = "config.json";

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "WSCTL_CONFIG_DIR";

// ============================================================================
// TYPES
// ============================================================================

/// Persisted CLI configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Id of the profile commands run against.
    pub active_profile: String,
    pub profiles: Vec<Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            active_profile: DEFAULT_PROFILE_ID.to_string(),
            profiles: vec![Profile::builtin_default()],
        }
    }
}

// ============================================================================
// PURE FUNCTIONS
// ============================================================================

/// Returns the config directory.
///
/// `$WSCTL_CONFIG_DIR` if set, else `<config dir>/wsctl`.
pub fn config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("wsctl")
}

/// Path to the config file inside `dir`.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILENAME)
}

impl Config {
    pub fn profile(&self, id: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// The profile named by `active_profile`.
    pub fn active_profile(&self) -> Result<&Profile> {
        self.profile(&self.active_profile)
            .ok_or_else(|| Error::ProfileNotFound(self.active_profile.clone()))
    }

    pub fn set_active_profile(&mut self, id: &str) -> Result<()> {
        if self.profile(id).is_none() {
            return Err(Error::ProfileNotFound(id.to_string()));
        }
        self.active_profile = id.to_string();
        Ok(())
    }

    /// Add a profile. Ids must be unique and may not be the create sentinel.
    pub fn add_profile(&mut self, profile: Profile) -> Result<()> {
        if profile.id.is_empty() || profile.id == NEW_PROFILE_ID {
            return Err(Error::ReservedProfileId(profile.id));
        }
        if self.profile(&profile.id).is_some() {
            return Err(Error::DuplicateProfile(profile.id));
        }
        self.profiles.push(profile);
        Ok(())
    }
}

/// SSH host alias for a workspace reached through a profile.
pub fn ssh_host_alias(profile_id: &str, workspace: &str) -> String {
    format!("{}-{}", profile_id, workspace)
}

/// Remove every `Host <alias>` block from SSH config text.
///
/// A block runs until the next `Host` or `Match` line. Returns the new text
/// and whether anything was removed.
pub fn strip_ssh_host(contents: &str, alias: &str) -> (String, bool) {
    let mut out = String::with_capacity(contents.len());
    let mut skipping = false;
    let mut removed = false;

    for line in contents.split_inclusive('\n') {
        let mut words = line.split_whitespace();
        let keyword = words.next().map(str::to_ascii_lowercase);

        if matches!(keyword.as_deref(), Some("host") | Some("match")) {
            let is_target =
                keyword.as_deref() == Some("host") && words.any(|pattern| pattern == alias);
            skipping = is_target;
            removed |= is_target;
        }

        if !skipping {
            out.push_str(line);
        }
    }

    (out, removed)
}

// ============================================================================
// EFFECT FUNCTIONS
// ============================================================================

/// Load the config from `dir`. A missing file yields the default config.
pub fn load(dir: &Path) -> Result<Config> {
    let path = config_path(dir);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        Err(e) => return Err(e.into()),
    };

    serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
        path: path.display().to_string(),
        source,
    })
}

/// Write the config to `dir`, creating the directory if needed.
pub fn save(config: &Config, dir: &Path) -> Result<()> {
    fs::create_dir_all(dir)?;
    let contents = serde_json::to_string_pretty(config).map_err(Error::ConfigSerialize)?;
    let path = config_path(dir);
    fs::write(&path, contents)?;
    debug!(path = %path.display(), "config saved");
    Ok(())
}

/// Default SSH config location (`~/.ssh/config`).
pub fn ssh_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ssh")
        .join("config")
}

/// Drop the SSH entries of a workspace reached through `profile_id`.
///
/// A missing SSH config is not an error. The file is only rewritten when
/// something was removed.
pub fn remove_workspace_ssh_entries(ssh_config: &Path, profile_id: &str, workspace: &str) -> Result<()> {
    let contents = match fs::read_to_string(ssh_config) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e.into()),
    };

    let alias = ssh_host_alias(profile_id, workspace);
    let (updated, removed) = strip_ssh_host(&contents, &alias);
    if removed {
        fs::write(ssh_config, updated)?;
        info!(alias = %alias, "removed SSH config entry");
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
