//! Domain types for wsctl.
//!
//! Table schema, display rows, the entities shown in tables, and the
//! outcome of an interactive selection.

use serde::{Deserialize, Serialize};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Identifier of the built-in profile. Its connection fields are never shown.
pub const DEFAULT_PROFILE_ID: &str = "default";

/// Identifier of the synthetic "Add new profile" row.
///
/// Never stored in the config; only appended to prompts.
pub const NEW_PROFILE_ID: &str = "+";

// ============================================================================
// TABLE SCHEMA
// ============================================================================

/// A logical table column with a fixed display width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    /// Display width in terminal cells. Always > 0.
    pub width: u16,
}

impl Column {
    pub const fn new(title: &'static str, width: u16) -> Self {
        Column { title, width }
    }
}

/// Ordered column set of a table.
///
/// Passed explicitly to the layout and formatting code; order is significant
/// and determines which columns survive on narrow terminals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(columns.iter().all(|c| c.width > 0), "zero-width column");
        Schema { columns }
    }

    /// Columns of the profile table.
    pub fn profiles() -> Self {
        Schema::new(vec![
            Column::new("Id", 10),
            Column::new("Name", 20),
            Column::new("Active", 10),
            Column::new("Hostname", 15),
            Column::new("SSH port", 10),
            Column::new("SSH user", 10),
            Column::new("SSH password", 15),
            Column::new("SSH private key path", 20),
        ])
    }

    /// Columns of the workspace table.
    pub fn workspaces() -> Self {
        Schema::new(vec![
            Column::new("Name", 20),
            Column::new("Id", 15),
            Column::new("Target", 15),
            Column::new("Projects", 10),
        ])
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Sum of all column widths.
    pub fn total_width(&self) -> u16 {
        self.columns.iter().map(|c| c.width).sum()
    }
}

/// A display row: one string cell per column.
pub type Row = Vec<String>;

// ============================================================================
// ENTITIES
// ============================================================================

/// SSH credentials of a profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAuth {
    pub user: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key_path: Option<String>,
}

/// A server connection profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub port: u16,
    #[serde(default)]
    pub auth: ProfileAuth,
}

impl Profile {
    /// The synthetic row offered by prompts to create a new profile.
    pub fn create_option() -> Self {
        Profile {
            id: NEW_PROFILE_ID.to_string(),
            name: "Add new profile".to_string(),
            ..Default::default()
        }
    }

    /// The built-in profile present in every fresh config.
    pub fn builtin_default() -> Self {
        Profile {
            id: DEFAULT_PROFILE_ID.to_string(),
            name: "default".to_string(),
            ..Default::default()
        }
    }
}

/// A workspace as reported by the workspace service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub target: String,
    #[serde(default)]
    pub projects: Vec<String>,
    #[serde(default)]
    pub running: bool,
}

// ============================================================================
// SELECTION
// ============================================================================

/// Outcome of a table prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The user confirmed a row; carries its identifier (never empty).
    Chosen(String),
    /// The user quit, or there was nothing to choose.
    Cancelled,
}

impl Selection {
    /// Build a selection from a possibly empty identifier.
    pub fn from_id(id: &str) -> Self {
        if id.is_empty() {
            Selection::Cancelled
        } else {
            Selection::Chosen(id.to_string())
        }
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::Chosen(id) => Some(id),
            Selection::Cancelled => None,
        }
    }

    pub fn into_id(self) -> Option<String> {
        match self {
            Selection::Chosen(id) => Some(id),
            Selection::Cancelled => None,
        }
    }
}
