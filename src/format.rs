//! Row formatting: domain entities to display rows.
//!
//! Every branch builds the full schema arity, so the layout code can rely
//! on rows never being short.

use crate::types::{DEFAULT_PROFILE_ID, NEW_PROFILE_ID, Profile, Row, Workspace};

/// Placeholder for a cell that has no value.
const EMPTY_CELL: &str = "-";

/// Format a profile as a row of [`Schema::profiles`](crate::types::Schema::profiles).
///
/// Passwords are masked with one `*` per character. A private key path takes
/// precedence over a password; with neither, both auth cells are `-`.
pub fn format_profile(profile: &Profile, active_id: &str) -> Row {
    let is_active = (profile.id == active_id).to_string();

    match profile.id.as_str() {
        DEFAULT_PROFILE_ID => {
            let mut row = vec![profile.id.clone(), profile.name.clone(), is_active];
            row.extend(std::iter::repeat_n(EMPTY_CELL.to_string(), 5));
            row
        }
        NEW_PROFILE_ID => {
            let mut row = vec![profile.id.clone(), profile.name.clone()];
            row.extend(std::iter::repeat_n(String::new(), 6));
            row
        }
        _ => {
            let (password, key_path) = auth_cells(profile);
            vec![
                profile.id.clone(),
                profile.name.clone(),
                is_active,
                profile.hostname.clone(),
                profile.port.to_string(),
                profile.auth.user.clone(),
                password,
                key_path,
            ]
        }
    }
}

/// Password and key-path cells, redacted.
fn auth_cells(profile: &Profile) -> (String, String) {
    if let Some(path) = &profile.auth.private_key_path {
        (EMPTY_CELL.to_string(), path.clone())
    } else if let Some(password) = &profile.auth.password {
        ("*".repeat(password.chars().count()), EMPTY_CELL.to_string())
    } else {
        (EMPTY_CELL.to_string(), EMPTY_CELL.to_string())
    }
}

/// Format all profiles and locate the active one.
///
/// Returns the rows and the index of the row whose id equals `active_id`
/// (0 when none does).
pub fn profile_rows(profiles: &[Profile], active_id: &str) -> (Vec<Row>, usize) {
    let mut active_index = 0;
    let rows = profiles
        .iter()
        .enumerate()
        .map(|(i, profile)| {
            if profile.id == active_id {
                active_index = i;
            }
            format_profile(profile, active_id)
        })
        .collect();

    (rows, active_index)
}

/// Format a workspace as a row of [`Schema::workspaces`](crate::types::Schema::workspaces).
///
/// Column 0 is the name, which is what the workspace service removes by.
pub fn format_workspace(workspace: &Workspace) -> Row {
    let short_id: String = workspace.id.chars().take(8).collect();
    let projects = if workspace.projects.is_empty() {
        EMPTY_CELL.to_string()
    } else {
        workspace.projects.join(", ")
    };

    vec![
        workspace.name.clone(),
        short_id,
        workspace.target.clone(),
        projects,
    ]
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ProfileAuth, Schema};

    fn with_password(id: &str, password: &str) -> Profile {
        Profile {
            id: id.into(),
            name: format!("{} profile", id),
            hostname: "10.0.0.1".into(),
            port: 2222,
            auth: ProfileAuth {
                user: "daytona".into(),
                password: Some(password.into()),
                private_key_path: None,
            },
        }
    }

    fn with_key(id: &str, path: &str) -> Profile {
        Profile {
            id: id.into(),
            name: format!("{} profile", id),
            hostname: "example.com".into(),
            port: 22,
            auth: ProfileAuth {
                user: "root".into(),
                password: None,
                private_key_path: Some(path.into()),
            },
        }
    }

    #[test]
    fn password_is_masked_per_character() {
        let row = format_profile(&with_password("a", "hunter2"), "b");
        assert_eq!(
            row,
            vec!["a", "a profile", "false", "10.0.0.1", "2222", "daytona", "*******", "-"]
        );
    }

    #[test]
    fn multibyte_password_masks_by_character() {
        let row = format_profile(&with_password("a", "pässwörd"), "a");
        assert_eq!(row[6], "********");
        assert_eq!(row[2], "true");
    }

    #[test]
    fn key_path_is_shown_verbatim() {
        let row = format_profile(&with_key("k", "/home/me/.ssh/id_ed25519"), "k");
        assert_eq!(row[6], "-");
        assert_eq!(row[7], "/home/me/.ssh/id_ed25519");
    }

    #[test]
    fn key_path_wins_over_password() {
        let mut profile = with_key("k", "/key");
        profile.auth.password = Some("secret".into());
        let row = format_profile(&profile, "");
        assert_eq!(row[6], "-");
        assert_eq!(row[7], "/key");
    }

    #[test]
    fn missing_auth_still_has_full_arity() {
        let mut profile = with_password("n", "x");
        profile.auth.password = None;
        let row = format_profile(&profile, "");
        assert_eq!(row.len(), Schema::profiles().len());
        assert_eq!(&row[6..], &["-", "-"]);
    }

    #[test]
    fn default_profile_hides_connection_fields() {
        let mut profile = with_password(DEFAULT_PROFILE_ID, "secret");
        profile.name = "Default".into();
        let row = format_profile(&profile, DEFAULT_PROFILE_ID);
        assert_eq!(
            row,
            vec!["default", "Default", "true", "-", "-", "-", "-", "-"]
        );
    }

    #[test]
    fn create_option_row_is_blank_after_name() {
        let row = format_profile(&Profile::create_option(), "a");
        assert_eq!(row, vec!["+", "Add new profile", "", "", "", "", "", ""]);
    }

    #[test]
    fn profile_rows_find_the_active_index() {
        let profiles = vec![
            with_password("a", "x"),
            with_key("b", "/k"),
            Profile::builtin_default(),
        ];
        let (rows, active) = profile_rows(&profiles, "b");
        assert_eq!(active, 1);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][2], "true");
        assert_eq!(rows[0][2], "false");
    }

    #[test]
    fn profile_rows_default_to_first_row_without_active() {
        let profiles = vec![with_password("a", "x"), with_key("b", "/k")];
        let (_, active) = profile_rows(&profiles, "zzz");
        assert_eq!(active, 0);
    }

    #[test]
    fn workspace_row_shortens_id_and_joins_projects() {
        let ws = Workspace {
            id: "0123456789abcdef".into(),
            name: "api".into(),
            target: "local".into(),
            projects: vec!["api".into(), "web".into()],
            running: true,
        };
        assert_eq!(
            format_workspace(&ws),
            vec!["api", "01234567", "local", "api, web"]
        );
        assert_eq!(format_workspace(&ws).len(), Schema::workspaces().len());
    }
}
