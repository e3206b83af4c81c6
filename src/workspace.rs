//! Workspace service: listing and removing workspaces.
//!
//! Commands talk to the [`WorkspaceService`] trait. [`RegistryService`]
//! implements it over a JSON registry in the config directory.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};
use crate::types::Workspace;

/// Registry filename within the config directory.
const REGISTRY_FILENAME: &str = "workspaces.json";

/// Environment variable naming the workspace the CLI runs inside of.
pub const WORKSPACE_NAME_ENV: &str = "WSCTL_WS_NAME";

/// Workspace a command targets without prompting.
///
/// The current workspace (`env`) wins over a name given on the command
/// line. An empty value names no workspace and falls through to `arg`.
pub fn resolve_name(env: Option<String>, arg: Option<String>) -> Option<String> {
    env.filter(|name| !name.is_empty()).or(arg)
}

/// Operations the CLI needs from a workspace backend.
pub trait WorkspaceService {
    fn list(&self) -> Result<Vec<Workspace>>;

    /// Remove a workspace by name. Running workspaces need `force`.
    fn remove(&self, name: &str, force: bool) -> Result<()>;
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct Registry {
    #[serde(default)]
    workspaces: Vec<Workspace>,
}

/// File-backed workspace registry.
#[derive(Debug, Clone)]
pub struct RegistryService {
    path: PathBuf,
}

impl RegistryService {
    pub fn new(config_dir: &Path) -> Self {
        RegistryService {
            path: config_dir.join(REGISTRY_FILENAME),
        }
    }

    fn load(&self) -> Result<Registry> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Registry::default()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|source| Error::ConfigParse {
            path: self.path.display().to_string(),
            source,
        })
    }

    fn save(&self, registry: &Registry) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(registry).map_err(Error::ConfigSerialize)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

impl WorkspaceService for RegistryService {
    fn list(&self) -> Result<Vec<Workspace>> {
        Ok(self.load()?.workspaces)
    }

    fn remove(&self, name: &str, force: bool) -> Result<()> {
        let mut registry = self.load()?;
        let index = registry
            .workspaces
            .iter()
            .position(|w| w.name == name)
            .ok_or_else(|| Error::WorkspaceNotFound(name.to_string()))?;

        if registry.workspaces[index].running && !force {
            return Err(Error::WorkspaceRunning(name.to_string()));
        }

        let removed = registry.workspaces.remove(index);
        self.save(&registry)?;
        info!(name, id = %removed.id, force, "workspace removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn seeded(dir: &Path) -> RegistryService {
        let service = RegistryService::new(dir);
        let registry = Registry {
            workspaces: vec![
                Workspace {
                    id: "ws-1".into(),
                    name: "api".into(),
                    target: "local".into(),
                    projects: vec!["api".into()],
                    running: false,
                },
                Workspace {
                    id: "ws-2".into(),
                    name: "web".into(),
                    target: "local".into(),
                    projects: vec![],
                    running: true,
                },
            ],
        };
        service.save(&registry).unwrap();
        service
    }

    #[test]
    fn current_workspace_overrides_argument() {
        assert_eq!(
            resolve_name(Some("api".into()), Some("web".into())),
            Some("api".into())
        );
    }

    #[test]
    fn empty_current_workspace_is_ignored() {
        assert_eq!(resolve_name(Some(String::new()), Some("web".into())), Some("web".into()));
        assert_eq!(resolve_name(Some(String::new()), None), None);
        assert_eq!(resolve_name(None, None), None);
    }

    #[test]
    fn empty_registry_lists_nothing() {
        let dir = TempDir::new().unwrap();
        let service = RegistryService::new(dir.path());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn remove_stopped_workspace() {
        let dir = TempDir::new().unwrap();
        let service = seeded(dir.path());
        service.remove("api", false).unwrap();
        let names: Vec<_> = service.list().unwrap().into_iter().map(|w| w.name).collect();
        assert_eq!(names, vec!["web"]);
    }

    #[test]
    fn running_workspace_needs_force() {
        let dir = TempDir::new().unwrap();
        let service = seeded(dir.path());
        assert!(matches!(
            service.remove("web", false),
            Err(Error::WorkspaceRunning(_))
        ));
        service.remove("web", true).unwrap();
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn unknown_workspace_is_not_found() {
        let dir = TempDir::new().unwrap();
        let service = seeded(dir.path());
        assert!(matches!(
            service.remove("nope", true),
            Err(Error::WorkspaceNotFound(_))
        ));
    }
}
