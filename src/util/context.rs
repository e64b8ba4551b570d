//! Global context for Berth operations.
//!
//! Provides centralized access to the working directory, configuration
//! paths, and the detected host machine.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::machine::{Machine, UnsupportedMachine};
use crate::core::manifest::{find_manifest, ManifestError};
use crate::util::config::{global_config_path, home_dir, load_config, Config};

/// Global context containing paths and environment.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Global configuration file (~/.berth/config.toml), if a home exists
    global_config: Option<PathBuf>,

    /// Manifest search does not go above this directory
    ceiling: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a new GlobalContext for the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;

        Ok(GlobalContext {
            cwd,
            global_config: global_config_path(),
            ceiling: home_dir(),
        })
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the global configuration file path.
    pub fn global_config_path(&self) -> Option<&Path> {
        self.global_config.as_deref()
    }

    /// Find Berth.toml starting from cwd and searching upward, stopping at
    /// the home directory when cwd is inside it.
    pub fn find_manifest(&self) -> Result<PathBuf, ManifestError> {
        find_manifest(&self.cwd, self.ceiling.as_deref())
    }

    /// Detect the machine this process runs on.
    pub fn host_machine(&self) -> Result<Machine, UnsupportedMachine> {
        Machine::host()
    }

    /// Load global config merged with the project config in `berth_dir`.
    pub fn load_config(&self, berth_dir: &Path) -> Config {
        load_config(self.global_config_path(), &berth_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn context(cwd: &Path, ceiling: Option<&Path>) -> GlobalContext {
        GlobalContext {
            cwd: cwd.to_path_buf(),
            global_config: None,
            ceiling: ceiling.map(Path::to_path_buf),
        }
    }

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.global_config_path().map_or(true, |p| p.ends_with("config.toml")));
    }

    #[test]
    fn test_find_manifest() {
        let tmp = TempDir::new().unwrap();
        let manifest = tmp.path().join("Berth.toml");
        std::fs::write(&manifest, "[package]\nname = \"test\"\n").unwrap();

        let ctx = context(tmp.path(), Some(tmp.path()));
        assert_eq!(ctx.find_manifest().ok(), Some(manifest));
    }

    #[test]
    fn test_find_manifest_stops_at_ceiling() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::write(tmp.path().join("Berth.toml"), "[package]\nname = \"test\"\n").unwrap();

        assert!(context(&home, None).find_manifest().is_ok());

        let err = context(&home, Some(&home)).find_manifest().unwrap_err();
        assert!(matches!(err, ManifestError::NotFound { .. }));
    }

    #[test]
    fn test_load_project_config() {
        let tmp = TempDir::new().unwrap();
        let berth_dir = tmp.path().join(".berth");
        std::fs::create_dir_all(&berth_dir).unwrap();
        std::fs::write(berth_dir.join("config.toml"), "[snippet]\nfile = \"x.conf\"\n").unwrap();

        let ctx = context(tmp.path(), None);
        let config = ctx.load_config(&berth_dir);
        assert_eq!(config.snippet_file(), Path::new("x.conf"));
    }
}
