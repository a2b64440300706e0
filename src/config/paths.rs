use std::fs;
use std::path::PathBuf;
#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use crate::error::Result;

/// Manages paths for Steamscout configuration
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root configuration directory (~/.steamscout)
    pub root: PathBuf,
    /// Configuration file path (~/.steamscout/config.toml)
    pub config_file: PathBuf,
}

impl Paths {
    /// Create a new Paths instance using the user's home directory
    pub fn new() -> Result<Self> {
        let home = std::env::var("HOME")?;
        Ok(Self::in_dir(PathBuf::from(home).join(".steamscout")))
    }

    /// Paths rooted at an explicit directory
    pub fn in_dir(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.toml"),
            root,
        }
    }

    /// Ensure the configuration directory exists with proper permissions
    pub fn ensure_dirs(&self) -> Result<()> {
        fs::create_dir_all(&self.root)?;

        // Owner only: the config holds the Steam API key
        #[cfg(unix)]
        {
            let perms = fs::Permissions::from_mode(0o700);
            fs::set_permissions(&self.root, perms)?;
        }

        Ok(())
    }

    /// Check if the config file exists
    pub fn config_exists(&self) -> bool {
        self.config_file.exists()
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::in_dir(PathBuf::from(".steamscout")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_in_dir_places_config_file() {
        let paths = Paths::in_dir(PathBuf::from("/tmp/scout"));
        assert_eq!(paths.config_file, PathBuf::from("/tmp/scout/config.toml"));
    }

    #[test]
    fn test_ensure_dirs_creates_root() {
        let temp_dir = TempDir::new().unwrap();
        let paths = Paths::in_dir(temp_dir.path().join("nested"));

        paths.ensure_dirs().unwrap();
        assert!(paths.root.exists());
        assert!(!paths.config_exists());
    }
}
