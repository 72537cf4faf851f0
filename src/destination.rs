use std::fs;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use log::{debug, info};

use crate::config::PathsConfig;
use crate::error::{Error, Result};
use crate::model::DestinationMode;

pub const GLOBAL_APPLICATIONS_DIR: &str = "/usr/share/applications";
pub const LOCAL_APPLICATIONS_SUBDIR: &str = ".local/share/applications";

/// The two candidate directories for generated entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destinations {
    pub local: PathBuf,
    pub global: PathBuf,
}

/// A resolved target directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Destination {
    pub mode: DestinationMode,
    pub dir: PathBuf,
    pub requires_privilege: bool,
}

impl Destinations {
    /// Standard locations, with any overrides from the config applied. The
    /// home directory is only looked up when no local override is set.
    pub fn discover(paths: &PathsConfig) -> Result<Self> {
        let local = match &paths.local_dir {
            Some(dir) => dir.clone(),
            None => {
                let base_dirs = BaseDirs::new().ok_or_else(|| Error::Destination {
                    mode: DestinationMode::Local,
                    cause: "could not determine the home directory".to_string(),
                })?;
                base_dirs.home_dir().join(LOCAL_APPLICATIONS_SUBDIR)
            }
        };
        let global = paths
            .global_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(GLOBAL_APPLICATIONS_DIR));

        debug!("destinations: local={:?} global={:?}", local, global);
        Ok(Self { local, global })
    }

    pub fn resolve(&self, mode: DestinationMode) -> Destination {
        match mode {
            DestinationMode::Local => Destination {
                mode,
                dir: self.local.clone(),
                requires_privilege: false,
            },
            DestinationMode::Global => Destination {
                mode,
                dir: self.global.clone(),
                requires_privilege: true,
            },
        }
    }
}

impl Destination {
    /// Fails when the destination needs privileges the process does not have.
    pub fn preflight(&self, elevated: bool) -> Result<()> {
        if self.requires_privilege && !elevated {
            return Err(Error::Destination {
                mode: self.mode,
                cause: format!(
                    "installing into {} requires root privileges; re-run with sudo or use --local",
                    self.dir.display()
                ),
            });
        }
        Ok(())
    }

    /// Creates the directory, and any missing parents.
    pub fn ensure_dir(&self) -> Result<&Path> {
        if !self.dir.is_dir() {
            info!("Creating {:?}", self.dir);
            fs::create_dir_all(&self.dir).map_err(|e| Error::Destination {
                mode: self.mode,
                cause: format!("cannot create {}: {}", self.dir.display(), e),
            })?;
        }
        Ok(&self.dir)
    }

    pub fn target_for(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

/// Whether the effective user is root.
pub fn has_elevated_privileges() -> bool {
    nix::unistd::geteuid().is_root()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn fixed(root: &Path) -> Destinations {
        Destinations::discover(&PathsConfig {
            local_dir: Some(root.join("local")),
            global_dir: Some(root.join("global")),
        })
        .unwrap()
    }

    #[test]
    fn modes_map_to_directories() {
        let dir = tempdir().unwrap();
        let dests = fixed(dir.path());

        let local = dests.resolve(DestinationMode::Local);
        assert_eq!(local.dir, dir.path().join("local"));
        assert!(!local.requires_privilege);

        let global = dests.resolve(DestinationMode::Global);
        assert_eq!(global.dir, dir.path().join("global"));
        assert!(global.requires_privilege);
    }

    #[test]
    fn default_global_dir() {
        let dests = Destinations::discover(&PathsConfig {
            local_dir: Some(PathBuf::from("/tmp/x")),
            global_dir: None,
        })
        .unwrap();
        assert_eq!(dests.global, PathBuf::from("/usr/share/applications"));
    }

    #[test]
    fn default_local_dir_is_under_home() {
        let Some(base) = BaseDirs::new() else { return };
        let dests = Destinations::discover(&PathsConfig::default()).unwrap();
        assert_eq!(dests.local, base.home_dir().join(".local/share/applications"));
    }

    #[test]
    fn preflight_rejects_unprivileged_global() {
        let dir = tempdir().unwrap();
        let global = fixed(dir.path()).resolve(DestinationMode::Global);
        let err = global.preflight(false).unwrap_err();
        assert!(matches!(err, Error::Destination { mode: DestinationMode::Global, .. }));
        assert!(global.preflight(true).is_ok());

        let local = fixed(dir.path()).resolve(DestinationMode::Local);
        assert!(local.preflight(false).is_ok());
    }

    #[test]
    fn ensure_dir_creates_parents() {
        let dir = tempdir().unwrap();
        let dest = Destination {
            mode: DestinationMode::Local,
            dir: dir.path().join("a/b/applications"),
            requires_privilege: false,
        };
        assert_eq!(dest.ensure_dir().unwrap(), dir.path().join("a/b/applications"));
        assert!(dest.dir.is_dir());
        // second call is a no-op
        dest.ensure_dir().unwrap();
    }

    #[test]
    fn ensure_dir_failure_is_a_destination_error() {
        let dir = tempdir().unwrap();
        let blocker = dir.path().join("file");
        fs::write(&blocker, "").unwrap();
        let dest = Destination {
            mode: DestinationMode::Local,
            dir: blocker.join("applications"),
            requires_privilege: false,
        };
        assert!(matches!(dest.ensure_dir(), Err(Error::Destination { .. })));
    }
}
