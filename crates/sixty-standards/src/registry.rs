//! Profile registry: built-in profiles plus custom TOML profiles.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::StandardsError;
use crate::loaders::{load_builtin, load_profile_file};
use crate::profile::{BuiltinProfile, IntegrationProfile};

/// Environment variable naming a directory of extra `*.toml` profiles.
pub const PROFILE_DIR_ENV_VAR: &str = "SIXTY_PROFILE_DIR";

/// Profiles addressable by case-insensitive id.
#[derive(Debug, Clone, Default)]
pub struct ProfileRegistry {
    profiles: BTreeMap<String, IntegrationProfile>,
}

impl ProfileRegistry {
    /// Registry holding every embedded profile.
    pub fn builtin() -> Result<Self, StandardsError> {
        let mut registry = Self::default();
        for builtin in BuiltinProfile::ALL {
            registry.insert(load_builtin(builtin)?);
        }
        Ok(registry)
    }

    /// Built-in profiles plus those found in [`PROFILE_DIR_ENV_VAR`].
    pub fn from_env() -> Result<Self, StandardsError> {
        let mut registry = Self::builtin()?;
        if let Some(dir) = profile_dir_from_env() {
            registry.load_dir(&dir)?;
        }
        Ok(registry)
    }

    /// Adds a profile. A profile with the same id is replaced.
    pub fn insert(&mut self, profile: IntegrationProfile) {
        let key = profile.id.to_lowercase();
        if self.profiles.contains_key(&key) {
            warn!(profile = %profile.id, "replacing existing profile");
        }
        self.profiles.insert(key, profile);
    }

    /// Loads every `*.toml` file in `dir`, in file-name order.
    ///
    /// Returns the number of profiles loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, StandardsError> {
        let entries = fs::read_dir(dir).map_err(|e| StandardsError::io(dir, e))?;
        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StandardsError::io(dir, e))?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "toml") {
                paths.push(path);
            }
        }
        paths.sort();
        for path in &paths {
            self.insert(load_profile_file(path)?);
        }
        info!(dir = %dir.display(), count = paths.len(), "loaded custom profiles");
        Ok(paths.len())
    }

    pub fn get(&self, id: &str) -> Option<&IntegrationProfile> {
        self.profiles.get(&id.trim().to_lowercase())
    }

    pub fn ids(&self) -> Vec<&str> {
        self.profiles.values().map(|p| p.id.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &IntegrationProfile> {
        self.profiles.values()
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

fn profile_dir_from_env() -> Option<PathBuf> {
    std::env::var_os(PROFILE_DIR_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}
