//! JSON file holding the user name and saved locations.
//!
//! Persistence is best effort: reads fall back to empty state and write
//! failures are logged and dropped.

use serde::{Deserialize, Serialize};
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::model::{Location, SavedLocations, UserProfile};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StateFile {
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    user_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored profile and locations. Any failure yields empty state.
    pub fn load(&self) -> (UserProfile, SavedLocations) {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no state file yet");
                return Default::default();
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "could not read state file");
                return Default::default();
            }
        };

        match serde_json::from_str::<StateFile>(&contents) {
            Ok(state) => {
                let profile = UserProfile { name: state.user_name };
                (profile, state.locations.into_iter().collect())
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring malformed state file");
                Default::default()
            }
        }
    }

    /// Overwrite the file with `profile` and `locations`. Errors are logged, not returned.
    pub fn save(&self, profile: &UserProfile, locations: &SavedLocations) {
        if let Err(e) = self.try_save(profile, locations) {
            tracing::warn!(path = %self.path.display(), error = %e, "could not save state file");
        }
    }

    fn try_save(&self, profile: &UserProfile, locations: &SavedLocations) -> io::Result<()> {
        let state = StateFile {
            locations: locations.iter().cloned().collect(),
            user_name: profile.name.clone(),
        };
        let json = serde_json::to_string(&state)?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), locations = locations.len(), "saved state");
        Ok(())
    }
}
