use crate::utils::{
    storage::{FileStorage, Storage},
    units::UnitSystem,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, rc::Rc};

#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub units: UnitSystem,
}

/// Shared handle to the stored user profile. Cloned into every component
/// that needs to know the display name or preferred unit system.
#[derive(Debug, Clone)]
pub struct ProfileManager {
    profile: Rc<RefCell<Option<UserProfile>>>,
    storage: Rc<dyn Storage>,
}

impl Default for ProfileManager {
    fn default() -> Self {
        Self {
            profile: Rc::default(),
            storage: Rc::new(FileStorage::default()),
        }
    }
}

impl ProfileManager {
    pub fn new(storage: Rc<dyn Storage>) -> Self {
        Self {
            profile: Rc::default(),
            storage,
        }
    }

    /// Reads the profile from storage and caches it. `Ok(None)` means no
    /// profile has been stored yet, ie. setup hasn't been completed.
    ///
    /// # Errors
    /// If the stored profile exists but cannot be read or parsed.
    pub fn load(&self) -> Result<Option<UserProfile>> {
        let profile = self.storage.read_profile()?;
        self.profile.borrow_mut().clone_from(&profile);
        Ok(profile)
    }

    #[must_use]
    pub fn current(&self) -> Option<UserProfile> {
        self.profile.borrow().clone()
    }

    /// The preferred unit system, defaulting to metric until a profile has
    /// been loaded or saved.
    #[must_use]
    pub fn units(&self) -> UnitSystem {
        self.profile
            .borrow()
            .as_ref()
            .map_or_else(UnitSystem::default, |p| p.units)
    }

    /// # Errors
    /// If something goes wrong while writing to the filesystem.
    pub fn set(&self, profile: UserProfile) -> Result<()> {
        self.storage.write_profile(&profile)?;
        *self.profile.borrow_mut() = Some(profile);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::mock_storage::MockStorage;

    #[test]
    fn load_caches_the_stored_profile() {
        let profile = UserProfile {
            name: "Frankie".to_string(),
            units: UnitSystem::Imperial,
        };
        let storage = MockStorage {
            profile: Some(profile.clone()),
            ..Default::default()
        };
        let manager = ProfileManager::new(Rc::new(storage));

        assert_eq!(manager.units(), UnitSystem::Metric);

        let loaded = manager.load().expect("mock storage reads should succeed");
        assert_eq!(loaded, Some(profile));
        assert_eq!(manager.units(), UnitSystem::Imperial);
    }

    #[test]
    fn set_updates_the_cache() {
        let manager = ProfileManager::new(Rc::new(MockStorage::default()));

        manager
            .set(UserProfile {
                name: "Sam".to_string(),
                units: UnitSystem::Imperial,
            })
            .expect("mock storage writes should succeed");

        assert_eq!(manager.units(), UnitSystem::Imperial);
        assert_eq!(manager.current().map(|p| p.name), Some("Sam".to_string()));
    }
}
