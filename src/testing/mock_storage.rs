use crate::{
    app::PersistedApp,
    config::Config,
    model::{entry::LogEntry, profile::UserProfile},
    utils::storage::Storage,
};
use anyhow::{anyhow, Result};

#[derive(Debug, Default)]
pub struct MockStorage {
    pub profile: Option<UserProfile>,
    pub entries: Vec<LogEntry>,
    pub persisted_app: Option<PersistedApp>,
    pub config: Config,
}

impl Storage for MockStorage {
    fn read_profile(&self) -> Result<Option<UserProfile>> {
        Ok(self.profile.clone())
    }

    fn write_profile(&self, _profile: &UserProfile) -> Result<()> {
        Ok(())
    }

    fn read_entries(&self) -> Result<Vec<LogEntry>> {
        Ok(self.entries.clone())
    }

    fn write_entries(&self, _entries: &[LogEntry]) -> Result<()> {
        Ok(())
    }

    fn write_last_session(&self, _persisted_app: &PersistedApp) -> Result<()> {
        Ok(())
    }

    fn read_last_session(&self) -> Result<PersistedApp> {
        self.persisted_app
            .clone()
            .ok_or_else(|| anyhow!("No persisted app in mock"))
    }

    fn read_config(&self) -> Result<Config> {
        Ok(self.config.clone())
    }
}
