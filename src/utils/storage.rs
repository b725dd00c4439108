use anyhow::{anyhow, Context, Result};
use std::{
    fmt::Debug,
    fs,
    path::{Path, PathBuf},
};

use crate::{
    app::PersistedApp,
    config::Config,
    model::{entry::LogEntry, profile::UserProfile},
};

const APP_DIR_NAME: &str = "daybook";
const PROFILE_FILE_NAME: &str = "profile.json";
const ENTRIES_FILE_NAME: &str = "entries.json";
const LAST_SESSION_FILE_NAME: &str = "last-session.json";
const CONFIG_FILE_NAME: &str = "config.toml";

// NOTE: stole this from `gitui`
pub fn get_app_config_path() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join(".config"))
    } else {
        dirs::config_dir()
    }
    .ok_or_else(|| anyhow!("failed to find os config dir."))?;

    path.push(APP_DIR_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}

pub fn get_app_data_path() -> Result<PathBuf> {
    let mut path = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|h| h.join(".local").join("share"))
    } else {
        dirs::data_local_dir()
    }
    .ok_or_else(|| anyhow!("failed to find os local data dir."))?;

    path.push(APP_DIR_NAME);
    fs::create_dir_all(&path)?;
    Ok(path)
}

pub trait Storage: Debug {
    fn read_profile(&self) -> Result<Option<UserProfile>>;
    fn write_profile(&self, profile: &UserProfile) -> Result<()>;
    fn read_entries(&self) -> Result<Vec<LogEntry>>;
    fn write_entries(&self, entries: &[LogEntry]) -> Result<()>;
    fn write_last_session(&self, persisted_app: &PersistedApp) -> Result<()>;
    fn read_last_session(&self) -> Result<PersistedApp>;
    fn read_config(&self) -> Result<Config>;
}

#[derive(Debug, Clone, Default)]
pub struct FileStorage {
    data_dir: PathBuf,
    config_dir: PathBuf,
}

impl Storage for FileStorage {
    fn read_profile(&self) -> Result<Option<UserProfile>> {
        if !self.data_dir.join(PROFILE_FILE_NAME).exists() {
            return Ok(None);
        }

        let file = self.read_from_data_dir(PROFILE_FILE_NAME.into())?;
        let profile =
            serde_json::from_str(&file).context("Error while parsing `profile.json`")?;
        Ok(Some(profile))
    }

    fn write_profile(&self, profile: &UserProfile) -> Result<()> {
        self.write_to_data_dir(
            PROFILE_FILE_NAME.into(),
            &serde_json::to_string_pretty(profile)?,
        )
    }

    fn read_entries(&self) -> Result<Vec<LogEntry>> {
        if !self.data_dir.join(ENTRIES_FILE_NAME).exists() {
            return Ok(vec![]);
        }

        let file = self.read_from_data_dir(ENTRIES_FILE_NAME.into())?;
        serde_json::from_str(&file).context("Error while parsing `entries.json`")
    }

    fn write_entries(&self, entries: &[LogEntry]) -> Result<()> {
        self.write_to_data_dir(
            ENTRIES_FILE_NAME.into(),
            &serde_json::to_string_pretty(entries)?,
        )
    }

    fn write_last_session(&self, persisted_app: &PersistedApp) -> Result<()> {
        let json = serde_json::to_string_pretty(persisted_app)?;
        self.write_to_data_dir(LAST_SESSION_FILE_NAME.into(), &json)?;
        Ok(())
    }

    fn read_last_session(&self) -> Result<PersistedApp> {
        let file = self
            .read_from_data_dir(LAST_SESSION_FILE_NAME.into())
            .context("Reading `last-session.json`")?;

        let session = serde_json::from_str::<PersistedApp>(&file)
            .context("Error while parsing `last-session.json`")?;

        Ok(session)
    }

    fn read_config(&self) -> Result<Config> {
        let config_path = Path::new(&self.config_dir).join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            fs::write(
                &config_path,
                include_str!("../../assets/default-config.toml"),
            )?;
        }

        let file = self.read_from_config_dir(CONFIG_FILE_NAME.into())?;
        Config::read_from_string(&file)
    }
}

impl FileStorage {
    pub fn init() -> Result<Self> {
        Ok(Self {
            data_dir: get_app_data_path()?,
            config_dir: get_app_config_path()?,
        })
    }

    fn read_from_config_dir(&self, path_from_config_dir: PathBuf) -> Result<String> {
        let file_path = Path::new(&self.config_dir).join(path_from_config_dir);
        let file = fs::read_to_string(file_path)?;
        Ok(file)
    }

    fn read_from_data_dir(&self, path_from_data_dir: PathBuf) -> Result<String> {
        let file_path = Path::new(&self.data_dir).join(path_from_data_dir);
        let file = fs::read_to_string(file_path)?;
        Ok(file)
    }

    fn write_to_data_dir(&self, path_from_data_dir: PathBuf, data: &str) -> Result<()> {
        let file_path = Path::new(&self.data_dir).join(path_from_data_dir);
        fs::write(file_path, data)?;
        Ok(())
    }
}
