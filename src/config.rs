use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use self::color_map::{ColorMap, RawColorMap};

pub mod color_map;
pub mod key_map;

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct RawConfig {
    #[serde(default)]
    pub keys: HashMap<String, String>,

    #[serde(default)]
    pub colors: RawColorMap,
}

#[derive(Debug, Default, Clone)]
pub struct Config {
    pub keys: HashMap<String, String>,
    pub color_map: ColorMap,
}

impl Config {
    /// # Errors
    /// If the string isn't valid toml, or names a color or palette key that
    /// isn't recognized.
    pub fn read_from_string(value: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(value)?;
        let color_map = ColorMap::try_from(raw.colors)?;

        Ok(Self {
            keys: raw.keys,
            color_map,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::color_map::ColorKey;
    use ratatui::style::Color;

    #[test]
    fn parse_full_config() {
        let config = Config::read_from_string(
            r##"
            [keys]
            quit = "x"

            [colors.theme]
            calendar_today = "#336699"
            "##,
        )
        .expect("config should parse");

        assert_eq!(config.keys.get("quit"), Some(&"x".to_string()));
        assert_eq!(
            config.color_map.get(&ColorKey::CalendarToday),
            Color::Rgb(0x33, 0x66, 0x99)
        );
    }

    #[test]
    fn empty_config_is_fine() {
        let config = Config::read_from_string("").expect("empty config should parse");
        assert!(config.keys.is_empty());
    }
}
