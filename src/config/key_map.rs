use anyhow::{anyhow, bail, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use itertools::Itertools;
use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};
use std::{collections::HashMap, ops::Not};

use super::Config;
use crate::system::command::{Command, CommandGroup};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }
}

impl From<KeyEvent> for Key {
    fn from(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event
                .modifiers
                .intersection(KeyModifiers::not(KeyModifiers::SHIFT)),
        }
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code_str = match self.code {
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::BackTab => "bktab".to_string(),
            KeyCode::Delete => "del".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            _ => "?".to_string(),
        };

        let alt_str = if self.modifiers.contains(KeyModifiers::ALT) {
            "A-"
        } else {
            ""
        };

        let ctrl_str = if self.modifiers.contains(KeyModifiers::CONTROL) {
            "C-"
        } else {
            ""
        };

        write!(f, "{ctrl_str}{alt_str}{code_str}")
    }
}

impl TryFrom<&str> for Key {
    type Error = anyhow::Error;

    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        let parts: Vec<&str> = s.split('-').collect();
        let key_str = parts
            .last()
            .ok_or_else(|| anyhow!("Key not recognized: \"{s}\""))?;
        let mut modifiers = KeyModifiers::empty();

        for part in &parts[..parts.len() - 1] {
            match *part {
                "C" | "c" => modifiers.extend(KeyModifiers::CONTROL),
                "A" | "a" => modifiers.extend(KeyModifiers::ALT),
                _ => bail!("Modifier \"{part}\" in key \"{s}\" not recognized"),
            }
        }

        let code = match *key_str {
            "enter" | "Enter" | "return" | "Return" => KeyCode::Enter,
            "esc" | "Esc" => KeyCode::Esc,
            "up" | "Up" => KeyCode::Up,
            "down" | "Down" => KeyCode::Down,
            "left" | "Left" => KeyCode::Left,
            "right" | "Right" => KeyCode::Right,
            "space" | "Space" => KeyCode::Char(' '),
            "bksp" | "backspace" | "Backspace" => KeyCode::Backspace,
            "tab" | "Tab" => KeyCode::Tab,
            "backtab" | "BackTab" => KeyCode::BackTab,

            // just assume that any string of length 1 should refer to that character
            s if s.len() == 1 => KeyCode::Char(
                s.chars()
                    .next()
                    .ok_or_else(|| anyhow!("Key not recognized: \"{s}\""))?,
            ),
            _ => bail!("Key not recognized: \"{s}\""),
        };

        Ok(Self { code, modifiers })
    }
}

fn command_from_str(value: &str) -> Result<Command> {
    match value {
        "nav_up" => Ok(Command::NavUp),
        "nav_down" => Ok(Command::NavDown),
        "nav_left" => Ok(Command::NavLeft),
        "nav_right" => Ok(Command::NavRight),
        "confirm" => Ok(Command::Confirm),
        "back" => Ok(Command::Back),
        "quit" => Ok(Command::Quit),
        "create_new" => Ok(Command::CreateNew),
        "delete" => Ok(Command::Delete),
        "prev_month" => Ok(Command::PrevMonth),
        "next_month" => Ok(Command::NextMonth),
        "goto_today" => Ok(Command::GotoToday),
        "show_summary" => Ok(Command::ShowSummary),
        _ => bail!("Command not recognized: \"{value}\""),
    }
}

#[derive(Debug, Clone)]
pub struct KeyMap {
    map: HashMap<Key, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        let map = [
            (KeyCode::Up, Command::NavUp),
            (KeyCode::Down, Command::NavDown),
            (KeyCode::Left, Command::NavLeft),
            (KeyCode::Right, Command::NavRight),
            (KeyCode::Enter, Command::Confirm),
            (KeyCode::Esc, Command::Back),
            (KeyCode::Char('q'), Command::Quit),
            (KeyCode::Char('n'), Command::CreateNew),
            (KeyCode::Char('D'), Command::Delete),
            (KeyCode::Char('['), Command::PrevMonth),
            (KeyCode::Char(']'), Command::NextMonth),
            (KeyCode::Char('t'), Command::GotoToday),
            (KeyCode::Char('s'), Command::ShowSummary),
        ]
        .map(|(code, command)| (Key::from(code), command))
        .into();

        Self { map }
    }
}

impl KeyMap {
    /// # Errors
    /// If the config contains a command or key name that isn't recognized.
    pub fn try_from_config(config: &Config) -> Result<Self> {
        let mut key_map = Self::default();

        for (command_str, key_str) in &config.keys {
            let command = command_from_str(command_str)?;
            let key = Key::try_from(key_str as &str)?;

            // remove existing binding for command
            key_map.map.retain(|_, cmd| cmd != &command);

            key_map.map.insert(key, command);
        }

        Ok(key_map)
    }

    #[must_use]
    pub fn get(&self, key: Key) -> Option<&Command> {
        self.map.get(&key)
    }

    /// Gets the command corresponding to a key based on the loaded keymap,
    /// making sure that the command is one of the commands that the currently-focused
    /// component will respond to
    #[must_use]
    pub fn get_filtered(&self, key: Key, available_commands: &[CommandGroup]) -> Option<Command> {
        let command = self.get(key)?;

        if available_commands
            .iter()
            .flat_map(|group| &group.commands)
            .contains(command)
        {
            Some(*command)
        } else {
            None
        }
    }

    fn rev_lookup(&self, command: Command) -> Option<Key> {
        self.map
            .iter()
            .find_map(|(key, com)| if command == *com { Some(key) } else { None })
            .copied()
    }

    fn command_to_key_str(&self, command: Command) -> String {
        self.rev_lookup(command)
            .map_or_else(|| "?".into(), |key| key.to_string())
    }

    /// Uses the current key configuration to build a string from a command group.
    /// Used for displaying key hints in the status bar.
    pub fn cmd_group_to_span<'a>(&self, group: &'a CommandGroup) -> Vec<Span<'a>> {
        let hint_style = Style::default();
        let key_hint: String = group
            .commands
            .iter()
            .map(|c| self.command_to_key_str(*c))
            .collect();

        vec![
            Span::styled(key_hint, hint_style.add_modifier(Modifier::BOLD)),
            Span::styled(": ", hint_style),
            Span::styled(group.name, hint_style.fg(Color::Gray)),
            Span::raw("  "),
        ]
    }
}

#[expect(clippy::unwrap_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_default_key_map() {
        let key_map = KeyMap::try_from_config(&Config::default()).unwrap();

        assert_eq!(
            key_map.get(Key::from(KeyCode::Up)),
            Some(&Command::NavUp)
        );
        assert_eq!(key_map.get(Key::from(KeyCode::Char('k'))), None);
    }

    #[test]
    fn create_overridden_key_map() {
        let config = Config {
            keys: [("nav_up".to_string(), "k".to_string())].into(),
            ..Default::default()
        };
        let key_map = KeyMap::try_from_config(&config).unwrap();

        assert_eq!(key_map.get(Key::from(KeyCode::Up)), None);
        assert_eq!(
            key_map.get(Key::from(KeyCode::Char('k'))),
            Some(&Command::NavUp)
        );
    }

    #[test]
    fn key_with_modifier() {
        let config = Config {
            keys: [("quit".to_string(), "C-c".to_string())].into(),
            ..Default::default()
        };
        let key_map = KeyMap::try_from_config(&config).unwrap();

        let key = Key {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
        };
        assert_eq!(key_map.get(key), Some(&Command::Quit));
        assert_eq!(key.to_string(), "C-c");
    }

    #[test]
    fn bad_config_files() {
        let config = Config {
            keys: [("not-a-command".to_string(), "k".to_string())].into(),
            ..Default::default()
        };
        assert!(KeyMap::try_from_config(&config).is_err());

        let config = Config {
            keys: [("nav_up".to_string(), "not-a-key".to_string())].into(),
            ..Default::default()
        };
        assert!(KeyMap::try_from_config(&config).is_err());
    }
}
