//! Settings loaded from TOML
//!
//! Read from ~/.config/blockfall/settings.toml (or platform equivalent).
//! Settings are never written back.

use crate::board::{BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::{GameConfig, DEFAULT_SPEED};
use directories::ProjectDirs;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Game settings
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Keybindings
    pub keys: KeyBindings,
    /// Board and speed
    pub gameplay: GameplaySettings,
}

/// Key bindings (stored as strings for easy editing)
/// Each action can have one or more keys bound to it
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_left: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub move_right: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub soft_drop: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub rotate: Vec<String>,
    #[serde(deserialize_with = "deserialize_keys")]
    pub quit: Vec<String>,
}

/// Deserialize keys as either a single string or array of strings
fn deserialize_keys<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};

    struct KeysVisitor;

    impl<'de> Visitor<'de> for KeysVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("a string or array of strings")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![v.to_string()])
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: de::SeqAccess<'de>,
        {
            let mut keys = Vec::new();
            while let Some(key) = seq.next_element::<String>()? {
                keys.push(key);
            }
            Ok(keys)
        }
    }

    deserializer.deserialize_any(KeysVisitor)
}

/// Gameplay settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GameplaySettings {
    /// Board width in cells
    pub width: usize,
    /// Board height in cells
    pub height: usize,
    /// Gravity ticks per second
    pub speed: u32,
    /// Fixed piece sequence; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_left: vec!["Left".to_string()],
            move_right: vec!["Right".to_string()],
            soft_drop: vec!["Down".to_string()],
            rotate: vec!["Up".to_string(), "z".to_string()],
            quit: vec!["q".to_string(), "Esc".to_string()],
        }
    }
}

impl Default for GameplaySettings {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            speed: DEFAULT_SPEED,
            seed: None,
        }
    }
}

impl GameplaySettings {
    /// Board and speed for a new game, with unusable values replaced by defaults
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            width: self.width,
            height: self.height,
            speed: self.speed,
        }
        .validated()
    }
}

impl Settings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "blockfall", "blockfall")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the settings file path
    pub fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("settings.toml"))
    }

    /// Load settings from file, or fall back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("could not determine config directory, using default settings");
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_toml_str(&contents) {
                Ok(settings) => {
                    info!(path = %path.display(), "loaded settings");
                    settings
                }
                Err(e) => {
                    warn!(path = %path.display(), "invalid settings, using defaults: {}", e);
                    Self::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no settings file, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(path = %path.display(), "could not read settings: {}", e);
                Self::default()
            }
        }
    }

    /// Parse settings from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings.gameplay.width, 10);
        assert_eq!(settings.gameplay.height, 20);
        assert_eq!(settings.gameplay.speed, 2);
        assert_eq!(settings.gameplay.seed, None);
        assert_eq!(settings.keys.rotate, vec!["Up", "z"]);
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let settings = Settings::from_toml_str(
            r#"
            [gameplay]
            speed = 5
            seed = 42

            [keys]
            move_left = "a"
            rotate = ["w", "Up"]
            "#,
        )
        .unwrap();
        assert_eq!(settings.gameplay.speed, 5);
        assert_eq!(settings.gameplay.seed, Some(42));
        assert_eq!(settings.gameplay.width, 10);
        assert_eq!(settings.keys.move_left, vec!["a"]);
        assert_eq!(settings.keys.rotate, vec!["w", "Up"]);
        assert_eq!(settings.keys.move_right, vec!["Right"]);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Settings::from_toml_str("[gameplay]\nspeed = \"fast\"").is_err());
        assert!(Settings::from_toml_str("[keys]\nquit = 3").is_err());
    }

    #[test]
    fn test_game_config_replaces_bad_values() {
        let gameplay = GameplaySettings {
            width: 2,
            height: 30,
            speed: 0,
            seed: None,
        };
        let config = gameplay.game_config();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 30);
        assert_eq!(config.speed, 2);
    }

    #[test]
    fn test_game_config_caps_huge_board() {
        let settings = Settings::from_toml_str("[gameplay]\nwidth = 40000\nheight = 4").unwrap();
        let config = settings.gameplay.game_config();
        assert_eq!(config.width, 10);
        assert_eq!(config.height, 4);
    }

    #[test]
    fn test_game_config_passes_good_values() {
        let gameplay = GameplaySettings {
            width: 12,
            height: 24,
            speed: 4,
            seed: Some(1),
        };
        assert_eq!(
            gameplay.game_config(),
            GameConfig {
                width: 12,
                height: 24,
                speed: 4
            }
        );
    }
}
