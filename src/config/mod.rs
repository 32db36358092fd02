use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

/// Lower bounds and defaults for game settings
pub mod limits {
    pub const MIN_TRIES: u32 = 1;
    pub const MIN_TIME_SECS: u32 = 5;
    pub const MIN_IMAGES: u32 = 1;

    pub const DEFAULT_TRIES: u32 = 3;
    pub const DEFAULT_TIME_SECS: u32 = 30;
    pub const DEFAULT_IMAGES: u32 = 5;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tries must be at least {min}, got {got}")]
    TooFewTries { min: u32, got: u32 },
    #[error("time per image must be at least {min}s, got {got}s")]
    TooLittleTime { min: u32, got: u32 },
    #[error("image count must be at least {min}, got {got}")]
    TooFewImages { min: u32, got: u32 },
}

/// Settings for one solo game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Guesses allowed per image
    pub tries: u32,
    /// Seconds allowed per image
    pub time: u32,
    /// Number of images to play
    pub images: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tries: limits::DEFAULT_TRIES,
            time: limits::DEFAULT_TIME_SECS,
            images: limits::DEFAULT_IMAGES,
        }
    }
}

impl GameConfig {
    pub fn new(tries: u32, time: u32, images: u32) -> Result<Self, ConfigError> {
        let config = Self {
            tries,
            time,
            images,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tries < limits::MIN_TRIES {
            return Err(ConfigError::TooFewTries {
                min: limits::MIN_TRIES,
                got: self.tries,
            });
        }
        if self.time < limits::MIN_TIME_SECS {
            return Err(ConfigError::TooLittleTime {
                min: limits::MIN_TIME_SECS,
                got: self.time,
            });
        }
        if self.images < limits::MIN_IMAGES {
            return Err(ConfigError::TooFewImages {
                min: limits::MIN_IMAGES,
                got: self.images,
            });
        }
        Ok(())
    }
}

fn default_tries() -> u32 {
    limits::DEFAULT_TRIES
}
fn default_time() -> u32 {
    limits::DEFAULT_TIME_SECS
}
fn default_images() -> u32 {
    limits::DEFAULT_IMAGES
}
fn default_verbose() -> bool {
    false
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// Puzzle catalog path
    #[serde(default)]
    pub puzzles: Option<PathBuf>,
    #[serde(default = "default_tries")]
    pub tries: u32,
    #[serde(default = "default_time")]
    pub time: u32,
    #[serde(default = "default_images")]
    pub images: u32,
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub viewport: Option<ViewportConfig>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            puzzles: None,
            tries: default_tries(),
            time: default_time(),
            images: default_images(),
            verbose: default_verbose(),
            viewport: None,
        }
    }
}

/// Size of the on-screen image viewer, for screen-space clicks
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ViewportConfig {
    pub width: f64,
    pub height: f64,
}

impl FileConfig {
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            tries: self.tries,
            time: self.time,
            images: self.images,
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("hidden-object.toml"));
    paths.push(PathBuf::from(".hidden-object.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("hidden-object").join("config.toml"));
        paths.push(config_dir.join("hidden-object.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".hidden-object.toml"));
    }

    paths
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config, GameConfig::new(3, 30, 5).unwrap());
    }

    #[test]
    fn test_minimums() {
        assert_eq!(
            GameConfig::new(0, 30, 5),
            Err(ConfigError::TooFewTries { min: 1, got: 0 })
        );
        assert_eq!(
            GameConfig::new(3, 4, 5),
            Err(ConfigError::TooLittleTime { min: 5, got: 4 })
        );
        assert_eq!(
            GameConfig::new(3, 30, 0),
            Err(ConfigError::TooFewImages { min: 1, got: 0 })
        );
        assert!(GameConfig::new(1, 5, 1).is_ok());
    }

    #[test]
    fn test_file_config_partial() {
        let config: FileConfig = toml::from_str(
            r#"
            puzzles = "data/puzzles.json"
            tries = 5

            [viewport]
            width = 1280.0
            height = 720.0
            "#,
        )
        .unwrap();

        assert_eq!(config.puzzles, Some(PathBuf::from("data/puzzles.json")));
        assert_eq!(config.game_config(), GameConfig::new(5, 30, 5).unwrap());
        assert!(!config.verbose);
        assert_eq!(
            config.viewport,
            Some(ViewportConfig {
                width: 1280.0,
                height: 720.0
            })
        );
    }

    #[test]
    fn test_file_config_empty() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config.game_config(), GameConfig::default());
        assert!(config.puzzles.is_none());
    }
}
