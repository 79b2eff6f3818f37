use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;
use crate::math::Rgb;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Editor settings; every field has a default so partial files are valid
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub window_width: u32,
    pub window_height: u32,
    /// Share of the window width taken by the primitive list
    pub sidebar_fraction: f32,
    pub camera_position: [f32; 3],
    pub fov_degrees: f32,
    pub highlight_color: [f32; 3],
    pub background_color: [f32; 3],
    pub seed: Option<u64>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 800,
            sidebar_fraction: 0.3,
            camera_position: [5.0, 5.0, 5.0],
            fov_degrees: 75.0,
            highlight_color: Rgb::RED.to_array(),
            background_color: Rgb::WHITE.to_array(),
            seed: None,
        }
    }
}

impl EditorConfig {
    pub fn from_json(path: &Path, text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(path, &text)
    }

    /// File settings (if any) with command-line overrides applied
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => {
                log::info!("loading config from {}", path.display());
                Self::load(path)?
            }
            None => Self::default(),
        };

        if let Some(seed) = cli.seed {
            config.seed = Some(seed);
        }
        if let Some(width) = cli.width {
            config.window_width = width;
        }
        if let Some(height) = cli.height {
            config.window_height = height;
        }
        Ok(config)
    }

    pub fn highlight(&self) -> Rgb {
        Rgb::from_array(self.highlight_color)
    }

    pub fn background(&self) -> Rgb {
        Rgb::from_array(self.background_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = EditorConfig::from_json(Path::new("t.json"), r#"{ "seed": 7, "fov_degrees": 60 }"#)
            .expect("valid config");
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.fov_degrees, 60.0);
        assert_eq!(config.sidebar_fraction, 0.3);
        assert_eq!(config.camera_position, [5.0, 5.0, 5.0]);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let err = EditorConfig::from_json(Path::new("t.json"), r#"{ "colour": 1 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("t.json"));
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli {
            seed: Some(3),
            width: Some(640),
            ..Cli::default()
        };
        let config = EditorConfig::from_cli(&cli).expect("no file to read");
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.window_width, 640);
        assert_eq!(config.window_height, 800);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EditorConfig::load(Path::new("/nonexistent/scene-editor.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_colors() {
        let config = EditorConfig::default();
        assert_eq!(config.highlight(), Rgb::RED);
        assert_eq!(config.background(), Rgb::WHITE);
    }
}
