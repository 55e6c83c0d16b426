use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub outliner: OutlinerConfig,
    pub theme: ThemeConfig,
    pub tui: TuiConfig,
    /// Icon overrides keyed by object type name
    pub icons: HashMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutlinerConfig {
    /// Height of one row in pixels
    pub row_height: i32,
    /// Horizontal offset added per tree level
    pub indent: i32,
    /// Left edge of the fold arrow at level 0
    pub arrow_left: i32,
    /// Left edge of the icon at level 0
    pub icon_left: i32,
    /// Left edge of the label at level 0
    pub label_left: i32,
    /// Pointer y below which a drop lands above the row
    pub drop_above: i32,
    /// Pointer y above which a drop lands below the row
    pub drop_below: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Background of a hovered row
    pub button_over_color: String,
    /// Background of an idle row
    pub button_light_color: String,
    /// Background of the selected row
    pub selected_color: String,
    /// Color of drop position borders
    pub drop_border_color: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Terminal lines used to draw one row (3 gives above/inside/below zones)
    pub row_lines: u16,
    /// Capture the mouse for clicks and drag-and-drop
    pub mouse: bool,
    /// Maximum delay between two clicks of a double click
    pub double_click_ms: u64,
}

impl Default for OutlinerConfig {
    fn default() -> Self {
        Self {
            row_height: 20,
            indent: 20,
            arrow_left: 5,
            icon_left: 25,
            label_left: 45,
            drop_above: 5,
            drop_below: 15,
        }
    }
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            button_over_color: "#555555".to_string(),
            button_light_color: "#333333".to_string(),
            selected_color: "#2f5b8c".to_string(),
            drop_border_color: "#999999".to_string(),
        }
    }
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            row_lines: 3,
            mouse: true,
            double_click_ms: 400,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// An explicit path must exist. A missing default file yields the
    /// built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match Self::default_path() {
                Some(p) if p.exists() => p,
                _ => return Ok(Self::default()),
            },
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/scene-outliner/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("scene-outliner").join("config.toml"))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let o = &self.outliner;
        if o.row_height <= 0 {
            return Err(ConfigError::Invalid(
                "outliner.row_height must be positive".into(),
            ));
        }
        if o.indent < 0 {
            return Err(ConfigError::Invalid(
                "outliner.indent must not be negative".into(),
            ));
        }
        if !(0 <= o.drop_above && o.drop_above <= o.drop_below && o.drop_below <= o.row_height) {
            return Err(ConfigError::Invalid(
                "outliner drop zones must satisfy 0 <= drop_above <= drop_below <= row_height"
                    .into(),
            ));
        }
        if self.tui.row_lines == 0 {
            return Err(ConfigError::Invalid("tui.row_lines must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.outliner.row_height, 20);
        assert_eq!(config.tui.row_lines, 3);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[outliner]"));
        assert!(toml_str.contains("[theme]"));
    }

    #[test]
    fn default_drop_zones_split_the_row() {
        let config = OutlinerConfig::default();
        assert!(config.drop_above < config.drop_below);
        assert!(config.drop_below < config.row_height);
    }

    #[test]
    fn zero_row_lines_is_invalid() {
        let mut config = Config::default();
        config.tui.row_lines = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn inverted_drop_zones_are_invalid() {
        let mut config = Config::default();
        config.outliner.drop_above = 16;
        config.outliner.drop_below = 4;
        assert!(config.validate().is_err());
    }
}
