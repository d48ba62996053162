use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::color::PaletteName;

/// Upper bound on the requested ticks per axis.
pub const MAX_TICK_COUNT: usize = 100;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed config")]
    Parse(#[from] serde_json::Error),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Space around the graph area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Margins {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn uniform(m: f64) -> Self {
        Self {
            left: m,
            right: m,
            top: m,
            bottom: m,
        }
    }
}

/// Everything that shapes the rendered chart. Every field has a default, so
/// a config file only needs to name what it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub screen: Size,
    pub margins: Margins,
    /// Lower bound of the salary (log) axis.
    pub salary_floor: f64,
    pub mark_radius: f64,
    pub tick_count: usize,
    pub x_title: String,
    pub y_title: String,
    pub title: String,
    /// Departments listed in the legend, top to bottom.
    pub legend_areas: Vec<String>,
    pub legend_spacing: f64,
    pub legend_swatch: f64,
    pub palette: PaletteName,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            screen: Size {
                width: 800.0,
                height: 600.0,
            },
            margins: Margins::uniform(50.0),
            salary_floor: 20000.0,
            mark_radius: 3.0,
            tick_count: crate::scale::DEFAULT_TICK_COUNT,
            x_title: "Seniority".to_string(),
            y_title: "Salary".to_string(),
            title: "Seniority vs Salary".to_string(),
            legend_areas: ["Janitorial", "Production", "Management", "Executive"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            legend_spacing: 20.0,
            legend_swatch: 10.0,
            palette: PaletteName::default(),
        }
    }
}

impl ChartConfig {
    /// Read a JSON config file and validate it.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: ChartConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.salary_floor > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "salary_floor must be positive for a log axis, got {}",
                self.salary_floor
            )));
        }
        if self.tick_count > MAX_TICK_COUNT {
            return Err(ConfigError::Invalid(format!(
                "tick_count must be at most {MAX_TICK_COUNT}, got {}",
                self.tick_count
            )));
        }
        let graph_w = self.screen.width - self.margins.left - self.margins.right;
        let graph_h = self.screen.height - self.margins.top - self.margins.bottom;
        if graph_w <= 0.0 || graph_h <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "margins leave no room for the graph ({graph_w}x{graph_h})"
            )));
        }
        Ok(())
    }
}
