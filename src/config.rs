use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::figures::FigureDir;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Figures directory; `paper/figures` at the crate root when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl OutputConfig {
    pub fn figure_dir(&self) -> FigureDir {
        match &self.dir {
            Some(dir) => FigureDir::new(dir.clone()),
            None => FigureDir::default_location(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FigureConfig {
    #[serde(default = "FigureConfig::default_width_in")]
    pub width_in: f64,
    #[serde(default = "FigureConfig::default_height_in")]
    pub height_in: f64,
    #[serde(default = "FigureConfig::default_dpi")]
    pub dpi: u32,
}

impl FigureConfig {
    fn default_width_in() -> f64 {
        7.0
    }
    fn default_height_in() -> f64 {
        4.0
    }
    fn default_dpi() -> u32 {
        300
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_in: Self::default_width_in(),
            height_in: Self::default_height_in(),
            dpi: Self::default_dpi(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ExportConfig {
    /// Write the plotted data as `<stem>.csv` next to each image.
    #[serde(default)]
    pub write_csv: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct PlotConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub figure: FigureConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

impl PlotConfig {
    /// Default config text: section headers kept, every key commented out.
    fn commented_toml(&self) -> Option<String> {
        let text = toml::to_string_pretty(self).ok()?;
        let mut out = String::with_capacity(text.len() + 32);
        for line in text.lines() {
            let key = line.trim();
            if !key.is_empty() && !key.starts_with('[') {
                out.push_str("# ");
            }
            out.push_str(line);
            out.push('\n');
        }
        Some(out)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path_obj = path.as_ref();
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        warn!(
                            "Failed to parse config {}: {err}. Using defaults.",
                            path_obj.display()
                        );
                    }
                },
                Err(err) => {
                    warn!(
                        "Failed to read config {}: {err}. Using defaults.",
                        path_obj.display()
                    );
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default();
        if let Some(commented) = default_cfg.commented_toml() {
            if let Err(err) = fs::write(path_obj, commented) {
                warn!(
                    "Failed to write default config to {}: {err}",
                    path_obj.display()
                );
            }
        } else {
            warn!("Failed to serialize default config; continuing with defaults");
        }
        default_cfg
    }
}
