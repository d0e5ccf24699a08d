use crate::core::insights::InsightOptions;
use crate::core::window::{DEFAULT_WINDOW_DAYS, DateWindow, MAX_WINDOW_DAYS};
use anyhow::{Context, Result, ensure};
use chrono::NaiveDate;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    #[serde(default = "default_window_days")]
    pub days: usize,
    /// Last day of the trailing window. Defaults to today.
    pub end_date: Option<NaiveDate>,
    /// Fixed date keys. When present, `days` and `end_date` are ignored.
    #[serde(default)]
    pub dates: Vec<String>,
}

fn default_window_days() -> usize {
    DEFAULT_WINDOW_DAYS
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            days: DEFAULT_WINDOW_DAYS,
            end_date: None,
            dates: Vec::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct ChartConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub insights: InsightOptions,
}

impl ChartConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "stockcharts", "stock-charts")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("charts.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.window.days <= MAX_WINDOW_DAYS,
            "window.days must be at most {MAX_WINDOW_DAYS}, got {}",
            self.window.days
        );
        Ok(())
    }

    /// Builds the reporting window, resolving a missing end date to `today`.
    pub fn window(&self, today: NaiveDate) -> Result<DateWindow> {
        self.validate()?;
        if !self.window.dates.is_empty() {
            return Ok(DateWindow::from_keys(self.window.dates.iter().cloned()));
        }
        let end = self.window.end_date.unwrap_or(today);
        Ok(DateWindow::trailing(end, self.window.days))
    }
}
