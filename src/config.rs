use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::error::{HubError, Result};

pub const APP_NAME: &str = "dshub";

#[derive(Parser, Debug, Default)]
#[command(name = "dshub", about = "Data Science Learning Accelerator Hub", version)]
pub struct Args {
    /// Directory holding the stored course documents
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Terminal width below which the sidebar hides behind the menu toggle
    #[arg(long)]
    pub narrow_width: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Log file (defaults to dshub.log in the data directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Ignore stored documents and start from the default catalog
    #[arg(long)]
    pub reset: bool,
}

/// Per-user settings, persisted with confy.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub data_dir: Option<PathBuf>,
    pub narrow_width: u16,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: None,
            narrow_width: 80,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn load() -> Result<Self> {
        Ok(confy::load(APP_NAME, None)?)
    }

    /// Command-line flags take precedence over stored settings.
    pub fn merge_args(mut self, args: &Args) -> Self {
        if let Some(dir) = &args.data_dir {
            self.data_dir = Some(dir.clone());
        }
        if let Some(width) = args.narrow_width {
            self.narrow_width = width;
        }
        if let Some(level) = &args.log_level {
            self.log_level = level.clone();
        }
        if let Some(file) = &args.log_file {
            self.log_file = Some(file.clone());
        }
        self
    }

    pub fn resolve_data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => dirs::data_dir()
                .map(|base| base.join(APP_NAME))
                .ok_or(HubError::NoDataDir),
        }
    }

    pub fn resolve_log_file(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(file) => Ok(file.clone()),
            None => Ok(self.resolve_data_dir()?.join(format!("{APP_NAME}.log"))),
        }
    }

    /// Filter directive for this crate only; dependencies stay quiet.
    pub fn log_filter(&self) -> String {
        let level = match self.log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "warn" => "warn",
            "error" => "error",
            _ => "info",
        };
        format!("{APP_NAME}={level}")
    }
}
