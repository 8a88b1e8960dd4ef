use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "typetastic";

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Preferences file, under the platform config dir.
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", APP_NAME)
            .map(|pd| pd.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("typetastic_config.json"))
    }

    /// Log file, under `~/.local/state` when HOME is set.
    pub fn log_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME);
            Some(state_dir.join("typetastic.log"))
        } else {
            ProjectDirs::from("", "", APP_NAME)
                .map(|proj_dirs| proj_dirs.data_local_dir().join("typetastic.log"))
        }
    }
}
