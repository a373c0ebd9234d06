use libdockup::{Config, DockupError};
use std::fs;
use std::path::{Path, PathBuf};

/// Default config file location: ~/.config/dockup/config.yaml
pub fn default_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("dockup").join("config.yaml")
    } else {
        // Fallback to current directory
        PathBuf::from("config.yaml")
    }
}

/// Initialize a new config file with default values
pub fn init_config(config_path: &Path) -> Result<(), DockupError> {
    if config_path.exists() {
        return Err(DockupError::config(
            "Config file already exists. Edit it directly or remove it to recreate.".to_string(),
            Some(config_path.display().to_string()),
        ));
    }

    let yaml = Config::default().to_yaml()?;

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            DockupError::config_with_source(
                "Failed to create config directory".to_string(),
                Some(parent.display().to_string()),
                e,
            )
        })?;
    }

    fs::write(config_path, yaml).map_err(|e| {
        DockupError::config_with_source(
            "Failed to write config file".to_string(),
            Some(config_path.display().to_string()),
            e,
        )
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
