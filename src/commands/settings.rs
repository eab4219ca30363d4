use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::models::ClientSettings;

const SETTINGS_FILE: &str = "settings.json";

/// `<config dir>/querylens/settings.json`, or the working directory when the
/// platform has no config dir
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("querylens"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(SETTINGS_FILE)
}

/// Load settings, falling back to defaults when the file is missing or unreadable JSON
pub fn load_settings(path: &Path) -> Result<ClientSettings, String> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ClientSettings::default()),
        Err(e) => return Err(format!("Failed to load settings: {}", e)),
    };

    match serde_json::from_str(&json) {
        Ok(settings) => Ok(settings),
        Err(e) => {
            log::warn!("Ignoring invalid settings file {}: {}", path.display(), e);
            Ok(ClientSettings::default())
        }
    }
}

pub fn save_settings(path: &Path, settings: &ClientSettings) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create settings directory: {}", e))?;
    }

    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| format!("Failed to serialize settings: {}", e))?;

    std::fs::write(path, json).map_err(|e| format!("Failed to save settings: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_BASE_URL;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = load_settings(&dir.path().join("absent.json")).unwrap();
        assert_eq!(settings.api.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn corrupt_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, "{not json").unwrap();
        assert_eq!(load_settings(&path).unwrap(), ClientSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(SETTINGS_FILE);

        let mut settings = ClientSettings::default();
        settings.api.base_url = "http://db-insights.internal:9000".to_string();
        settings.display.show_columns = true;

        save_settings(&path, &settings).unwrap();
        assert_eq!(load_settings(&path).unwrap(), settings);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{"api": {"baseUrl": "http://example.test"}}"#).unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.api.base_url, "http://example.test");
        assert!(!settings.display.show_created_at);
    }
}
