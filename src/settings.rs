//! Settings module - handles application settings storage
//! - Windows: uses registry
//! - macOS/Linux: uses config file (JSON)

#[cfg(all(windows, feature = "winreg"))]
use winreg::enums::*;
#[cfg(all(windows, feature = "winreg"))]
use winreg::RegKey;

#[cfg(all(not(windows), feature = "dirs"))]
use std::fs;
#[cfg(all(not(windows), feature = "dirs"))]
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sprite_gif::i18n::Language;
use sprite_gif::{NamingScheme, SpriteForm, DEFAULT_DURATION_MS, DEFAULT_OUTPUT_DIR};

#[cfg(all(windows, feature = "winreg"))]
const REGISTRY_KEY: &str = r"Software\SpriteGif";

#[cfg(all(not(windows), feature = "dirs"))]
const CONFIG_FILE_NAME: &str = "settings.json";
#[cfg(all(not(windows), feature = "dirs"))]
const APP_NAME: &str = "sprite-gif";

/// Application settings: last used form values plus output preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub rows: u32,
    pub cols: u32,
    pub duration_ms: u32,
    pub loop_forever: bool,
    pub output_dir: String,
    pub naming: NamingScheme,
    pub language: Language,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            rows: 1,
            cols: 4,
            duration_ms: DEFAULT_DURATION_MS,
            loop_forever: true,
            output_dir: DEFAULT_OUTPUT_DIR.to_string(),
            naming: NamingScheme::Timestamp,
            language: Language::Zh,
        }
    }
}

impl AppSettings {
    /// Builds the converter form from the saved values
    pub fn to_form(&self) -> SpriteForm {
        let mut form = SpriteForm::default();
        form.set_rows(self.rows.max(1));
        form.set_cols(self.cols.max(1));
        form.set_duration_ms(Some(self.duration_ms.max(1)));
        form.set_loop(self.loop_forever);
        form
    }

    /// Remembers the form values for next launch
    pub fn update_from_form(&mut self, form: &SpriteForm) {
        self.rows = form.rows;
        self.cols = form.cols;
        if let Some(ms) = form.duration_ms.filter(|ms| *ms > 0) {
            self.duration_ms = ms;
        }
        self.loop_forever = form.loop_forever;
    }

    /// Parses settings JSON; anything unreadable falls back to defaults
    pub fn from_json_str(content: &str) -> Self {
        serde_json::from_str(content).unwrap_or_default()
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize settings")
    }

    // ========== Windows: Registry-based storage ==========

    /// Load settings from Windows registry
    #[cfg(all(windows, feature = "winreg"))]
    pub fn load() -> Self {
        let mut settings = Self::default();

        if let Ok(hkcu) = RegKey::predef(HKEY_CURRENT_USER).open_subkey(REGISTRY_KEY) {
            if let Ok(rows) = hkcu.get_value::<u32, _>("Rows") {
                settings.rows = rows.max(1);
            }
            if let Ok(cols) = hkcu.get_value::<u32, _>("Cols") {
                settings.cols = cols.max(1);
            }
            if let Ok(duration) = hkcu.get_value::<u32, _>("DurationMs") {
                settings.duration_ms = duration.max(1);
            }
            if let Ok(loop_forever) = hkcu.get_value::<u32, _>("LoopForever") {
                settings.loop_forever = loop_forever != 0;
            }
            if let Ok(dir) = hkcu.get_value::<String, _>("OutputDir") {
                settings.output_dir = dir;
            }
            if let Ok(naming) = hkcu.get_value::<String, _>("Naming") {
                settings.naming = NamingScheme::from_str(&naming);
            }
            if let Ok(lang) = hkcu.get_value::<String, _>("Language") {
                settings.language = Language::from_str(&lang);
            }
        }

        settings
    }

    /// Save settings to Windows registry
    #[cfg(all(windows, feature = "winreg"))]
    pub fn save(&self) -> Result<()> {
        let hkcu = RegKey::predef(HKEY_CURRENT_USER);
        let (key, _) = hkcu
            .create_subkey(REGISTRY_KEY)
            .context("Failed to create registry key")?;

        key.set_value("Rows", &self.rows).context("Failed to save Rows")?;
        key.set_value("Cols", &self.cols).context("Failed to save Cols")?;
        key.set_value("DurationMs", &self.duration_ms)
            .context("Failed to save DurationMs")?;
        key.set_value("LoopForever", &(self.loop_forever as u32))
            .context("Failed to save LoopForever")?;
        key.set_value("OutputDir", &self.output_dir)
            .context("Failed to save OutputDir")?;
        key.set_value("Naming", &self.naming.as_str())
            .context("Failed to save Naming")?;
        key.set_value("Language", &self.language.as_str())
            .context("Failed to save Language")?;

        Ok(())
    }

    // ========== macOS/Linux: File-based storage ==========

    /// Get config file path for non-Windows platforms
    #[cfg(all(not(windows), feature = "dirs"))]
    fn config_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join(APP_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load settings from config file (macOS/Linux)
    #[cfg(all(not(windows), feature = "dirs"))]
    pub fn load() -> Self {
        Self::config_file_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| Self::from_json_str(&content))
            .unwrap_or_default()
    }

    /// Save settings to config file (macOS/Linux)
    #[cfg(all(not(windows), feature = "dirs"))]
    pub fn save(&self) -> Result<()> {
        let config_path =
            Self::config_file_path().context("Failed to get config directory")?;

        // Create config directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        fs::write(&config_path, self.to_json_string()?)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;

        Ok(())
    }

    // ========== Fallback: No persistent storage ==========

    /// Load settings (fallback when no storage feature is enabled)
    #[cfg(not(any(all(windows, feature = "winreg"), all(not(windows), feature = "dirs"))))]
    pub fn load() -> Self {
        Self::default()
    }

    /// Save settings (fallback when no storage feature is enabled)
    #[cfg(not(any(all(windows, feature = "winreg"), all(not(windows), feature = "dirs"))))]
    pub fn save(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_json_round_trip() {
        let settings = AppSettings {
            rows: 3,
            cols: 5,
            duration_ms: 40,
            loop_forever: false,
            output_dir: "out/sprites".to_string(),
            naming: NamingScheme::Unique,
            language: Language::Ja,
        };

        let json = settings.to_json_string().unwrap();
        assert!(json.contains("\"naming\": \"unique\""));
        assert_eq!(AppSettings::from_json_str(&json), settings);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let settings = AppSettings::from_json_str(r#"{ "cols": 8 }"#);
        assert_eq!(settings.cols, 8);
        assert_eq!(settings.rows, 1);
        assert_eq!(settings.output_dir, "outputs/gif");
        assert_eq!(settings.language, Language::Zh);
    }

    #[test]
    fn test_malformed_file_uses_defaults() {
        assert_eq!(AppSettings::from_json_str("{ not json"), AppSettings::default());
        assert_eq!(
            AppSettings::from_json_str(r#"{ "rows": "three" }"#),
            AppSettings::default()
        );
    }

    #[test]
    fn test_form_round_trip() {
        let settings = AppSettings {
            rows: 2,
            cols: 6,
            duration_ms: 50,
            loop_forever: false,
            ..AppSettings::default()
        };

        let form = settings.to_form();
        assert_eq!((form.rows, form.cols), (2, 6));
        assert_eq!(form.duration_ms, Some(50));
        assert_eq!(form.fps, Some(20.0));
        assert!(!form.loop_forever);

        let mut back = AppSettings::default();
        back.update_from_form(&form);
        assert_eq!(back, settings);
    }
}
