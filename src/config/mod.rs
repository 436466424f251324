use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::StylistError;

pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub history_file: String,
    pub wardrobes_file: String,
    pub export_file: String,
    pub model: String,
    pub api_base: String,
    /// Keep a `.bak` copy of a history/wardrobe file that failed to parse
    /// before it is overwritten.
    pub backup_corrupt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            history_file: "outfit_history.json".into(),
            wardrobes_file: "wardrobes.json".into(),
            export_file: "outfit_suggestion.tex".into(),
            model: "gemini-1.5-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            backup_corrupt: false,
        }
    }
}

impl Config {
    /// Read a TOML file; keys it leaves out keep their defaults.
    pub fn load(path: &Path) -> Result<Self, StylistError> {
        let raw = fs::read_to_string(path)
            .map_err(|e| StylistError::Config(e.to_string()))?;
        Self::from_toml(&raw)
            .map_err(|e| StylistError::Config(format!("{}: {e}", path.display())))
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir.join(&self.history_file)
    }

    pub fn wardrobes_path(&self) -> PathBuf {
        self.data_dir.join(&self.wardrobes_file)
    }
}

/// The Gemini credential. A missing or blank value stops the program.
pub fn api_key(lookup: impl Fn(&str) -> Option<String>) -> Result<String, StylistError> {
    match lookup(API_KEY_VAR) {
        Some(k) if !k.trim().is_empty() => Ok(k.trim().to_string()),
        _ => Err(StylistError::Config(format!(
            "{API_KEY_VAR} not found in the environment or .env file. Please set it up."
        ))),
    }
}

pub fn api_key_from_env() -> Result<String, StylistError> {
    api_key(|name| std::env::var(name).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let cfg = Config::from_toml("").unwrap();
        assert_eq!(cfg.history_path(), PathBuf::from("./outfit_history.json"));
        assert_eq!(cfg.wardrobes_path(), PathBuf::from("./wardrobes.json"));
        assert_eq!(cfg.model, "gemini-1.5-flash");
        assert!(!cfg.backup_corrupt);
    }

    #[test]
    fn toml_overrides_selected_keys() {
        let cfg = Config::from_toml(
            "data_dir = \"/var/lib/chikki\"\nmodel = \"gemini-2.5-flash\"\nbackup_corrupt = true\n",
        )
        .unwrap();
        assert_eq!(cfg.history_path(), PathBuf::from("/var/lib/chikki/outfit_history.json"));
        assert_eq!(cfg.model, "gemini-2.5-flash");
        assert!(cfg.backup_corrupt);
        assert_eq!(cfg.export_file, "outfit_suggestion.tex");
    }

    #[test]
    fn unreadable_config_file_is_a_config_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("chikki.toml");
        std::fs::write(&path, "model = [").unwrap();
        assert!(matches!(Config::load(&path), Err(StylistError::Config(_))));
        assert!(matches!(
            Config::load(&tmp.path().join("absent.toml")),
            Err(StylistError::Config(_))
        ));
    }

    #[test]
    fn missing_or_blank_key_is_fatal() {
        let err = api_key(|_| None).unwrap_err();
        assert!(err.to_string().contains("GEMINI_API_KEY"));
        assert!(api_key(|_| Some("   ".into())).is_err());
        assert_eq!(api_key(|_| Some(" abc ".into())).unwrap(), "abc");
    }
}
