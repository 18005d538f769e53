use std::env;
use std::path::PathBuf;

pub const DATA_FILE: &str = "Data.xlsx";
pub const CHAMPION_ICON_DIR: &str = "Icon_Champs";
pub const ITEM_ICON_DIR: &str = "Icon_Items";
pub const SPELL_ICON_DIR: &str = "Icon_Spells";
pub const EXPORT_DIR: &str = "exports";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_file: PathBuf,
    pub champion_icon_dir: PathBuf,
    pub item_icon_dir: PathBuf,
    pub spell_icon_dir: PathBuf,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Reads `.env.local` and `.env` first, then the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let path = |key: &str, default: &str| -> PathBuf {
            match lookup(key) {
                Some(raw) if !raw.trim().is_empty() => PathBuf::from(raw.trim()),
                _ => PathBuf::from(default),
            }
        };
        Self {
            data_file: path("LOL_DATA_FILE", DATA_FILE),
            champion_icon_dir: path("LOL_CHAMPION_ICON_DIR", CHAMPION_ICON_DIR),
            item_icon_dir: path("LOL_ITEM_ICON_DIR", ITEM_ICON_DIR),
            spell_icon_dir: path("LOL_SPELL_ICON_DIR", SPELL_ICON_DIR),
            export_dir: path("LOL_EXPORT_DIR", EXPORT_DIR),
        }
    }
}
