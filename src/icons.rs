use std::path::{Path, PathBuf};

use crate::config::AppConfig;

pub const ICON_EXT: &str = "png";

/// Sheet spell name -> icon file stem.
pub const SUMMONER_SPELL_ICONS: [(&str, &str); 10] = [
    ("Flash", "SummonerFlash"),
    ("Ignite", "SummonerDot"),
    ("Teleport", "SummonerTeleport"),
    ("Smite", "SummonerSmite"),
    ("Exhaust", "SummonerExhaust"),
    ("Barrier", "SummonerBarrier"),
    ("Ghost", "SummonerHaste"),
    ("Cleanse", "SummonerBoost"),
    ("Heal", "SummonerHeal"),
    ("Clarity", "SummonerMana"),
];

pub fn summoner_icon_key(spell: &str) -> Option<&'static str> {
    SUMMONER_SPELL_ICONS
        .iter()
        .find(|(name, _)| *name == spell)
        .map(|(_, key)| *key)
}

/// `{dir}/{key}.png` when that file exists. Surrounding whitespace in the key
/// is ignored.
pub fn find_icon(dir: &Path, key: &str) -> Option<PathBuf> {
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    let path = dir.join(format!("{key}.{ICON_EXT}"));
    path.is_file().then_some(path)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconLibrary {
    pub champion_dir: PathBuf,
    pub item_dir: PathBuf,
    pub spell_dir: PathBuf,
}

impl IconLibrary {
    pub fn new(
        champion_dir: impl Into<PathBuf>,
        item_dir: impl Into<PathBuf>,
        spell_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            champion_dir: champion_dir.into(),
            item_dir: item_dir.into(),
            spell_dir: spell_dir.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.champion_icon_dir.clone(),
            config.item_icon_dir.clone(),
            config.spell_icon_dir.clone(),
        )
    }

    pub fn champion(&self, champion: &str) -> Option<PathBuf> {
        find_icon(&self.champion_dir, champion)
    }

    pub fn item(&self, item: &str) -> Option<PathBuf> {
        find_icon(&self.item_dir, item)
    }

    /// Spell names without a mapping never touch the filesystem.
    pub fn spell(&self, spell: &str) -> Option<PathBuf> {
        let key = summoner_icon_key(spell.trim())?;
        find_icon(&self.spell_dir, key)
    }
}
