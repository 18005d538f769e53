use std::path::PathBuf;

use serde::Serialize;

use crate::dataset::{COL_CS_DIFF_10, COL_GOLD_DIFF_10, COL_KDA, MatchRecord, Table};
use crate::icons::IconLibrary;
use crate::selection::{filter_by_player, select_match};
use crate::trend::{TrendChart, build_trend};

pub const CHAMPION_ICON_WIDTH: u16 = 250;
pub const STRIP_ICON_WIDTH: u16 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatCategory {
    Vision,
    Damage,
    FarmGold,
    UtilityObjectives,
    RunesSpells,
}

impl StatCategory {
    pub const ALL: [StatCategory; 5] = [
        StatCategory::Vision,
        StatCategory::Damage,
        StatCategory::FarmGold,
        StatCategory::UtilityObjectives,
        StatCategory::RunesSpells,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatCategory::Vision => "Vision",
            StatCategory::Damage => "Damage",
            StatCategory::FarmGold => "Farm / Gold",
            StatCategory::UtilityObjectives => "Utility / Objectives",
            StatCategory::RunesSpells => "Runes / Spells",
        }
    }

    pub fn fields(self) -> &'static [&'static str] {
        match self {
            StatCategory::Vision => &[
                "Vision Score",
                "Wards Placed",
                "Control Wards Placed",
                "Wards Killed",
            ],
            StatCategory::Damage => &[
                "Total Damage Dealt to Champions",
                "Total Damage Taken",
                "Total Damage Shielded Teammates",
                "Total Heals on Teammates",
            ],
            StatCategory::FarmGold => &[
                "Total Gold Earned",
                "Total Minions Killed",
                "Total Neutral Minions Killed",
                "Total Ally Jungle Minions Killed",
                "Total Enemy Jungle Minions Killed",
            ],
            StatCategory::UtilityObjectives => &[
                "Objectives Stolen",
                "Objectives Stolen Assists",
                "Number of Wards Bought",
            ],
            StatCategory::RunesSpells => &[
                "Summoner Spell 1",
                "Summoner Spell 2",
                "Primary Perk Style",
                "Keystone Perk",
                "Secondary Perk Style",
            ],
        }
    }

    pub fn next(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Accepts the display label or a one-word alias, case-insensitively.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase();
        Self::ALL.into_iter().find(|cat| {
            cat.label().to_ascii_lowercase() == needle || cat.alias() == needle
        })
    }

    fn alias(self) -> &'static str {
        match self {
            StatCategory::Vision => "vision",
            StatCategory::Damage => "damage",
            StatCategory::FarmGold => "farm",
            StatCategory::UtilityObjectives => "utility",
            StatCategory::RunesSpells => "runes",
        }
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|cat| *cat == self)
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ChampionIcon {
    Found { path: PathBuf, width: u16 },
    Missing { champion: String },
}

impl ChampionIcon {
    pub fn warning(&self) -> Option<String> {
        match self {
            ChampionIcon::Found { .. } => None,
            ChampionIcon::Missing { champion } => Some(format!("Icon not found: {champion}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Metric {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Icon {
    /// Value from the sheet this icon stands for.
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IconStrip {
    pub width: u16,
    pub icons: Vec<Icon>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchDetail {
    pub player: String,
    pub champion: String,
    pub match_id: String,
    pub champion_icon: ChampionIcon,
    pub metrics: Vec<Metric>,
    pub category: StatCategory,
    pub stats: Vec<(String, String)>,
    pub items: IconStrip,
    pub spells: IconStrip,
}

/// Everything one frame of the dashboard shows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
    pub detail: MatchDetail,
    pub trend: TrendChart,
}

/// Pure projection of the current selection. `None` when the player has no
/// row with that champion label.
pub fn render(
    table: &Table,
    icons: &IconLibrary,
    player: &str,
    match_label: &str,
    category: StatCategory,
) -> Option<ViewModel> {
    let subset = filter_by_player(table, player);
    let row = select_match(&subset, match_label)?;
    Some(ViewModel {
        detail: render_detail(row, icons, category),
        trend: build_trend(&subset),
    })
}

pub fn render_detail(row: &MatchRecord, icons: &IconLibrary, category: StatCategory) -> MatchDetail {
    let champion_icon = match icons.champion(&row.champion) {
        Some(path) => ChampionIcon::Found {
            path,
            width: CHAMPION_ICON_WIDTH,
        },
        None => ChampionIcon::Missing {
            champion: row.champion.clone(),
        },
    };

    let metrics = vec![
        Metric {
            label: "GoldDiff @ 10",
            value: row.field(COL_GOLD_DIFF_10).to_string(),
        },
        Metric {
            label: "CSDiff @ 10",
            value: row.field(COL_CS_DIFF_10).to_string(),
        },
        Metric {
            label: "KDA",
            value: row.field(COL_KDA).to_string(),
        },
    ];

    let stats = category
        .fields()
        .iter()
        .map(|name| (name.to_string(), row.field(name).to_string()))
        .collect();

    let items = row
        .items()
        .filter_map(|cell| {
            let name = cell.to_string();
            icons.item(&name).map(|path| Icon { name, path })
        })
        .collect();

    let spells = row
        .summoner_spells()
        .filter_map(|cell| {
            let name = cell.to_string();
            icons.spell(&name).map(|path| Icon { name, path })
        })
        .collect();

    MatchDetail {
        player: row.player.clone(),
        champion: row.champion.clone(),
        match_id: row.match_id.clone(),
        champion_icon,
        metrics,
        category,
        stats,
        items: IconStrip {
            width: STRIP_ICON_WIDTH,
            icons: items,
        },
        spells: IconStrip {
            width: STRIP_ICON_WIDTH,
            icons: spells,
        },
    }
}
