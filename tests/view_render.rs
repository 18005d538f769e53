use std::fs;
use std::path::Path;

use lol_review::dataset::{MatchRecord, Table};
use lol_review::icons::IconLibrary;
use lol_review::selection::{filter_by_player, select_match};
use lol_review::trend::{TrendMetric, TrendPoint};
use lol_review::view::{ChampionIcon, StatCategory, render, render_detail};
use tempfile::TempDir;

fn touch(dir: &Path, name: &str) {
    fs::create_dir_all(dir).expect("create icon dir");
    fs::write(dir.join(format!("{name}.png")), b"png").expect("write icon");
}

fn icon_library(root: &TempDir) -> IconLibrary {
    let lib = IconLibrary::new(
        root.path().join("Icon_Champs"),
        root.path().join("Icon_Items"),
        root.path().join("Icon_Spells"),
    );
    fs::create_dir_all(&lib.champion_dir).expect("champ dir");
    fs::create_dir_all(&lib.item_dir).expect("item dir");
    fs::create_dir_all(&lib.spell_dir).expect("spell dir");
    lib
}

fn alice_table() -> Table {
    Table::new(vec![
        MatchRecord::new("Alice", "Ahri", "M1")
            .with_field("goldDiff@10", 300.0)
            .with_field("csDiff@10", 10.0)
            .with_field("KDA", 4.5),
        MatchRecord::new("Bob", "Lee Sin", "M9")
            .with_field("goldDiff@10", 12.0)
            .with_field("csDiff@10", 1.0)
            .with_field("KDA", 1.0),
        MatchRecord::new("Alice", "Lux", "M2")
            .with_field("goldDiff@10", -150.0)
            .with_field("csDiff@10", -5.0)
            .with_field("KDA", 2.0),
    ])
}

#[test]
fn alice_lux_scenario() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    let table = alice_table();

    let subset = filter_by_player(&table, "Alice");
    let row = select_match(&subset, "Lux").expect("Lux row");
    assert_eq!(row.gold_diff_10(), Some(-150.0));

    let view = render(&table, &icons, "Alice", "Lux", StatCategory::Vision).expect("view");
    assert_eq!(view.detail.player, "Alice");
    assert_eq!(view.detail.champion, "Lux");
    assert_eq!(view.detail.metrics[0].label, "GoldDiff @ 10");
    assert_eq!(view.detail.metrics[0].value, "-150");
    assert_eq!(view.detail.metrics[1].value, "-5");
    assert_eq!(view.detail.metrics[2].value, "2");

    let point = |id: &str, value: f64, metric| TrendPoint {
        match_id: id.to_string(),
        metric,
        value,
    };
    assert_eq!(
        view.trend.points,
        vec![
            point("M1", 300.0, TrendMetric::GoldDiff10),
            point("M1", 10.0, TrendMetric::CsDiff10),
            point("M2", -150.0, TrendMetric::GoldDiff10),
            point("M2", -5.0, TrendMetric::CsDiff10),
        ]
    );
    assert_eq!(view.trend.categories, vec!["M1", "M2"]);
    assert_eq!(
        view.trend.series(TrendMetric::CsDiff10),
        vec![(0.0, 10.0), (1.0, -5.0)]
    );
}

#[test]
fn missing_champion_icon_warns_instead_of_failing() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    let table = alice_table();

    let view = render(&table, &icons, "Alice", "Ahri", StatCategory::Damage).expect("view");
    assert_eq!(
        view.detail.champion_icon,
        ChampionIcon::Missing {
            champion: "Ahri".to_string()
        }
    );
    let warning = view.detail.champion_icon.warning().expect("warning");
    assert!(warning.contains("Ahri"));
}

#[test]
fn present_champion_icon_uses_fixed_width() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    touch(&icons.champion_dir, "Ahri");
    let table = alice_table();

    let view = render(&table, &icons, "Alice", "Ahri", StatCategory::Vision).expect("view");
    assert!(view.detail.champion_icon.warning().is_none());
    match view.detail.champion_icon {
        ChampionIcon::Found { path, width } => {
            assert!(path.ends_with("Ahri.png"));
            assert_eq!(width, 250);
        }
        other => panic!("expected icon, got {other:?}"),
    }
}

#[test]
fn item_row_keeps_only_existing_icons_in_slot_order() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    touch(&icons.item_dir, "Infinity Edge");
    touch(&icons.item_dir, "Berserker's Greaves");

    let row = MatchRecord::new("Alice", "Jinx", "M5")
        .with_field("Item 0", "Berserker's Greaves")
        .with_field("Item 1", "")
        .with_field("Item 2", "None")
        .with_field("Item 3", "Infinity Edge")
        .with_field("Item 4", "Phantom Dancer")
        .with_field("Item 5", 3031.0);

    let detail = render_detail(&row, &icons, StatCategory::Vision);
    let names: Vec<&str> = detail.items.icons.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["Berserker's Greaves", "Infinity Edge"]);
    assert_eq!(detail.items.width, 60);
}

#[test]
fn flash_and_smite_map_to_summoner_icons() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    touch(&icons.spell_dir, "SummonerFlash");
    touch(&icons.spell_dir, "SummonerSmite");

    let row = MatchRecord::new("Alice", "Lee Sin", "M6")
        .with_field("Summoner Spell 1", "Flash")
        .with_field("Summoner Spell 2", "Smite");
    let detail = render_detail(&row, &icons, StatCategory::RunesSpells);

    assert_eq!(detail.spells.icons.len(), 2);
    assert!(detail.spells.icons[0].path.ends_with("SummonerFlash.png"));
    assert!(detail.spells.icons[1].path.ends_with("SummonerSmite.png"));
}

#[test]
fn unmapped_or_missing_spells_are_skipped() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    touch(&icons.spell_dir, "Mark");

    let row = MatchRecord::new("Alice", "Lux", "M7")
        .with_field("Summoner Spell 1", "Mark")
        .with_field("Summoner Spell 2", "Heal");
    let detail = render_detail(&row, &icons, StatCategory::RunesSpells);
    assert!(detail.spells.icons.is_empty());
}

#[test]
fn category_table_follows_field_order() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    let row = MatchRecord::new("Alice", "Lux", "M2")
        .with_field("Summoner Spell 1", "Flash")
        .with_field("Summoner Spell 2", "Ignite")
        .with_field("Primary Perk Style", "Sorcery")
        .with_field("Keystone Perk", "Arcane Comet")
        .with_field("Secondary Perk Style", "Inspiration");

    let detail = render_detail(&row, &icons, StatCategory::RunesSpells);
    assert_eq!(
        detail.stats,
        vec![
            ("Summoner Spell 1".to_string(), "Flash".to_string()),
            ("Summoner Spell 2".to_string(), "Ignite".to_string()),
            ("Primary Perk Style".to_string(), "Sorcery".to_string()),
            ("Keystone Perk".to_string(), "Arcane Comet".to_string()),
            ("Secondary Perk Style".to_string(), "Inspiration".to_string()),
        ]
    );
}

#[test]
fn unknown_label_renders_nothing() {
    let root = TempDir::new().unwrap();
    let icons = icon_library(&root);
    let table = alice_table();
    assert!(render(&table, &icons, "Alice", "Lee Sin", StatCategory::Vision).is_none());
    assert!(render(&table, &icons, "Nobody", "Lux", StatCategory::Vision).is_none());
}
