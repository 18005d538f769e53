use anyhow::{Context, Result, anyhow};

use lol_review::config::AppConfig;
use lol_review::dataset::DataLoader;
use lol_review::icons::IconLibrary;
use lol_review::selection::{filter_by_player, labels_for};
use lol_review::view::{StatCategory, render};

// Prints the dashboard's view model as JSON without opening a terminal UI.
// Usage: lol_snapshot <player> [champion] [category]
fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let player = args
        .next()
        .ok_or_else(|| anyhow!("usage: lol_snapshot <player> [champion] [category]"))?;
    let champion = args.next();
    let category = match args.next() {
        Some(raw) => StatCategory::parse(&raw).ok_or_else(|| anyhow!("unknown category {raw:?}"))?,
        None => StatCategory::Vision,
    };

    let config = AppConfig::from_env();
    let loader = DataLoader::new(config.data_file.clone());
    let table = loader
        .load()
        .with_context(|| format!("load {}", loader.path().display()))?;

    let subset = filter_by_player(table, &player);
    let label = match champion {
        Some(champion) => champion,
        None => labels_for(&subset)
            .first()
            .map(|label| label.to_string())
            .ok_or_else(|| anyhow!("no matches for player {player:?}"))?,
    };

    let icons = IconLibrary::from_config(&config);
    let view = render(table, &icons, &player, &label, category)
        .ok_or_else(|| anyhow!("player {player:?} has no match on {label:?}"))?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
