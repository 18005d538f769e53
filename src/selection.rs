use std::collections::BTreeSet;

use crate::dataset::{MatchRecord, Table};

/// Distinct player names in lexicographic order.
pub fn players(table: &Table) -> Vec<String> {
    table
        .rows()
        .iter()
        .map(|row| row.player.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

pub fn filter_by_player<'a>(table: &'a Table, player: &str) -> Vec<&'a MatchRecord> {
    table
        .rows()
        .iter()
        .filter(|row| row.player == player)
        .collect()
}

/// One label per row, in table order. A champion played twice shows up twice.
pub fn labels_for<'a>(subset: &[&'a MatchRecord]) -> Vec<&'a str> {
    subset.iter().map(|row| row.champion.as_str()).collect()
}

/// First row whose champion equals `label`; later rows on the same champion
/// are never reachable through this lookup.
pub fn select_match<'a>(subset: &[&'a MatchRecord], label: &str) -> Option<&'a MatchRecord> {
    subset.iter().copied().find(|row| row.champion == label)
}
