use std::collections::VecDeque;
use std::time::Instant;

use crate::dataset::Table;
use crate::icons::IconLibrary;
use crate::selection::{filter_by_player, labels_for, players};
use crate::view::{StatCategory, ViewModel, render};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Players,
    Matches,
    Category,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Players => Focus::Matches,
            Focus::Matches => Focus::Category,
            Focus::Category => Focus::Players,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Focus::Players => Focus::Category,
            Focus::Matches => Focus::Players,
            Focus::Category => Focus::Matches,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportState {
    pub path: Option<String>,
    pub message: String,
    pub failed: bool,
    pub last_updated: Option<Instant>,
}

impl ExportState {
    pub fn is_visible(&self) -> bool {
        self.last_updated.is_some()
    }

    pub fn clear_if_done_for(&mut self, now: Instant, keep_secs: u64) {
        let Some(last) = self.last_updated else {
            return;
        };
        if now.duration_since(last).as_secs() >= keep_secs {
            *self = Self::default();
        }
    }
}

/// Cursor and console state. The table itself lives with the loader and is
/// passed in wherever a selection has to be resolved.
#[derive(Debug, Clone)]
pub struct AppState {
    pub players: Vec<String>,
    pub player_selected: usize,
    pub match_selected: usize,
    pub category: StatCategory,
    pub focus: Focus,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
    pub load_error: Option<String>,
    pub export: ExportState,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            players: Vec::new(),
            player_selected: 0,
            match_selected: 0,
            category: StatCategory::Vision,
            focus: Focus::Players,
            logs: VecDeque::with_capacity(MAX_LOGS),
            help_overlay: false,
            load_error: None,
            export: ExportState::default(),
        }
    }

    pub fn from_table(table: &Table) -> Self {
        let mut state = Self::new();
        state.players = players(table);
        state.push_log(format!(
            "[INFO] Loaded {} matches for {} players",
            table.len(),
            state.players.len()
        ));
        state
    }

    /// Nothing is selectable after a failed load.
    pub fn from_load_error(err: &anyhow::Error) -> Self {
        let mut state = Self::new();
        let message = format!("{err:#}");
        state.push_log(format!("[ERROR] {message}"));
        state.load_error = Some(message);
        state
    }

    pub fn maybe_clear_export(&mut self, now: Instant) {
        self.export.clear_if_done_for(now, 8);
    }

    pub fn selected_player(&self) -> Option<&str> {
        self.players.get(self.player_selected).map(String::as_str)
    }

    pub fn match_labels<'a>(&self, table: &'a Table) -> Vec<&'a str> {
        match self.selected_player() {
            Some(player) => labels_for(&filter_by_player(table, player)),
            None => Vec::new(),
        }
    }

    pub fn selected_label<'a>(&self, table: &'a Table) -> Option<&'a str> {
        self.match_labels(table).get(self.match_selected).copied()
    }

    pub fn view(&self, table: &Table, icons: &IconLibrary) -> Option<ViewModel> {
        let player = self.selected_player()?;
        let label = self.selected_label(table)?;
        render(table, icons, player, label, self.category)
    }

    pub fn select_next(&mut self, table: &Table) {
        match self.focus {
            Focus::Players => {
                let total = self.players.len();
                self.player_selected = step_forward(self.player_selected, total);
                self.match_selected = 0;
            }
            Focus::Matches => {
                let total = self.match_labels(table).len();
                self.match_selected = step_forward(self.match_selected, total);
            }
            Focus::Category => self.category = self.category.next(),
        }
    }

    pub fn select_prev(&mut self, table: &Table) {
        match self.focus {
            Focus::Players => {
                let total = self.players.len();
                self.player_selected = step_back(self.player_selected, total);
                self.match_selected = 0;
            }
            Focus::Matches => {
                let total = self.match_labels(table).len();
                self.match_selected = step_back(self.match_selected, total);
            }
            Focus::Category => self.category = self.category.prev(),
        }
    }

    pub fn cycle_category(&mut self, forward: bool) {
        self.category = if forward {
            self.category.next()
        } else {
            self.category.prev()
        };
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }
}

fn step_forward(current: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (current + 1) % total
}

fn step_back(current: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    if current == 0 { total - 1 } else { current - 1 }
}
