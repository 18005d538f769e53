use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use calamine::{Data, Reader, open_workbook_auto};
use once_cell::sync::OnceCell;
use serde::Serialize;

pub const COL_PLAYER: &str = "Player's Name";
pub const COL_CHAMPION: &str = "Champion Played";
pub const COL_GOLD_DIFF_10: &str = "goldDiff@10";
pub const COL_CS_DIFF_10: &str = "csDiff@10";
pub const COL_KDA: &str = "KDA";
pub const COL_MATCH_ID: &str = "Match ID";

pub const ITEM_COLUMNS: [&str; 7] = [
    "Item 0", "Item 1", "Item 2", "Item 3", "Item 4", "Item 5", "Item 6",
];
pub const SPELL_COLUMNS: [&str; 2] = ["Summoner Spell 1", "Summoner Spell 2"];

/// Identifier and name columns; never read as numbers from CSV.
pub const TEXT_COLUMNS: &[&str] = &[
    COL_PLAYER,
    COL_CHAMPION,
    COL_MATCH_ID,
    "Summoner Spell 1",
    "Summoner Spell 2",
    "Primary Perk Style",
    "Keystone Perk",
    "Secondary Perk Style",
    "Item 0",
    "Item 1",
    "Item 2",
    "Item 3",
    "Item 4",
    "Item 5",
    "Item 6",
];

pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_PLAYER,
    COL_CHAMPION,
    COL_GOLD_DIFF_10,
    COL_CS_DIFF_10,
    COL_KDA,
    "Vision Score",
    "Wards Placed",
    "Control Wards Placed",
    "Wards Killed",
    "Total Damage Dealt to Champions",
    "Total Damage Taken",
    "Total Damage Shielded Teammates",
    "Total Heals on Teammates",
    "Total Gold Earned",
    "Total Minions Killed",
    "Total Neutral Minions Killed",
    "Total Ally Jungle Minions Killed",
    "Total Enemy Jungle Minions Killed",
    "Objectives Stolen",
    "Objectives Stolen Assists",
    "Number of Wards Bought",
    "Summoner Spell 1",
    "Summoner Spell 2",
    "Primary Perk Style",
    "Keystone Perk",
    "Secondary Perk Style",
    "Item 0",
    "Item 1",
    "Item 2",
    "Item 3",
    "Item 4",
    "Item 5",
    "Item 6",
    COL_MATCH_ID,
];

static EMPTY_CELL: CellValue = CellValue::Empty;

/// A single spreadsheet cell, kept in the representation it was read with.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Empty,
}

impl CellValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(v) => Some(*v),
            CellValue::Text(raw) => {
                let raw = raw.trim();
                if is_plain_decimal(raw) {
                    raw.parse::<f64>().ok()
                } else {
                    None
                }
            }
            CellValue::Empty => None,
        }
    }

    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(raw) => raw.trim().is_empty(),
            CellValue::Number(_) => false,
        }
    }

    fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    // CSV has no cell types: plain decimal numerals become numbers, anything
    // else (`nan`, `inf`, `1e3`, words) stays text.
    fn infer_number(self) -> Self {
        let CellValue::Text(raw) = &self else {
            return self;
        };
        if !is_plain_decimal(raw) {
            return self;
        }
        match raw.parse::<f64>() {
            Ok(v) => CellValue::Number(v),
            Err(_) => self,
        }
    }
}

fn is_plain_decimal(raw: &str) -> bool {
    let digits = raw.strip_prefix(['-', '+']).unwrap_or(raw);
    let mut seen_digit = false;
    let mut seen_dot = false;
    for c in digits.chars() {
        match c {
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => return false,
        }
    }
    seen_digit
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            CellValue::Number(v) => write!(f, "{v}"),
            CellValue::Text(raw) => f.write_str(raw),
            CellValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        CellValue::Number(value as f64)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::from_text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::from_text(&value)
    }
}

/// One row of the source sheet: one player on one champion in one match.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchRecord {
    pub player: String,
    pub champion: String,
    pub match_id: String,
    fields: HashMap<String, CellValue>,
}

impl MatchRecord {
    pub fn new(
        player: impl Into<String>,
        champion: impl Into<String>,
        match_id: impl Into<String>,
    ) -> Self {
        let player = player.into();
        let champion = champion.into();
        let match_id = match_id.into();
        let mut fields = HashMap::with_capacity(REQUIRED_COLUMNS.len());
        fields.insert(COL_PLAYER.to_string(), CellValue::from(player.as_str()));
        fields.insert(COL_CHAMPION.to_string(), CellValue::from(champion.as_str()));
        fields.insert(COL_MATCH_ID.to_string(), CellValue::from(match_id.as_str()));
        Self {
            player,
            champion,
            match_id,
            fields,
        }
    }

    pub fn with_field(mut self, name: &str, value: impl Into<CellValue>) -> Self {
        self.set_field(name, value);
        self
    }

    pub fn set_field(&mut self, name: &str, value: impl Into<CellValue>) {
        self.fields.insert(name.to_string(), value.into());
    }

    /// Missing fields read as empty cells.
    pub fn field(&self, name: &str) -> &CellValue {
        self.fields.get(name).unwrap_or(&EMPTY_CELL)
    }

    pub fn gold_diff_10(&self) -> Option<f64> {
        self.field(COL_GOLD_DIFF_10).as_f64()
    }

    pub fn cs_diff_10(&self) -> Option<f64> {
        self.field(COL_CS_DIFF_10).as_f64()
    }

    pub fn items(&self) -> impl Iterator<Item = &CellValue> + '_ {
        ITEM_COLUMNS.iter().map(|col| self.field(col))
    }

    pub fn summoner_spells(&self) -> impl Iterator<Item = &CellValue> + '_ {
        SPELL_COLUMNS.iter().map(|col| self.field(col))
    }
}

/// The loaded sheet. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    rows: Vec<MatchRecord>,
}

impl Table {
    pub fn new(rows: Vec<MatchRecord>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[MatchRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Owns the one read of the data file; every later `load` reuses it.
#[derive(Debug)]
pub struct DataLoader {
    path: PathBuf,
    table: OnceCell<Table>,
}

impl DataLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            table: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_loaded(&self) -> bool {
        self.table.get().is_some()
    }

    pub fn load(&self) -> Result<&Table> {
        self.table.get_or_try_init(|| read_table(&self.path))
    }
}

struct Grid {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
    infer_numbers: bool,
}

pub fn read_table(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    let grid = match ext.as_str() {
        "csv" => read_csv_grid(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_workbook_grid(path)?,
        other => bail!(
            "unsupported data file extension {other:?} for {}",
            path.display()
        ),
    };
    table_from_grid(grid).with_context(|| format!("parse {}", path.display()))
}

fn read_workbook_grid(path: &Path) -> Result<Grid> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("open workbook {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook {} has no worksheets", path.display()))?
        .with_context(|| format!("read first worksheet of {}", path.display()))?;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or_else(|| anyhow!("worksheet in {} is empty", path.display()))?
        .iter()
        .map(|cell| cell.to_string().trim().to_string())
        .collect();
    let rows = rows
        .map(|row| row.iter().map(cell_from_data).collect())
        .collect();
    Ok(Grid {
        headers,
        rows,
        infer_numbers: false,
    })
}

fn cell_from_data(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Float(v) => CellValue::Number(*v),
        Data::String(raw) => CellValue::from_text(raw),
        other => CellValue::from_text(&other.to_string()),
    }
}

fn read_csv_grid(path: &Path) -> Result<Grid> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open csv {}", path.display()))?;
    let headers = reader
        .headers()
        .with_context(|| format!("read csv header of {}", path.display()))?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("read csv record {} of {}", idx + 1, path.display()))?;
        rows.push(record.iter().map(CellValue::from_text).collect());
    }
    Ok(Grid {
        headers,
        rows,
        infer_numbers: true,
    })
}

fn table_from_grid(grid: Grid) -> Result<Table> {
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(grid.headers.len());
    for (idx, header) in grid.headers.iter().enumerate() {
        index.entry(header.as_str()).or_insert(idx);
    }

    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .filter(|col| !index.contains_key(*col))
        .copied()
        .collect();
    if !missing.is_empty() {
        bail!("missing required column(s): {}", missing.join(", "));
    }

    let mut records = Vec::with_capacity(grid.rows.len());
    for row in &grid.rows {
        if row.iter().all(CellValue::is_blank) {
            continue;
        }
        let cell = |col: &str| -> CellValue {
            let value = index
                .get(col)
                .and_then(|idx| row.get(*idx))
                .cloned()
                .unwrap_or(CellValue::Empty);
            if grid.infer_numbers && !TEXT_COLUMNS.contains(&col) {
                value.infer_number()
            } else {
                value
            }
        };
        let mut record = MatchRecord::new(
            cell(COL_PLAYER).to_string(),
            cell(COL_CHAMPION).to_string(),
            cell(COL_MATCH_ID).to_string(),
        );
        for col in REQUIRED_COLUMNS {
            record.set_field(col, cell(col));
        }
        records.push(record);
    }
    Ok(Table::new(records))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_numbers_display_without_fraction() {
        assert_eq!(CellValue::Number(300.0).to_string(), "300");
        assert_eq!(CellValue::Number(-150.0).to_string(), "-150");
        assert_eq!(CellValue::Number(3.25).to_string(), "3.25");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn only_plain_decimals_become_numbers() {
        let infer = |raw: &str| CellValue::from_text(raw).infer_number();
        assert_eq!(infer(" 12 "), CellValue::Number(12.0));
        assert_eq!(infer("-3.5"), CellValue::Number(-3.5));
        assert_eq!(infer("Flash"), CellValue::Text("Flash".to_string()));
        assert_eq!(infer("nan"), CellValue::Text("nan".to_string()));
        assert_eq!(infer("Infinity"), CellValue::Text("Infinity".to_string()));
        assert_eq!(infer("1e3"), CellValue::Text("1e3".to_string()));
        assert_eq!(infer("-"), CellValue::Text("-".to_string()));
        assert_eq!(infer("  "), CellValue::Empty);
    }

    #[test]
    fn grid_without_required_column_is_rejected() {
        let grid = Grid {
            headers: vec![COL_PLAYER.to_string(), COL_CHAMPION.to_string()],
            rows: Vec::new(),
            infer_numbers: false,
        };
        let err = table_from_grid(grid).unwrap_err().to_string();
        assert!(err.contains(COL_MATCH_ID));
        assert!(err.contains("Item 6"));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect();
        let mut filled = vec![CellValue::Empty; headers.len()];
        filled[0] = CellValue::from("Alice");
        filled[1] = CellValue::from("Ahri");
        let grid = Grid {
            headers,
            rows: vec![vec![CellValue::Empty; REQUIRED_COLUMNS.len()], filled],
            infer_numbers: true,
        };
        let table = table_from_grid(grid).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows()[0].player, "Alice");
        assert_eq!(table.rows()[0].champion, "Ahri");
    }
}
