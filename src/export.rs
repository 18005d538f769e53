use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use rust_xlsxwriter::{Workbook, Worksheet};

use crate::dataset::{CellValue, MatchRecord, REQUIRED_COLUMNS};
use crate::trend::build_trend;

pub struct ExportReport {
    pub path: PathBuf,
    pub matches: usize,
    pub points: usize,
}

/// Writes a fresh workbook into `dir`; the source sheet is never touched.
pub fn export_player_matches(
    dir: &Path,
    player: &str,
    rows: &[&MatchRecord],
) -> Result<ExportReport> {
    fs::create_dir_all(dir).with_context(|| format!("create export dir {}", dir.display()))?;
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    let path = dir.join(format!("{}_{stamp}.xlsx", file_stem(player)));

    let mut workbook = Workbook::new();

    let matches = workbook.add_worksheet();
    matches.set_name("Matches").context("name matches sheet")?;
    for (col_idx, col) in REQUIRED_COLUMNS.iter().enumerate() {
        matches
            .write_string(0, col_idx as u16, *col)
            .with_context(|| format!("write header {col}"))?;
    }
    for (row_idx, row) in rows.iter().enumerate() {
        let cells: Vec<&CellValue> = REQUIRED_COLUMNS.iter().map(|col| row.field(col)).collect();
        write_cells(matches, row_idx as u32 + 1, &cells)?;
    }

    let trend = build_trend(rows);
    let sheet = workbook.add_worksheet();
    sheet.set_name("Trend").context("name trend sheet")?;
    for (col_idx, title) in ["Match ID", "Metric", "Value"].iter().enumerate() {
        sheet
            .write_string(0, col_idx as u16, *title)
            .with_context(|| format!("write header {title}"))?;
    }
    for (idx, point) in trend.points.iter().enumerate() {
        let row = idx as u32 + 1;
        sheet
            .write_string(row, 0, &point.match_id)
            .with_context(|| format!("write trend row {row}"))?;
        sheet
            .write_string(row, 1, point.metric.label())
            .with_context(|| format!("write trend row {row}"))?;
        sheet
            .write_number(row, 2, point.value)
            .with_context(|| format!("write trend row {row}"))?;
    }

    workbook
        .save(&path)
        .with_context(|| format!("save {}", path.display()))?;

    Ok(ExportReport {
        path,
        matches: rows.len(),
        points: trend.points.len(),
    })
}

fn write_cells(worksheet: &mut Worksheet, row: u32, cells: &[&CellValue]) -> Result<()> {
    for (col_idx, cell) in cells.iter().enumerate() {
        let col = col_idx as u16;
        match cell {
            CellValue::Number(v) if v.is_finite() => {
                worksheet
                    .write_number(row, col, *v)
                    .with_context(|| format!("write cell ({row},{col})"))?;
            }
            CellValue::Empty => {}
            other => {
                worksheet
                    .write_string(row, col, other.to_string())
                    .with_context(|| format!("write cell ({row},{col})"))?;
            }
        }
    }
    Ok(())
}

fn file_stem(player: &str) -> String {
    let stem: String = player
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    if stem.trim_matches('_').is_empty() {
        "player".to_string()
    } else {
        stem
    }
}
