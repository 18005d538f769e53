use calamine::{Reader, open_workbook_auto};
use lol_review::dataset::{MatchRecord, REQUIRED_COLUMNS};
use lol_review::export::export_player_matches;
use tempfile::TempDir;

#[test]
fn export_writes_matches_and_trend_sheets() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("exports");
    let ahri = MatchRecord::new("Alice", "Ahri", "M1")
        .with_field("goldDiff@10", 300.0)
        .with_field("csDiff@10", 10.0)
        .with_field("Keystone Perk", "Electrocute");
    let lux = MatchRecord::new("Alice", "Lux", "M2")
        .with_field("goldDiff@10", -150.0)
        .with_field("csDiff@10", -5.0);

    let report = export_player_matches(&out, "Alice", &[&ahri, &lux]).expect("export");
    assert_eq!(report.matches, 2);
    assert_eq!(report.points, 4);
    assert!(report.path.starts_with(&out));
    assert!(report.path.is_file());

    let mut workbook = open_workbook_auto(&report.path).expect("open export");
    let matches = workbook.worksheet_range("Matches").expect("matches sheet");
    assert_eq!(matches.height(), 3);
    assert_eq!(matches.width(), REQUIRED_COLUMNS.len());

    let trend = workbook.worksheet_range("Trend").expect("trend sheet");
    assert_eq!(trend.height(), 5);
    let metric = trend.get_value((2, 1)).map(|cell| cell.to_string());
    assert_eq!(metric.as_deref(), Some("csDiff@10"));
}
