use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row,
    Table as StatsTable, Tabs, Wrap,
};

use lol_review::config::AppConfig;
use lol_review::dataset::{DataLoader, Table};
use lol_review::export::export_player_matches;
use lol_review::icons::IconLibrary;
use lol_review::selection::filter_by_player;
use lol_review::state::{AppState, ExportState, Focus};
use lol_review::trend::{TrendChart, TrendMetric};
use lol_review::view::{ChampionIcon, IconStrip, MatchDetail, StatCategory};

struct App<'a> {
    state: AppState,
    table: Option<&'a Table>,
    icons: IconLibrary,
    export_dir: PathBuf,
    should_quit: bool,
}

impl<'a> App<'a> {
    fn new(loaded: anyhow::Result<&'a Table>, config: &AppConfig) -> Self {
        let (state, table) = match loaded {
            Ok(table) => (AppState::from_table(table), Some(table)),
            Err(err) => (AppState::from_load_error(&err), None),
        };
        Self {
            state,
            table,
            icons: IconLibrary::from_config(config),
            export_dir: config.export_dir.clone(),
            should_quit: false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let Some(table) = self.table else {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.should_quit = true;
            }
            return;
        };
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.state.focus = self.state.focus.next(),
            KeyCode::BackTab => self.state.focus = self.state.focus.prev(),
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.select_next(table);
                self.announce_selection();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.select_prev(table);
                self.announce_selection();
            }
            KeyCode::Char('l') | KeyCode::Right => self.state.cycle_category(true),
            KeyCode::Char('h') | KeyCode::Left => self.state.cycle_category(false),
            KeyCode::Char('x') | KeyCode::Char('X') => self.export_selected_player(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn announce_selection(&mut self) {
        if self.state.focus == Focus::Category {
            return;
        }
        let Some(table) = self.table else {
            return;
        };
        let Some(view) = self.state.view(table, &self.icons) else {
            self.state.push_log("[INFO] No match selected");
            return;
        };
        let detail = &view.detail;
        self.state.push_log(format!(
            "[INFO] {} on {} (match {})",
            detail.player, detail.champion, detail.match_id
        ));
        if let Some(warning) = detail.champion_icon.warning() {
            self.state.push_log(format!("[WARN] {warning}"));
        }
    }

    fn export_selected_player(&mut self) {
        let Some(table) = self.table else {
            return;
        };
        let Some(player) = self.state.selected_player().map(str::to_string) else {
            self.state.push_log("[INFO] No player selected for export");
            return;
        };
        let rows = filter_by_player(table, &player);
        match export_player_matches(&self.export_dir, &player, &rows) {
            Ok(report) => {
                let path = report.path.display().to_string();
                self.state.push_log(format!(
                    "[INFO] Exported {} matches ({} trend points) to {path}",
                    report.matches, report.points
                ));
                self.state.export = ExportState {
                    path: Some(path),
                    message: format!("Exported {} matches", report.matches),
                    failed: false,
                    last_updated: Some(Instant::now()),
                };
            }
            Err(err) => {
                self.state.push_log(format!("[ERROR] Export failed: {err:#}"));
                self.state.export = ExportState {
                    path: None,
                    message: "Export failed".to_string(),
                    failed: true,
                    last_updated: Some(Instant::now()),
                };
            }
        }
    }
}

fn main() -> io::Result<()> {
    let config = AppConfig::from_env();
    let loader = DataLoader::new(config.data_file.clone());
    let mut app = App::new(loader.load(), &config);
    app.announce_selection();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    if let Some(message) = &app.state.load_error {
        eprintln!("error: could not load {}: {message}", loader.path().display());
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        app.state.maybe_clear_export(Instant::now());

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.table {
        Some(table) => render_dashboard(frame, chunks[1], app, table),
        None => render_load_error(frame, chunks[1], &app.state),
    }

    let footer = Paragraph::new(footer_text(&app.state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[2]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let title = match (app.table, app.state.selected_player()) {
        (Some(_), Some(player)) => format!(
            "LEAGUE MATCH REVIEW | {player} | {}",
            app.state.category.label()
        ),
        (Some(_), None) => "LEAGUE MATCH REVIEW | no players".to_string(),
        (None, _) => "LEAGUE MATCH REVIEW | data unavailable".to_string(),
    };
    let line1 = format!("  /\\   {title}");
    let line2 = " /  \\".to_string();
    let line3 = " \\__/".to_string();
    format!("{line1}\n{line2}\n{line3}")
}

fn footer_text(state: &AppState) -> String {
    if state.load_error.is_some() {
        return "q Quit".to_string();
    }
    let keys = "Tab Focus | j/k/↑/↓ Move | h/l/←/→ Category | x Export | ? Help | q Quit";
    if state.export.is_visible() {
        let status = match (&state.export.path, state.export.failed) {
            (Some(path), false) => format!("{}: {path}", state.export.message),
            _ => state.export.message.clone(),
        };
        return format!("{keys} | {status}");
    }
    keys.to_string()
}

fn render_load_error(frame: &mut Frame, area: Rect, state: &AppState) {
    let message = state.load_error.as_deref().unwrap_or("unknown error");
    let text = vec![
        Line::styled(
            "Could not load the match data file.",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(message.to_string()),
    ];
    let panel = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(panel, area);
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App, table: &Table) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(5)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(26), Constraint::Min(40)])
        .split(rows[0]);

    let sidebar = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[0]);

    let state = &app.state;
    let players: Vec<&str> = state.players.iter().map(String::as_str).collect();
    render_selector(
        frame,
        sidebar[0],
        "Players",
        &players,
        state.player_selected,
        state.focus == Focus::Players,
    );
    render_selector(
        frame,
        sidebar[1],
        "Matches",
        &state.match_labels(table),
        state.match_selected,
        state.focus == Focus::Matches,
    );

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(17), Constraint::Min(8)])
        .split(columns[1]);

    match state.view(table, &app.icons) {
        Some(view) => {
            render_detail(frame, main[0], &view.detail, state.focus == Focus::Category);
            render_trend(frame, main[1], &view.trend, &view.detail.player);
        }
        None => {
            let empty = Paragraph::new("No match selected")
                .style(Style::default().fg(Color::DarkGray))
                .block(Block::default().title("Match").borders(Borders::ALL));
            frame.render_widget(empty, columns[1]);
        }
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, rows[1]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_selector(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    items: &[&str],
    selected: usize,
    focused: bool,
) {
    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(focus_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if inner.height == 0 || inner.width == 0 {
        return;
    }
    if items.is_empty() {
        let empty = Paragraph::new("Nothing to select").style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, inner);
        return;
    }

    let (start, end) = visible_range(selected, items.len(), inner.height as usize);
    let lines: Vec<Line> = (start..end)
        .map(|idx| {
            let (prefix, style) = if idx == selected {
                ("> ", Style::default().fg(Color::White).bg(Color::DarkGray))
            } else {
                ("  ", Style::default())
            };
            Line::styled(format!("{prefix}{}", items[idx]), style)
        })
        .collect();
    frame.render_widget(Paragraph::new(lines), inner);
}

fn render_detail(frame: &mut Frame, area: Rect, detail: &MatchDetail, category_focused: bool) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(34), Constraint::Percentage(66)])
        .split(area);

    let champion = Paragraph::new(champion_lines(detail))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Champion").borders(Borders::ALL));
    frame.render_widget(champion, cols[0]);

    let block = Block::default()
        .title("Match Details")
        .borders(Borders::ALL)
        .border_style(focus_style(category_focused));
    let inner = block.inner(cols[1]);
    frame.render_widget(block, cols[1]);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(2),
            Constraint::Length(2),
        ])
        .split(inner);

    let selected_tab = StatCategory::ALL
        .iter()
        .position(|cat| *cat == detail.category)
        .unwrap_or(0);
    let titles: Vec<&str> = StatCategory::ALL.iter().map(|cat| cat.label()).collect();
    let tabs = Tabs::new(titles)
        .select(selected_tab)
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, parts[0]);

    let rows: Vec<Row> = detail
        .stats
        .iter()
        .map(|(name, value)| Row::new(vec![Cell::from(name.clone()), Cell::from(value.clone())]))
        .collect();
    let stats = StatsTable::new(rows, [Constraint::Percentage(65), Constraint::Percentage(35)])
        .header(Row::new(vec!["Stat", "Value"]).style(Style::default().add_modifier(Modifier::BOLD)));
    frame.render_widget(stats, parts[1]);

    render_icon_strip(frame, parts[2], "Build", &detail.items);
    render_icon_strip(frame, parts[3], "Summoner Spells", &detail.spells);
}

fn champion_lines(detail: &MatchDetail) -> Vec<Line<'static>> {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let mut lines = Vec::new();
    match &detail.champion_icon {
        ChampionIcon::Found { path, width } => {
            lines.push(Line::styled(
                format!("[{}]", detail.champion),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::styled(
                format!("{} ({width}px)", path.display()),
                Style::default().fg(Color::DarkGray),
            ));
        }
        ChampionIcon::Missing { .. } => {
            if let Some(warning) = detail.champion_icon.warning() {
                lines.push(Line::styled(
                    format!("! {warning}"),
                    Style::default().fg(Color::Yellow),
                ));
            }
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Player: ", bold),
        Span::raw(detail.player.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Champion: ", bold),
        Span::raw(detail.champion.clone()),
    ]));
    lines.push(Line::from(vec![
        Span::styled("Match: ", bold),
        Span::raw(detail.match_id.clone()),
    ]));
    lines.push(Line::from(""));
    for metric in &detail.metrics {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", metric.label), bold),
            Span::styled(metric.value.clone(), metric_style(&metric.value)),
        ]));
    }
    lines
}

fn metric_style(value: &str) -> Style {
    match value.trim().parse::<f64>() {
        Ok(v) if v > 0.0 => Style::default().fg(Color::Green),
        Ok(v) if v < 0.0 => Style::default().fg(Color::Red),
        _ => Style::default(),
    }
}

fn render_icon_strip(frame: &mut Frame, area: Rect, title: &str, strip: &IconStrip) {
    let heading = Line::styled(
        format!("{title} ({}px icons)", strip.width),
        Style::default().add_modifier(Modifier::BOLD),
    );
    let icons = if strip.icons.is_empty() {
        Line::styled("No icons", Style::default().fg(Color::DarkGray))
    } else {
        let mut spans = Vec::with_capacity(strip.icons.len() * 2);
        for (idx, icon) in strip.icons.iter().enumerate() {
            if idx > 0 {
                spans.push(Span::raw(" "));
            }
            spans.push(Span::styled(
                format!("[{}]", icon.name),
                Style::default().fg(Color::Black).bg(Color::Gray),
            ));
        }
        Line::from(spans)
    };
    frame.render_widget(Paragraph::new(vec![heading, icons]), area);
}

fn metric_color(metric: TrendMetric) -> Color {
    match metric {
        TrendMetric::GoldDiff10 => Color::Yellow,
        TrendMetric::CsDiff10 => Color::Cyan,
    }
}

fn render_trend(frame: &mut Frame, area: Rect, trend: &TrendChart, player: &str) {
    let block = Block::default()
        .title(format!("Recent form: {player}"))
        .borders(Borders::ALL);
    if trend.is_empty() {
        let empty = Paragraph::new("No numeric goldDiff@10 / csDiff@10 values")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let series: Vec<(TrendMetric, Vec<(f64, f64)>)> = TrendMetric::ALL
        .iter()
        .map(|metric| (*metric, trend.series(*metric)))
        .collect();

    let mut datasets = Vec::with_capacity(series.len() * 2);
    for (metric, data) in &series {
        let style = Style::default().fg(metric_color(*metric));
        datasets.push(
            Dataset::default()
                .name(metric.label())
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(style)
                .data(data),
        );
        // Point markers on top of the line; unnamed so the legend stays at two entries.
        datasets.push(
            Dataset::default()
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(style)
                .data(data),
        );
    }

    let mut x_labels: Vec<Span> = trend
        .categories
        .iter()
        .map(|c| Span::raw(c.clone()))
        .collect();
    if x_labels.len() == 1 {
        x_labels.push(Span::raw(""));
    }
    let [y_lo, y_hi] = trend.y_bounds();
    let y_labels = vec![
        Span::raw(format!("{y_lo:.0}")),
        Span::raw(format!("{:.0}", (y_lo + y_hi) / 2.0)),
        Span::raw(format!("{y_hi:.0}")),
    ];

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Match")
                .style(Style::default().fg(Color::Gray))
                .bounds(trend.x_bounds())
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("Difference")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_lo, y_hi])
                .labels(y_labels),
        );
    frame.render_widget(chart, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "League Match Review - Help",
        "",
        "Selection:",
        "  Tab / Shift-Tab  Focus players, matches, category",
        "  j/k or ↑/↓       Move in the focused list",
        "  h/l or ←/→       Previous / next stats category",
        "",
        "Other:",
        "  x                Export player matches to xlsx",
        "  ?                Toggle help",
        "  q                Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
