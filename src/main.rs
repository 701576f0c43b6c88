use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph, Wrap};

use courtvision_terminal::config::Config;
use courtvision_terminal::games::GameSide;
use courtvision_terminal::leaderboard::LeaderboardKind;
use courtvision_terminal::state::{
    apply_delta, AppState, ComparisonView, Delta, ProviderCommand, Screen, PICKER_LIMIT,
};
use courtvision_terminal::stats::{
    bar_percentage, format_height, format_stat, FormatKind, StatEntity, Winner,
};
use courtvision_terminal::{demo_feed, feed};

struct App {
    state: AppState,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    refresh_interval: Option<Duration>,
    last_refresh: Instant,
}

impl App {
    fn new(config: &Config, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        Self {
            state: AppState::new(config.season_id),
            should_quit: false,
            cmd_tx,
            refresh_interval: config.refresh_interval,
            last_refresh: Instant::now(),
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.search_active {
            self.on_search_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.state.screen = self.state.screen.next(),
            KeyCode::BackTab => self.state.screen = self.state.screen.prev(),
            KeyCode::Char(c @ '1'..='6') => {
                let idx = c as usize - '1' as usize;
                self.state.screen = Screen::ALL[idx];
            }
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('/') => {
                if matches!(
                    self.state.screen,
                    Screen::Players | Screen::ComparePlayers | Screen::CompareTeams
                ) {
                    self.state.search_active = true;
                }
            }
            KeyCode::Enter => self.state.pick_under_cursor(),
            KeyCode::Char('x') => {
                if let Some(compare) = self.state.active_compare_mut() {
                    compare.clear();
                }
            }
            KeyCode::Char('c') => self.request_comparison(),
            KeyCode::Char('+') | KeyCode::Char('=') => {
                self.change_season(self.state.season_id.saturating_add(1))
            }
            KeyCode::Char('-') => self.change_season(self.state.season_id.saturating_sub(1)),
            KeyCode::Char('r') => self.refresh_screen(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => {
                self.state.help_overlay = false;
                self.clear_search();
            }
            _ => {}
        }
    }

    fn on_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.state.search_active = false;
                self.clear_search();
            }
            KeyCode::Enter => {
                self.state.search_active = false;
                if self.state.screen == Screen::Players {
                    let name = Some(self.state.search.trim().to_string()).filter(|n| !n.is_empty());
                    self.request_players(name);
                }
            }
            KeyCode::Backspace => {
                self.state.search.pop();
            }
            KeyCode::Char(c) => self.state.search.push(c),
            _ => {}
        }
        self.state.clamp_selection();
    }

    fn clear_search(&mut self) {
        if self.state.clear_search() {
            self.request_players(None);
        }
    }

    fn send(&mut self, cmd: ProviderCommand, label: &str) -> bool {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log(format!("[INFO] {label} fetch unavailable"));
            return false;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] {label} request failed"));
            return false;
        }
        true
    }

    fn request_initial(&mut self) {
        self.request_leaderboards();
        self.request_players(None);
        self.send(ProviderCommand::FetchTeams, "Teams");
        self.request_games();
    }

    fn request_leaderboards(&mut self) {
        let season_id = self.state.season_id;
        if self.send(ProviderCommand::FetchLeaderboards { season_id }, "Leaderboard") {
            self.state.leaderboards_loading = true;
        }
        self.last_refresh = Instant::now();
    }

    fn request_players(&mut self, name: Option<String>) {
        let query = name.clone();
        if self.send(ProviderCommand::FetchPlayers { name }, "Players") {
            self.state.players_loading = true;
            self.state.players_query = query;
        }
    }

    fn request_games(&mut self) {
        if self.send(ProviderCommand::FetchGames, "Games") {
            self.state.games_loading = true;
        }
    }

    fn request_comparison(&mut self) {
        let season_id = self.state.season_id;
        let (noun, label) = match self.state.screen {
            Screen::ComparePlayers => ("players", "Player comparison"),
            Screen::CompareTeams => ("teams", "Team comparison"),
            _ => return,
        };
        let Some(compare) = self.state.active_compare() else {
            return;
        };
        let (first, second) = match compare.pair(noun) {
            Ok(pair) => pair,
            Err(err) => {
                self.state.push_log(format!("[WARN] {err}"));
                return;
            }
        };
        let cmd = if self.state.screen == Screen::CompareTeams {
            ProviderCommand::CompareTeams {
                team1_id: first,
                team2_id: second,
                season_id,
            }
        } else {
            ProviderCommand::ComparePlayers {
                player1_id: first,
                player2_id: second,
                season_id,
            }
        };
        if self.send(cmd, label)
            && let Some(compare) = self.state.active_compare_mut()
        {
            compare.view = ComparisonView::Loading;
        }
    }

    fn change_season(&mut self, season_id: u32) {
        let before = self.state.season_id;
        self.state.set_season(season_id);
        if self.state.season_id != before {
            self.state
                .push_log(format!("[INFO] Season {}", self.state.season_id));
            self.request_leaderboards();
        }
    }

    fn refresh_screen(&mut self) {
        match self.state.screen {
            Screen::Dashboard | Screen::Visualize => self.request_leaderboards(),
            Screen::Players => {
                let name = Some(self.state.search.trim().to_string()).filter(|n| !n.is_empty());
                self.request_players(name);
            }
            Screen::ComparePlayers | Screen::CompareTeams => self.request_comparison(),
            Screen::Games => self.request_games(),
        }
    }

    fn maybe_refresh_leaderboards(&mut self) {
        let Some(interval) = self.refresh_interval else {
            return;
        };
        if !matches!(self.state.screen, Screen::Dashboard | Screen::Visualize) {
            return;
        }
        if !self.state.leaderboards_loading && self.last_refresh.elapsed() >= interval {
            self.request_leaderboards();
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    let config = Config::from_env();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    if config.demo {
        demo_feed::spawn_demo_provider(config.clone(), tx, cmd_rx);
    } else {
        feed::spawn_provider(config.clone(), tx, cmd_rx);
    }

    let mut app = App::new(&config, Some(cmd_tx));
    app.request_initial();
    let res = run_app(&mut terminal, &mut app, rx);

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
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.maybe_refresh_leaderboards();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
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
            Constraint::Length(6),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Dashboard => render_dashboard(frame, chunks[1], &app.state),
        Screen::Players => render_players(frame, chunks[1], &app.state),
        Screen::ComparePlayers | Screen::CompareTeams => render_compare(frame, chunks[1], &app.state),
        Screen::Visualize => render_visualize(frame, chunks[1], &app.state),
        Screen::Games => render_games(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state, chunks[2].height.saturating_sub(2)))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn screen_label(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => "Dashboard",
        Screen::Players => "Players",
        Screen::ComparePlayers => "Compare Players",
        Screen::CompareTeams => "Compare Teams",
        Screen::Visualize => "Visualize",
        Screen::Games => "Games",
    }
}

fn header_text(state: &AppState) -> Text<'static> {
    let mut title = format!(
        "COURTVISION | {} | Season {}",
        screen_label(state.screen),
        state.season_id
    );
    if let Some(fetched) = state.leaderboards_fetched_at {
        let local = DateTime::<Local>::from(fetched);
        title.push_str(&format!(" | Updated {}", local.format("%H:%M:%S")));
    }
    let tabs = Screen::ALL
        .iter()
        .enumerate()
        .flat_map(|(idx, screen)| {
            let style = if *screen == state.screen {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            [
                Span::styled(format!("{} {}", idx + 1, screen_label(*screen)), style),
                Span::raw("  "),
            ]
        })
        .collect::<Vec<_>>();
    Text::from(vec![
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(tabs),
    ])
}

fn footer_text(state: &AppState) -> String {
    if state.search_active {
        return "Type to filter | Enter Apply | Esc Cancel".to_string();
    }
    match state.screen {
        Screen::Dashboard | Screen::Visualize => {
            "Tab Screens | j/k Stat | +/- Season | r Refresh | ? Help | q Quit".to_string()
        }
        Screen::Players => "Tab Screens | j/k Move | / Search | r Refresh | ? Help | q Quit".to_string(),
        Screen::ComparePlayers | Screen::CompareTeams => {
            "j/k Move | Enter Pick | c Compare | x Clear | / Filter | +/- Season | ? Help | q Quit"
                .to_string()
        }
        Screen::Games => "Tab Screens | j/k Scroll | r Refresh | ? Help | q Quit".to_string(),
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let mut cells = Vec::with_capacity(4);
    for row in rows.iter() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(*row);
        cells.extend(cols.iter().copied());
    }

    for (kind, cell) in LeaderboardKind::ALL.into_iter().zip(cells) {
        let selected = kind == state.leaderboard_kind;
        let border = if selected {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let panel = Paragraph::new(leaderboard_text(state, kind))
            .block(
                Block::default()
                    .title(kind.title())
                    .borders(Borders::ALL)
                    .border_style(border),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(panel, cell);
    }
}

fn leaderboard_text(state: &AppState, kind: LeaderboardKind) -> Text<'static> {
    let ranked = state.leaderboard(kind);
    if ranked.is_empty() {
        let msg = if state.leaderboards_loading {
            "Loading...".to_string()
        } else {
            format!("No data for season {}", state.season_id)
        };
        return Text::from(Line::from(Span::styled(msg, Style::default().fg(Color::DarkGray))));
    }

    let mut lines = Vec::new();
    let rows = kind.rows(ranked);
    let leader = rows.clone().next();
    lines.push(Line::from(Span::styled(
        kind.insight(leader.as_ref()),
        Style::default().fg(Color::Cyan),
    )));
    lines.push(Line::from(Span::styled(
        format!("{:>3}  {:<24} {:>6} {:>4}", "#", "Player", kind.short_label(), "GP"),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for row in rows {
        lines.push(Line::from(format!(
            "{:>3}  {:<24} {:>6} {:>4}",
            row.rank,
            truncate(&row.entity.name, 24),
            format_stat(row.value, FormatKind::Decimal1),
            format_stat(row.aux, FormatKind::RawInteger),
        )));
    }
    Text::from(lines)
}

fn render_players(frame: &mut Frame, area: Rect, state: &AppState) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(32)])
        .split(area);

    let players = state.filtered_players();
    let mut lines = vec![search_line(state)];
    lines.push(Line::from(Span::styled(
        format!("{:<26} {:<4} {:>6} {:>6} {:>3}", "Name", "Pos", "Ht", "Wt", "#"),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    if players.is_empty() {
        let msg = if state.players_loading {
            "Loading players..."
        } else {
            "No players found"
        };
        lines.push(Line::from(Span::styled(msg, Style::default().fg(Color::DarkGray))));
    }

    let visible = columns[0].height.saturating_sub(4) as usize;
    let (start, end) = visible_range(state.players_selected, players.len(), visible);
    for idx in start..end {
        let p = players[idx];
        let style = if idx == state.players_selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!(
                "{:<26} {:<4} {:>6} {:>6} {:>3}",
                truncate(&p.name, 26),
                p.position.as_deref().unwrap_or("-"),
                format_height(p.height_inches, "-"),
                p.weight_lbs.map(|w| format!("{w} lb")).unwrap_or_else(|| "-".to_string()),
                p.jersey_number.map(|j| j.to_string()).unwrap_or_else(|| "-".to_string()),
            ),
            style,
        )));
    }
    let list = Paragraph::new(lines).block(
        Block::default()
            .title(format!("Players ({})", players.len()))
            .borders(Borders::ALL),
    );
    frame.render_widget(list, columns[0]);

    let detail = match players.get(state.players_selected) {
        Some(p) => vec![
            Line::from(Span::styled(p.name.clone(), Style::default().add_modifier(Modifier::BOLD))),
            Line::from(format!("ID: {}", p.id)),
            Line::from(format!("Position: {}", p.position.as_deref().unwrap_or("-"))),
            Line::from(format!("Height: {}", format_height(p.height_inches, "-"))),
            Line::from(format!(
                "Status: {}",
                match p.is_active {
                    Some(false) => "Inactive",
                    _ => "Active",
                }
            )),
        ],
        None => vec![Line::from("No player selected")],
    };
    let detail = Paragraph::new(detail).block(Block::default().title("Player").borders(Borders::ALL));
    frame.render_widget(detail, columns[1]);
}

fn render_compare(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(compare) = state.active_compare() else {
        return;
    };
    let teams = state.screen == Screen::CompareTeams;
    let noun = if teams { "teams" } else { "players" };
    let name_of = |id: u32| -> String {
        let name = if teams {
            state.team_name(id)
        } else {
            state.player_name(id)
        };
        name.map(str::to_string).unwrap_or_else(|| format!("#{id}"))
    };

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(40)])
        .split(area);

    let ids = state.picker_ids();
    let mut picker = vec![search_line(state)];
    if ids.is_empty() {
        picker.push(Line::from(Span::styled(
            format!("No {noun} to pick"),
            Style::default().fg(Color::DarkGray),
        )));
    }
    let visible = columns[0].height.saturating_sub(3) as usize;
    let (start, end) = visible_range(compare.cursor, ids.len(), visible);
    for (idx, id) in ids.iter().enumerate().take(end).skip(start) {
        let marker = if compare.first == Some(*id) {
            "[1]"
        } else if compare.second == Some(*id) {
            "[2]"
        } else {
            "   "
        };
        let style = if idx == compare.cursor {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        picker.push(Line::from(Span::styled(
            format!("{marker} {}", truncate(&name_of(*id), 26)),
            style,
        )));
    }
    let title = if teams {
        "Teams".to_string()
    } else {
        format!("Players (first {PICKER_LIMIT})")
    };
    let picker = Paragraph::new(picker).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(picker, columns[0]);

    let slot = |id: Option<u32>| id.map(&name_of).unwrap_or_else(|| "-".to_string());
    let mut lines = vec![
        Line::from(format!("1: {}", slot(compare.first))),
        Line::from(format!("2: {}", slot(compare.second))),
        Line::from(""),
    ];
    match &compare.view {
        ComparisonView::Empty => lines.push(Line::from(Span::styled(
            format!("Pick two {noun} with Enter, then press c to compare."),
            Style::default().fg(Color::DarkGray),
        ))),
        ComparisonView::Loading => lines.push(Line::from("Loading comparison...")),
        ComparisonView::Incomplete(_) => lines.push(Line::from(Span::styled(
            format!(
                "One or both {noun} don't have statistics available for season {}.",
                state.season_id
            ),
            Style::default().fg(Color::Yellow),
        ))),
        ComparisonView::Ready(result) => {
            let head = |entity: &StatEntity| {
                let mut label = truncate(&entity.name, 18);
                if let Some(pos) = &entity.position {
                    label.push_str(&format!(" {pos}"));
                }
                if entity.height_inches.is_some() {
                    label.push_str(&format!(" {}", entity.height_label()));
                }
                label
            };
            lines.push(Line::from(Span::styled(
                format!(
                    "{:<18} {:>26} {:>26}",
                    "Stat",
                    head(&result.entity1),
                    head(&result.entity2)
                ),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            let win = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
            for row in &result.rows {
                let (s1, s2) = match row.winner {
                    Winner::Entity1 => (win, Style::default()),
                    Winner::Entity2 => (Style::default(), win),
                    Winner::Tie => (Style::default(), Style::default()),
                };
                lines.push(Line::from(vec![
                    Span::raw(format!("{:<18} ", row.definition.label)),
                    Span::styled(format!("{:>26} ", row.display1), s1),
                    Span::styled(format!("{:>26}", row.display2), s2),
                ]));
            }
            lines.push(Line::from(""));
            lines.push(Line::from(format!(
                "Categories won: {} {} - {} {}",
                result.entity1.name,
                result.wins(Winner::Entity1),
                result.wins(Winner::Entity2),
                result.entity2.name
            )));
            lines.push(Line::from(Span::styled(
                result.summary(),
                Style::default().fg(Color::Cyan),
            )));
        }
    }

    let panel = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Comparison").borders(Borders::ALL));
    frame.render_widget(panel, columns[1]);
}

fn render_visualize(frame: &mut Frame, area: Rect, state: &AppState) {
    let kind = state.leaderboard_kind;
    let ranked = state.leaderboard(kind);
    let block = Block::default()
        .title(format!("{} ({})", kind.title(), kind.short_label()))
        .borders(Borders::ALL);
    if ranked.is_empty() {
        let msg = if state.leaderboards_loading {
            "Loading..."
        } else {
            "No leaderboard data"
        };
        let empty = Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let scale = kind.bar_scale(ranked);
    let bars = kind
        .rows(ranked)
        .map(|row| {
            Bar::default()
                .value(bar_percentage(row.value, scale).round() as u64)
                .label(Line::from(format!("{:>2}. {}", row.rank, truncate(&row.entity.name, 20))))
                .text_value(format_stat(row.value, FormatKind::Decimal1))
                .style(Style::default().fg(Color::Green))
        })
        .collect::<Vec<_>>();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .direction(Direction::Horizontal)
        .bar_width(1)
        .bar_gap(0)
        .max(100);
    frame.render_widget(chart, area);
}

fn render_games(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!("Recent Games ({})", state.games.len()))
        .borders(Borders::ALL);
    if state.games.is_empty() {
        let msg = if state.games_loading {
            "Loading games..."
        } else {
            "No games found"
        };
        let empty = Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let mut lines = vec![Line::from(Span::styled(
        format!(
            "{:<24} {:<22}   {:<22} {:>9}  {}",
            "Date", "Away", "Home", "Score", "Type"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    let win = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    for game in state.games.iter().skip(state.games_scroll as usize) {
        let (away_style, home_style) = match game.winner() {
            Some(GameSide::Away) => (win, Style::default()),
            Some(GameSide::Home) => (Style::default(), win),
            None => (Style::default(), Style::default()),
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{:<24} ", game.when())),
            Span::styled(format!("{:<22}", truncate(game.away_label(), 22)), away_style),
            Span::raw(" @ "),
            Span::styled(format!("{:<22}", truncate(game.home_label(), 22)), home_style),
            Span::raw(format!(
                " {:>9}  {}",
                game.score_line(),
                game.game_type.as_deref().unwrap_or("-")
            )),
        ]));
    }
    let list = Paragraph::new(lines).block(block);
    frame.render_widget(list, area);
}

fn search_line(state: &AppState) -> Line<'static> {
    let cursor = if state.search_active { "_" } else { "" };
    let style = if state.search_active {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Line::from(Span::styled(format!("Search: {}{cursor}", state.search), style))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out = text.chars().take(max.saturating_sub(1)).collect::<String>();
    out.push('…');
    out
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

fn console_text(state: &AppState, height: u16) -> String {
    let take = height.max(1) as usize;
    let skip = state.logs.len().saturating_sub(take);
    state
        .logs
        .iter()
        .skip(skip)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "CourtVision - Help",
        "",
        "Global:",
        "  Tab / Shift-Tab  Next / previous screen",
        "  1-6              Jump to screen",
        "  + / -            Season up / down",
        "  r                Refresh current screen",
        "  ?                Toggle help",
        "  q                Quit",
        "",
        "Dashboard / Visualize:",
        "  j/k or ↑/↓       Cycle statistic",
        "",
        "Players:",
        "  j/k or ↑/↓       Move",
        "  /                Search by name",
        "",
        "Compare:",
        "  Enter            Pick entry under cursor",
        "  c                Compare the two picks",
        "  x                Clear picks",
        "  /                Filter list",
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
