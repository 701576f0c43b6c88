use std::collections::{HashMap, VecDeque};
use std::time::SystemTime;

use thiserror::Error;

use crate::api::{PlayerListing, TeamListing};
use crate::games::GameRow;
use crate::leaderboard::LeaderboardKind;
use crate::stats::{
    build_comparison, ComparisonResult, IncompleteComparison, StatDefinition, StatEntity,
    PLAYER_STATS, TEAM_STATS,
};

const MAX_LOGS: usize = 200;
/// The compare pickers list at most this many candidates.
pub const PICKER_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Players,
    ComparePlayers,
    CompareTeams,
    Visualize,
    Games,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Dashboard,
        Screen::Players,
        Screen::ComparePlayers,
        Screen::CompareTeams,
        Screen::Visualize,
        Screen::Games,
    ];

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|s| *s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please select two {0} to compare")]
    Incomplete(&'static str),
    #[error("Please select two different {0}")]
    SameEntity(&'static str),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ComparisonView {
    #[default]
    Empty,
    Loading,
    Ready(ComparisonResult),
    Incomplete(IncompleteComparison),
}

/// Picker + result of one comparison screen.
#[derive(Debug, Clone, Default)]
pub struct CompareState {
    pub cursor: usize,
    pub first: Option<u32>,
    pub second: Option<u32>,
    pub view: ComparisonView,
}

impl CompareState {
    /// Fills the first empty slot; once both are set the second is replaced.
    /// Any shown or pending result belongs to the old pair and is dropped.
    pub fn pick(&mut self, id: u32) {
        if self.first.is_none() {
            self.first = Some(id);
        } else {
            self.second = Some(id);
        }
        self.view = ComparisonView::Empty;
    }

    pub fn clear(&mut self) {
        self.first = None;
        self.second = None;
        self.view = ComparisonView::Empty;
    }

    pub fn pair(&self, noun: &'static str) -> Result<(u32, u32), SelectionError> {
        match (self.first, self.second) {
            (Some(a), Some(b)) if a == b => Err(SelectionError::SameEntity(noun)),
            (Some(a), Some(b)) => Ok((a, b)),
            _ => Err(SelectionError::Incomplete(noun)),
        }
    }

    /// True while a request for exactly this pair is outstanding.
    fn awaits(&self, requested: (u32, u32)) -> bool {
        self.view == ComparisonView::Loading
            && self.first == Some(requested.0)
            && self.second == Some(requested.1)
    }

    fn settle(
        &mut self,
        first: Option<&StatEntity>,
        second: Option<&StatEntity>,
        definitions: &[StatDefinition],
    ) -> Option<IncompleteComparison> {
        match build_comparison(first, second, definitions) {
            Ok(result) => {
                self.view = ComparisonView::Ready(result);
                None
            }
            Err(missing) => {
                self.view = ComparisonView::Incomplete(missing);
                Some(missing)
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    pub season_id: u32,
    pub leaderboards: HashMap<LeaderboardKind, Vec<StatEntity>>,
    pub leaderboard_kind: LeaderboardKind,
    pub leaderboards_loading: bool,
    pub leaderboards_fetched_at: Option<SystemTime>,
    pub players: Vec<PlayerListing>,
    pub players_loading: bool,
    pub players_selected: usize,
    /// Name filter the server applied to `players`, if any.
    pub players_query: Option<String>,
    pub teams: Vec<TeamListing>,
    pub search: String,
    pub search_active: bool,
    pub player_compare: CompareState,
    pub team_compare: CompareState,
    pub games: Vec<GameRow>,
    pub games_loading: bool,
    pub games_scroll: u16,
    pub logs: VecDeque<String>,
    pub help_overlay: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(1)
    }
}

impl AppState {
    pub fn new(season_id: u32) -> Self {
        Self {
            screen: Screen::Dashboard,
            season_id: season_id.max(1),
            leaderboards: HashMap::new(),
            leaderboard_kind: LeaderboardKind::Points,
            leaderboards_loading: false,
            leaderboards_fetched_at: None,
            players: Vec::new(),
            players_loading: false,
            players_selected: 0,
            players_query: None,
            teams: Vec::new(),
            search: String::new(),
            search_active: false,
            player_compare: CompareState::default(),
            team_compare: CompareState::default(),
            games: Vec::new(),
            games_loading: false,
            games_scroll: 0,
            logs: VecDeque::new(),
            help_overlay: false,
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn leaderboard(&self, kind: LeaderboardKind) -> &[StatEntity] {
        self.leaderboards
            .get(&kind)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn cycle_leaderboard_kind(&mut self) {
        self.leaderboard_kind = self.leaderboard_kind.next();
    }

    /// Changing season invalidates everything that was season-scoped.
    pub fn set_season(&mut self, season_id: u32) {
        let season_id = season_id.max(1);
        if season_id == self.season_id {
            return;
        }
        self.season_id = season_id;
        self.leaderboards.clear();
        self.leaderboards_fetched_at = None;
        self.player_compare.view = ComparisonView::Empty;
        self.team_compare.view = ComparisonView::Empty;
    }

    /// Empties the search box. Returns true when the player list was narrowed
    /// by the server and the full list has to be fetched again.
    pub fn clear_search(&mut self) -> bool {
        self.search.clear();
        self.clamp_selection();
        self.players_query.take().is_some()
    }

    pub fn filtered_players(&self) -> Vec<&PlayerListing> {
        self.players
            .iter()
            .filter(|p| contains_ci(&p.name, &self.search))
            .collect()
    }

    pub fn filtered_teams(&self) -> Vec<&TeamListing> {
        self.teams
            .iter()
            .filter(|t| contains_ci(&t.name, &self.search))
            .collect()
    }

    /// Candidate ids shown in the picker of the current compare screen.
    pub fn picker_ids(&self) -> Vec<u32> {
        match self.screen {
            Screen::ComparePlayers => self
                .filtered_players()
                .into_iter()
                .take(PICKER_LIMIT)
                .map(|p| p.id)
                .collect(),
            Screen::CompareTeams => self.filtered_teams().into_iter().map(|t| t.id).collect(),
            _ => Vec::new(),
        }
    }

    pub fn active_compare(&self) -> Option<&CompareState> {
        match self.screen {
            Screen::ComparePlayers => Some(&self.player_compare),
            Screen::CompareTeams => Some(&self.team_compare),
            _ => None,
        }
    }

    pub fn active_compare_mut(&mut self) -> Option<&mut CompareState> {
        match self.screen {
            Screen::ComparePlayers => Some(&mut self.player_compare),
            Screen::CompareTeams => Some(&mut self.team_compare),
            _ => None,
        }
    }

    pub fn player_name(&self, id: u32) -> Option<&str> {
        self.players.iter().find(|p| p.id == id).map(|p| p.name.as_str())
    }

    pub fn team_name(&self, id: u32) -> Option<&str> {
        self.teams.iter().find(|t| t.id == id).map(|t| t.name.as_str())
    }

    pub fn select_next(&mut self) {
        match self.screen {
            Screen::Players => {
                let total = self.filtered_players().len();
                self.players_selected = step_forward(self.players_selected, total);
            }
            Screen::ComparePlayers | Screen::CompareTeams => {
                let total = self.picker_ids().len();
                if let Some(compare) = self.active_compare_mut() {
                    compare.cursor = step_forward(compare.cursor, total);
                }
            }
            Screen::Games => {
                let max = self.games.len().saturating_sub(1) as u16;
                self.games_scroll = self.games_scroll.saturating_add(1).min(max);
            }
            Screen::Dashboard | Screen::Visualize => self.cycle_leaderboard_kind(),
        }
    }

    pub fn select_prev(&mut self) {
        match self.screen {
            Screen::Players => {
                let total = self.filtered_players().len();
                self.players_selected = step_back(self.players_selected, total);
            }
            Screen::ComparePlayers | Screen::CompareTeams => {
                let total = self.picker_ids().len();
                if let Some(compare) = self.active_compare_mut() {
                    compare.cursor = step_back(compare.cursor, total);
                }
            }
            Screen::Games => self.games_scroll = self.games_scroll.saturating_sub(1),
            Screen::Dashboard | Screen::Visualize => {
                for _ in 1..LeaderboardKind::ALL.len() {
                    self.cycle_leaderboard_kind();
                }
            }
        }
    }

    pub fn clamp_selection(&mut self) {
        let players_total = self.filtered_players().len();
        self.players_selected = clamp_index(self.players_selected, players_total);
        let player_picks = self.filtered_players().len().min(PICKER_LIMIT);
        self.player_compare.cursor = clamp_index(self.player_compare.cursor, player_picks);
        let team_picks = self.filtered_teams().len();
        self.team_compare.cursor = clamp_index(self.team_compare.cursor, team_picks);
    }

    /// Assigns the entry under the cursor to the next comparison slot.
    pub fn pick_under_cursor(&mut self) {
        let ids = self.picker_ids();
        let Some(compare) = self.active_compare_mut() else {
            return;
        };
        if let Some(id) = ids.get(compare.cursor).copied() {
            compare.pick(id);
        }
    }
}

fn step_forward(current: usize, total: usize) -> usize {
    if total == 0 { 0 } else { (current + 1) % total }
}

fn step_back(current: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else if current == 0 {
        total - 1
    } else {
        current - 1
    }
}

fn clamp_index(current: usize, total: usize) -> usize {
    if total == 0 { 0 } else { current.min(total - 1) }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Players,
    Games,
    PlayerComparison,
    TeamComparison,
}

#[derive(Debug, Clone)]
pub enum Delta {
    SetLeaderboard {
        kind: LeaderboardKind,
        season_id: u32,
        rows: Vec<StatEntity>,
    },
    LeaderboardsDone {
        season_id: u32,
    },
    SetPlayers(Vec<PlayerListing>),
    SetTeams(Vec<TeamListing>),
    SetPlayerComparison {
        season_id: u32,
        requested: (u32, u32),
        first: Option<StatEntity>,
        second: Option<StatEntity>,
    },
    SetTeamComparison {
        season_id: u32,
        requested: (u32, u32),
        first: Option<StatEntity>,
        second: Option<StatEntity>,
    },
    RequestFailed(RequestKind),
    SetGames(Vec<GameRow>),
    Log(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    FetchLeaderboards { season_id: u32 },
    FetchPlayers { name: Option<String> },
    FetchTeams,
    ComparePlayers { player1_id: u32, player2_id: u32, season_id: u32 },
    CompareTeams { team1_id: u32, team2_id: u32, season_id: u32 },
    FetchGames,
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::SetLeaderboard {
            kind,
            season_id,
            rows,
        } => {
            if season_id != state.season_id {
                return;
            }
            state.leaderboards.insert(kind, rows);
            state.leaderboards_fetched_at = Some(SystemTime::now());
        }
        Delta::LeaderboardsDone { season_id } => {
            if season_id == state.season_id {
                state.leaderboards_loading = false;
            }
        }
        Delta::SetPlayers(players) => {
            state.players = players;
            state.players_loading = false;
            state.clamp_selection();
        }
        Delta::SetTeams(teams) => {
            state.teams = teams;
            state.clamp_selection();
        }
        Delta::SetPlayerComparison {
            season_id,
            requested,
            first,
            second,
        } => {
            // Picks changed or were cleared while the request was in flight.
            if season_id != state.season_id || !state.player_compare.awaits(requested) {
                return;
            }
            if let Some(missing) =
                state
                    .player_compare
                    .settle(first.as_ref(), second.as_ref(), &PLAYER_STATS)
            {
                state.push_log(format!("[INFO] Player comparison: {missing}"));
            }
        }
        Delta::SetTeamComparison {
            season_id,
            requested,
            first,
            second,
        } => {
            // Picks changed or were cleared while the request was in flight.
            if season_id != state.season_id || !state.team_compare.awaits(requested) {
                return;
            }
            if let Some(missing) =
                state
                    .team_compare
                    .settle(first.as_ref(), second.as_ref(), &TEAM_STATS)
            {
                state.push_log(format!("[INFO] Team comparison: {missing}"));
            }
        }
        // Previous data stays on screen; only the loading markers are reset.
        Delta::RequestFailed(kind) => match kind {
            RequestKind::Players => state.players_loading = false,
            RequestKind::Games => state.games_loading = false,
            RequestKind::PlayerComparison | RequestKind::TeamComparison => {
                let compare = if kind == RequestKind::TeamComparison {
                    &mut state.team_compare
                } else {
                    &mut state.player_compare
                };
                if compare.view == ComparisonView::Loading {
                    compare.view = ComparisonView::Empty;
                }
            }
        },
        Delta::SetGames(games) => {
            let max = games.len().saturating_sub(1) as u16;
            state.games = games;
            state.games_loading = false;
            state.games_scroll = state.games_scroll.min(max);
        }
        Delta::Log(msg) => state.push_log(msg),
    }
}
