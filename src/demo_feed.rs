use std::collections::HashMap;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::api::{EntityPair, PlayerListing, TeamListing};
use crate::config::Config;
use crate::games::GameRow;
use crate::leaderboard::LeaderboardKind;
use crate::player_form::POSITIONS;
use crate::state::{Delta, ProviderCommand};
use crate::stats::{
    StatEntity, ASSISTS_PER_GAME, BLOCKS_PER_GAME, FIELD_GOAL_PCT, FREE_THROW_PCT, GAMES_PLAYED,
    POINTS_PER_GAME, REBOUNDS_PER_GAME, STEALS_PER_GAME, THREE_POINT_PCT,
};

/// Seasons past this one have no statistics at all.
pub const DEMO_SEASONS: u32 = 3;

const LATENCY: Duration = Duration::from_millis(120);

const FIRST_NAMES: [&str; 10] = [
    "Marcus", "Andre", "Jalen", "Tyrese", "Devin", "Malik", "Isaiah", "Darius", "Cole", "Luka",
];
const LAST_NAMES: [&str; 4] = ["Holloway", "Brooks", "Okafor", "Vance"];
const TEAMS: [(&str, &str, &str, &str); 8] = [
    ("Harbor Hawks", "HHK", "Boston", "East"),
    ("Lakeside Lynx", "LLX", "Chicago", "East"),
    ("Capital Comets", "CCM", "Washington", "East"),
    ("Bayou Bulls", "BBU", "New Orleans", "West"),
    ("Desert Dusters", "DDS", "Phoenix", "West"),
    ("Summit Stags", "SST", "Denver", "West"),
    ("Pacific Pilots", "PPL", "Portland", "West"),
    ("Empire Engines", "EEN", "New York", "East"),
];

/// A small, fully offline league used when the API is unavailable.
#[derive(Debug, Clone)]
pub struct DemoLeague {
    pub season_id: u32,
    players: Vec<PlayerListing>,
    teams: Vec<TeamListing>,
    player_stats: HashMap<u32, StatEntity>,
    team_stats: HashMap<u32, StatEntity>,
    games: Vec<GameRow>,
}

/// Same season, same league: the generator is seeded by the season id.
pub fn demo_league(season_id: u32) -> DemoLeague {
    let season_id = season_id.max(1);
    let mut rng = StdRng::seed_from_u64(u64::from(season_id));

    let players = roster();
    let teams = TEAMS
        .iter()
        .enumerate()
        .map(|(idx, (name, abbr, city, conference))| TeamListing {
            id: idx as u32 + 1,
            name: name.to_string(),
            abbreviation: Some(abbr.to_string()),
            city: Some(city.to_string()),
            conference: Some(conference.to_string()),
            division: None,
        })
        .collect::<Vec<_>>();

    let mut player_stats = HashMap::new();
    let mut team_stats = HashMap::new();
    if season_id <= DEMO_SEASONS {
        for player in &players {
            // Every seventh player sat the season out.
            if player.id % 7 == 0 {
                continue;
            }
            player_stats.insert(player.id, player_line(&mut rng, player));
        }
        for team in &teams {
            team_stats.insert(team.id, team_line(&mut rng, team));
        }
    }

    let games = schedule(&mut rng, season_id, &teams);

    DemoLeague {
        season_id,
        players,
        teams,
        player_stats,
        team_stats,
        games,
    }
}

impl DemoLeague {
    pub fn players(&self) -> &[PlayerListing] {
        &self.players
    }

    pub fn teams(&self) -> &[TeamListing] {
        &self.teams
    }

    /// Case-insensitive name filter, like `GET /player?name=`.
    pub fn search(&self, name: Option<&str>) -> Vec<PlayerListing> {
        let needle = name.map(|n| n.trim().to_lowercase()).unwrap_or_default();
        self.players
            .iter()
            .filter(|p| needle.is_empty() || p.name.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Entities with the stat, best first; ties go to the lower id.
    pub fn leaderboard(&self, kind: LeaderboardKind, limit: usize) -> Vec<StatEntity> {
        let stat_name = kind.stat_name();
        let mut ranked = self
            .player_stats
            .values()
            .filter(|entity| entity.stat(stat_name).is_some())
            .cloned()
            .collect::<Vec<_>>();
        ranked.sort_by(|a, b| {
            let va = a.stat(stat_name).unwrap_or(0.0);
            let vb = b.stat(stat_name).unwrap_or(0.0);
            vb.total_cmp(&va).then(a.id.cmp(&b.id))
        });
        ranked.truncate(limit);
        ranked
    }

    pub fn compare_players(&self, player1_id: u32, player2_id: u32) -> EntityPair {
        (
            self.player_stats.get(&player1_id).cloned(),
            self.player_stats.get(&player2_id).cloned(),
        )
    }

    pub fn compare_teams(&self, team1_id: u32, team2_id: u32) -> EntityPair {
        (
            self.team_stats.get(&team1_id).cloned(),
            self.team_stats.get(&team2_id).cloned(),
        )
    }

    /// Most recent first.
    pub fn games(&self, limit: usize) -> Vec<GameRow> {
        self.games.iter().take(limit).cloned().collect()
    }
}

fn roster() -> Vec<PlayerListing> {
    let mut players = Vec::with_capacity(FIRST_NAMES.len() * LAST_NAMES.len());
    for (li, last) in LAST_NAMES.iter().enumerate() {
        for (fi, first) in FIRST_NAMES.iter().enumerate() {
            let id = (li * FIRST_NAMES.len() + fi) as u32 + 1;
            let position = POSITIONS[(id as usize) % POSITIONS.len()];
            players.push(PlayerListing {
                id,
                name: format!("{first} {last}"),
                position: Some(position.to_string()),
                height_inches: Some(72 + (id * 5) % 14),
                weight_lbs: Some(180 + (id * 11) % 70),
                jersey_number: Some((id * 3) % 100),
                is_active: Some(true),
            });
        }
    }
    players
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

fn player_line(rng: &mut StdRng, player: &PlayerListing) -> StatEntity {
    let mut entity = StatEntity::new(player.id, player.name.clone());
    entity.position = player.position.clone();
    entity.height_inches = player.height_inches;
    entity
        .with_stat(GAMES_PLAYED, Some(f64::from(rng.gen_range(20u32..=82))))
        .with_stat(POINTS_PER_GAME, Some(round_to(rng.gen_range(4.0..32.0), 1)))
        .with_stat(ASSISTS_PER_GAME, Some(round_to(rng.gen_range(0.5..10.5), 1)))
        .with_stat(REBOUNDS_PER_GAME, Some(round_to(rng.gen_range(1.5..13.5), 1)))
        .with_stat(STEALS_PER_GAME, Some(round_to(rng.gen_range(0.2..2.4), 1)))
        .with_stat(BLOCKS_PER_GAME, Some(round_to(rng.gen_range(0.1..2.8), 1)))
        .with_stat(FIELD_GOAL_PCT, Some(round_to(rng.gen_range(0.38..0.62), 3)))
        .with_stat(THREE_POINT_PCT, Some(round_to(rng.gen_range(0.25..0.45), 3)))
        .with_stat(FREE_THROW_PCT, Some(round_to(rng.gen_range(0.60..0.93), 3)))
}

fn team_line(rng: &mut StdRng, team: &TeamListing) -> StatEntity {
    StatEntity::new(team.id, team.name.clone())
        .with_stat(GAMES_PLAYED, Some(82.0))
        .with_stat(POINTS_PER_GAME, Some(round_to(rng.gen_range(102.0..121.0), 1)))
        .with_stat(ASSISTS_PER_GAME, Some(round_to(rng.gen_range(21.0..30.0), 1)))
        .with_stat(REBOUNDS_PER_GAME, Some(round_to(rng.gen_range(40.0..48.0), 1)))
        .with_stat(STEALS_PER_GAME, Some(round_to(rng.gen_range(6.0..9.5), 1)))
        .with_stat(BLOCKS_PER_GAME, Some(round_to(rng.gen_range(3.5..6.5), 1)))
}

fn schedule(rng: &mut StdRng, season_id: u32, teams: &[TeamListing]) -> Vec<GameRow> {
    let Some(opening) = i32::try_from(season_id)
        .ok()
        .and_then(|season| season.checked_add(2022))
        .and_then(|year| NaiveDate::from_ymd_opt(year, 10, 24))
    else {
        return Vec::new();
    };
    let mut games = Vec::new();
    let mut id = 1u32;
    // Round robin, two games a day; the last day has not been played yet.
    let days = 30;
    for day in 0..days {
        let date = opening + ChronoDuration::days(i64::from(day));
        for slot in 0..2usize {
            let home = (day as usize * 2 + slot) % teams.len();
            let away = (home + 1 + day as usize % (teams.len() - 1)) % teams.len();
            let played = day + 1 < days;
            let (home_score, away_score) = if played {
                (Some(rng.gen_range(95..=130)), Some(rng.gen_range(92..=128)))
            } else {
                (None, None)
            };
            games.push(GameRow {
                id,
                game_date_time: Some(format!("{}T{}:30:00", date.format("%Y-%m-%d"), 19 + slot)),
                game_type: Some("Regular Season".to_string()),
                home_team: Some(teams[home].name.clone()),
                away_team: Some(teams[away].name.clone()),
                home_score,
                away_score,
            });
            id += 1;
        }
    }
    games.reverse();
    games
}

/// Offline stand-in for [`crate::feed::spawn_provider`].
pub fn spawn_demo_provider(config: Config, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(
            "[INFO] Demo mode: serving a generated league".to_string(),
        ));
        let mut leagues: HashMap<u32, DemoLeague> = HashMap::new();
        while let Ok(cmd) = cmd_rx.recv() {
            thread::sleep(LATENCY);
            let season_id = match &cmd {
                ProviderCommand::FetchLeaderboards { season_id }
                | ProviderCommand::ComparePlayers { season_id, .. }
                | ProviderCommand::CompareTeams { season_id, .. } => *season_id,
                _ => config.season_id,
            };
            let league = leagues
                .entry(season_id)
                .or_insert_with(|| demo_league(season_id));
            for delta in answer(&config, league, cmd) {
                if tx.send(delta).is_err() {
                    return;
                }
            }
        }
    });
}

/// Deltas the live provider would have produced for `cmd`.
pub fn answer(config: &Config, league: &DemoLeague, cmd: ProviderCommand) -> Vec<Delta> {
    match cmd {
        ProviderCommand::FetchLeaderboards { season_id } => {
            let limit = config.leaderboard_limit as usize;
            let mut deltas = LeaderboardKind::ALL
                .into_iter()
                .map(|kind| Delta::SetLeaderboard {
                    kind,
                    season_id,
                    rows: league.leaderboard(kind, limit),
                })
                .collect::<Vec<_>>();
            deltas.push(Delta::LeaderboardsDone { season_id });
            deltas
        }
        ProviderCommand::FetchPlayers { name } => {
            vec![Delta::SetPlayers(league.search(name.as_deref()))]
        }
        ProviderCommand::FetchTeams => vec![Delta::SetTeams(league.teams().to_vec())],
        ProviderCommand::ComparePlayers {
            player1_id,
            player2_id,
            season_id,
        } => {
            let (first, second) = league.compare_players(player1_id, player2_id);
            vec![Delta::SetPlayerComparison {
                season_id,
                requested: (player1_id, player2_id),
                first,
                second,
            }]
        }
        ProviderCommand::CompareTeams {
            team1_id,
            team2_id,
            season_id,
        } => {
            let (first, second) = league.compare_teams(team1_id, team2_id);
            vec![Delta::SetTeamComparison {
                season_id,
                requested: (team1_id, team2_id),
                first,
                second,
            }]
        }
        ProviderCommand::FetchGames => vec![Delta::SetGames(league.games(config.games_limit as usize))],
    }
}
