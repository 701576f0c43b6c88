use anyhow::{Context, Result, anyhow};
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use serde_json::Value;

use crate::config::Config;
use crate::games::GameRow;
use crate::http_client::http_client;
use crate::leaderboard::LeaderboardKind;
use crate::player_form::PlayerForm;
use crate::stats::{
    StatEntity, ASSISTS_PER_GAME, BLOCKS_PER_GAME, GAMES_PLAYED, POINTS_PER_GAME,
    REBOUNDS_PER_GAME, STAT_FIELDS, STEALS_PER_GAME,
};

/// Row of `GET /player`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerListing {
    pub id: u32,
    #[serde(rename = "player_name", default)]
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub height_inches: Option<u32>,
    #[serde(default)]
    pub weight_lbs: Option<u32>,
    #[serde(default)]
    pub jersey_number: Option<u32>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Row of `GET /team`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TeamListing {
    pub id: u32,
    #[serde(rename = "team_name", default)]
    pub name: String,
    #[serde(default)]
    pub abbreviation: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub conference: Option<String>,
    #[serde(default)]
    pub division: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayersResponse {
    #[serde(default)]
    players: Vec<PlayerListing>,
}

#[derive(Debug, Deserialize)]
struct TeamsResponse {
    #[serde(default)]
    teams: Vec<TeamListing>,
}

pub type EntityPair = (Option<StatEntity>, Option<StatEntity>);

// Flat `team{n}_*` keys of `/compare/teams` mapped onto stat names.
const TEAM_COMPARE_FIELDS: [(&str, &str); 6] = [
    ("games", GAMES_PLAYED),
    ("points", POINTS_PER_GAME),
    ("assists", ASSISTS_PER_GAME),
    ("rebounds", REBOUNDS_PER_GAME),
    ("steals", STEALS_PER_GAME),
    ("blocks", BLOCKS_PER_GAME),
];

pub fn fetch_players(config: &Config, name: Option<&str>) -> Result<Vec<PlayerListing>> {
    let query: Vec<(&str, String)> = match name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => vec![("name", name.to_string())],
        None => Vec::new(),
    };
    let body = get_json(config, "/player", &query)?;
    parse_players_json(&body)
}

pub fn fetch_teams(config: &Config) -> Result<Vec<TeamListing>> {
    let body = get_json(config, "/team", &[])?;
    parse_teams_json(&body)
}

pub fn fetch_player_comparison(
    config: &Config,
    player1_id: u32,
    player2_id: u32,
    season_id: u32,
) -> Result<EntityPair> {
    let query = [
        ("player1_id", player1_id.to_string()),
        ("player2_id", player2_id.to_string()),
        ("season_id", season_id.to_string()),
    ];
    let body = get_json(config, "/compare/players", &query)?;
    parse_player_comparison_json(&body)
}

/// A 404 means the season has no rows for the pairing, not a failure.
pub fn fetch_team_comparison(
    config: &Config,
    team1_id: u32,
    team2_id: u32,
    season_id: u32,
) -> Result<EntityPair> {
    let query = [
        ("team1_id", team1_id.to_string()),
        ("team2_id", team2_id.to_string()),
        ("season_id", season_id.to_string()),
    ];
    match get_body(config, "/compare/teams", &query)? {
        Some(body) => parse_team_comparison_json(&body),
        None => Ok((None, None)),
    }
}

pub fn fetch_leaderboard(config: &Config, kind: LeaderboardKind, season_id: u32) -> Result<Vec<StatEntity>> {
    let path = format!("/leaderboard/{}", kind.path());
    let query = [
        ("season_id", season_id.to_string()),
        ("limit", config.leaderboard_limit.to_string()),
    ];
    let body = get_json(config, &path, &query)?;
    parse_leaderboard_json(&body)
}

pub fn fetch_games(config: &Config) -> Result<Vec<GameRow>> {
    let body = get_json(config, "/games", &[("limit", config.games_limit.to_string())])?;
    parse_games_json(&body)
}

/// The stored record as an editable form; `None` when the id is unknown.
pub fn fetch_player(config: &Config, player_id: u32) -> Result<Option<PlayerForm>> {
    match get_body(config, &format!("/player/{player_id}"), &[])? {
        Some(body) => parse_player_json(&body),
        None => Ok(None),
    }
}

pub fn create_player(config: &Config, form: &PlayerForm) -> Result<u32> {
    let payload = serde_json::to_value(form.normalized()).context("serialize player form")?;
    let body = send_json(config, Method::POST, "/player", Some(&payload))?;
    let root: Value = serde_json::from_str(&body).context("invalid create player json")?;
    pick_u32(&root, &["player_id", "id"]).ok_or_else(|| anyhow!("create player response missing player_id"))
}

pub fn update_player(config: &Config, player_id: u32, form: &PlayerForm) -> Result<()> {
    let payload = serde_json::to_value(form.normalized()).context("serialize player form")?;
    send_json(config, Method::PUT, &format!("/player/{player_id}"), Some(&payload))?;
    Ok(())
}

pub fn delete_player(config: &Config, player_id: u32) -> Result<()> {
    send_json(config, Method::DELETE, &format!("/player/{player_id}"), None)?;
    Ok(())
}

fn get_json(config: &Config, path: &str, query: &[(&str, String)]) -> Result<String> {
    get_body(config, path, query)?.ok_or_else(|| anyhow!("http 404: {path} not found"))
}

fn get_body(config: &Config, path: &str, query: &[(&str, String)]) -> Result<Option<String>> {
    let client = http_client(config)?;
    let url = config.url(path);
    let resp = client
        .get(&url)
        .header(ACCEPT, "application/json")
        .query(query)
        .send()
        .with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(anyhow!("http {}: {}", status, body));
    }
    Ok(Some(body))
}

fn send_json(config: &Config, method: Method, path: &str, payload: Option<&Value>) -> Result<String> {
    let client = http_client(config)?;
    let url = config.url(path);
    let mut req = client.request(method, &url).header(ACCEPT, "application/json");
    if let Some(payload) = payload {
        req = req.json(payload);
    }
    let resp = req.send().with_context(|| format!("request failed: {url}"))?;
    let status = resp.status();
    let body = resp.text().context("failed reading body")?;
    if !status.is_success() {
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").map(|d| d.to_string()))
            .unwrap_or(body);
        return Err(anyhow!("http {}: {}", status, detail));
    }
    Ok(body)
}

pub fn parse_players_json(raw: &str) -> Result<Vec<PlayerListing>> {
    let Some(trimmed) = non_null(raw) else {
        return Ok(Vec::new());
    };
    let resp: PlayersResponse = serde_json::from_str(trimmed).context("invalid players json")?;
    Ok(resp.players)
}

pub fn parse_player_json(raw: &str) -> Result<Option<PlayerForm>> {
    let Some(trimmed) = non_null(raw) else {
        return Ok(None);
    };
    let root: Value = serde_json::from_str(trimmed).context("invalid player json")?;
    let Some(player) = root.get("player").filter(|p| p.is_object()) else {
        return Ok(None);
    };
    Ok(Some(PlayerForm {
        player_name: pick_string(player, &["player_name", "name"]).unwrap_or_default(),
        // Dates may come back with a time part attached.
        birth_date: pick_string(player, &["birth_date"])
            .map(|d| d.split('T').next().unwrap_or_default().to_string()),
        height_inches: pick_u32(player, &["height_inches"]),
        weight_lbs: pick_u32(player, &["weight_lbs"]),
        position: pick_string(player, &["position"]),
        jersey_number: pick_u32(player, &["jersey_number"]),
    }))
}

pub fn parse_teams_json(raw: &str) -> Result<Vec<TeamListing>> {
    let Some(trimmed) = non_null(raw) else {
        return Ok(Vec::new());
    };
    let resp: TeamsResponse = serde_json::from_str(trimmed).context("invalid teams json")?;
    Ok(resp.teams)
}

pub fn parse_player_comparison_json(raw: &str) -> Result<EntityPair> {
    let Some(trimmed) = non_null(raw) else {
        return Ok((None, None));
    };
    let root: Value = serde_json::from_str(trimmed).context("invalid player comparison json")?;
    let player1 = root.get("player1").and_then(parse_player_entity);
    let player2 = root.get("player2").and_then(parse_player_entity);
    Ok((player1, player2))
}

pub fn parse_team_comparison_json(raw: &str) -> Result<EntityPair> {
    let Some(trimmed) = non_null(raw) else {
        return Ok((None, None));
    };
    let root: Value = serde_json::from_str(trimmed).context("invalid team comparison json")?;
    Ok((team_side(&root, 1), team_side(&root, 2)))
}

pub fn parse_leaderboard_json(raw: &str) -> Result<Vec<StatEntity>> {
    let Some(trimmed) = non_null(raw) else {
        return Ok(Vec::new());
    };
    let root: Value = serde_json::from_str(trimmed).context("invalid leaderboard json")?;
    let rows = root
        .get("leaderboard")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(parse_player_entity).collect())
        .unwrap_or_default();
    Ok(rows)
}

pub fn parse_games_json(raw: &str) -> Result<Vec<GameRow>> {
    let Some(trimmed) = non_null(raw) else {
        return Ok(Vec::new());
    };
    let root: Value = serde_json::from_str(trimmed).context("invalid games json")?;
    let Some(games) = root.get("games").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };
    let rows = games
        .iter()
        .filter(|g| g.is_object())
        .map(|g| GameRow {
            id: pick_u32(g, &["id", "game_id"]).unwrap_or_default(),
            game_date_time: pick_string(g, &["game_date_time", "game_date"]),
            game_type: pick_string(g, &["game_type"]),
            home_team: pick_string(g, &["home_team"]),
            away_team: pick_string(g, &["away_team"]),
            home_score: pick_u32(g, &["home_score"]),
            away_score: pick_u32(g, &["away_score"]),
        })
        .collect();
    Ok(rows)
}

fn parse_player_entity(value: &Value) -> Option<StatEntity> {
    if !value.is_object() {
        return None;
    }
    let id = pick_u32(value, &["player_id", "id"]).unwrap_or_default();
    let name = pick_string(value, &["player_name", "name"]).unwrap_or_default();
    let mut entity = StatEntity::new(id, name);
    entity.position = pick_string(value, &["position"]);
    entity.height_inches = pick_u32(value, &["height_inches"]);
    for field in STAT_FIELDS {
        entity.set_stat(field, value.get(field).and_then(as_number));
    }
    Some(entity)
}

fn team_side(root: &Value, side: u8) -> Option<StatEntity> {
    let prefix = format!("team{side}_");
    let name_key = format!("{prefix}name");
    let id_key = format!("{prefix}id");
    let name = pick_string(root, &[name_key.as_str()])?;
    let id = pick_u32(root, &[id_key.as_str()]).unwrap_or_default();
    let mut entity = StatEntity::new(id, name);
    for (suffix, stat) in TEAM_COMPARE_FIELDS {
        let key = format!("{prefix}{suffix}");
        entity.set_stat(stat, root.get(&key).and_then(as_number));
    }
    Some(entity)
}

fn non_null(raw: &str) -> Option<&str> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        None
    } else {
        Some(trimmed)
    }
}

// Postgres NUMERIC columns can arrive as strings.
fn as_number(value: &Value) -> Option<f64> {
    let num = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    num.filter(|v| v.is_finite())
}

fn as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn pick_string(value: &Value, keys: &[&str]) -> Option<String> {
    for key in keys {
        if let Some(v) = value.get(*key)
            && let Some(s) = as_string(v)
        {
            return Some(s);
        }
    }
    None
}

fn pick_u32(value: &Value, keys: &[&str]) -> Option<u32> {
    for key in keys {
        if let Some(v) = value.get(*key) {
            if let Some(num) = v.as_u64() {
                return u32::try_from(num).ok();
            }
            if let Some(num) = v.as_f64().filter(|n| n.is_finite() && *n >= 0.0) {
                return Some(num.round() as u32);
            }
            if let Some(s) = v.as_str()
                && let Ok(num) = s.trim().parse::<u32>()
            {
                return Some(num);
            }
        }
    }
    None
}
