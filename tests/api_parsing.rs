use std::fs;
use std::path::PathBuf;

use courtvision_terminal::api::{
    parse_games_json, parse_leaderboard_json, parse_player_comparison_json, parse_player_json,
    parse_players_json, parse_team_comparison_json, parse_teams_json,
};
use courtvision_terminal::games::GameSide;
use courtvision_terminal::leaderboard::LeaderboardKind;
use courtvision_terminal::player_form::PlayerPatch;
use courtvision_terminal::stats::{
    build_comparison, IncompleteComparison, Winner, BLOCKS_PER_GAME, FREE_THROW_PCT, GAMES_PLAYED,
    PLAYER_STATS, POINTS_PER_GAME, TEAM_STATS, THREE_POINT_PCT,
};

fn read_fixture(name: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(name);
    fs::read_to_string(path).expect("fixture file should be readable")
}

#[test]
fn parses_players_fixture() {
    let players = parse_players_json(&read_fixture("players.json")).expect("fixture should parse");
    assert_eq!(players.len(), 3);
    assert_eq!(players[0].id, 12);
    assert_eq!(players[0].name, "LeBron James");
    assert_eq!(players[0].position.as_deref(), Some("SF"));
    assert_eq!(players[1].jersey_number, Some(30));
    assert_eq!(players[2].height_inches, None);
    assert_eq!(players[2].is_active, Some(false));
}

#[test]
fn parses_teams_fixture() {
    let teams = parse_teams_json(&read_fixture("teams.json")).expect("fixture should parse");
    assert_eq!(teams.len(), 2);
    assert_eq!(teams[1].id, 14);
    assert_eq!(teams[1].name, "Los Angeles Lakers");
    assert_eq!(teams[1].abbreviation.as_deref(), Some("LAL"));
}

#[test]
fn update_keeps_stored_fields_that_were_not_given() {
    let stored = parse_player_json(&read_fixture("player.json"))
        .expect("fixture should parse")
        .expect("fixture has a player");
    assert_eq!(stored.birth_date.as_deref(), Some("1999-04-02"));

    let patch = PlayerPatch {
        jersey_number: Some(23),
        position: Some("pf".to_string()),
        ..PlayerPatch::default()
    };
    let merged = patch.apply_to(&stored);
    assert_eq!(merged.player_name, "Jalen Brooks");
    assert_eq!(merged.birth_date.as_deref(), Some("1999-04-02"));
    assert_eq!(merged.height_inches, Some(78));
    assert_eq!(merged.weight_lbs, Some(215));
    assert_eq!(merged.position.as_deref(), Some("PF"));
    assert_eq!(merged.jersey_number, Some(23));
    assert_eq!(merged.validate(), Ok(()));

    let payload = serde_json::to_value(&merged).expect("form serializes");
    assert_eq!(payload["birth_date"], "1999-04-02");
    assert_eq!(payload["weight_lbs"], 215);
}

#[test]
fn player_body_without_a_record_is_none() {
    assert_eq!(parse_player_json("{\"detail\": \"Player not found\"}").expect("valid json"), None);
    let with_time = parse_player_json(r#"{"player": {"player_name": "Ann", "birth_date": "2001-02-03T00:00:00"}}"#)
        .expect("valid json")
        .expect("has a player");
    assert_eq!(with_time.birth_date.as_deref(), Some("2001-02-03"));
}

#[test]
fn null_and_empty_bodies_parse_to_nothing() {
    for raw in ["", "  ", "null"] {
        assert!(parse_players_json(raw).expect("empty body").is_empty());
        assert!(parse_teams_json(raw).expect("empty body").is_empty());
        assert!(parse_leaderboard_json(raw).expect("empty body").is_empty());
        assert!(parse_games_json(raw).expect("empty body").is_empty());
        assert_eq!(parse_player_comparison_json(raw).expect("empty body"), (None, None));
        assert_eq!(parse_team_comparison_json(raw).expect("empty body"), (None, None));
        assert_eq!(parse_player_json(raw).expect("empty body"), None);
    }
}

#[test]
fn malformed_json_is_an_error() {
    assert!(parse_players_json("{\"players\": [").is_err());
    assert!(parse_leaderboard_json("not json").is_err());
}

#[test]
fn player_comparison_fixture_builds_a_table() {
    let (first, second) =
        parse_player_comparison_json(&read_fixture("compare_players.json")).expect("fixture should parse");
    let first = first.expect("player1 present");
    let second = second.expect("player2 present");
    assert_eq!(first.id, 12);
    assert_eq!(first.height_label(), "6'9\"");
    // Numeric strings are accepted.
    assert_eq!(first.stat(THREE_POINT_PCT), Some(0.41));
    assert_eq!(second.stat(FREE_THROW_PCT), None);

    let result = build_comparison(Some(&first), Some(&second), &PLAYER_STATS).expect("complete pair");
    assert_eq!(result.rows.len(), PLAYER_STATS.len());
    assert_eq!(result.winner_of(GAMES_PLAYED), Some(Winner::Entity2));
    assert_eq!(result.winner_of(POINTS_PER_GAME), Some(Winner::Entity2));
    assert_eq!(result.winner_of(THREE_POINT_PCT), Some(Winner::Entity1));
    // Absent free throw value counts as 0 but still shows as N/A.
    let ft = result.row(FREE_THROW_PCT).expect("ft row");
    assert_eq!(ft.winner, Winner::Entity1);
    assert_eq!(ft.display1, "75.0%");
    assert_eq!(ft.display2, "N/A");
    assert_eq!(
        result.summary(),
        "LeBron James has played 71 games with an average of 25.7 PPG, while Stephen Curry has played 74 games averaging 26.4 PPG."
    );
}

#[test]
fn missing_player_is_an_incomplete_comparison() {
    let (first, second) = parse_player_comparison_json(&read_fixture("compare_players_missing.json"))
        .expect("fixture should parse");
    assert!(first.is_some());
    assert!(second.is_none());
    let outcome = build_comparison(first.as_ref(), second.as_ref(), &PLAYER_STATS);
    assert_eq!(outcome, Err(IncompleteComparison::MissingSecond));
}

#[test]
fn team_comparison_fixture_maps_flat_fields() {
    let (first, second) =
        parse_team_comparison_json(&read_fixture("compare_teams.json")).expect("fixture should parse");
    let first = first.expect("team1 present");
    let second = second.expect("team2 present");
    assert_eq!(first.id, 1);
    assert_eq!(second.name, "Los Angeles Lakers");
    assert_eq!(second.stat(GAMES_PLAYED), Some(82.0));
    assert_eq!(second.stat(BLOCKS_PER_GAME), None);

    let result = build_comparison(Some(&first), Some(&second), &TEAM_STATS).expect("complete pair");
    assert_eq!(result.rows.len(), TEAM_STATS.len());
    assert_eq!(result.winner_of(GAMES_PLAYED), Some(Winner::Tie));
    assert_eq!(result.winner_of(POINTS_PER_GAME), Some(Winner::Entity1));
    assert_eq!(result.winner_of(BLOCKS_PER_GAME), Some(Winner::Entity1));
    assert_eq!(result.row(POINTS_PER_GAME).map(|r| r.display2.as_str()), Some("118.0"));
}

#[test]
fn team_comparison_without_names_is_empty() {
    let raw = r#"{"team1_id": 1, "team1_points": 110.0}"#;
    assert_eq!(parse_team_comparison_json(raw).expect("valid json"), (None, None));
}

#[test]
fn leaderboard_fixture_keeps_api_order_and_ignores_rank() {
    let ranked = parse_leaderboard_json(&read_fixture("leaderboard_points.json")).expect("fixture should parse");
    assert_eq!(ranked.len(), 4);

    let rows = LeaderboardKind::Points.rows(&ranked).collect::<Vec<_>>();
    let ranks = rows.iter().map(|row| row.rank).collect::<Vec<_>>();
    assert_eq!(ranks, vec![1, 2, 3, 4]);
    assert_eq!(rows[1].entity.name, "Giannis Antetokounmpo");
    assert_eq!(rows[1].value, Some(30.4));
    assert_eq!(rows[3].aux, None);
    assert_eq!(
        LeaderboardKind::Points.insight(rows.first()),
        "Top scorer averages 33.9 PPG over 70 games"
    );
}

#[test]
fn parses_games_fixture() {
    let games = parse_games_json(&read_fixture("games.json")).expect("fixture should parse");
    assert_eq!(games.len(), 3);
    assert_eq!(games[0].winner(), Some(GameSide::Home));
    assert_eq!(games[0].when(), "Jan 5, 2024, 07:30 PM");
    assert_eq!(games[0].score_line(), "105-114");
    assert_eq!(games[1].home_score, Some(99));
    assert_eq!(games[1].winner(), Some(GameSide::Away));
    assert_eq!(games[1].when(), "Mar 10, 2024, 12:05 PM");
    assert_eq!(games[2].home_label(), "TBD");
    assert_eq!(games[2].when(), "N/A");
    assert_eq!(games[2].score_line(), "-");
}
