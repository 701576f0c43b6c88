use courtvision_terminal::api::{PlayerListing, TeamListing};
use courtvision_terminal::leaderboard::LeaderboardKind;
use courtvision_terminal::state::{
    apply_delta, AppState, CompareState, ComparisonView, Delta, RequestKind, Screen, SelectionError,
};
use courtvision_terminal::stats::{
    IncompleteComparison, StatEntity, Winner, GAMES_PLAYED, POINTS_PER_GAME,
};

fn player(id: u32, name: &str) -> PlayerListing {
    PlayerListing {
        id,
        name: name.to_string(),
        position: None,
        height_inches: None,
        weight_lbs: None,
        jersey_number: None,
        is_active: Some(true),
    }
}

fn team(id: u32, name: &str) -> TeamListing {
    TeamListing {
        id,
        name: name.to_string(),
        abbreviation: None,
        city: None,
        conference: None,
        division: None,
    }
}

fn awaiting(compare: &mut CompareState, first: u32, second: u32) {
    compare.pick(first);
    compare.pick(second);
    compare.view = ComparisonView::Loading;
}

fn scorer(id: u32, ppg: f64, games: f64) -> StatEntity {
    StatEntity::new(id, format!("Player {id}"))
        .with_stat(POINTS_PER_GAME, Some(ppg))
        .with_stat(GAMES_PLAYED, Some(games))
}

#[test]
fn leaderboard_delta_for_current_season_is_stored() {
    let mut state = AppState::new(2);
    state.leaderboards_loading = true;
    apply_delta(
        &mut state,
        Delta::SetLeaderboard {
            kind: LeaderboardKind::Points,
            season_id: 2,
            rows: vec![scorer(1, 30.0, 70.0), scorer(2, 28.0, 81.0)],
        },
    );
    assert_eq!(state.leaderboard(LeaderboardKind::Points).len(), 2);
    assert!(state.leaderboards_fetched_at.is_some());
    assert!(state.leaderboard(LeaderboardKind::Assists).is_empty());
    assert!(state.leaderboards_loading);

    apply_delta(&mut state, Delta::LeaderboardsDone { season_id: 2 });
    assert!(!state.leaderboards_loading);
}

#[test]
fn stale_season_deltas_are_dropped() {
    let mut state = AppState::new(1);
    state.set_season(3);
    state.leaderboards_loading = true;
    apply_delta(
        &mut state,
        Delta::SetLeaderboard {
            kind: LeaderboardKind::Points,
            season_id: 1,
            rows: vec![scorer(1, 30.0, 70.0)],
        },
    );
    apply_delta(&mut state, Delta::LeaderboardsDone { season_id: 1 });
    assert!(state.leaderboard(LeaderboardKind::Points).is_empty());
    assert!(state.leaderboards_loading);

    state.player_compare.first = Some(1);
    state.player_compare.second = Some(2);
    state.player_compare.view = ComparisonView::Loading;
    apply_delta(
        &mut state,
        Delta::SetPlayerComparison {
            season_id: 1,
            requested: (1, 2),
            first: Some(scorer(1, 30.0, 70.0)),
            second: Some(scorer(2, 20.0, 60.0)),
        },
    );
    assert_eq!(state.player_compare.view, ComparisonView::Loading);
}

#[test]
fn season_change_clears_season_scoped_data() {
    let mut state = AppState::new(1);
    state.leaderboards.insert(LeaderboardKind::Steals, vec![scorer(1, 1.0, 1.0)]);
    state.team_compare.first = Some(4);
    state.team_compare.view = ComparisonView::Incomplete(IncompleteComparison::MissingBoth);

    state.set_season(0);
    assert_eq!(state.season_id, 1);
    assert!(!state.leaderboard(LeaderboardKind::Steals).is_empty());

    state.set_season(2);
    assert!(state.leaderboard(LeaderboardKind::Steals).is_empty());
    assert_eq!(state.team_compare.view, ComparisonView::Empty);
    // Picks survive so the same pair can be re-run for the new season.
    assert_eq!(state.team_compare.first, Some(4));
}

#[test]
fn player_comparison_delta_settles_the_view() {
    let mut state = AppState::new(1);
    awaiting(&mut state.player_compare, 1, 2);
    apply_delta(
        &mut state,
        Delta::SetPlayerComparison {
            season_id: 1,
            requested: (1, 2),
            first: Some(scorer(1, 25.0, 70.0)),
            second: Some(scorer(2, 25.0, 82.0)),
        },
    );
    let ComparisonView::Ready(result) = &state.player_compare.view else {
        panic!("expected a ready comparison, got {:?}", state.player_compare.view);
    };
    assert_eq!(result.winner_of(POINTS_PER_GAME), Some(Winner::Tie));
    assert_eq!(result.winner_of(GAMES_PLAYED), Some(Winner::Entity2));
}

#[test]
fn missing_side_becomes_a_notice_and_a_log_line() {
    let mut state = AppState::new(1);
    awaiting(&mut state.team_compare, 1, 2);
    apply_delta(
        &mut state,
        Delta::SetTeamComparison {
            season_id: 1,
            requested: (1, 2),
            first: None,
            second: Some(scorer(2, 110.0, 82.0)),
        },
    );
    assert_eq!(
        state.team_compare.view,
        ComparisonView::Incomplete(IncompleteComparison::MissingFirst)
    );
    assert!(
        state
            .logs
            .back()
            .is_some_and(|line| line.starts_with("[INFO] Team comparison"))
    );
}

#[test]
fn late_comparison_after_clear_is_dropped() {
    let mut state = AppState::new(1);
    awaiting(&mut state.player_compare, 1, 2);
    state.player_compare.clear();
    apply_delta(
        &mut state,
        Delta::SetPlayerComparison {
            season_id: 1,
            requested: (1, 2),
            first: Some(scorer(1, 30.0, 70.0)),
            second: Some(scorer(2, 20.0, 60.0)),
        },
    );
    assert_eq!(state.player_compare.first, None);
    assert_eq!(state.player_compare.view, ComparisonView::Empty);
}

#[test]
fn comparison_for_a_replaced_pick_is_dropped() {
    let mut state = AppState::new(1);
    awaiting(&mut state.team_compare, 1, 2);
    state.team_compare.pick(3);
    assert_eq!(state.team_compare.view, ComparisonView::Empty);
    state.team_compare.view = ComparisonView::Loading;

    apply_delta(
        &mut state,
        Delta::SetTeamComparison {
            season_id: 1,
            requested: (1, 2),
            first: Some(scorer(1, 110.0, 82.0)),
            second: Some(scorer(2, 105.0, 82.0)),
        },
    );
    assert_eq!(state.team_compare.view, ComparisonView::Loading);

    apply_delta(
        &mut state,
        Delta::SetTeamComparison {
            season_id: 1,
            requested: (1, 3),
            first: Some(scorer(1, 110.0, 82.0)),
            second: Some(scorer(3, 101.0, 82.0)),
        },
    );
    assert!(matches!(state.team_compare.view, ComparisonView::Ready(_)));
}

#[test]
fn failed_requests_keep_previous_data() {
    let mut state = AppState::new(1);
    apply_delta(&mut state, Delta::SetPlayers(vec![player(1, "Ann"), player(2, "Bo")]));
    state.players_loading = true;
    apply_delta(&mut state, Delta::RequestFailed(RequestKind::Players));
    assert!(!state.players_loading);
    assert_eq!(state.players.len(), 2);

    state.player_compare.view = ComparisonView::Loading;
    apply_delta(&mut state, Delta::RequestFailed(RequestKind::PlayerComparison));
    assert_eq!(state.player_compare.view, ComparisonView::Empty);
}

#[test]
fn compare_picker_validates_the_pair() {
    let mut state = AppState::new(1);
    apply_delta(&mut state, Delta::SetTeams(vec![team(1, "Hawks"), team(2, "Lynx")]));
    state.screen = Screen::CompareTeams;

    assert_eq!(
        state.team_compare.pair("teams"),
        Err(SelectionError::Incomplete("teams"))
    );
    state.pick_under_cursor();
    state.pick_under_cursor();
    assert_eq!(
        state.team_compare.pair("teams"),
        Err(SelectionError::SameEntity("teams"))
    );
    assert_eq!(
        SelectionError::SameEntity("teams").to_string(),
        "Please select two different teams"
    );

    state.select_next();
    state.pick_under_cursor();
    assert_eq!(state.team_compare.pair("teams"), Ok((1, 2)));

    state.team_compare.clear();
    assert_eq!(state.team_compare.first, None);
    assert_eq!(state.team_compare.view, ComparisonView::Empty);
}

#[test]
fn search_filters_and_clamps_selection() {
    let mut state = AppState::new(1);
    apply_delta(
        &mut state,
        Delta::SetPlayers(vec![
            player(1, "Marcus Holloway"),
            player(2, "Andre Brooks"),
            player(3, "Marcus Vance"),
        ]),
    );
    state.screen = Screen::Players;
    state.players_selected = 2;
    state.search = "marcus".to_string();
    state.clamp_selection();
    assert_eq!(state.filtered_players().len(), 2);
    assert_eq!(state.players_selected, 1);

    state.select_next();
    assert_eq!(state.players_selected, 0);
    state.select_prev();
    assert_eq!(state.players_selected, 1);
}

#[test]
fn clearing_a_server_search_asks_for_the_full_list() {
    let mut state = AppState::new(1);
    state.search = "marcus".to_string();
    assert!(!state.clear_search());

    state.search = "marcus".to_string();
    state.players_query = Some("marcus".to_string());
    apply_delta(&mut state, Delta::SetPlayers(vec![player(1, "Marcus Holloway")]));
    state.screen = Screen::ComparePlayers;
    assert!(state.clear_search());
    assert!(state.search.is_empty());
    assert_eq!(state.players_query, None);
    assert!(!state.clear_search());
}

#[test]
fn games_delta_clamps_scroll() {
    let mut state = AppState::new(1);
    state.games_scroll = 10;
    state.games_loading = true;
    apply_delta(&mut state, Delta::SetGames(Vec::new()));
    assert_eq!(state.games_scroll, 0);
    assert!(!state.games_loading);
}

#[test]
fn log_ring_is_capped() {
    let mut state = AppState::new(1);
    for idx in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {idx}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}

#[test]
fn screens_cycle_both_ways() {
    let mut screen = Screen::Dashboard;
    for _ in 0..Screen::ALL.len() {
        screen = screen.next();
    }
    assert_eq!(screen, Screen::Dashboard);
    assert_eq!(Screen::Dashboard.prev(), Screen::Games);
}
