use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::api;
use crate::config::Config;
use crate::leaderboard::LeaderboardKind;
use crate::state::{Delta, ProviderCommand, RequestKind};

/// Answers UI commands against the CourtVision API until the UI hangs up.
pub fn spawn_provider(config: Config, tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        let _ = tx.send(Delta::Log(format!("[INFO] API: {}", config.api_base)));
        while let Ok(cmd) = cmd_rx.recv() {
            if !handle_command(&config, &tx, cmd) {
                break;
            }
        }
    });
}

// Returns false once the receiving side is gone.
fn handle_command(config: &Config, tx: &Sender<Delta>, cmd: ProviderCommand) -> bool {
    match cmd {
        ProviderCommand::FetchLeaderboards { season_id } => {
            for kind in LeaderboardKind::ALL {
                match api::fetch_leaderboard(config, kind, season_id) {
                    Ok(rows) => {
                        if tx
                            .send(Delta::SetLeaderboard {
                                kind,
                                season_id,
                                rows,
                            })
                            .is_err()
                        {
                            return false;
                        }
                    }
                    Err(err) => {
                        let _ = tx.send(Delta::Log(format!(
                            "[WARN] {} leaderboard error: {err:#}",
                            kind.short_label()
                        )));
                    }
                }
            }
            tx.send(Delta::LeaderboardsDone { season_id }).is_ok()
        }
        ProviderCommand::FetchPlayers { name } => match api::fetch_players(config, name.as_deref()) {
            Ok(players) => tx.send(Delta::SetPlayers(players)).is_ok(),
            Err(err) => {
                let _ = tx.send(Delta::RequestFailed(RequestKind::Players));
                tx.send(Delta::Log(format!(
                    "[WARN] Failed to load players. Make sure the API is running. ({err:#})"
                )))
                .is_ok()
            }
        },
        ProviderCommand::FetchTeams => match api::fetch_teams(config) {
            Ok(teams) => tx.send(Delta::SetTeams(teams)).is_ok(),
            Err(err) => tx
                .send(Delta::Log(format!("[WARN] Teams fetch error: {err:#}")))
                .is_ok(),
        },
        ProviderCommand::ComparePlayers {
            player1_id,
            player2_id,
            season_id,
        } => match api::fetch_player_comparison(config, player1_id, player2_id, season_id) {
            Ok((first, second)) => tx
                .send(Delta::SetPlayerComparison {
                    season_id,
                    requested: (player1_id, player2_id),
                    first,
                    second,
                })
                .is_ok(),
            Err(err) => {
                let _ = tx.send(Delta::RequestFailed(RequestKind::PlayerComparison));
                tx.send(Delta::Log(format!(
                    "[WARN] Failed to compare players. Please try again. ({err:#})"
                )))
                .is_ok()
            }
        },
        ProviderCommand::CompareTeams {
            team1_id,
            team2_id,
            season_id,
        } => match api::fetch_team_comparison(config, team1_id, team2_id, season_id) {
            Ok((first, second)) => tx
                .send(Delta::SetTeamComparison {
                    season_id,
                    requested: (team1_id, team2_id),
                    first,
                    second,
                })
                .is_ok(),
            Err(err) => {
                let _ = tx.send(Delta::RequestFailed(RequestKind::TeamComparison));
                tx.send(Delta::Log(format!(
                    "[WARN] Failed to compare teams. Please try again. ({err:#})"
                )))
                .is_ok()
            }
        },
        ProviderCommand::FetchGames => match api::fetch_games(config) {
            Ok(games) => tx.send(Delta::SetGames(games)).is_ok(),
            Err(err) => {
                let _ = tx.send(Delta::RequestFailed(RequestKind::Games));
                tx.send(Delta::Log(format!(
                    "[WARN] Failed to load games. Make sure the API is running. ({err:#})"
                )))
                .is_ok()
            }
        },
    }
}
