use std::iter::Enumerate;
use std::slice::Iter;

use crate::stats::{
    format_stat, FormatKind, StatEntity, ASSISTS_PER_GAME, GAMES_PLAYED, POINTS_PER_GAME,
    REBOUNDS_PER_GAME, STEALS_PER_GAME,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaderboardKind {
    Points,
    Assists,
    Rebounds,
    Steals,
}

impl LeaderboardKind {
    pub const ALL: [LeaderboardKind; 4] = [
        LeaderboardKind::Points,
        LeaderboardKind::Assists,
        LeaderboardKind::Rebounds,
        LeaderboardKind::Steals,
    ];

    /// Last path segment of `/leaderboard/{kind}`.
    pub fn path(self) -> &'static str {
        match self {
            LeaderboardKind::Points => "points",
            LeaderboardKind::Assists => "assists",
            LeaderboardKind::Rebounds => "rebounds",
            LeaderboardKind::Steals => "steals",
        }
    }

    pub fn stat_name(self) -> &'static str {
        match self {
            LeaderboardKind::Points => POINTS_PER_GAME,
            LeaderboardKind::Assists => ASSISTS_PER_GAME,
            LeaderboardKind::Rebounds => REBOUNDS_PER_GAME,
            LeaderboardKind::Steals => STEALS_PER_GAME,
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            LeaderboardKind::Points => "PPG",
            LeaderboardKind::Assists => "APG",
            LeaderboardKind::Rebounds => "RPG",
            LeaderboardKind::Steals => "SPG",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LeaderboardKind::Points => "Points Per Game Leaders",
            LeaderboardKind::Assists => "Assists Per Game Leaders",
            LeaderboardKind::Rebounds => "Rebounds Per Game Leaders",
            LeaderboardKind::Steals => "Steals Per Game Leaders",
        }
    }

    /// Bar scale used when the leader has no usable value.
    pub fn default_scale(self) -> f64 {
        match self {
            LeaderboardKind::Points => 30.0,
            LeaderboardKind::Assists => 10.0,
            LeaderboardKind::Rebounds => 15.0,
            LeaderboardKind::Steals => 5.0,
        }
    }

    pub fn next(self) -> Self {
        match self {
            LeaderboardKind::Points => LeaderboardKind::Assists,
            LeaderboardKind::Assists => LeaderboardKind::Rebounds,
            LeaderboardKind::Rebounds => LeaderboardKind::Steals,
            LeaderboardKind::Steals => LeaderboardKind::Points,
        }
    }

    pub fn insight(self, leader: Option<&LeaderboardRow<'_>>) -> String {
        let value = format_stat(leader.and_then(|row| row.value), FormatKind::Decimal1);
        match self {
            LeaderboardKind::Points => {
                let games = leader.and_then(|row| row.aux).unwrap_or(0.0);
                format!(
                    "Top scorer averages {value} PPG over {} games",
                    format_stat(Some(games), FormatKind::RawInteger)
                )
            }
            LeaderboardKind::Assists => format!("Elite playmaker distributing {value} APG"),
            LeaderboardKind::Rebounds => format!("Top rebounder controls {value} boards per game"),
            LeaderboardKind::Steals => format!("Top defender averages {value} steals per game"),
        }
    }

    pub fn rows<'a>(self, ranked: &'a [StatEntity]) -> LeaderboardRows<'a> {
        build_leaderboard(ranked, self.stat_name(), GAMES_PLAYED)
    }

    /// The leader's value, or the default scale when the leader is missing.
    pub fn bar_scale(self, ranked: &[StatEntity]) -> f64 {
        ranked
            .first()
            .and_then(|leader| leader.stat(self.stat_name()))
            .filter(|v| *v > 0.0)
            .unwrap_or_else(|| self.default_scale())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeaderboardRow<'a> {
    pub rank: usize,
    pub entity: &'a StatEntity,
    pub value: Option<f64>,
    pub aux: Option<f64>,
}

/// Rows of a pre-sorted listing. Cloning restarts from the current position.
#[derive(Debug, Clone)]
pub struct LeaderboardRows<'a> {
    entries: Enumerate<Iter<'a, StatEntity>>,
    stat_name: &'a str,
    aux_stat_name: &'a str,
}

impl<'a> Iterator for LeaderboardRows<'a> {
    type Item = LeaderboardRow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (idx, entity) = self.entries.next()?;
        Some(LeaderboardRow {
            rank: idx + 1,
            entity,
            value: entity.stat(self.stat_name),
            aux: entity.stat(self.aux_stat_name),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

impl ExactSizeIterator for LeaderboardRows<'_> {}

/// Ranks follow input position; the listing is never re-sorted here.
pub fn build_leaderboard<'a>(
    ranked: &'a [StatEntity],
    stat_name: &'a str,
    aux_stat_name: &'a str,
) -> LeaderboardRows<'a> {
    LeaderboardRows {
        entries: ranked.iter().enumerate(),
        stat_name,
        aux_stat_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_scale_falls_back_when_leader_missing() {
        assert_eq!(LeaderboardKind::Points.bar_scale(&[]), 30.0);
        let leader = StatEntity::new(1, "A").with_stat(REBOUNDS_PER_GAME, Some(12.5));
        assert_eq!(LeaderboardKind::Rebounds.bar_scale(&[leader]), 12.5);
        let zero = StatEntity::new(2, "B").with_stat(ASSISTS_PER_GAME, Some(0.0));
        assert_eq!(LeaderboardKind::Assists.bar_scale(&[zero]), 10.0);
    }

    #[test]
    fn next_cycles_through_every_kind() {
        let mut kind = LeaderboardKind::Points;
        for expected in LeaderboardKind::ALL.iter().skip(1) {
            kind = kind.next();
            assert_eq!(kind, *expected);
        }
        assert_eq!(kind.next(), LeaderboardKind::Points);
    }
}
