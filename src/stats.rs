use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NOT_AVAILABLE: &str = "N/A";

pub const GAMES_PLAYED: &str = "games_played";
pub const POINTS_PER_GAME: &str = "points_per_game";
pub const ASSISTS_PER_GAME: &str = "assists_per_game";
pub const REBOUNDS_PER_GAME: &str = "rebounds_per_game";
pub const STEALS_PER_GAME: &str = "steals_per_game";
pub const BLOCKS_PER_GAME: &str = "blocks_per_game";
pub const FIELD_GOAL_PCT: &str = "field_goal_percentage";
pub const THREE_POINT_PCT: &str = "three_point_percentage";
pub const FREE_THROW_PCT: &str = "free_throw_percentage";

/// Every numeric field the comparison views read, in display order.
pub const STAT_FIELDS: [&str; 9] = [
    GAMES_PLAYED,
    POINTS_PER_GAME,
    ASSISTS_PER_GAME,
    REBOUNDS_PER_GAME,
    STEALS_PER_GAME,
    BLOCKS_PER_GAME,
    FIELD_GOAL_PCT,
    THREE_POINT_PCT,
    FREE_THROW_PCT,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    RawInteger,
    Decimal1,
    Percentage1,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub format: FormatKind,
    pub higher_is_better: bool,
}

const fn higher_better(name: &'static str, label: &'static str, format: FormatKind) -> StatDefinition {
    StatDefinition {
        name,
        label,
        format,
        higher_is_better: true,
    }
}

const DEF_GAMES: StatDefinition = higher_better(GAMES_PLAYED, "Games Played", FormatKind::RawInteger);
const DEF_POINTS: StatDefinition = higher_better(POINTS_PER_GAME, "Points Per Game", FormatKind::Decimal1);
const DEF_ASSISTS: StatDefinition = higher_better(ASSISTS_PER_GAME, "Assists Per Game", FormatKind::Decimal1);
const DEF_REBOUNDS: StatDefinition =
    higher_better(REBOUNDS_PER_GAME, "Rebounds Per Game", FormatKind::Decimal1);
const DEF_STEALS: StatDefinition = higher_better(STEALS_PER_GAME, "Steals Per Game", FormatKind::Decimal1);
const DEF_BLOCKS: StatDefinition = higher_better(BLOCKS_PER_GAME, "Blocks Per Game", FormatKind::Decimal1);
const DEF_FG: StatDefinition = higher_better(FIELD_GOAL_PCT, "Field Goal %", FormatKind::Percentage1);
const DEF_3P: StatDefinition = higher_better(THREE_POINT_PCT, "3-Point %", FormatKind::Percentage1);
const DEF_FT: StatDefinition = higher_better(FREE_THROW_PCT, "Free Throw %", FormatKind::Percentage1);

/// Rows of the player comparison table, in display order.
pub const PLAYER_STATS: [StatDefinition; 9] = [
    DEF_GAMES,
    DEF_POINTS,
    DEF_ASSISTS,
    DEF_REBOUNDS,
    DEF_STEALS,
    DEF_BLOCKS,
    DEF_FG,
    DEF_3P,
    DEF_FT,
];

/// Team comparisons carry no shooting percentages.
pub const TEAM_STATS: [StatDefinition; 6] = [
    DEF_GAMES,
    DEF_POINTS,
    DEF_ASSISTS,
    DEF_REBOUNDS,
    DEF_STEALS,
    DEF_BLOCKS,
];

pub fn definition_for(name: &str) -> Option<&'static StatDefinition> {
    PLAYER_STATS.iter().find(|def| def.name == name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Winner {
    Entity1,
    Entity2,
    Tie,
}

impl Winner {
    pub fn flip(self) -> Self {
        match self {
            Winner::Entity1 => Winner::Entity2,
            Winner::Entity2 => Winner::Entity1,
            Winner::Tie => Winner::Tie,
        }
    }
}

/// A player or team as returned by the API. Only the named numeric
/// fields are kept; absent values are stored as `None`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatEntity {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub height_inches: Option<u32>,
    #[serde(default)]
    pub stats: BTreeMap<String, Option<f64>>,
}

impl StatEntity {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_stat(mut self, name: &str, value: Option<f64>) -> Self {
        self.set_stat(name, value);
        self
    }

    pub fn set_stat(&mut self, name: &str, value: Option<f64>) {
        self.stats
            .insert(name.to_string(), value.filter(|v| v.is_finite()));
    }

    pub fn stat(&self, name: &str) -> Option<f64> {
        self.stats
            .get(name)
            .copied()
            .flatten()
            .filter(|v| v.is_finite())
    }

    pub fn height_label(&self) -> String {
        format_height(self.height_inches, NOT_AVAILABLE)
    }
}

/// Height as feet'inches", e.g. `6'9"`; `placeholder` when unknown.
pub fn format_height(inches: Option<u32>, placeholder: &str) -> String {
    match inches {
        Some(h) if h > 0 => format!("{}'{}\"", h / 12, h % 12),
        _ => placeholder.to_string(),
    }
}

/// Absent values count as 0 here; they still render as "N/A".
pub fn compare_stat(value1: Option<f64>, value2: Option<f64>, definition: &StatDefinition) -> Winner {
    let v1 = comparable(value1);
    let v2 = comparable(value2);
    let winner = if v1 > v2 {
        Winner::Entity1
    } else if v2 > v1 {
        Winner::Entity2
    } else {
        Winner::Tie
    };
    if definition.higher_is_better {
        winner
    } else {
        winner.flip()
    }
}

fn comparable(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite()).unwrap_or(0.0)
}

pub fn format_stat(value: Option<f64>, kind: FormatKind) -> String {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return NOT_AVAILABLE.to_string();
    };
    match kind {
        FormatKind::RawInteger => format!("{value}"),
        FormatKind::Decimal1 => format!("{:.1}", round_to_tenth(value)),
        FormatKind::Percentage1 => {
            let scaled = value * 100.0;
            if scaled.is_finite() {
                format!("{:.1}%", round_to_tenth(scaled))
            } else {
                // Integral at this magnitude; shift the digits instead.
                format!("{value:.0}00.0%")
            }
        }
    }
}

// Half away from zero at one decimal; `{:.1}` alone rounds half-to-even on
// the binary value.
fn round_to_tenth(value: f64) -> f64 {
    let scaled = value * 10.0;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / 10.0;
    if rounded == 0.0 { 0.0 } else { rounded }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub definition: StatDefinition,
    pub value1: Option<f64>,
    pub value2: Option<f64>,
    pub display1: String,
    pub display2: String,
    pub winner: Winner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub entity1: StatEntity,
    pub entity2: StatEntity,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonResult {
    pub fn row(&self, stat_name: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|row| row.definition.name == stat_name)
    }

    pub fn winner_of(&self, stat_name: &str) -> Option<Winner> {
        self.row(stat_name).map(|row| row.winner)
    }

    pub fn wins(&self, side: Winner) -> usize {
        self.rows.iter().filter(|row| row.winner == side).count()
    }

    pub fn summary(&self) -> String {
        format!(
            "{} has played {} games with an average of {} PPG, while {} has played {} games averaging {} PPG.",
            self.entity1.name,
            games_or_zero(&self.entity1),
            format_stat(self.entity1.stat(POINTS_PER_GAME), FormatKind::Decimal1),
            self.entity2.name,
            games_or_zero(&self.entity2),
            format_stat(self.entity2.stat(POINTS_PER_GAME), FormatKind::Decimal1),
        )
    }
}

fn games_or_zero(entity: &StatEntity) -> String {
    format_stat(
        Some(entity.stat(GAMES_PLAYED).unwrap_or(0.0)),
        FormatKind::RawInteger,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IncompleteComparison {
    #[error("no statistics available for the first selection")]
    MissingFirst,
    #[error("no statistics available for the second selection")]
    MissingSecond,
    #[error("no statistics available for either selection")]
    MissingBoth,
}

pub fn build_comparison(
    entity1: Option<&StatEntity>,
    entity2: Option<&StatEntity>,
    definitions: &[StatDefinition],
) -> Result<ComparisonResult, IncompleteComparison> {
    let (entity1, entity2) = match (entity1, entity2) {
        (Some(a), Some(b)) => (a, b),
        (None, Some(_)) => return Err(IncompleteComparison::MissingFirst),
        (Some(_), None) => return Err(IncompleteComparison::MissingSecond),
        (None, None) => return Err(IncompleteComparison::MissingBoth),
    };

    let rows = definitions
        .iter()
        .map(|def| {
            let value1 = entity1.stat(def.name);
            let value2 = entity2.stat(def.name);
            ComparisonRow {
                definition: *def,
                value1,
                value2,
                display1: format_stat(value1, def.format),
                display2: format_stat(value2, def.format),
                winner: compare_stat(value1, value2, def),
            }
        })
        .collect();

    Ok(ComparisonResult {
        entity1: entity1.clone(),
        entity2: entity2.clone(),
        rows,
    })
}

/// Bar width in percent of `scale`, clamped to 0..=100.
pub fn bar_percentage(value: Option<f64>, scale: f64) -> f64 {
    if !scale.is_finite() || scale <= 0.0 {
        return 0.0;
    }
    let value = comparable(value);
    (value / scale * 100.0).clamp(0.0, 100.0)
}
