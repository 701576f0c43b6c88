use chrono::{NaiveDate, NaiveDateTime};

use crate::stats::NOT_AVAILABLE;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRow {
    pub id: u32,
    pub game_date_time: Option<String>,
    pub game_type: Option<String>,
    pub home_team: Option<String>,
    pub away_team: Option<String>,
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSide {
    Home,
    Away,
}

impl GameRow {
    /// The side with the strictly higher score; `None` while level or unscored.
    pub fn winner(&self) -> Option<GameSide> {
        let (home, away) = (self.home_score?, self.away_score?);
        if home > away {
            Some(GameSide::Home)
        } else if away > home {
            Some(GameSide::Away)
        } else {
            None
        }
    }

    pub fn home_label(&self) -> &str {
        self.home_team.as_deref().unwrap_or("TBD")
    }

    pub fn away_label(&self) -> &str {
        self.away_team.as_deref().unwrap_or("TBD")
    }

    pub fn score_line(&self) -> String {
        match (self.away_score, self.home_score) {
            (Some(away), Some(home)) => format!("{away}-{home}"),
            _ => "-".to_string(),
        }
    }

    pub fn when(&self) -> String {
        format_game_date(self.game_date_time.as_deref().unwrap_or_default())
    }
}

pub fn format_game_date(raw: &str) -> String {
    let cleaned = raw.trim();
    if cleaned.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    if let Some(dt) = parse_game_datetime(cleaned) {
        return dt.format("%b %-d, %Y, %I:%M %p").to_string();
    }
    if let Ok(date) = NaiveDate::parse_from_str(cleaned, "%Y-%m-%d") {
        return date.format("%b %-d, %Y").to_string();
    }
    cleaned.to_string()
}

fn parse_game_datetime(raw: &str) -> Option<NaiveDateTime> {
    const FORMATS: [&str; 6] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ];

    // Offsets are dropped; the API stores local tip-off times.
    let trimmed = strip_offset(raw);
    for fmt in FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    None
}

fn strip_offset(raw: &str) -> &str {
    let raw = raw.trim_end_matches('Z');
    // "+HH:MM" / "-HH:MM" after the time part.
    if raw.len() > 19 && raw.is_char_boundary(19) {
        let (head, tail) = raw.split_at(19);
        if let Some(idx) = tail.find(['+', '-']) {
            return &raw[..head.len() + idx];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_iso_timestamps() {
        assert_eq!(format_game_date("2024-01-05T19:30:00"), "Jan 5, 2024, 07:30 PM");
        assert_eq!(format_game_date("2024-03-10 12:05:00+00:00"), "Mar 10, 2024, 12:05 PM");
        assert_eq!(format_game_date("2024-03-10"), "Mar 10, 2024");
        assert_eq!(format_game_date(""), NOT_AVAILABLE);
        assert_eq!(format_game_date("soon"), "soon");
    }

    #[test]
    fn winner_needs_both_scores() {
        let mut game = GameRow {
            id: 1,
            game_date_time: None,
            game_type: None,
            home_team: Some("BOS".to_string()),
            away_team: None,
            home_score: Some(101),
            away_score: None,
        };
        assert_eq!(game.winner(), None);
        assert_eq!(game.away_label(), "TBD");
        game.away_score = Some(99);
        assert_eq!(game.winner(), Some(GameSide::Home));
        game.away_score = Some(101);
        assert_eq!(game.winner(), None);
    }
}
