use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

pub const POSITIONS: [&str; 5] = ["PG", "SG", "SF", "PF", "C"];

const MAX_NAME_CHARS: usize = 255;
const MAX_POSITION_CHARS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlayerFormError {
    #[error("player name is required")]
    MissingName,
    #[error("player name must be at most 255 characters")]
    NameTooLong,
    #[error("birth date must be YYYY-MM-DD, got {0:?}")]
    InvalidBirthDate(String),
    #[error("{field} must be a whole number, got {raw:?}")]
    NotANumber { field: &'static str, raw: String },
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: u32,
        max: u32,
    },
    #[error("position must be at most 10 characters")]
    PositionTooLong,
}

/// Body of `POST /player` and `PUT /player/{id}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlayerForm {
    pub player_name: String,
    pub birth_date: Option<String>,
    pub height_inches: Option<u32>,
    pub weight_lbs: Option<u32>,
    pub position: Option<String>,
    pub jersey_number: Option<u32>,
}

impl PlayerForm {
    /// Trims text fields, drops empty ones and upper-cases the position.
    pub fn normalized(&self) -> Self {
        Self {
            player_name: self.player_name.trim().to_string(),
            birth_date: non_empty(self.birth_date.as_deref()),
            height_inches: self.height_inches,
            weight_lbs: self.weight_lbs,
            position: non_empty(self.position.as_deref()).map(|p| p.to_uppercase()),
            jersey_number: self.jersey_number,
        }
    }

    pub fn validate(&self) -> Result<(), PlayerFormError> {
        let name = self.player_name.trim();
        if name.is_empty() {
            return Err(PlayerFormError::MissingName);
        }
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(PlayerFormError::NameTooLong);
        }
        if let Some(raw) = non_empty(self.birth_date.as_deref())
            && NaiveDate::parse_from_str(&raw, "%Y-%m-%d").is_err()
        {
            return Err(PlayerFormError::InvalidBirthDate(raw));
        }
        check_range("height_inches", self.height_inches, 1, 99)?;
        check_range("weight_lbs", self.weight_lbs, 1, 499)?;
        check_range("jersey_number", self.jersey_number, 0, 99)?;
        if let Some(pos) = non_empty(self.position.as_deref())
            && pos.chars().count() > MAX_POSITION_CHARS
        {
            return Err(PlayerFormError::PositionTooLong);
        }
        Ok(())
    }
}

/// Fields given on the command line for an update. `None` keeps the
/// stored value, since the API replaces every column on `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerPatch {
    pub player_name: Option<String>,
    pub birth_date: Option<String>,
    pub height_inches: Option<u32>,
    pub weight_lbs: Option<u32>,
    pub position: Option<String>,
    pub jersey_number: Option<u32>,
}

impl PlayerPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn apply_to(&self, current: &PlayerForm) -> PlayerForm {
        PlayerForm {
            player_name: self
                .player_name
                .clone()
                .unwrap_or_else(|| current.player_name.clone()),
            birth_date: self.birth_date.clone().or_else(|| current.birth_date.clone()),
            height_inches: self.height_inches.or(current.height_inches),
            weight_lbs: self.weight_lbs.or(current.weight_lbs),
            position: self.position.clone().or_else(|| current.position.clone()),
            jersey_number: self.jersey_number.or(current.jersey_number),
        }
        .normalized()
    }
}

pub fn parse_optional_number(field: &'static str, raw: Option<&str>) -> Result<Option<u32>, PlayerFormError> {
    let Some(raw) = non_empty(raw) else {
        return Ok(None);
    };
    raw.parse::<u32>()
        .map(Some)
        .map_err(|_| PlayerFormError::NotANumber { field, raw })
}

fn check_range(field: &'static str, value: Option<u32>, min: u32, max: u32) -> Result<(), PlayerFormError> {
    match value {
        Some(v) if v < min || v > max => Err(PlayerFormError::OutOfRange { field, min, max }),
        _ => Ok(()),
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
