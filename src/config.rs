use std::env;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub season_id: u32,
    pub leaderboard_limit: u32,
    pub games_limit: u32,
    pub request_timeout: Duration,
    pub demo: bool,
    pub refresh_interval: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let api_base = lookup("COURTVISION_API_BASE")
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        let season_id = parse_or(&lookup, "SEASON_ID", 1u32).max(1);
        let leaderboard_limit = parse_or(&lookup, "LEADERBOARD_LIMIT", 10u32).clamp(1, 50);
        let games_limit = parse_or(&lookup, "GAMES_LIMIT", 50u32).clamp(1, 100);
        let timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 10u64).clamp(1, 120);
        let demo = lookup("COURTVISION_DEMO")
            .map(|raw| matches!(raw.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);
        // 0 disables periodic refresh.
        let refresh_secs = parse_or(&lookup, "REFRESH_POLL_SECS", 0u64);
        let refresh_interval = (refresh_secs > 0).then(|| Duration::from_secs(refresh_secs.max(30)));

        Self {
            api_base,
            season_id,
            leaderboard_limit,
            games_limit,
            request_timeout: Duration::from_secs(timeout_secs),
            demo,
            refresh_interval,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}

fn parse_or<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|val| val.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_env() {
        let config = config_from(&[]);
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.season_id, 1);
        assert_eq!(config.leaderboard_limit, 10);
        assert_eq!(config.games_limit, 50);
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(!config.demo);
        assert!(config.refresh_interval.is_none());
    }

    #[test]
    fn values_are_clamped_to_api_limits() {
        let config = config_from(&[
            ("LEADERBOARD_LIMIT", "500"),
            ("GAMES_LIMIT", "0"),
            ("SEASON_ID", "0"),
            ("REFRESH_POLL_SECS", "5"),
        ]);
        assert_eq!(config.leaderboard_limit, 50);
        assert_eq!(config.games_limit, 1);
        assert_eq!(config.season_id, 1);
        assert_eq!(config.refresh_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn url_joins_without_double_slash() {
        let config = config_from(&[("COURTVISION_API_BASE", "http://api.local:9000/ "), ("COURTVISION_DEMO", "true")]);
        assert_eq!(config.url("/player"), "http://api.local:9000/player");
        assert!(config.demo);
    }
}
