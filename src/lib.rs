pub mod api;
pub mod config;
pub mod demo_feed;
pub mod feed;
pub mod games;
pub mod http_client;
pub mod leaderboard;
pub mod player_form;
pub mod state;
pub mod stats;
