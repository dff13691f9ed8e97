pub mod config;
pub mod scores;
pub mod version;
