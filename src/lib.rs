pub mod api;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod error;
pub mod output;
pub mod progress;
