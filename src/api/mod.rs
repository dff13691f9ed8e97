pub mod classify;
pub mod client;
pub mod params;
pub mod transport;
pub mod types;

pub use client::{ClientConfig, ScoreClient};
pub use transport::{RawResponse, ReqwestTransport, Transport};
pub use types::{field, Color, ScoreFilter, ScorePage, WineScore};

/// Score resources exposed by the GlobalWineScore API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Current scores, available on every plan
    Latest,
    /// Full score history, Business plan only
    Historical,
}

impl Endpoint {
    /// Path relative to the API root
    pub fn path(&self) -> &'static str {
        match self {
            Self::Latest => "/globalwinescores/latest/",
            Self::Historical => "/globalwinescores/",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Latest => "latest",
            Self::Historical => "historical",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Latest => "Latest scores",
            Self::Historical => "Historical scores",
        }
    }
}
