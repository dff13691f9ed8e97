use clap::builder::BoolishValueParser;
use clap::{Args, Subcommand};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::types::{Color, ScoreFilter};

static VINTAGE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d{4}|NV)$").expect("vintage pattern is valid"));

/// Filters shared by every score command
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Match a specific wine
    #[arg(long)]
    pub wine_id: Option<String>,

    /// Vintage year (e.g. 2015) or NV
    #[arg(long, value_parser = parse_vintage)]
    pub vintage: Option<String>,

    /// Wine color (red, white, pink)
    #[arg(long, value_parser = parse_color)]
    pub color: Option<Color>,

    /// Restrict to en-primeur scores (true/false)
    #[arg(long = "primeurs", value_name = "BOOL", value_parser = BoolishValueParser::new())]
    pub is_primeurs: Option<bool>,

    /// L-WIN identifier
    #[arg(long)]
    pub lwin: Option<String>,

    /// 11-digit L-WIN identifier (wine and vintage)
    #[arg(long = "lwin11")]
    pub lwin_11: Option<String>,

    /// Maximum number of results
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: Option<u32>,

    /// Number of results to skip
    #[arg(short, long)]
    pub offset: Option<u32>,

    /// Sort field, prefix with '-' for descending (e.g. -score, date)
    #[arg(long, allow_hyphen_values = true)]
    pub ordering: Option<String>,
}

impl FilterArgs {
    /// Build a filter from the flags that were given
    pub fn to_filter(&self) -> ScoreFilter {
        let mut filter = ScoreFilter::new();

        if let Some(wine_id) = &self.wine_id {
            filter = filter.wine_id(wine_id);
        }
        if let Some(vintage) = &self.vintage {
            filter = filter.vintage(vintage);
        }
        if let Some(color) = self.color {
            filter = filter.color(color);
        }
        if let Some(is_primeurs) = self.is_primeurs {
            filter = filter.is_primeurs(is_primeurs);
        }
        if let Some(lwin) = &self.lwin {
            filter = filter.lwin(lwin);
        }
        if let Some(lwin_11) = &self.lwin_11 {
            filter = filter.lwin_11(lwin_11);
        }
        if let Some(limit) = self.limit {
            filter = filter.limit(limit);
        }
        if let Some(offset) = self.offset {
            filter = filter.offset(offset);
        }
        if let Some(ordering) = &self.ordering {
            filter = filter.ordering(ordering);
        }

        filter
    }
}

/// Vintage command arguments
#[derive(Args, Debug)]
pub struct VintageArgs {
    /// Vintage year (e.g. 2015) or NV
    #[arg(value_name = "VINTAGE", value_parser = parse_vintage)]
    pub year: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Color command arguments
#[derive(Args, Debug)]
pub struct ColorArgs {
    /// Wine color (red, white, pink), case-insensitive
    #[arg(value_name = "COLOR")]
    pub name: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Wine command arguments
#[derive(Args, Debug)]
pub struct WineArgs {
    /// GlobalWineScore wine identifier
    #[arg(value_name = "WINE_ID")]
    pub id: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// L-WIN command arguments
#[derive(Args, Debug)]
pub struct LwinArgs {
    /// L-WIN identifier
    #[arg(value_name = "LWIN")]
    pub id: String,

    #[command(flatten)]
    pub filters: FilterArgs,
}

/// Configuration command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key (api.key, api.base_url)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Show configuration file path
    Path,

    /// Initialize configuration
    Init,
}

fn parse_vintage(value: &str) -> Result<String, String> {
    let value = value.trim().to_uppercase();
    if VINTAGE_PATTERN.is_match(&value) {
        Ok(value)
    } else {
        Err(format!(
            "'{}' is not a vintage: expected a 4-digit year or NV",
            value
        ))
    }
}

fn parse_color(value: &str) -> Result<Color, String> {
    value.parse::<Color>().map_err(|e| e.to_string())
}
