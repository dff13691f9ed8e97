use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::GwsError;

/// Wine color accepted by the `color` filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    White,
    Pink,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::White => "white",
            Self::Pink => "pink",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = GwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "red" => Ok(Self::Red),
            "white" => Ok(Self::White),
            "pink" => Ok(Self::Pink),
            other => Err(GwsError::InvalidInput(format!(
                "unknown color '{}' (expected red, white or pink)",
                other
            ))),
        }
    }
}

/// Optional filters narrowing a score query.
///
/// Built with the consuming setters below; fields that were never set are
/// never transmitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreFilter {
    pub wine_id: Option<String>,
    pub vintage: Option<String>,
    pub color: Option<Color>,
    pub is_primeurs: Option<bool>,
    pub lwin: Option<String>,
    pub lwin_11: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub ordering: Option<String>,
}

impl ScoreFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wine_id(mut self, wine_id: impl Into<String>) -> Self {
        self.wine_id = Some(wine_id.into());
        self
    }

    /// Four digit year or `NV`
    pub fn vintage(mut self, vintage: impl Into<String>) -> Self {
        self.vintage = Some(vintage.into());
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn is_primeurs(mut self, is_primeurs: bool) -> Self {
        self.is_primeurs = Some(is_primeurs);
        self
    }

    pub fn lwin(mut self, lwin: impl Into<String>) -> Self {
        self.lwin = Some(lwin.into());
        self
    }

    pub fn lwin_11(mut self, lwin_11: impl Into<String>) -> Self {
        self.lwin_11 = Some(lwin_11.into());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Field name, prefixed with `-` for descending order
    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    /// Fill every unset field from `defaults`. Fields already set win.
    pub fn with_defaults(self, defaults: ScoreFilter) -> Self {
        Self {
            wine_id: self.wine_id.or(defaults.wine_id),
            vintage: self.vintage.or(defaults.vintage),
            color: self.color.or(defaults.color),
            is_primeurs: self.is_primeurs.or(defaults.is_primeurs),
            lwin: self.lwin.or(defaults.lwin),
            lwin_11: self.lwin_11.or(defaults.lwin_11),
            limit: self.limit.or(defaults.limit),
            offset: self.offset.or(defaults.offset),
            ordering: self.ordering.or(defaults.ordering),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result fields the formatters know how to display
pub mod field {
    pub const WINE_NAME: &str = "wine_name";
    pub const VINTAGE: &str = "vintage";
    pub const SCORE: &str = "score";
    pub const CONFIDENCE_INDEX: &str = "confidence_index";
    pub const APPELLATION: &str = "appellation";
    pub const COLOR: &str = "color";
    pub const WINE_ID: &str = "wine_id";
    pub const LWIN: &str = "lwin";
    pub const IS_PRIMEURS: &str = "is_primeurs";
}

/// One rated wine observation, exactly as the API returned it.
///
/// The record is kept as a JSON object: absent fields stay absent, `null`
/// stays `null` and a field of an unexpected type is carried along instead of
/// failing the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WineScore(Map<String, Value>);

impl WineScore {
    /// Raw value of `name`; `None` when the field is absent or `null`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name).filter(|v| !v.is_null())
    }

    /// Human readable rendering of `name`. Text is shown as sent, numbers
    /// and booleans in their JSON form, nested values as compact JSON.
    pub fn display(&self, name: &str) -> Option<String> {
        self.get(name).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    pub fn wine_name(&self) -> Option<&str> {
        self.get(field::WINE_NAME).and_then(Value::as_str)
    }

    /// Numeric score, whether the server sent a number or numeric text
    pub fn score(&self) -> Option<f64> {
        match self.get(field::SCORE)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn is_primeurs(&self) -> Option<bool> {
        self.get(field::IS_PRIMEURS).and_then(Value::as_bool)
    }

    /// Every field the server sent, `null`s included
    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for WineScore {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorePage {
    /// Total number of matches across all pages
    pub count: u64,
    /// URL of the next page, if any
    pub next: Option<String>,
    /// URL of the previous page, if any
    pub previous: Option<String>,
    pub results: Vec<WineScore>,
    /// Envelope keys beyond the pagination fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
