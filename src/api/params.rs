use super::types::{Color, ScoreFilter};
use crate::error::{GwsError, Result};

pub const WINE_ID: &str = "wine_id";
pub const VINTAGE: &str = "vintage";
pub const COLOR: &str = "color";
pub const IS_PRIMEURS: &str = "is_primeurs";
pub const LWIN: &str = "lwin";
pub const LWIN_11: &str = "lwin_11";
pub const LIMIT: &str = "limit";
pub const OFFSET: &str = "offset";
pub const ORDERING: &str = "ordering";

impl ScoreFilter {
    /// Query parameters for this filter, in a fixed order, unset fields skipped
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(wine_id) = &self.wine_id {
            params.push((WINE_ID, wine_id.clone()));
        }
        if let Some(vintage) = &self.vintage {
            params.push((VINTAGE, vintage.clone()));
        }
        if let Some(color) = self.color {
            params.push((COLOR, color.as_str().to_string()));
        }
        if let Some(is_primeurs) = self.is_primeurs {
            params.push((IS_PRIMEURS, is_primeurs.to_string()));
        }
        if let Some(lwin) = &self.lwin {
            params.push((LWIN, lwin.clone()));
        }
        if let Some(lwin_11) = &self.lwin_11 {
            params.push((LWIN_11, lwin_11.clone()));
        }
        if let Some(limit) = self.limit {
            params.push((LIMIT, limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push((OFFSET, offset.to_string()));
        }
        if let Some(ordering) = &self.ordering {
            params.push((ORDERING, ordering.clone()));
        }

        params
    }

    /// Rebuild a filter from query parameters produced by [`to_query_pairs`](Self::to_query_pairs)
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut filter = Self::new();

        for (key, value) in pairs {
            let value = value.as_ref();
            filter = match key.as_ref() {
                WINE_ID => filter.wine_id(value),
                VINTAGE => filter.vintage(value),
                COLOR => filter.color(value.parse::<Color>()?),
                IS_PRIMEURS => filter.is_primeurs(parse_bool(value)?),
                LWIN => filter.lwin(value),
                LWIN_11 => filter.lwin_11(value),
                LIMIT => match parse_number(LIMIT, value)? {
                    0 => {
                        return Err(GwsError::InvalidInput(format!(
                            "{} must be a positive integer",
                            LIMIT
                        )))
                    }
                    limit => filter.limit(limit),
                },
                OFFSET => filter.offset(parse_number(OFFSET, value)?),
                ORDERING => filter.ordering(value),
                other => {
                    return Err(GwsError::InvalidInput(format!(
                        "unknown query parameter '{}'",
                        other
                    )))
                }
            };
        }

        Ok(filter)
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(GwsError::InvalidInput(format!(
            "{} must be 'true' or 'false', got '{}'",
            IS_PRIMEURS, other
        ))),
    }
}

fn parse_number(name: &str, value: &str) -> Result<u32> {
    value
        .parse::<u32>()
        .map_err(|_| GwsError::InvalidInput(format!("{} must be a non-negative integer, got '{}'", name, value)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_filter() -> ScoreFilter {
        ScoreFilter::new()
            .ordering("-score")
            .offset(40)
            .limit(20)
            .lwin_11("10123452015")
            .lwin("1012345")
            .is_primeurs(true)
            .color(Color::White)
            .vintage("2015")
            .wine_id("174451")
    }

    #[test]
    fn test_empty_filter_has_no_params() {
        assert!(ScoreFilter::new().to_query_pairs().is_empty());
    }

    #[test]
    fn test_params_follow_fixed_order() {
        let names: Vec<&str> = full_filter()
            .to_query_pairs()
            .into_iter()
            .map(|(name, _)| name)
            .collect();

        assert_eq!(
            names,
            vec![
                "wine_id",
                "vintage",
                "color",
                "is_primeurs",
                "lwin",
                "lwin_11",
                "limit",
                "offset",
                "ordering"
            ]
        );
    }

    #[test]
    fn test_unset_fields_are_skipped() {
        let params = ScoreFilter::new().vintage("NV").limit(5).to_query_pairs();
        assert_eq!(
            params,
            vec![("vintage", "NV".to_string()), ("limit", "5".to_string())]
        );
    }

    #[test]
    fn test_false_primeurs_is_transmitted() {
        let params = ScoreFilter::new().is_primeurs(false).to_query_pairs();
        assert_eq!(params, vec![("is_primeurs", "false".to_string())]);
    }

    #[test]
    fn test_zero_offset_is_transmitted() {
        let params = ScoreFilter::new().offset(0).to_query_pairs();
        assert_eq!(params, vec![("offset", "0".to_string())]);
    }

    #[test]
    fn test_round_trip_reconstructs_filter() {
        let samples = vec![
            ScoreFilter::new(),
            full_filter(),
            ScoreFilter::new().is_primeurs(false).offset(0),
            ScoreFilter::new().color(Color::Pink).ordering("date"),
        ];

        for filter in samples {
            let parsed = ScoreFilter::from_query_pairs(filter.to_query_pairs()).unwrap();
            assert_eq!(parsed, filter);
        }
    }

    #[test]
    fn test_from_query_pairs_rejects_bad_values() {
        assert!(ScoreFilter::from_query_pairs([("limit", "ten")]).is_err());
        assert!(ScoreFilter::from_query_pairs([("limit", "0")]).is_err());
        assert!(ScoreFilter::from_query_pairs([("is_primeurs", "yes")]).is_err());
        assert!(ScoreFilter::from_query_pairs([("color", "orange")]).is_err());
        assert!(ScoreFilter::from_query_pairs([("region", "bordeaux")]).is_err());
    }
}
