use log::{debug, info};
use url::Url;

use super::classify::classify_response;
use super::transport::{ReqwestTransport, Transport};
use super::types::*;
use super::Endpoint;
use crate::credentials::{CredentialProvider, API_KEY};
use crate::error::{GwsError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.globalwinescore.com";

/// Default page size for vintage and color lookups
pub const BROWSE_LIMIT: u32 = 50;
/// Default page size for the top-rated listing
pub const TOP_RATED_LIMIT: u32 = 20;
/// Ordering applied to vintage, color and top-rated lookups
pub const BY_SCORE_DESC: &str = "-score";

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root, without the `/globalwinescores` path
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: 30,
            user_agent: format!("gws-cli/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// GlobalWineScore query client.
///
/// Stateless between calls: every query reads the token afresh, sends exactly
/// one request and never retries.
pub struct ScoreClient<C, T = ReqwestTransport> {
    base_url: Url,
    credentials: C,
    transport: T,
}

impl<C: CredentialProvider> ScoreClient<C, ReqwestTransport> {
    /// Create a client using the `reqwest` transport
    pub fn new(config: ClientConfig, credentials: C) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout, &config.user_agent)?;
        Self::with_transport(&config.base_url, credentials, transport)
    }
}

impl<C: CredentialProvider, T: Transport> ScoreClient<C, T> {
    /// Create a client over an arbitrary transport
    pub fn with_transport(base_url: &str, credentials: C, transport: T) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GwsError::Config(format!("invalid API base URL '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(GwsError::Config(format!(
                "invalid API base URL '{}': not a hierarchical URL",
                base_url
            )));
        }

        Ok(Self {
            base_url,
            credentials,
            transport,
        })
    }

    /// Query `endpoint` with `filter` and return one page of scores
    pub async fn query(&self, endpoint: Endpoint, filter: &ScoreFilter) -> Result<ScorePage> {
        let token = self
            .credentials
            .get(API_KEY)
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| GwsError::Unauthenticated("no API token configured".to_string()))?;

        if filter.limit == Some(0) {
            return Err(GwsError::InvalidInput("limit must be a positive integer".to_string()));
        }

        let url = self.endpoint_url(endpoint);
        let params = filter.to_query_pairs();
        debug!("Querying {} endpoint with {:?}", endpoint.as_str(), params);

        let headers = [
            ("Authorization", format!("Token {}", token)),
            ("Accept", "application/json".to_string()),
        ];

        let response = self.transport.get(&url, &headers, &params).await?;
        let page = classify_response(response)?;

        info!(
            "Received {} of {} scores from {}",
            page.results.len(),
            page.count,
            endpoint.as_str()
        );
        Ok(page)
    }

    /// Endpoint path appended to the base URL, keeping any path prefix it has
    fn endpoint_url(&self, endpoint: Endpoint) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", url.path().trim_end_matches('/'), endpoint.path());
        url.set_path(&path);
        url
    }

    /// Latest scores for a vintage, best first
    pub async fn by_vintage(&self, vintage: &str, overrides: ScoreFilter) -> Result<ScorePage> {
        let defaults = ScoreFilter::new()
            .vintage(vintage)
            .limit(BROWSE_LIMIT)
            .ordering(BY_SCORE_DESC);
        self.query(Endpoint::Latest, &overrides.with_defaults(defaults))
            .await
    }

    /// Latest scores for a color, best first. The color is matched case-insensitively.
    pub async fn by_color(&self, color: &str, overrides: ScoreFilter) -> Result<ScorePage> {
        let color = color.to_lowercase().parse::<Color>()?;
        let defaults = ScoreFilter::new()
            .color(color)
            .limit(BROWSE_LIMIT)
            .ordering(BY_SCORE_DESC);
        self.query(Endpoint::Latest, &overrides.with_defaults(defaults))
            .await
    }

    /// Latest scores for one wine
    pub async fn by_wine_id(&self, wine_id: &str, overrides: ScoreFilter) -> Result<ScorePage> {
        let defaults = ScoreFilter::new().wine_id(wine_id);
        self.query(Endpoint::Latest, &overrides.with_defaults(defaults))
            .await
    }

    /// Latest scores for an L-WIN identifier
    pub async fn by_lwin(&self, lwin: &str, overrides: ScoreFilter) -> Result<ScorePage> {
        let defaults = ScoreFilter::new().lwin(lwin);
        self.query(Endpoint::Latest, &overrides.with_defaults(defaults))
            .await
    }

    /// Highest rated wines. Ordering is always by descending score.
    pub async fn top_rated(&self, overrides: ScoreFilter) -> Result<ScorePage> {
        let filter = overrides
            .with_defaults(ScoreFilter::new().limit(TOP_RATED_LIMIT))
            .ordering(BY_SCORE_DESC);
        self.query(Endpoint::Latest, &filter).await
    }
}
