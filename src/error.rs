use thiserror::Error;

#[derive(Debug, Error)]
pub enum GwsError {
    #[error("Authentication failed: {0}")]
    Unauthenticated(String),

    #[error("Rate limit exceeded. The API allows 10 requests per minute.")]
    RateLimited,

    #[error("Access denied. This endpoint requires a higher subscription plan.")]
    PlanRestricted,

    #[error("API error: {0}")]
    RemoteRejected(String),

    #[error("Request failed: {0}")]
    TransportFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GwsError {
    /// Get user-friendly hint for the error
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Unauthenticated(_) => Some(
                "Check that your API token is valid. \
                 Set it with: gws config set api.key YOUR_TOKEN"
                    .to_string(),
            ),
            Self::RateLimited => {
                Some("Wait a minute before sending more requests.".to_string())
            }
            Self::PlanRestricted => Some(
                "Historical scores are only available with a Business plan. \
                 Use 'gws latest' for current scores."
                    .to_string(),
            ),
            Self::TransportFailure(_) => {
                Some("Check your internet connection and try again.".to_string())
            }
            Self::Config(_) => Some("Run 'gws config path' to locate the configuration file.".to_string()),
            _ => None,
        }
    }

    /// Whether this error is one of the classified outcomes of a score query
    pub fn is_query_failure(&self) -> bool {
        matches!(
            self,
            Self::Unauthenticated(_)
                | Self::RateLimited
                | Self::PlanRestricted
                | Self::RemoteRejected(_)
                | Self::TransportFailure(_)
        )
    }

    /// Process exit status reported by the CLI for this error
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidInput(_) => 2,
            Self::Unauthenticated(_) => 3,
            Self::RateLimited => 4,
            Self::PlanRestricted => 5,
            Self::RemoteRejected(_) => 6,
            Self::TransportFailure(_) => 7,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, GwsError>;
