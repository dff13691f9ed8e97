use log::warn;
use reqwest::StatusCode;
use serde::Deserialize;

use super::transport::RawResponse;
use super::types::ScorePage;
use crate::error::{GwsError, Result};

/// Structured rejection body sent by the API
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// Turn a raw HTTP response into a score page or a classified error.
///
/// Checked in order, first match wins: 401, 429, 403, any other non-2xx
/// carrying a `detail` message, then everything else.
pub fn classify_response(response: RawResponse) -> Result<ScorePage> {
    let error = match response.status {
        200..=299 => {
            return serde_json::from_str::<ScorePage>(&response.body).map_err(|e| {
                GwsError::TransportFailure(format!("malformed response body: {}", e))
            });
        }
        401 => GwsError::Unauthenticated("the API rejected the token".to_string()),
        429 => GwsError::RateLimited,
        403 => GwsError::PlanRestricted,
        status => match detail_message(&response.body) {
            Some(detail) => GwsError::RemoteRejected(detail),
            None => GwsError::TransportFailure(format!(
                "unexpected response status {}",
                describe_status(status)
            )),
        },
    };

    warn!("Score query failed with status {}: {}", response.status, error);
    Err(error)
}

fn detail_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|body| body.detail)
}

fn describe_status(status: u16) -> String {
    match StatusCode::from_u16(status)
        .ok()
        .and_then(|s| s.canonical_reason())
    {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    }
}
