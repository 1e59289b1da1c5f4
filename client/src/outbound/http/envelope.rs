//! The `{ success, message, data, errorCode, timestamp }` response envelope.
//! The timestamp is ignored.
//!
//! Bodies are decoded with `data` left as raw JSON first. A successful
//! envelope then decodes `data` into the endpoint's DTO; a failed one may
//! carry a field → message validation map in `data` instead.

use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::domain::ports::BackendApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ApiEnvelope {
    #[serde(default)]
    pub(super) success: bool,
    #[serde(default)]
    pub(super) message: Option<String>,
    #[serde(default)]
    pub(super) data: Option<Value>,
    #[serde(default)]
    pub(super) error_code: Option<String>,
}

/// Decode a response body into the envelope's `data`.
///
/// Returns `Ok(None)` for a successful envelope without data.
pub(super) fn decode_data<T>(status: StatusCode, body: &[u8]) -> Result<Option<T>, BackendApiError>
where
    T: DeserializeOwned,
{
    let envelope: ApiEnvelope = match serde_json::from_slice(body) {
        Ok(envelope) => envelope,
        Err(error) if status.is_success() => {
            return Err(BackendApiError::decode(format!(
                "invalid response envelope: {error}; body: {}",
                body_preview(body)
            )));
        }
        Err(_) => {
            warn!(status = status.as_u16(), body = %body_preview(body), "non-JSON error body");
            return Err(BackendApiError::rejected(status.as_u16(), None::<String>, ""));
        }
    };

    if !status.is_success() || !envelope.success {
        return Err(rejection(status, envelope));
    }

    match envelope.data {
        None | Some(Value::Null) => Ok(None),
        Some(data) => serde_json::from_value(data)
            .map(Some)
            .map_err(|error| BackendApiError::decode(format!("invalid response data: {error}"))),
    }
}

/// Like [`decode_data`] but treats missing data as a decode failure.
pub(super) fn require_data<T>(status: StatusCode, body: &[u8]) -> Result<T, BackendApiError>
where
    T: DeserializeOwned,
{
    decode_data(status, body)?
        .ok_or_else(|| BackendApiError::decode("response envelope carries no data"))
}

fn rejection(status: StatusCode, envelope: ApiEnvelope) -> BackendApiError {
    let validation = envelope
        .data
        .as_ref()
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .values()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        })
        .filter(|joined| !joined.is_empty());
    let message = validation.or(envelope.message).unwrap_or_default();
    BackendApiError::rejected(status.as_u16(), envelope.error_code, message)
}

/// Whitespace-collapsed prefix of a body for diagnostics.
pub(super) fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
