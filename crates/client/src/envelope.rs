//! Unwrapping of the `{success, data, error, message}` envelope every endpoint
//! answers with.

use api_types::ApiResponse;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{ClientError, HttpResponse};

const REQUEST_FAILED: &str = "Request failed";

/// Extracts `data` from a decoded envelope.
pub fn parse_envelope<T: DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    let data = checked_data(value)?.ok_or(ClientError::EmptyResponse)?;
    serde_json::from_value(data).map_err(|err| ClientError::InvalidResponse(err.to_string()))
}

/// Maps a raw response onto its payload.
///
/// A 401 that is still there after the refresh attempt means the session is
/// gone; other non-2xx statuses carry the server's error text.
pub fn parse_response<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ClientError> {
    parse_envelope(success_body(response)?)
}

/// Like [`parse_response`] for endpoints whose envelope carries no `data`.
pub fn parse_unit(response: &HttpResponse) -> Result<(), ClientError> {
    if response.is_success() && response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(());
    }
    checked_data(success_body(response)?).map(|_| ())
}

/// Error text of a failed response body: `error`, then `message`, then
/// `fallback`. Empty strings count as absent.
pub fn error_message(body: Option<&Value>, fallback: &str) -> String {
    text_field(body, "error")
        .or_else(|| text_field(body, "message"))
        .unwrap_or_else(|| fallback.to_string())
}

fn text_field(body: Option<&Value>, key: &str) -> Option<String> {
    body.and_then(|body| body.get(key))
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(str::to_string)
}

fn success_body(response: &HttpResponse) -> Result<Value, ClientError> {
    if response.status == 401 {
        return Err(ClientError::AuthExpired);
    }
    if !response.is_success() {
        return Err(ClientError::RequestFailed {
            status: response.status,
            message: error_message(response.json_value().as_ref(), REQUEST_FAILED),
        });
    }
    serde_json::from_slice(&response.body)
        .map_err(|err| ClientError::InvalidResponse(err.to_string()))
}

/// Validates the envelope and returns its `data`, `None` when absent or null.
///
/// A member of the wrong type makes the whole envelope invalid.
fn checked_data(value: Value) -> Result<Option<Value>, ClientError> {
    if !value.is_object() {
        return Err(ClientError::InvalidResponse("Invalid API response".to_string()));
    }
    let envelope: ApiResponse<Value> = serde_json::from_value(value)
        .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
    if !envelope.success {
        let message = [envelope.error, envelope.message]
            .into_iter()
            .flatten()
            .find(|text| !text.is_empty())
            .unwrap_or_else(|| REQUEST_FAILED.to_string());
        return Err(ClientError::RequestFailed {
            status: 200,
            message,
        });
    }
    Ok(envelope.data)
}
