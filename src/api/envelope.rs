use super::error::RequestError;
use http::StatusCode;
use serde_json::Value;

/// Vendor status code of a successful call.
pub const VENDOR_SUCCESS: i64 = 200;

/// Decide whether an exchange succeeded. Both the HTTP status and the `code` embedded in the
/// body have to be 200; a body without `code` counts as a failure. On success the decoded body
/// is handed back untouched for schema validation.
pub fn evaluate(status: StatusCode, body: &[u8]) -> Result<Value, RequestError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|source| RequestError::InvalidJson { source })?;
    log::debug!("api response: {}", value);

    let vendor_code = value.get("code").and_then(Value::as_i64).unwrap_or(0);

    if status == StatusCode::OK && vendor_code == VENDOR_SUCCESS {
        Ok(value)
    } else {
        log::error!("Request error (HTTP {}): {}", status.as_u16(), value);
        Err(RequestError::Rejected {
            status: status.as_u16(),
            body: value,
        })
    }
}
