use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::{self, Responder, Response};
use serde_json::Value;
use std::io::Cursor;
use thiserror::Error;

/// Anything an API call can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    SchemaValidation(#[from] SchemaValidationError),

    #[error(transparent)]
    Parameter(#[from] ParameterError),
}

/// The exchange with the vendor failed: no usable response, a body that is not JSON, or a
/// response whose transport or vendor status is not a success.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("returned data is not valid json: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
    },

    /// Keeps the whole decoded body so callers can report exactly what the vendor said.
    #[error("request rejected (HTTP {status}): {body}")]
    Rejected { status: u16, body: Value },
}

impl RequestError {
    /// Vendor status code of a rejected response, if the body carried one.
    pub fn vendor_code(&self) -> Option<i64> {
        match self {
            RequestError::Rejected { body, .. } => body.get("code").and_then(Value::as_i64),
            _ => None,
        }
    }
}

/// A decoded payload did not satisfy its record's contract.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid field `{field}` (received {received}): {reason}")]
pub struct SchemaValidationError {
    /// Path of the offending field, e.g. `data[2].cbat`.
    pub field: String,
    /// Raw wire value, `null` when the field was absent.
    pub received: Value,
    pub reason: String,
}

impl SchemaValidationError {
    pub(crate) fn new(field: &str, received: Value, reason: impl Into<String>) -> Self {
        SchemaValidationError {
            field: field.to_owned(),
            received,
            reason: reason.into(),
        }
    }

    pub(crate) fn missing(field: &str) -> Self {
        SchemaValidationError::new(field, Value::Null, "field required")
    }
}

/// Caller input rejected before any request was sent.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid parameter `{parameter}` ({value}): {reason}")]
pub struct ParameterError {
    pub parameter: &'static str,
    pub value: String,
    pub reason: String,
}

impl ParameterError {
    pub(crate) fn new(
        parameter: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        ParameterError {
            parameter,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

fn html(status: Status, title: &str, detail: String) -> response::Result<'static> {
    let body = format!(
        "<html><body><h3>{}</h3><code>{}</code></body></html>",
        title, detail
    );
    Response::build()
        .status(status)
        .sized_body(body.len(), Cursor::new(body))
        .header(ContentType::new("text", "html"))
        .ok()
}

impl<'r> Responder<'r, 'static> for Error {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        match self {
            Error::Parameter(e) => html(Status::BadRequest, "400 Bad Request", e.to_string()),
            Error::Request(e @ RequestError::Rejected { .. }) => html(
                Status::BadGateway,
                "502 Bad Gateway",
                format!("Downstream API response: {}", e),
            ),
            _ => html(
                Status::InternalServerError,
                "Unknown exception",
                self.to_string(),
            ),
        }
    }
}
