// File: src/request.rs
// Purpose: Request body decoding and client metadata

use crate::error::AppError;
use axum::{
    async_trait,
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use intake_validation::{Field, FieldValues};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::convert::Infallible;
use std::net::SocketAddr;

// ════════════════════════════════════════════════════════════
// Client metadata
// ════════════════════════════════════════════════════════════

/// Who sent the request and what response format they expect
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: String,
    /// `X-Requested-With: XMLHttpRequest`
    pub is_ajax: bool,
    pub accepts_json: bool,
}

impl ClientInfo {
    /// JSON for script clients, HTML for browsers
    pub fn wants_json(&self) -> bool {
        self.is_ajax || self.accepts_json
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        let user_agent = header_str(&parts.headers, header::USER_AGENT.as_str())
            .unwrap_or("unknown")
            .to_string();

        let is_ajax = header_str(&parts.headers, "x-requested-with")
            .is_some_and(|v| v.eq_ignore_ascii_case("xmlhttprequest"));

        let accepts_json = header_str(&parts.headers, header::ACCEPT.as_str())
            .is_some_and(|v| v.contains("application/json"));

        Ok(ClientInfo {
            ip,
            user_agent,
            is_ajax,
            accepts_json,
        })
    }
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

// ════════════════════════════════════════════════════════════
// Body decoding
// ════════════════════════════════════════════════════════════

/// Decode a form post as JSON or urlencoded pairs. Any other content type
/// decodes to an empty submission.
pub fn parse_form_body(headers: &HeaderMap, body: &[u8]) -> Result<FieldValues, AppError> {
    let content_type = header_str(headers, header::CONTENT_TYPE.as_str()).unwrap_or("");

    if content_type.contains("application/json") {
        let map: serde_json::Map<String, JsonValue> = serde_json::from_slice(body)?;
        Ok(json_to_values(map))
    } else if content_type.contains("application/x-www-form-urlencoded") {
        Ok(parse_urlencoded(body))
    } else {
        Ok(FieldValues::new())
    }
}

fn parse_urlencoded(body: &[u8]) -> FieldValues {
    let form_str = String::from_utf8_lossy(body);
    form_str
        .split('&')
        .filter_map(|pair| {
            pair.split_once('=').map(|(k, v)| (decode_component(k), decode_component(v)))
        })
        .collect()
}

// '+' is a space in form encoding; percent escapes are decoded after
fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced)
        .map(|s| s.into_owned())
        .unwrap_or(spaced)
}

pub fn json_to_values(map: serde_json::Map<String, JsonValue>) -> FieldValues {
    map.into_iter()
        .map(|(k, v)| (k, json_to_text(v)))
        .collect()
}

/// Scalars become their text form; null becomes ""
pub fn json_to_text(value: JsonValue) -> String {
    match value {
        JsonValue::String(s) => s,
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

/// Keep only the form's fixed key set, defaulting missing fields to ""
pub fn submission_values(mut raw: FieldValues) -> FieldValues {
    Field::ALL
        .into_iter()
        .map(|field| {
            let value = raw.remove(field.as_str()).unwrap_or_default();
            (field.as_str().to_string(), value)
        })
        .collect()
}

/// Body of a live single-field check
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FieldCheckRequest {
    pub field: Option<String>,
    pub value: Option<JsonValue>,
    #[serde(rename = "allData", default)]
    pub all_data: serde_json::Map<String, JsonValue>,
}

impl FieldCheckRequest {
    /// `allData` with the checked field's value laid over it
    pub fn merged_values(self, field: &str, value: JsonValue) -> FieldValues {
        let mut values = json_to_values(self.all_data);
        values.insert(field.to_string(), json_to_text(value));
        values
    }
}
