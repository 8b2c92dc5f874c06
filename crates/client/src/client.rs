//! Geolocation HTTP client.
//!
//! Blocking reqwest client (no Tokio runtime required).
//! A lookup makes exactly one attempt: transport faults surface as errors,
//! while upstream refusals (API `success: false`, non-success HTTP status)
//! come back as data for the engine to judge.

use std::time::Duration;

use geoprobe_engine::model::{GeoField, GeoRecord, LookupError};
use geoprobe_engine::{GeoLookup, LookupResponse};

// ── Constants ───────────────────────────────────────────────────────

pub const DEFAULT_BASE_URL: &str = "https://ipwho.is";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("gprobe/", env!("CARGO_PKG_VERSION"));

// ── Client ──────────────────────────────────────────────────────────

/// Geolocation API client (blocking).
#[derive(Clone)]
pub struct GeoClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

/// Error type for lookup transport and decoding.
#[derive(Debug)]
pub enum GeoClientError {
    /// Network or timeout error
    Network(String),
    /// Response body was not valid JSON
    Parse(String),
}

impl std::fmt::Display for GeoClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoClientError::Network(msg) => write!(f, "network error: {}", msg),
            GeoClientError::Parse(msg) => write!(f, "parse error: {}", msg),
        }
    }
}

impl std::error::Error for GeoClientError {}

impl GeoClient {
    /// Client with the default per-request timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        let base = base_url.into();
        Self {
            http,
            base_url: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `GET <base>/<ip>`, single attempt. An empty address queries the bare
    /// base URL, which is how the upstream phrases its "address required"
    /// refusal.
    pub fn lookup_ip(&self, ip: &str) -> Result<LookupResponse, GeoClientError> {
        let url = format!("{}/{}", self.base_url, ip);
        let resp = self
            .http
            .get(&url)
            .send()
            .map_err(|e| GeoClientError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Ok(LookupResponse::Refused {
                message: format!("HTTP error: {}", status.as_u16()),
            });
        }

        let body: serde_json::Value = resp
            .json()
            .map_err(|e| GeoClientError::Parse(e.to_string()))?;
        Ok(decode_response(&body))
    }
}

impl GeoLookup for GeoClient {
    fn lookup(&self, ip: &str) -> Result<LookupResponse, LookupError> {
        self.lookup_ip(ip).map_err(|e| LookupError {
            reason: e.to_string(),
        })
    }
}

// ── Wire decoding ───────────────────────────────────────────────────

/// Map the wire JSON onto a record. An explicit `success: false` is an API
/// refusal carrying the upstream message; an absent `success` field reads as
/// success.
fn decode_response(body: &serde_json::Value) -> LookupResponse {
    if body["success"].as_bool() == Some(false) {
        let message = body["message"]
            .as_str()
            .filter(|m| !m.is_empty())
            .unwrap_or("unknown API error")
            .to_string();
        return LookupResponse::Refused { message };
    }

    let mut record = GeoRecord::default();
    record.ip = field_string(&body["ip"]);
    for field in GeoField::ALL {
        if let Some(value) = field_string(&body[field.as_str()]) {
            record.set(field, value);
        }
    }
    LookupResponse::Record(record)
}

/// One JSON field as report text: strings verbatim (empty included), numbers
/// and bools via Display, null/absent dropped.
fn field_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ── Tests ───────────────────────────────────────────────────────────
