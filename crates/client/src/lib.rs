//! `geoprobe-client` — Blocking client for ipwho.is-style lookup APIs.
//!
//! One lookup is one `GET <base>/<ip>`; this crate turns the wire response
//! into the engine's [`LookupResponse`] and nothing more. Scenario judgment
//! lives in `geoprobe-engine`.
//!
//! No retries. No async runtime. No caching.

mod client;

pub use client::{GeoClient, GeoClientError, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

pub use geoprobe_engine::LookupResponse;
