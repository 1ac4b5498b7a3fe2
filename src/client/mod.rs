//! Proxy Client – Blocking HTTP transport
//! ======================================
//!
//! One [`ProxyClient`] per call site is all the labs need: the client owns
//! a single [`ureq::Agent`] (and therefore one connection pool), a base
//! URL, and an optional api key. The endpoint helpers live next to their
//! request/response types in [`chat`] and [`embeddings`]; this module
//! stays transport-only.
//!
//! ## Design Highlights
//! * **Single-shot calls** – every helper issues exactly one POST and
//!   blocks until the proxy answers or the transport fails. No retries,
//!   no timeout beyond the transport default.
//! * **Raw error bodies** – non-success statuses are surfaced as regular
//!   responses so the body can be read and carried into
//!   [`DlaiProxyError::Remote`] verbatim.
//! * **Two-stage decoding** – bytes are decoded to a [`serde_json::Value`]
//!   first (`Parse` errors), then into the typed response struct (`Shape`
//!   errors). The split keeps the two failure kinds distinguishable.
//! * **Relaxed TLS** – the lab images do not always trust the proxy's
//!   certificate chain, so verification is disabled for every call.

use std::io::Read;

use serde::Serialize;
use ureq::{tls::TlsConfig, Agent};

use crate::error::{DlaiProxyError, DlaiProxyResult};

pub mod chat;
pub mod embeddings;

/// The hosted proxy every course lab talks to.
pub const DEFAULT_BASE_URL: &str = "https://proxy.dlai.link/coursera_proxy/together";

/// Blocking client for the course-lab LLM proxy.
///
/// Cloning is cheap: the underlying agent shares one connection pool.
#[derive(Debug, Clone)]
pub struct ProxyClient {
    /// Underlying *ureq* connection-pool and HTTP state-machine.
    agent: Agent,
    /// Prefix shared by every request, e.g. the hosted proxy base.
    base_url: String,
    /// Accepted for forward compatibility. The current proxy deployment
    /// does not require a key, so none is ever sent.
    api_key: Option<String>,
}

impl ProxyClient {
    /// Creates a client targeting [`DEFAULT_BASE_URL`].
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a client targeting a different proxy base, e.g. a local
    /// stand-in server in tests.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let agent = Agent::new_with_config(
            Agent::config_builder()
                // The proxy's certificate chain is not in the lab images'
                // trust store.
                .tls_config(TlsConfig::builder().disable_verification(true).build())
                // Keep 4xx/5xx as responses so the raw body survives into
                // the error.
                .http_status_as_error(false)
                .build(),
        );
        let client = Self {
            agent,
            base_url: base_url.into(),
            api_key: None,
        };
        crate::trace!("Client created: {client}");
        client
    }

    /// Stores an api key. The key is kept for forward compatibility but
    /// not attached to requests; the proxy authenticates by network
    /// origin instead.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// The api key configured on this client, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// POSTs `body` as JSON to `{base_url}{path}` and decodes the response
    /// body into a [`serde_json::Value`].
    ///
    /// * `path` – Endpoint starting with a leading slash.
    pub(crate) fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> DlaiProxyResult<serde_json::Value> {
        debug_assert!(path.starts_with('/'));
        let url = format!("{}{}", self.base_url, path);

        let payload = serde_json::to_vec(body).map_err(DlaiProxyError::Serialize)?;
        crate::trace!("POST {url}: {}", String::from_utf8_lossy(&payload));

        let response = self
            .agent
            .post(&url)
            .content_type("application/json")
            .send(&payload[..])?;

        let status = response.status().as_u16();
        let mut bytes = Vec::new();
        response.into_body().into_reader().read_to_end(&mut bytes)?;

        if !(200..300).contains(&status) {
            return Err(DlaiProxyError::Remote {
                code: status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        crate::trace!("{url} answered {status} ({} bytes)", bytes.len());
        serde_json::from_slice(&bytes).map_err(DlaiProxyError::Parse)
    }
}

impl Default for ProxyClient {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ProxyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProxyClient({:?})", self.base_url)
    }
}
