//! Embeddings – `POST /v1/embeddings`

use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    client::ProxyClient,
    error::{DlaiProxyError, DlaiProxyResult},
};

pub const DEFAULT_EMBEDDING_MODEL: &str = "BAAI/bge-base-en-v1.5";

const EMBEDDINGS_PATH: &str = "/v1/embeddings";

/// Request for [`ProxyClient::embedding`]. Single input only; the proxy
/// is asked for one vector per call.
#[derive(Builder, Debug, Clone)]
#[builder(derive(Debug, Clone), on(String, into))]
pub struct EmbeddingsRequest {
    /// Text to embed.
    pub input: String,

    /// Embedding model identifier routed by the proxy.
    #[builder(default = DEFAULT_EMBEDDING_MODEL.to_string())]
    pub model: String,

    /// Additional top-level payload fields, forwarded verbatim.
    #[builder(default)]
    pub extra: Map<String, Value>,
}

impl EmbeddingsRequest {
    fn payload(&self) -> EmbeddingsPayload<'_> {
        EmbeddingsPayload {
            model: &self.model,
            input: &self.input,
            extra: &self.extra,
        }
    }
}

/// Wire form of [`EmbeddingsRequest`].
#[derive(Debug, Serialize)]
struct EmbeddingsPayload<'a> {
    model: &'a str,
    input: &'a str,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    embedding: Vec<f32>,
}

impl ProxyClient {
    /// Single-input embedding call. Returns the first vector of the
    /// response's `data` list.
    pub fn embedding(&self, request: &EmbeddingsRequest) -> DlaiProxyResult<Vec<f32>> {
        let value = self.post(EMBEDDINGS_PATH, &request.payload())?;

        let response: EmbeddingsResponse =
            serde_json::from_value(value).map_err(|e| DlaiProxyError::shape(e.to_string()))?;

        let first = response
            .data
            .into_iter()
            .next()
            .ok_or_else(|| DlaiProxyError::shape("`data` list is empty"))?;

        Ok(first.embedding)
    }
}
