// top-level error for the public API

#[derive(Debug, thiserror::Error)]
pub enum DlaiProxyError {
    /// I/O failure while reading a response body.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Wire-level failure before the proxy produced a response.
    #[error("http transport error: {0}")]
    Transport(#[from] ureq::Error),

    /// The proxy answered with a non-success status. Carries the raw
    /// response text so callers can see what the proxy actually said.
    #[error("proxy returned {code}: {body}")]
    Remote { code: u16, body: String },

    /// The request body could not be serialized.
    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The response was valid JSON but missing the expected structure,
    /// e.g. no `choices`, no `usage`, or an empty `data` list.
    #[error("unexpected response shape: {reason}")]
    Shape { reason: String },

    /// A required environment variable is missing.
    #[error("{name} is not set in the environment")]
    Env {
        name: &'static str,
        #[source]
        source: std::env::VarError,
    },
}

pub type DlaiProxyResult<T> = std::result::Result<T, DlaiProxyError>;

impl DlaiProxyError {
    pub(crate) fn shape(reason: impl Into<String>) -> Self {
        Self::Shape {
            reason: reason.into(),
        }
    }
}
