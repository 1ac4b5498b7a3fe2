//! Chat completions – `POST /v1/chat/completions`
//!
//! The proxy speaks the usual OpenAI-style chat surface, with one quirk:
//! sampling parameters that are *absent* must be sent as the literal
//! string `"none"` rather than omitted. The `SamplingValue` serializer
//! encodes that contract so nothing else in the crate has to know about
//! it.

use bon::Builder;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::{
    client::ProxyClient,
    error::{DlaiProxyError, DlaiProxyResult},
};

pub const DEFAULT_CHAT_MODEL: &str = "meta-llama/Llama-3.2-3B-Instruct-Turbo";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// Request for [`ProxyClient::chat_completion`].
///
/// Only `prompt` is required; everything else mirrors the proxy's
/// defaults. Fields in `extra` are merged verbatim into the top level of
/// the submitted payload, after the typed fields.
#[derive(Builder, Debug, Clone)]
#[builder(derive(Debug, Clone), on(String, into))]
pub struct ChatRequest {
    /// User prompt, sent as the sole message of the conversation.
    pub prompt: String,

    /// Role attached to the prompt message.
    #[builder(default = "user".to_string())]
    pub role: String,

    /// Nucleus sampling mass. Sent as `"none"` when unset.
    pub top_p: Option<f64>,

    /// Sampling temperature. Sent as `"none"` when unset.
    pub temperature: Option<f64>,

    /// Upper bound on generated tokens.
    #[builder(default = 500)]
    pub max_tokens: u32,

    /// Model identifier routed by the proxy.
    #[builder(default = DEFAULT_CHAT_MODEL.to_string())]
    pub model: String,

    /// Additional top-level payload fields, forwarded verbatim.
    #[builder(default)]
    pub extra: Map<String, Value>,
}

impl ChatRequest {
    fn payload(&self) -> ChatPayload<'_> {
        ChatPayload {
            model: &self.model,
            messages: [WireMessage {
                role: &self.role,
                content: &self.prompt,
            }],
            top_p: self.top_p.into(),
            temperature: self.temperature.into(),
            max_tokens: self.max_tokens,
            extra: &self.extra,
        }
    }
}

/// A chat message as the proxy returns it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Result of a chat completion: the **last** choice of the response plus
/// the total token usage of the exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatCompletion {
    pub role: String,
    pub content: String,
    pub total_tokens: u32,
}

/// A sampling parameter that is either set or the proxy's `"none"`
/// sentinel.
#[derive(Debug, Clone, Copy, PartialEq)]
enum SamplingValue {
    Set(f64),
    Unset,
}

impl From<Option<f64>> for SamplingValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Unset, Self::Set)
    }
}

impl Serialize for SamplingValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Set(v) => serializer.serialize_f64(*v),
            // The proxy expects the literal string "none" here, not a
            // missing or null field.
            Self::Unset => serializer.serialize_str("none"),
        }
    }
}

/// Wire form of [`ChatRequest`].
#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    model: &'a str,
    messages: [WireMessage<'a>; 1],
    top_p: SamplingValue,
    temperature: SamplingValue,
    max_tokens: u32,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

impl ProxyClient {
    /// Single-prompt chat completion call.
    pub fn chat_completion(&self, request: &ChatRequest) -> DlaiProxyResult<ChatCompletion> {
        let value = self.post(CHAT_COMPLETIONS_PATH, &request.payload())?;

        let mut response: ChatCompletionsResponse =
            serde_json::from_value(value).map_err(|e| DlaiProxyError::shape(e.to_string()))?;

        let last = response
            .choices
            .pop()
            .ok_or_else(|| DlaiProxyError::shape("`choices` list is empty"))?;

        Ok(ChatCompletion {
            role: last.message.role,
            content: last.message.content,
            total_tokens: response.usage.total_tokens,
        })
    }
}
