//! dlai_proxy – typed client for the DLAI course-lab LLM proxy
//! ===========================================================
//!
//! Course-lab notebooks talk to a hosted LLM proxy that fronts the actual
//! model provider. This crate wraps that proxy with a small, fully typed,
//! *blocking* client plus the two workspace helpers the labs need.
//!
//! ```rust,no_run
//! use dlai_proxy::*;
//!
//! fn main() -> DlaiProxyResult<()> {
//!     let client = ProxyClient::new();
//!
//!     let reply = client.chat_completion(
//!         &ChatRequest::builder()
//!             .prompt("What is an embedding?")
//!             .temperature(0.7)
//!             .build(),
//!     )?;
//!     println!("{} ({} tokens)", reply.content, reply.total_tokens);
//!
//!     let vector = client.embedding(
//!         &EmbeddingsRequest::builder()
//!             .input("What is an embedding?")
//!             .build(),
//!     )?;
//!     println!("{} dims", vector.len());
//!     Ok(())
//! }
//! ```
//!
//! ### Endpoints ⇄ Typed Helpers
//! | HTTP Route                  | Helper on `ProxyClient` | Request type          | Result type        |
//! |-----------------------------|-------------------------|-----------------------|--------------------|
//! | `POST /v1/chat/completions` | `chat_completion()`     | [`ChatRequest`]       | [`ChatCompletion`] |
//! | `POST /v1/embeddings`       | `embedding()`           | [`EmbeddingsRequest`] | `Vec<f32>`         |
//!
//! Every call is a single synchronous request: no retries, no streaming,
//! no shared state between calls. Failures map onto [`DlaiProxyError`] so
//! callers can tell a rejected request (`Remote`), an unparseable body
//! (`Parse`), and a body with the wrong shape (`Shape`) apart.
//!
//! The [`workspace`] module covers the remaining lab plumbing: printing
//! the lab UI URL derived from `WORKSPACE_ID` and restarting the hosting
//! notebook kernel.

#[allow(unused_imports)]
use tracing::{debug, error, info, trace, warn};

pub mod client;
pub mod error;
pub mod workspace;

pub use client::{chat::*, embeddings::*, ProxyClient, DEFAULT_BASE_URL};
pub use error::{DlaiProxyError, DlaiProxyResult};
pub use workspace::*;
