#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

//! Shared request-handling machinery for the mirage gateway
//!
//! Holds the pieces both capability crates (speech, image) are built from:
//! the JSON extractor, the sequential provider waterfall, validation
//! helpers, and the response encoder.

mod http_client;
mod request;
mod respond;
pub mod validate;
mod waterfall;

pub use http_client::http_client;
pub use request::{ErrorBody, ExtractPayload};
pub use respond::{MediaKind, MediaResponse, ResponseMode, SOURCE_HEADER, SOURCE_SYNTHESIZER};
pub use waterfall::{FailureReason, MediaBytes, MediaProvider, ProviderOutcome, Waterfall};
