//! Bot API layer: one request primitive and the endpoint presets built on it.
//!
//! This module provides:
//! - The client and its connection settings ([`BotClient`], [`ClientConfig`])
//! - Request bodies and decoded responses ([`Payload`], [`ApiResponse`])
//! - The callback-surface reply and its one-shot latch ([`Reply`], [`Completion`])
//! - Error taxonomy for API calls ([`BotError`])

mod client;
mod completion;
mod error;
mod payload;


pub use client::{ASSET_TOKEN, BotClient, ClientConfig, MULTIPART_CONTENT_TYPE, paths};
pub use completion::Completion;
pub use error::BotError;
pub use payload::{ApiResponse, Payload, Reply};
