//! Transport layer for talking HTTP to the bot API host.
//!
//! This module provides:
//! - Request and response value types ([`HttpRequest`], [`HttpResponse`])
//! - The client seam ([`HttpClient`]) used for dependency injection
//! - Production implementation on top of reqwest ([`ReqwestClient`])
//! - Transport failure taxonomy ([`HttpError`])

mod client;
mod error;
mod request;

#[cfg(test)]
mod request_tests;

pub use client::ReqwestClient;
pub use error::HttpError;
pub use request::{HttpClient, HttpRequest, HttpResponse};
