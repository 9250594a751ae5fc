//! wire-bot: client for the Wire bot HTTPS API
//!
//! A library for talking to the Wire bot endpoints: posting encrypted
//! messages, listing the bot's devices, fetching prekeys, and moving
//! assets. Every call carries the bot's bearer token and is bounded by
//! a single timeout.

pub mod api;
pub mod config;
pub mod transport;
