//! Configuration layer for wire-bot.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - TOML configuration file parsing ([`TomlConfig`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Environment** - `WIRE_BOT_TOKEN` for the token only
//! 3. **TOML config file** - `--config`, or `<config dir>/wire-bot/config.toml` if present
//! 4. **Built-in defaults** - Hardcoded default values
//!
//! The token has no default and must come from one of the first three sources.
//!
//! Headers from the TOML `[api.headers]` table and `--header` flags are merged
//! key by key, CLI winning. They are applied on top of the client's built-in
//! `Authorization` and `Content-Type` headers, so they can replace either.

mod cli;
pub mod defaults;
mod error;
mod toml;
mod validated;

#[cfg(test)]
mod toml_tests;

pub use cli::{Cli, Command};
pub use error::{ConfigError, field};
pub use toml::{ApiSection, TomlConfig, default_config_template};
pub use validated::{ValidatedConfig, write_default_config};
