//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

use std::path::PathBuf;
use std::time::Duration;

/// Default API host.
pub const BASE_URL: &str = "https://prod-nginz-https.wire.com";

/// Default request timeout in seconds.
pub const TIMEOUT_SECS: u64 = 15;

/// Default maximum response body size. `0` means unbounded.
pub const MAX_BODY_BYTES: usize = 0;

/// Environment variable consulted for the bearer token.
pub const TOKEN_ENV: &str = "WIRE_BOT_TOKEN";

/// Directory under the platform config dir that holds the config file.
pub const CONFIG_DIR_NAME: &str = "wire-bot";

/// File name of the config file, both in the config dir and for `init`.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default request timeout as Duration.
#[must_use]
pub const fn timeout() -> Duration {
    Duration::from_secs(TIMEOUT_SECS)
}

/// Location of the implicit config file, e.g. `~/.config/wire-bot/config.toml`.
///
/// Returns `None` on platforms without a config directory.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
