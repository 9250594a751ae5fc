//! Command execution logic.
//!
//! This module maps each subcommand onto one bot API call and writes the
//! response to the requested sink.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use wire_bot::api::{BotClient, BotError, Payload};
use wire_bot::config::{Command, ValidatedConfig};
use wire_bot::transport::HttpClient;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for command execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The API call failed before a usable response was produced.
    #[error(transparent)]
    Api(#[from] BotError),

    /// Failed to read an input file.
    #[error("Failed to read '{}': {source}", path.display())]
    ReadInput {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON.
    #[error("Invalid JSON in '{}': {source}", path.display())]
    InvalidInput {
        /// Path of the input file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: serde_json::Error,
    },

    /// Failed to write the response.
    #[error("Failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),

    /// The command does not map onto an API call.
    #[error("'{0}' does not call the API")]
    NotAnApiCommand(&'static str),

    /// The server answered with a non-2xx status.
    #[error("Server responded with {0}")]
    Status(http::StatusCode),
}

/// Executes a subcommand against the configured API.
///
/// # Errors
///
/// Returns an error on transport failure, unreadable input, or a non-2xx status.
///
/// Excluded from coverage - talks to the real API host.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, command: &Command) -> Result<(), RunError> {
    let client = BotClient::with_config(&config.token, config.client)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let status = run_command(&client, command, &mut out).await?;
    tracing::info!("Status: {status}");
    check_status(status)
}

/// Runs one command and writes its response body to `out` (or to the
/// requested output file for asset downloads).
///
/// Returns the HTTP status of the response.
pub async fn run_command<H, W>(
    client: &BotClient<H>,
    command: &Command,
    out: &mut W,
) -> Result<http::StatusCode, RunError>
where
    H: HttpClient,
    W: Write,
{
    match command {
        Command::Init { .. } => Err(RunError::NotAnApiCommand("init")),
        Command::SendMessage {
            payload,
            ignore_missing,
        } => {
            let envelope = read_json(payload)?;
            let response = client.send_message(&envelope, *ignore_missing).await?;
            write_json(out, &response.body)?;
            Ok(response.status)
        }
        Command::Clients { payload } => {
            let payload = match payload {
                Some(path) => Payload::Json(read_json(path)?),
                None => Payload::Empty,
            };
            let response = client.get_clients(payload).await?;
            write_json(out, &response.body)?;
            Ok(response.status)
        }
        Command::Prekeys { payload } => {
            let wanted = read_json(payload)?;
            let response = client.get_prekeys(&wanted).await?;
            write_json(out, &response.body)?;
            Ok(response.status)
        }
        Command::GetAsset {
            asset_id,
            asset_token,
            output,
        } => {
            let response = client.get_asset(asset_id, asset_token).await?;
            match output {
                Some(path) if response.is_success() => {
                    std::fs::write(path, &response.body).map_err(RunError::WriteOutput)?;
                    tracing::info!(
                        "Wrote {} bytes to {}",
                        response.body.len(),
                        path.display()
                    );
                }
                _ => out.write_all(&response.body).map_err(RunError::WriteOutput)?,
            }
            Ok(response.status)
        }
        Command::UploadAsset { file } => {
            let data = read_file(file)?;
            let response = client.upload_asset(data).await?;
            write_json(out, &response.body)?;
            Ok(response.status)
        }
    }
}

/// Maps the response status to the command outcome.
fn check_status(status: http::StatusCode) -> Result<(), RunError> {
    if status.is_success() {
        tracing::debug!("Request succeeded with {status}");
        Ok(())
    } else {
        Err(RunError::Status(status))
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>, RunError> {
    std::fs::read(path).map_err(|source| RunError::ReadInput {
        path: path.to_path_buf(),
        source,
    })
}

fn read_json(path: &Path) -> Result<serde_json::Value, RunError> {
    let bytes = read_file(path)?;
    serde_json::from_slice(&bytes).map_err(|source| RunError::InvalidInput {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<W: Write>(out: &mut W, value: &serde_json::Value) -> Result<(), RunError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| RunError::WriteOutput(e.into()))?;
    writeln!(out).map_err(RunError::WriteOutput)
}
