//! `rubric` — command-line access to the LMS outcomes API.
//!
//! # Usage
//!
//! ```text
//! rubric --url https://lms.example.com --token $TOKEN group --course 12 root
//! rubric --config ~/.config/rubric.toml outcome show 42
//! ```
//!
//! Settings are layered: built-in defaults, then the TOML file given with
//! `--config`, then `RUBRIC_*` environment variables (`RUBRIC_BASE_URL`,
//! `RUBRIC_ACCESS_TOKEN`, `RUBRIC_TIMEOUT_SECS`), then command-line flags.

mod args;
mod commands;

use anyhow::{Context as _, Result};
use args::Cli;
use clap::Parser;
use rubric_core::OutcomesClient;
use rubric_http::{HttpConfig, HttpRequester};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> Result<()> {
  // Logs go to stderr so stdout stays valid JSON.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();
  let http_config = load_config(&cli)?;
  tracing::debug!(base_url = %http_config.base_url, "configuration loaded");

  let requester = HttpRequester::new(http_config).context("failed to build HTTP client")?;
  let client = OutcomesClient::new(requester);

  let output = commands::run(&client, cli.command).await?;
  println!("{}", serde_json::to_string_pretty(&output)?);
  Ok(())
}

/// Merge defaults, config file, environment and flags, in rising precedence.
fn load_config(cli: &Cli) -> Result<HttpConfig> {
  let mut builder = config::Config::builder().set_default("base_url", DEFAULT_BASE_URL)?;

  if let Some(path) = &cli.config {
    builder = builder.add_source(config::File::from(path.as_path()).required(true));
  }

  let settings = builder
    .add_source(config::Environment::with_prefix("RUBRIC").try_parsing(true))
    .set_override_option("base_url", cli.url.clone())?
    .set_override_option("access_token", cli.token.clone())?
    .build()
    .context("failed to read configuration")?;

  settings
    .try_deserialize()
    .context("failed to deserialise configuration")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn flags_override_defaults() {
    let cli = Cli::try_parse_from([
      "rubric",
      "--url",
      "https://lms.example.com",
      "--token",
      "abc",
      "outcome",
      "show",
      "1",
    ])
    .unwrap();
    let config = load_config(&cli).unwrap();
    assert_eq!(config.base_url, "https://lms.example.com");
    assert_eq!(config.access_token, "abc");
    assert_eq!(config.timeout_secs, 30);
  }

  #[test]
  fn missing_config_file_is_an_error() {
    let cli = Cli::try_parse_from([
      "rubric",
      "--config",
      "/nonexistent/rubric.toml",
      "group",
      "root",
    ])
    .unwrap();
    assert!(load_config(&cli).is_err());
  }
}
