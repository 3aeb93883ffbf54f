use std::env;

use crate::error::{Error, Result};

pub const TOKEN_VAR: &str = "GITHUB_TOKEN";
pub const TOKEN_FALLBACK_VAR: &str = "GH_TOKEN";
pub const BASIC_AUTH_VAR: &str = "GITHUB_BASIC_AUTH";
pub const CI_TOKEN_VAR: &str = "TRAVIS_TOKEN";

/// Process configuration, read once at startup and threaded explicitly to
/// client constructors. Never consulted again after that.
#[derive(Debug, Clone)]
pub struct Config {
  /// Tracker API token (required).
  pub auth_token: String,
  /// Optional `<username>:<token>` pair sent as basic auth instead of the
  /// bearer token when present.
  pub basic_auth: Option<String>,
  /// Optional CI API token; the public CI endpoint answers without one.
  pub ci_token: Option<String>,
  /// Follow tracker result pages transparently.
  pub auto_pagination: bool,
}

fn non_empty(var: &str) -> Option<String> {
  env::var(var).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
  /// Read configuration from the environment. Fails before any client is
  /// constructed when the required token is missing.
  pub fn from_env() -> Result<Self> {
    let auth_token = non_empty(TOKEN_VAR)
      .or_else(|| non_empty(TOKEN_FALLBACK_VAR))
      .ok_or(Error::Config { variable: TOKEN_VAR })?;
    Ok(Config {
      auth_token,
      basic_auth: non_empty(BASIC_AUTH_VAR),
      ci_token: non_empty(CI_TOKEN_VAR),
      auto_pagination: true,
    })
  }

  pub fn with_pagination(mut self, on: bool) -> Self {
    self.auto_pagination = on;
    self
  }
}
