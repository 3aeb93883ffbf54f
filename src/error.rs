use thiserror::Error;

/// Failures surfaced by the report pipeline.
///
/// Every failure propagates synchronously to the top-level build call;
/// nothing in the core retries, logs, or degrades to a partial report.
#[derive(Debug, Error)]
pub enum Error {
  /// Required process configuration was absent at startup.
  #[error("environment variable {variable} is not set; export it with a token that can read the repository")]
  Config { variable: &'static str },

  /// The caller supplied options the pipeline cannot act on.
  #[error("{message}")]
  Options { message: String },

  /// A boundary shape check rejected raw fetch output.
  #[error("contract violation for `{argument}`: {detail}")]
  Contract { argument: &'static str, detail: String },

  /// A raw record could not be normalized into the common shape.
  #[error("malformed {source} record at index {index}: {detail}")]
  MalformedRecord {
    source: &'static str,
    index: usize,
    detail: String,
  },

  /// A statistic was requested over zero records.
  #[error("cannot compute {statistic} over an empty record set")]
  EmptySet { statistic: &'static str },

  /// An injected client failed to fetch; opaque to this layer.
  #[error("{source} fetch failed: {reason}")]
  Fetch { source: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  /// Convenience for `Options` from anything displayable.
  pub fn options(message: impl Into<String>) -> Self {
    Error::Options { message: message.into() }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn config_error_names_the_variable() {
    let err = Error::Config { variable: "GITHUB_TOKEN" };
    assert!(err.to_string().contains("GITHUB_TOKEN"));
  }

  #[test]
  fn contract_error_names_argument_and_detail() {
    let err = Error::Contract {
      argument: "issues",
      detail: "expected an array of objects, found string at index 3".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("`issues`"));
    assert!(msg.contains("index 3"));
  }

  #[test]
  fn empty_set_error_names_the_statistic() {
    let err = Error::EmptySet { statistic: "average_age" };
    assert!(err.to_string().contains("average_age"));
  }
}
