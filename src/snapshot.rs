// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Shape-check raw fetch output at the boundary and freeze it into an immutable snapshot
// role: model/validation
// inputs: Repository id, raw issue/pull payloads (serde_json::Value), contributions summary text
// outputs: ValidatedSnapshot with read-only accessors; constructible only via validate()
// invariants: Snapshot fields are exactly the validated inputs; no transformation; failures name argument and index
// errors: Error::Contract with the offending argument, expected shape, and element index for sequences
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Shape-checked raw fetch output, immutable once constructed.
///
/// The only way to obtain one is [`validate`]; downstream code can therefore
/// assume every element is a key/value record without re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSnapshot {
  repository: String,
  issues: Vec<Map<String, Value>>,
  pulls: Vec<Map<String, Value>>,
  summary: String,
}

impl ValidatedSnapshot {
  pub fn repository(&self) -> &str {
    &self.repository
  }

  pub fn issues(&self) -> &[Map<String, Value>] {
    &self.issues
  }

  pub fn pulls(&self) -> &[Map<String, Value>] {
    &self.pulls
  }

  pub fn summary(&self) -> &str {
    &self.summary
  }
}

fn json_type(value: &Value) -> &'static str {
  match value {
    Value::Null => "null",
    Value::Bool(_) => "boolean",
    Value::Number(_) => "number",
    Value::String(_) => "string",
    Value::Array(_) => "array",
    Value::Object(_) => "object",
  }
}

fn record_sequence(argument: &'static str, raw: Value) -> Result<Vec<Map<String, Value>>> {
  let items = match raw {
    Value::Array(items) => items,
    other => {
      return Err(Error::Contract {
        argument,
        detail: format!("expected an array of objects, found {}", json_type(&other)),
      })
    }
  };
  let mut records = Vec::with_capacity(items.len());
  for (index, item) in items.into_iter().enumerate() {
    match item {
      Value::Object(map) => records.push(map),
      other => {
        return Err(Error::Contract {
          argument,
          detail: format!(
            "expected an array of objects, found {} at index {}",
            json_type(&other),
            index
          ),
        })
      }
    }
  }
  Ok(records)
}

/// Validate raw fetch output and freeze it.
///
/// Element keys are unconstrained here; per-record field problems surface
/// later as normalization errors, not contract violations.
pub fn validate(repository: &str, issues: Value, pulls: Value, summary: String) -> Result<ValidatedSnapshot> {
  // Guard 1: repository id must be present.
  if repository.trim().is_empty() {
    return Err(Error::Contract {
      argument: "repository",
      detail: "expected a non-empty string".into(),
    });
  }

  // Guard 2+3: both sequences must contain only key/value records.
  let issues = record_sequence("issues", issues)?;
  let pulls = record_sequence("pulls", pulls)?;

  Ok(ValidatedSnapshot {
    repository: repository.to_string(),
    issues,
    pulls,
    summary,
  })
}
