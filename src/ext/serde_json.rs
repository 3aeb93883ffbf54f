// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Ergonomic nested fetching via dotted paths and safe typed extraction from raw tracker/CI payloads
// role: extension/serde_json
// outputs: JsonFetch trait over Value and Map plus the JsonFetched wrapper for typed extraction with defaults
// invariants: No panics; missing paths yield None; to_or_default returns T::default on failure
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Wrapper around a JSON location to allow typed extraction as a clear
/// second step.
pub struct JsonFetched<'a> {
  inner: Option<&'a Value>,
}

impl<'a> JsonFetched<'a> {
  /// Attempt to deserialize the fetched value as `T`.
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Deserialize as `T`, returning `T::default()` on failure.
  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// The underlying value, when the path resolved.
  pub fn raw(&self) -> Option<&'a Value> {
    self.inner
  }
}

/// Fetch nested values via dotted paths like `"user.login"`.
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

impl JsonFetch for Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}

// Snapshot records are Map<String, Value>, so normalizers fetch on maps
// directly. An empty path has no value to point at here and yields None.
impl JsonFetch for Map<String, Value> {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    let mut keys = path.split('.');
    let first = match keys.next() {
      Some(k) if !k.is_empty() => k,
      _ => return JsonFetched { inner: None },
    };

    let mut cur = match self.get(first) {
      Some(v) => v,
      None => return JsonFetched { inner: None },
    };

    for key in keys {
      match cur.get(key) {
        Some(next) => cur = next,
        None => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
