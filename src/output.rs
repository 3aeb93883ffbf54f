use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

/// Serialize a value as pretty JSON with a trailing newline.
pub fn to_pretty_json<T: Serialize>(value: &T) -> Result<String> {
  let mut text = serde_json::to_string_pretty(value)?;
  text.push('\n');
  Ok(text)
}

/// Write a value as pretty JSON: `-` means stdout, anything else is a
/// file path whose parent directories are created as needed.
pub fn write_json<T: Serialize>(value: &T, out: &str) -> Result<()> {
  let text = to_pretty_json(value)?;

  if out == "-" {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(text.as_bytes())?;
    return Ok(());
  }

  let path = Path::new(out);
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent)
        .with_context(|| format!("creating output directory {}", parent.display()))?;
    }
  }
  std::fs::write(path, text).with_context(|| format!("writing report to {}", out))?;

  Ok(())
}
