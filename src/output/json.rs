use anyhow::Result;
use serde::Serialize;

/// Pretty-prints any serializable value (recommendations, history
/// entries, the resolved config) for `--output json`.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
