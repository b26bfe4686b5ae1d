//! Small utility helpers used across modules.

/// Very small and safe string templating.
/// Replaces occurrences of `{key}` in the template with provided values.
/// This is intentionally simple (no nested/conditional logic).
pub fn fill_template(tpl: &str, pairs: &[(&str, &str)]) -> String {
  let mut out = tpl.to_string();
  for (k, v) in pairs {
    let needle = format!("{{{}}}", k);
    out = out.replace(&needle, v);
  }
  out
}

/// Normalize an utterance or target word for comparison: trimmed, lower-cased.
pub fn normalize(s: &str) -> String {
  s.trim().to_lowercase()
}

/// Arithmetic mean; 0.0 for an empty slice.
pub fn mean(values: &[f64]) -> f64 {
  if values.is_empty() { 0.0 } else { values.iter().sum::<f64>() / values.len() as f64 }
}

/// Clamp into the percentage range. NaN maps to 0.
pub fn clamp_pct(v: f64) -> f64 {
  if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) }
}

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    s.to_string()
  } else {
    let head: String = s.chars().take(max).collect();
    format!("{}… ({} bytes total)", head, s.len())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn template_replaces_every_key() {
    let out = fill_template("Difficulty with word \"{word}\" ({word})", &[("word", "cat")]);
    assert_eq!(out, "Difficulty with word \"cat\" (cat)");
  }

  #[test]
  fn clamp_pct_handles_nan_and_bounds() {
    assert_eq!(clamp_pct(f64::NAN), 0.0);
    assert_eq!(clamp_pct(-3.0), 0.0);
    assert_eq!(clamp_pct(140.0), 100.0);
    assert_eq!(clamp_pct(42.5), 42.5);
  }

  #[test]
  fn trunc_keeps_short_strings() {
    assert_eq!(trunc_for_log("hello", 10), "hello");
    assert!(trunc_for_log("hello world", 5).starts_with("hello…"));
  }
}
