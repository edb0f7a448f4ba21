//! Session-wide agent settings, persisted under the `settings` key.

use serde::{Deserialize, Deserializer, Serialize};

pub const MIN_PREFERRED_HOUR: u8 = 4;
pub const MAX_PREFERRED_HOUR: u8 = 20;
pub const DEFAULT_PREFERRED_HOUR: u8 = 8;

/// Whether daily posts are generated automatically, and the hour that
/// generation is nominally associated with.
///
/// `preferred_hour` is a label only: it is shown next to drafts but never
/// decides whether or when the auto-trigger fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentSettings {
  pub auto_generate:  bool,
  #[serde(deserialize_with = "deserialize_hour")]
  pub preferred_hour: u8,
}

/// Stored hours outside `[4, 20]` are clamped rather than rejected. Any JSON
/// number is accepted; fractional hours round to the nearest whole hour.
fn deserialize_hour<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
  D: Deserializer<'de>,
{
  let hour = f64::deserialize(deserializer)?;
  // `as` saturates, so huge values still clamp to the top of the range.
  Ok(AgentSettings::clamp_hour(hour.round() as i64))
}

impl Default for AgentSettings {
  fn default() -> Self {
    Self { auto_generate: true, preferred_hour: DEFAULT_PREFERRED_HOUR }
  }
}

impl AgentSettings {
  /// Clamp an arbitrary hour into `[4, 20]`.
  pub fn clamp_hour(hour: i64) -> u8 {
    hour.clamp(MIN_PREFERRED_HOUR.into(), MAX_PREFERRED_HOUR.into()) as u8
  }

  /// Parse user input as an hour. Anything that is not an integer (or is
  /// zero) falls back to the default before clamping.
  pub fn parse_hour(input: &str) -> u8 {
    match input.trim().parse::<i64>() {
      Ok(0) | Err(_) => DEFAULT_PREFERRED_HOUR,
      Ok(hour) => Self::clamp_hour(hour),
    }
  }

  /// Set the hour, clamped into range.
  pub fn set_preferred_hour(&mut self, hour: i64) {
    self.preferred_hour = Self::clamp_hour(hour);
  }

  /// Label shown beneath an auto-generated draft, e.g. `Auto-generated at 08:00`.
  pub fn generated_at_label(&self) -> String {
    format!("Auto-generated at {:02}:00", self.preferred_hour)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn defaults() {
    let settings = AgentSettings::default();
    assert!(settings.auto_generate);
    assert_eq!(settings.preferred_hour, 8);
  }

  #[test]
  fn hours_are_clamped() {
    assert_eq!(AgentSettings::clamp_hour(-3), 4);
    assert_eq!(AgentSettings::clamp_hour(2), 4);
    assert_eq!(AgentSettings::clamp_hour(12), 12);
    assert_eq!(AgentSettings::clamp_hour(23), 20);
  }

  #[test]
  fn unparsable_hour_falls_back() {
    assert_eq!(AgentSettings::parse_hour("soon"), 8);
    assert_eq!(AgentSettings::parse_hour(""), 8);
    assert_eq!(AgentSettings::parse_hour("0"), 8);
    assert_eq!(AgentSettings::parse_hour(" 17 "), 17);
    assert_eq!(AgentSettings::parse_hour("99"), 20);
  }

  #[test]
  fn clamps_out_of_range_documents() {
    let settings: AgentSettings =
      serde_json::from_str(r#"{"autoGenerate":false,"preferredHour":23}"#)
        .unwrap();
    assert!(!settings.auto_generate);
    assert_eq!(settings.preferred_hour, 20);

    let settings: AgentSettings =
      serde_json::from_str(r#"{"autoGenerate":true,"preferredHour":-1}"#)
        .unwrap();
    assert_eq!(settings.preferred_hour, 4);
  }

  #[test]
  fn float_hours_are_rounded_and_clamped() {
    let hour = |json: &str| {
      serde_json::from_str::<AgentSettings>(json).unwrap().preferred_hour
    };
    assert_eq!(hour(r#"{"autoGenerate":true,"preferredHour":8.0}"#), 8);
    assert_eq!(hour(r#"{"autoGenerate":true,"preferredHour":9.6}"#), 10);
    assert_eq!(hour(r#"{"autoGenerate":true,"preferredHour":20.4}"#), 20);
    assert_eq!(hour(r#"{"autoGenerate":true,"preferredHour":-7.5}"#), 4);
    assert_eq!(hour(r#"{"autoGenerate":true,"preferredHour":1e300}"#), 20);
  }

  #[test]
  fn missing_fields_take_defaults() {
    let settings: AgentSettings =
      serde_json::from_str(r#"{"autoGenerate":false}"#).unwrap();
    assert!(!settings.auto_generate);
    assert_eq!(settings.preferred_hour, 8);
  }

  #[test]
  fn label_is_zero_padded() {
    let settings = AgentSettings { auto_generate: true, preferred_hour: 6 };
    assert_eq!(settings.generated_at_label(), "Auto-generated at 06:00");
  }
}
