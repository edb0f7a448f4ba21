//! Posts: one generated draft per subject per calendar date.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A calendar date in `YYYY-MM-DD` form; the ledger's key dimension.
pub type CalendarDate = NaiveDate;

/// The current calendar date in UTC.
pub fn today_utc() -> CalendarDate { Utc::now().date_naive() }

/// The generator's output before it is given an identity and a ledger slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Draft {
  pub headline: String,
  pub body:     String,
  pub hashtags: Vec<String>,
}

/// A generated draft stored in the ledger. Never mutated after creation;
/// regenerating for the same `(subject_id, generated_for)` produces a new
/// post that evicts this one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
  pub id:            Uuid,
  /// Non-owning; the subject may since have been removed.
  pub subject_id:    Uuid,
  pub generated_for: CalendarDate,
  pub headline:      String,
  pub body:          String,
  pub hashtags:      Vec<String>,
}

impl Post {
  /// Give `draft` a fresh id and bind it to `(subject_id, date)`.
  pub fn from_draft(subject_id: Uuid, date: CalendarDate, draft: Draft) -> Self {
    Self {
      id: Uuid::new_v4(),
      subject_id,
      generated_for: date,
      headline: draft.headline,
      body: draft.body,
      hashtags: draft.hashtags,
    }
  }

  /// Whether this post occupies the `(subject_id, date)` slot.
  pub fn is_for(&self, subject_id: Uuid, date: CalendarDate) -> bool {
    self.subject_id == subject_id && self.generated_for == date
  }

  /// The text a user pastes into LinkedIn: headline, body and hashtags
  /// separated by blank lines.
  pub fn share_text(&self) -> String {
    format!(
      "{}\n\n{}\n\n{}",
      self.headline,
      self.body,
      self.hashtags.join(" ")
    )
  }
}
