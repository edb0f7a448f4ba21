//! Subjects: the recurring topics a user wants daily posts about.
//!
//! A subject is the only user-editable input to the generator. The registry
//! keeps subjects in display order: newest-created first.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};
use uuid::Uuid;

use crate::Error;

// ─── Tone ────────────────────────────────────────────────────────────────────

/// The writing voice a subject's posts are drafted in.
///
/// The set is closed; parsing any other value yields [`Error::InvalidTone`].
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumIter,
  IntoStaticStr,
)]
#[serde(try_from = "String")]
pub enum Tone {
  #[serde(rename = "Inspiring")]
  #[strum(serialize = "Inspiring")]
  Inspiring,
  #[serde(rename = "Practical")]
  #[strum(serialize = "Practical")]
  Practical,
  #[default]
  #[serde(rename = "Thought Leadership")]
  #[strum(serialize = "Thought Leadership")]
  ThoughtLeadership,
  #[serde(rename = "Storytelling")]
  #[strum(serialize = "Storytelling")]
  Storytelling,
}

impl Tone {
  /// The display label, identical to the persisted representation.
  pub fn label(self) -> &'static str { self.into() }
}

/// Accepts the display label in any case, with or without separators, so
/// `"Thought Leadership"`, `"thought-leadership"` and `"thoughtleadership"`
/// all parse.
impl FromStr for Tone {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = squash(s);
    Tone::iter()
      .find(|tone| squash(tone.label()) == wanted)
      .ok_or_else(|| Error::InvalidTone(s.to_owned()))
  }
}

impl TryFrom<String> for Tone {
  type Error = Error;

  fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

fn squash(s: &str) -> String {
  s.chars()
    .filter(|c| c.is_alphanumeric())
    .flat_map(char::to_lowercase)
    .collect()
}

// ─── Subject ─────────────────────────────────────────────────────────────────

pub const DEFAULT_CALL_TO_ACTION: &str =
  "I'd love to trade notes—drop your perspective below";
pub const DEFAULT_KEY_TAKEAWAY: &str =
  "Clarity beats complexity when momentum matters";

/// Shown wherever a subject has no topic yet.
pub const UNTITLED: &str = "Untitled subject";

/// A topic the user wants recurring posts about. `id` and `created_at` never
/// change after creation; every other field is user-editable and may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
  pub id:             Uuid,
  pub created_at:     DateTime<Utc>,
  pub topic:          String,
  pub tone:           Tone,
  pub audience:       String,
  pub call_to_action: String,
  pub key_takeaway:   String,
}

impl Subject {
  /// A fresh subject with the starter call to action and takeaway filled in.
  pub fn new() -> Self {
    Self {
      id:             Uuid::new_v4(),
      created_at:     Utc::now(),
      topic:          String::new(),
      tone:           Tone::default(),
      audience:       String::new(),
      call_to_action: DEFAULT_CALL_TO_ACTION.to_owned(),
      key_takeaway:   DEFAULT_KEY_TAKEAWAY.to_owned(),
    }
  }

  /// The topic, or [`UNTITLED`] when it is blank.
  pub fn title(&self) -> &str {
    let topic = self.topic.trim();
    if topic.is_empty() { UNTITLED } else { topic }
  }
}

impl Default for Subject {
  fn default() -> Self { Self::new() }
}

// ─── SubjectPatch ────────────────────────────────────────────────────────────

/// A partial update to a subject. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectPatch {
  pub topic:          Option<String>,
  pub tone:           Option<Tone>,
  pub audience:       Option<String>,
  pub call_to_action: Option<String>,
  pub key_takeaway:   Option<String>,
}

impl SubjectPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  pub fn apply(self, subject: &mut Subject) {
    if let Some(topic) = self.topic {
      subject.topic = topic;
    }
    if let Some(tone) = self.tone {
      subject.tone = tone;
    }
    if let Some(audience) = self.audience {
      subject.audience = audience;
    }
    if let Some(cta) = self.call_to_action {
      subject.call_to_action = cta;
    }
    if let Some(takeaway) = self.key_takeaway {
      subject.key_takeaway = takeaway;
    }
  }
}

// ─── SubjectRegistry ─────────────────────────────────────────────────────────

/// The ordered collection of subjects, persisted whole under the `subjects`
/// key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectRegistry {
  subjects: Vec<Subject>,
}

impl SubjectRegistry {
  pub fn new(subjects: Vec<Subject>) -> Self { Self { subjects } }

  pub fn is_empty(&self) -> bool { self.subjects.is_empty() }

  pub fn len(&self) -> usize { self.subjects.len() }

  pub fn iter(&self) -> std::slice::Iter<'_, Subject> { self.subjects.iter() }

  pub fn first(&self) -> Option<&Subject> { self.subjects.first() }

  pub fn get(&self, id: Uuid) -> Option<&Subject> {
    self.subjects.iter().find(|s| s.id == id)
  }

  /// Insert `subject` at the front of the registry.
  pub fn add(&mut self, subject: Subject) -> &Subject {
    self.subjects.insert(0, subject);
    &self.subjects[0]
  }

  /// Apply `patch` to the subject with `id` in place.
  pub fn update(&mut self, id: Uuid, patch: SubjectPatch) -> Option<&Subject> {
    let subject = self.subjects.iter_mut().find(|s| s.id == id)?;
    patch.apply(subject);
    Some(subject)
  }

  /// Remove and return the subject with `id`. Its posts are left alone.
  pub fn remove(&mut self, id: Uuid) -> Option<Subject> {
    let index = self.subjects.iter().position(|s| s.id == id)?;
    Some(self.subjects.remove(index))
  }
}

impl<'a> IntoIterator for &'a SubjectRegistry {
  type Item = &'a Subject;
  type IntoIter = std::slice::Iter<'a, Subject>;

  fn into_iter(self) -> Self::IntoIter { self.subjects.iter() }
}
