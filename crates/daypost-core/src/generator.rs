//! The post generator.
//!
//! [`generate`] is a pure function of a subject and a calendar date. Every
//! tone has its own voice; the date only rotates between that voice's
//! phrasings and fills in the weekday, so the same inputs always produce the
//! same draft.
//!
//! Blank fields never produce blank output: a missing topic becomes
//! [`TOPIC_PLACEHOLDER`], and missing audience, takeaway or call to action
//! fall back to tone-neutral copy.

use chrono::{Datelike, NaiveDate};

use crate::{
  post::Draft,
  subject::{Subject, Tone},
};

pub const TOPIC_PLACEHOLDER: &str = "your focus area";
pub const FALLBACK_CALL_TO_ACTION: &str =
  "What would you add? Share your take in the comments.";

pub const MIN_HASHTAGS: usize = 3;
pub const MAX_HASHTAGS: usize = 6;

/// Words too common to be worth a hashtag.
const STOPWORDS: &[&str] = &[
  "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "how", "in",
  "into", "is", "it", "of", "on", "or", "our", "the", "their", "this", "to",
  "what", "who", "why", "with", "you", "your",
];

/// Draft a post for `subject` on `date`.
pub fn generate(subject: &Subject, date: NaiveDate) -> Draft {
  let fields = Fields::from_subject(subject);
  let day = Day::new(date);

  let headline = headline(subject.tone, &fields.headline_topic, &day);

  let paragraphs = [
    opener(subject.tone, fields.topic, &day),
    audience_paragraph(subject.tone, fields.audience),
    takeaway_paragraph(subject.tone, fields.key_takeaway),
    fields
      .call_to_action
      .map(sentence)
      .unwrap_or_else(|| FALLBACK_CALL_TO_ACTION.to_owned()),
  ];

  let hashtags = hashtags(
    subject.tone,
    fields.has_topic.then_some(fields.topic),
    fields.audience,
  );

  Draft { headline, body: paragraphs.join("\n\n"), hashtags }
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Subject fields as they go into the draft.
///
/// The body quotes every non-blank field exactly as typed. Only the headline
/// gets a tidied copy of the topic, since it has to fit on one line.
struct Fields<'a> {
  headline_topic: String,
  topic:          &'a str,
  has_topic:      bool,
  audience:       Option<&'a str>,
  call_to_action: Option<&'a str>,
  key_takeaway:   Option<&'a str>,
}

impl<'a> Fields<'a> {
  fn from_subject(subject: &'a Subject) -> Self {
    let topic = non_blank(&subject.topic);
    Self {
      headline_topic: tidy(&subject.topic)
        .unwrap_or_else(|| TOPIC_PLACEHOLDER.to_owned()),
      topic:          topic.unwrap_or(TOPIC_PLACEHOLDER),
      has_topic:      topic.is_some(),
      audience:       non_blank(&subject.audience),
      call_to_action: non_blank(&subject.call_to_action),
      key_takeaway:   non_blank(&subject.key_takeaway),
    }
  }
}

/// `None` for empty or whitespace-only text, otherwise the text untouched.
fn non_blank(text: &str) -> Option<&str> {
  (!text.trim().is_empty()).then_some(text)
}

/// Collapse runs of whitespace (including newlines) to single spaces.
fn tidy(text: &str) -> Option<String> {
  let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
  (!joined.is_empty()).then_some(joined)
}

/// Terminate `text` with a full stop unless it already ends in punctuation
/// or whitespace.
fn sentence(text: &str) -> String {
  match text.chars().last() {
    Some('.' | '!' | '?' | '…') => text.to_owned(),
    Some(c) if c.is_whitespace() => text.to_owned(),
    _ => format!("{text}."),
  }
}

struct Day {
  weekday: String,
  /// Zero-based day of the year; drives phrasing rotation.
  ordinal: usize,
}

impl Day {
  fn new(date: NaiveDate) -> Self {
    Self {
      weekday: date.format("%A").to_string(),
      ordinal: date.ordinal0() as usize,
    }
  }

  fn headline_variant(&self) -> usize { self.ordinal % 2 }

  fn opener_variant(&self) -> usize { (self.ordinal / 2) % 2 }
}

// ─── Voices ──────────────────────────────────────────────────────────────────

fn headline(tone: Tone, topic: &str, day: &Day) -> String {
  let weekday = &day.weekday;
  match (tone, day.headline_variant()) {
    (Tone::Inspiring, 0) => {
      format!("Why {topic} is worth showing up for today")
    }
    (Tone::Inspiring, _) => {
      format!("{weekday} reminder: {topic} rewards the ones who keep going")
    }
    (Tone::Practical, 0) => format!("A no-fluff playbook for {topic}"),
    (Tone::Practical, _) => {
      format!("3 moves to make {topic} work this {weekday}")
    }
    (Tone::ThoughtLeadership, 0) => {
      format!("The conversation about {topic} is missing something")
    }
    (Tone::ThoughtLeadership, _) => {
      format!("Where {topic} is heading next, and why it matters")
    }
    (Tone::Storytelling, 0) => {
      format!("What {topic} taught me when I least expected it")
    }
    (Tone::Storytelling, _) => format!("A {weekday} story about {topic}"),
  }
}

fn opener(tone: Tone, topic: &str, day: &Day) -> String {
  let weekday = &day.weekday;
  match (tone, day.opener_variant()) {
    (Tone::Inspiring, 0) => format!(
      "Every meaningful shift in {topic} starts with one quiet decision: keep going."
    ),
    (Tone::Inspiring, _) => format!(
      "Some days {topic} feels like an uphill climb. Those are the days that count."
    ),
    (Tone::Practical, 0) => format!(
      "When it comes to {topic}, theory is cheap. Here is a plan you can run this {weekday}."
    ),
    (Tone::Practical, _) => format!(
      "Let's get specific about {topic}. No frameworks, just the steps that work."
    ),
    (Tone::ThoughtLeadership, 0) => format!(
      "Most of the talk about {topic} focuses on tools. The real shift is in how we think."
    ),
    (Tone::ThoughtLeadership, _) => format!(
      "{weekday} thought: we are still asking the wrong questions about {topic}."
    ),
    (Tone::Storytelling, 0) => format!(
      "A while back I was stuck on {topic}. Nothing I tried was landing."
    ),
    (Tone::Storytelling, _) => format!(
      "This {weekday} I was reminded of the first time {topic} really clicked for me."
    ),
  }
}

fn audience_paragraph(tone: Tone, audience: Option<&str>) -> String {
  match tone {
    Tone::Inspiring => match audience {
      Some(audience) => format!(
        "To the {audience} pushing this forward: your effort is compounding, even when it doesn't show yet."
      ),
      None => "To everyone pushing this forward: your effort is compounding, even when it doesn't show yet."
        .to_owned(),
    },
    Tone::Practical => {
      let who = audience.unwrap_or("your team");
      format!(
        "1. Name the one outcome that matters most for {who}.\n\
         2. Cut anything that doesn't move it.\n\
         3. Review what changed at the end of the week."
      )
    }
    Tone::ThoughtLeadership => match audience {
      Some(audience) => format!(
        "For {audience}, this changes the job. The advantage goes to those who see the pattern early."
      ),
      None => "For anyone paying attention, this changes the job. The advantage goes to those who see the pattern early."
        .to_owned(),
    },
    Tone::Storytelling => match audience {
      Some(audience) => format!(
        "Then a conversation with a group of {audience} changed how I saw the whole thing."
      ),
      None => "Then a single conversation changed how I saw the whole thing."
        .to_owned(),
    },
  }
}

fn takeaway_paragraph(tone: Tone, takeaway: Option<&str>) -> String {
  let (lead, fallback) = match tone {
    Tone::Inspiring => (
      "Here's what I keep coming back to:",
      "progress is built in the moments nobody sees.",
    ),
    Tone::Practical => ("The rule of thumb:", "small, repeatable wins beat big plans."),
    Tone::ThoughtLeadership => (
      "My view:",
      "the teams that win are the ones that rethink the defaults.",
    ),
    Tone::Storytelling => (
      "The lesson I took away:",
      "the answer was simpler than I had made it.",
    ),
  };
  match takeaway {
    Some(takeaway) => format!("{lead} {}", sentence(takeaway)),
    None => format!("{lead} {fallback}"),
  }
}

// ─── Hashtags ────────────────────────────────────────────────────────────────

/// Tags that round out every post in a given voice.
fn tone_tags(tone: Tone) -> [&'static str; 3] {
  match tone {
    Tone::Inspiring => ["inspiration", "growthmindset", "leadership"],
    Tone::Practical => ["productivity", "howto", "careeradvice"],
    Tone::ThoughtLeadership => ["thoughtleadership", "futureofwork", "strategy"],
    Tone::Storytelling => ["storytelling", "lessonslearned", "careerjourney"],
  }
}

/// Distinct lowercased, alphanumeric-only words of `text`, minus stopwords.
fn keywords(text: &str) -> Vec<String> {
  let mut words: Vec<String> = Vec::new();
  for word in text.split_whitespace() {
    let word: String = word
      .chars()
      .filter(|c| c.is_alphanumeric())
      .flat_map(char::to_lowercase)
      .collect();
    if word.chars().count() >= 2
      && !STOPWORDS.contains(&word.as_str())
      && !words.contains(&word)
    {
      words.push(word);
    }
  }
  words
}

fn push_tag(tags: &mut Vec<String>, word: &str) {
  if word.is_empty() || tags.len() >= MAX_HASHTAGS {
    return;
  }
  let tag = format!("#{word}");
  if !tags.contains(&tag) {
    tags.push(tag);
  }
}

/// Topic words first (with the whole topic as one tag when it is short),
/// then audience words, then the tone's own tags. Always 3 to 6 distinct tags.
fn hashtags(tone: Tone, topic: Option<&str>, audience: Option<&str>) -> Vec<String> {
  let mut tags = Vec::with_capacity(MAX_HASHTAGS);

  if let Some(topic) = topic {
    let words = keywords(topic);
    if (2..=3).contains(&words.len()) {
      push_tag(&mut tags, &words.concat());
    }
    for word in &words {
      push_tag(&mut tags, word);
    }
  }
  if let Some(audience) = audience {
    for word in keywords(audience) {
      push_tag(&mut tags, &word);
    }
  }
  for word in tone_tags(tone) {
    push_tag(&mut tags, word);
  }

  tags
}
