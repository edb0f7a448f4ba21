//! Plain-text rendering of agent state for the terminal.

use daypost_core::{
  post::Post,
  settings::AgentSettings,
  subject::Subject,
  trigger::DailyStatus,
};

const CHECKPOINT_READY: &str =
  "Your post is ready. Review, tweak, and drop it on LinkedIn.";
const CHECKPOINT_PENDING: &str =
  "No draft yet. Run `daypost generate` to ship today's update.";
const NO_DRAFT: &str =
  "No draft generated yet today. Run `daypost generate` to prepare your post.";
const NO_HISTORY: &str = "No history yet.";
const NO_SUBJECT: &str =
  "No active subject. Pick one with `--subject <ID>` or add one with `daypost subjects add`.";

pub fn checkpoint(status: Option<DailyStatus>) -> &'static str {
  match status {
    Some(DailyStatus::Satisfied) => CHECKPOINT_READY,
    Some(DailyStatus::Pending) => CHECKPOINT_PENDING,
    None => NO_SUBJECT,
  }
}

/// A single draft: headline, the generated-at label, body and hashtags.
pub fn post(post: &Post, settings: &AgentSettings) -> String {
  format!(
    "{}\n{}\n\n{}\n\n{}",
    post.headline,
    settings.generated_at_label(),
    post.body,
    post.hashtags.join("  ")
  )
}

/// The "Today" view: checkpoint banner followed by the draft, if any.
pub fn today(
  subject: Option<&Subject>,
  status: Option<DailyStatus>,
  todays: Option<&Post>,
  settings: &AgentSettings,
) -> String {
  let mut out = format!("TODAY'S CHECKPOINT\n{}\n", checkpoint(status));

  let Some(subject) = subject else {
    return out;
  };
  out.push_str(&format!("\n{} · {}\n\n", subject.title(), subject.tone));
  match todays {
    Some(p) => out.push_str(&post(p, settings)),
    None => out.push_str(NO_DRAFT),
  }
  out.push('\n');
  out
}

/// The daily ledger for one subject, one line per post.
pub fn history<'a>(posts: impl IntoIterator<Item = &'a Post>) -> String {
  let out: String = posts
    .into_iter()
    .map(|post| format!("{} · {}\n", post.generated_for, post.headline))
    .collect();
  if out.is_empty() { format!("{NO_HISTORY}\n") } else { out }
}

/// One line per subject, the active one marked with `*`.
pub fn subjects<'a>(
  subjects: impl IntoIterator<Item = &'a Subject>,
  active: Option<&Subject>,
) -> String {
  let active_id = active.map(|s| s.id);
  subjects
    .into_iter()
    .map(|subject| {
      let marker = if Some(subject.id) == active_id { '*' } else { ' ' };
      format!(
        "{marker} {}  {}  [{}]\n",
        subject.id,
        subject.title(),
        subject.tone
      )
    })
    .collect()
}

/// Every field of a subject, for `subjects add` / `subjects edit`.
pub fn subject(subject: &Subject) -> String {
  [
    ("id", subject.id.to_string()),
    ("created", subject.created_at.to_rfc3339()),
    ("topic", subject.title().to_owned()),
    ("tone", subject.tone.to_string()),
    ("audience", subject.audience.clone()),
    ("call to action", subject.call_to_action.clone()),
    ("key takeaway", subject.key_takeaway.clone()),
  ]
  .into_iter()
  .map(|(label, value)| format!("{:<16}{value}\n", format!("{label}:")))
  .collect()
}

pub fn settings(settings: &AgentSettings) -> String {
  let toggle = if settings.auto_generate { "on" } else { "off" };
  format!(
    "auto-generate:  {toggle}\npreferred hour: {:02}:00\n",
    settings.preferred_hour
  )
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;
  use daypost_core::{post::Draft, subject::Tone};
  use uuid::Uuid;

  use super::*;

  fn sample_post(date: NaiveDate, headline: &str) -> Post {
    Post::from_draft(Uuid::new_v4(), date, Draft {
      headline: headline.into(),
      body:     "Body.".into(),
      hashtags: vec!["#a".into(), "#b".into(), "#c".into()],
    })
  }

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  #[test]
  fn post_shows_generated_at_label() {
    let settings = AgentSettings { auto_generate: true, preferred_hour: 6 };
    let text = post(&sample_post(date("2024-03-01"), "Hello"), &settings);
    assert_eq!(
      text,
      "Hello\nAuto-generated at 06:00\n\nBody.\n\n#a  #b  #c"
    );
  }

  #[test]
  fn history_lines_are_date_then_headline() {
    let posts = [
      sample_post(date("2024-03-02"), "Second"),
      sample_post(date("2024-03-01"), "First"),
    ];
    assert_eq!(
      history(&posts),
      "2024-03-02 · Second\n2024-03-01 · First\n"
    );
    assert_eq!(history(&Vec::<Post>::new()), "No history yet.\n");
  }

  #[test]
  fn subjects_marks_active_and_untitled() {
    let mut named = Subject::new();
    named.topic = "Remote teams".into();
    named.tone = Tone::Practical;
    let blank = Subject::new();

    let text = subjects([&named, &blank], Some(&blank));
    let lines: Vec<_> = text.lines().collect();
    assert!(lines[0].starts_with("  "));
    assert!(lines[0].ends_with("Remote teams  [Practical]"));
    assert!(lines[1].starts_with("* "));
    assert!(lines[1].ends_with("Untitled subject  [Thought Leadership]"));
  }

  #[test]
  fn today_without_subject_only_shows_banner() {
    let text = today(None, None, None, &AgentSettings::default());
    assert!(text.contains("No active subject"));
    assert!(!text.contains("No draft generated"));
  }

  #[test]
  fn today_pending_shows_no_draft() {
    let subject = Subject::new();
    let text = today(
      Some(&subject),
      Some(DailyStatus::Pending),
      None,
      &AgentSettings::default(),
    );
    assert!(text.contains(CHECKPOINT_PENDING));
    assert!(text.contains(NO_DRAFT));
    assert!(text.contains("Untitled subject · Thought Leadership"));
  }

  #[test]
  fn subject_fields_are_aligned() {
    let mut s = Subject::new();
    s.audience = "team leads".into();
    let text = subject(&s);
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[2], "topic:          Untitled subject");
    assert_eq!(lines[4], "audience:       team leads");
    assert!(lines[5].starts_with("call to action: "));
  }

  #[test]
  fn today_with_post_ends_in_hashtags() {
    let subject = Subject::new();
    let p = sample_post(date("2024-03-01"), "Hello");
    let text = today(
      Some(&subject),
      Some(DailyStatus::Satisfied),
      Some(&p),
      &AgentSettings::default(),
    );
    assert!(text.starts_with(&format!("TODAY'S CHECKPOINT\n{CHECKPOINT_READY}\n\n")));
    assert!(text.ends_with("Hello\nAuto-generated at 08:00\n\nBody.\n\n#a  #b  #c\n"));
  }

  #[test]
  fn settings_formats_hour() {
    let text = settings(&AgentSettings { auto_generate: false, preferred_hour: 9 });
    assert_eq!(text, "auto-generate:  off\npreferred hour: 09:00\n");
  }
}
