//! Subcommands and their handlers.
//!
//! Each handler drives the loaded [`Agent`] and writes its output to `out`.

use std::io::Write;

use anyhow::{Context as _, Result, bail};
use clap::{Args, Subcommand};
use daypost_core::{
  agent::Agent,
  post::CalendarDate,
  settings::AgentSettings,
  store::SETTINGS_KEY,
  subject::{SubjectPatch, Tone},
};
use daypost_store_sqlite::SqliteStore;
use uuid::Uuid;

use crate::render;

// ─── Command tree ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Show today's checkpoint and the active subject's draft.
  Today,

  /// Draft a post for the active subject now, replacing any existing one.
  Generate {
    /// Draft tomorrow's post instead of today's.
    #[arg(long)]
    tomorrow: bool,
  },

  /// List the active subject's posts, newest first.
  History {
    /// Show at most this many posts.
    #[arg(short = 'n', long)]
    limit: Option<usize>,
  },

  /// Print a post as paste-ready text (headline, body, hashtags).
  Export {
    /// Date of the post to export (default: today).
    #[arg(long, value_name = "YYYY-MM-DD")]
    date: Option<CalendarDate>,
  },

  /// Manage subjects.
  Subjects {
    #[command(subcommand)]
    command: SubjectsCommand,
  },

  /// Show or change agent settings.
  Settings {
    #[command(subcommand)]
    command: SettingsCommand,
  },
}

#[derive(Subcommand, Debug)]
pub enum SubjectsCommand {
  /// List all subjects; the active one is marked with `*`.
  List,
  /// Create a subject and make it active.
  Add(SubjectFields),
  /// Change fields of an existing subject.
  Edit {
    id: Uuid,
    #[command(flatten)]
    fields: SubjectFields,
  },
  /// Delete a subject. Its posts stay in the ledger.
  Remove { id: Uuid },
}

#[derive(Subcommand, Debug)]
pub enum SettingsCommand {
  Show,
  Set {
    /// Turn daily auto-generation on or off.
    #[arg(long, value_name = "BOOL")]
    auto: Option<bool>,
    /// Preferred hour, clamped to 4..=20. Unparsable input means 8.
    #[arg(long, value_name = "HOUR")]
    hour: Option<String>,
  },
}

#[derive(Args, Debug, Default)]
pub struct SubjectFields {
  #[arg(long)]
  topic:    Option<String>,
  /// Inspiring, Practical, Thought Leadership or Storytelling.
  #[arg(long)]
  tone:     Option<Tone>,
  #[arg(long)]
  audience: Option<String>,
  /// Call to action closing each post.
  #[arg(long)]
  cta:      Option<String>,
  /// Key takeaway each post builds towards.
  #[arg(long)]
  takeaway: Option<String>,
}

impl From<SubjectFields> for SubjectPatch {
  fn from(f: SubjectFields) -> Self {
    Self {
      topic:          f.topic,
      tone:           f.tone,
      audience:       f.audience,
      call_to_action: f.cta,
      key_takeaway:   f.takeaway,
    }
  }
}

// ─── Dispatch ─────────────────────────────────────────────────────────────────

pub async fn run(
  agent: &mut Agent<SqliteStore>,
  store: &SqliteStore,
  command: Command,
  out: &mut impl Write,
) -> Result<()> {
  match command {
    Command::Today => {
      let text = render::today(
        agent.active_subject(),
        agent.checkpoint(),
        agent.todays_post(),
        agent.settings(),
      );
      write!(out, "{text}")?;
    }

    Command::Generate { tomorrow } => {
      let generated = if tomorrow {
        agent.prep_tomorrow().await
      } else {
        agent.generate_now().await
      };
      let post = generated.context("failed to generate post")?;
      writeln!(out, "{}", render::post(&post, agent.settings()))?;
    }

    Command::History { limit } => {
      let history = agent.history();
      let limit = limit.unwrap_or(history.len());
      write!(out, "{}", render::history(history.into_iter().take(limit)))?;
    }

    Command::Export { date } => {
      let date = date.unwrap_or(agent.today());
      let subject = agent
        .active_subject()
        .context("no active subject selected")?;
      let Some(post) = agent.ledger().find_for(subject.id, date) else {
        bail!("no post for {date}; run `daypost generate` first");
      };
      writeln!(out, "{}", post.share_text())?;
    }

    Command::Subjects { command } => subjects(agent, command, out).await?,

    Command::Settings { command } => settings(agent, store, command, out).await?,
  }
  Ok(())
}

async fn subjects(
  agent: &mut Agent<SqliteStore>,
  command: SubjectsCommand,
  out: &mut impl Write,
) -> Result<()> {
  match command {
    SubjectsCommand::List => {
      write!(
        out,
        "{}",
        render::subjects(agent.subjects(), agent.active_subject())
      )?;
    }

    SubjectsCommand::Add(fields) => {
      let subject = agent
        .add_subject(fields.into())
        .await
        .context("failed to add subject")?;
      write!(out, "{}", render::subject(subject))?;
    }

    SubjectsCommand::Edit { id, fields } => {
      let patch = SubjectPatch::from(fields);
      if patch.is_empty() {
        bail!("nothing to change; pass at least one field");
      }
      let subject = agent
        .update_subject(id, patch)
        .await
        .with_context(|| format!("failed to update subject {id}"))?;
      write!(out, "{}", render::subject(subject))?;
    }

    SubjectsCommand::Remove { id } => {
      let removed = agent
        .remove_subject(id)
        .await
        .with_context(|| format!("failed to remove subject {id}"))?;
      writeln!(out, "removed {} ({})", removed.id, removed.title())?;
    }
  }
  Ok(())
}

async fn settings(
  agent: &mut Agent<SqliteStore>,
  store: &SqliteStore,
  command: SettingsCommand,
  out: &mut impl Write,
) -> Result<()> {
  match command {
    SettingsCommand::Show => {}

    SettingsCommand::Set { auto: None, hour: None } => {
      bail!("nothing to change; pass --auto and/or --hour");
    }

    SettingsCommand::Set { auto, hour } => {
      if let Some(hour) = hour {
        let hour = AgentSettings::parse_hour(&hour);
        agent
          .set_preferred_hour(hour.into())
          .await
          .context("failed to save preferred hour")?;
      }
      if let Some(enabled) = auto {
        agent
          .set_auto_generate(enabled)
          .await
          .context("failed to save auto-generate")?;
      }
    }
  }

  write!(out, "{}", render::settings(agent.settings()))?;
  if let Some(at) = store
    .updated_at(SETTINGS_KEY)
    .await
    .context("failed to read settings timestamp")?
  {
    writeln!(out, "last saved:     {}", at.to_rfc3339())?;
  }
  Ok(())
}
