//! [`Agent`], the event-driven session that ties the pieces together.
//!
//! Every user action is a method. Each one mutates exactly one piece of
//! state (subjects, ledger or settings), writes that document back to the
//! store, and then re-runs the auto-trigger rule. Nothing is persisted
//! partially, and no write is issued before the previous one has completed.

use std::sync::Arc;

use chrono::Days;
use uuid::Uuid;

use crate::{
  Error,
  Result,
  generator::generate,
  ledger::Ledger,
  post::{CalendarDate, Post, today_utc},
  settings::AgentSettings,
  store::{DocumentStore, Repositories},
  subject::{Subject, SubjectPatch, SubjectRegistry},
  trigger::{self, DailyStatus, Decision, TriggerInputs},
};

/// A loaded agent session.
///
/// `today` is fixed when the session is loaded; "Prep tomorrow" targets the
/// day after it.
pub struct Agent<S> {
  repos:    Repositories<S>,
  subjects: SubjectRegistry,
  ledger:   Ledger,
  settings: AgentSettings,
  active:   Option<Uuid>,
  today:    CalendarDate,
  loaded:   bool,
}

impl<S: DocumentStore> Agent<S> {
  /// Load a session for the current UTC date.
  pub async fn open(store: Arc<S>) -> Result<Self> {
    Self::load(store, today_utc()).await
  }

  /// Load the three documents from `store`, seeding defaults for any that are
  /// absent, then evaluate the auto-trigger once.
  ///
  /// The first subject becomes active. Defaults that had to be seeded are
  /// written back immediately.
  pub async fn load(store: Arc<S>, today: CalendarDate) -> Result<Self> {
    let repos = Repositories::new(store);

    let stored_subjects = repos.subjects.load().await?;
    let ledger = repos.posts.load().await?.unwrap_or_default();
    let stored_settings = repos.settings.load().await?;

    let seed_subjects = stored_subjects
      .as_ref()
      .is_none_or(SubjectRegistry::is_empty);
    let seed_settings = stored_settings.is_none();

    let subjects = match stored_subjects {
      Some(subjects) if !subjects.is_empty() => subjects,
      _ => SubjectRegistry::new(vec![Subject::new()]),
    };

    let mut agent = Self {
      active: subjects.first().map(|s| s.id),
      repos,
      subjects,
      ledger,
      settings: stored_settings.unwrap_or_default(),
      today,
      loaded: false,
    };

    tracing::debug!(
      subjects = agent.subjects.len(),
      posts = agent.ledger.len(),
      %today,
      "loaded agent state"
    );

    if seed_subjects {
      agent.repos.subjects.save(&agent.subjects).await?;
    }
    if seed_settings {
      agent.repos.settings.save(&agent.settings).await?;
    }

    agent.loaded = true;
    agent.run_auto_trigger().await?;
    Ok(agent)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  pub fn today(&self) -> CalendarDate { self.today }

  pub fn subjects(&self) -> &SubjectRegistry { &self.subjects }

  pub fn ledger(&self) -> &Ledger { &self.ledger }

  pub fn settings(&self) -> &AgentSettings { &self.settings }

  pub fn active_subject(&self) -> Option<&Subject> {
    self.active.and_then(|id| self.subjects.get(id))
  }

  /// The active subject's post for today, if one exists.
  pub fn todays_post(&self) -> Option<&Post> {
    let subject = self.active_subject()?;
    self.ledger.find_for(subject.id, self.today)
  }

  /// The active subject's posts, newest date first.
  pub fn history(&self) -> Vec<&Post> {
    match self.active_subject() {
      Some(subject) => self.ledger.query(subject.id),
      None => Vec::new(),
    }
  }

  /// Today's status for the active subject; `None` without one.
  pub fn checkpoint(&self) -> Option<DailyStatus> {
    let subject = self.active_subject()?;
    Some(trigger::daily_status(&self.ledger, subject, self.today))
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  /// Make `id` the active subject.
  pub async fn select_subject(&mut self, id: Uuid) -> Result<&Subject> {
    if self.subjects.get(id).is_none() {
      return Err(Error::SubjectNotFound(id));
    }
    self.active = Some(id);
    self.run_auto_trigger().await?;
    self.subject(id)
  }

  /// Create a subject from the starter template plus `patch`, put it first
  /// and make it active.
  pub async fn add_subject(&mut self, patch: SubjectPatch) -> Result<&Subject> {
    let mut subject = Subject::new();
    patch.apply(&mut subject);
    let id = subject.id;

    self.subjects.add(subject);
    self.active = Some(id);
    self.repos.subjects.save(&self.subjects).await?;
    tracing::info!(subject_id = %id, "added subject");

    self.run_auto_trigger().await?;
    self.subject(id)
  }

  /// Apply a partial update to a subject. Existing posts are not regenerated.
  pub async fn update_subject(
    &mut self,
    id: Uuid,
    patch: SubjectPatch,
  ) -> Result<&Subject> {
    if self.subjects.update(id, patch).is_none() {
      return Err(Error::SubjectNotFound(id));
    }
    self.repos.subjects.save(&self.subjects).await?;
    self.run_auto_trigger().await?;
    self.subject(id)
  }

  /// Remove a subject. Its posts stay in the ledger with a dangling
  /// `subject_id`; if it was active, no subject is active afterwards.
  pub async fn remove_subject(&mut self, id: Uuid) -> Result<Subject> {
    let removed = self
      .subjects
      .remove(id)
      .ok_or(Error::SubjectNotFound(id))?;
    if self.active == Some(id) {
      self.active = None;
    }
    self.repos.subjects.save(&self.subjects).await?;
    tracing::info!(subject_id = %id, "removed subject");
    Ok(removed)
  }

  // ── Settings ──────────────────────────────────────────────────────────────

  pub async fn set_auto_generate(&mut self, enabled: bool) -> Result<()> {
    self.settings.auto_generate = enabled;
    self.repos.settings.save(&self.settings).await?;
    self.run_auto_trigger().await?;
    Ok(())
  }

  /// Store a new preferred hour, clamped into `[4, 20]`. Returns the stored
  /// value.
  pub async fn set_preferred_hour(&mut self, hour: i64) -> Result<u8> {
    self.settings.set_preferred_hour(hour);
    self.repos.settings.save(&self.settings).await?;
    Ok(self.settings.preferred_hour)
  }

  // ── Generation ────────────────────────────────────────────────────────────

  /// "Generate now": draft today's post for the active subject, replacing any
  /// existing one.
  pub async fn generate_now(&mut self) -> Result<Post> {
    let subject_id = self.active.ok_or(Error::NoActiveSubject)?;
    self.generate_for(subject_id, self.today).await
  }

  /// "Prep tomorrow": draft the active subject's post for the day after
  /// `today`, replacing any existing one.
  pub async fn prep_tomorrow(&mut self) -> Result<Post> {
    let subject_id = self.active.ok_or(Error::NoActiveSubject)?;
    let tomorrow = self
      .today
      .checked_add_days(Days::new(1))
      .ok_or(Error::DateOutOfRange(self.today))?;
    self.generate_for(subject_id, tomorrow).await
  }

  /// Draft and record a post for any subject and date, bypassing the
  /// auto-trigger.
  pub async fn generate_for(
    &mut self,
    subject_id: Uuid,
    date: CalendarDate,
  ) -> Result<Post> {
    let post = self.record(subject_id, date).await?;
    self.run_auto_trigger().await?;
    Ok(post)
  }

  /// Evaluate the auto-trigger and, if it fires, record today's post for the
  /// active subject.
  pub async fn run_auto_trigger(&mut self) -> Result<Option<Post>> {
    let decision = trigger::evaluate(TriggerInputs {
      loaded:   self.loaded,
      active:   self.active_subject(),
      settings: &self.settings,
      ledger:   &self.ledger,
      today:    self.today,
    });

    match decision {
      Decision::Fire => {
        let Some(subject_id) = self.active else {
          return Ok(None);
        };
        tracing::info!(%subject_id, date = %self.today, "auto-generating post");
        self.record(subject_id, self.today).await.map(Some)
      }
      Decision::Skip(reason) => {
        tracing::debug!(?reason, "auto-trigger skipped");
        Ok(None)
      }
    }
  }

  // ── Internals ─────────────────────────────────────────────────────────────

  fn subject(&self, id: Uuid) -> Result<&Subject> {
    self.subjects.get(id).ok_or(Error::SubjectNotFound(id))
  }

  /// Generate, upsert and persist. Never consults the trigger.
  async fn record(&mut self, subject_id: Uuid, date: CalendarDate) -> Result<Post> {
    let subject = self.subject(subject_id)?;
    let post = Post::from_draft(subject_id, date, generate(subject, date));

    let replaced = self.ledger.upsert(post.clone()).is_some();
    tracing::info!(
      %subject_id,
      %date,
      post_id = %post.id,
      replaced,
      "generated post"
    );

    self.repos.posts.save(&self.ledger).await?;
    Ok(post)
  }
}
