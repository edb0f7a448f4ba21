//! The auto-trigger rule: should today's post be generated automatically?
//!
//! For the active subject and the current date the day is either
//! [`DailyStatus::Pending`] (no post yet) or [`DailyStatus::Satisfied`]. The
//! rule fires only for a pending day, so re-evaluating after it has fired is a
//! no-op. `preferred_hour` is never consulted.

use crate::{
  ledger::Ledger,
  post::CalendarDate,
  settings::AgentSettings,
  subject::Subject,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DailyStatus {
  Pending,
  Satisfied,
}

/// Whether `subject` already has a post for `date`.
pub fn daily_status(
  ledger: &Ledger,
  subject: &Subject,
  date: CalendarDate,
) -> DailyStatus {
  match ledger.find_for(subject.id, date) {
    Some(_) => DailyStatus::Satisfied,
    None => DailyStatus::Pending,
  }
}

/// Why the rule declined to fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
  NotLoaded,
  NoActiveSubject,
  AutoGenerateOff,
  AlreadySatisfied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
  Fire,
  Skip(Skip),
}

/// Everything the rule looks at.
#[derive(Debug, Clone, Copy)]
pub struct TriggerInputs<'a> {
  pub loaded:   bool,
  pub active:   Option<&'a Subject>,
  pub settings: &'a AgentSettings,
  pub ledger:   &'a Ledger,
  pub today:    CalendarDate,
}

/// Evaluate the rule. Conditions are checked in order, and the first one that
/// fails is reported.
pub fn evaluate(inputs: TriggerInputs<'_>) -> Decision {
  if !inputs.loaded {
    return Decision::Skip(Skip::NotLoaded);
  }
  let Some(subject) = inputs.active else {
    return Decision::Skip(Skip::NoActiveSubject);
  };
  if !inputs.settings.auto_generate {
    return Decision::Skip(Skip::AutoGenerateOff);
  }
  match daily_status(inputs.ledger, subject, inputs.today) {
    DailyStatus::Pending => Decision::Fire,
    DailyStatus::Satisfied => Decision::Skip(Skip::AlreadySatisfied),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{generator::generate, post::Post};

  fn today() -> CalendarDate { "2024-03-01".parse().unwrap() }

  fn inputs<'a>(
    active: Option<&'a Subject>,
    settings: &'a AgentSettings,
    ledger: &'a Ledger,
  ) -> TriggerInputs<'a> {
    TriggerInputs { loaded: true, active, settings, ledger, today: today() }
  }

  #[test]
  fn fires_for_pending_day() {
    let subject = Subject::new();
    let settings = AgentSettings::default();
    let ledger = Ledger::default();
    assert_eq!(
      evaluate(inputs(Some(&subject), &settings, &ledger)),
      Decision::Fire
    );
  }

  #[test]
  fn waits_until_loaded() {
    let subject = Subject::new();
    let settings = AgentSettings::default();
    let ledger = Ledger::default();
    let decision = evaluate(TriggerInputs {
      loaded: false,
      ..inputs(Some(&subject), &settings, &ledger)
    });
    assert_eq!(decision, Decision::Skip(Skip::NotLoaded));
  }

  #[test]
  fn needs_an_active_subject() {
    let settings = AgentSettings::default();
    let ledger = Ledger::default();
    assert_eq!(
      evaluate(inputs(None, &settings, &ledger)),
      Decision::Skip(Skip::NoActiveSubject)
    );
  }

  #[test]
  fn never_fires_when_auto_generate_is_off() {
    let subject = Subject::new();
    let settings = AgentSettings { auto_generate: false, preferred_hour: 8 };
    let ledger = Ledger::default();
    assert_eq!(
      daily_status(&ledger, &subject, today()),
      DailyStatus::Pending
    );
    assert_eq!(
      evaluate(inputs(Some(&subject), &settings, &ledger)),
      Decision::Skip(Skip::AutoGenerateOff)
    );
  }

  #[test]
  fn satisfied_day_does_not_refire() {
    let subject = Subject::new();
    let settings = AgentSettings::default();
    let mut ledger = Ledger::default();
    ledger.upsert(Post::from_draft(
      subject.id,
      today(),
      generate(&subject, today()),
    ));

    assert_eq!(
      daily_status(&ledger, &subject, today()),
      DailyStatus::Satisfied
    );
    for _ in 0..3 {
      assert_eq!(
        evaluate(inputs(Some(&subject), &settings, &ledger)),
        Decision::Skip(Skip::AlreadySatisfied)
      );
    }
  }

  #[test]
  fn tomorrows_post_does_not_satisfy_today() {
    let subject = Subject::new();
    let settings = AgentSettings::default();
    let tomorrow = today().succ_opt().unwrap();
    let mut ledger = Ledger::default();
    ledger.upsert(Post::from_draft(
      subject.id,
      tomorrow,
      generate(&subject, tomorrow),
    ));

    assert_eq!(
      evaluate(inputs(Some(&subject), &settings, &ledger)),
      Decision::Fire
    );
  }

  #[test]
  fn preferred_hour_is_ignored() {
    let subject = Subject::new();
    let ledger = Ledger::default();
    for hour in [4, 8, 20] {
      let settings = AgentSettings { auto_generate: true, preferred_hour: hour };
      assert_eq!(
        evaluate(inputs(Some(&subject), &settings, &ledger)),
        Decision::Fire
      );
    }
  }
}
