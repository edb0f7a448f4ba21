//! Error types for `daypost-core`.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// A store backend error, boxed so the core stays independent of any backend.
pub type BoxedStoreError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid tone: {0:?}")]
  InvalidTone(String),

  #[error("subject not found: {0}")]
  SubjectNotFound(Uuid),

  #[error("no active subject selected")]
  NoActiveSubject,

  #[error("date out of range: {0}")]
  DateOutOfRange(NaiveDate),

  #[error("failed to read {key:?} from store: {source}")]
  StoreRead {
    key:    &'static str,
    #[source]
    source: BoxedStoreError,
  },

  #[error("failed to write {key:?} to store: {source}")]
  StoreWrite {
    key:    &'static str,
    #[source]
    source: BoxedStoreError,
  },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
