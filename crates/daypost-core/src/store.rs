//! The `DocumentStore` trait and the typed repositories built on it.
//!
//! A store is an opaque string-keyed map of JSON documents. The agent keeps
//! three of them (subjects, posts and settings), each read and written whole
//! through its own [`Repository`]. Backends (e.g. `daypost-store-sqlite`)
//! implement the trait; [`MemoryStore`] is the in-process one.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::Future,
  marker::PhantomData,
  sync::{Arc, Mutex},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{
  Error,
  Result,
  ledger::Ledger,
  settings::AgentSettings,
  subject::SubjectRegistry,
};

// ─── Keys ────────────────────────────────────────────────────────────────────

pub const SUBJECTS_KEY: &str = "subjects";
pub const POSTS_KEY: &str = "posts";
pub const SETTINGS_KEY: &str = "settings";

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable key → JSON document map.
///
/// Writes replace the whole document under a key. A write that has returned
/// is visible to every later read; writes to one key are never reordered.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded runtime.
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Read the document under `key`; `None` if it has never been written.
  fn read<'a>(
    &'a self,
    key: &'a str,
  ) -> impl Future<Output = Result<Option<Value>, Self::Error>> + Send + 'a;

  /// Replace the document under `key` with `value`.
  fn write<'a>(
    &'a self,
    key: &'a str,
    value: Value,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

// ─── Repository ──────────────────────────────────────────────────────────────

/// One typed document in a [`DocumentStore`].
pub struct Repository<S, T> {
  store:   Arc<S>,
  key:     &'static str,
  _marker: PhantomData<fn() -> T>,
}

impl<S, T> Clone for Repository<S, T> {
  fn clone(&self) -> Self {
    Self { store: self.store.clone(), key: self.key, _marker: PhantomData }
  }
}

impl<S, T> Repository<S, T>
where
  S: DocumentStore,
  T: Serialize + DeserializeOwned,
{
  pub fn new(store: Arc<S>, key: &'static str) -> Self {
    Self { store, key, _marker: PhantomData }
  }

  pub fn key(&self) -> &'static str { self.key }

  /// Load the document, or `None` if it is absent.
  pub async fn load(&self) -> Result<Option<T>> {
    let value = self
      .store
      .read(self.key)
      .await
      .map_err(|e| Error::StoreRead { key: self.key, source: Box::new(e) })?;
    value.map(serde_json::from_value).transpose().map_err(Error::from)
  }

  /// Serialise and write the whole document.
  pub async fn save(&self, document: &T) -> Result<()> {
    let value = serde_json::to_value(document)?;
    self
      .store
      .write(self.key, value)
      .await
      .map_err(|e| Error::StoreWrite { key: self.key, source: Box::new(e) })
  }
}

/// The three repositories the agent persists through.
pub struct Repositories<S> {
  pub subjects: Repository<S, SubjectRegistry>,
  pub posts:    Repository<S, Ledger>,
  pub settings: Repository<S, AgentSettings>,
}

impl<S: DocumentStore> Repositories<S> {
  pub fn new(store: Arc<S>) -> Self {
    Self {
      subjects: Repository::new(store.clone(), SUBJECTS_KEY),
      posts:    Repository::new(store.clone(), POSTS_KEY),
      settings: Repository::new(store, SETTINGS_KEY),
    }
  }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// An in-process store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
  documents: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// A snapshot of the document under `key`.
  pub fn get(&self, key: &str) -> Option<Value> {
    self.lock().get(key).cloned()
  }

  fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Value>> {
    // A poisoned map is still a valid map.
    self.documents.lock().unwrap_or_else(|e| e.into_inner())
  }
}

impl DocumentStore for MemoryStore {
  type Error = Infallible;

  async fn read(&self, key: &str) -> Result<Option<Value>, Infallible> {
    Ok(self.get(key))
  }

  async fn write(&self, key: &str, value: Value) -> Result<(), Infallible> {
    self.lock().insert(key.to_owned(), value);
    Ok(())
  }
}
