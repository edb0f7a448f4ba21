//! The post ledger: every generated post, at most one per subject per date.
//!
//! The ledger is kept sorted by `generated_for`, newest date first. Posts
//! sharing a date stay in insertion order with the most recent insert first.
//! Both invariants hold after every mutation, not just when rendered.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::post::{CalendarDate, Post};

/// The ordered collection of posts, persisted whole under the `posts` key.
///
/// Deserialising goes through [`Ledger::new`], so a stored document that was
/// edited by hand still comes back sorted and deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Post>", into = "Vec<Post>")]
pub struct Ledger {
  posts: Vec<Post>,
}

impl Ledger {
  /// Build a ledger from a stored collection, restoring the ordering
  /// invariant and dropping any later duplicates of a `(subject, date)` slot.
  pub fn new(posts: Vec<Post>) -> Self {
    let mut ledger = Self { posts: Vec::with_capacity(posts.len()) };
    for post in posts {
      if ledger.find_for(post.subject_id, post.generated_for).is_none() {
        ledger.posts.push(post);
      }
    }
    ledger.sort();
    ledger
  }

  pub fn is_empty(&self) -> bool { self.posts.is_empty() }

  pub fn len(&self) -> usize { self.posts.len() }

  pub fn iter(&self) -> std::slice::Iter<'_, Post> { self.posts.iter() }

  pub fn as_slice(&self) -> &[Post] { &self.posts }

  /// Insert `post`, evicting whatever occupied its `(subject, date)` slot.
  ///
  /// Returns the evicted post, if any.
  pub fn upsert(&mut self, post: Post) -> Option<Post> {
    let evicted = self
      .posts
      .iter()
      .position(|p| p.is_for(post.subject_id, post.generated_for))
      .map(|index| self.posts.remove(index));

    if let Some(old) = &evicted {
      tracing::debug!(
        subject_id = %post.subject_id,
        date = %post.generated_for,
        evicted = %old.id,
        "replacing existing post"
      );
    }

    self.posts.insert(0, post);
    self.sort();
    evicted
  }

  /// All posts for `subject_id`, in ledger order.
  pub fn query(&self, subject_id: Uuid) -> Vec<&Post> {
    self.posts.iter().filter(|p| p.subject_id == subject_id).collect()
  }

  /// The post occupying the `(subject_id, date)` slot, if any.
  pub fn find_for(&self, subject_id: Uuid, date: CalendarDate) -> Option<&Post> {
    self.posts.iter().find(|p| p.is_for(subject_id, date))
  }

  /// Stable, so equal dates keep their relative (insertion) order.
  fn sort(&mut self) {
    self.posts.sort_by(|a, b| b.generated_for.cmp(&a.generated_for));
  }
}

impl From<Vec<Post>> for Ledger {
  fn from(posts: Vec<Post>) -> Self { Self::new(posts) }
}

impl From<Ledger> for Vec<Post> {
  fn from(ledger: Ledger) -> Self { ledger.posts }
}

impl<'a> IntoIterator for &'a Ledger {
  type Item = &'a Post;
  type IntoIter = std::slice::Iter<'a, Post>;

  fn into_iter(self) -> Self::IntoIter { self.posts.iter() }
}
