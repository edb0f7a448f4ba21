//! Core types and logic for the daypost daily-post agent.
//!
//! Everything here is free of database and terminal dependencies. The
//! generator and ledger are pure; persistence goes through the
//! [`store::DocumentStore`] trait, implemented by backends such as
//! `daypost-store-sqlite`.

// Native `async fn` in traits; the `Send` bounds are spelled out explicitly.
#![allow(async_fn_in_trait)]

pub mod agent;
pub mod error;
pub mod generator;
pub mod ledger;
pub mod post;
pub mod settings;
pub mod store;
pub mod subject;
pub mod trigger;

pub use error::{Error, Result};
