//! `daypost`: drafts one LinkedIn post per day for each of your subjects.
//!
//! # Usage
//!
//! ```
//! daypost today
//! daypost --subject 6f1c… generate --tomorrow
//! daypost subjects add --topic "Remote teams" --tone practical
//! daypost settings set --auto false --hour 7
//! ```
//!
//! State lives in a SQLite file (`store_path`), configured through
//! `daypost.toml`, `DAYPOST_*` environment variables or `--store`.

mod commands;
mod render;

use std::{
  io::Write as _,
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use commands::Command;
use daypost_core::agent::Agent;
use daypost_store_sqlite::SqliteStore;
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_STORE_PATH: &str = "~/.local/share/daypost/daypost.db";

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Daily LinkedIn post agent")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "daypost.toml")]
  config: PathBuf,

  /// SQLite file holding subjects, posts and settings.
  #[arg(long, value_name = "FILE")]
  store: Option<PathBuf>,

  /// Make this subject active before running the command.
  #[arg(short, long, global = true, value_name = "ID")]
  subject: Option<Uuid>,

  #[command(subcommand)]
  command: Command,
}

// ─── Config file ──────────────────────────────────────────────────────────────

#[derive(Deserialize, Debug)]
struct CliConfig {
  store_path: PathBuf,
}

fn load_config(cli: &Cli) -> anyhow::Result<CliConfig> {
  let settings = config::Config::builder()
    .set_default("store_path", DEFAULT_STORE_PATH)?
    .add_source(config::File::from(cli.config.clone()).required(false))
    .add_source(config::Environment::with_prefix("DAYPOST"))
    .set_override_option(
      "store_path",
      cli.store.as_ref().map(|p| p.to_string_lossy().into_owned()),
    )?
    .build()
    .context("failed to read config file")?;

  settings
    .try_deserialize()
    .context("failed to deserialise config")
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Diagnostics go to stderr; stdout carries command output only.
  tracing_subscriber::fmt()
    .with_writer(std::io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let cfg = load_config(&cli)?;

  let store_path = expand_tilde(&cfg.store_path);
  if let Some(parent) = store_path.parent().filter(|p| !p.as_os_str().is_empty()) {
    tokio::fs::create_dir_all(parent)
      .await
      .with_context(|| format!("failed to create {parent:?}"))?;
  }

  let store = Arc::new(
    SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?,
  );
  tracing::debug!(path = %store_path.display(), "opened store");

  let mut agent = Agent::open(store.clone())
    .await
    .context("failed to load agent state")?;

  if let Some(id) = cli.subject {
    agent
      .select_subject(id)
      .await
      .with_context(|| format!("failed to select subject {id}"))?;
  }

  let mut out = std::io::stdout().lock();
  commands::run(&mut agent, &store, cli.command, &mut out).await?;
  out.flush()?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
