//! `fir`: terminal client for the FIR ledger.
//!
//! # Usage
//!
//! ```text
//! fir --url http://localhost:3001 --user desk --password secret
//! fir --config ~/.config/fir/config.toml stats
//! fir file complaint.json
//! ```

mod app;
mod client;
mod ui;

use std::{
  io,
  path::{Path, PathBuf},
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::{Parser, Subcommand};
use client::{ApiClient, ApiConfig};
use crossterm::{
  event::{self, Event},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use fir_core::fir::NewFir;
use ratatui::{Terminal, backend::CrosstermBackend};
use serde::Deserialize;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "fir", about = "Terminal client for the FIR ledger")]
struct Args {
  /// Path to a TOML config file (url, username, password).
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Base URL of the ledger server (default: http://localhost:3001).
  #[arg(long, env = "FIR_URL")]
  url: Option<String>,

  /// API username.
  #[arg(long, env = "FIR_USER")]
  user: Option<String>,

  /// API password (plaintext).
  #[arg(long, env = "FIR_PASSWORD")]
  password: Option<String>,

  #[command(subcommand)]
  command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Browse records interactively (the default).
  Browse,
  /// File a new FIR from a JSON document.
  File {
    /// Path to a JSON filing request.
    path: PathBuf,
  },
  /// Print record statistics.
  Stats,
}

// ─── Config file ─────────────────────────────────────────────────────────────

/// Shape of the optional TOML config file.
#[derive(Deserialize, Default)]
struct ConfigFile {
  #[serde(default)]
  url:      String,
  #[serde(default)]
  username: String,
  #[serde(default)]
  password: String,
}

fn non_empty(s: &str) -> Option<String> { (!s.is_empty()).then(|| s.to_string()) }

// ─── Entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  let args = Args::parse();

  let file_cfg: ConfigFile = if let Some(path) = &args.config {
    let raw = std::fs::read_to_string(path)
      .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).context("parsing config file")?
  } else {
    ConfigFile::default()
  };

  // CLI flags override config file, which overrides defaults.
  let api_config = ApiConfig {
    base_url: args
      .url
      .or_else(|| non_empty(&file_cfg.url))
      .unwrap_or_else(|| "http://localhost:3001".to_string()),
    username: args
      .user
      .or_else(|| non_empty(&file_cfg.username))
      .unwrap_or_default(),
    password: args
      .password
      .or_else(|| non_empty(&file_cfg.password))
      .unwrap_or_default(),
  };

  let client = ApiClient::new(api_config)?;

  match args.command.unwrap_or(Command::Browse) {
    Command::Browse => browse(client).await,
    Command::File { path } => {
      init_tracing();
      file(&client, &path).await
    }
    Command::Stats => {
      init_tracing();
      let stats = client.statistics().await?;
      print!("{}", ui::statistics::report(&stats));
      Ok(())
    }
  }
}

/// Logs go to stderr, and only for the non-interactive commands.
fn init_tracing() {
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();
}

// ─── Commands ────────────────────────────────────────────────────────────────

async fn file(client: &ApiClient, path: &Path) -> Result<()> {
  let raw = std::fs::read_to_string(path)
    .with_context(|| format!("reading {}", path.display()))?;
  let input: NewFir = serde_json::from_str(&raw)
    .with_context(|| format!("parsing filing request {}", path.display()))?;
  input.validate()?;

  let fir = client.file_fir(&input).await?;
  println!("Filed {}", fir.id);
  println!("  ipfs cid  {}", fir.ipfs_cid.as_deref().unwrap_or("—"));
  println!("  tx hash   {}", fir.blockchain_tx_hash.as_deref().unwrap_or("—"));
  Ok(())
}

async fn browse(client: ApiClient) -> Result<()> {
  let mut app = App::new(client);

  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let load_result = app.load_firs().await;

  // Run the event loop; restore terminal even on error.
  let run_result = if load_result.is_ok() {
    run_event_loop(&mut terminal, &mut app).await
  } else {
    load_result
  };

  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  run_result
}

// ─── Event loop ──────────────────────────────────────────────────────────────

async fn run_event_loop(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    // Poll for an event, yielding control to tokio while waiting.
    let maybe_event = tokio::task::block_in_place(|| {
      if event::poll(Duration::from_millis(50))? {
        Ok::<_, io::Error>(Some(event::read()?))
      } else {
        Ok(None)
      }
    })?;

    if let Some(Event::Key(key)) = maybe_event
      && !app.handle_key(key).await?
    {
      break;
    }
  }

  Ok(())
}
