//! Server assembly for the FIR ledger: configuration, store opening, and the
//! outer HTTP layers around [`fir_api::api_router`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use axum::Router;
use fir_api::{AppState, auth::UserConfig};
use fir_core::{
  id::IdStrategy,
  service::{RecordService, ServiceConfig},
};
use fir_store_sqlite::SqliteStore;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and `FIR_*`
/// environment variables. Every key is optional.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// `:memory:` selects an ephemeral store.
  pub store_path:      PathBuf,
  pub id_strategy:     IdStrategy,
  pub verify_delay_ms: u64,
  /// Insert the demonstration records into an empty store at startup.
  pub seed_demo:       bool,
  /// No users means no authentication.
  pub users:           Vec<UserConfig>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".to_string(),
      port:            3001,
      store_path:      PathBuf::from("firs.db"),
      id_strategy:     IdStrategy::Sequential,
      verify_delay_ms: 1500,
      seed_demo:       false,
      users:           Vec::new(),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  pub fn service_config(&self) -> ServiceConfig {
    ServiceConfig {
      id_strategy:  self.id_strategy,
      verify_delay: Duration::from_millis(self.verify_delay_ms),
    }
  }

  pub fn auth_config(&self) -> fir_api::AuthConfig {
    fir_api::AuthConfig { users: self.users.clone() }
  }
}

// ─── Assembly ────────────────────────────────────────────────────────────────

/// Open the SQLite store named by `path`, expanding a leading `~/`.
pub async fn open_store(path: &Path) -> fir_store_sqlite::Result<SqliteStore> {
  if path == Path::new(":memory:") {
    return SqliteStore::open_in_memory().await;
  }
  SqliteStore::open(expand_tilde(path)).await
}

/// Build shared state from `cfg` over an already-opened store.
pub async fn build_state(
  cfg: &ServerConfig,
  store: SqliteStore,
) -> fir_core::Result<AppState<SqliteStore>> {
  let records = RecordService::new(Arc::new(store), cfg.service_config());

  if cfg.seed_demo {
    let written = records.seed_demo().await?;
    if written > 0 {
      tracing::info!(written, "seeded demonstration records");
    }
  }

  if cfg.users.is_empty() {
    tracing::warn!("no users configured; every endpoint is unauthenticated");
  }

  Ok(AppState::new(records, cfg.auth_config()))
}

/// The API router wrapped in request tracing and permissive CORS.
pub fn app(state: AppState<SqliteStore>) -> Router {
  fir_api::api_router(state)
    .layer(CorsLayer::permissive())
    .layer(TraceLayer::new_for_http())
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
