//! Application state machine and event dispatcher.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use fir_core::{
  filter::ListFilter,
  fir::{Fir, FirStatus},
  stats::FirStatistics,
};
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use strum::IntoEnumIterator;

use crate::client::ApiClient;

// ─── Screen ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
  /// Focus on the record list; right pane previews the cursor record.
  FirList,
  /// Focus on the record detail pane.
  FirDetail,
  /// Full-width statistics view.
  Statistics,
}

/// The status filter after `current` in the cycle all → pending →
/// investigating → closed → all.
pub fn next_status(current: Option<FirStatus>) -> Option<FirStatus> {
  match current {
    None => FirStatus::iter().next(),
    Some(s) => FirStatus::iter().skip_while(|x| *x != s).nth(1),
  }
}

// ─── App ─────────────────────────────────────────────────────────────────────

/// Top-level application state.
pub struct App {
  /// Current screen / keyboard focus.
  pub screen: Screen,

  /// Records returned by the last list query, newest first.
  pub firs: Vec<Fir>,

  /// Server-side status filter; `None` lists every status.
  pub status_filter: Option<FirStatus>,

  /// Current fuzzy-filter string (only edited when `filter_active`).
  pub filter: String,

  /// Whether the user is typing a filter query.
  pub filter_active: bool,

  /// Cursor position within the *filtered* record list.
  pub list_cursor: usize,

  /// Scroll offset within the detail pane.
  pub detail_scroll: usize,

  /// Latest statistics, fetched when the statistics screen is opened.
  pub stats: Option<FirStatistics>,

  /// One-line status message shown in the status bar.
  pub status_msg: String,

  /// Shared HTTP client.
  pub client: Arc<ApiClient>,
}

impl App {
  pub fn new(client: ApiClient) -> Self {
    Self {
      screen: Screen::FirList,
      firs: Vec::new(),
      status_filter: None,
      filter: String::new(),
      filter_active: false,
      list_cursor: 0,
      detail_scroll: 0,
      stats: None,
      status_msg: String::new(),
      client: Arc::new(client),
    }
  }

  // ── Data loading ──────────────────────────────────────────────────────────

  /// Re-query the record list with the current status filter.
  pub async fn load_firs(&mut self) -> anyhow::Result<()> {
    self.status_msg = "Loading records…".into();
    let filter = ListFilter {
      status: self.status_filter.map(|s| s.to_string()),
      ..Default::default()
    };
    match self.client.list_firs(&filter).await {
      Ok(firs) => {
        self.firs = firs;
        self.list_cursor = 0;
        self.detail_scroll = 0;
        self.status_msg = String::new();
        Ok(())
      }
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        Err(e)
      }
    }
  }

  async fn load_stats(&mut self) {
    self.status_msg = "Loading statistics…".into();
    match self.client.statistics().await {
      Ok(stats) => {
        self.stats = Some(stats);
        self.status_msg = String::new();
      }
      Err(e) => self.status_msg = format!("Error: {e}"),
    }
  }

  /// Ask the server to verify the cursor record, then refresh it in place.
  async fn verify_cursor(&mut self) {
    let Some(id) = self.cursor_fir().map(|f| f.id.clone()) else {
      return;
    };
    self.status_msg = format!("Verifying {id} on the ledger…");
    let verified = match self.client.verify_fir(&id).await {
      Ok(v) => v,
      Err(e) => {
        self.status_msg = format!("Error: {e}");
        return;
      }
    };
    if let Ok(Some(fresh)) = self.client.get_fir(&id).await
      && let Some(slot) = self.firs.iter_mut().find(|f| f.id == id)
    {
      *slot = fresh;
    }
    self.status_msg = if verified {
      format!("{id} verified")
    } else {
      format!("{id} could not be verified")
    };
  }

  // ── Filtered list ─────────────────────────────────────────────────────────

  /// Records matching the fuzzy query over id, title, location and officer.
  pub fn filtered_firs(&self) -> Vec<&Fir> {
    if self.filter.is_empty() {
      return self.firs.iter().collect();
    }
    let matcher = SkimMatcherV2::default();
    self
      .firs
      .iter()
      .filter(|f| {
        [&f.id, &f.title, &f.location, &f.police_name]
          .iter()
          .any(|field| matcher.fuzzy_match(field, &self.filter).is_some())
      })
      .collect()
  }

  /// The record under the list cursor in the filtered view, if any.
  pub fn cursor_fir(&self) -> Option<&Fir> {
    self.filtered_firs().get(self.list_cursor).copied()
  }

  // ── Key handling ──────────────────────────────────────────────────────────

  /// Process a key event. Returns `true` to continue, `false` to quit.
  pub async fn handle_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
      return Ok(false);
    }

    if self.filter_active {
      self.handle_filter_key(key);
      return Ok(true);
    }

    match self.screen {
      Screen::FirList => self.handle_list_key(key).await,
      Screen::FirDetail => self.handle_detail_key(key).await,
      Screen::Statistics => self.handle_stats_key(key).await,
    }
  }

  fn handle_filter_key(&mut self, key: KeyEvent) {
    match key.code {
      KeyCode::Esc => {
        self.filter_active = false;
        self.filter.clear();
        self.list_cursor = 0;
      }
      KeyCode::Enter => {
        self.filter_active = false;
        self.list_cursor = 0;
        if self.filtered_firs().len() == 1 {
          self.screen = Screen::FirDetail;
          self.detail_scroll = 0;
        }
      }
      KeyCode::Backspace => {
        self.filter.pop();
        self.list_cursor = 0;
      }
      KeyCode::Char(c) => {
        self.filter.push(c);
        self.list_cursor = 0;
      }
      _ => {}
    }
  }

  /// Keys shared by the list and detail screens.
  async fn handle_common_key(&mut self, key: KeyEvent) -> anyhow::Result<Option<bool>> {
    match key.code {
      KeyCode::Char('q') => return Ok(Some(false)),
      KeyCode::Char('r') => {
        // Errors are already shown in the status bar.
        let _ = self.load_firs().await;
      }
      KeyCode::Char('s') => {
        self.status_filter = next_status(self.status_filter);
        let _ = self.load_firs().await;
      }
      KeyCode::Char('v') => self.verify_cursor().await,
      KeyCode::Char('t') => {
        self.screen = Screen::Statistics;
        self.load_stats().await;
      }
      _ => return Ok(None),
    }
    Ok(Some(true))
  }

  async fn handle_list_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if let Some(cont) = self.handle_common_key(key).await? {
      return Ok(cont);
    }
    match key.code {
      KeyCode::Down | KeyCode::Char('j') => {
        let len = self.filtered_firs().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
        }
      }
      KeyCode::Up | KeyCode::Char('k') => {
        self.list_cursor = self.list_cursor.saturating_sub(1);
      }
      KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') => {
        if self.cursor_fir().is_some() {
          self.screen = Screen::FirDetail;
          self.detail_scroll = 0;
        }
      }
      KeyCode::Char('/') => {
        self.filter_active = true;
        self.filter.clear();
        self.list_cursor = 0;
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_detail_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    if let Some(cont) = self.handle_common_key(key).await? {
      return Ok(cont);
    }
    match key.code {
      KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::FirList;
      }
      KeyCode::Down | KeyCode::Char('j') => self.detail_scroll += 1,
      KeyCode::Up | KeyCode::Char('k') => {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
      }
      KeyCode::Char(']') | KeyCode::PageDown => {
        let len = self.filtered_firs().len();
        if len > 0 && self.list_cursor + 1 < len {
          self.list_cursor += 1;
          self.detail_scroll = 0;
        }
      }
      KeyCode::Char('[') | KeyCode::PageUp => {
        if self.list_cursor > 0 {
          self.list_cursor -= 1;
          self.detail_scroll = 0;
        }
      }
      _ => {}
    }
    Ok(true)
  }

  async fn handle_stats_key(&mut self, key: KeyEvent) -> anyhow::Result<bool> {
    match key.code {
      KeyCode::Char('q') => return Ok(false),
      KeyCode::Char('r') => self.load_stats().await,
      KeyCode::Esc | KeyCode::Char('t') | KeyCode::Left | KeyCode::Char('h') => {
        self.screen = Screen::FirList;
      }
      _ => {}
    }
    Ok(true)
  }
}
