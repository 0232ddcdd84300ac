//! Async HTTP client wrapping the FIR ledger JSON API.

use anyhow::{Context, Result, anyhow};
use fir_core::{
  filter::ListFilter,
  fir::{Fir, NewFir},
  stats::FirStatistics,
};
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the ledger API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
  pub username: String,
  pub password: String,
}

/// Async HTTP client for the ledger JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

/// `{"error": "..."}` bodies returned on failure.
#[derive(Deserialize)]
struct ErrorBody {
  error: String,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  fn auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    if self.config.username.is_empty() {
      req
    } else {
      req.basic_auth(&self.config.username, Some(&self.config.password))
    }
  }

  /// Turn a non-success response into an error carrying the server's message.
  async fn check(what: &str, resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
      Ok(body) => body.error,
      Err(_) => status.canonical_reason().unwrap_or("request failed").to_string(),
    };
    Err(anyhow!("{what} → {status}: {message}"))
  }

  // ── Records ───────────────────────────────────────────────────────────────

  /// `GET /firs[?status=..&location=..]`
  pub async fn list_firs(&self, filter: &ListFilter) -> Result<Vec<Fir>> {
    tracing::debug!(?filter, "listing FIRs");
    let resp = self
      .auth(self.client.get(self.url("/firs")))
      .query(filter)
      .send()
      .await
      .context("GET /firs failed")?;
    Self::check("GET /firs", resp)
      .await?
      .json()
      .await
      .context("deserialising FIRs")
  }

  /// `GET /firs/{id}`; `None` on 404.
  pub async fn get_fir(&self, id: &str) -> Result<Option<Fir>> {
    let what = format!("GET /firs/{id}");
    let resp = self
      .auth(self.client.get(self.url(&format!("/firs/{id}"))))
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    if resp.status() == StatusCode::NOT_FOUND {
      return Ok(None);
    }
    let fir = Self::check(&what, resp)
      .await?
      .json()
      .await
      .context("deserialising FIR")?;
    Ok(Some(fir))
  }

  /// `POST /firs`
  pub async fn file_fir(&self, input: &NewFir) -> Result<Fir> {
    let resp = self
      .auth(self.client.post(self.url("/firs")))
      .json(input)
      .send()
      .await
      .context("POST /firs failed")?;
    Self::check("POST /firs", resp)
      .await?
      .json()
      .await
      .context("deserialising filed FIR")
  }

  /// `POST /firs/{id}/verify`
  pub async fn verify_fir(&self, id: &str) -> Result<bool> {
    #[derive(Deserialize)]
    struct Verified {
      success: bool,
    }

    let what = format!("POST /firs/{id}/verify");
    let resp = self
      .auth(self.client.post(self.url(&format!("/firs/{id}/verify"))))
      .send()
      .await
      .with_context(|| format!("{what} failed"))?;
    let body: Verified = Self::check(&what, resp)
      .await?
      .json()
      .await
      .context("deserialising verify response")?;
    Ok(body.success)
  }

  // ── Statistics ────────────────────────────────────────────────────────────

  /// `GET /statistics`
  pub async fn statistics(&self) -> Result<FirStatistics> {
    let resp = self
      .auth(self.client.get(self.url("/statistics")))
      .send()
      .await
      .context("GET /statistics failed")?;
    Self::check("GET /statistics", resp)
      .await?
      .json()
      .await
      .context("deserialising statistics")
  }
}
