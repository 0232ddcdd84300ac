//! Error types for `fir-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("FIR not found")]
  NotFound,

  /// A filing request is missing a required field.
  #[error("invalid FIR: {0}")]
  Validation(String),

  /// A list filter could not be interpreted (e.g. an unparseable date).
  #[error("invalid filter: {0}")]
  InvalidFilter(String),

  #[error("could not allocate a unique FIR id after {0} attempts")]
  IdAllocation(usize),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
