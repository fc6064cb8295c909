//! Error types for `readtrail-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid ISO-3166 alpha-2 country code: {0:?}")]
  InvalidCountryCode(String),

  #[error("country code not recognised: {0}")]
  UnknownCountry(String),

  #[error("invalid continent code: {0:?}")]
  InvalidContinentCode(String),

  #[error("continent code not recognised: {0}")]
  UnknownContinent(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
