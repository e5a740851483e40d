//! Merge configuration.
//!
//! ```toml
//! filler = "."
//! bound_check = "offset"
//! max_fill = 4096
//! ```

use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_FILLER: char = ' ';

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to parse merge config: {0}")]
  Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Upper-bound test used to decide whether an insertion or replacement lands
/// inside the base text, and the gap used for insertions left of it.
///
/// Both modes agree whenever the base starts at `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundCheck {
  /// `index <= len - start`, left gap `start - (inserted_len - index)`.
  #[default]
  Literal,
  /// `index <= start + len`, left gap `start - (index + inserted_len)`.
  Offset,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "snake_case", deny_unknown_fields)]
pub struct MergeConfig {
  /// Pads the gap when an edit falls outside the base text.
  pub filler:      char,
  pub bound_check: BoundCheck,
  /// Longest filler run a single merge may produce. `None` only bounds it by
  /// what a `String` can hold.
  pub max_fill:    Option<usize>,
}

impl Default for MergeConfig {
  fn default() -> Self {
    Self {
      filler:      DEFAULT_FILLER,
      bound_check: BoundCheck::default(),
      max_fill:    None,
    }
  }
}

impl MergeConfig {
  pub fn from_toml(source: &str) -> Result<Self> {
    let config: Self = toml::from_str(source)?;
    tracing::debug!("loaded merge config: {:?}", config);
    Ok(config)
  }

  #[must_use]
  pub fn with_filler(mut self, filler: char) -> Self {
    self.filler = filler;
    self
  }

  #[must_use]
  pub fn with_bound_check(mut self, bound_check: BoundCheck) -> Self {
    self.bound_check = bound_check;
    self
  }

  #[must_use]
  pub fn with_max_fill(mut self, max_fill: usize) -> Self {
    self.max_fill = Some(max_fill);
    self
  }
}
