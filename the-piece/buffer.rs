//! The edit log.
//!
//! A [`Buffer`] is a base [`Piece`] followed by every [`Edit`] ever made to
//! it. Nothing is ever removed or rewritten; rendering folds
//! [`Piece::apply`] over the whole log each time.

use std::borrow::Cow;

use thiserror::Error;

use crate::{
  Tendril,
  config::MergeConfig,
  piece::{
    Edit,
    MergeError,
    Piece,
  },
};

pub type Result<T> = std::result::Result<T, BufferError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum BufferError {
  #[error(transparent)]
  Merge(#[from] MergeError),
  #[error("edit log length is {actual}, expected {expected}")]
  StaleLength { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Default)]
pub struct Buffer {
  base:   Piece,
  edits:  Vec<Edit>,
  config: MergeConfig,
}

impl Buffer {
  /// An empty document.
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_text(text: impl Into<String>) -> Self {
    Self::with_base(Piece::new(text))
  }

  pub fn with_base(base: Piece) -> Self {
    Self {
      base,
      ..Self::default()
    }
  }

  #[must_use]
  pub fn with_config(mut self, config: MergeConfig) -> Self {
    self.config = config;
    self
  }

  pub fn base(&self) -> &Piece {
    &self.base
  }

  pub fn edits(&self) -> &[Edit] {
    &self.edits
  }

  pub fn config(&self) -> &MergeConfig {
    &self.config
  }

  /// Number of edits recorded on top of the base.
  pub fn len(&self) -> usize {
    self.edits.len()
  }

  pub fn is_empty(&self) -> bool {
    self.edits.is_empty()
  }

  /// Append an edit as is.
  pub fn push(&mut self, edit: Edit) {
    tracing::trace!("appending edit #{}: {:?}", self.edits.len(), edit);
    self.edits.push(edit);
  }

  /// Insert `text` at `index`.
  pub fn insert(&mut self, text: impl Into<Tendril>, index: usize) {
    self.push(Edit::from_record(Some(text.into()), index, index));
  }

  /// Replace `from..to` with `text`.
  pub fn replace(&mut self, text: impl Into<Tendril>, from: usize, to: usize) {
    self.push(Edit::from_record(Some(text.into()), from, to));
  }

  /// Delete `from..to`.
  ///
  /// Recorded as `(to, from)` so that the usual `from < to` reads as a
  /// deletion.
  pub fn delete(&mut self, from: usize, to: usize) {
    self.push(Edit::from_record(None, to, from));
  }

  /// Replay the whole log.
  pub fn render(&self) -> Result<String> {
    self.render_prefix(self.edits.len())
  }

  /// Replay the base and the first `count` edits. `count` is clamped to the
  /// log length.
  pub fn render_prefix(&self, count: usize) -> Result<String> {
    let edits = &self.edits[..count.min(self.edits.len())];
    tracing::debug!("rendering {} of {} edits", edits.len(), self.edits.len());

    let mut state = Cow::Borrowed(&self.base);
    for edit in edits {
      let next = match state.apply(edit, &self.config)? {
        Cow::Owned(next) => next,
        Cow::Borrowed(_) => continue,
      };
      state = Cow::Owned(next);
    }

    Ok(state.into_owned().text)
  }
}
