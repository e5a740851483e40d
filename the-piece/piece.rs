//! Edit records and the merge operation that applies them.
//!
//! An [`Edit`] describes a single insertion, replacement or deletion. Merging
//! an edit onto a base [`Piece`] produces the text of the next document state:
//!
//! ```ignore
//! use the_piece::{config::MergeConfig, piece::{Edit, Piece}};
//!
//! let base = Piece::new("Hello, Bob!");
//! let next = base.apply(&Edit::replace("Dave", 7, 10), &MergeConfig::default())?;
//! assert_eq!(next.text, "Hello, Dave!");
//! ```
//!
//! # Raw records
//!
//! Edits are also expressible as a raw `(text, start, end)` record, where the
//! order of the two indices is the only thing telling the kinds apart:
//!
//! - `start > end` deletes `end..start`
//! - `start == end` inserts `text` at `start`
//! - `start < end` replaces `start..end` with `text`
//!
//! [`Edit::from_record`] performs that classification once.
//!
//! # Out of range edits
//!
//! Indices are character offsets taken directly against the base text. An
//! insertion or replacement that falls outside the text is padded with
//! [`MergeConfig::filler`]; a deletion outside the text leaves it untouched,
//! in which case the base itself is handed back as [`Cow::Borrowed`].

use std::borrow::Cow;

use thiserror::Error;

use crate::{
  Tendril,
  config::{
    BoundCheck,
    MergeConfig,
  },
};

pub type Result<T> = std::result::Result<T, MergeError>;

#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MergeError {
  #[error("index {index} cannot be padded onto text of length {len}")]
  InvalidIndex { index: usize, len: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
  /// Insert `text` before the character at `at`.
  Insert { text: Tendril, at: usize },

  /// Replace `from..to` with `text`.
  Replace {
    text: Tendril,
    from: usize,
    to:   usize,
  },

  /// Remove `from..to`.
  Delete { from: usize, to: usize },
}

impl Edit {
  /// Classify a raw `(text, start, end)` record.
  ///
  /// A missing `text` is an empty string for insertions and replacements and
  /// is ignored for deletions.
  pub fn from_record(text: Option<Tendril>, start: usize, end: usize) -> Self {
    use std::cmp::Ordering;

    match start.cmp(&end) {
      Ordering::Greater => Edit::Delete {
        from: end,
        to:   start,
      },
      Ordering::Equal => Edit::Insert {
        text: text.unwrap_or_default(),
        at:   start,
      },
      Ordering::Less => Edit::Replace {
        text: text.unwrap_or_default(),
        from: start,
        to:   end,
      },
    }
  }

  /// The raw record this edit is equivalent to.
  pub fn to_record(&self) -> (Option<&str>, usize, usize) {
    match self {
      Edit::Insert { text, at } => (Some(text.as_str()), *at, *at),
      Edit::Replace { text, from, to } => (Some(text.as_str()), *from, *to),
      Edit::Delete { from, to } => (None, *to, *from),
    }
  }

  pub fn insert(text: impl Into<Tendril>, at: usize) -> Self {
    Edit::Insert {
      text: text.into(),
      at,
    }
  }

  /// Always a `Replace`, even for an empty or reversed range. Use
  /// [`Edit::from_record`] to classify by index order instead.
  pub fn replace(text: impl Into<Tendril>, from: usize, to: usize) -> Self {
    Edit::Replace {
      text: text.into(),
      from,
      to,
    }
  }

  /// Always a `Delete`; `from` and `to` are ordered when merged.
  pub fn delete(from: usize, to: usize) -> Self {
    Edit::Delete { from, to }
  }

  pub fn text(&self) -> Option<&str> {
    match self {
      Edit::Insert { text, .. } | Edit::Replace { text, .. } => Some(text.as_str()),
      Edit::Delete { .. } => None,
    }
  }
}

/// A text state together with its nominal position.
///
/// `start` and `end` only take part in the bound checks of [`Piece::apply`];
/// merging never changes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Piece {
  pub text:  String,
  pub start: usize,
  pub end:   usize,
}

/// Where merged text goes relative to the base text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
  /// Overwrite `from..to` of the base.
  Splice { from: usize, to: usize },
  /// Edit text, `gap` fillers, base.
  Before { gap: usize },
  /// Base, `gap` fillers, edit text.
  After { gap: usize },
}

impl Piece {
  pub fn new(text: impl Into<String>) -> Self {
    Self {
      text:  text.into(),
      start: 0,
      end:   0,
    }
  }

  #[must_use]
  pub fn with_position(mut self, start: usize, end: usize) -> Self {
    self.start = start;
    self.end = end;
    self
  }

  pub fn len_chars(&self) -> usize {
    self.text.chars().count()
  }

  /// Merge `edit` onto this piece.
  ///
  /// The result always carries this piece's `start` and `end`. A deletion
  /// that lies entirely outside the text returns `self` borrowed.
  pub fn apply<'a>(&'a self, edit: &Edit, config: &MergeConfig) -> Result<Cow<'a, Piece>> {
    tracing::trace!(
      "merging {:?} onto piece at {}..{}",
      edit,
      self.start,
      self.end
    );

    let len = self.len_chars();
    let text = match edit {
      Edit::Delete { from, to } => {
        let (lo, hi) = ordered(*from, *to);
        if hi >= self.start && lo <= self.start.saturating_add(len) {
          splice(&self.text, lo, hi, "")
        } else {
          tracing::debug!(
            "deletion {}..{} misses text at {}..{}, leaving it unchanged",
            lo,
            hi,
            self.start,
            self.start.saturating_add(len)
          );
          return Ok(Cow::Borrowed(self));
        }
      },
      Edit::Insert { text, at } => {
        let (placement, index) = self.place_insert(text, *at, len, config.bound_check)?;
        self.compose(placement, text, index, len, config)?
      },
      Edit::Replace { text, from, to } => {
        let (lo, hi) = ordered(*from, *to);
        let (placement, index) = self.place_replace(lo, hi, len, config.bound_check);
        self.compose(placement, text, index, len, config)?
      },
    };

    Ok(Cow::Owned(Piece {
      text,
      start: self.start,
      end: self.end,
    }))
  }

  fn within_upper_bound(&self, index: usize, len: usize, bound_check: BoundCheck) -> bool {
    match bound_check {
      BoundCheck::Literal => len
        .checked_sub(self.start)
        .is_some_and(|bound| index <= bound),
      BoundCheck::Offset => index <= self.start.saturating_add(len),
    }
  }

  fn place_insert(
    &self,
    text: &str,
    at: usize,
    len: usize,
    bound_check: BoundCheck,
  ) -> Result<(Placement, usize)> {
    if at >= self.start && self.within_upper_bound(at, len, bound_check) {
      return Ok((Placement::Splice { from: at, to: at }, at));
    }

    if at < self.start {
      let inserted = text.chars().count();
      let gap = match bound_check {
        BoundCheck::Literal => self
          .start
          .checked_add(at)
          .ok_or(MergeError::InvalidIndex { index: at, len })?
          .saturating_sub(inserted),
        BoundCheck::Offset => self.start.saturating_sub(at.saturating_add(inserted)),
      };
      return Ok((Placement::Before { gap }, at));
    }

    Ok((
      Placement::After {
        gap: at.saturating_sub(len),
      },
      at,
    ))
  }

  fn place_replace(
    &self,
    from: usize,
    to: usize,
    len: usize,
    bound_check: BoundCheck,
  ) -> (Placement, usize) {
    if self.start <= to && self.within_upper_bound(from, len, bound_check) {
      (Placement::Splice { from, to }, from)
    } else if to < self.start {
      (
        Placement::Before {
          gap: self.start - to,
        },
        to,
      )
    } else {
      (
        Placement::After {
          gap: from.saturating_sub(len),
        },
        from,
      )
    }
  }

  fn compose(
    &self,
    placement: Placement,
    text: &str,
    index: usize,
    len: usize,
    config: &MergeConfig,
  ) -> Result<String> {
    let (head, gap, tail) = match placement {
      Placement::Splice { from, to } => return Ok(splice(&self.text, from, to, text)),
      Placement::Before { gap } => (text, gap, self.text.as_str()),
      Placement::After { gap } => (self.text.as_str(), gap, text),
    };

    let invalid = || MergeError::InvalidIndex { index, len };
    if config.max_fill.is_some_and(|max| gap > max) {
      return Err(invalid());
    }
    let capacity = gap
      .checked_mul(config.filler.len_utf8())
      .and_then(|fill| fill.checked_add(head.len()))
      .and_then(|size| size.checked_add(tail.len()))
      .filter(|&size| size <= isize::MAX as usize)
      .ok_or_else(invalid)?;

    if gap > 0 {
      tracing::debug!("padding {} filler chars for edit at {}", gap, index);
    }

    let mut out = String::with_capacity(capacity);
    out.push_str(head);
    out.extend(std::iter::repeat_n(config.filler, gap));
    out.push_str(tail);
    Ok(out)
  }
}

/// Merge `edit` onto `base`. See [`Piece::apply`].
pub fn merge<'a>(base: &'a Piece, edit: &Edit, config: &MergeConfig) -> Result<Cow<'a, Piece>> {
  base.apply(edit, config)
}

#[inline]
fn ordered(a: usize, b: usize) -> (usize, usize) {
  if a <= b { (a, b) } else { (b, a) }
}

/// Byte offset of the char at `char_idx`, clamped to the end of `text`.
fn byte_offset(text: &str, char_idx: usize) -> usize {
  text
    .char_indices()
    .nth(char_idx)
    .map_or(text.len(), |(offset, _)| offset)
}

/// `text[..from] + insert + text[to..]`, in chars.
fn splice(text: &str, from: usize, to: usize, insert: &str) -> String {
  let head = &text[..byte_offset(text, from)];
  let tail = &text[byte_offset(text, to)..];

  let mut out = String::with_capacity(head.len() + insert.len() + tail.len());
  out.push_str(head);
  out.push_str(insert);
  out.push_str(tail);
  out
}
