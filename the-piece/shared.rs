//! A [`Buffer`] shared between one writer and any number of readers.
//!
//! The log is append-only, so a reader that remembers how long the log was
//! can always replay exactly that prefix later, whatever the writer appended
//! in between. See [`SharedBuffer::snapshot`].
//!
//! Indices passed to the mutating methods are only meaningful against the
//! text the caller believes is current. Writers that need to agree on that
//! state can use [`SharedBuffer::push_at`], which refuses to append when the
//! log has moved on.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::{
  Tendril,
  buffer::{
    Buffer,
    BufferError,
    Result,
  },
  piece::Edit,
};

#[derive(Debug, Clone, Default)]
pub struct SharedBuffer {
  inner: Arc<RwLock<Buffer>>,
}

impl SharedBuffer {
  pub fn new(buffer: Buffer) -> Self {
    Self {
      inner: Arc::new(RwLock::new(buffer)),
    }
  }

  pub fn len(&self) -> usize {
    self.inner.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.inner.read().is_empty()
  }

  pub fn push(&self, edit: Edit) {
    self.inner.write().push(edit);
  }

  /// Append `edit` only if the log still holds `expected_len` edits. Returns
  /// the new length.
  pub fn push_at(&self, expected_len: usize, edit: Edit) -> Result<usize> {
    let mut buffer = self.inner.write();
    let actual = buffer.len();
    if actual != expected_len {
      tracing::debug!(
        "rejecting edit for log length {}, log is at {}",
        expected_len,
        actual
      );
      return Err(BufferError::StaleLength {
        expected: expected_len,
        actual,
      });
    }

    buffer.push(edit);
    Ok(buffer.len())
  }

  pub fn insert(&self, text: impl Into<Tendril>, index: usize) {
    self.inner.write().insert(text, index);
  }

  pub fn replace(&self, text: impl Into<Tendril>, from: usize, to: usize) {
    self.inner.write().replace(text, from, to);
  }

  pub fn delete(&self, from: usize, to: usize) {
    self.inner.write().delete(from, to);
  }

  pub fn render(&self) -> Result<String> {
    self.inner.read().render()
  }

  /// Pin the current log length.
  pub fn snapshot(&self) -> Snapshot {
    Snapshot {
      len:    self.len(),
      buffer: self.clone(),
    }
  }
}

/// A fixed-length view of a [`SharedBuffer`].
#[derive(Debug, Clone)]
pub struct Snapshot {
  buffer: SharedBuffer,
  len:    usize,
}

impl Snapshot {
  /// Number of edits visible to this snapshot.
  pub fn len(&self) -> usize {
    self.len
  }

  pub fn is_empty(&self) -> bool {
    self.len == 0
  }

  pub fn render(&self) -> Result<String> {
    self.buffer.inner.read().render_prefix(self.len)
  }
}

#[cfg(test)]
mod test {
  use std::thread;

  use super::*;

  #[test]
  fn snapshot_ignores_later_edits() {
    let shared = SharedBuffer::default();
    shared.insert("Hello.", 0);
    let snapshot = shared.snapshot();

    shared.insert(", world", 5);

    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.render().unwrap(), "Hello.");
    assert_eq!(shared.render().unwrap(), "Hello, world.");
    assert_eq!(shared.snapshot().render().unwrap(), "Hello, world.");
  }

  #[test]
  fn push_at_rejects_stale_length() {
    let shared = SharedBuffer::new(Buffer::with_text("Hello, world."));
    assert_eq!(shared.push_at(0, Edit::delete(4, 6)), Ok(1));
    assert_eq!(
      shared.push_at(0, Edit::insert("!", 0)),
      Err(BufferError::StaleLength {
        expected: 0,
        actual:   1,
      })
    );

    assert_eq!(shared.len(), 1);
    assert_eq!(shared.render().unwrap(), "Hell world.");
  }

  #[test]
  fn readers_see_whole_prefixes() {
    let shared = SharedBuffer::default();
    let writer = {
      let shared = shared.clone();
      thread::spawn(move || {
        for _ in 0..100 {
          let len = shared.len();
          shared.push_at(len, Edit::insert("a", len)).unwrap();
        }
      })
    };

    for _ in 0..50 {
      let snapshot = shared.snapshot();
      assert_eq!(snapshot.render().unwrap(), "a".repeat(snapshot.len()));
    }

    writer.join().unwrap();
    assert_eq!(shared.render().unwrap(), "a".repeat(100));
  }

  #[test]
  fn mutations_go_through() {
    let shared = SharedBuffer::default();
    assert!(shared.is_empty());

    shared.insert("Hello, world.", 0);
    shared.replace("Goodbye", 0, 5);
    shared.delete(7, 15);
    shared.push(Edit::insert("!", 7));

    assert_eq!(shared.len(), 4);
    assert_eq!(shared.render().unwrap(), "Goodbye!");
  }
}
