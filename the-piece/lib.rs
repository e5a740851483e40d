//! An editable text document stored as an append-only log of edits.
//!
//! Every edit is recorded as a small [`Edit`](piece::Edit) value and the
//! current text is reconstructed by replaying the whole log over a base
//! [`Piece`](piece::Piece):
//!
//! ```ignore
//! use the_piece::buffer::Buffer;
//!
//! let mut buffer = Buffer::new();
//! buffer.insert("Hello, world.", 0);
//! buffer.delete(4, 6);
//! assert_eq!(buffer.render()?, "Hell world.");
//! ```
//!
//! Indices are character offsets into whatever text the edit is merged into,
//! not stable document positions. Edits that land outside the text are padded
//! with a filler character (see [`MergeConfig`](config::MergeConfig)).

use smartstring::{
  LazyCompact,
  SmartString,
};

pub mod buffer;
pub mod config;
pub mod piece;
pub mod shared;

pub type Tendril = SmartString<LazyCompact>;
