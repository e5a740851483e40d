use std::borrow::Cow;

use the_piece::{
  buffer::Buffer,
  config::MergeConfig,
  piece::{
    Edit,
    Piece,
    merge,
  },
  shared::SharedBuffer,
};

fn base() -> Piece {
  Piece::new("This is a test")
}

fn merged(base: &Piece, edit: Edit) -> String {
  merge(base, &edit, &MergeConfig::default())
    .unwrap()
    .into_owned()
    .text
}

#[test]
fn merge_scenarios() {
  assert_eq!(
    merged(&base(), Edit::from_record(Some(" successful".into()), 9, 9)),
    "This is a successful test"
  );
  assert_eq!(
    merged(&base(), Edit::from_record(Some("the".into()), 8, 9)),
    "This is the test"
  );
  assert_eq!(
    merged(&base(), Edit::from_record(None, 9, 4)),
    "This test"
  );

  let shifted = base().with_position(5, 5);
  let result = merge(&shifted, &Edit::from_record(None, 4, 0), &MergeConfig::default()).unwrap();
  assert!(matches!(result, Cow::Borrowed(piece) if std::ptr::eq(piece, &shifted)));
  assert_eq!(result.text, "This is a test");
}

#[test]
fn buffer_scenarios() {
  let mut buffer = Buffer::new();
  buffer.insert("Hello.", 0);
  buffer.insert(", world", 5);
  assert_eq!(buffer.render().unwrap(), "Hello, world.");

  let mut buffer = Buffer::new();
  buffer.insert("Hello, world.", 0);
  buffer.delete(4, 6);
  assert_eq!(buffer.render().unwrap(), "Hell world.");
}

#[test]
fn configured_from_toml() {
  let config = MergeConfig::from_toml(
    r#"
      filler = "_"
      bound_check = "literal"
    "#,
  )
  .unwrap();

  let mut buffer = Buffer::with_text("ab").with_config(config);
  buffer.insert("c", 5);
  buffer.replace("Z", 0, 1);
  assert_eq!(buffer.render().unwrap(), "Zb___c");
}

#[test]
fn shared_snapshot_replays_prefix() {
  let shared = SharedBuffer::new(Buffer::with_text("Hello, world."));
  let before = shared.snapshot();
  shared.replace("Goodbye", 0, 5);

  assert_eq!(before.render().unwrap(), "Hello, world.");
  assert_eq!(shared.render().unwrap(), "Goodbye, world.");
}
