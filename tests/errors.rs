use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::io;

use serde::{Serialize, Serializer};
use tree_json::{Error, Indent, ser_options};

/// A `fmt::Write` sink that accepts `capacity` bytes and then refuses everything.
struct FullSink {
    written: String,
    capacity: usize,
}

impl fmt::Write for FullSink {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.written.len() + s.len() > self.capacity {
            return Err(fmt::Error);
        }
        self.written.push_str(s);
        Ok(())
    }
}

/// An `io::Write` sink that behaves like a closed stream.
struct ClosedStream;

impl io::Write for ClosedStream {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream closed"))
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn fmt_sink_failure_propagates() {
    let set = BTreeSet::from([1, 2, 3]);
    let mut sink = FullSink {
        written: String::new(),
        capacity: 5,
    };
    let err = tree_json::write_array(&set, &mut sink, 0).unwrap_err();
    assert!(matches!(err, Error::Format { .. }), "{err:?}");
    assert!(err.is_sink_failure());
    // Whatever fit stays in the sink; nothing is rolled back.
    assert_eq!(sink.written, "[\n\t1,");
}

#[test]
fn io_sink_failure_keeps_the_io_error() {
    let map = BTreeMap::from([("a".to_string(), BTreeSet::from([1]))]);
    let err = tree_json::to_io_writer(&mut ClosedStream, &map).unwrap_err();
    match err {
        Error::IO { error } => assert_eq!(error.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn io_writer_success() -> anyhow::Result<()> {
    let mut buf = Vec::new();
    tree_json::to_io_writer(&mut buf, &BTreeSet::from([2, 1]))?;
    assert_eq!(String::from_utf8(buf)?, "[\n\t1,\n\t2\n]");
    Ok(())
}

#[test]
fn unwritable_destination() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.json");
    let err = tree_json::array_to_path(&BTreeSet::from([1]), &path).unwrap_err();
    match err {
        Error::IO { error } => assert_eq!(error.kind(), io::ErrorKind::NotFound),
        other => panic!("expected I/O error, got {other:?}"),
    }
}

#[test]
fn zero_width_indent_is_rejected_before_writing() {
    let opts = ser_options! { indent: Indent::Spaces(0) };

    let mut out = String::new();
    let err = tree_json::write_array_with_options(&[1], &mut out, 0, opts).unwrap_err();
    assert!(matches!(err, Error::InvalidOptions(_)));
    assert!(out.is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never.json");
    let index: BTreeMap<String, Vec<i32>> = BTreeMap::new();
    let err = tree_json::nested_object_to_path_with_options(&index, &path, opts).unwrap_err();
    assert!(matches!(err, Error::InvalidOptions(_)));
    assert!(!path.exists());
}

#[test]
fn indentation_overflow_is_an_error() {
    let mut out = String::new();
    let err = tree_json::write_array(&[1], &mut out, usize::MAX).unwrap_err();
    assert!(matches!(err, Error::InvalidOptions(_)), "{err:?}");
    assert!(!err.is_sink_failure());
    assert_eq!(out, "[");

    let opts = ser_options! { indent: Indent::Spaces(usize::MAX / 2 + 1) };
    let mut out = String::new();
    let err = tree_json::write_array_with_options(&[1], &mut out, 1, opts).unwrap_err();
    assert!(matches!(err, Error::InvalidOptions(_)), "{err:?}");
}

#[test]
fn non_string_keys_are_rejected() {
    let map = BTreeMap::from([((1, 2), "pair")]);
    let err = tree_json::to_string(&map).unwrap_err();
    assert!(matches!(err, Error::KeyMustBeString));
    assert!(!err.is_sink_failure());
}

struct Refuses;

impl Serialize for Refuses {
    fn serialize<S: Serializer>(&self, _s: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("refused to serialize"))
    }
}

#[test]
fn custom_errors_surface_unchanged() {
    let err = tree_json::to_string(&vec![Refuses]).unwrap_err();
    assert_eq!(err.to_string(), "refused to serialize");
    assert!(matches!(err, Error::Message { .. }));
}
