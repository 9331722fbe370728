//! Pretty-printed JSON output for ordered collections.
//!
//! `tree-json` writes sorted sets and maps (and anything else that implements
//! `serde::Serialize`) as indented JSON with an exact, stable layout: one element per
//! line, a comma after every element but the last, closing brackets on their own line
//! and no trailing newline unless asked for.
//!
//! ```rust
//! use std::collections::BTreeSet;
//!
//! let numbers: BTreeSet<i32> = [3, 2, 1].into_iter().collect();
//! let mut out = String::new();
//! tree_json::write_array(&numbers, &mut out, 0)?;
//! assert_eq!(out, "[\n\t1,\n\t2,\n\t3\n]");
//! # Ok::<(), tree_json::Error>(())
//! ```
//!
//! The output is produced in the iteration order of the input. `BTreeSet` and
//! `BTreeMap` give ascending order; the writer never sorts.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write as _};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::ordered::{MapView, NestedView, SeqView};

mod float_format;
mod macros;
mod ordered;
pub mod ser;
mod ser_error;
mod ser_quoting;
mod serializer_options;
mod value;

pub use ordered::{Number, OrderedMap, OrderedSeq};
pub use ser::{Error, Result, TreeSerializer, TreeSerializer as Serializer};
pub use serializer_options::{Indent, SerializerOptions};
pub use value::Value;

// ------------------------------------------------------------
// Typed operations
// ------------------------------------------------------------

/// Write `elements` as a bracketed list, one number per line.
///
/// `indent` is the nesting level of the list: elements are indented `indent + 1`
/// units and the closing bracket `indent` units. The opening bracket is written at
/// the current position of `out`.
///
/// ```rust
/// let mut out = String::from("\t\"values\": ");
/// tree_json::write_array(&[1, 2], &mut out, 1)?;
/// assert_eq!(out, "\t\"values\": [\n\t\t1,\n\t\t2\n\t]");
/// # Ok::<(), tree_json::Error>(())
/// ```
pub fn write_array<S, W>(elements: &S, out: &mut W, indent: usize) -> Result<()>
where
    S: OrderedSeq + ?Sized,
    S::Item: Number,
    W: fmt::Write,
{
    write_array_with_options(elements, out, indent, SerializerOptions::default())
}

/// Like [`write_array`], with explicit [`SerializerOptions`].
pub fn write_array_with_options<S, W>(
    elements: &S,
    out: &mut W,
    indent: usize,
    options: SerializerOptions,
) -> Result<()>
where
    S: OrderedSeq + ?Sized,
    S::Item: Number,
    W: fmt::Write,
{
    write_with_options(&SeqView(elements), out, indent, options)
}

/// Write `entries` as a braced list of `"key": number` pairs, one per line.
///
/// ```rust
/// use std::collections::BTreeMap;
///
/// let counts = BTreeMap::from([("two", 2), ("one", 1)]);
/// let mut out = String::new();
/// tree_json::write_object(&counts, &mut out, 0)?;
/// assert_eq!(out, "{\n\t\"one\": 1,\n\t\"two\": 2\n}");
/// # Ok::<(), tree_json::Error>(())
/// ```
pub fn write_object<M, W>(entries: &M, out: &mut W, indent: usize) -> Result<()>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: Number,
    W: fmt::Write,
{
    write_object_with_options(entries, out, indent, SerializerOptions::default())
}

/// Like [`write_object`], with explicit [`SerializerOptions`].
pub fn write_object_with_options<M, W>(
    entries: &M,
    out: &mut W,
    indent: usize,
    options: SerializerOptions,
) -> Result<()>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: Number,
    W: fmt::Write,
{
    write_with_options(&MapView(entries), out, indent, options)
}

/// Write `entries` as a braced list whose values are bracketed lists of numbers.
///
/// Each nested list starts right after its key and is laid out one level deeper
/// than the key.
///
/// ```rust
/// use std::collections::{BTreeMap, BTreeSet};
///
/// let mut index = BTreeMap::new();
/// index.insert("hello".to_string(), BTreeSet::from([1]));
/// let mut out = String::new();
/// tree_json::write_nested_object(&index, &mut out, 0)?;
/// assert_eq!(out, "{\n\t\"hello\": [\n\t\t1\n\t]\n}");
/// # Ok::<(), tree_json::Error>(())
/// ```
pub fn write_nested_object<M, W>(entries: &M, out: &mut W, indent: usize) -> Result<()>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: OrderedSeq,
    <M::Value as OrderedSeq>::Item: Number,
    W: fmt::Write,
{
    write_nested_object_with_options(entries, out, indent, SerializerOptions::default())
}

/// Like [`write_nested_object`], with explicit [`SerializerOptions`].
pub fn write_nested_object_with_options<M, W>(
    entries: &M,
    out: &mut W,
    indent: usize,
    options: SerializerOptions,
) -> Result<()>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: OrderedSeq,
    <M::Value as OrderedSeq>::Item: Number,
    W: fmt::Write,
{
    write_with_options(&NestedView(entries), out, indent, options)
}

// ------------------------------------------------------------
// Generic entry points
// ------------------------------------------------------------

/// Write any serializable value (a sequence, a mapping or arbitrarily nested
/// combinations of both) starting at nesting level `indent`.
///
/// Sequences become bracketed lists and mappings braced lists; the layout rules are
/// the same as for the typed operations.
pub fn write<T, W>(value: &T, out: &mut W, indent: usize) -> Result<()>
where
    T: Serialize + ?Sized,
    W: fmt::Write,
{
    write_with_options(value, out, indent, SerializerOptions::default())
}

/// Like [`write`], with explicit [`SerializerOptions`].
pub fn write_with_options<T, W>(
    value: &T,
    out: &mut W,
    indent: usize,
    options: SerializerOptions,
) -> Result<()>
where
    T: Serialize + ?Sized,
    W: fmt::Write,
{
    let mut ser = TreeSerializer::with_options(out, options, indent)?;
    value.serialize(&mut ser)
}

/// Serialize a value into a `fmt::Write` sink at level 0.
pub fn to_fmt_writer<W: fmt::Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    write_with_options(value, out, 0, SerializerOptions::default())
}

/// Serialize a value into a `fmt::Write` sink at level 0, with options.
pub fn to_fmt_writer_with_options<W: fmt::Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
    options: SerializerOptions,
) -> Result<()> {
    write_with_options(value, out, 0, options)
}

/// Serialize a value into an `io::Write` sink at level 0.
///
/// Write failures of the sink are reported as [`Error::IO`] carrying the original
/// `io::Error`.
pub fn to_io_writer<W: io::Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    to_io_writer_with_options(out, value, SerializerOptions::default())
}

/// Serialize a value into an `io::Write` sink at level 0, with options.
pub fn to_io_writer_with_options<W: io::Write, T: Serialize + ?Sized>(
    out: &mut W,
    value: &T,
    options: SerializerOptions,
) -> Result<()> {
    let mut adapter = IoAdapter {
        inner: out,
        error: None,
    };
    let result = write_with_options(value, &mut adapter, 0, options);
    match (result, adapter.error.take()) {
        (Err(Error::Format { .. }), Some(error)) => Err(Error::IO { error }),
        (result, _) => result,
    }
}

/// Serialize a value to a new `String` at level 0.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    to_string_with_options(value, SerializerOptions::default())
}

/// Serialize a value to a new `String` at level 0, with options.
pub fn to_string_with_options<T: Serialize + ?Sized>(
    value: &T,
    options: SerializerOptions,
) -> Result<String> {
    let mut out = String::new();
    write_with_options(value, &mut out, 0, options)?;
    Ok(out)
}

/// Render `elements` as a bracketed list into a new `String`.
pub fn array_to_string<S>(elements: &S) -> Result<String>
where
    S: OrderedSeq + ?Sized,
    S::Item: Number,
{
    to_string(&SeqView(elements))
}

/// Like [`array_to_string`], with explicit [`SerializerOptions`].
pub fn array_to_string_with_options<S>(elements: &S, options: SerializerOptions) -> Result<String>
where
    S: OrderedSeq + ?Sized,
    S::Item: Number,
{
    to_string_with_options(&SeqView(elements), options)
}

/// Render `entries` as a braced list of numbers into a new `String`.
pub fn object_to_string<M>(entries: &M) -> Result<String>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: Number,
{
    to_string(&MapView(entries))
}

/// Like [`object_to_string`], with explicit [`SerializerOptions`].
pub fn object_to_string_with_options<M>(entries: &M, options: SerializerOptions) -> Result<String>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: Number,
{
    to_string_with_options(&MapView(entries), options)
}

/// Render `entries` as a braced list of bracketed lists into a new `String`.
pub fn nested_object_to_string<M>(entries: &M) -> Result<String>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: OrderedSeq,
    <M::Value as OrderedSeq>::Item: Number,
{
    to_string(&NestedView(entries))
}

// ------------------------------------------------------------
// File destinations
// ------------------------------------------------------------

/// Create (or truncate) the file at `path` and write `value` into it.
///
/// The file is written through a buffer and flushed before returning; it is closed
/// on every path out of this function, including errors. Options are validated
/// before the file is touched.
pub fn to_path<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    to_path_with_options(value, path, SerializerOptions::default())
}

/// Like [`to_path`], with explicit [`SerializerOptions`].
pub fn to_path_with_options<T, P>(value: &T, path: P, options: SerializerOptions) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    options.consistent()?;
    debug!(path = %path.display(), "creating output file");
    let mut writer = BufWriter::new(File::create(path)?);
    to_io_writer_with_options(&mut writer, value, options)?;
    writer.flush()?;
    debug!(path = %path.display(), "output file written");
    Ok(())
}

/// Write `elements` as a bracketed list to the file at `path`.
pub fn array_to_path<S, P>(elements: &S, path: P) -> Result<()>
where
    S: OrderedSeq + ?Sized,
    S::Item: Number,
    P: AsRef<Path>,
{
    to_path(&SeqView(elements), path)
}

/// Write `entries` as a braced list of numbers to the file at `path`.
pub fn object_to_path<M, P>(entries: &M, path: P) -> Result<()>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: Number,
    P: AsRef<Path>,
{
    to_path(&MapView(entries), path)
}

/// Write `entries` as a braced list of bracketed lists to the file at `path`.
pub fn nested_object_to_path<M, P>(entries: &M, path: P) -> Result<()>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: OrderedSeq,
    <M::Value as OrderedSeq>::Item: Number,
    P: AsRef<Path>,
{
    to_path(&NestedView(entries), path)
}

/// Like [`nested_object_to_path`], with explicit [`SerializerOptions`].
pub fn nested_object_to_path_with_options<M, P>(
    entries: &M,
    path: P,
    options: SerializerOptions,
) -> Result<()>
where
    M: OrderedMap + ?Sized,
    M::Key: AsRef<str>,
    M::Value: OrderedSeq,
    <M::Value as OrderedSeq>::Item: Number,
    P: AsRef<Path>,
{
    to_path_with_options(&NestedView(entries), path, options)
}

// ------------------------------------------------------------
// io::Write adapter
// ------------------------------------------------------------

/// Lets the `fmt::Write`-based serializer write into an `io::Write`, keeping the
/// first `io::Error` so it can be reported instead of the opaque `fmt::Error`.
struct IoAdapter<'a, W: io::Write> {
    inner: &'a mut W,
    error: Option<io::Error>,
}

impl<W: io::Write> fmt::Write for IoAdapter<'_, W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.inner.write_all(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}
