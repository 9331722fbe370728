//! Single-pass pretty-printing JSON serializer for ordered trees.
//!
//! Every container is laid out the same way, at any nesting depth:
//!
//! ```text
//! [            <- opener written at the current position
//! \t1,         <- one element per line at depth + 1, comma after all but the last
//! \t2
//! ]            <- closer on its own line at depth
//! ```
//!
//! Output follows the iteration order of the value being serialized (a `BTreeMap`
//! is emitted in key order, a `Vec` in index order). Nothing is sorted or buffered
//! and no intermediate document is built.

use serde::ser::{
    self, Serialize, SerializeMap, SerializeSeq, SerializeStruct, SerializeStructVariant,
    SerializeTuple, SerializeTupleStruct, SerializeTupleVariant, Serializer,
};
use std::fmt::{self, Write};

use crate::float_format::write_float_string;
use crate::ser_quoting::write_quoted;
use crate::serializer_options::{Indent, SerializerOptions};

// ------------------------------------------------------------
// Public API
// ------------------------------------------------------------

pub use crate::ser_error::Error;

/// Result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Core serializer used by every `write_*`, `to_*` and `*_to_path` entry point.
///
/// This type implements `serde::Serializer` and writes indented JSON text to a
/// `fmt::Write`. It is also re-exported from the crate root as
/// [`tree_json::Serializer`](crate::Serializer).
///
/// ## Example
///
/// ```rust
/// use serde::Serialize;
/// use std::collections::BTreeMap;
///
/// let mut scores = BTreeMap::new();
/// scores.insert("b", vec![2, 3]);
/// scores.insert("a", vec![1]);
///
/// let mut out = String::new();
/// let mut ser = tree_json::Serializer::new(&mut out);
/// scores.serialize(&mut ser)?;
///
/// assert_eq!(out, "{\n\t\"a\": [\n\t\t1\n\t],\n\t\"b\": [\n\t\t2,\n\t\t3\n\t]\n}");
/// # Ok::<(), tree_json::Error>(())
/// ```
pub struct TreeSerializer<'a, W: Write> {
    /// Destination writer where text is emitted.
    out: &'a mut W,
    /// Whitespace written once per nesting level.
    indent: Indent,
    /// Emit a newline after the outermost value.
    trailing_newline: bool,
    /// Indentation level of the value about to be serialized. Its closing
    /// bracket goes here, its elements one level deeper.
    depth: usize,
    /// Number of containers currently open (0 means we are at the top level).
    open: usize,
}

impl<'a, W: Write> TreeSerializer<'a, W> {
    /// Construct a `TreeSerializer` with default options writing to `out` at level 0.
    pub fn new(out: &'a mut W) -> Self {
        Self {
            out,
            indent: Indent::Tab,
            trailing_newline: false,
            depth: 0,
            open: 0,
        }
    }

    /// Construct a `TreeSerializer` whose top-level value starts at indentation `level`.
    ///
    /// The opening bracket is written at the current position of `out`; elements are
    /// indented `level + 1` units and the closing bracket `level` units.
    pub fn with_level(out: &'a mut W, level: usize) -> Self {
        let mut s = Self::new(out);
        s.depth = level;
        s
    }

    /// Construct a `TreeSerializer` from user-supplied [`SerializerOptions`].
    pub fn with_options(out: &'a mut W, options: SerializerOptions, level: usize) -> Result<Self> {
        options.consistent()?;
        let mut s = Self::with_level(out, level);
        s.indent = options.indent;
        s.trailing_newline = options.trailing_newline;
        Ok(s)
    }

    // -------- helpers --------

    /// Break the line and indent to `levels`.
    #[inline]
    fn newline_and_indent(&mut self, levels: usize) -> Result<()> {
        self.out.write_char('\n')?;
        self.indent.write_to(self.out, levels)
    }

    /// Called after every complete value; only the outermost one may add a newline.
    #[inline]
    fn end_of_value(&mut self) -> Result<()> {
        if self.open == 0 && self.trailing_newline {
            self.out.write_char('\n')?;
        }
        Ok(())
    }

    /// Write a scalar token and finish the value.
    #[inline]
    fn write_scalar(&mut self, token: &str) -> Result<()> {
        self.out.write_str(token)?;
        self.end_of_value()
    }

    /// Write the opening bracket of a container and return the depth of its closer.
    #[inline]
    fn open_container(&mut self, opener: char) -> Result<usize> {
        self.out.write_char(opener)?;
        self.open += 1;
        Ok(self.depth)
    }

    /// Write the closing bracket of a container opened at `depth`.
    ///
    /// Empty containers come out as the opener, a newline and the closer.
    #[inline]
    fn close_container(&mut self, depth: usize, closer: char) -> Result<()> {
        self.newline_and_indent(depth)?;
        self.out.write_char(closer)?;
        self.open -= 1;
        self.end_of_value()
    }

    /// Separate an element from the previous one and move to its line.
    #[inline]
    fn begin_element(&mut self, depth: usize, first: bool) -> Result<()> {
        if !first {
            self.out.write_char(',')?;
        }
        self.newline_and_indent(child_depth(depth)?)
    }

    /// Write a `"key": ` prefix for the entry of a mapping opened at `depth`.
    fn write_key(&mut self, depth: usize, first: bool, key: &str) -> Result<()> {
        self.begin_element(depth, first)?;
        write_quoted(self.out, key)?;
        self.out.write_str(": ")?;
        Ok(())
    }

    /// Serialize a child of the container opened at `depth`, one level deeper.
    fn serialize_child<T: ?Sized + Serialize>(&mut self, depth: usize, value: &T) -> Result<()> {
        let saved_depth = self.depth;
        self.depth = child_depth(depth)?;
        let result = value.serialize(&mut *self);
        self.depth = saved_depth;
        result
    }
}

/// Level of the elements of a container whose closer sits at `depth`.
#[inline]
fn child_depth(depth: usize) -> Result<usize> {
    depth
        .checked_add(1)
        .ok_or_else(|| Error::InvalidOptions(format!("Invalid indent: level {depth} is too deep")))
}

// ------------------------------------------------------------
// Impl Serializer for TreeSerializer
// ------------------------------------------------------------

impl<'a, 'b, W: Write> Serializer for &'a mut TreeSerializer<'b, W> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = SeqSer<'a, 'b, W>;
    type SerializeTuple = SeqSer<'a, 'b, W>;
    type SerializeTupleStruct = SeqSer<'a, 'b, W>;
    type SerializeTupleVariant = VariantSer<'a, 'b, W>;
    type SerializeMap = MapSer<'a, 'b, W>;
    type SerializeStruct = MapSer<'a, 'b, W>;
    type SerializeStructVariant = VariantSer<'a, 'b, W>;

    // -------- Scalars --------

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.write_scalar(if v { "true" } else { "false" })
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }
    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }
    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }
    fn serialize_i64(self, v: i64) -> Result<()> {
        write!(self.out, "{}", v)?;
        self.end_of_value()
    }
    fn serialize_i128(self, v: i128) -> Result<()> {
        write!(self.out, "{}", v)?;
        self.end_of_value()
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }
    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }
    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }
    fn serialize_u64(self, v: u64) -> Result<()> {
        write!(self.out, "{}", v)?;
        self.end_of_value()
    }
    fn serialize_u128(self, v: u128) -> Result<()> {
        write!(self.out, "{}", v)?;
        self.end_of_value()
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        write_float_string(self.out, v)?;
        self.end_of_value()
    }
    fn serialize_f64(self, v: f64) -> Result<()> {
        write_float_string(self.out, v)?;
        self.end_of_value()
    }

    fn serialize_char(self, v: char) -> Result<()> {
        let mut buf = [0u8; 4];
        self.serialize_str(v.encode_utf8(&mut buf))
    }
    fn serialize_str(self, v: &str) -> Result<()> {
        write_quoted(self.out, v)?;
        self.end_of_value()
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<()> {
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for b in v {
            SerializeSeq::serialize_element(&mut seq, b)?;
        }
        SerializeSeq::end(seq)
    }

    fn serialize_none(self) -> Result<()> {
        self.serialize_unit()
    }
    fn serialize_some<T: ?Sized + Serialize>(self, v: &T) -> Result<()> {
        v.serialize(self)
    }
    fn serialize_unit(self) -> Result<()> {
        self.write_scalar("null")
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.serialize_unit()
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<()> {
        // Externally tagged: {"Variant": value}
        let depth = self.open_container('{')?;
        self.write_key(depth, true, variant)?;
        self.serialize_child(depth, value)?;
        self.close_container(depth, '}')
    }

    // -------- Containers --------

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        let depth = self.open_container('[')?;
        Ok(SeqSer {
            ser: self,
            depth,
            first: true,
        })
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        VariantSer::begin(self, variant, '[')
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        let depth = self.open_container('{')?;
        Ok(MapSer {
            ser: self,
            depth,
            first: true,
        })
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        self.serialize_map(Some(len))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        VariantSer::begin(self, variant, '{')
    }
}

// ------------------------------------------------------------
// Seq / Tuple serializers
// ------------------------------------------------------------

/// Serializer for sequences, tuples and tuple-structs.
///
/// Created by `TreeSerializer::serialize_seq`. Holds a mutable reference to the
/// parent serializer and the layout state of the list being written.
pub struct SeqSer<'a, 'b, W: Write> {
    /// Parent serializer.
    ser: &'a mut TreeSerializer<'b, W>,
    /// Indentation of the closing bracket; elements go one level deeper.
    depth: usize,
    /// Whether the next element is the first (no comma before it).
    first: bool,
}

impl<'a, 'b, W: Write> SerializeSeq for SeqSer<'a, 'b, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, v: &T) -> Result<()> {
        self.ser.begin_element(self.depth, self.first)?;
        self.ser.serialize_child(self.depth, v)?;
        self.first = false;
        Ok(())
    }

    fn end(self) -> Result<()> {
        self.ser.close_container(self.depth, ']')
    }
}

impl<'a, 'b, W: Write> SerializeTuple for SeqSer<'a, 'b, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T: ?Sized + Serialize>(&mut self, v: &T) -> Result<()> {
        SerializeSeq::serialize_element(self, v)
    }
    fn end(self) -> Result<()> {
        SerializeSeq::end(self)
    }
}

impl<'a, 'b, W: Write> SerializeTupleStruct for SeqSer<'a, 'b, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, v: &T) -> Result<()> {
        SerializeSeq::serialize_element(self, v)
    }
    fn end(self) -> Result<()> {
        SerializeSeq::end(self)
    }
}

// ------------------------------------------------------------
// Map / Struct serializers
// ------------------------------------------------------------

/// Serializer for maps and structs.
///
/// Created by `TreeSerializer::serialize_map`/`serialize_struct`. Writes one
/// `"key": value` entry per line.
pub struct MapSer<'a, 'b, W: Write> {
    /// Parent serializer.
    ser: &'a mut TreeSerializer<'b, W>,
    /// Indentation of the closing brace; entries go one level deeper.
    depth: usize,
    /// Whether the next entry is the first (no comma before it).
    first: bool,
}

impl<'a, 'b, W: Write> SerializeMap for MapSer<'a, 'b, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        let text = scalar_key_to_string(key)?;
        self.ser.write_key(self.depth, self.first, &text)?;
        self.first = false;
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.ser.serialize_child(self.depth, value)
    }

    fn end(self) -> Result<()> {
        self.ser.close_container(self.depth, '}')
    }
}

impl<'a, 'b, W: Write> SerializeStruct for MapSer<'a, 'b, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.ser.write_key(self.depth, self.first, key)?;
        self.first = false;
        self.ser.serialize_child(self.depth, value)
    }
    fn end(self) -> Result<()> {
        SerializeMap::end(self)
    }
}

// ------------------------------------------------------------
// Tuple / struct variants
// ------------------------------------------------------------

/// Serializer for tuple and struct enum variants.
///
/// The variant is written externally tagged, as a single-entry mapping whose value
/// is the list (`[`) or mapping (`{`) of the variant's fields:
///
/// ```text
/// {
///     "Variant": [
///         1,
///         2
///     ]
/// }
/// ```
pub struct VariantSer<'a, 'b, W: Write> {
    /// Parent serializer.
    ser: &'a mut TreeSerializer<'b, W>,
    /// Indentation of the inner closer; the outer brace closes one level up.
    depth: usize,
    /// `]` for tuple variants, `}` for struct variants.
    closer: char,
    /// Whether the next field is the first (no comma before it).
    first: bool,
}

impl<'a, 'b, W: Write> VariantSer<'a, 'b, W> {
    fn begin(ser: &'a mut TreeSerializer<'b, W>, variant: &str, opener: char) -> Result<Self> {
        let outer = ser.open_container('{')?;
        ser.write_key(outer, true, variant)?;
        let saved_depth = ser.depth;
        ser.depth = outer + 1;
        let depth = ser.open_container(opener)?;
        ser.depth = saved_depth;
        let closer = if opener == '[' { ']' } else { '}' };
        Ok(Self {
            ser,
            depth,
            closer,
            first: true,
        })
    }

    fn finish(self) -> Result<()> {
        self.ser.close_container(self.depth, self.closer)?;
        self.ser.close_container(self.depth - 1, '}')
    }
}

impl<'a, 'b, W: Write> SerializeTupleVariant for VariantSer<'a, 'b, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(&mut self, v: &T) -> Result<()> {
        self.ser.begin_element(self.depth, self.first)?;
        self.ser.serialize_child(self.depth, v)?;
        self.first = false;
        Ok(())
    }
    fn end(self) -> Result<()> {
        self.finish()
    }
}

impl<'a, 'b, W: Write> SerializeStructVariant for VariantSer<'a, 'b, W> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T: ?Sized + Serialize>(
        &mut self,
        key: &'static str,
        value: &T,
    ) -> Result<()> {
        self.ser.write_key(self.depth, self.first, key)?;
        self.first = false;
        self.ser.serialize_child(self.depth, value)
    }
    fn end(self) -> Result<()> {
        self.finish()
    }
}

// ------------------------------------------------------------
// Key scalar helper
// ------------------------------------------------------------

/// Serialize a key using a restricted scalar-only serializer into a `String`.
///
/// Strings and chars are taken as is; integers and booleans are rendered as their
/// text so they can be quoted like any other key. Anything else is rejected.
fn scalar_key_to_string<K: Serialize + ?Sized>(key: &K) -> Result<String> {
    let mut s = String::new();
    key.serialize(&mut KeyScalarSink { s: &mut s })?;
    Ok(s)
}

struct KeyScalarSink<'a> {
    s: &'a mut String,
}

impl<'a, 'b> Serializer for &'a mut KeyScalarSink<'b> {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = ser::Impossible<(), Error>;
    type SerializeTuple = ser::Impossible<(), Error>;
    type SerializeTupleStruct = ser::Impossible<(), Error>;
    type SerializeTupleVariant = ser::Impossible<(), Error>;
    type SerializeMap = ser::Impossible<(), Error>;
    type SerializeStruct = ser::Impossible<(), Error>;
    type SerializeStructVariant = ser::Impossible<(), Error>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.s.push_str(if v { "true" } else { "false" });
        Ok(())
    }
    fn serialize_i64(self, v: i64) -> Result<()> {
        write!(self.s, "{}", v)?;
        Ok(())
    }
    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(v as i64)
    }
    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(v as i64)
    }
    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(v as i64)
    }
    fn serialize_i128(self, v: i128) -> Result<()> {
        write!(self.s, "{}", v)?;
        Ok(())
    }
    fn serialize_u64(self, v: u64) -> Result<()> {
        write!(self.s, "{}", v)?;
        Ok(())
    }
    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(v as u64)
    }
    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(v as u64)
    }
    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(v as u64)
    }
    fn serialize_u128(self, v: u128) -> Result<()> {
        write!(self.s, "{}", v)?;
        Ok(())
    }
    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_char(self, v: char) -> Result<()> {
        self.s.push(v);
        Ok(())
    }
    fn serialize_str(self, v: &str) -> Result<()> {
        self.s.push_str(v);
        Ok(())
    }
    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_none(self) -> Result<()> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_some<T: ?Sized + Serialize>(self, v: &T) -> Result<()> {
        v.serialize(self)
    }
    fn serialize_unit(self) -> Result<()> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _idx: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.serialize_str(variant)
    }
    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<()> {
        // Transparent, so `struct Word(String);` works as a key.
        value.serialize(self)
    }
    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: &T,
    ) -> Result<()> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_seq(self, _len: Option<usize>) -> Result<ser::Impossible<(), Error>> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_tuple(self, _len: usize) -> Result<ser::Impossible<(), Error>> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_tuple_struct(
        self,
        _: &'static str,
        _: usize,
    ) -> Result<ser::Impossible<(), Error>> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_tuple_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<ser::Impossible<(), Error>> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_map(self, _len: Option<usize>) -> Result<ser::Impossible<(), Error>> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<ser::Impossible<(), Error>> {
        Err(Error::KeyMustBeString)
    }
    fn serialize_struct_variant(
        self,
        _: &'static str,
        _: u32,
        _: &'static str,
        _: usize,
    ) -> Result<ser::Impossible<(), Error>> {
        Err(Error::KeyMustBeString)
    }
    fn collect_str<T: ?Sized + fmt::Display>(self, v: &T) -> Result<()> {
        write!(self.s, "{}", v)?;
        Ok(())
    }
}
