//! Serializer options for tree output.
//!
//! Controls the indentation unit and whether the outermost value is followed by a newline.
//!
//! Example: use 2-space indentation and end the output with a newline.
//!
//! ```rust
//! use std::collections::BTreeSet;
//! use tree_json::Indent;
//!
//! let numbers: BTreeSet<i32> = [2, 1].into_iter().collect();
//! let opts = tree_json::ser_options! {
//!     indent: Indent::Spaces(2),
//!     trailing_newline: true,
//! };
//! let out = tree_json::array_to_string_with_options(&numbers, opts).unwrap();
//! assert_eq!(out, "[\n  1,\n  2\n]\n");
//! ```

use std::fmt::Write;

use crate::ser_error::Error;

/// Whitespace written once per nesting level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Indent {
    /// One horizontal tab per level (the default).
    #[default]
    Tab,
    /// The given number of spaces per level. Zero is rejected.
    Spaces(usize),
}

impl Indent {
    /// Write `levels` indentation units to `out`.
    ///
    /// Fails with [`Error::InvalidOptions`] when the total width does not fit in `usize`.
    pub(crate) fn write_to<W: Write>(self, out: &mut W, levels: usize) -> Result<(), Error> {
        let (unit, width) = match self {
            Indent::Tab => ('\t', Some(levels)),
            Indent::Spaces(n) => (' ', n.checked_mul(levels)),
        };
        let width = width.ok_or_else(|| {
            Error::InvalidOptions(format!("Invalid indent: {levels} levels of {self:?} overflow"))
        })?;
        for _ in 0..width {
            out.write_char(unit)?;
        }
        Ok(())
    }
}

/// Serializer options for tree output.
///
/// Construct `SerializerOptions` using [`Default`] or the
/// [`ser_options!`](crate::ser_options!) macro so that new fields can be added
/// without breaking call sites.
///
/// ```rust
/// use std::collections::BTreeMap;
/// use tree_json::{ser_options, Indent};
///
/// let mut counts = BTreeMap::new();
/// counts.insert("one".to_string(), 1);
///
/// let options = ser_options! { indent: Indent::Spaces(4) };
/// let out = tree_json::object_to_string_with_options(&counts, options).unwrap();
/// assert_eq!(out, "{\n    \"one\": 1\n}");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SerializerOptions {
    /// Indentation unit repeated once per nesting level (`Indent::Tab` by default).
    pub indent: Indent,
    /// When enabled, a single newline follows the outermost closing bracket.
    /// Off by default: the output ends with the bracket itself.
    pub trailing_newline: bool,
}

impl SerializerOptions {
    pub(crate) fn consistent(&self) -> Result<(), Error> {
        if self.indent == Indent::Spaces(0) {
            return Err(Error::InvalidOptions(
                "Invalid indent: number of spaces must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for SerializerOptions {
    fn default() -> Self {
        Self {
            indent: Indent::Tab,
            trailing_newline: false,
        }
    }
}
