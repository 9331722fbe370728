//! Public macros for constructing option structs without relying on struct literal syntax.
//!
//! These macros keep call sites ergonomic while allowing the crate to add fields to
//! [`crate::SerializerOptions`] without forcing breaking changes.

/// Construct [`crate::SerializerOptions`] from `Default` and a list of field assignments.
///
/// Example:
///
/// ```rust
/// let opts = tree_json::serializer_options! {
///     indent: tree_json::Indent::Spaces(2),
///     trailing_newline: true,
/// };
/// assert!(opts.trailing_newline);
/// ```
#[macro_export]
macro_rules! serializer_options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        let mut opt = $crate::SerializerOptions::default();
        $(
            {
                opt.$field = $value;
            }
        )*
        opt
    }};
}

/// Short alias for [`serializer_options!`].
#[macro_export]
macro_rules! ser_options {
    ( $( $field:ident : $value:expr ),* $(,)? ) => {{
        $crate::serializer_options! { $( $field : $value ),* }
    }};
}
