use std::{fmt, io};

/// Error type used by the tree serializer.
///
/// This type is re-exported as `tree_json::Error` and is returned by every
/// public writing API (for example `tree_json::write_array`).
///
/// For the typed operations (`write_array`, `write_object`, `write_nested_object`)
/// the input is always well formed, so the only failures are sink failures:
/// - `Format` wraps a `std::fmt::Error` produced when writing to a
///   `fmt::Write` target.
/// - `IO` wraps a `std::io::Error` produced when writing to an `io::Write`
///   target or a file.
///
/// The generic entry point accepts any `Serialize` type and may additionally
/// report `Message` (raised by user `Serialize` impls through
/// `S::Error::custom(...)`) and `KeyMustBeString`.
#[derive(Debug)]
pub enum Error {
    /// Free-form error.
    Message { msg: String },
    /// Wrapper for formatting errors.
    Format { error: fmt::Error },
    /// Wrapper for I/O errors.
    IO { error: io::Error },
    /// A map key serialized as something other than a string, integer, char or bool.
    KeyMustBeString,
    /// Options used would produce unusable output (zero-width indentation).
    InvalidOptions(String),
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Message {
            msg: msg.to_string(),
        }
    }
}

impl From<fmt::Error> for Error {
    fn from(error: fmt::Error) -> Self {
        Error::Format { error }
    }
}

impl From<io::Error> for Error {
    fn from(error: io::Error) -> Self {
        Error::IO { error }
    }
}

impl Error {
    /// True if the error came from the output sink rather than from the value.
    pub fn is_sink_failure(&self) -> bool {
        matches!(self, Error::Format { .. } | Error::IO { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Message { msg } => f.write_str(msg),
            Error::Format { error } => write!(f, "formatting error: {error}"),
            Error::IO { error } => write!(f, "I/O error: {error}"),
            Error::KeyMustBeString => f.write_str("map key must be a string"),
            Error::InvalidOptions(msg) => write!(f, "invalid serialization options: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Message { .. } => None,
            Error::Format { error } => Some(error),
            Error::IO { error } => Some(error),
            Error::KeyMustBeString => None,
            Error::InvalidOptions(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn sink_failures_are_classified() {
        assert!(Error::from(fmt::Error).is_sink_failure());
        assert!(Error::from(io::Error::other("disk full")).is_sink_failure());
        assert!(!Error::KeyMustBeString.is_sink_failure());
        assert!(!<Error as serde::ser::Error>::custom("custom").is_sink_failure());
    }

    #[test]
    fn io_error_keeps_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert_eq!(err.to_string(), "I/O error: closed");
        assert!(err.source().is_some());
    }
}
