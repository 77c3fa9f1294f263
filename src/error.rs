//! Error types returned when constructing a [`Uuid`](crate::Uuid).

/// A result type defaulting to this crate's [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while constructing a [`Uuid`](crate::Uuid) from external input.
///
/// Field extraction on identifiers of a foreign version never produces an error; see
/// [`Uuid::process_id`](crate::Uuid::process_id) and its siblings.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The byte input was not exactly 16 bytes long.
    #[error("invalid UUID length: expected 16 bytes, found {len}")]
    InvalidLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// No input was supplied where a value is required.
    #[error("tried to construct UUID from null input")]
    NullInput,

    /// The text input does not follow the 8-4-4-4-12 hexadecimal format.
    #[error("attempted to parse malformed UUID: {input:?}")]
    MalformedIdentifier {
        /// The rejected input, after whitespace trimming.
        input: String,
    },
}
