/// Everything that can go wrong while building arrays or touching their
/// storage.
///
/// Every variant signals a programming error at the call site. Nothing in
/// this crate retries or recovers; an operation that fails leaves no partial
/// result behind.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A provider was given a buffer whose length disagrees with its shape.
    #[error("shape and buffer sizes do not match: shape holds {shape_size} elements, buffer holds {buffer_size}")]
    ShapeMismatch { shape_size: usize, buffer_size: usize },

    /// A fixed-length sequence was built from a source of the wrong length.
    #[error("sequence constructed from range of wrong size: expected {expected}, got {got}")]
    WrongLength { expected: usize, got: usize },

    /// Checked buffer access past the end.
    #[error("buffer index out of range on index {offset} / {count}")]
    OutOfRange { offset: usize, count: usize },

    /// A member of a zipped provider disagrees with the first member's shape.
    #[error("zipped member {member} has shape {got:?}, expected {expected:?}")]
    ZipShapeMismatch {
        member: usize,
        expected: Vec<usize>,
        got: Vec<usize>,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
