use thiserror::Error;

/// A state-access argument outside the bounds of the 1600-bit state.
///
/// Only the `try_*` methods of [`KeccakF1600State`](crate::KeccakF1600State) report these; the
/// unchecked methods treat the same conditions as caller bugs.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateAccessError {
    /// The lane position is not in `0..25`.
    #[error("lane position {0} is outside the 25-lane state")]
    LanePosition(usize),

    /// The byte range does not fit inside one lane.
    #[error("byte range starting at {offset} with length {length} does not fit in an 8-byte lane")]
    LaneByteRange { offset: usize, length: usize },

    /// More lanes were requested than the state holds.
    #[error("lane count {0} exceeds the 25-lane state")]
    LaneCount(usize),

    /// The caller's buffer is shorter than the lanes it is supposed to carry.
    #[error("buffer of {len} bytes is too short for {required} bytes")]
    BufferTooShort { len: usize, required: usize },

    /// A batch buffer is not exactly one stride per state.
    #[error("batch buffer of {len} bytes, expected exactly {required} bytes")]
    BatchLength { len: usize, required: usize },

    /// The bit position is not in `0..1600`.
    #[error("bit position {0} is outside the 1600-bit state")]
    BitPosition(usize),
}

pub type StateAccessResult<T> = core::result::Result<T, StateAccessError>;
