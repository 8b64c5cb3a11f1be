use thiserror::Error;

/// Errors raised by a single [`RingBlock`].
///
/// These are only ever seen by code driving a block directly. The sequence
/// arranges capacity and validates indices before delegating, so a
/// `BlockError` reaching it means the packing invariant has been broken.
///
/// [`RingBlock`]: crate::generic::ring_block::RingBlock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum BlockError {
    /// The block already holds `capacity` elements.
    #[error("block is full (capacity {capacity})")]
    Full { capacity: usize },

    /// The block holds no elements.
    #[error("block is empty")]
    Empty,

    /// The logical offset lies outside the live range of the block.
    #[error("offset {offset} is out of bounds for a block holding {len} elements")]
    OutOfBounds { offset: usize, len: usize },

    /// A rotation was requested on a block that still has free slots.
    #[error("rotation requires a full block ({len} of {capacity} slots used)")]
    NotFull { len: usize, capacity: usize },
}

/// Errors surfaced by [`BlockSequence`] and its cursor.
///
/// [`BlockSequence`]: crate::generic::block_sequence::BlockSequence
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SequenceError {
    #[error("index {index} is out of bounds for a sequence of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An explicit capacity cannot hold the collection it was given.
    #[error("capacity {capacity} cannot hold the {required} supplied elements")]
    CapacityBelowSource { capacity: usize, required: usize },

    /// Explicit growth must strictly increase the capacity.
    #[error("new capacity {requested} does not exceed the current capacity {current}")]
    CapacityNotIncreased { requested: usize, current: usize },

    #[error("invalid growth policy: {reason}")]
    InvalidGrowthPolicy { reason: String },

    /// The cursor has no element to act on: neither `next` nor `previous`
    /// was called, or a structural change happened since.
    #[error("cursor has no current element")]
    NoCurrentElement,
}

impl SequenceError {
    /// Returns `true` for the variants caused by inconsistent construction or
    /// growth parameters.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            SequenceError::CapacityBelowSource { .. }
                | SequenceError::CapacityNotIncreased { .. }
                | SequenceError::InvalidGrowthPolicy { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = core::result::Result<T, SequenceError>;
