//! Common trait for sequences supporting push/pop at the back and indexed reads.
//!
//! This module provides [`PushPopCollection`], a trait that abstracts over
//! collections with stack-like operations, allowing generic code to drive a
//! single [`RingBlock`], a whole [`BlockSequence`] or a standard `Vec` alike.
//!
//! [`RingBlock`]: crate::generic::ring_block::RingBlock
//! [`BlockSequence`]: crate::generic::block_sequence::BlockSequence

/// Error type for push/pop operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushPopError {
    /// The collection has reached its maximum capacity.
    Full,
}

/// A trait for collections that support push/pop operations and positional reads.
///
/// # Examples
///
/// ```rust
/// use saturn_sequence::generic::{block_sequence::BlockSequence, push_pop::PushPopCollection};
///
/// fn work_with_collection<C: PushPopCollection<i32>>(collection: &mut C) {
///     collection.push(42).unwrap();
///     collection.push(100).unwrap();
///     assert_eq!(collection.len(), 2);
///     assert_eq!(collection.get(0), Some(&42));
///     assert_eq!(collection.pop(), Some(100));
/// }
///
/// let mut sequence = BlockSequence::with_capacity(1);
/// work_with_collection(&mut sequence);
///
/// let mut vec = Vec::new();
/// work_with_collection(&mut vec);
/// ```
pub trait PushPopCollection<T> {
    /// Adds an element after the last one.
    ///
    /// Returns [`PushPopError::Full`] if the collection cannot grow.
    fn push(&mut self, item: T) -> Result<(), PushPopError>;

    /// Removes and returns the last element, or `None` if the collection is empty.
    fn pop(&mut self) -> Option<T>;

    /// Returns the element at `index`, or `None` if it is out of range.
    fn get(&self, index: usize) -> Option<&T>;

    /// Returns the number of elements in the collection.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Implementation for standard library [`Vec`].
///
/// This implementation never returns [`PushPopError::Full`] since `Vec` can grow dynamically.
impl<T> PushPopCollection<T> for Vec<T> {
    fn push(&mut self, item: T) -> Result<(), PushPopError> {
        Vec::push(self, item);
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        Vec::pop(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }
}
