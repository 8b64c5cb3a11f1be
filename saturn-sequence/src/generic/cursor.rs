//! Bidirectional cursor over a [`BlockSequence`].
//!
//! A [`CursorMut`] sits *between* elements, like a text caret: `next` returns
//! the element after it and moves forward, `previous` returns the element
//! before it and moves back. `set` and `remove` act on whichever element was
//! returned last; `insert` places a new element at the cursor position.
//! Structural changes go through the ordinary [`BlockSequence::insert`] and
//! [`BlockSequence::remove`] at the cursor's index.

use crate::error::{Result, SequenceError};
use crate::generic::block_sequence::BlockSequence;

/// A mutable cursor over a [`BlockSequence`].
///
/// # Examples
///
/// ```rust
/// use saturn_sequence::generic::block_sequence::BlockSequence;
///
/// let mut sequence: BlockSequence<u32> = (1..=5).collect();
/// let mut cursor = sequence.cursor();
///
/// while let Some(&value) = cursor.next() {
///     if value % 2 == 0 {
///         cursor.remove().unwrap();
///     } else {
///         cursor.set(value * 10).unwrap();
///     }
/// }
/// cursor.insert(60).unwrap();
///
/// assert_eq!(sequence.to_vec(), vec![10, 30, 50, 60]);
/// ```
pub struct CursorMut<'a, T> {
    sequence: &'a mut BlockSequence<T>,
    index: usize,
    last: Option<usize>,
}

impl<'a, T> CursorMut<'a, T> {
    pub(crate) fn new(sequence: &'a mut BlockSequence<T>, index: usize) -> Self {
        Self {
            sequence,
            index,
            last: None,
        }
    }

    pub fn has_next(&self) -> bool {
        self.index < self.sequence.len()
    }

    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Index of the element `next` would return.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Index of the element `previous` would return, if any.
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Returns the element after the cursor and moves past it.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<&T> {
        if !self.has_next() {
            return None;
        }
        let current = self.index;
        self.index += 1;
        self.last = Some(current);
        self.sequence.get(current).ok()
    }

    /// Returns the element before the cursor and moves back over it.
    pub fn previous(&mut self) -> Option<&T> {
        let current = self.previous_index()?;
        self.index = current;
        self.last = Some(current);
        self.sequence.get(current).ok()
    }

    /// Replaces the element last returned by `next` or `previous`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NoCurrentElement`] if no element has been
    /// returned since the cursor was created or last changed the structure.
    pub fn set(&mut self, value: T) -> Result<T> {
        let current = self.last.ok_or(SequenceError::NoCurrentElement)?;
        self.sequence.set(current, value)
    }

    /// Inserts `value` at the cursor; the cursor ends up after it, so a
    /// following `next` is unaffected.
    pub fn insert(&mut self, value: T) -> Result<()> {
        self.sequence.insert(self.index, value)?;
        self.index += 1;
        self.last = None;
        Ok(())
    }

    /// Removes the element last returned by `next` or `previous`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::NoCurrentElement`] if there is no such element.
    pub fn remove(&mut self) -> Result<T> {
        let current = self.last.ok_or(SequenceError::NoCurrentElement)?;
        let removed = self.sequence.remove(current)?;
        if current < self.index {
            self.index -= 1;
        }
        self.last = None;
        Ok(removed)
    }
}
