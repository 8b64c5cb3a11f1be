//! Fixed-capacity double-ended ring buffer.
//!
//! This module provides [`RingBlock`], the leaf storage unit of a
//! [`BlockSequence`]. A block owns exactly `capacity` preallocated slots and a
//! rotation cursor (`origin`) naming the physical slot that holds logical
//! offset 0. Logical offset `i` lives in physical slot `(origin + i) % capacity`.
//!
//! [`BlockSequence`]: crate::generic::block_sequence::BlockSequence

use crate::error::BlockError;
use crate::generic::push_pop::{PushPopCollection, PushPopError};

/// A fixed-capacity ring buffer with O(1) access and O(1) push/pop at both ends.
///
/// Interior insertion and removal shift whichever side of the offset is
/// shorter, costing O(min(offset, len - offset)). Storage is allocated once in
/// [`RingBlock::new`] and never reallocated.
///
/// # Examples
///
/// ```rust
/// use saturn_sequence::generic::ring_block::RingBlock;
///
/// let mut block: RingBlock<u32> = RingBlock::new(4);
///
/// block.push_back(2).unwrap();
/// block.push_front(1).unwrap();
/// block.insert_at(2, 3).unwrap();
/// assert_eq!(block.get(0), Some(&1));
/// assert_eq!(block.get(2), Some(&3));
///
/// assert_eq!(block.pop_front(), Ok(1));
/// assert_eq!(block.len(), 2);
/// ```
#[derive(Clone)]
pub struct RingBlock<T> {
    slots: Box<[Option<T>]>,
    origin: usize,
    len: usize,
}

impl<T> RingBlock<T> {
    /// Creates an empty block with room for exactly `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: std::iter::repeat_with(|| None).take(capacity).collect(),
            origin: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Maps a logical offset to its physical slot.
    ///
    /// Only valid while the block has at least one slot.
    fn physical(&self, offset: usize) -> usize {
        (self.origin + offset) % self.capacity()
    }

    /// Moves the rotation cursor one slot toward the back of storage.
    fn retreat_origin(&mut self) {
        self.origin = (self.origin + self.capacity() - 1) % self.capacity();
    }

    fn advance_origin(&mut self) {
        self.origin = (self.origin + 1) % self.capacity();
    }

    fn full_error(&self) -> BlockError {
        BlockError::Full {
            capacity: self.capacity(),
        }
    }

    fn out_of_bounds(&self, offset: usize) -> BlockError {
        BlockError::OutOfBounds {
            offset,
            len: self.len,
        }
    }

    /// Returns the element at logical `offset`, or `None` if it is not live.
    pub fn get(&self, offset: usize) -> Option<&T> {
        if offset >= self.len {
            return None;
        }
        self.slots[self.physical(offset)].as_ref()
    }

    pub fn get_mut(&mut self, offset: usize) -> Option<&mut T> {
        if offset >= self.len {
            return None;
        }
        let slot = self.physical(offset);
        self.slots[slot].as_mut()
    }

    /// Replaces the element at `offset`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::OutOfBounds`] if `offset >= len`.
    pub fn set(&mut self, offset: usize, value: T) -> Result<T, BlockError> {
        if offset >= self.len {
            return Err(self.out_of_bounds(offset));
        }
        let slot = self.physical(offset);
        self.slots[slot]
            .replace(value)
            .ok_or(BlockError::OutOfBounds {
                offset,
                len: self.len,
            })
    }

    /// Appends `value` after the last element.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Full`] if the block is at capacity; `value` is
    /// dropped.
    pub fn push_back(&mut self, value: T) -> Result<(), BlockError> {
        if self.is_full() {
            return Err(self.full_error());
        }
        let slot = self.physical(self.len);
        self.slots[slot] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Prepends `value` before the first element, moving the origin back by one.
    pub fn push_front(&mut self, value: T) -> Result<(), BlockError> {
        if self.is_full() {
            return Err(self.full_error());
        }
        self.retreat_origin();
        self.slots[self.origin] = Some(value);
        self.len += 1;
        Ok(())
    }

    pub fn pop_back(&mut self) -> Result<T, BlockError> {
        if self.is_empty() {
            return Err(BlockError::Empty);
        }
        let slot = self.physical(self.len - 1);
        self.len -= 1;
        self.slots[slot].take().ok_or(BlockError::Empty)
    }

    /// Removes the first element, advancing the origin by one.
    pub fn pop_front(&mut self) -> Result<T, BlockError> {
        if self.is_empty() {
            return Err(BlockError::Empty);
        }
        let value = self.slots[self.origin].take();
        self.advance_origin();
        self.len -= 1;
        value.ok_or(BlockError::Empty)
    }

    /// Inserts `value` at logical `offset`, shifting the shorter side.
    ///
    /// Offsets in the first half move the preceding elements one slot toward
    /// the front (the origin retreats); otherwise the following elements move
    /// one slot toward the back.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::Full`] if there is no free slot and
    /// [`BlockError::OutOfBounds`] if `offset > len`. In both cases the block
    /// is unchanged and `value` is dropped.
    pub fn insert_at(&mut self, offset: usize, value: T) -> Result<(), BlockError> {
        if self.is_full() {
            return Err(self.full_error());
        }
        if offset > self.len {
            return Err(self.out_of_bounds(offset));
        }

        if offset < self.len / 2 {
            // The free slot before the origin becomes logical 0; slide the
            // hole forward until it sits at `offset`.
            self.retreat_origin();
            for i in 0..offset {
                let (dst, src) = (self.physical(i), self.physical(i + 1));
                self.slots.swap(dst, src);
            }
        } else {
            for i in (offset..self.len).rev() {
                let (dst, src) = (self.physical(i + 1), self.physical(i));
                self.slots.swap(dst, src);
            }
        }

        let slot = self.physical(offset);
        self.slots[slot] = Some(value);
        self.len += 1;
        Ok(())
    }

    /// Removes and returns the element at logical `offset`, closing the gap
    /// from the shorter side.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::OutOfBounds`] if `offset >= len`.
    pub fn remove_at(&mut self, offset: usize) -> Result<T, BlockError> {
        if offset >= self.len {
            return Err(self.out_of_bounds(offset));
        }

        let hole = self.physical(offset);
        let value = self.slots[hole].take();

        if offset < self.len / 2 {
            for i in (0..offset).rev() {
                let (dst, src) = (self.physical(i + 1), self.physical(i));
                self.slots.swap(dst, src);
            }
            self.advance_origin();
        } else {
            for i in offset..self.len - 1 {
                let (dst, src) = (self.physical(i), self.physical(i + 1));
                self.slots.swap(dst, src);
            }
        }
        self.len -= 1;

        value.ok_or(BlockError::OutOfBounds {
            offset,
            len: self.len + 1,
        })
    }

    /// Makes `value` the new first element of a full block and returns the
    /// element that was last.
    ///
    /// Equivalent to `pop_back` followed by `push_front`, in O(1): the value is
    /// written over the back slot and the origin retreats onto it.
    ///
    /// # Errors
    ///
    /// Returns [`BlockError::NotFull`] unless `len == capacity`.
    pub fn rotate_displace_front(&mut self, value: T) -> Result<T, BlockError> {
        self.require_full()?;
        let back = self.physical(self.len - 1);
        let displaced = self.slots[back].replace(value);
        self.origin = back;
        displaced.ok_or(BlockError::Empty)
    }

    /// Makes `value` the new last element of a full block and returns the
    /// element that was first. The mirror of [`rotate_displace_front`].
    ///
    /// [`rotate_displace_front`]: RingBlock::rotate_displace_front
    pub fn rotate_displace_back(&mut self, value: T) -> Result<T, BlockError> {
        self.require_full()?;
        let front = self.origin;
        let displaced = self.slots[front].replace(value);
        self.advance_origin();
        displaced.ok_or(BlockError::Empty)
    }

    fn require_full(&self) -> Result<(), BlockError> {
        if self.is_full() && self.len > 0 {
            Ok(())
        } else {
            Err(BlockError::NotFull {
                len: self.len,
                capacity: self.capacity(),
            })
        }
    }

    /// Drops every element and resets the origin to slot 0.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            *slot = None;
        }
        self.origin = 0;
        self.len = 0;
    }

    /// Returns the live elements in logical order.
    pub(crate) fn elements(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        (0..self.len).filter_map(move |offset| self.slots[self.physical(offset)].as_ref())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RingBlock<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.elements()).finish()
    }
}

impl<T> PushPopCollection<T> for RingBlock<T> {
    fn push(&mut self, item: T) -> Result<(), PushPopError> {
        self.push_back(item).map_err(|_| PushPopError::Full)
    }

    fn pop(&mut self) -> Option<T> {
        self.pop_back().ok()
    }

    fn get(&self, index: usize) -> Option<&T> {
        RingBlock::get(self, index)
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(block: &RingBlock<u32>) -> Vec<u32> {
        block.elements().copied().collect()
    }

    /// A full block whose origin has been rotated away from slot 0.
    fn rotated_full_block() -> RingBlock<u32> {
        let mut block = RingBlock::new(5);
        for value in [2, 3, 4] {
            block.push_back(value).unwrap();
        }
        block.push_front(1).unwrap();
        block.push_front(0).unwrap();
        block
    }

    #[test]
    fn test_new_is_empty() {
        let block = RingBlock::<u32>::new(3);
        assert!(block.is_empty());
        assert!(!block.is_full());
        assert_eq!(block.capacity(), 3);
        assert_eq!(block.get(0), None);
    }

    #[test]
    fn test_push_both_ends() {
        let block = rotated_full_block();
        assert!(block.is_full());
        assert_eq!(contents(&block), vec![0, 1, 2, 3, 4]);
        assert_eq!(block.origin, 3);
    }

    #[test]
    fn test_push_past_capacity() {
        let mut block = rotated_full_block();
        assert_eq!(block.push_back(9), Err(BlockError::Full { capacity: 5 }));
        assert_eq!(block.push_front(9), Err(BlockError::Full { capacity: 5 }));
        assert_eq!(block.insert_at(2, 9), Err(BlockError::Full { capacity: 5 }));
        assert_eq!(contents(&block), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_pop_both_ends() {
        let mut block = rotated_full_block();
        assert_eq!(block.pop_front(), Ok(0));
        assert_eq!(block.pop_back(), Ok(4));
        assert_eq!(contents(&block), vec![1, 2, 3]);

        block.clear();
        assert_eq!(block.pop_front(), Err(BlockError::Empty));
        assert_eq!(block.pop_back(), Err(BlockError::Empty));
    }

    #[test]
    fn test_get_and_set() {
        let mut block = rotated_full_block();
        assert_eq!(block.set(4, 40), Ok(4));
        assert_eq!(block.get(4), Some(&40));
        *block.get_mut(0).unwrap() = 100;
        assert_eq!(block.get(0), Some(&100));
        assert_eq!(
            block.set(5, 1),
            Err(BlockError::OutOfBounds { offset: 5, len: 5 })
        );
    }

    #[test]
    fn test_insert_front_half_wraps() {
        let mut block = RingBlock::new(6);
        for value in [10, 20, 30, 40] {
            block.push_back(value).unwrap();
        }
        block.insert_at(1, 15).unwrap();
        assert_eq!(block.origin, 5);
        assert_eq!(contents(&block), vec![10, 15, 20, 30, 40]);
    }

    #[test]
    fn test_insert_back_half_and_ends() {
        let mut block = RingBlock::new(6);
        for value in [10, 20, 30] {
            block.push_back(value).unwrap();
        }
        block.insert_at(2, 25).unwrap();
        block.insert_at(0, 5).unwrap();
        block.insert_at(5, 35).unwrap();
        assert_eq!(contents(&block), vec![5, 10, 20, 25, 30, 35]);
        assert_eq!(
            RingBlock::<u32>::new(2).insert_at(1, 0),
            Err(BlockError::OutOfBounds { offset: 1, len: 0 })
        );
    }

    #[test]
    fn test_remove_at_every_offset() {
        for offset in 0..5 {
            let mut block = rotated_full_block();
            assert_eq!(block.remove_at(offset), Ok(offset as u32));
            let expected: Vec<u32> = (0..5).filter(|v| *v != offset as u32).collect();
            assert_eq!(contents(&block), expected);
            assert_eq!(block.len(), 4);
        }
    }

    #[test]
    fn test_remove_out_of_bounds() {
        let mut block = rotated_full_block();
        assert_eq!(
            block.remove_at(5),
            Err(BlockError::OutOfBounds { offset: 5, len: 5 })
        );
    }

    #[test]
    fn test_rotate_displace_front() {
        let mut block = rotated_full_block();
        assert_eq!(block.rotate_displace_front(99), Ok(4));
        assert_eq!(contents(&block), vec![99, 0, 1, 2, 3]);
        assert!(block.is_full());
    }

    #[test]
    fn test_rotate_displace_back() {
        let mut block = rotated_full_block();
        assert_eq!(block.rotate_displace_back(99), Ok(0));
        assert_eq!(contents(&block), vec![1, 2, 3, 4, 99]);
    }

    #[test]
    fn test_rotate_requires_full_block() {
        let mut block = RingBlock::new(3);
        block.push_back(1u32).unwrap();
        assert_eq!(
            block.rotate_displace_front(2),
            Err(BlockError::NotFull {
                len: 1,
                capacity: 3
            })
        );
        assert!(RingBlock::<u32>::new(0).rotate_displace_back(1).is_err());
    }

    #[test]
    fn test_clear_resets_origin() {
        let mut block = rotated_full_block();
        block.clear();
        assert!(block.is_empty());
        assert_eq!(block.origin, 0);
        block.push_back(7).unwrap();
        assert_eq!(contents(&block), vec![7]);
    }

    #[test]
    fn test_zero_capacity_block() {
        let mut block = RingBlock::<u32>::new(0);
        assert!(block.is_full());
        assert_eq!(block.push_back(1), Err(BlockError::Full { capacity: 0 }));
        assert_eq!(block.pop_front(), Err(BlockError::Empty));
    }

    #[test]
    fn test_debug_lists_logical_order() {
        let block = rotated_full_block();
        assert_eq!(format!("{block:?}"), "[0, 1, 2, 3, 4]");
    }

    #[test]
    fn test_push_pop_collection_trait() {
        let mut block = RingBlock::<u8>::new(2);
        PushPopCollection::push(&mut block, 1).unwrap();
        PushPopCollection::push(&mut block, 2).unwrap();
        assert!(PushPopCollection::push(&mut block, 3).is_err());
        assert_eq!(PushPopCollection::len(&block), 2);
        assert_eq!(PushPopCollection::get(&block, 1), Some(&2));
        assert_eq!(PushPopCollection::pop(&mut block), Some(2));
        assert_eq!(PushPopCollection::pop(&mut block), Some(1));
        assert_eq!(PushPopCollection::pop(&mut block), None);
    }
}
