//! Square-root decomposed sequence built from [`RingBlock`]s.
//!
//! This module provides [`BlockSequence`], an ordered random-access container
//! that keeps `get`/`set` at O(1) while bringing arbitrary-position insertion
//! and removal down to O(√n).
//!
//! # Layout
//!
//! A sequence of capacity `c` owns `⌈c / b⌉` blocks where `b = ⌈√c⌉` is the
//! nominal block capacity; the final block takes the remainder when `b` does
//! not divide `c`. All blocks are allocated up front whenever the layout is
//! (re)built.
//!
//! # Packing invariant
//!
//! At most one block (the frontier) is partially filled. Every block before it
//! is full and every block after it is empty. This is what allows index `i` to
//! be located at block `i / b`, offset `i % b`. Insertions that land in a full
//! block push one element forward through the following full blocks until a
//! block with room absorbs it; removals pull one element backward from the
//! frontier to close the gap.

use std::fmt;
use std::ops::{Bound, Index, IndexMut, RangeBounds};

use tracing::{debug, trace};

use crate::config::{GrowthPolicy, SequenceConfig, DEFAULT_INITIAL_CAPACITY};
use crate::error::{BlockError, Result, SequenceError};
use crate::generic::cursor::CursorMut;
use crate::generic::push_pop::{PushPopCollection, PushPopError};
use crate::generic::ring_block::RingBlock;

/// Aborts on a block-level failure the sequence should have ruled out.
#[track_caller]
fn packing_violation(err: BlockError) -> ! {
    panic!("block sequence packing invariant violated: {err}")
}

/// Unwraps block results whose failure would be a packing-invariant defect.
trait Packed<T> {
    fn packed(self) -> T;
}

impl<T> Packed<T> for core::result::Result<T, BlockError> {
    #[track_caller]
    fn packed(self) -> T {
        match self {
            Ok(value) => value,
            Err(err) => packing_violation(err),
        }
    }
}

/// Smallest `r` with `r * r >= n`.
fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root.checked_mul(root).map_or(true, |square| square > n) {
        root -= 1;
    }
    while root.checked_mul(root).is_some_and(|square| square < n) {
        root += 1;
    }
    root
}

/// An ordered sequence stored as a list of fixed-capacity ring buffers.
///
/// # Examples
///
/// ```rust
/// use saturn_sequence::generic::block_sequence::BlockSequence;
///
/// let mut sequence: BlockSequence<u32> = (0..10).collect();
/// sequence.insert(3, 100).unwrap();
/// assert_eq!(sequence.to_vec(), vec![0, 1, 2, 100, 3, 4, 5, 6, 7, 8, 9]);
///
/// assert_eq!(sequence.remove(3), Ok(100));
/// assert_eq!(sequence.get(3), Ok(&3));
/// assert_eq!(sequence.to_string(), "[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]");
/// ```
#[derive(Clone)]
pub struct BlockSequence<T> {
    blocks: Vec<RingBlock<T>>,
    block_capacity: usize,
    capacity: usize,
    len: usize,
    growth: GrowthPolicy,
}

impl<T> Default for BlockSequence<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BlockSequence<T> {
    /// Creates an empty sequence with the default capacity of
    /// [`DEFAULT_INITIAL_CAPACITY`].
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty sequence that can hold `capacity` elements before
    /// its first reshape.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_sequence::generic::block_sequence::BlockSequence;
    ///
    /// let sequence: BlockSequence<u8> = BlockSequence::with_capacity(20);
    /// assert_eq!(sequence.capacity(), 20);
    /// assert_eq!(sequence.block_capacity(), 5);
    /// assert_eq!(sequence.block_count(), 4);
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(capacity, GrowthPolicy::default())
    }

    /// Creates an empty sequence from a validated [`SequenceConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::InvalidGrowthPolicy`] if the growth policy
    /// would not strictly increase the capacity.
    pub fn with_config(config: SequenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config.initial_capacity, config.growth))
    }

    /// Creates a sequence holding the items of `source` in order, with
    /// capacity equal to the number of items.
    pub fn from_collection<I: IntoIterator<Item = T>>(source: I) -> Self {
        let items: Vec<T> = source.into_iter().collect();
        let mut sequence = Self::with_capacity(items.len());
        sequence.fill(items);
        sequence
    }

    /// Creates a sequence holding the items of `source` in order, with an
    /// explicit capacity.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::CapacityBelowSource`] if `capacity` is smaller
    /// than the number of items.
    pub fn from_collection_with_capacity<I: IntoIterator<Item = T>>(
        source: I,
        capacity: usize,
    ) -> Result<Self> {
        let items: Vec<T> = source.into_iter().collect();
        if capacity < items.len() {
            return Err(SequenceError::CapacityBelowSource {
                capacity,
                required: items.len(),
            });
        }
        let mut sequence = Self::with_capacity(capacity);
        sequence.fill(items);
        Ok(sequence)
    }

    fn build(capacity: usize, growth: GrowthPolicy) -> Self {
        let (block_capacity, blocks) = Self::allocate_blocks(capacity);
        Self {
            blocks,
            block_capacity,
            capacity,
            len: 0,
            growth,
        }
    }

    /// Appends items that are known to fit without growth.
    fn fill(&mut self, items: Vec<T>) {
        let mut target = 0;
        for item in items {
            while self.blocks[target].is_full() {
                target += 1;
            }
            self.blocks[target].push_back(item).packed();
            self.len += 1;
        }
    }

    fn allocate_blocks(capacity: usize) -> (usize, Vec<RingBlock<T>>) {
        let block_capacity = ceil_sqrt(capacity);
        if block_capacity == 0 {
            return (0, Vec::new());
        }
        let full_blocks = capacity / block_capacity;
        let remainder = capacity % block_capacity;

        let mut blocks = Vec::with_capacity(full_blocks + usize::from(remainder > 0));
        blocks.extend((0..full_blocks).map(|_| RingBlock::new(block_capacity)));
        if remainder > 0 {
            blocks.push(RingBlock::new(remainder));
        }
        (block_capacity, blocks)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of elements the current layout holds before it must be reshaped.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Nominal capacity of every block except possibly the last.
    pub fn block_capacity(&self) -> usize {
        self.block_capacity
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    pub fn growth_policy(&self) -> GrowthPolicy {
        self.growth
    }

    /// Returns `true` if the block layout satisfies the packing invariant and
    /// agrees with the recorded length and capacity.
    ///
    /// Intended for diagnostics and tests; every public mutation keeps this
    /// `true`.
    pub fn is_packed(&self) -> bool {
        let mut past_frontier = false;
        let mut len = 0;
        let mut capacity = 0;
        let last = self.blocks.len().saturating_sub(1);

        for (position, block) in self.blocks.iter().enumerate() {
            if position < last && block.capacity() != self.block_capacity {
                return false;
            }
            if past_frontier {
                if !block.is_empty() {
                    return false;
                }
            } else if !block.is_full() {
                past_frontier = true;
            }
            len += block.len();
            capacity += block.capacity();
        }

        len == self.len && capacity == self.capacity
    }

    fn locate(&self, index: usize) -> (usize, usize) {
        (index / self.block_capacity, index % self.block_capacity)
    }

    fn out_of_bounds(&self, index: usize) -> SequenceError {
        SequenceError::IndexOutOfBounds {
            index,
            len: self.len,
        }
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if `index >= len`.
    pub fn get(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        let (block, offset) = self.locate(index);
        self.blocks[block]
            .get(offset)
            .ok_or_else(|| self.out_of_bounds(index))
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        let (block, offset) = self.locate(index);
        let len = self.len;
        self.blocks[block]
            .get_mut(offset)
            .ok_or(SequenceError::IndexOutOfBounds { index, len })
    }

    pub fn first(&self) -> Option<&T> {
        self.get(0).ok()
    }

    pub fn last(&self) -> Option<&T> {
        self.len.checked_sub(1).and_then(|index| self.get(index).ok())
    }

    /// Replaces the element at `index`, returning the previous value.
    pub fn set(&mut self, index: usize, value: T) -> Result<T> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        let (block, offset) = self.locate(index);
        Ok(self.blocks[block].set(offset, value).packed())
    }

    /// Appends `value` after the last element, growing if needed.
    pub fn append(&mut self, value: T) {
        let end = self.len;
        if let Err(err) = self.insert(end, value) {
            unreachable!("appending at the end cannot be out of bounds: {err}")
        }
    }

    /// Inserts `value` at `index`, shifting every later element back by one.
    ///
    /// Grows the layout first when the sequence is at capacity. If the target
    /// block is full, its last element is carried forward through the
    /// following full blocks until a block with room takes it.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if `index > len`; the
    /// sequence is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use saturn_sequence::generic::block_sequence::BlockSequence;
    ///
    /// let mut sequence = BlockSequence::with_capacity(4);
    /// for value in 0..4 {
    ///     sequence.append(value);
    /// }
    /// sequence.insert(4, 99).unwrap();
    /// assert_eq!(sequence.to_vec(), vec![0, 1, 2, 3, 99]);
    /// assert!(sequence.capacity() > 4);
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<()> {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }
        if self.len == self.capacity {
            let next = self.growth.next_capacity(self.capacity);
            self.reshape(next);
        }

        let (block, offset) = self.locate(index);
        if self.blocks[block].is_full() {
            let carry = self.blocks[block].pop_back().packed();
            self.blocks[block].insert_at(offset, value).packed();
            self.cascade_forward(block + 1, carry);
        } else {
            self.blocks[block].insert_at(offset, value).packed();
        }
        self.len += 1;
        Ok(())
    }

    /// Hands `carry` to the first block at or after `start` with a free slot,
    /// rotating it through every full block on the way.
    fn cascade_forward(&mut self, start: usize, mut carry: T) {
        for position in start..self.blocks.len() {
            let block = &mut self.blocks[position];
            if block.is_full() {
                carry = block.rotate_displace_front(carry).packed();
            } else {
                block.push_front(carry).packed();
                trace!(start, end = position, "cascaded insert forward");
                return;
            }
        }
        packing_violation(BlockError::Full {
            capacity: self.block_capacity,
        })
    }

    /// Removes and returns the element at `index`, shifting every later
    /// element forward by one.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        let (block, offset) = self.locate(index);
        let frontier = (self.len - 1) / self.block_capacity;

        let removed = self.blocks[block].remove_at(offset).packed();
        if frontier > block {
            self.cascade_backward(block, frontier);
        }
        self.len -= 1;
        Ok(removed)
    }

    /// Refills the gap in block `hole` by pulling the first element of the
    /// frontier back through every full block in between.
    fn cascade_backward(&mut self, hole: usize, frontier: usize) {
        let mut carry = self.blocks[frontier].pop_front().packed();
        for position in (hole + 1..frontier).rev() {
            carry = self.blocks[position].rotate_displace_back(carry).packed();
        }
        self.blocks[hole].push_back(carry).packed();
        trace!(start = frontier, end = hole, "cascaded remove backward");
    }

    /// Removes and returns the last element, or `None` if the sequence is empty.
    pub fn pop(&mut self) -> Option<T> {
        let last = self.len.checked_sub(1)?;
        self.remove(last).ok()
    }

    /// Drops every element. The capacity and block layout are kept.
    pub fn clear(&mut self) {
        for block in self.blocks.iter_mut() {
            block.clear();
        }
        self.len = 0;
    }

    /// Grows the capacity to exactly `new_capacity`, rebuilding the layout
    /// with a block capacity of `⌈√new_capacity⌉`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::CapacityNotIncreased`] if `new_capacity` does
    /// not exceed the current capacity.
    pub fn ensure_capacity(&mut self, new_capacity: usize) -> Result<()> {
        if new_capacity <= self.capacity {
            return Err(SequenceError::CapacityNotIncreased {
                requested: new_capacity,
                current: self.capacity,
            });
        }
        self.reshape(new_capacity);
        Ok(())
    }

    /// Shrinks the capacity to the current length.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity == self.len {
            return;
        }
        debug!(
            capacity = self.capacity,
            len = self.len,
            "shrinking block sequence"
        );
        self.reshape(self.len);
    }

    fn reshape(&mut self, new_capacity: usize) {
        let old_capacity = self.capacity;
        let old_block_capacity = self.block_capacity;
        self.relayout(new_capacity, |_| true);
        debug!(
            old_capacity,
            new_capacity,
            old_block_capacity,
            block_capacity = self.block_capacity,
            blocks = self.blocks.len(),
            moved = self.len,
            "reshaped block sequence"
        );
    }

    /// Rebuilds the layout for `capacity`, moving every element for which
    /// `keep` returns `true` into fresh blocks in logical order. Returns the
    /// number of dropped elements.
    ///
    /// The new blocks are allocated before any element moves, so a failed
    /// allocation leaves the old layout untouched.
    fn relayout<F>(&mut self, capacity: usize, mut keep: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let (block_capacity, blocks) = Self::allocate_blocks(capacity);
        let old_blocks = std::mem::replace(&mut self.blocks, blocks);
        let old_len = self.len;

        self.block_capacity = block_capacity;
        self.capacity = capacity;
        self.len = 0;

        let mut target = 0;
        for mut block in old_blocks {
            while let Ok(item) = block.pop_front() {
                if !keep(&item) {
                    continue;
                }
                while self.blocks[target].is_full() {
                    target += 1;
                }
                self.blocks[target].push_back(item).packed();
                self.len += 1;
            }
        }

        old_len - self.len
    }

    /// Keeps only the elements for which `keep` returns `true`, preserving
    /// their order. Returns `true` if anything was removed.
    pub fn retain<F>(&mut self, keep: F) -> bool
    where
        F: FnMut(&T) -> bool,
    {
        self.relayout(self.capacity, keep) > 0
    }

    /// Removes the elements in the positional `range`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if the range is inverted or
    /// extends past the end.
    pub fn remove_range<R: RangeBounds<usize>>(&mut self, range: R) -> Result<()> {
        let (start, end) = self.resolve_range(range)?;
        if start == end {
            return Ok(());
        }
        let mut position = 0;
        self.relayout(self.capacity, |_| {
            let keep = position < start || position >= end;
            position += 1;
            keep
        });
        Ok(())
    }

    fn resolve_range<R: RangeBounds<usize>>(&self, range: R) -> Result<(usize, usize)> {
        let start = match range.start_bound() {
            Bound::Included(&start) => start,
            Bound::Excluded(&start) => start.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let end = match range.end_bound() {
            Bound::Included(&end) => end.saturating_add(1),
            Bound::Excluded(&end) => end,
            Bound::Unbounded => self.len,
        };
        if end > self.len {
            return Err(self.out_of_bounds(end));
        }
        if start > end {
            return Err(self.out_of_bounds(start));
        }
        Ok((start, end))
    }

    /// Appends every item of `items` in order. Returns `true` if at least one
    /// item was appended.
    pub fn add_all<I: IntoIterator<Item = T>>(&mut self, items: I) -> bool {
        let before = self.len;
        for item in items {
            self.append(item);
        }
        self.len > before
    }

    /// Inserts every item of `items` in order, the first one landing at
    /// `index`. Returns `true` if at least one item was inserted.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if `index > len`; nothing
    /// is inserted.
    pub fn insert_all<I: IntoIterator<Item = T>>(&mut self, index: usize, items: I) -> Result<bool> {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }
        let mut position = index;
        for item in items {
            self.insert(position, item)?;
            position += 1;
        }
        Ok(position > index)
    }

    /// Returns a cursor positioned before the first element.
    pub fn cursor(&mut self) -> CursorMut<'_, T> {
        CursorMut::new(self, 0)
    }

    /// Returns a cursor positioned before the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SequenceError::IndexOutOfBounds`] if `index > len`.
    pub fn cursor_at(&mut self, index: usize) -> Result<CursorMut<'_, T>> {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }
        Ok(CursorMut::new(self, index))
    }

    /// Live elements in logical order.
    pub(crate) fn elements(&self) -> impl DoubleEndedIterator<Item = &T> + '_ {
        self.blocks.iter().flat_map(|block| block.elements())
    }
}

impl<T: PartialEq> BlockSequence<T> {
    pub fn contains(&self, value: &T) -> bool {
        self.index_of(value).is_some()
    }

    /// Position of the first element equal to `value`.
    pub fn index_of(&self, value: &T) -> Option<usize> {
        self.elements().position(|item| item == value)
    }

    /// Position of the last element equal to `value`.
    pub fn last_index_of(&self, value: &T) -> Option<usize> {
        self.elements()
            .rev()
            .position(|item| item == value)
            .map(|from_back| self.len - 1 - from_back)
    }

    /// Removes the first element equal to `value`. Returns `true` if one was
    /// found.
    pub fn remove_value(&mut self, value: &T) -> bool {
        match self.index_of(value) {
            Some(index) => self.remove(index).is_ok(),
            None => false,
        }
    }

    pub fn contains_all(&self, values: &[T]) -> bool {
        values.iter().all(|value| self.contains(value))
    }

    /// Removes every element equal to any of `values`. Returns `true` if
    /// anything was removed.
    pub fn remove_all(&mut self, values: &[T]) -> bool {
        self.retain(|item| !values.contains(item))
    }

    /// Removes every element not equal to any of `values`. Returns `true` if
    /// anything was removed.
    pub fn retain_all(&mut self, values: &[T]) -> bool {
        self.retain(|item| values.contains(item))
    }
}

impl<T: Clone> BlockSequence<T> {
    /// Clones the elements into a `Vec` in logical order.
    pub fn to_vec(&self) -> Vec<T> {
        self.elements().cloned().collect()
    }

    /// Returns a new sequence holding clones of the elements in the positional
    /// `range`, sized exactly to fit them. The growth policy is inherited.
    pub fn sub_sequence<R: RangeBounds<usize>>(&self, range: R) -> Result<Self> {
        let (start, end) = self.resolve_range(range)?;
        let mut sequence =
            Self::from_collection(self.elements().skip(start).take(end - start).cloned());
        sequence.growth = self.growth;
        Ok(sequence)
    }
}

impl<T: PartialEq> PartialEq for BlockSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.elements().eq(other.elements())
    }
}

impl<T: Eq> Eq for BlockSequence<T> {}

impl<T: fmt::Debug> fmt::Debug for BlockSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.elements()).finish()
    }
}

impl<T: fmt::Display> fmt::Display for BlockSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (position, item) in self.elements().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{item}")?;
        }
        f.write_str("]")
    }
}

impl<T> Index<usize> for BlockSequence<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> IndexMut<usize> for BlockSequence<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.get_mut(index) {
            Ok(item) => item,
            Err(err) => panic!("{err}"),
        }
    }
}

impl<T> FromIterator<T> for BlockSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_collection(iter)
    }
}

impl<T> Extend<T> for BlockSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.add_all(iter);
    }
}

impl<T> From<Vec<T>> for BlockSequence<T> {
    fn from(items: Vec<T>) -> Self {
        let mut sequence = Self::with_capacity(items.len());
        sequence.fill(items);
        sequence
    }
}

/// Never returns [`PushPopError::Full`]; the sequence grows instead.
impl<T> PushPopCollection<T> for BlockSequence<T> {
    fn push(&mut self, item: T) -> core::result::Result<(), PushPopError> {
        self.append(item);
        Ok(())
    }

    fn pop(&mut self) -> Option<T> {
        BlockSequence::pop(self)
    }

    fn get(&self, index: usize) -> Option<&T> {
        BlockSequence::get(self, index).ok()
    }

    fn len(&self) -> usize {
        self.len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence_of(range: std::ops::Range<u32>, capacity: usize) -> BlockSequence<u32> {
        BlockSequence::from_collection_with_capacity(range, capacity).unwrap()
    }

    #[test]
    fn test_ceil_sqrt() {
        let cases = [(0, 0), (1, 1), (2, 2), (4, 2), (5, 3), (15, 4), (16, 4), (17, 5)];
        for (n, root) in cases {
            assert_eq!(ceil_sqrt(n), root, "ceil_sqrt({n})");
        }
        assert_eq!(ceil_sqrt(1_000_001), 1001);
    }

    #[test]
    fn test_layout_with_remainder_block() {
        let sequence = BlockSequence::<u8>::with_capacity(10);
        assert_eq!(sequence.block_capacity(), 4);
        assert_eq!(sequence.block_count(), 3);
        assert_eq!(sequence.capacity(), 10);
        assert!(sequence.is_packed());
    }

    #[test]
    fn test_default_capacity() {
        let sequence = BlockSequence::<u8>::default();
        assert_eq!(sequence.capacity(), DEFAULT_INITIAL_CAPACITY);
        assert!(sequence.is_empty());
    }

    #[test]
    fn test_append_then_grow() {
        let mut sequence = BlockSequence::with_capacity(4);
        for value in 0..4u32 {
            sequence.append(value);
        }
        for i in 0..4 {
            assert_eq!(sequence.get(i), Ok(&(i as u32)));
        }
        assert_eq!(sequence.capacity(), 4);

        sequence.insert(4, 99).unwrap();
        assert_eq!(sequence.to_vec(), vec![0, 1, 2, 3, 99]);
        assert_eq!(sequence.capacity(), 6);
        assert_eq!(sequence.block_capacity(), 3);
        assert!(sequence.is_packed());
    }

    #[test]
    fn test_insert_then_remove_middle() {
        let mut sequence = sequence_of(0..10, 20);
        sequence.insert(3, 100).unwrap();
        assert_eq!(sequence.to_vec(), vec![0, 1, 2, 100, 3, 4, 5, 6, 7, 8, 9]);
        assert!(sequence.is_packed());

        assert_eq!(sequence.remove(3), Ok(100));
        assert_eq!(sequence.to_vec(), (0..10).collect::<Vec<_>>());
        assert!(sequence.is_packed());
    }

    #[test]
    fn test_insert_cascades_through_full_blocks() {
        // 16 slots in four blocks of four; three full blocks plus one element.
        let mut sequence = sequence_of(0..13, 16);
        sequence.insert(1, 100).unwrap();

        let mut expected: Vec<u32> = (0..13).collect();
        expected.insert(1, 100);
        assert_eq!(sequence.to_vec(), expected);
        assert!(sequence.is_packed());
    }

    #[test]
    fn test_insert_at_front_when_full() {
        let mut sequence = sequence_of(0..9, 9);
        sequence.insert(0, 100).unwrap();
        assert_eq!(sequence.first(), Some(&100));
        assert_eq!(sequence.last(), Some(&8));
        assert_eq!(sequence.len(), 10);
        assert!(sequence.is_packed());
    }

    #[test]
    fn test_remove_front_until_empty() {
        let mut sequence = sequence_of(0..17, 17);
        let mut model: Vec<u32> = (0..17).collect();
        while !model.is_empty() {
            assert_eq!(sequence.remove(0), Ok(model.remove(0)));
            assert_eq!(sequence.to_vec(), model);
            assert!(sequence.is_packed());
        }
        assert!(sequence.is_empty());
        assert_eq!(sequence.remove(0), Err(SequenceError::IndexOutOfBounds { index: 0, len: 0 }));
    }

    #[test]
    fn test_remove_single_element() {
        let mut sequence = sequence_of(5..6, 4);
        assert_eq!(sequence.remove(0), Ok(5));
        assert!(sequence.is_empty());
        assert!(sequence.blocks.iter().all(RingBlock::is_empty));
    }

    #[test]
    fn test_out_of_bounds_access() {
        let mut sequence = sequence_of(0..3, 3);
        assert_eq!(
            sequence.get(3),
            Err(SequenceError::IndexOutOfBounds { index: 3, len: 3 })
        );
        assert!(sequence.set(5, 1).is_err());
        assert!(sequence.insert(4, 1).is_err());
        assert_eq!(sequence.to_vec(), vec![0, 1, 2]);
    }

    #[test]
    fn test_set_returns_previous() {
        let mut sequence = sequence_of(0..5, 5);
        assert_eq!(sequence.set(2, 20), Ok(2));
        sequence[3] = 30;
        *sequence.get_mut(4).unwrap() += 40;
        assert_eq!(sequence.to_vec(), vec![0, 1, 20, 30, 44]);
        assert_eq!(sequence[2], 20);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_index_panics_past_end() {
        let sequence = sequence_of(0..2, 2);
        let _value: u32 = sequence[2];
    }

    #[test]
    fn test_zero_capacity_grows_on_first_insert() {
        let mut sequence = BlockSequence::with_capacity(0);
        assert_eq!(sequence.block_count(), 0);
        assert!(sequence.is_packed());
        sequence.insert(0, 'a').unwrap();
        sequence.insert(0, 'b').unwrap();
        assert_eq!(sequence.to_vec(), vec!['b', 'a']);
        assert!(sequence.is_packed());
    }

    #[test]
    fn test_capacity_below_source() {
        let err = BlockSequence::from_collection_with_capacity(0..5, 4).unwrap_err();
        assert_eq!(
            err,
            SequenceError::CapacityBelowSource {
                capacity: 4,
                required: 5
            }
        );
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_ensure_capacity() {
        let mut sequence = sequence_of(0..7, 9);
        assert!(matches!(
            sequence.ensure_capacity(9),
            Err(SequenceError::CapacityNotIncreased { requested: 9, current: 9 })
        ));
        sequence.ensure_capacity(50).unwrap();
        assert_eq!(sequence.capacity(), 50);
        assert_eq!(sequence.block_capacity(), 8);
        assert_eq!(sequence.to_vec(), (0..7).collect::<Vec<_>>());
        assert!(sequence.is_packed());
    }

    #[test]
    fn test_shrink_to_fit() {
        let mut sequence = sequence_of(0..7, 30);
        sequence.shrink_to_fit();
        assert_eq!(sequence.capacity(), 7);
        assert_eq!(sequence.to_vec(), (0..7).collect::<Vec<_>>());
        assert!(sequence.is_packed());

        sequence.append(7);
        assert_eq!(sequence.capacity(), 10);
        assert_eq!(sequence.last(), Some(&7));
    }

    #[test]
    fn test_custom_growth_policy() {
        let config = SequenceConfig::default()
            .with_initial_capacity(2)
            .with_growth(GrowthPolicy::new(3.0, 1).unwrap());
        let mut sequence = BlockSequence::with_config(config).unwrap();
        sequence.add_all(0..3u8);
        assert_eq!(sequence.capacity(), 6);

        let bad = SequenceConfig::default().with_growth(GrowthPolicy {
            factor: 0.9,
            min_increment: 1,
        });
        assert!(BlockSequence::<u8>::with_config(bad).is_err());
    }

    #[test]
    fn test_clear_keeps_capacity() {
        let mut sequence = sequence_of(0..10, 12);
        sequence.clear();
        assert!(sequence.is_empty());
        assert_eq!(sequence.capacity(), 12);
        assert!(sequence.is_packed());
        sequence.append(1);
        assert_eq!(sequence.to_vec(), vec![1]);
    }

    #[test]
    fn test_linear_scans() {
        let sequence: BlockSequence<u32> = vec![1, 2, 3, 2, 1].into();
        assert_eq!(sequence.index_of(&2), Some(1));
        assert_eq!(sequence.last_index_of(&2), Some(3));
        assert_eq!(sequence.last_index_of(&1), Some(4));
        assert_eq!(sequence.index_of(&9), None);
        assert!(sequence.contains(&3));
        assert!(sequence.contains_all(&[1, 3]));
        assert!(!sequence.contains_all(&[1, 4]));
    }

    #[test]
    fn test_remove_value() {
        let mut sequence: BlockSequence<u32> = vec![4, 5, 4].into();
        assert!(sequence.remove_value(&4));
        assert_eq!(sequence.to_vec(), vec![5, 4]);
        assert!(!sequence.remove_value(&9));
    }

    #[test]
    fn test_bulk_operations() {
        let mut sequence: BlockSequence<u32> = (0..10).collect();
        assert!(!sequence.add_all(Vec::new()));
        assert_eq!(sequence.len(), 10);

        assert!(sequence.remove_all(&[1, 3, 5, 42]));
        assert_eq!(sequence.to_vec(), vec![0, 2, 4, 6, 7, 8, 9]);
        assert!(!sequence.remove_all(&[42]));

        assert!(sequence.retain_all(&[2, 7, 9]));
        assert_eq!(sequence.to_vec(), vec![2, 7, 9]);
        assert!(sequence.is_packed());

        assert_eq!(sequence.insert_all(1, [70, 71]), Ok(true));
        assert_eq!(sequence.to_vec(), vec![2, 70, 71, 7, 9]);
        assert_eq!(sequence.insert_all(1, []), Ok(false));
        assert!(sequence.insert_all(9, [1]).is_err());
    }

    #[test]
    fn test_remove_range_and_sub_sequence() {
        let mut sequence: BlockSequence<u32> = (0..12).collect();
        let middle = sequence.sub_sequence(3..6).unwrap();
        assert_eq!(middle.to_vec(), vec![3, 4, 5]);
        assert_eq!(middle.capacity(), 3);

        sequence.remove_range(2..=4).unwrap();
        assert_eq!(sequence.to_vec(), vec![0, 1, 5, 6, 7, 8, 9, 10, 11]);
        assert_eq!(sequence.capacity(), 12);
        assert!(sequence.is_packed());

        assert!(sequence.remove_range(5..20).is_err());
        assert!(sequence.sub_sequence(..).unwrap() == sequence);
    }

    #[test]
    fn test_pop() {
        let mut sequence: BlockSequence<u32> = (0..3).collect();
        assert_eq!(sequence.pop(), Some(2));
        assert_eq!(sequence.pop(), Some(1));
        assert_eq!(sequence.pop(), Some(0));
        assert_eq!(sequence.pop(), None);
    }

    #[test]
    fn test_rendering() {
        let sequence: BlockSequence<u32> = (1..4).collect();
        assert_eq!(sequence.to_string(), "[1, 2, 3]");
        assert_eq!(format!("{sequence:?}"), "[1, 2, 3]");
        assert_eq!(BlockSequence::<u32>::new().to_string(), "[]");
    }

    #[test]
    fn test_equality_ignores_layout() {
        let small: BlockSequence<u32> = (0..5).collect();
        let large = sequence_of(0..5, 100);
        assert_eq!(small, large);
        assert_ne!(small, sequence_of(0..4, 4));
    }
}
