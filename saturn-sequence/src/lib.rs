//! # Saturn Sequence
//!
//! A random-access sequence that beats a plain dynamic array on mid-sequence
//! insertion and removal while keeping indexed access O(1), using a two-level
//! square-root decomposition.
//!
//! ## Building Blocks
//!
//! - **[`RingBlock<T>`]** – fixed-capacity double-ended ring buffer with O(1)
//!   push/pop at both ends and shorter-side shifting for interior edits
//! - **[`BlockSequence<T>`]** – ordered list of ring blocks of capacity
//!   `⌈√capacity⌉`, routing every index through `index / b, index % b`
//! - **[`CursorMut<T>`]** – bidirectional cursor with in-place `set` and
//!   structural `insert`/`remove`
//! - **[`PushPopCollection<T>`]** – trait abstraction over `push`, `pop`,
//!   `get` & `len`, shared with `Vec`
//! - **[`block_seq!`]** – `vec!`-style constructor
//!
//! ## Complexity
//!
//! | operation             | cost        |
//! |-----------------------|-------------|
//! | `get` / `set`         | O(1)        |
//! | `insert` / `remove`   | O(√n)       |
//! | `append`              | O(1) amortized |
//! | growth (reshape)      | O(n)        |
//!
//! ## Quick Examples
//!
//! ### Using BlockSequence
//!
//! ```rust
//! use saturn_sequence::generic::block_sequence::BlockSequence;
//!
//! let mut sequence = BlockSequence::with_capacity(4);
//! for value in 0..4 {
//!     sequence.append(value);
//! }
//!
//! // Full: the next insertion reshapes the block layout first.
//! sequence.insert(0, -1).unwrap();
//! assert_eq!(sequence.to_string(), "[-1, 0, 1, 2, 3]");
//! assert_eq!(sequence.remove(2), Ok(1));
//! assert!(sequence.is_packed());
//! ```
//!
//! ### Configuring growth
//!
//! ```rust
//! use saturn_sequence::config::{GrowthPolicy, SequenceConfig};
//! use saturn_sequence::generic::block_sequence::BlockSequence;
//!
//! let config = SequenceConfig::default()
//!     .with_initial_capacity(16)
//!     .with_growth(GrowthPolicy::new(2.0, 1).unwrap());
//!
//! let mut sequence: BlockSequence<u64> = BlockSequence::with_config(config).unwrap();
//! sequence.add_all(0..17);
//! assert_eq!(sequence.capacity(), 32);
//! ```
//!
//! ## Errors
//!
//! Public operations return [`SequenceError`]. Block-level [`BlockError`]s
//! never escape a [`BlockSequence`]: the sequence arranges capacity and checks
//! indices before delegating, so a block refusing an operation is treated as
//! a broken invariant and panics.
//!
//! ## Logging
//!
//! Layout reshapes are reported through `tracing` at `DEBUG`, cascades at
//! `TRACE`. The crate never installs a subscriber.
//!
//! [`RingBlock<T>`]: generic::ring_block::RingBlock
//! [`BlockSequence<T>`]: generic::block_sequence::BlockSequence
//! [`BlockSequence`]: generic::block_sequence::BlockSequence
//! [`CursorMut<T>`]: generic::cursor::CursorMut
//! [`PushPopCollection<T>`]: generic::push_pop::PushPopCollection
//! [`block_seq!`]: macro@block_seq
//! [`SequenceError`]: error::SequenceError
//! [`BlockError`]: error::BlockError

pub mod config;
pub mod error;
pub mod generic;
pub mod macros;

pub use config::{GrowthPolicy, SequenceConfig};
pub use error::{BlockError, SequenceError};
pub use generic::block_sequence::BlockSequence;
pub use generic::cursor::CursorMut;
pub use generic::ring_block::RingBlock;
