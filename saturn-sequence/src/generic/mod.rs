pub mod block_sequence;
pub mod cursor;
pub mod push_pop;
pub mod ring_block;
