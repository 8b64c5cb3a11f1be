pub mod block_seq;
