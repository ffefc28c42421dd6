//! # ticmusic
//!
//! Fantasy consoles like TIC-80 give a cartridge a fixed amount of code space, and every
//! byte of music data that doesn't fit in the tracker banks has to live in that code as a
//! string literal. This crate squeezes raw pattern blocks into printable text that survives
//! being pasted into Lua source, and gets them back out again.
//!
//! Encoding runs in three stages, each consuming the output of the previous one:
//!
//! 1. [`sixbit`] packs bytes into symbols of the 64-character [`alphabet`]
//! 2. [`rle`] writes repeated substrings as nested `#<count>[<base>]` runs, optionally
//!    after a [`dictionary`] has replaced common n-grams by single markers
//! 3. [`huffman`] codes the result with one tree shared by all blocks, after which the
//!    bitstream is packed into symbols once more
//!
//! [`pipeline`] strings these together, verifies that the output decodes back into the
//! input, and renders everything as a Lua fragment.
//!
//! ```
//! # use ticmusic::pipeline::Pipeline;
//! let blocks = vec![vec![0_u8; 192], vec![0x11; 192]];
//! let data = Pipeline::default().encode(&blocks, vec![vec![1, 2]]).unwrap();
//! assert_eq!(data.decode_block(1).unwrap(), blocks[1]);
//! ```

pub mod alphabet;
pub(crate) mod bits;
pub mod dictionary;
pub mod huffman;
pub mod pipeline;
pub mod rle;
pub mod sixbit;

pub use ux::u6;
