//! # ticmusic tools
//!
//! Command-line access to the [`ticmusic`] pipeline. Raw pattern blocks are read from
//! `.bin` files (or folders containing them), cut into blocks of a fixed length, and either
//! packed into a Lua fragment or measured stage by stage.
//!
//! ## Pack
//!
//! ```console
//! ticmusic-tools-pack 0.1.0
//! Pack raw pattern blocks into a Lua music data fragment
//!
//! USAGE:
//!     ticmusic-tools pack [OPTIONS] --output <OUTPUT> [PATHS]...
//!
//! ARGS:
//!     <PATHS>...    Files (or folders of .bin files) containing the raw pattern blocks
//!
//! OPTIONS:
//!         --block-len <BLOCK_LEN>    The number of bytes in a single block [default: 192]
//!     -h, --help                     Print help information
//!         --no-verify                Don't check that the output decodes back into the input
//!     -o, --output <OUTPUT>          The Lua file to write
//!         --order <ORDER>            A JSON file with the block order, as an array of arrays of block numbers
//!     -q, --quiet                    Only log errors
//!     -r, --recursive                Should folders be walked recursively
//!     -s, --substitute               Replace common symbol sequences with single markers before run compression
//!     -v, --verbose                  Log more about what's going on (repeat for even more)
//!     -V, --version                  Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! > ticmusic-tools pack patterns.bin --order order.json -s -o music_data.lua
//! Wrote 42 blocks (8064 bytes => 3717 symbols) to music_data.lua
//! ```
//!
//! ## Inspect
//!
//! ```console
//! ticmusic-tools-inspect 0.1.0
//! Show how well every block compresses at every stage
//!
//! USAGE:
//!     ticmusic-tools inspect [OPTIONS] [PATHS]...
//!
//! ARGS:
//!     <PATHS>...    Files (or folders of .bin files) containing the raw pattern blocks
//!
//! OPTIONS:
//!         --block-len <BLOCK_LEN>    The number of bytes in a single block [default: 192]
//!     -h, --help                     Print help information
//!         --json <JSON>              A JSON file the outcome should be written to
//!     -r, --recursive                Should folders be walked recursively
//!     -s, --substitute               Replace common symbol sequences with single markers before run compression
//!     -V, --version                  Print version information
//! ```

pub mod inspect;
pub mod pack;
pub(crate) mod utils;
