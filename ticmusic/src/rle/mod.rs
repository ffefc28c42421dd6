//! Recursive run-length compression of symbol text
//!
//! Any substring that repeats back-to-back is written as `#<count>[<base>]`, and repeats
//! nest freely: `ABC#5[DEF#3[GHI]]XYZ` stands for `ABC`, then five times `DEFGHIGHIGHI`,
//! then `XYZ`. The grammar is
//!
//! ```text
//! TEXT   := (CHAR | REPEAT)*
//! REPEAT := "#" DIGIT+ "[" TEXT "]"
//! ```
//!
//! which is why `#`, `[` and `]` can't appear as literal characters.

mod compress;
mod decompress;
mod lexer;
mod token;

pub use compress::{CompressError, RunCompressor, compress};
pub use decompress::{DecompressError, decompress};
pub use token::{RunToken, parse};

/// The longest text, in bytes, that notation may expand into
pub const MAX_EXPANDED_LEN: usize = 1 << 24;

/// Characters that carry meaning in the run notation
pub const RESERVED: [char; 3] = [REPEAT_CHAR, OPEN_CHAR, CLOSE_CHAR];

const REPEAT_CHAR: char = '#';
const OPEN_CHAR: char = '[';
const CLOSE_CHAR: char = ']';
