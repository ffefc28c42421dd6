//! Corpus-wide Huffman coding of run-compressed text
//!
//! All texts that will be shipped together are counted into one [`FrequencyTable`], from
//! which a single [`HuffmanTree`] is built. Its [`CodeTable`] encodes every text and its
//! [`InverseCodeTable`] (or the tree itself, exported to Lua) decodes them again.

mod code;
mod decode;
mod encode;
mod frequency;
mod tree;

pub use code::{Code, CodeTable, InverseCodeTable};
pub use decode::{DecodeError, decode};
pub use encode::{EncodeError, encode};
pub use frequency::FrequencyTable;
pub use tree::{BuildTreeError, HuffmanTree, Node};
