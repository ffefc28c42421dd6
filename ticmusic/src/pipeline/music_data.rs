use crate::{
    dictionary::Dictionary,
    huffman::{self, HuffmanTree, InverseCodeTable},
    rle::{self, DecompressError},
    sixbit,
};
use rayon::prelude::*;
use std::{
    io::{self, Write},
    path::Path,
    string::FromUtf8Error,
};
use thiserror::Error;

/// Encoded blocks, along with everything needed to decode them
///
/// This is what gets embedded into a cartridge: the block texts, the Huffman tree they were
/// coded with, and the order in which the blocks are played.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicData {
    notation: Vec<String>,
    blocks: Vec<String>,
    tree: HuffmanTree,
    inverse: InverseCodeTable,
    dictionary: Dictionary,
    order: Vec<Vec<usize>>,
}

impl MusicData {
    pub(crate) fn new(
        notation: Vec<String>,
        blocks: Vec<String>,
        tree: HuffmanTree,
        dictionary: Dictionary,
        order: Vec<Vec<usize>>,
    ) -> Self {
        let inverse = tree.codes().inverse();
        Self {
            notation,
            blocks,
            tree,
            inverse,
            dictionary,
            order,
        }
    }

    /// The encoded text of every block
    pub fn blocks(&self) -> &[String] {
        &self.blocks
    }

    /// The run notation of every block, as it was before Huffman coding
    ///
    /// This is not part of the Lua output.
    pub fn notation(&self) -> &[String] {
        &self.notation
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Rows of block numbers, counting from 1
    pub fn order(&self) -> &[Vec<usize>] {
        &self.order
    }

    /// Run every stage backwards for a single block
    pub fn decode_block(&self, index: usize) -> Result<Vec<u8>, BlockDecodeError> {
        let text = self
            .blocks
            .get(index)
            .ok_or(BlockDecodeError::NoSuchBlock { index })?;

        let packed = sixbit::decode(text).map_err(BlockDecodeError::OuterUnpack)?;
        let notation = String::from_utf8(huffman::decode(&packed, &self.inverse)?)?;
        let symbols = rle::decompress(&notation)?;
        let symbols = self.dictionary.expand(&symbols);

        sixbit::decode(&symbols).map_err(BlockDecodeError::InnerUnpack)
    }

    /// Check that every block decodes back into its original
    pub fn verify<B>(&self, originals: &[B]) -> Result<(), VerificationError>
    where
        B: AsRef<[u8]> + Sync,
    {
        if originals.len() != self.blocks.len() {
            return Err(VerificationError::BlockCount {
                expected: originals.len(),
                found: self.blocks.len(),
            });
        }

        originals
            .par_iter()
            .enumerate()
            .try_for_each(|(block, original)| {
                let decoded = self
                    .decode_block(block)
                    .map_err(|source| VerificationError::Decode { block, source })?;

                if decoded != original.as_ref() {
                    return Err(VerificationError::Mismatch { block });
                }

                Ok(())
            })
    }

    /// Render the data as a Lua source fragment
    ///
    /// ```text
    /// M_DATA = {
    ///     "<block>",
    /// }
    /// M_CODE = {<tree>}
    /// M_PATTERNS = {{1,2,3,4},...}
    /// ```
    pub fn to_lua(&self) -> String {
        let mut lua = String::from("M_DATA = {\n");
        for block in &self.blocks {
            lua.push_str("\t\"");
            lua.push_str(block);
            lua.push_str("\",\n");
        }
        lua.push_str("}\n");

        lua.push_str("M_CODE = ");
        lua.push_str(&self.tree.to_lua());
        lua.push('\n');

        let rows: Vec<String> = self
            .order
            .iter()
            .map(|row| {
                let numbers: Vec<String> = row.iter().map(ToString::to_string).collect();
                format!("{{{}}}", numbers.join(","))
            })
            .collect();
        lua.push_str("M_PATTERNS = {");
        lua.push_str(&rows.join(","));
        lua.push_str("}\n");

        lua
    }

    /// Serialize the Lua fragment to an arbitrary I/O writer
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), io::Error>
    where
        W: Write,
    {
        writer.write_all(self.to_lua().as_bytes())
    }

    /// Serialize the Lua fragment to a path on disk
    pub fn to_path<P>(&self, path: P) -> Result<(), io::Error>
    where
        P: AsRef<Path>,
    {
        self.to_writer(std::fs::File::create(path)?)
    }
}

/// Errors that might be returned from [`MusicData::decode_block()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockDecodeError {
    /// There is no block at the requested index
    #[error("There is no block {index}")]
    NoSuchBlock { index: usize },

    /// The block text is not a valid symbol string
    #[error("Unpacking the block text failed")]
    OuterUnpack(#[source] sixbit::DecodeError),

    /// The Huffman bitstream is invalid
    #[error("Huffman decoding failed")]
    Huffman(#[from] huffman::DecodeError),

    /// The Huffman decoded bytes aren't text
    #[error("The Huffman decoded bytes are not valid UTF-8")]
    NotText(#[from] FromUtf8Error),

    /// The run notation is malformed
    #[error("Expanding the run notation failed")]
    Notation(#[from] DecompressError),

    /// The expanded symbols don't unpack into bytes
    #[error("Unpacking the expanded symbols failed")]
    InnerUnpack(#[source] sixbit::DecodeError),
}

/// Errors that might be returned from [`MusicData::verify()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum VerificationError {
    /// The number of encoded blocks doesn't match the number of originals
    #[error("Expected {expected} blocks, found {found}")]
    BlockCount { expected: usize, found: usize },

    /// A block could not be decoded at all
    #[error("Decoding block {block} failed")]
    Decode {
        block: usize,
        #[source]
        source: BlockDecodeError,
    },

    /// A block decoded into something other than its original
    #[error("Block {block} does not decode into its original")]
    Mismatch { block: usize },
}
