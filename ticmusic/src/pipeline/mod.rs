//! The full encoding chain, from raw pattern blocks to printable text
//!
//! Every block is packed into symbols, optionally run through a [`Dictionary`], and run
//! compressed. One Huffman tree is then built over the whole corpus of compressed texts,
//! after which every text is Huffman coded and packed into symbols once more. The result
//! is a [`MusicData`], which can be verified against the input and exported to Lua.

mod music_data;

pub use music_data::{BlockDecodeError, MusicData, VerificationError};

use crate::{
    dictionary::Dictionary,
    huffman::{self, BuildTreeError, EncodeError, FrequencyTable, HuffmanTree},
    rle::{CompressError, RunCompressor},
    sixbit,
};
use log::{debug, info};
use rayon::prelude::*;
use thiserror::Error;

/// Settings for a [`Pipeline`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// The number of bytes in a single block
    pub block_len: usize,

    /// Substitutions applied between packing and run compression
    pub dictionary: Dictionary,

    /// The maximum number of replacements the run compressor makes per block
    pub max_rounds: usize,

    /// Decode the output and compare it with the input before returning it
    pub verify: bool,
}

impl PipelineConfig {
    /// Half of an uncompressed pattern
    pub const DEFAULT_BLOCK_LEN: usize = 192;
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            block_len: Self::DEFAULT_BLOCK_LEN,
            dictionary: Dictionary::default(),
            max_rounds: RunCompressor::DEFAULT_MAX_ROUNDS,
            verify: true,
        }
    }
}

/// Encodes a corpus of blocks into [`MusicData`]
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    compressor: RunCompressor,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let compressor = RunCompressor::new().with_max_rounds(config.max_rounds);
        Self { config, compressor }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Cut raw data into blocks of the configured length
    pub fn split<'a>(&self, data: &'a [u8]) -> Result<Vec<&'a [u8]>, PipelineError> {
        let block_len = self.config.block_len;
        if block_len == 0 {
            return Err(PipelineError::InvalidBlockLength);
        }

        if data.len() % block_len != 0 {
            return Err(PipelineError::BlockLength {
                len: data.len(),
                block_len,
            });
        }

        Ok(data.chunks_exact(block_len).collect())
    }

    /// Pack, substitute and run compress a single block
    pub fn compress_block(&self, block: &[u8]) -> Result<String, CompressError> {
        let symbols = sixbit::encode(block);
        let substituted = self.config.dictionary.substitute(&symbols);
        let compressed = self.compressor.compress(&substituted)?;

        debug!(
            "Compressed a block of {} bytes: {} symbols, {} after substitution, {} after run compression",
            block.len(),
            symbols.len(),
            substituted.len(),
            compressed.len()
        );

        Ok(compressed)
    }

    /// Encode a corpus of blocks
    ///
    /// `order` lists rows of block numbers that refer to `blocks` counting from 1, with 0
    /// standing for "no block". It is carried along into the output untouched.
    pub fn encode<B>(&self, blocks: &[B], order: Vec<Vec<usize>>) -> Result<MusicData, PipelineError>
    where
        B: AsRef<[u8]> + Sync,
    {
        for (row, numbers) in order.iter().enumerate() {
            if let Some(number) = numbers.iter().find(|number| **number > blocks.len()) {
                return Err(PipelineError::OrderOutOfRange {
                    row,
                    number: *number,
                    blocks: blocks.len(),
                });
            }
        }

        let texts = blocks
            .par_iter()
            .enumerate()
            .map(|(block, bytes)| {
                self.compress_block(bytes.as_ref())
                    .map_err(|source| PipelineError::Compress { block, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut frequencies = FrequencyTable::new();
        for text in &texts {
            frequencies.add(text.as_bytes());
        }

        let tree = HuffmanTree::build(&frequencies)?;

        let encoded = texts
            .par_iter()
            .enumerate()
            .map(|(block, text)| {
                huffman::encode(text.as_bytes(), tree.codes())
                    .map(|bytes| sixbit::encode(&bytes))
                    .map_err(|source| PipelineError::Encode { block, source })
            })
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            "Encoded {} blocks: {} bytes in, {} symbols after run compression, {} symbols out ({} codes)",
            blocks.len(),
            blocks.iter().map(|block| block.as_ref().len()).sum::<usize>(),
            texts.iter().map(String::len).sum::<usize>(),
            encoded.iter().map(String::len).sum::<usize>(),
            tree.codes().len()
        );

        let data = MusicData::new(texts, encoded, tree, self.config.dictionary.clone(), order);

        if self.config.verify {
            data.verify(blocks)?;
            debug!("Verified all {} blocks", blocks.len());
        }

        Ok(data)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(PipelineConfig::default())
    }
}

/// Errors that might be returned from [`Pipeline`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    /// A block length of zero can't split anything
    #[error("The block length must be larger than zero")]
    InvalidBlockLength,

    /// The data doesn't divide into whole blocks
    #[error("{len} bytes don't divide into blocks of {block_len}")]
    BlockLength { len: usize, block_len: usize },

    /// The block order refers to a block that doesn't exist
    #[error("Order row {row} refers to block {number}, but there are only {blocks}")]
    OrderOutOfRange {
        row: usize,
        number: usize,
        blocks: usize,
    },

    /// Run compression of a block failed
    #[error("Compressing block {block} failed")]
    Compress {
        block: usize,
        #[source]
        source: CompressError,
    },

    /// The corpus was empty
    #[error("Building the Huffman tree failed")]
    BuildTree(#[from] BuildTreeError),

    /// Huffman coding of a block failed
    #[error("Huffman coding block {block} failed")]
    Encode {
        block: usize,
        #[source]
        source: EncodeError,
    },

    /// The output doesn't decode to the input
    #[error("Verifying the output failed")]
    Verification(#[from] VerificationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split() {
        let pipeline = Pipeline::new(PipelineConfig {
            block_len: 4,
            ..Default::default()
        });

        let data = [0, 1, 2, 3, 4, 5, 6, 7];
        assert_eq!(
            pipeline.split(&data).unwrap(),
            [&data[..4], &data[4..]]
        );

        assert_eq!(
            pipeline.split(&data[..6]),
            Err(PipelineError::BlockLength {
                len: 6,
                block_len: 4
            })
        );

        let pipeline = Pipeline::new(PipelineConfig {
            block_len: 0,
            ..Default::default()
        });
        assert_eq!(pipeline.split(&data), Err(PipelineError::InvalidBlockLength));
    }

    #[test]
    fn compress_block() {
        let pipeline = Pipeline::default();

        // 36 zero bytes pack into a header and 48 'A' symbols
        assert_eq!(pipeline.compress_block(&[0; 36]).unwrap(), "I#48[A]");
    }

    #[test]
    fn order_out_of_range() {
        let pipeline = Pipeline::default();
        let blocks = [[0_u8; 12], [1; 12]];

        assert_eq!(
            pipeline.encode(&blocks, vec![vec![0, 1, 2], vec![3]]).unwrap_err(),
            PipelineError::OrderOutOfRange {
                row: 1,
                number: 3,
                blocks: 2
            }
        );
    }

    #[test]
    fn empty_corpus() {
        let blocks: [&[u8]; 0] = [];
        assert_eq!(
            Pipeline::default().encode(&blocks, Vec::new()).unwrap_err(),
            PipelineError::BuildTree(BuildTreeError::NoSymbols)
        );
    }

    #[test]
    fn encode_and_decode() {
        let pipeline = Pipeline::new(PipelineConfig {
            dictionary: Dictionary::patterns(),
            ..Default::default()
        });

        let blocks: Vec<Vec<u8>> = vec![vec![0; 24], (0..24).collect(), vec![0x41; 24]];
        let data = pipeline.encode(&blocks, vec![vec![1, 2, 3]]).unwrap();

        assert_eq!(data.blocks().len(), 3);
        for (index, block) in blocks.iter().enumerate() {
            assert_eq!(&data.decode_block(index).unwrap(), block);
            assert_eq!(data.notation()[index], pipeline.compress_block(block).unwrap());
        }
    }
}
