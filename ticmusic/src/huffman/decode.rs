use super::code::InverseCodeTable;
use crate::bits::{self, HEADER_RANGE};
use thiserror::Error;

/// Decode a bitstream produced by [`encode()`](super::encode)
///
/// Bits are accumulated one at a time and a byte is emitted as soon as they form a code
/// word. Because the code is prefix-free, the first match is always the right one.
pub fn decode(bytes: &[u8], codes: &InverseCodeTable) -> Result<Vec<u8>, DecodeError> {
    let (&header, data) = bytes.split_first().ok_or(DecodeError::MissingHeader)?;
    if !HEADER_RANGE.contains(&header) {
        return Err(DecodeError::InvalidHeader(header));
    }

    let mut out = Vec::with_capacity(data.len() * 2);
    let mut candidate = Vec::with_capacity(codes.max_len());

    for (position, byte) in data.iter().enumerate() {
        let significant = if position + 1 == data.len() { header } else { 8 };

        for index in 0..significant {
            candidate.push(bits::bit(*byte, index) == 1);

            if let Some(symbol) = codes.get(&candidate) {
                out.push(symbol);
                candidate.clear();
            } else if candidate.len() >= codes.max_len() {
                return Err(DecodeError::UnknownCode {
                    bit: position * 8 + index as usize,
                });
            }
        }
    }

    if !candidate.is_empty() {
        return Err(DecodeError::Truncated {
            bits: candidate.len(),
        });
    }

    Ok(out)
}

/// Errors that might be returned from [`decode()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// The input was empty, so not even the header byte was present
    #[error("The header byte is missing")]
    MissingHeader,

    /// The header byte holds a value outside of 1 through 8
    #[error("Header value {0} is out of range")]
    InvalidHeader(u8),

    /// The bits read so far are longer than any code word, yet match none
    #[error("No code matches the bits ending at bit {bit}")]
    UnknownCode { bit: usize },

    /// The stream ended in the middle of a code word
    #[error("The stream ended with {bits} unmatched bit(s)")]
    Truncated { bits: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::{HuffmanTree, encode};

    #[test]
    fn round_trip() {
        let data = b"#3[ABBA]#12[Q]xyzzyABCDEFFFF";
        let tree = HuffmanTree::from_bytes(data).unwrap();
        let encoded = encode(data, tree.codes()).unwrap();
        assert_eq!(decode(&encoded, &tree.codes().inverse()).unwrap(), data);
    }

    #[test]
    fn superset_corpus() {
        let tree = HuffmanTree::from_bytes(b"the quick brown fox jumps over the lazy dog").unwrap();
        let data = b"dozy fox";
        let encoded = encode(data, tree.codes()).unwrap();
        assert_eq!(decode(&encoded, &tree.codes().inverse()).unwrap(), data);
    }

    #[test]
    fn single_symbol() {
        let tree = HuffmanTree::from_bytes(b"Z").unwrap();
        let encoded = encode(b"ZZZ", tree.codes()).unwrap();
        assert_eq!(encoded, [3, 0]);
        assert_eq!(decode(&encoded, &tree.codes().inverse()).unwrap(), b"ZZZ");
    }

    #[test]
    fn ignores_padding() {
        // A = 1, B = 01, C = 00: "C" takes two bits, the remaining six are padding
        let tree = HuffmanTree::from_bytes(b"AAAABBC").unwrap();
        assert_eq!(decode(&[2, 0], &tree.codes().inverse()).unwrap(), b"C");
    }

    #[test]
    fn truncated() {
        let tree = HuffmanTree::from_bytes(b"AAAABBC").unwrap();
        let inverse = tree.codes().inverse();

        // A single 0 bit is only half of "B" or "C"
        assert_eq!(
            decode(&[1, 0], &inverse),
            Err(DecodeError::Truncated { bits: 1 })
        );
        assert_eq!(decode(&[], &inverse), Err(DecodeError::MissingHeader));
        assert_eq!(decode(&[0], &inverse), Err(DecodeError::InvalidHeader(0)));
    }

    #[test]
    fn unknown_code() {
        let tree = HuffmanTree::from_bytes(b"Z").unwrap();
        assert_eq!(
            decode(&[1, 1], &tree.codes().inverse()),
            Err(DecodeError::UnknownCode { bit: 0 })
        );
    }
}
