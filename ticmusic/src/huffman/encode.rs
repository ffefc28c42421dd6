use super::code::CodeTable;
use crate::bits;
use thiserror::Error;

/// Encode data into a packed bitstream
///
/// Code bits are written least significant bit first within every byte. The first byte of
/// the output records how many bits of the final byte are significant (8 if it's full).
pub fn encode(data: &[u8], codes: &CodeTable) -> Result<Vec<u8>, EncodeError> {
    let mut bytes = Vec::with_capacity(1 + data.len() / 2);
    bytes.push(0);

    let mut current = 0_u8;
    let mut filled = 0_u8;
    for (index, byte) in data.iter().enumerate() {
        let code = codes
            .get(*byte)
            .ok_or(EncodeError::UnknownSymbol { byte: *byte, index })?;

        for bit in code.bits() {
            current |= u8::from(*bit) << filled;
            filled += 1;

            if filled == 8 {
                bytes.push(current);
                current = 0;
                filled = 0;
            }
        }
    }

    if filled > 0 {
        bytes.push(current);
    }

    bytes[0] = bits::header(filled);
    Ok(bytes)
}

/// Errors that might be returned from [`encode()`]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodeError {
    /// The data contains a byte that the tree was not built for
    #[error("Byte {byte:#04x} at position {index} has no code")]
    UnknownSymbol { byte: u8, index: usize },
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::huffman::HuffmanTree;

    #[test]
    fn packing() {
        // A = 1, B = 01, C = 00
        let tree = HuffmanTree::from_bytes(b"AAAABBC").unwrap();

        // 1 01 00 → bits 1,0,1,0,0 LSB first = 0b00101, 5 significant bits
        assert_eq!(encode(b"ABC", tree.codes()).unwrap(), [5, 0b0000_0101]);

        // Eight A's fill exactly one byte
        assert_eq!(encode(b"AAAAAAAA", tree.codes()).unwrap(), [8, 0xFF]);

        assert_eq!(encode(b"", tree.codes()).unwrap(), [8]);
    }

    #[test]
    fn unknown() {
        let tree = HuffmanTree::from_bytes(b"AB").unwrap();
        assert_eq!(
            encode(b"ABX", tree.codes()),
            Err(EncodeError::UnknownSymbol {
                byte: b'X',
                index: 2
            })
        );
    }
}
