mod common;

use anyhow::Result;
use rstest::*;
use ticmusic::{alphabet, sixbit};

#[rstest]
#[case(0)]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(5)]
#[case(192)]
#[case(1000)]
fn round_trip(#[case] len: usize) -> Result<()> {
    let bytes = common::bytes(len as u64, len);
    let symbols = sixbit::encode(&bytes);

    assert_eq!(symbols.len(), 1 + (len * 8).div_ceil(6));
    assert!(symbols.chars().all(alphabet::contains));
    assert_eq!(sixbit::decode(&symbols)?, bytes);

    Ok(())
}

#[test]
fn every_single_byte() -> Result<()> {
    for byte in 0..=u8::MAX {
        assert_eq!(sixbit::decode(&sixbit::encode(&[byte]))?, [byte]);
    }

    Ok(())
}

#[rstest]
#[case("", sixbit::DecodeError::MissingHeader)]
#[case("A", sixbit::DecodeError::InvalidHeader(0))]
#[case("CA~", sixbit::DecodeError::InvalidSymbol { symbol: '~', index: 2 })]
fn rejects(#[case] symbols: &str, #[case] error: sixbit::DecodeError) {
    assert_eq!(sixbit::decode(symbols), Err(error));
}
