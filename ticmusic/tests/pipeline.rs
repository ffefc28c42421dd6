mod common;

use anyhow::Result;
use common::pattern_block;
use rstest::*;
use ticmusic::{
    alphabet,
    dictionary::Dictionary,
    pipeline::{Pipeline, PipelineConfig, PipelineError},
    sixbit,
};

fn pipeline(substitute: bool) -> Pipeline {
    Pipeline::new(PipelineConfig {
        dictionary: if substitute {
            Dictionary::patterns()
        } else {
            Dictionary::default()
        },
        ..Default::default()
    })
}

#[rstest]
#[case(false)]
#[case(true)]
fn structured_block(#[case] substitute: bool) -> Result<()> {
    let block = pattern_block(8, 0x40);
    assert_eq!(block.len(), 192);

    let data = pipeline(substitute).encode(&[&block], vec![vec![1]])?;
    let text = &data.blocks()[0];

    assert!(text.chars().all(alphabet::contains));
    assert!(text.len() < 256);
    assert_eq!(data.decode_block(0)?, block);

    Ok(())
}

#[rstest]
#[case(false)]
#[case(true)]
fn corpus(#[case] substitute: bool) -> Result<()> {
    let blocks = vec![
        pattern_block(4, 0x30),
        pattern_block(8, 0x40),
        pattern_block(16, 0x18),
        vec![0; 192],
        common::bytes(7, 192),
    ];

    let pipeline = pipeline(substitute);
    let data = pipeline.encode(&blocks, vec![vec![1, 2, 3, 4], vec![5, 0, 0, 0]])?;

    assert_eq!(data.blocks().len(), blocks.len());
    data.verify(&blocks)?;

    for (index, block) in blocks.iter().enumerate() {
        assert_eq!(&data.decode_block(index)?, block);
    }

    Ok(())
}

#[test]
fn split_then_encode() -> Result<()> {
    let raw: Vec<u8> = [pattern_block(4, 0x30), pattern_block(2, 0x22)].concat();

    let pipeline = Pipeline::default();
    let blocks = pipeline.split(&raw)?;
    assert_eq!(blocks.len(), 2);

    let data = pipeline.encode(&blocks, Vec::new())?;
    assert_eq!(data.decode_block(1)?, &raw[192..]);

    assert_eq!(
        pipeline.split(&raw[..100]),
        Err(PipelineError::BlockLength {
            len: 100,
            block_len: 192
        })
    );

    Ok(())
}

#[test]
fn lua_fragment() -> Result<()> {
    let blocks = [pattern_block(8, 0x40), pattern_block(4, 0x41)];
    let data = Pipeline::default().encode(&blocks, vec![vec![1, 2], vec![2, 1]])?;
    let lua = data.to_lua();

    let expected_data = format!(
        "M_DATA = {{\n\t\"{}\",\n\t\"{}\",\n}}\n",
        data.blocks()[0],
        data.blocks()[1]
    );
    assert!(lua.starts_with(&expected_data));
    assert!(lua.contains(&format!("M_CODE = {}\n", data.tree().to_lua())));
    assert!(lua.ends_with("M_PATTERNS = {{1,2},{2,1}}\n"));

    Ok(())
}

#[test]
fn substitution_never_grows() -> Result<()> {
    let dictionary = Dictionary::patterns();

    for note in 0x30..0x34 {
        let symbols = sixbit::encode(&pattern_block(4, note));
        let substituted = dictionary.substitute(&symbols);

        assert!(substituted.len() <= symbols.len());
        assert_eq!(dictionary.expand(&substituted), symbols);
    }

    Ok(())
}
