//! The `inspect` subcommand

use crate::utils::{pipeline_config, read_block_files};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::{fs, path::PathBuf};
use ticmusic::{
    pipeline::{MusicData, Pipeline, PipelineConfig},
    rle::{self, RunToken},
    sixbit,
};

/// Arguments for the `inspect` subcommand
#[derive(Args)]
#[clap(
    version,
    about = "Show how well every block compresses at every stage",
    long_about = "Inspect runs the pattern blocks through the complete pipeline, and lists for every block how many characters are left after each stage.\n\nThe repeats column counts the runs in the notation, the depth column shows how deeply they are nested.\n\nInspect is also capable of writing this data to a json file instead."
)]
pub struct InspectArgs {
    /// Files (or folders of .bin files) containing the raw pattern blocks
    paths: Vec<PathBuf>,

    /// The number of bytes in a single block
    #[clap(long, default_value_t = PipelineConfig::DEFAULT_BLOCK_LEN)]
    block_len: usize,

    /// Replace common symbol sequences with single markers before run compression
    #[clap(short, long)]
    substitute: bool,

    /// Should folders be walked recursively
    #[clap(short, long)]
    recursive: bool,

    /// A JSON file the outcome should be written to
    #[clap(long)]
    json: Option<PathBuf>,
}

#[derive(Serialize)]
struct Outcome {
    blocks: Vec<BlockStages>,
    codes: usize,
    bytes: usize,
    packed: usize,
    encoded: usize,
}

#[derive(Serialize)]
struct BlockStages {
    path: PathBuf,
    index: usize,
    bytes: usize,
    packed: usize,
    substituted: usize,
    compressed: usize,
    repeats: usize,
    depth: usize,
    encoded: usize,
}

/// Show how well every block compresses at every stage
pub fn inspect(args: &InspectArgs) -> Result<()> {
    let pipeline = Pipeline::new(pipeline_config(args.block_len, args.substitute, true));
    let outcome = measure(&pipeline, args)?;

    if let Some(path) = &args.json {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .context(format!("Could not create folder at {}", parent.display()))?;
        }

        let file = fs::File::create(path)
            .context(format!("Could not create file at {}", path.display()))?;

        serde_json::to_writer_pretty(file, &outcome).context("Could not write to JSON")?;

        println!("Wrote to {}", path.display());
    } else {
        print_outcome(&outcome);
    }

    Ok(())
}

fn measure(pipeline: &Pipeline, args: &InspectArgs) -> Result<Outcome> {
    let files = read_block_files(&args.paths, args.recursive)?;

    let mut blocks = Vec::new();
    let mut origins = Vec::new();

    for (path, bytes) in &files {
        let split = pipeline
            .split(bytes)
            .context(format!("Could not split {} into blocks", path.display()))?;

        for (index, block) in split.into_iter().enumerate() {
            origins.push((path, index));
            blocks.push(block);
        }
    }

    let data = pipeline
        .encode(&blocks, Vec::new())
        .context("Encoding the blocks failed")?;

    let stages = block_stages(pipeline, &blocks, &origins, &data)?;

    Ok(Outcome {
        codes: data.tree().codes().len(),
        bytes: stages.iter().map(|stage| stage.bytes).sum(),
        packed: stages.iter().map(|stage| stage.packed).sum(),
        encoded: stages.iter().map(|stage| stage.encoded).sum(),
        blocks: stages,
    })
}

fn block_stages(
    pipeline: &Pipeline,
    blocks: &[&[u8]],
    origins: &[(&PathBuf, usize)],
    data: &MusicData,
) -> Result<Vec<BlockStages>> {
    blocks
        .iter()
        .zip(origins)
        .zip(data.notation().iter().zip(data.blocks()))
        .map(|((block, (path, index)), (notation, encoded))| {
            let packed = sixbit::encode(block);
            let substituted = pipeline.config().dictionary.substitute(&packed);
            let tokens = rle::parse(notation).context(format!(
                "Could not parse the run notation of block {index} of {}",
                path.display()
            ))?;

            Ok(BlockStages {
                path: (*path).clone(),
                index: *index,
                bytes: block.len(),
                packed: packed.len(),
                substituted: substituted.len(),
                compressed: notation.len(),
                repeats: count_repeats(&tokens),
                depth: tokens.iter().map(RunToken::depth).max().unwrap_or_default(),
                encoded: encoded.len(),
            })
        })
        .collect()
}

fn count_repeats(tokens: &[RunToken]) -> usize {
    tokens
        .iter()
        .map(|token| match token {
            RunToken::Literal(_) => 0,
            RunToken::Repeat { base, .. } => 1 + count_repeats(base),
        })
        .sum()
}

fn print_outcome(outcome: &Outcome) {
    let mut current = None;

    for stage in &outcome.blocks {
        if current != Some(&stage.path) {
            if current.is_some() {
                println!();
            }

            println!("{}", stage.path.display());
            println!("idx | bytes | packed | subst | runs | final | repeats | depth");
            current = Some(&stage.path);
        }

        println!(
            "{:>3} | {:>5} | {:>6} | {:>5} | {:>4} | {:>5} | {:>7} | {:>5}",
            stage.index,
            stage.bytes,
            stage.packed,
            stage.substituted,
            stage.compressed,
            stage.encoded,
            stage.repeats,
            stage.depth
        );
    }

    println!();
    println!(
        "{} blocks, {} bytes => {} packed symbols => {} symbols ({} codes)",
        outcome.blocks.len(),
        outcome.bytes,
        outcome.packed,
        outcome.encoded,
        outcome.codes
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_follow_the_encode_pass() {
        let pipeline = Pipeline::default();
        let path = PathBuf::from("patterns.bin");
        let blocks: [&[u8]; 2] = [&[0; 36], &[7; 36]];
        let origins = [(&path, 0), (&path, 1)];

        let data = pipeline.encode(&blocks, Vec::new()).unwrap();
        let stages = block_stages(&pipeline, &blocks, &origins, &data).unwrap();

        assert_eq!(stages.len(), 2);
        assert_eq!(stages[0].index, 0);
        assert_eq!(stages[0].packed, 49);
        assert_eq!(stages[0].compressed, "I#48[A]".len());
        assert_eq!(stages[0].repeats, 1);
        assert_eq!(stages[1].index, 1);
        assert_eq!(stages[1].encoded, data.blocks()[1].len());
    }

    #[test]
    fn repeats() {
        let tokens = rle::parse("AB#2[C#3[DE]F]#4[G]").unwrap();
        assert_eq!(count_repeats(&tokens), 3);
        assert_eq!(tokens.iter().map(RunToken::depth).max(), Some(2));
    }
}
