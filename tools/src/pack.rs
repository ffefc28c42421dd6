//! The `pack` subcommand

use crate::utils::{check_for_overwrite, pipeline_config, read_block_files, read_order};
use anyhow::{Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;
use ticmusic::pipeline::{Pipeline, PipelineConfig};

/// Arguments for the `pack` subcommand
#[derive(Args)]
#[clap(version, about = "Pack raw pattern blocks into a Lua music data fragment", long_about = None)]
pub struct PackArgs {
    /// Files (or folders of .bin files) containing the raw pattern blocks
    paths: Vec<PathBuf>,

    /// The Lua file to write
    #[clap(short, long)]
    output: PathBuf,

    /// The number of bytes in a single block
    #[clap(long, default_value_t = PipelineConfig::DEFAULT_BLOCK_LEN)]
    block_len: usize,

    /// A JSON file with the block order, as an array of arrays of block numbers
    #[clap(long)]
    order: Option<PathBuf>,

    /// Replace common symbol sequences with single markers before run compression
    #[clap(short, long)]
    substitute: bool,

    /// Don't check that the output decodes back into the input
    #[clap(long)]
    no_verify: bool,

    /// Should folders be walked recursively
    #[clap(short, long)]
    recursive: bool,
}

/// Pack raw pattern blocks into a Lua music data fragment
pub fn pack(args: PackArgs) -> Result<()> {
    let pipeline = Pipeline::new(pipeline_config(
        args.block_len,
        args.substitute,
        !args.no_verify,
    ));

    let files = read_block_files(&args.paths, args.recursive)?;

    let mut blocks = Vec::new();
    for (path, bytes) in &files {
        let split = pipeline
            .split(bytes)
            .context(format!("Could not split {} into blocks", path.display()))?;

        info!("{} => {} block(s)", path.display(), split.len());
        blocks.extend(split);
    }

    let order = match &args.order {
        Some(path) => read_order(path)?,
        None => Vec::new(),
    };

    let data = pipeline
        .encode(&blocks, order)
        .context("Encoding the blocks failed")?;

    if check_for_overwrite(&args.output)? {
        data.to_path(&args.output).context(format!(
            "Could not write the music data to {}",
            args.output.display()
        ))?;

        let bytes: usize = blocks.iter().map(|block| block.len()).sum();
        let symbols: usize = data.blocks().iter().map(String::len).sum();
        println!(
            "Wrote {} blocks ({bytes} bytes => {symbols} symbols) to {}",
            blocks.len(),
            args.output.display()
        );
    }

    Ok(())
}
