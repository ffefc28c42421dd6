use anyhow::{Context, Error, Result};
use std::{
    fs,
    io::stdin,
    path::{Path, PathBuf},
};
use ticmusic::{dictionary::Dictionary, pipeline::PipelineConfig};
use walkdir::{DirEntry, WalkDir};

pub fn iter_files<'a, I>(
    paths: I,
    recursive: bool,
    extensions: &'a [&'static str],
) -> impl Iterator<Item = DirEntry> + 'a
where
    I: IntoIterator + 'a,
    <I as IntoIterator>::Item: AsRef<Path>,
{
    paths
        .into_iter()
        .flat_map(move |path| {
            let mut walk_dir = WalkDir::new(path.as_ref()).sort_by_file_name();
            if !recursive {
                walk_dir = walk_dir.max_depth(1);
            }

            walk_dir
        })
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.file_type().is_file()
                && !is_hidden(entry)
                && extensions
                    .iter()
                    .any(|extension| has_extension(entry.path(), extension))
        })
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

pub fn has_extension(path: &Path, extension: &str) -> bool {
    match path.extension() {
        Some(ext) => ext == extension,
        None => false,
    }
}

/// Read every `.bin` file under the given paths
pub fn read_block_files<I>(paths: I, recursive: bool) -> Result<Vec<(PathBuf, Vec<u8>)>>
where
    I: IntoIterator,
    <I as IntoIterator>::Item: AsRef<Path>,
{
    let mut files = Vec::new();
    for entry in iter_files(paths, recursive, &["bin"]) {
        let path = entry.into_path();
        let bytes = fs::read(&path).context(format!("Could not read {}", path.display()))?;
        files.push((path, bytes));
    }

    if files.is_empty() {
        return Err(Error::msg("No .bin files found"));
    }

    Ok(files)
}

/// Read a block order: a JSON array of arrays of block numbers
pub fn read_order(path: &Path) -> Result<Vec<Vec<usize>>> {
    let file = fs::File::open(path).context(format!("Could not open {}", path.display()))?;

    serde_json::from_reader(file)
        .context(format!("Could not parse the block order in {}", path.display()))
}

pub fn pipeline_config(block_len: usize, substitute: bool, verify: bool) -> PipelineConfig {
    PipelineConfig {
        block_len,
        dictionary: if substitute {
            Dictionary::patterns()
        } else {
            Dictionary::default()
        },
        verify,
        ..Default::default()
    }
}

/// Ask before overwriting an existing file, returns whether writing may go ahead
pub fn check_for_overwrite(path: &Path) -> Result<bool> {
    if path.exists() {
        loop {
            println!(
                "{} already exists. Do you want to overwrite it? Y/n",
                path.to_string_lossy()
            );

            let mut line = String::new();
            stdin()
                .read_line(&mut line)
                .context("Could not read terminal input")?;

            match line.trim_end() {
                "Y" => break,
                "n" => return Ok(false),
                _ => (),
            }
        }
    }

    Ok(true)
}
