//! The `music-sort` converter

use crate::utils::write_output;
use anyhow::{Context, Result};
use assetxml::sort::SortList;
use clap::Parser;
use log::info;
use std::path::PathBuf;

/// Arguments for the `music-sort` converter
#[derive(Parser)]
#[clap(
    author,
    version,
    about = "Convert a music sort XML into a JSON array of track ids",
    long_about = "Reads every StringID/id found under a SortList element, in document order, and writes them as a compact JSON array.\n\nEntries without an id are skipped. The output file is overwritten."
)]
pub struct MusicSortArgs {
    /// The sort list XML to convert
    path: PathBuf,

    /// Where the JSON array should be written
    #[clap(short, long, default_value = SortConfig::DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Log what the converter is doing
    #[clap(short, long)]
    pub verbose: bool,
}

/// Everything the converter needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// The sort list XML to read
    pub input: PathBuf,

    /// The JSON file to write
    pub output: PathBuf,
}

impl SortConfig {
    pub const DEFAULT_OUTPUT: &'static str = "src/assets/music/sort.json";
}

impl From<MusicSortArgs> for SortConfig {
    fn from(args: MusicSortArgs) -> Self {
        Self {
            input: args.path,
            output: args.output,
        }
    }
}

/// Convert a sort list XML into a JSON array of ids
///
/// Nothing is written unless the whole document was read successfully.
pub fn music_sort(config: &SortConfig) -> Result<()> {
    let list = SortList::from_path(&config.input).context(format!(
        "Could not read a sort list from {}",
        config.input.display()
    ))?;
    info!("Extracted {} ids from {}", list.len(), config.input.display());

    let mut json = Vec::new();
    list.to_writer(&mut json)
        .context("Could not serialize the sort list")?;

    write_output(&config.output, &json)?;

    println!(
        "Updated the music sort with {} tracks. Output file: {}",
        list.len(),
        config.output.display()
    );

    Ok(())
}
