//! The `chara-list` generator

use crate::utils::write_output;
use anyhow::{Context, Result};
use assetxml::{chara::CharacterRecord, collection::CharacterCollection, layout::CharaLayout};
use clap::Parser;
use log::info;
use std::path::{Path, PathBuf};

/// Arguments for the `chara-list` generator
#[derive(Parser)]
#[clap(
    author,
    version,
    about = "Collect chara*/Chara.xml files into a single JSON character list",
    long_about = "Reads the id, name, genre and net open date of every character folder, sorts the characters by id and writes them together with the list of genres they use.\n\nA character file missing its id, name or genre aborts the run without writing anything."
)]
pub struct CharaListArgs {
    /// The folder containing the character folders
    #[clap(short, long, default_value = ".")]
    base: PathBuf,

    /// Where the JSON should be written. Defaults to chara.json next to the base folder
    #[clap(short, long)]
    output: Option<PathBuf>,

    /// Log what the generator is doing
    #[clap(short, long)]
    pub verbose: bool,
}

/// Everything the generator needs to know
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharaConfig {
    /// The folder containing the character folders
    pub base: PathBuf,

    /// The JSON file to write
    pub output: PathBuf,

    /// How character files are laid out under `base`
    pub layout: CharaLayout,
}

impl CharaConfig {
    pub const OUTPUT_NAME: &'static str = "chara.json";

    /// Read from `base` with the default layout, and write next to it
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();

        Self {
            output: Self::default_output(&base),
            base,
            layout: CharaLayout::default(),
        }
    }

    /// `chara.json`, placed beside the base folder
    pub fn default_output(base: &Path) -> PathBuf {
        match base.file_name() {
            Some(_) => base.with_file_name(Self::OUTPUT_NAME),
            None => base.join("..").join(Self::OUTPUT_NAME),
        }
    }
}

impl From<CharaListArgs> for CharaConfig {
    fn from(args: CharaListArgs) -> Self {
        let mut config = Self::new(args.base);
        if let Some(output) = args.output {
            config.output = output;
        }

        config
    }
}

/// Collect every character file into a single JSON character list
///
/// The first file that fails to parse, or lacks a required field, aborts the run before
/// anything is written.
pub fn chara_list(config: &CharaConfig) -> Result<()> {
    let paths = config.layout.find_files(&config.base).context(format!(
        "Could not look for characters in {}",
        config.base.display()
    ))?;

    let records = paths
        .iter()
        .map(CharacterRecord::from_path)
        .collect::<Result<Vec<_>, _>>()
        .context("Collecting the characters failed")?;

    let collection = CharacterCollection::from_records(records);
    info!(
        "Collected {} characters in {} genres",
        collection.characters.len(),
        collection.genres.characters.len()
    );

    let mut json = Vec::new();
    collection
        .to_writer(&mut json)
        .context("Could not serialize the character list")?;

    write_output(&config.output, &json)
}
