//! The combined character list

use crate::chara::CharacterRecord;
use log::warn;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::{
    collections::HashSet,
    io::{self, Write},
};
use thiserror::Error;

/// Every character, ordered by id, along with the genres they belong to
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterCollection {
    /// All characters, ascending by id
    pub characters: Vec<CharacterRecord>,

    pub genres: Genres,
}

/// The distinct genres found among the characters
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Genres {
    /// Each genre once, in the order it first shows up when walking characters by id
    pub characters: Vec<String>,
}

impl CharacterCollection {
    /// The indentation used by [`CharacterCollection::to_writer()`]
    pub const INDENT: &'static [u8] = b"    ";

    /// Assemble a collection from records in discovery order
    ///
    /// The records are sorted by id. The sort is stable, so characters sharing an id keep
    /// their discovery order. Duplicate ids are kept, but reported.
    pub fn from_records(mut characters: Vec<CharacterRecord>) -> Self {
        characters.sort_by_key(|character| character.id);

        for pair in characters.windows(2) {
            if pair[0].id == pair[1].id {
                warn!(
                    "Characters {:?} and {:?} share id {}",
                    pair[0].name, pair[1].name, pair[0].id
                );
            }
        }

        let genres = first_seen(characters.iter().map(|character| character.genre.as_str()));

        Self {
            characters,
            genres: Genres { characters: genres },
        }
    }

    /// Serialize the collection as indented JSON, followed by a newline
    pub fn to_writer<W>(&self, mut writer: W) -> Result<(), ToWriterError>
    where
        W: Write,
    {
        let mut serializer =
            Serializer::with_formatter(&mut writer, PrettyFormatter::with_indent(Self::INDENT));
        self.serialize(&mut serializer)?;

        writer.write_all(b"\n")?;

        Ok(())
    }
}

impl FromIterator<CharacterRecord> for CharacterCollection {
    fn from_iter<I: IntoIterator<Item = CharacterRecord>>(iter: I) -> Self {
        Self::from_records(iter.into_iter().collect())
    }
}

/// Keep the first occurrence of every value, preserving order
fn first_seen<'a, I>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();

    values
        .into_iter()
        .filter(|value| seen.insert(*value))
        .map(str::to_owned)
        .collect()
}

/// Errors that might be returned from [`CharacterCollection::to_writer()`]
#[derive(Debug, Error)]
pub enum ToWriterError {
    /// Serialization into JSON failed
    #[error("Could not serialize the collection to JSON")]
    Json(#[from] serde_json::Error),

    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Write(#[from] io::Error),
}
