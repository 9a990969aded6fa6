//! Per-character metadata files (`Chara.xml`)

use crate::query::{self, Fallback, Missing};
use log::debug;
use roxmltree::Node;
use serde::Serialize;
use std::{
    borrow::Cow,
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
    str::FromStr,
};
use thiserror::Error;

/// The identifying metadata of a single character
///
/// Serializes with its keys in declaration order: `id`, `name`, `genre`, `updateTime`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub id: i64,
    pub name: String,
    pub genre: String,

    /// Zero when the file doesn't carry a (numeric) net open date
    pub update_time: i64,
}

impl CharacterRecord {
    pub const ID_PATH: &'static str = "name/id";
    pub const NAME_PATH: &'static str = "name/str";
    pub const GENRE_PATH: &'static str = "genre/str";
    pub const UPDATE_TIME_PATH: &'static str = "netOpenName/id";

    /// Read and extract a character from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> Result<Self, FromReaderError>
    where
        R: Read,
    {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;

        Ok(xml.parse()?)
    }

    /// Read and extract a character from a path on disk
    ///
    /// Errors carry the path, so a failing file can be found among many.
    pub fn from_path<P>(path: P) -> Result<Self, FromPathError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();

        fs::File::open(path)
            .map_err(FromReaderError::from)
            .and_then(Self::from_reader)
            .map_err(|source| FromPathError {
                path: path.to_owned(),
                source,
            })
    }

    fn extract(root: Node) -> Result<Self, FromStrError> {
        let id = required(root, Self::ID_PATH)?;
        let id: i64 = id.parse().map_err(|_| FromStrError::InvalidInteger {
            path: Self::ID_PATH,
            text: id.to_string(),
        })?;

        let name = required(root, Self::NAME_PATH)?.into_owned();
        let genre = required(root, Self::GENRE_PATH)?.into_owned();

        let update_time = query::text_at(root, Self::UPDATE_TIME_PATH).parse_or(0i64);
        if let Fallback::Defaulted { value, reason } = update_time {
            debug!("Character {id} has no update time ({reason}), using {value}");
        }
        let update_time = update_time.into_inner();

        Ok(Self {
            id,
            name,
            genre,
            update_time,
        })
    }
}

impl FromStr for CharacterRecord {
    type Err = FromStrError;

    /// Extract a character from an XML string
    ///
    /// `name/id`, `name/str` and `genre/str` must be present with text. `netOpenName/id`
    /// is optional and falls back to zero.
    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        let document = query::parse_document(xml)?;
        CharacterRecord::extract(document.root_element())
    }
}

fn required<'a>(root: Node<'a, '_>, path: &'static str) -> Result<Cow<'a, str>, FromStrError> {
    query::text_at(root, path)
        .required()
        .map_err(|missing| match missing {
            Missing::Element => FromStrError::MissingElement(path),
            Missing::Text => FromStrError::MissingText(path),
        })
}

/// Errors that might be returned from [`CharacterRecord::from_str()`]
#[derive(Debug, Error)]
pub enum FromStrError {
    /// The document is not well-formed XML
    #[error("The document is not valid XML")]
    Parse(#[from] roxmltree::Error),

    /// A required element doesn't exist
    #[error("Required element {0} is missing")]
    MissingElement(&'static str),

    /// A required element exists, but has no text
    #[error("Required element {0} has no text")]
    MissingText(&'static str),

    /// A required integer field holds something else
    #[error("{path} is not an integer: {text:?}")]
    InvalidInteger { path: &'static str, text: String },
}

/// Errors that might be returned from [`CharacterRecord::from_reader()`]
#[derive(Debug, Error)]
pub enum FromReaderError {
    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Read(#[from] io::Error),

    /// The contents could not be turned into a character
    #[error("Extracting the character failed")]
    Extract(#[from] FromStrError),
}

/// Errors that might be returned from [`CharacterRecord::from_path()`]
#[derive(Debug, Error)]
#[error("Could not read a character from {}", .path.display())]
pub struct FromPathError {
    /// The offending file
    pub path: PathBuf,

    #[source]
    pub source: FromReaderError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn chara(body: &str) -> String {
        format!("<CharaData>{body}</CharaData>")
    }

    #[test]
    fn full() {
        let source = include_str!("../test/Chara.xml");
        let record = CharacterRecord::from_str(source).unwrap();

        assert_eq!(
            record,
            CharacterRecord {
                id: 101,
                name: "らいむっくま".to_owned(),
                genre: "maimai".to_owned(),
                update_time: 230711,
            }
        );
    }

    #[test]
    fn json_keys() {
        let xml = chara("<name><id>7</id><str>Aoi</str></name><genre><str>Pop</str></genre>");
        let record = CharacterRecord::from_str(&xml).unwrap();

        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"id":7,"name":"Aoi","genre":"Pop","updateTime":0}"#
        );
    }

    #[test]
    fn update_time_falls_back_to_zero() {
        let base = "<name><id>1</id><str>A</str></name><genre><str>G</str></genre>";

        for update in [
            "",
            "<netOpenName/>",
            "<netOpenName><id/></netOpenName>",
            "<netOpenName><id>tomorrow</id></netOpenName>",
        ] {
            let xml = chara(&format!("{base}{update}"));
            let record = CharacterRecord::from_str(&xml).unwrap();
            assert_eq!(record.update_time, 0, "{update}");
        }

        let xml = chara(&format!("{base}<netOpenName><id> 42 </id></netOpenName>"));
        assert_eq!(CharacterRecord::from_str(&xml).unwrap().update_time, 42);
    }

    #[test]
    fn trims_text() {
        let xml = chara("<name><id> 3 </id><str>\n  Aoi \n</str></name><genre><str> Pop</str></genre>");
        let record = CharacterRecord::from_str(&xml).unwrap();

        assert_eq!(record.id, 3);
        assert_eq!(record.name, "Aoi");
        assert_eq!(record.genre, "Pop");
    }

    #[test]
    fn missing_required() {
        let missing_name = chara("<name><id>1</id></name><genre><str>G</str></genre>");
        assert!(matches!(
            CharacterRecord::from_str(&missing_name),
            Err(FromStrError::MissingElement("name/str"))
        ));

        let empty_genre = chara("<name><id>1</id><str>A</str></name><genre><str></str></genre>");
        assert!(matches!(
            CharacterRecord::from_str(&empty_genre),
            Err(FromStrError::MissingText("genre/str"))
        ));

        let no_id = chara("<name><str>A</str></name><genre><str>G</str></genre>");
        assert!(matches!(
            CharacterRecord::from_str(&no_id),
            Err(FromStrError::MissingElement("name/id"))
        ));
    }

    #[test]
    fn invalid_id() {
        let xml = chara("<name><id>one</id><str>A</str></name><genre><str>G</str></genre>");

        match CharacterRecord::from_str(&xml) {
            Err(FromStrError::InvalidInteger { path, text }) => {
                assert_eq!(path, CharacterRecord::ID_PATH);
                assert_eq!(text, "one");
            }
            other => panic!("expected an invalid integer, got {other:?}"),
        }
    }

    #[test]
    fn fields_in_later_siblings() {
        let xml = chara("<name><str>A</str></name><name><id>7</id></name><genre><str>G</str></genre>");
        let record = CharacterRecord::from_str(&xml).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.name, "A");
    }

    #[test]
    fn document_type_declaration() {
        let xml = format!(
            "<?xml version=\"1.0\"?>\n<!DOCTYPE CharaData>\n{}",
            chara("<name><id>7</id><str>Aoi</str></name><genre><str>Pop</str></genre>")
        );

        assert_eq!(CharacterRecord::from_str(&xml).unwrap().id, 7);
    }

    #[test]
    fn comment_inside_id() {
        let xml = chara("<name><id><!-- legacy -->7</id><str>Aoi</str></name><genre><str>Pop</str></genre>");

        assert_eq!(CharacterRecord::from_str(&xml).unwrap().id, 7);
    }

    #[test]
    fn invalid_xml() {
        assert!(matches!(
            CharacterRecord::from_str("<CharaData><name>"),
            Err(FromStrError::Parse(_))
        ));
    }

    #[test]
    fn from_path_names_the_file() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("Chara.xml");
        fs::write(&path, chara("<name><id>1</id></name>"))?;

        let error = CharacterRecord::from_path(&path).unwrap_err();
        assert_eq!(error.path, path);
        assert!(error.to_string().contains("Chara.xml"));
        assert!(matches!(
            error.source,
            FromReaderError::Extract(FromStrError::MissingElement("name/str"))
        ));

        Ok(())
    }
}
