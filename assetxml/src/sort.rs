//! Music sort lists

use crate::query::{self, Text};
use log::debug;
use roxmltree::Node;
use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
    str::FromStr,
};
use thiserror::Error;

/// The ordered track identifiers found in a sort list document
///
/// The position of an identifier in [`SortList::ids`] is its sort rank. Identifiers are kept
/// exactly as they appear in the document: no sorting, no deduplication.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SortList {
    pub ids: Vec<i64>,
}

impl SortList {
    /// The container element whose descendants define the order
    pub const CONTAINER: &'static str = "SortList";

    /// The element wrapping a single track reference
    pub const ENTRY: &'static str = "StringID";

    /// The child of [`SortList::ENTRY`] holding the identifier
    pub const ID: &'static str = "id";

    /// Read and extract a sort list from an arbitrary I/O reader
    pub fn from_reader<R>(mut reader: R) -> Result<Self, FromReaderError>
    where
        R: Read,
    {
        let mut xml = String::new();
        reader.read_to_string(&mut xml)?;

        Ok(xml.parse()?)
    }

    /// Read and extract a sort list from a path on disk
    pub fn from_path<P>(path: P) -> Result<Self, FromReaderError>
    where
        P: AsRef<Path>,
    {
        let file = fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Serialize the identifiers as a compact JSON array
    pub fn to_writer<W>(&self, writer: W) -> Result<(), serde_json::Error>
    where
        W: Write,
    {
        serde_json::to_writer(writer, &self.ids)
    }

    /// The number of identifiers
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Were no identifiers found at all?
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    fn is_contained(node: &Node) -> bool {
        node.ancestors()
            .skip(1)
            .any(|ancestor| query::is_named(&ancestor, Self::CONTAINER))
    }
}

impl FromStr for SortList {
    type Err = FromStrError;

    /// Extract a sort list from an XML string
    ///
    /// Every `StringID` element with a `SortList` somewhere above it contributes its `id`
    /// child, in document order. Entries without an `id` child, or with an empty one,
    /// are skipped.
    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        let document = query::parse_document(xml)?;

        let mut ids = Vec::new();
        for (index, entry) in document
            .descendants()
            .filter(|node| query::is_named(node, SortList::ENTRY) && SortList::is_contained(node))
            .enumerate()
        {
            match query::text_at(entry, SortList::ID) {
                Text::Present(text) => {
                    let id: i64 = text.parse().map_err(|_| FromStrError::InvalidId {
                        index,
                        text: text.to_string(),
                    })?;
                    ids.push(id);
                }
                Text::Empty => debug!("Skipping {} #{index}: empty id", SortList::ENTRY),
                Text::Absent => debug!("Skipping {} #{index}: no id", SortList::ENTRY),
            }
        }

        Ok(SortList { ids })
    }
}

/// Errors that might be returned from [`SortList::from_str()`]
#[derive(Debug, Error)]
pub enum FromStrError {
    /// The document is not well-formed XML
    #[error("The document is not valid XML")]
    Parse(#[from] roxmltree::Error),

    /// An `id` had text, but it wasn't an integer
    #[error("Entry {index} has an id that is not an integer: {text:?}")]
    InvalidId { index: usize, text: String },
}

/// Errors that might be returned from [`SortList::from_reader()`] and [`SortList::from_path()`]
#[derive(Debug, Error)]
pub enum FromReaderError {
    /// Any failure that has to do with I/O
    #[error("Something failed with I/O")]
    Read(#[from] io::Error),

    /// The contents could not be turned into a sort list
    #[error("Extracting the sort list failed")]
    Extract(#[from] FromStrError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn music_sort() {
        let source = include_str!("../test/MusicSort.xml");
        let list = SortList::from_str(source).unwrap();

        assert_eq!(list.ids, [11663, 834, 11422, 799, 834]);
        assert_eq!(list.len(), 5);

        let mut json = Vec::new();
        list.to_writer(&mut json).unwrap();
        assert_eq!(json, b"[11663,834,11422,799,834]");
    }

    #[test]
    fn document_order() {
        let xml = "<a><SortList><StringID><id>3</id></StringID><StringID><id>1</id></StringID>\
                   <StringID><id>2</id></StringID></SortList></a>";

        assert_eq!(SortList::from_str(xml).unwrap().ids, [3, 1, 2]);
    }

    #[test]
    fn skips_entries_without_id() {
        let xml = "<a><SortList>\
                     <StringID><id>1</id></StringID>\
                     <StringID><str>no id</str></StringID>\
                     <StringID><id></id></StringID>\
                     <StringID><id>  </id></StringID>\
                     <StringID><id>2</id></StringID>\
                   </SortList></a>";

        assert_eq!(SortList::from_str(xml).unwrap().ids, [1, 2]);
    }

    #[test]
    fn only_inside_sort_list() {
        let xml = "<a>\
                     <StringID><id>9</id></StringID>\
                     <SortList><Group><StringID><id>4</id></StringID></Group></SortList>\
                     <SortList><SortList><StringID><id>5</id></StringID></SortList></SortList>\
                   </a>";

        assert_eq!(SortList::from_str(xml).unwrap().ids, [4, 5]);
    }

    #[test]
    fn empty() {
        let list = SortList::from_str("<a/>").unwrap();
        assert!(list.is_empty());

        let mut json = Vec::new();
        list.to_writer(&mut json).unwrap();
        assert_eq!(json, b"[]");
    }

    #[test]
    fn document_type_declaration() {
        let xml = "<!DOCTYPE SerializeSortData>\
                   <SerializeSortData><SortList><StringID><id>12</id></StringID></SortList></SerializeSortData>";

        assert_eq!(SortList::from_str(xml).unwrap().ids, [12]);
    }

    #[test]
    fn invalid_xml() {
        assert!(matches!(
            SortList::from_str("<SortList><StringID>"),
            Err(FromStrError::Parse(_))
        ));
    }

    #[test]
    fn invalid_id() {
        let xml = "<SortList><StringID><id>1</id></StringID><StringID><id>x1</id></StringID></SortList>";

        match SortList::from_str(xml) {
            Err(FromStrError::InvalidId { index, text }) => {
                assert_eq!(index, 1);
                assert_eq!(text, "x1");
            }
            other => panic!("expected an invalid id, got {other:?}"),
        }
    }

    #[test]
    fn from_reader() {
        let source = include_str!("../test/MusicSort.xml");
        let list = SortList::from_reader(source.as_bytes()).unwrap();
        assert_eq!(list.len(), 5);

        assert!(matches!(
            SortList::from_path("does/not/exist.xml"),
            Err(FromReaderError::Read(_))
        ));
    }
}
