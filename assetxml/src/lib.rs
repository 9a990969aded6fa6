//! Extraction of game-asset XML into plain data that can be written out as JSON.
//!
//! Two kinds of documents are understood:
//!
//! - Music sort lists ([`sort::SortList`]), an ordered list of track ids found under a
//!   `SortList` element.
//! - Character files ([`chara::CharacterRecord`]), one `Chara.xml` per character folder. These
//!   are located with [`layout::CharaLayout`] and combined into a
//!   [`collection::CharacterCollection`].
//!
//! Nothing in this crate prints or exits; everything fails through typed errors. The `tools`
//! crate wraps it into command-line converters.

pub mod chara;
pub mod collection;
pub mod layout;
pub mod query;
pub mod sort;
