//! # Asset XML Tools
//!
//! Game data ships as piles of XML. The web front end wants JSON. This crate provides two
//! converters that bridge the gap.
//!
//! ## music-sort
//!
//! ```console
//! music-sort 0.1.0
//! Convert a music sort XML into a JSON array of track ids
//!
//! USAGE:
//!     music-sort [OPTIONS] <PATH>
//!
//! ARGS:
//!     <PATH>    The sort list XML to convert
//!
//! OPTIONS:
//!     -h, --help               Print help information
//!     -o, --output <OUTPUT>    Where the JSON array should be written [default: src/assets/music/sort.json]
//!     -v, --verbose            Log what the converter is doing
//!     -V, --version            Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! > music-sort A000/data/MusicSort.xml
//! Updated the music sort with 1043 tracks. Output file: src/assets/music/sort.json
//! ```
//!
//! ## chara-list
//!
//! ```console
//! chara-list 0.1.0
//! Collect chara*/Chara.xml files into a single JSON character list
//!
//! USAGE:
//!     chara-list [OPTIONS]
//!
//! OPTIONS:
//!     -b, --base <BASE>        The folder containing the character folders [default: .]
//!     -h, --help               Print help information
//!     -o, --output <OUTPUT>    Where the JSON should be written. Defaults to chara.json next to the base folder
//!     -v, --verbose            Log what the generator is doing
//!     -V, --version            Print version information
//! ```
//!
//! ### Example
//!
//! ```console
//! > chara-list --base public/chara
//! > head -4 public/chara.json
//! {
//!     "characters": [
//!         {
//!             "id": 1,
//! ```
//!
//! Both converters exit with status 1 on any failure and never leave partial output behind.

pub mod chara_list;
pub mod music_sort;
pub mod utils;
