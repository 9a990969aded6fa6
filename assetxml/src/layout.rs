//! Locating character files on disk

use log::{debug, warn};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Where character files live, relative to a base directory
///
/// A character file is found at `<base>/<dir_prefix>*/<file_name>`, one folder per character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharaLayout {
    /// Every character folder name starts with this
    pub dir_prefix: String,

    /// The name of the file inside each character folder
    pub file_name: String,
}

impl CharaLayout {
    /// Find every character file under `base`, sorted by path
    ///
    /// The sort only decides the order in which files are read, not the order of the output.
    /// A `base` that doesn't exist (or isn't a folder) holds no characters.
    pub fn find_files<P>(&self, base: P) -> Result<Vec<PathBuf>, FindFilesError>
    where
        P: AsRef<Path>,
    {
        let base = base.as_ref();
        if !base.is_dir() {
            warn!("{} is not a directory, no characters found", base.display());
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(base).min_depth(2).max_depth(2) {
            let entry = entry?;
            if self.matches(&entry) {
                paths.push(entry.into_path());
            }
        }

        paths.sort();
        debug!("Found {} character files in {}", paths.len(), base.display());

        Ok(paths)
    }

    fn matches(&self, entry: &DirEntry) -> bool {
        let in_chara_dir = entry
            .path()
            .parent()
            .and_then(Path::file_name)
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with(&self.dir_prefix));

        in_chara_dir && entry.file_name() == self.file_name.as_str()
    }
}

impl Default for CharaLayout {
    fn default() -> Self {
        Self {
            dir_prefix: "chara".to_owned(),
            file_name: "Chara.xml".to_owned(),
        }
    }
}

/// Errors that might be returned from [`CharaLayout::find_files()`]
#[derive(Debug, Error)]
pub enum FindFilesError {
    /// Walking the directory tree failed
    #[error("Could not walk the character directories")]
    Walk(#[from] walkdir::Error),
}
