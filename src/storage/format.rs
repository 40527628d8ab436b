//! Extension-based detection of the recognized export formats.

use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

use crate::domain::IdFormatError;

/// Extension of a single-recipe document.
pub const RECIPE_EXTENSION: &str = "melarecipe";

/// Extension of a multi-recipe zip archive.
pub const ARCHIVE_EXTENSION: &str = "melarecipes";

/// The recognized export container formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// A single-recipe JSON document (`.melarecipe`).
    Recipe,
    /// A zip archive of single-recipe documents (`.melarecipes`).
    Archive,
}

impl Format {
    /// Detect the format from a path's extension.
    ///
    /// The match is case-sensitive and exact; nothing is read from the
    /// filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`IncompatibleFormatError::UnrecognisedExtension`] for any
    /// extension other than the two recognized ones.
    pub fn from_path(path: &Path) -> Result<Self, IncompatibleFormatError> {
        match path.extension().and_then(OsStr::to_str) {
            Some(extension) if extension == RECIPE_EXTENSION => Ok(Self::Recipe),
            Some(extension) if extension == ARCHIVE_EXTENSION => Ok(Self::Archive),
            _ => Err(IncompatibleFormatError::UnrecognisedExtension {
                path: path.to_path_buf(),
            }),
        }
    }

    /// The file extension for this format, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Recipe => RECIPE_EXTENSION,
            Self::Archive => ARCHIVE_EXTENSION,
        }
    }
}

/// Error raised when data cannot be represented in a requested format.
///
/// Covers both directions: an input path whose extension is neither
/// recognized format, and a recipe that cannot be written as a canonical
/// native document because its id breaks the identity invariant.
#[derive(Debug, thiserror::Error)]
pub enum IncompatibleFormatError {
    /// The input path carries an unrecognised extension. Raised before any
    /// file content is read.
    #[error(
        "{} is not a recognised recipe export (expected .melarecipe or .melarecipes)",
        path.display()
    )]
    UnrecognisedExtension {
        /// The rejected path.
        path: PathBuf,
    },

    /// A recipe failed the identity invariant at the native write boundary.
    #[error("recipe {id:?} cannot be written as a native recipe file")]
    Identity {
        /// Id of the offending recipe.
        id: String,
        /// The underlying identity-invariant failure.
        #[source]
        source: IdFormatError,
    },
}
