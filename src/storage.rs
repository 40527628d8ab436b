//! Reading and writing recipe export files.
//!
//! The load operation dispatches on the input path's extension before any
//! content is read; the two save operations choose the output filename
//! from the export variant and overwrite existing files without warning.

/// Multi-recipe zip archive codec.
pub mod archive;
mod format;
/// JSON (de)serialization for single recipes.
pub mod json;

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

pub use format::{ARCHIVE_EXTENSION, Format, IncompatibleFormatError, RECIPE_EXTENSION};
pub use json::JsonRecipe;

use crate::Export;

/// Filename stem used for every multi-recipe output.
const COLLECTION_STEM: &str = "Recipes";

/// Errors that can occur when loading a recipe export.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The path's extension is neither recognized format.
    #[error(transparent)]
    Incompatible(#[from] IncompatibleFormatError),
    /// An underlying filesystem operation failed.
    #[error("failed to read recipe export: {0}")]
    Io(#[from] io::Error),
    /// A recipe document could not be decoded.
    #[error("failed to decode recipe document: {0}")]
    Decode(#[from] serde_json::Error),
    /// The archive container could not be read.
    #[error("failed to read recipe archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Errors that can occur when saving a recipe export.
#[derive(Debug, thiserror::Error)]
pub enum SaveError {
    /// A recipe cannot be represented in the native format.
    #[error(transparent)]
    Incompatible(#[from] IncompatibleFormatError),
    /// An underlying filesystem operation failed.
    #[error("failed to write recipe export: {0}")]
    Io(#[from] io::Error),
    /// A recipe document could not be encoded.
    #[error("failed to encode recipe document: {0}")]
    Encode(#[from] serde_json::Error),
    /// The archive container could not be written.
    #[error("failed to write recipe archive: {0}")]
    Archive(#[from] zip::result::ZipError),
}

/// Load a recipe export from a file, dispatching on its extension.
///
/// `.melarecipe` loads a single recipe, `.melarecipes` a collection. The
/// extension match is case-sensitive and happens before the file is
/// opened.
///
/// # Errors
///
/// Fails with [`IncompatibleFormatError::UnrecognisedExtension`] for any
/// other extension, or propagates the selected codec's failure.
pub fn load(path: &Path) -> Result<Export, LoadError> {
    match Format::from_path(path)? {
        Format::Recipe => {
            tracing::debug!(path = %path.display(), "loading single recipe");
            Ok(Export::Single(json::load(path)?))
        }
        Format::Archive => {
            tracing::debug!(path = %path.display(), "loading recipe archive");
            Ok(Export::Collection(archive::expand(path)?))
        }
    }
}

/// Write an export as plain JSON into `directory`, returning the path.
///
/// A single recipe becomes `<title-or-id>.json`; a collection becomes a
/// JSON array in `Recipes.json`. Existing files are overwritten.
///
/// # Errors
///
/// Propagates encoding and I/O failures.
pub fn save_json(export: &Export, directory: &Path) -> Result<PathBuf, SaveError> {
    let path = match export {
        Export::Single(recipe) => directory.join(format!("{}.json", recipe.file_stem())),
        Export::Collection(_) => directory.join(format!("{COLLECTION_STEM}.json")),
    };
    tracing::debug!(path = %path.display(), count = export.len(), "writing plain JSON export");

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    match export {
        Export::Single(recipe) => {
            serde_json::to_writer_pretty(&mut writer, &JsonRecipe::from(recipe.clone()))?;
        }
        Export::Collection(recipes) => {
            let documents: Vec<JsonRecipe> =
                recipes.iter().cloned().map(JsonRecipe::from).collect();
            serde_json::to_writer_pretty(&mut writer, &documents)?;
        }
    }
    writer.flush()?;
    Ok(path)
}

/// Write an export in the native format into `directory`, returning the
/// path.
///
/// A single recipe becomes `<title-or-id>.melarecipe`; a collection
/// becomes a `Recipes.melarecipes` archive. Existing files are
/// overwritten. Every written recipe must satisfy the identity invariant.
///
/// # Errors
///
/// Fails with [`IncompatibleFormatError::Identity`] when a recipe's id
/// breaks the invariant, or propagates encoding, I/O and zip failures.
pub fn save_native(export: &Export, directory: &Path) -> Result<PathBuf, SaveError> {
    match export {
        Export::Single(recipe) => json::write_native(recipe, directory),
        Export::Collection(recipes) => {
            let path = directory.join(format!("{COLLECTION_STEM}.{ARCHIVE_EXTENSION}"));
            archive::collect(recipes, &path)?;
            Ok(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    use super::*;
    use crate::Recipe;

    fn recipe(id: &str) -> Recipe {
        Recipe::new(id, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap())
    }

    #[test]
    fn load_rejects_unknown_extension_without_reading() {
        // the path does not exist; an attempted read would surface as Io
        let result = load(Path::new("/nonexistent/notes.txt"));
        assert!(matches!(result, Err(LoadError::Incompatible(_))));
    }

    #[test]
    fn load_dispatches_single_recipe() {
        let tmp = TempDir::new().unwrap();
        let source = Export::Single(recipe("7c9e6679-7425-40de-944b-e07fc1f90ae7"));
        let path = save_native(&source, tmp.path()).unwrap();

        let loaded = load(&path).unwrap();
        assert!(matches!(loaded, Export::Single(_)));
        assert_eq!(loaded, source);
    }

    #[test]
    fn load_dispatches_collection() {
        let tmp = TempDir::new().unwrap();
        let source = Export::Collection(vec![
            recipe("7c9e6679-7425-40de-944b-e07fc1f90ae7"),
            recipe("550e8400-e29b-41d4-a716-446655440000"),
        ]);
        let path = save_native(&source, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("Recipes.melarecipes"));

        let loaded = load(&path).unwrap();
        assert!(matches!(loaded, Export::Collection(_)));
        assert_eq!(loaded.len(), 2);
    }

    #[test]
    fn save_json_single_uses_title_stem() {
        let tmp = TempDir::new().unwrap();
        let export = Export::Single(
            recipe("7c9e6679-7425-40de-944b-e07fc1f90ae7").with_title("Soup"),
        );

        let path = save_json(&export, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("Soup.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["title"], "Soup");
    }

    #[test]
    fn save_json_collection_writes_array() {
        let tmp = TempDir::new().unwrap();
        let export = Export::Collection(vec![
            recipe("7c9e6679-7425-40de-944b-e07fc1f90ae7"),
            recipe("550e8400-e29b-41d4-a716-446655440000"),
        ]);

        let path = save_json(&export, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("Recipes.json"));

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
    }

    #[test]
    fn save_overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let export = Export::Single(
            recipe("7c9e6679-7425-40de-944b-e07fc1f90ae7").with_title("Soup"),
        );

        std::fs::write(tmp.path().join("Soup.json"), "stale").unwrap();
        let path = save_json(&export, tmp.path()).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_ne!(content, "stale");
        assert!(content.contains("7c9e6679-7425-40de-944b-e07fc1f90ae7"));
    }

    #[test]
    fn native_single_round_trips() {
        let tmp = TempDir::new().unwrap();
        let export = Export::Single(
            recipe("7c9e6679-7425-40de-944b-e07fc1f90ae7")
                .with_title("Soup")
                .with_favorite(true),
        );

        let path = save_native(&export, tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("Soup.melarecipe"));
        assert_eq!(load(&path).unwrap(), export);
    }

    #[test]
    fn native_single_with_bad_id_fails() {
        let tmp = TempDir::new().unwrap();
        let export = Export::Single(recipe("not-a-uuid").with_title("Soup"));

        let result = save_native(&export, tmp.path());
        assert!(matches!(result, Err(SaveError::Incompatible(_))));
    }
}
