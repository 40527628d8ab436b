//! Reading and writing multi-recipe zip archives.
//!
//! Both directions go through a private staging directory scoped to the
//! call: expansion unpacks the archive there before decoding, collection
//! stages native documents there before zipping. The [`TempDir`] handle
//! removes the staging directory on every exit path, including errors.

use std::{
    fs::{self, File},
    io::{self, BufReader, BufWriter, Write},
    path::Path,
};

use tempfile::TempDir;
use zip::{ZipArchive, ZipWriter, write::SimpleFileOptions};

use crate::{
    Recipe,
    storage::{LoadError, SaveError, json},
};

/// Unpack a recipe archive and decode every member.
///
/// Top-level entries of the unpacked archive are decoded as single-recipe
/// documents in directory-enumeration order (not guaranteed stable across
/// platforms); entries that are themselves directories are skipped.
///
/// # Errors
///
/// Fails with the first member's decode error, discarding any recipes
/// decoded before it, or propagates the underlying I/O or zip failure.
pub fn expand(path: &Path) -> Result<Vec<Recipe>, LoadError> {
    let file = File::open(path)?;
    let mut archive = ZipArchive::new(BufReader::new(file))?;

    let staging = TempDir::new()?;
    tracing::debug!(
        members = archive.len(),
        staging = %staging.path().display(),
        "expanding recipe archive"
    );
    archive.extract(staging.path())?;

    let mut recipes = Vec::new();
    for entry in fs::read_dir(staging.path())? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        recipes.push(json::load(&entry.path())?);
    }

    tracing::debug!(count = recipes.len(), "expanded recipe archive");
    Ok(recipes)
}

/// Write recipes into a zip archive at `target`.
///
/// Every recipe is staged as a native `<title-or-id>.melarecipe` document
/// first, so the identity invariant gates each member; only then is the
/// staging directory's content zipped. An invariant failure therefore
/// aborts before the target file exists.
///
/// # Errors
///
/// Fails with the first recipe's
/// [`IncompatibleFormatError`](crate::IncompatibleFormatError) when its id
/// breaks the identity invariant, or propagates the underlying encoding,
/// I/O or zip failure.
pub fn collect(recipes: &[Recipe], target: &Path) -> Result<(), SaveError> {
    let staging = TempDir::new()?;
    tracing::debug!(
        count = recipes.len(),
        staging = %staging.path().display(),
        "staging recipe archive"
    );

    for recipe in recipes {
        json::write_native(recipe, staging.path())?;
    }

    let file = File::create(target)?;
    let mut writer = ZipWriter::new(BufWriter::new(file));
    let options = SimpleFileOptions::default();

    for entry in fs::read_dir(staging.path())? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        writer.start_file(name, options)?;
        io::copy(&mut File::open(entry.path())?, &mut writer)?;
    }

    writer.finish()?.flush()?;
    tracing::debug!(path = %target.display(), "wrote recipe archive");
    Ok(())
}
