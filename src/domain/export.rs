use std::path::{Path, PathBuf};

use crate::{
    Recipe,
    storage::{self, LoadError, SaveError},
};

/// A loaded recipe export: exactly one recipe, or an ordered collection.
///
/// The variant decides the output filename convention and write strategy:
/// a single recipe becomes one document named after the recipe, a
/// collection becomes `Recipes.json` or a `Recipes.melarecipes` archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Export {
    /// One recipe, loaded from a `.melarecipe` document.
    Single(Recipe),
    /// A collection of recipes, loaded from a `.melarecipes` archive.
    ///
    /// Member order follows archive enumeration order and is not
    /// guaranteed stable across platforms.
    Collection(Vec<Recipe>),
}

impl Export {
    /// Load an export from a file, dispatching on its extension.
    ///
    /// # Errors
    ///
    /// Fails with [`IncompatibleFormatError`](crate::IncompatibleFormatError)
    /// for an unrecognised extension (before any content is read), or
    /// propagates the decode or I/O failure of the selected codec.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        storage::load(path)
    }

    /// Write this export as plain JSON into `directory`.
    ///
    /// A single recipe is written to `<title-or-id>.json`, a collection to
    /// `Recipes.json` as a JSON array. An existing file at the target path
    /// is overwritten without warning. Returns the written path.
    ///
    /// # Errors
    ///
    /// Propagates encoding and I/O failures.
    pub fn save_json(&self, directory: &Path) -> Result<PathBuf, SaveError> {
        storage::save_json(self, directory)
    }

    /// Write this export in the native format into `directory`.
    ///
    /// A single recipe is written to `<title-or-id>.melarecipe`, a
    /// collection to `Recipes.melarecipes`. Every written recipe must
    /// satisfy the identity invariant. An existing file at the target path
    /// is overwritten without warning. Returns the written path.
    ///
    /// # Errors
    ///
    /// Fails with [`IncompatibleFormatError`](crate::IncompatibleFormatError)
    /// when any recipe's id breaks the identity invariant (in which case no
    /// archive is produced), or propagates encoding and I/O failures.
    pub fn save_native(&self, directory: &Path) -> Result<PathBuf, SaveError> {
        storage::save_native(self, directory)
    }

    /// The contained recipes, in order.
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            Self::Single(recipe) => std::slice::from_ref(recipe),
            Self::Collection(recipes) => recipes,
        }
    }

    /// Number of contained recipes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Collection(recipes) => recipes.len(),
        }
    }

    /// Whether the export contains no recipes.
    ///
    /// Only an empty collection is empty; a single recipe never is.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Recipe> for Export {
    fn from(recipe: Recipe) -> Self {
        Self::Single(recipe)
    }
}

impl From<Vec<Recipe>> for Export {
    fn from(recipes: Vec<Recipe>) -> Self {
        Self::Collection(recipes)
    }
}
