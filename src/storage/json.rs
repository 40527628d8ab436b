//! JSON (de)serialization for single recipes.
//!
//! A [`JsonRecipe`] is the on-disk shape of one recipe: the body of a
//! `.melarecipe` document, a member of a `.melarecipes` archive, or an
//! element of the plain-JSON output. Timestamps are ISO-8601 text.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Read, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    Recipe,
    domain::identity,
    storage::{IncompatibleFormatError, LoadError, SaveError, format::RECIPE_EXTENSION},
};

/// A recipe serialized in the export document shape.
///
/// Field names on the wire are camelCase (`cookTime`, `wantToCook`, ...).
/// Optional fields decode as unset when absent and are omitted when unset;
/// a missing required field is a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonRecipe {
    id: String,
    date: DateTime<Utc>,
    images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "yield")]
    recipe_yield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    cook_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    prep_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    total_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ingredients: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    nutrition: Option<String>,
    categories: Vec<String>,
    want_to_cook: bool,
    favorite: bool,
}

/// Decode a single recipe from JSON.
///
/// # Errors
///
/// Fails on malformed JSON or a type mismatch in any field. Absent
/// optional fields are treated as unset, not an error.
pub fn decode<R: Read>(reader: R) -> Result<Recipe, serde_json::Error> {
    let document: JsonRecipe = serde_json::from_reader(reader)?;
    Ok(document.into())
}

/// Encode a single recipe as compact JSON.
///
/// Field order is not guaranteed to be stable.
///
/// # Errors
///
/// Propagates serialization and I/O failures from the writer.
pub fn encode<W: Write>(recipe: &Recipe, writer: W) -> Result<(), serde_json::Error> {
    serde_json::to_writer(writer, &JsonRecipe::from(recipe.clone()))
}

/// Load a single recipe from a `.melarecipe` document on disk.
///
/// # Errors
///
/// Propagates the underlying I/O or decode failure.
pub fn load(path: &Path) -> Result<Recipe, LoadError> {
    let file = File::open(path)?;
    Ok(decode(BufReader::new(file))?)
}

/// Write one recipe as a native `.melarecipe` document into `directory`.
///
/// The identity invariant is checked before anything is written. The file
/// is named `<title-or-id>.melarecipe` and overwrites any existing file at
/// that path. Returns the written path.
///
/// # Errors
///
/// Fails with [`IncompatibleFormatError::Identity`] when the recipe's id
/// breaks the identity invariant, otherwise propagates encoding and I/O
/// failures.
pub fn write_native(recipe: &Recipe, directory: &Path) -> Result<PathBuf, SaveError> {
    identity::validate(recipe.id(), recipe.link()).map_err(|source| {
        IncompatibleFormatError::Identity {
            id: recipe.id().to_string(),
            source,
        }
    })?;

    let path = directory.join(format!("{}.{RECIPE_EXTENSION}", recipe.file_stem()));
    tracing::debug!(path = %path.display(), "writing native recipe document");

    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    encode(recipe, &mut writer)?;
    writer.flush()?;
    Ok(path)
}

impl From<JsonRecipe> for Recipe {
    fn from(document: JsonRecipe) -> Self {
        let JsonRecipe {
            id,
            date,
            images,
            title,
            recipe_yield,
            cook_time,
            prep_time,
            total_time,
            link,
            text,
            ingredients,
            instructions,
            notes,
            nutrition,
            categories,
            want_to_cook,
            favorite,
        } = document;

        Self {
            id,
            date,
            images,
            title,
            recipe_yield,
            cook_time,
            prep_time,
            total_time,
            link,
            text,
            ingredients,
            instructions,
            notes,
            nutrition,
            categories,
            want_to_cook,
            favorite,
        }
    }
}

impl From<Recipe> for JsonRecipe {
    fn from(recipe: Recipe) -> Self {
        let Recipe {
            id,
            date,
            images,
            title,
            recipe_yield,
            cook_time,
            prep_time,
            total_time,
            link,
            text,
            ingredients,
            instructions,
            notes,
            nutrition,
            categories,
            want_to_cook,
            favorite,
        } = recipe;

        Self {
            id,
            date,
            images,
            title,
            recipe_yield,
            cook_time,
            prep_time,
            total_time,
            link,
            text,
            ingredients,
            instructions,
            notes,
            nutrition,
            categories,
            want_to_cook,
            favorite,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use chrono::TimeZone;
    use tempfile::TempDir;

    use super::*;

    const FULL_DOCUMENT: &str = r#"{
        "id": "example.com/recipes/soup",
        "date": "2023-01-01T00:00:00Z",
        "images": ["aW1hZ2U="],
        "title": "Soup",
        "yield": "4 servings",
        "cookTime": "30 min",
        "prepTime": "10 min",
        "totalTime": "40 min",
        "link": "https://example.com/recipes/soup",
        "text": "A warming soup.",
        "ingredients": "1 onion\n2 carrots",
        "instructions": "Chop.\nSimmer.",
        "notes": "Freezes well.",
        "nutrition": "250 kcal",
        "categories": ["Dinner", "Winter"],
        "wantToCook": false,
        "favorite": true
    }"#;

    #[test]
    fn decodes_full_document() {
        let recipe = decode(Cursor::new(FULL_DOCUMENT)).unwrap();

        assert_eq!(recipe.id(), "example.com/recipes/soup");
        assert_eq!(
            recipe.date(),
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(recipe.title(), Some("Soup"));
        assert_eq!(recipe.recipe_yield(), Some("4 servings"));
        assert_eq!(recipe.cook_time(), Some("30 min"));
        assert_eq!(recipe.prep_time(), Some("10 min"));
        assert_eq!(recipe.total_time(), Some("40 min"));
        assert_eq!(recipe.link(), Some("https://example.com/recipes/soup"));
        assert_eq!(recipe.text(), Some("A warming soup."));
        assert_eq!(recipe.ingredients(), Some("1 onion\n2 carrots"));
        assert_eq!(recipe.instructions(), Some("Chop.\nSimmer."));
        assert_eq!(recipe.notes(), Some("Freezes well."));
        assert_eq!(recipe.nutrition(), Some("250 kcal"));
        assert_eq!(recipe.images(), ["aW1hZ2U=".to_string()]);
        assert_eq!(
            recipe.categories(),
            ["Dinner".to_string(), "Winter".to_string()]
        );
        assert!(!recipe.want_to_cook());
        assert!(recipe.favorite());
    }

    #[test]
    fn absent_optional_fields_decode_as_unset() {
        let minimal = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "date": "2023-01-01T00:00:00Z",
            "images": [],
            "categories": [],
            "wantToCook": true,
            "favorite": false
        }"#;

        let recipe = decode(Cursor::new(minimal)).unwrap();
        assert_eq!(recipe.title(), None);
        assert_eq!(recipe.link(), None);
        assert_eq!(recipe.ingredients(), None);
        assert!(recipe.want_to_cook());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        // no date
        let document = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "images": [],
            "categories": [],
            "wantToCook": false,
            "favorite": false
        }"#;

        assert!(decode(Cursor::new(document)).is_err());
    }

    #[test]
    fn type_mismatch_is_an_error() {
        let document = r#"{
            "id": "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            "date": "2023-01-01T00:00:00Z",
            "images": "not-a-list",
            "categories": [],
            "wantToCook": false,
            "favorite": false
        }"#;

        assert!(decode(Cursor::new(document)).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(decode(Cursor::new("{not json")).is_err());
    }

    #[test]
    fn round_trip_is_stable() {
        let recipe = decode(Cursor::new(FULL_DOCUMENT)).unwrap();

        let mut bytes = Vec::new();
        encode(&recipe, &mut bytes).unwrap();
        let reparsed = decode(Cursor::new(&bytes)).unwrap();

        assert_eq!(recipe, reparsed);
    }

    #[test]
    fn unset_optionals_are_omitted_on_encode() {
        let recipe = Recipe::new(
            "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        );

        let mut bytes = Vec::new();
        encode(&recipe, &mut bytes).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("title"));
        assert!(!object.contains_key("link"));
        assert!(object.contains_key("id"));
        assert!(object.contains_key("date"));
        assert!(object.contains_key("wantToCook"));
        assert!(object.contains_key("favorite"));
    }

    #[test]
    fn wire_names_are_camel_case() {
        let recipe = decode(Cursor::new(FULL_DOCUMENT)).unwrap();

        let mut bytes = Vec::new();
        encode(&recipe, &mut bytes).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let object = value.as_object().unwrap();

        assert!(object.contains_key("cookTime"));
        assert!(object.contains_key("prepTime"));
        assert!(object.contains_key("totalTime"));
        assert!(object.contains_key("wantToCook"));
        assert!(object.contains_key("yield"));
        assert!(!object.contains_key("cook_time"));
        assert!(!object.contains_key("recipe_yield"));
    }

    #[test]
    fn write_native_produces_title_named_file() {
        let recipe = Recipe::new(
            "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        )
        .with_title("Soup")
        .with_favorite(true);

        let tmp = TempDir::new().unwrap();
        let path = write_native(&recipe, tmp.path()).unwrap();

        assert_eq!(path, tmp.path().join("Soup.melarecipe"));
        let reloaded = load(&path).unwrap();
        assert_eq!(reloaded, recipe);
    }

    #[test]
    fn write_native_falls_back_to_id_for_filename() {
        let recipe = Recipe::new(
            "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        );

        let tmp = TempDir::new().unwrap();
        let path = write_native(&recipe, tmp.path()).unwrap();

        assert_eq!(
            path,
            tmp.path()
                .join("7c9e6679-7425-40de-944b-e07fc1f90ae7.melarecipe")
        );
    }

    #[test]
    fn write_native_rejects_invalid_id_before_writing() {
        let recipe = Recipe::new(
            "not-a-uuid",
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        )
        .with_title("Soup");

        let tmp = TempDir::new().unwrap();
        let result = write_native(&recipe, tmp.path());

        assert!(matches!(
            result,
            Err(SaveError::Incompatible(
                IncompatibleFormatError::Identity { .. }
            ))
        ));
        assert!(!tmp.path().join("Soup.melarecipe").exists());
    }

    #[test]
    fn write_native_accepts_link_derived_id() {
        let recipe = Recipe::new(
            "example.com/recipes/soup",
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        )
        .with_link("https://example.com/recipes/soup");

        let tmp = TempDir::new().unwrap();
        assert!(write_native(&recipe, tmp.path()).is_ok());
    }
}
