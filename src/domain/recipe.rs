use chrono::{DateTime, Utc};

/// A single recipe as exported by the Mela application.
///
/// Recipes are immutable values: they are either decoded from an export
/// file or assembled with [`Recipe::new`] and the consuming `with_*`
/// combinators. Ingredient and instruction text is opaque to this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipe {
    /// Unique identifier. Either a canonical UUID string or the recipe's
    /// source link with the scheme prefix stripped; see
    /// [`identity`](crate::domain::identity).
    pub(crate) id: String,
    /// When the recipe was added.
    pub(crate) date: DateTime<Utc>,
    /// Image references, in display order. May be empty.
    pub(crate) images: Vec<String>,
    pub(crate) title: Option<String>,
    pub(crate) recipe_yield: Option<String>,
    pub(crate) cook_time: Option<String>,
    pub(crate) prep_time: Option<String>,
    pub(crate) total_time: Option<String>,
    /// The web page the recipe was imported from, if any.
    pub(crate) link: Option<String>,
    pub(crate) text: Option<String>,
    pub(crate) ingredients: Option<String>,
    pub(crate) instructions: Option<String>,
    pub(crate) notes: Option<String>,
    pub(crate) nutrition: Option<String>,
    /// Category tags, in display order.
    pub(crate) categories: Vec<String>,
    pub(crate) want_to_cook: bool,
    pub(crate) favorite: bool,
}

impl Recipe {
    /// Construct a recipe with the two required fields and everything else
    /// unset.
    ///
    /// The id is not validated here; the identity invariant is only checked
    /// when the recipe is written in the native format.
    #[must_use]
    pub fn new(id: impl Into<String>, date: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            date,
            images: Vec::new(),
            title: None,
            recipe_yield: None,
            cook_time: None,
            prep_time: None,
            total_time: None,
            link: None,
            text: None,
            ingredients: None,
            instructions: None,
            notes: None,
            nutrition: None,
            categories: Vec::new(),
            want_to_cook: false,
            favorite: false,
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the yield (e.g. "4 servings").
    #[must_use]
    pub fn with_yield(mut self, recipe_yield: impl Into<String>) -> Self {
        self.recipe_yield = Some(recipe_yield.into());
        self
    }

    /// Set the cook time.
    #[must_use]
    pub fn with_cook_time(mut self, cook_time: impl Into<String>) -> Self {
        self.cook_time = Some(cook_time.into());
        self
    }

    /// Set the preparation time.
    #[must_use]
    pub fn with_prep_time(mut self, prep_time: impl Into<String>) -> Self {
        self.prep_time = Some(prep_time.into());
        self
    }

    /// Set the total time.
    #[must_use]
    pub fn with_total_time(mut self, total_time: impl Into<String>) -> Self {
        self.total_time = Some(total_time.into());
        self
    }

    /// Set the source link.
    #[must_use]
    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    /// Set the description text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the ingredients block.
    #[must_use]
    pub fn with_ingredients(mut self, ingredients: impl Into<String>) -> Self {
        self.ingredients = Some(ingredients.into());
        self
    }

    /// Set the instructions block.
    #[must_use]
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Set the notes block.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Set the nutrition block.
    #[must_use]
    pub fn with_nutrition(mut self, nutrition: impl Into<String>) -> Self {
        self.nutrition = Some(nutrition.into());
        self
    }

    /// Replace the image references.
    #[must_use]
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// Replace the category tags.
    #[must_use]
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// Mark the recipe as queued for cooking.
    #[must_use]
    pub const fn with_want_to_cook(mut self, want_to_cook: bool) -> Self {
        self.want_to_cook = want_to_cook;
        self
    }

    /// Mark the recipe as a favorite.
    #[must_use]
    pub const fn with_favorite(mut self, favorite: bool) -> Self {
        self.favorite = favorite;
        self
    }

    /// The recipe's unique identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// When the recipe was added.
    #[must_use]
    pub const fn date(&self) -> DateTime<Utc> {
        self.date
    }

    /// Image references, in display order.
    #[must_use]
    pub fn images(&self) -> &[String] {
        &self.images
    }

    /// The title, if set.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The yield, if set.
    #[must_use]
    pub fn recipe_yield(&self) -> Option<&str> {
        self.recipe_yield.as_deref()
    }

    /// The cook time, if set.
    #[must_use]
    pub fn cook_time(&self) -> Option<&str> {
        self.cook_time.as_deref()
    }

    /// The preparation time, if set.
    #[must_use]
    pub fn prep_time(&self) -> Option<&str> {
        self.prep_time.as_deref()
    }

    /// The total time, if set.
    #[must_use]
    pub fn total_time(&self) -> Option<&str> {
        self.total_time.as_deref()
    }

    /// The source link, if set.
    #[must_use]
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    /// The description text, if set.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The ingredients block, if set.
    #[must_use]
    pub fn ingredients(&self) -> Option<&str> {
        self.ingredients.as_deref()
    }

    /// The instructions block, if set.
    #[must_use]
    pub fn instructions(&self) -> Option<&str> {
        self.instructions.as_deref()
    }

    /// The notes block, if set.
    #[must_use]
    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    /// The nutrition block, if set.
    #[must_use]
    pub fn nutrition(&self) -> Option<&str> {
        self.nutrition.as_deref()
    }

    /// Category tags, in display order.
    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Whether the recipe is queued for cooking.
    #[must_use]
    pub const fn want_to_cook(&self) -> bool {
        self.want_to_cook
    }

    /// Whether the recipe is a favorite.
    #[must_use]
    pub const fn favorite(&self) -> bool {
        self.favorite
    }

    /// The file stem used when writing this recipe out: the title when
    /// present and non-empty, otherwise the id.
    ///
    /// Path separators are replaced so the stem cannot point outside the
    /// directory the file is written into.
    #[must_use]
    pub fn file_stem(&self) -> String {
        let stem = self
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .unwrap_or(&self.id);
        stem.replace(['/', '\\'], "-")
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn base_recipe() -> Recipe {
        Recipe::new(
            "7c9e6679-7425-40de-944b-e07fc1f90ae7",
            Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap(),
        )
    }

    #[test]
    fn file_stem_prefers_title() {
        let recipe = base_recipe().with_title("Soup");
        assert_eq!(recipe.file_stem(), "Soup");
    }

    #[test]
    fn file_stem_falls_back_to_id() {
        let recipe = base_recipe();
        assert_eq!(recipe.file_stem(), "7c9e6679-7425-40de-944b-e07fc1f90ae7");
    }

    #[test]
    fn file_stem_ignores_empty_title() {
        let recipe = base_recipe().with_title("");
        assert_eq!(recipe.file_stem(), "7c9e6679-7425-40de-944b-e07fc1f90ae7");
    }

    #[test]
    fn file_stem_strips_path_separators() {
        let recipe = base_recipe().with_title("Mac & Cheese / Greens");
        assert_eq!(recipe.file_stem(), "Mac & Cheese - Greens");
    }

    #[test]
    fn combinators_set_fields() {
        let recipe = base_recipe()
            .with_title("Soup")
            .with_link("https://example.com/soup")
            .with_categories(vec!["Dinner".to_string()])
            .with_favorite(true);

        assert_eq!(recipe.title(), Some("Soup"));
        assert_eq!(recipe.link(), Some("https://example.com/soup"));
        assert_eq!(recipe.categories(), ["Dinner".to_string()]);
        assert!(recipe.favorite());
        assert!(!recipe.want_to_cook());
    }
}
