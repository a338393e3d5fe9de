use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Hero image assigned to recipes created without one.
pub const DEFAULT_HERO_IMAGE: &str = "recipes/images/hearty_veggie_pasta.svg";

pub const TITLE_MAX_LEN: usize = 150;
pub const SUBTITLE_MAX_LEN: usize = 255;

/// Field name reported for errors that concern the whole request body.
pub const NON_FIELD_ERRORS: &str = "__all__";

/// A cookbook entry, stored as JSON under `recipe/{slug}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    pub slug: String,
    /// Relative path to a hero image under the site's static files.
    pub hero_image: String,
    /// Relative media path of an uploaded image, if any.
    #[serde(default)]
    pub uploaded_image: Option<String>,
    /// Minutes.
    pub prep_time: u32,
    /// Minutes.
    pub cook_time: u32,
    pub servings: u32,
    pub short_description: String,
    /// One ingredient per line, in order.
    pub ingredients: Vec<String>,
    /// One step per line, in order.
    pub directions: Vec<String>,
    pub created_at: i64,
}

impl Recipe {
    /// Trimmed ingredient lines with blanks dropped.
    pub fn ingredient_list(&self) -> Vec<String> {
        self.ingredients
            .iter()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Case-insensitive containment across every free-text field.
    /// `needle` must already be lowercase.
    pub(crate) fn mentions(&self, needle: &str) -> bool {
        let fields = [
            self.title.as_str(),
            self.subtitle.as_str(),
            self.short_description.as_str(),
        ];
        fields.iter().any(|f| f.to_lowercase().contains(needle))
            || self.ingredients.join("\n").to_lowercase().contains(needle)
            || self.directions.join("\n").to_lowercase().contains(needle)
    }
}

/// Image bytes submitted alongside a new recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
    pub filename: String,
    /// Base64-encoded file contents.
    pub data: String,
}

/// Fields accepted when creating a recipe.
///
/// Numeric fields are signed so that negative input reaches validation
/// and is reported against the right field.
#[derive(Debug, Clone, Default)]
pub struct NewRecipe {
    pub title: String,
    pub subtitle: String,
    pub slug: String,
    pub hero_image: Option<String>,
    pub short_description: String,
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub servings: Option<i64>,
    /// One ingredient per line.
    pub ingredients: String,
    /// One step per line.
    pub directions: String,
    pub uploaded_image: Option<UploadedImage>,
}

/// A rejected field on recipe creation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Failure modes of `RecipeStore::create`.
#[derive(Debug, thiserror::Error)]
pub enum CreateError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Slugs are limited to ASCII letters, digits, hyphens and underscores.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn at_least(field: &'static str, value: i64, min: i64) -> Result<u32, ValidationError> {
    if value < min {
        return Err(ValidationError::new(
            field,
            format!("Ensure this value is greater than or equal to {}.", min),
        ));
    }
    u32::try_from(value).map_err(|_| {
        ValidationError::new(
            field,
            format!("Ensure this value is less than or equal to {}.", u32::MAX),
        )
    })
}

fn non_negative(field: &'static str, value: Option<i64>) -> Result<u32, ValidationError> {
    let value = value.ok_or_else(|| ValidationError::new(field, "This field is required."))?;
    at_least(field, value, 0)
}

/// Missing and null read as empty; numbers are taken as their decimal text.
fn text_field(map: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match map.get(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(_) => Err(ValidationError::new(field, "Enter a valid value.")),
    }
}

/// Integers, or strings holding one. Blank means absent.
fn whole_number(
    map: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<i64>, ValidationError> {
    let invalid = || ValidationError::new(field, "Enter a whole number.");
    match map.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n.as_i64().map(Some).ok_or_else(invalid),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => s.trim().parse().map(Some).map_err(|_| invalid()),
        Some(_) => Err(invalid()),
    }
}

fn required_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "This field is required."));
    }
    Ok(())
}

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(|l| l.trim_end().to_string()).collect()
}

impl NewRecipe {
    /// Read the fields from a JSON request body. Type mismatches are
    /// reported against the field they occur in.
    pub fn from_json(body: &[u8]) -> Result<Self, ValidationError> {
        let not_object =
            || ValidationError::new(NON_FIELD_ERRORS, "Request body must be a JSON object.");
        let map = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            _ => return Err(not_object()),
        };

        let hero_image = text_field(&map, "hero_image")?;
        let uploaded_image = match map.get("uploaded_image") {
            None | Some(Value::Null) => None,
            Some(v) => Some(
                serde_json::from_value::<UploadedImage>(v.clone())
                    .map_err(|_| ValidationError::new("uploaded_image", "Upload a valid image."))?,
            ),
        };

        Ok(Self {
            title: text_field(&map, "title")?,
            subtitle: text_field(&map, "subtitle")?,
            slug: text_field(&map, "slug")?,
            hero_image: (!hero_image.is_empty()).then_some(hero_image),
            short_description: text_field(&map, "short_description")?,
            prep_time: whole_number(&map, "prep_time")?,
            cook_time: whole_number(&map, "cook_time")?,
            servings: whole_number(&map, "servings")?,
            ingredients: text_field(&map, "ingredients")?,
            directions: text_field(&map, "directions")?,
            uploaded_image,
        })
    }

    /// Check every field and build the recipe to store. The upload is
    /// handled separately by the store.
    pub fn validate(&self, created_at: i64) -> Result<Recipe, ValidationError> {
        let title = self.title.trim();
        required_text("title", title)?;
        if title.chars().count() > TITLE_MAX_LEN {
            return Err(ValidationError::new(
                "title",
                format!("Ensure this value has at most {} characters.", TITLE_MAX_LEN),
            ));
        }
        let subtitle = self.subtitle.trim();
        if subtitle.chars().count() > SUBTITLE_MAX_LEN {
            return Err(ValidationError::new(
                "subtitle",
                format!(
                    "Ensure this value has at most {} characters.",
                    SUBTITLE_MAX_LEN
                ),
            ));
        }

        let slug = self.slug.trim();
        required_text("slug", slug)?;
        if !is_valid_slug(slug) {
            return Err(ValidationError::new(
                "slug",
                "Enter a valid slug consisting of letters, numbers, underscores or hyphens.",
            ));
        }

        required_text("short_description", &self.short_description)?;
        let prep_time = non_negative("prep_time", self.prep_time)?;
        let cook_time = non_negative("cook_time", self.cook_time)?;
        let servings = match self.servings {
            None => 1,
            Some(n) => at_least("servings", n, 1)?,
        };
        required_text("ingredients", &self.ingredients)?;
        required_text("directions", &self.directions)?;

        let hero_image = self
            .hero_image
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .unwrap_or(DEFAULT_HERO_IMAGE)
            .to_string();

        Ok(Recipe {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            slug: slug.to_string(),
            hero_image,
            uploaded_image: None,
            prep_time,
            cook_time,
            servings,
            short_description: self.short_description.trim().to_string(),
            ingredients: split_lines(&self.ingredients),
            directions: split_lines(&self.directions),
            created_at,
        })
    }
}
