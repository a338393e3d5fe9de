pub mod knowledge;
pub mod patterns;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::recipes::seed::SAMPLE_TITLES;
use crate::recipes::types::Recipe;
use knowledge::IngredientFact;
use patterns::{
    drop_filler, first_match, strip_phrase, INGREDIENT_FILLER, QUESTION_PHRASES, RECIPE_FILLER,
    RECIPE_PHRASES,
};

/// Why a query could not be answered. Display is the user-facing reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("I didn't catch that. Could you please repeat your question?")]
    EmptyQuery,
    #[error(
        "I couldn't find a recipe called '{0}'. Try asking about recipes like '{t0}', '{t1}', or '{t2}'.",
        t0 = SAMPLE_TITLES[0],
        t1 = SAMPLE_TITLES[1],
        t2 = SAMPLE_TITLES[2]
    )]
    RecipeNotFound(String),
    #[error("I found {0}, but it doesn't have ingredients listed yet.")]
    RecipeHasNoIngredients(String),
    #[error(
        "I don't have information about '{0}' yet. You can ask about ingredients like tomato, garlic, onion, or chicken. Or ask 'What are the ingredients for [recipe name]?' to get recipe ingredients."
    )]
    IngredientNotFound(String),
}

/// Answer to an assistant query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantResponse {
    RecipeIngredients {
        recipe: String,
        slug: String,
        ingredients: Vec<String>,
    },
    IngredientInfo(&'static IngredientFact),
    Error(QueryError),
}

impl AssistantResponse {
    pub fn is_success(&self) -> bool {
        !matches!(self, AssistantResponse::Error(_))
    }

    /// Wire name of the response kind.
    pub fn kind(&self) -> &'static str {
        match self {
            AssistantResponse::RecipeIngredients { .. } => "recipe_ingredients",
            AssistantResponse::IngredientInfo(_) => "ingredient_info",
            AssistantResponse::Error(_) => "error",
        }
    }

    /// Spoken/displayed reply.
    pub fn message(&self) -> String {
        match self {
            AssistantResponse::RecipeIngredients {
                recipe,
                ingredients,
                ..
            } => format!("To make {}, you'll need: {}.", recipe, ingredients.join(", ")),
            AssistantResponse::IngredientInfo(fact) => format!(
                "{}. {} Storage tip: {} Common uses: {}",
                fact.name, fact.description, fact.storage, fact.uses
            ),
            AssistantResponse::Error(err) => err.to_string(),
        }
    }
}

/// Body accepted by the assistant endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct AssistantRequest {
    #[serde(default)]
    pub query: String,
}

/// JSON shape returned to clients.
#[derive(Debug, Serialize)]
pub struct AssistantPayload {
    pub success: bool,
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredient: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uses: Option<&'static str>,
}

impl From<&AssistantResponse> for AssistantPayload {
    fn from(response: &AssistantResponse) -> Self {
        let mut payload = AssistantPayload {
            success: response.is_success(),
            kind: response.kind(),
            message: response.message(),
            recipe: None,
            recipe_slug: None,
            ingredients: None,
            ingredient: None,
            description: None,
            storage: None,
            uses: None,
        };
        match response {
            AssistantResponse::RecipeIngredients {
                recipe,
                slug,
                ingredients,
            } => {
                payload.recipe = Some(recipe.clone());
                payload.recipe_slug = Some(slug.clone());
                payload.ingredients = Some(ingredients.clone());
            }
            AssistantResponse::IngredientInfo(fact) => {
                payload.ingredient = Some(fact.name);
                payload.description = Some(fact.description);
                payload.storage = Some(fact.storage);
                payload.uses = Some(fact.uses);
            }
            AssistantResponse::Error(_) => {}
        }
        payload
    }
}

/// Trim, lowercase and drop trailing sentence punctuation.
fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .trim_end_matches(['?', '!', '.'])
        .trim()
        .to_string()
}

/// Interpret a free-text question against `recipes` (title order) and the
/// ingredient table.
pub fn interpret(raw_query: &str, recipes: &[Recipe]) -> AssistantResponse {
    let query = normalize(raw_query);
    if query.is_empty() {
        return AssistantResponse::Error(QueryError::EmptyQuery);
    }

    match first_match(&query, RECIPE_PHRASES) {
        Some(phrase) => recipe_ingredients(&query, phrase, recipes),
        None => ingredient_info(&query),
    }
}

fn recipe_ingredients(query: &str, phrase: &str, recipes: &[Recipe]) -> AssistantResponse {
    let name = drop_filler(&strip_phrase(query, phrase), RECIPE_FILLER);
    let slug_fragment = name.replace(' ', "-");
    debug!(phrase, name = %name, "recipe query");

    let found = recipes.iter().find(|r| {
        r.title.to_lowercase().contains(&name) || r.slug.to_lowercase().contains(&slug_fragment)
    });

    let Some(recipe) = found else {
        return AssistantResponse::Error(QueryError::RecipeNotFound(name));
    };

    let ingredients = recipe.ingredient_list();
    if ingredients.is_empty() {
        return AssistantResponse::Error(QueryError::RecipeHasNoIngredients(
            recipe.title.clone(),
        ));
    }

    AssistantResponse::RecipeIngredients {
        recipe: recipe.title.clone(),
        slug: recipe.slug.clone(),
        ingredients,
    }
}

fn ingredient_info(query: &str) -> AssistantResponse {
    let stripped = first_match(query, QUESTION_PHRASES)
        .map(|phrase| strip_phrase(query, phrase))
        .filter(|rest| !rest.is_empty());
    let raw_term = stripped.as_deref().unwrap_or(query);
    let term = drop_filler(raw_term, INGREDIENT_FILLER);
    debug!(term = %term, "ingredient query");

    match knowledge::find(&term) {
        Some(fact) => AssistantResponse::IngredientInfo(fact),
        None => AssistantResponse::Error(QueryError::IngredientNotFound(term)),
    }
}
