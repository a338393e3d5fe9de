use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::{error, info};

use crate::assistant::{self, AssistantPayload, AssistantRequest};
use crate::recipes::types::{CreateError, NewRecipe, Recipe};
use crate::state::AppState;

const FEATURED_COUNT: usize = 3;
const LATEST_COUNT: usize = 4;

/// Error response body
#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

fn error_response(status: StatusCode, error: String, field: Option<&'static str>) -> Response {
    (status, Json(ErrorBody { error, field })).into_response()
}

/// Map storage errors to HTTP 500 responses
fn internal_error(err: anyhow::Error) -> Response {
    error!("Internal error: {:#}", err);
    error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string(), None)
}

pub(super) async fn health() -> Json<Value> {
    Json(json!({"status": "ok"}))
}

// -- /api/voice-assistant --

#[derive(Deserialize)]
pub(super) struct AssistantParams {
    #[serde(default)]
    q: String,
}

pub(super) async fn assistant_get(
    State(state): State<AppState>,
    Query(params): Query<AssistantParams>,
) -> Response {
    answer(&state, &params.q).await
}

/// Unparsable bodies are answered as an empty query.
pub(super) async fn assistant_post(State(state): State<AppState>, body: Bytes) -> Response {
    let query = serde_json::from_slice::<AssistantRequest>(&body)
        .map(|req| req.query)
        .unwrap_or_default();
    answer(&state, &query).await
}

async fn answer(state: &AppState, query: &str) -> Response {
    let recipes = match state.store.list_all().await {
        Ok(recipes) => recipes,
        Err(e) => return internal_error(e),
    };
    let response = assistant::interpret(query, &recipes);
    info!(query, kind = response.kind(), "assistant query answered");
    Json(AssistantPayload::from(&response)).into_response()
}

// -- /api/recipes --

#[derive(Serialize)]
struct HomePage {
    recipes: Vec<Recipe>,
    featured: Vec<Recipe>,
    latest: Vec<Recipe>,
}

pub(super) async fn home(State(state): State<AppState>) -> Response {
    let recipes = match state.store.list_all().await {
        Ok(recipes) => recipes,
        Err(e) => return internal_error(e),
    };
    let latest = match state.store.latest(LATEST_COUNT).await {
        Ok(latest) => latest,
        Err(e) => return internal_error(e),
    };
    let featured = recipes.iter().take(FEATURED_COUNT).cloned().collect();
    Json(HomePage {
        recipes,
        featured,
        latest,
    })
    .into_response()
}

pub(super) async fn recipe_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Response {
    match state.store.get_by_slug(&slug).await {
        Ok(Some(recipe)) => Json(recipe).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("No recipe found with slug '{}'", slug),
            None,
        ),
        Err(e) => internal_error(e),
    }
}

pub(super) async fn create_recipe(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let fields = match NewRecipe::from_json(&body) {
        Ok(fields) => fields,
        Err(err) => return error_response(StatusCode::BAD_REQUEST, err.message, Some(err.field)),
    };
    match state.store.create(fields).await {
        Ok(recipe) => (StatusCode::CREATED, Json(recipe)).into_response(),
        Err(CreateError::Invalid(err)) => {
            error_response(StatusCode::BAD_REQUEST, err.message, Some(err.field))
        }
        Err(CreateError::Storage(e)) => internal_error(e),
    }
}

// -- /api/search --

#[derive(Deserialize)]
pub(super) struct SearchParams {
    #[serde(default)]
    q: String,
}

#[derive(Serialize)]
struct SearchResults {
    query: String,
    results_count: usize,
    recipes: Vec<Recipe>,
}

pub(super) async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = params.q.trim().to_string();
    match state.store.search(&query).await {
        Ok(recipes) => Json(SearchResults {
            query,
            results_count: recipes.len(),
            recipes,
        })
        .into_response(),
        Err(e) => internal_error(e),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use tower::ServiceExt;

    use super::super::router;
    use super::*;
    use crate::recipes::RecipeStore;

    async fn app() -> (tempfile::TempDir, axum::Router) {
        let dir = tempfile::tempdir().unwrap();
        let store = RecipeStore::new(&dir.path().join("db"), &dir.path().join("media"))
            .await
            .unwrap();
        store.seed_samples().await.unwrap();
        let state = AppState {
            store: Arc::new(store),
        };
        (dir, router(state))
    }

    async fn send(app: &axum::Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: impl Into<Body>) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(body.into())
            .unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_assistant_post_recipe_query() {
        let (_dir, app) = app().await;
        let body = json!({"query": "What are the ingredients for Hearty Veggie Pasta?"});
        let (status, json) = send(&app, post("/api/voice-assistant", body.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["type"], "recipe_ingredients");
        assert_eq!(json["recipe_slug"], "hearty-veggie-pasta");
        assert_eq!(json["ingredients"].as_array().unwrap().len(), 6);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_assistant_get_ingredient_query() {
        let (_dir, app) = app().await;
        let (status, json) = send(&app, get("/api/voice-assistant?q=tell%20me%20about%20garlic")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["type"], "ingredient_info");
        assert_eq!(json["ingredient"], "Garlic");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_assistant_malformed_body_is_empty_query() {
        let (_dir, app) = app().await;
        for body in ["{not json", "[1, 2]", r#"{"query": 7}"#] {
            let (status, json) = send(&app, post("/api/voice-assistant", body)).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["success"], false);
            assert_eq!(json["type"], "error");
            assert_eq!(
                json["message"],
                "I didn't catch that. Could you please repeat your question?"
            );
        }
        let (_, json) = send(&app, get("/api/voice-assistant")).await;
        assert_eq!(json["type"], "error");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_home_lists_featured_and_latest() {
        let (_dir, app) = app().await;
        let (status, json) = send(&app, get("/api/recipes")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["recipes"].as_array().unwrap().len(), 3);
        assert_eq!(json["featured"][0]["title"], "Citrus Herb Salmon");
        assert_eq!(json["latest"].as_array().unwrap().len(), 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_detail_and_missing() {
        let (_dir, app) = app().await;
        let (status, json) = send(&app, get("/api/recipes/citrus-herb-salmon")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["servings"], 2);

        let (status, json) = send(&app, get("/api/recipes/beef-wellington")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(json["error"].as_str().unwrap().contains("beef-wellington"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_then_ask() {
        let (_dir, app) = app().await;
        let body = json!({
            "title": "Garlic Butter Chicken",
            "slug": "garlic-butter-chicken",
            "short_description": "Pan-seared and glossy.",
            "prep_time": 10,
            "cook_time": 20,
            "ingredients": "2 chicken breasts\n3 cloves garlic\n2 tbsp butter",
            "directions": "Sear the chicken.\nBaste with garlic butter."
        });
        let (status, json) = send(&app, post("/api/recipes", body.to_string())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["hero_image"], "recipes/images/hearty_veggie_pasta.svg");
        assert_eq!(json["servings"], 1);

        let ask = json!({"query": "what do i need for garlic butter chicken"});
        let (_, json) = send(&app, post("/api/voice-assistant", ask.to_string())).await;
        assert_eq!(json["recipe_slug"], "garlic-butter-chicken");
        assert_eq!(
            json["message"],
            "To make Garlic Butter Chicken, you'll need: 2 chicken breasts, 3 cloves garlic, 2 tbsp butter."
        );
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_validation_names_field() {
        let (_dir, app) = app().await;
        let body = json!({
            "title": "Second Pasta",
            "slug": "hearty-veggie-pasta",
            "short_description": "Again.",
            "prep_time": 1,
            "cook_time": 1,
            "ingredients": "pasta",
            "directions": "boil"
        });
        let (status, json) = send(&app, post("/api/recipes", body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "slug");

        let mut negative = body.clone();
        negative["slug"] = json!("second-pasta");
        negative["prep_time"] = json!(-3);
        let (status, json) = send(&app, post("/api/recipes", negative.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "prep_time");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_non_integer_time_names_field() {
        let (_dir, app) = app().await;
        let body = json!({
            "title": "Weeknight Chili",
            "slug": "weeknight-chili",
            "short_description": "Smoky.",
            "prep_time": "ten",
            "cook_time": 30,
            "ingredients": "beans",
            "directions": "simmer"
        });
        let (status, json) = send(&app, post("/api/recipes", body.to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "prep_time");
        assert_eq!(json["error"], "Enter a whole number.");

        let (status, _) = send(&app, get("/api/recipes/weeknight-chili")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_create_malformed_body_is_json_400() {
        let (_dir, app) = app().await;
        let (status, json) = send(&app, post("/api/recipes", "{\"title\": ")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "__all__");
        assert_eq!(json["error"], "Request body must be a JSON object.");

        let untyped = Request::builder()
            .method("POST")
            .uri("/api/recipes")
            .body(Body::from(json!({"title": "Chili"}).to_string()))
            .unwrap();
        let (status, json) = send(&app, untyped).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["field"], "slug");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_search_endpoint() {
        let (_dir, app) = app().await;
        let (status, json) = send(&app, get("/api/search?q=Coconut")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["query"], "Coconut");
        assert_eq!(json["results_count"], 1);
        assert_eq!(json["recipes"][0]["slug"], "golden-mango-smoothie-bowl");

        let (_, json) = send(&app, get("/api/search?q=")).await;
        assert_eq!(json["results_count"], 0);
    }
}
