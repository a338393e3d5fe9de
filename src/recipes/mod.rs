pub mod seed;
pub mod types;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use cnidarium::{StateDelta, StateRead, StateWrite, Storage};
use futures::StreamExt;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use types::{CreateError, NewRecipe, Recipe, UploadedImage, ValidationError};

// Substore prefix (no trailing slash, cnidarium convention)
const RECIPE_PREFIX: &str = "recipe";

/// Media subdirectory for uploaded recipe images.
const UPLOAD_DIR: &str = "recipes/uploads";

fn recipe_key(slug: &str) -> String {
    format!("{}/{}", RECIPE_PREFIX, slug)
}

pub struct RecipeStore {
    storage: Storage,
    media_dir: PathBuf,
    /// Serializes writers: cnidarium rejects a commit whose delta was forked
    /// from a snapshot older than the latest version.
    write_lock: Mutex<()>,
}

impl RecipeStore {
    pub async fn new(data_dir: &Path, media_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)?;
        let storage = Storage::load(data_dir.to_path_buf(), vec![RECIPE_PREFIX.to_string()])
            .await
            .context("Failed to init cnidarium storage")?;
        Ok(Self {
            storage,
            media_dir: media_dir.to_path_buf(),
            write_lock: Mutex::new(()),
        })
    }

    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Recipe>> {
        let snapshot = self.storage.latest_snapshot();
        let Some(bytes) = snapshot.get_raw(&recipe_key(slug)).await? else {
            return Ok(None);
        };
        let recipe = serde_json::from_slice(&bytes)
            .with_context(|| format!("corrupt recipe record: {}", slug))?;
        Ok(Some(recipe))
    }

    /// All recipes, ordered by title.
    pub async fn list_all(&self) -> Result<Vec<Recipe>> {
        let snapshot = self.storage.latest_snapshot();
        let mut stream = snapshot.prefix_raw(RECIPE_PREFIX);
        let mut results = Vec::new();

        while let Some(entry) = stream.next().await {
            match entry {
                Ok((key, value)) => match serde_json::from_slice::<Recipe>(&value) {
                    Ok(recipe) => results.push(recipe),
                    Err(e) => warn!(key = %key, "Skipping unreadable recipe: {}", e),
                },
                Err(e) => {
                    warn!("Error reading recipe stream: {}", e);
                }
            }
        }

        results.sort_by(|a, b| a.title.cmp(&b.title).then_with(|| a.slug.cmp(&b.slug)));
        Ok(results)
    }

    /// Newest recipes first.
    pub async fn latest(&self, limit: usize) -> Result<Vec<Recipe>> {
        let mut recipes = self.list_all().await?;
        // Stable sort keeps title order among recipes created in the same second
        recipes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recipes.truncate(limit);
        Ok(recipes)
    }

    /// Case-insensitive substring search over every text field.
    /// A blank query matches nothing.
    pub async fn search(&self, query: &str) -> Result<Vec<Recipe>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(vec![]);
        }
        let recipes = self.list_all().await?;
        Ok(recipes.into_iter().filter(|r| r.mentions(&needle)).collect())
    }

    /// Validate and store a new recipe.
    pub async fn create(&self, fields: NewRecipe) -> Result<Recipe, CreateError> {
        let mut recipe = fields.validate(chrono::Utc::now().timestamp())?;

        let _guard = self.write_lock.lock().await;
        if self.get_by_slug(&recipe.slug).await?.is_some() {
            return Err(ValidationError::new("slug", "Recipe with this Slug already exists.").into());
        }

        if let Some(upload) = &fields.uploaded_image {
            recipe.uploaded_image = Some(self.save_upload(upload).await?);
        }

        self.put(&recipe).await?;
        info!(slug = %recipe.slug, title = %recipe.title, "recipe created");
        Ok(recipe)
    }

    /// Insert the sample recipes that are not stored yet.
    /// Returns how many were added.
    pub async fn seed_samples(&self) -> Result<usize> {
        let now = chrono::Utc::now().timestamp();
        let _guard = self.write_lock.lock().await;
        let mut inserted = 0;
        for sample in seed::sample_recipes(now) {
            if self.get_by_slug(&sample.slug).await?.is_some() {
                continue;
            }
            self.put(&sample).await?;
            inserted += 1;
        }
        if inserted > 0 {
            info!(inserted, "sample recipes seeded");
        }
        Ok(inserted)
    }

    /// Callers must hold `write_lock`.
    async fn put(&self, recipe: &Recipe) -> Result<()> {
        let snapshot = self.storage.latest_snapshot();
        let mut delta = StateDelta::new(snapshot);
        delta.put_raw(
            recipe_key(&recipe.slug),
            serde_json::to_vec(recipe).context("serialize recipe")?,
        );
        self.storage.commit(delta).await?;
        debug!(slug = %recipe.slug, "recipe stored");
        Ok(())
    }

    /// Write an uploaded image content-addressed under the media dir.
    /// Returns the media-relative path.
    async fn save_upload(&self, upload: &UploadedImage) -> Result<String, CreateError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(upload.data.trim())
            .map_err(|_| ValidationError::new("uploaded_image", "Upload a valid image."))?;
        if bytes.is_empty() {
            return Err(ValidationError::new("uploaded_image", "The submitted file is empty.").into());
        }

        let ext = upload_extension(&upload.filename)
            .ok_or_else(|| ValidationError::new("uploaded_image", "Upload a valid image."))?;
        let hash = blake3::hash(&bytes).to_hex().to_string();
        let relative = format!("{}/{}.{}", UPLOAD_DIR, hash, ext);

        let dir = self.media_dir.join(UPLOAD_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .with_context(|| format!("create upload dir {:?}", dir))?;
        tokio::fs::write(self.media_dir.join(&relative), &bytes)
            .await
            .context("write uploaded image")?;

        debug!(path = %relative, size = bytes.len(), "image uploaded");
        Ok(relative)
    }
}

/// Lowercased image extension of an uploaded filename, if it is one we accept.
fn upload_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    match ext.as_str() {
        "png" | "jpg" | "jpeg" | "gif" | "webp" | "svg" => Some(ext),
        _ => None,
    }
}
