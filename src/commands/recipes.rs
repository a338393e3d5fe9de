use crate::commands::send_chunked;
use crate::recipes::types::Recipe;
use crate::state::Context;

/// Show a recipe's ingredients and directions
#[poise::command(slash_command)]
pub async fn recipe(
    ctx: Context<'_>,
    #[description = "Recipe slug"]
    #[autocomplete = "autocomplete_slug"]
    slug: String,
) -> Result<(), anyhow::Error> {
    match ctx.data().store.get_by_slug(slug.trim()).await? {
        Some(recipe) => send_chunked(&ctx, &render_recipe(&recipe)).await,
        None => {
            ctx.say(format!("No recipe found with slug `{}`.", slug))
                .await?;
            Ok(())
        }
    }
}

/// Search recipes by title, description, ingredients or directions
#[poise::command(slash_command)]
pub async fn search(
    ctx: Context<'_>,
    #[description = "Text to look for"] query: String,
) -> Result<(), anyhow::Error> {
    let results = ctx.data().store.search(&query).await?;
    if results.is_empty() {
        ctx.say(format!("No recipes mention **{}**.", query.trim()))
            .await?;
        return Ok(());
    }

    let mut output = format!(
        "**{} result(s) for '{}'**\n\n",
        results.len(),
        query.trim()
    );
    for recipe in &results {
        output.push_str(&render_summary(recipe));
    }
    send_chunked(&ctx, &output).await
}

/// List every recipe in the cookbook
#[poise::command(slash_command)]
pub async fn recipes(ctx: Context<'_>) -> Result<(), anyhow::Error> {
    let all = ctx.data().store.list_all().await?;
    if all.is_empty() {
        ctx.say("The cookbook is empty.").await?;
        return Ok(());
    }

    let mut output = String::from("**Cookbook**\n\n");
    for recipe in &all {
        output.push_str(&render_summary(recipe));
    }
    send_chunked(&ctx, &output).await
}

/// Autocomplete for recipe slugs.
async fn autocomplete_slug(ctx: Context<'_>, partial: &str) -> Vec<String> {
    let recipes = ctx.data().store.list_all().await.unwrap_or_default();

    recipes
        .into_iter()
        .map(|r| r.slug)
        .filter(|s| s.contains(&partial.to_lowercase()))
        .take(25)
        .collect()
}

fn render_summary(recipe: &Recipe) -> String {
    format!(
        "- **{}** (`{}`) {} min prep, {} min cook, serves {}\n",
        recipe.title, recipe.slug, recipe.prep_time, recipe.cook_time, recipe.servings
    )
}

fn render_recipe(recipe: &Recipe) -> String {
    let mut out = format!("**{}**\n", recipe.title);
    if !recipe.subtitle.is_empty() {
        out.push_str(&format!("*{}*\n", recipe.subtitle));
    }
    out.push_str(&format!(
        "\n{}\n\nPrep {} min | Cook {} min | Serves {}\n\n**Ingredients**\n",
        recipe.short_description, recipe.prep_time, recipe.cook_time, recipe.servings
    ));
    for line in recipe.ingredient_list() {
        out.push_str(&format!("- {}\n", line));
    }
    out.push_str("\n**Directions**\n");
    let steps = recipe.directions.iter().map(|s| s.trim()).filter(|s| !s.is_empty());
    for (i, step) in steps.enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, step));
    }
    out
}
