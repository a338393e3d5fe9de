use crate::assistant::{self, AssistantResponse};
use crate::commands::send_chunked;
use crate::state::Context;
use tracing::info;

/// Ask about a recipe's ingredients or an ingredient
#[poise::command(slash_command)]
pub async fn ask(
    ctx: Context<'_>,
    #[description = "e.g. \"What are the ingredients for Citrus Herb Salmon?\""] question: String,
) -> Result<(), anyhow::Error> {
    let recipes = ctx.data().store.list_all().await?;
    let response = assistant::interpret(&question, &recipes);

    info!(
        user = ctx.author().name,
        question,
        kind = response.kind(),
        "assistant query answered"
    );

    let mut reply = format!("**Q:** {}\n\n**A:** {}", question, response.message());
    if let AssistantResponse::RecipeIngredients { slug, .. } = &response {
        reply.push_str(&format!(
            "\n\nSee `/cookbook recipe {}` for the directions.",
            slug
        ));
    }

    send_chunked(&ctx, &reply).await
}
