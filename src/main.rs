mod assistant;
mod commands;
mod recipes;
mod server;
mod state;

use std::future::Future;
use std::sync::Arc;

use anyhow::Context as _;
use poise::serenity_prelude as serenity;
use poise::{Framework, FrameworkOptions};
use tracing::{error, info, warn, Level};

use recipes::RecipeStore;
use state::{AppState, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .init();

    // Load env
    let _ = dotenv::dotenv();
    let settings = Settings::from_env()?;

    // Init storage
    let store = Arc::new(RecipeStore::new(&settings.data_dir, &settings.media_dir).await?);
    info!("Recipe store initialized at {:?}", settings.data_dir);

    if settings.seed_samples {
        store.seed_samples().await?;
    }

    let app_state = AppState { store };

    let http = server::serve(app_state.clone(), settings.bind_addr);
    let bot = match settings.discord_token.clone() {
        Some(token) => Some(run_bot(token, settings.discord_guild_id, app_state)),
        None => {
            info!("DISCORD_TOKEN not set, chat commands disabled");
            None
        }
    };

    supervise(http, bot).await
}

/// Drive the HTTP server alongside the optional bot. The process lives as
/// long as the server does; a bot that stops or fails is only logged.
async fn supervise<H, B>(http: H, bot: Option<B>) -> anyhow::Result<()>
where
    H: Future<Output = anyhow::Result<()>>,
    B: Future<Output = anyhow::Result<()>>,
{
    tokio::pin!(http);

    if let Some(bot) = bot {
        tokio::select! {
            res = &mut http => return res,
            res = bot => match res {
                Ok(()) => warn!("Discord bot exited, HTTP server still running"),
                Err(e) => error!("Discord bot stopped: {:#}", e),
            },
        }
    }

    http.await
}

async fn run_bot(
    token: String,
    guild_id: Option<u64>,
    app_state: AppState,
) -> anyhow::Result<()> {
    let guild_id = guild_id.map(serenity::GuildId::new);
    let intents = serenity::GatewayIntents::GUILDS | serenity::GatewayIntents::GUILD_MESSAGES;

    let framework = Framework::builder()
        .options(FrameworkOptions {
            commands: vec![commands::cookbook()],
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("Bot connected as: {} ({})", ready.user.name, ready.user.id);

                let commands = &framework.options().commands;
                info!("Registering {} top-level command(s):", commands.len());
                for cmd in commands {
                    info!("  /{} ({} subcommands)", cmd.name, cmd.subcommands.len());
                    for sub in &cmd.subcommands {
                        info!("    /{} {}", cmd.name, sub.name);
                    }
                }

                if let Some(gid) = guild_id {
                    info!("Registering to guild {} (instant)", gid);
                    poise::builtins::register_in_guild(ctx, &framework.options().commands, gid)
                        .await?;
                } else {
                    info!("Registering globally (up to 1 hour delay)");
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                }

                Ok(app_state)
            })
        })
        .build();

    info!("Starting Cookbook Discord bot...");

    let mut client = serenity::ClientBuilder::new(&token, intents)
        .framework(framework)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create client: {}", e))?;

    client.start().await.context("Discord client failed")?;

    Ok(())
}
