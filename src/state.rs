use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};

use crate::recipes::RecipeStore;

/// Runtime settings, read from the environment (a `.env` file is honoured).
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
    pub media_dir: PathBuf,
    pub seed_samples: bool,
    pub discord_token: Option<String>,
    pub discord_guild_id: Option<u64>,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let bind_addr = dotenv::var("COOKBOOK_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8000".to_string())
            .parse()
            .context("COOKBOOK_BIND_ADDR must be a socket address")?;
        let data_dir = dotenv::var("COOKBOOK_DATA_DIR")
            .unwrap_or_else(|_| "./data/recipes".to_string())
            .into();
        let media_dir = dotenv::var("COOKBOOK_MEDIA_DIR")
            .unwrap_or_else(|_| "./data/media".to_string())
            .into();
        let seed_samples = dotenv::var("COOKBOOK_SEED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true);
        let discord_token = dotenv::var("DISCORD_TOKEN").ok().filter(|t| !t.is_empty());
        let discord_guild_id = dotenv::var("DISCORD_GUILD_ID")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok());

        Ok(Self {
            bind_addr,
            data_dir,
            media_dir,
            seed_samples,
            discord_token,
            discord_guild_id,
        })
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "0" | "false" | "no" | "off"
    )
}

/// Shared by the HTTP handlers and the chat commands.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecipeStore>,
}

pub type Context<'a> = poise::Context<'a, AppState, anyhow::Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag(" yes "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("OFF"));
        assert!(!parse_flag("0"));
    }
}
