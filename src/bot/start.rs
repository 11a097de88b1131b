use serenity::all::{Cache, Client, GatewayIntents};
use serenity::http::Http;
use std::sync::Arc;

use crate::{bot::handler::Handler, config::Config, error::AppError, state::AppState};

/// Handles shared with background jobs once the client is built.
#[derive(Clone)]
pub struct BotHandles {
    pub cache: Arc<Cache>,
    pub http: Arc<Http>,
}

/// Builds the Discord bot client without connecting.
///
/// # Arguments
/// - `config` - Application configuration containing the bot token
/// - `state` - Shared state handed to the event handler
///
/// # Returns
/// - `Ok((Client, BotHandles))` - Client ready to start, with its cache and HTTP client
/// - `Err(AppError::DiscordErr)` - Client could not be built
pub async fn init_bot(config: &Config, state: AppState) -> Result<(Client, BotHandles), AppError> {
    // GUILD_MEMBERS, GUILD_PRESENCES and MESSAGE_CONTENT are privileged intents
    // and must be enabled in the Discord Developer Portal
    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MEMBERS
        | GatewayIntents::GUILD_PRESENCES
        | GatewayIntents::GUILD_VOICE_STATES
        | GatewayIntents::MESSAGE_CONTENT;

    let client = Client::builder(&config.discord_bot_token, intents)
        .event_handler(Handler::new(state))
        .await?;

    let handles = BotHandles {
        cache: client.cache.clone(),
        http: client.http.clone(),
    };

    Ok((client, handles))
}

/// Starts the Discord bot in a blocking manner
///
/// Should be called from within a tokio::spawn task since it runs until the
/// bot shuts down.
///
/// # Returns
/// - `Ok(())` if the bot ran and shut down cleanly
/// - `Err(AppError)` if the gateway connection failed
pub async fn start_bot(mut client: Client) -> Result<(), AppError> {
    tracing::info!("Starting Discord bot...");

    client.start().await?;

    Ok(())
}
