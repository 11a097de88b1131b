//! Guild availability handlers.
//!
//! Settings live in the settings store regardless of guild availability. These
//! handlers only log availability and drop the transient activity state of
//! guilds the bot was removed from.

use serenity::all::{Context, Guild, UnavailableGuild};

use crate::state::AppState;

/// Handles a guild becoming available or the bot joining a new guild.
///
/// # Arguments
/// - `state` - Shared application state
/// - `_ctx` - Discord context
/// - `guild` - The guild that became available
/// - `is_new` - Whether the bot just joined the guild
pub async fn handle_guild_create(
    state: &AppState,
    _ctx: Context,
    guild: Guild,
    is_new: Option<bool>,
) {
    let guild_id = guild.id.get();

    let enabled = match state.store.existing_guild(guild_id).await {
        Some(settings) => settings.lock().await.enabled,
        None => false,
    };

    if is_new == Some(true) {
        tracing::info!("Joined guild {} ({})", guild.name, guild_id);
    } else {
        tracing::debug!(
            "Guild {} ({}) available, leveling enabled: {}",
            guild.name,
            guild_id,
            enabled
        );
    }
}

/// Handles the bot leaving a guild.
///
/// Outages also fire this event with `unavailable` set; those keep all state.
pub async fn handle_guild_delete(
    state: &AppState,
    _ctx: Context,
    incomplete: UnavailableGuild,
    _full: Option<Guild>,
) {
    if incomplete.unavailable {
        tracing::warn!("Guild {} became unavailable", incomplete.id);
        return;
    }

    state.clear_guild_activity(incomplete.id.get()).await;
    tracing::info!("Removed from guild {}", incomplete.id);
}
