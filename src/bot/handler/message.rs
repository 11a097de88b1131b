use rand::{rngs::StdRng, SeedableRng};
use serenity::all::{Context, Message};

use crate::{
    bot::discord::{channel_category, member_context, DiscordNotifier, DiscordRoleMutator},
    model::activity::MessageEvent,
    service::activity::ActivityService,
    state::AppState,
};

/// Handle message creation in a channel
///
/// Guild messages from members are turned into XP awards. Bots and direct
/// messages are ignored.
pub async fn handle_message(state: &AppState, ctx: Context, message: Message) {
    let Some(guild_id) = message.guild_id else {
        return;
    };
    if message.author.bot {
        return;
    }

    let guild_id = guild_id.get();
    let member_id = message.author.id.get();
    let channel_id = message.channel_id.get();

    let role_ids: Vec<u64> = message
        .member
        .as_ref()
        .map(|member| member.roles.iter().map(|role_id| role_id.get()).collect())
        .unwrap_or_default();

    let event = MessageEvent {
        guild_id,
        member_id,
        channel_id,
        category_id: channel_category(&ctx.cache, guild_id, channel_id),
        role_ids,
        content_length: message.content.chars().count(),
        is_command: state.is_command(&message.content),
        timestamp: message.timestamp.to_utc(),
    };

    let mut member = member_context(
        &ctx.cache,
        guild_id,
        member_id,
        &event.role_ids,
        Some(channel_id),
    );
    if member.notice.username.is_empty() {
        member.notice.username = message.author.name.clone();
        member.notice.display_name = message
            .member
            .as_ref()
            .and_then(|member| member.nick.clone())
            .or_else(|| message.author.global_name.clone())
            .unwrap_or_else(|| message.author.name.clone());
    }

    let mutator = DiscordRoleMutator::new(ctx.http.clone());
    let notifier = DiscordNotifier::new(ctx.http.clone());
    let service = ActivityService::new(&state.store, &mutator, &notifier);
    let mut rng = StdRng::from_rng(&mut rand::rng());

    match service
        .handle_message(&event, &state.cooldowns, &member, &mut rng)
        .await
    {
        Ok(outcome) => {
            if outcome.award.is_some() {
                state.writer.request_save();
            }
        }
        Err(e) => {
            tracing::error!(
                "Failed to award message XP to member {} in guild {}: {:?}",
                member_id,
                guild_id,
                e
            );
        }
    }
}
