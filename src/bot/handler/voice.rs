use chrono::Utc;
use serenity::all::{Context, VoiceState};

use crate::{
    bot::discord::{channel_category, is_invisible},
    data::voice::VoiceStatus,
    scheduler::voice_xp::credit_voice_tick,
    state::AppState,
};

/// Handle a voice state change.
///
/// Joins open a voice session, leaves and moves close the old one and credit
/// its remaining whole minutes right away. State changes within the same
/// channel only update the tracked flags.
pub async fn handle_voice_state_update(
    state: &AppState,
    ctx: Context,
    _old: Option<VoiceState>,
    new: VoiceState,
) {
    let Some(guild_id) = new.guild_id else {
        return;
    };
    if new.member.as_ref().is_some_and(|member| member.user.bot) {
        return;
    }

    let guild_id = guild_id.get();
    let member_id = new.user_id.get();

    let status = new.channel_id.map(|channel_id| VoiceStatus {
        channel_id: channel_id.get(),
        category_id: channel_category(&ctx.cache, guild_id, channel_id.get()),
        role_ids: new
            .member
            .as_ref()
            .map(|member| member.roles.iter().map(|role_id| role_id.get()).collect())
            .unwrap_or_default(),
        muted: new.mute || new.self_mute,
        deafened: new.deaf || new.self_deaf,
        streaming: new.self_stream.unwrap_or(false),
        invisible: is_invisible(&ctx.cache, guild_id, member_id),
    });

    let Some(tick) = state.voice.update(guild_id, member_id, status, Utc::now()).await else {
        return;
    };

    if credit_voice_tick(state, &ctx.cache, ctx.http.clone(), &tick).await {
        state.writer.request_save();
    }
}
