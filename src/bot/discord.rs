//! Discord collaborators for the level engine.
//!
//! Role edits and level-up notices go through the Serenity HTTP client. Member,
//! role and channel lookups read the gateway cache and never await while a cache
//! reference is held.

use async_trait::async_trait;
use serenity::all::{
    Cache, ChannelId, CreateMessage, EditMember, GuildId, Member, OnlineStatus, Role, UserId,
};
use serenity::http::Http;
use std::{collections::BTreeSet, sync::Arc};

use crate::{
    error::external::ExternalFailure,
    model::{
        notification::{LevelUpNotice, NoticeContext, NoticeTarget},
        role::{RoleDiff, RoleHierarchy},
    },
    service::{activity::MemberContext, notification::Notifier, role_sync::RoleMutator},
};

/// Applies role diffs with one member edit per diff.
pub struct DiscordRoleMutator {
    http: Arc<Http>,
}

impl DiscordRoleMutator {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl RoleMutator for DiscordRoleMutator {
    async fn apply_role_diff(
        &self,
        guild_id: u64,
        diff: &RoleDiff,
        current: &BTreeSet<u64>,
    ) -> Result<(), ExternalFailure> {
        let roles = diff.resulting_roles(current);

        GuildId::new(guild_id)
            .edit_member(
                &self.http,
                UserId::new(diff.member_id),
                EditMember::new().roles(roles),
            )
            .await
            .map(|_| ())
            .map_err(|e| ExternalFailure::RoleMutation {
                member_id: diff.member_id,
                reason: e.to_string(),
            })
    }
}

/// Sends level-up notices as direct or channel messages.
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send_notice(&self, notice: &LevelUpNotice) -> Result<(), ExternalFailure> {
        let message = CreateMessage::new().content(&notice.content);

        let result = match notice.target {
            NoticeTarget::DirectMessage(user_id) => {
                UserId::new(user_id).direct_message(&self.http, message).await
            }
            NoticeTarget::Channel(channel_id) => {
                ChannelId::new(channel_id)
                    .send_message(&self.http, message)
                    .await
            }
        };

        result.map(|_| ()).map_err(|e| ExternalFailure::Notification {
            member_id: notice.member_id,
            reason: e.to_string(),
        })
    }
}

/// Builds the member context for an activity from the guild's roles and member.
///
/// # Arguments
/// - `guild_name` - Name substituted for `{server}`
/// - `roles` - Every role in the guild
/// - `bot_role_ids` - Roles held by the bot
/// - `member_id` - Member the activity belongs to
/// - `member` - Cached member, if known
/// - `fallback_roles` - Roles reported with the event, used when the member is not cached
/// - `origin_channel` - Channel the activity happened in
pub fn member_context_from_parts<'a>(
    guild_name: &str,
    roles: impl IntoIterator<Item = &'a Role>,
    bot_role_ids: &[u64],
    member_id: u64,
    member: Option<&Member>,
    fallback_roles: &[u64],
    origin_channel: Option<u64>,
) -> MemberContext {
    let (current_roles, username, display_name) = match member {
        Some(member) => (
            member.roles.iter().map(|role_id| role_id.get()).collect(),
            member.user.name.clone(),
            member.display_name().to_string(),
        ),
        None => (
            fallback_roles.iter().copied().collect(),
            String::new(),
            String::new(),
        ),
    };

    MemberContext {
        current_roles,
        hierarchy: RoleHierarchy::from_roles(roles, bot_role_ids),
        notice: NoticeContext {
            member_id,
            username,
            display_name,
            server: guild_name.to_string(),
            origin_channel,
        },
    }
}

/// Builds the member context for an activity from the gateway cache.
///
/// An uncached guild yields a context with an empty hierarchy, which grants no
/// roles.
pub fn member_context(
    cache: &Cache,
    guild_id: u64,
    member_id: u64,
    fallback_roles: &[u64],
    origin_channel: Option<u64>,
) -> MemberContext {
    let bot_id = cache.current_user().id;

    let Some(guild) = cache.guild(GuildId::new(guild_id)) else {
        tracing::warn!("Guild {} is not cached, roles will not be managed", guild_id);
        return MemberContext {
            current_roles: fallback_roles.iter().copied().collect(),
            notice: NoticeContext {
                member_id,
                origin_channel,
                ..Default::default()
            },
            ..Default::default()
        };
    };

    let bot_role_ids: Vec<u64> = guild
        .members
        .get(&bot_id)
        .map(|bot| bot.roles.iter().map(|role_id| role_id.get()).collect())
        .unwrap_or_default();

    member_context_from_parts(
        &guild.name,
        guild.roles.values(),
        &bot_role_ids,
        member_id,
        guild.members.get(&UserId::new(member_id)),
        fallback_roles,
        origin_channel,
    )
}

/// Category a guild channel belongs to.
///
/// Threads resolve through their parent channel.
pub fn channel_category(cache: &Cache, guild_id: u64, channel_id: u64) -> Option<u64> {
    let guild = cache.guild(GuildId::new(guild_id))?;
    let channel_id = ChannelId::new(channel_id);

    if let Some(channel) = guild.channels.get(&channel_id) {
        return channel.parent_id.map(|parent| parent.get());
    }

    let thread_parent = guild
        .threads
        .iter()
        .find(|thread| thread.id == channel_id)
        .and_then(|thread| thread.parent_id)?;

    guild
        .channels
        .get(&thread_parent)
        .and_then(|channel| channel.parent_id)
        .map(|parent| parent.get())
}

/// Whether the member appears offline while connected.
///
/// Requires the presence intent. Without a cached presence the member is
/// treated as visible.
pub fn is_invisible(cache: &Cache, guild_id: u64, member_id: u64) -> bool {
    cache
        .guild(GuildId::new(guild_id))
        .and_then(|guild| {
            guild
                .presences
                .get(&UserId::new(member_id))
                .map(|presence| presence.status == OnlineStatus::Offline)
        })
        .unwrap_or(false)
}
