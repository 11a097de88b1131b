//! Level-up notices.
//!
//! Templates may use `{username}`, `{mention}`, `{displayname}`, `{level}` and
//! `{server}`. Role-award templates may also use `{role}`. Level-downs never
//! produce a notice.

use async_trait::async_trait;

use crate::{
    error::{config::ConfigError, external::ExternalFailure},
    model::{
        activity::LevelTransition,
        notification::{LevelUpNotice, NoticeContext, NoticeTarget},
        settings::GuildSettings,
    },
};

const LEVEL_PLACEHOLDERS: [&str; 5] = ["username", "mention", "displayname", "level", "server"];

const DEFAULT_LEVELUP: &str = "**{displayname}** just reached level {level}!";
const DEFAULT_ROLE_AWARDED: &str = "**{displayname}** just reached level {level} and earned {role}!";

/// Delivers level-up notices.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_notice(&self, notice: &LevelUpNotice) -> Result<(), ExternalFailure>;
}

/// Placeholder names used in a template, in order of appearance.
///
/// A `{` without a closing `}` is treated as literal text.
fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        names.push(&after[..close]);
        rest = &after[close + 1..];
    }

    names
}

/// Checks that a template only uses supported placeholders.
///
/// # Arguments
/// - `template` - Template text
/// - `allow_role` - Whether `{role}` is available (role-award templates)
///
/// # Returns
/// - `Ok(())` - Every placeholder is supported
/// - `Err(ConfigError::InvalidTemplate)` - First unsupported placeholder
pub fn validate_template(template: &str, allow_role: bool) -> Result<(), ConfigError> {
    for name in placeholders(template) {
        let known = LEVEL_PLACEHOLDERS.contains(&name) || (allow_role && name == "role");
        if !known {
            return Err(ConfigError::InvalidTemplate(name.to_string()));
        }
    }
    Ok(())
}

/// Substitutes placeholder values into a template.
///
/// Unknown placeholders are left as written.
pub fn render_template(
    template: &str,
    context: &NoticeContext,
    level: u64,
    role_id: Option<u64>,
) -> String {
    let mut rendered = template
        .replace("{username}", &context.username)
        .replace("{mention}", &format!("<@{}>", context.member_id))
        .replace("{displayname}", &context.display_name)
        .replace("{level}", &level.to_string())
        .replace("{server}", &context.server);

    if let Some(role_id) = role_id {
        rendered = rendered.replace("{role}", &format!("<@&{}>", role_id));
    }

    rendered
}

fn notice_target(settings: &GuildSettings, context: &NoticeContext) -> Option<NoticeTarget> {
    if settings.notify_dm {
        Some(NoticeTarget::DirectMessage(context.member_id))
    } else {
        settings
            .notify_channel
            .or(context.origin_channel)
            .map(NoticeTarget::Channel)
    }
}

/// Builds the notice for a level transition, if one should be sent.
///
/// The role-award template is used when `granted_role` is set. Channel notices
/// are prefixed with the member mention when `notify_mention` is on.
///
/// # Arguments
/// - `settings` - Guild notification settings and templates
/// - `guild_id` - Guild the transition happened in
/// - `context` - Names substituted into the template and the origin channel
/// - `transition` - The level transition
/// - `granted_role` - Level role newly granted by the transition
///
/// # Returns
/// - `Some(LevelUpNotice)` - Notifications on, a level-up, and a target exists
/// - `None` - Nothing to send
pub fn build_notice(
    settings: &GuildSettings,
    guild_id: u64,
    context: &NoticeContext,
    transition: &LevelTransition,
    granted_role: Option<u64>,
) -> Option<LevelUpNotice> {
    let LevelTransition::Up { new_level, .. } = *transition else {
        return None;
    };
    if !settings.notify {
        return None;
    }
    let target = notice_target(settings, context)?;

    let configured = match (target, granted_role) {
        (NoticeTarget::DirectMessage(_), Some(_)) => settings.role_awarded_dm.as_deref(),
        (NoticeTarget::DirectMessage(_), None) => settings.levelup_dm.as_deref(),
        (NoticeTarget::Channel(_), Some(_)) => settings.role_awarded_msg.as_deref(),
        (NoticeTarget::Channel(_), None) => settings.levelup_msg.as_deref(),
    };
    let template = configured.unwrap_or(match granted_role {
        Some(_) => DEFAULT_ROLE_AWARDED,
        None => DEFAULT_LEVELUP,
    });

    let mut content = render_template(template, context, new_level, granted_role);
    if settings.notify_mention && matches!(target, NoticeTarget::Channel(_)) {
        content = format!("<@{}> {}", context.member_id, content);
    }

    Some(LevelUpNotice {
        guild_id,
        member_id: context.member_id,
        target,
        content,
    })
}
