//! Level engine: turns accepted activity into XP awards and applies them.
//!
//! Evaluation is pure with respect to guild state; only `apply_award` and
//! `set_level` mutate a profile. Side effects such as role updates and
//! notifications are left to the caller, driven by the returned `LevelChange`.

use rand::Rng;

use crate::{
    error::config::ConfigError,
    model::{
        activity::{
            AwardSource, Eligibility, EventKind, LevelChange, LevelTransition, MessageEvent,
            VoiceTick, XpAward,
        },
        algorithm::Algorithm,
        profile::Profile,
        settings::GuildSettings,
    },
    service::bonus::{resolve_range, BonusInput},
};

/// Whether the member, one of their roles, the channel or its category is ignored.
fn is_ignored(
    settings: &GuildSettings,
    member_id: u64,
    role_ids: &[u64],
    channel_id: u64,
    category_id: Option<u64>,
) -> bool {
    settings.ignored_users.contains(&member_id)
        || role_ids
            .iter()
            .any(|role_id| settings.ignored_roles.contains(role_id))
        || settings.ignored_channels.contains(&channel_id)
        || category_id.is_some_and(|id| settings.ignored_channels.contains(&id))
}

/// Eligibility of a message event.
///
/// # Arguments
/// - `settings` - Guild settings with ignore lists, minimum length and command toggle
/// - `event` - The message event
/// - `cooldown_ready` - Whether the member's cooldown has elapsed
pub fn message_eligibility(
    settings: &GuildSettings,
    event: &MessageEvent,
    cooldown_ready: bool,
) -> Eligibility {
    Eligibility {
        disabled: !settings.enabled,
        ignored: is_ignored(
            settings,
            event.member_id,
            &event.role_ids,
            event.channel_id,
            event.category_id,
        ),
        too_short: event.content_length < settings.min_length,
        command: event.is_command && !settings.command_xp,
        cooling_down: !cooldown_ready,
        voice_state: false,
    }
}

/// Eligibility of a voice tick, including the voice state toggles.
pub fn voice_eligibility(settings: &GuildSettings, tick: &VoiceTick) -> Eligibility {
    let voice_state = (settings.ignore_muted && tick.muted)
        || (settings.ignore_deafened && tick.deafened)
        || (settings.ignore_solo && tick.solo)
        || (settings.ignore_invisible && tick.invisible);

    Eligibility {
        disabled: !settings.enabled,
        ignored: is_ignored(
            settings,
            tick.member_id,
            &tick.role_ids,
            tick.channel_id,
            tick.category_id,
        ),
        voice_state,
        ..Default::default()
    }
}

/// Evaluates a message event into an XP award.
///
/// # Arguments
/// - `settings` - Guild settings
/// - `event` - The message event
/// - `eligibility` - Decisions made by the caller before evaluation
/// - `rng` - Random source for sampling the award
///
/// # Returns
/// - `Ok(Some(XpAward))` - Event accepted, award sampled from the effective range
/// - `Ok(None)` - Event rejected by eligibility
/// - `Err(ConfigError)` - Guild algorithm is misconfigured
pub fn evaluate_message_event<R: Rng + ?Sized>(
    settings: &GuildSettings,
    event: &MessageEvent,
    eligibility: Eligibility,
    rng: &mut R,
) -> Result<Option<XpAward>, ConfigError> {
    if !eligibility.is_accepted() {
        return Ok(None);
    }
    settings.algorithm.validate()?;

    let range = resolve_range(
        settings,
        BonusInput {
            kind: EventKind::Message,
            role_ids: &event.role_ids,
            channel_id: event.channel_id,
            category_id: event.category_id,
            streaming: false,
        },
    );

    Ok(Some(XpAward::message(range.sample(rng))))
}

/// Evaluates a voice tick into an XP award.
///
/// The per-minute rate is sampled once from the effective range and multiplied
/// by the tick's whole minutes.
///
/// # Returns
/// - `Ok(Some(XpAward))` - Tick accepted with at least one minute
/// - `Ok(None)` - Tick rejected or covers no whole minute
/// - `Err(ConfigError)` - Guild algorithm is misconfigured
pub fn evaluate_voice_tick<R: Rng + ?Sized>(
    settings: &GuildSettings,
    tick: &VoiceTick,
    eligibility: Eligibility,
    rng: &mut R,
) -> Result<Option<XpAward>, ConfigError> {
    if !eligibility.is_accepted() || tick.minutes == 0 {
        return Ok(None);
    }
    settings.algorithm.validate()?;

    let per_minute = resolve_range(
        settings,
        BonusInput {
            kind: EventKind::Voice,
            role_ids: &tick.role_ids,
            channel_id: tick.channel_id,
            category_id: tick.category_id,
            streaming: tick.streaming,
        },
    );
    let xp = per_minute.sample(rng).saturating_mul(tick.minutes);

    Ok(Some(XpAward::voice(xp, tick.minutes)))
}

fn transition(old_level: u64, new_level: u64) -> Option<LevelTransition> {
    if new_level > old_level {
        Some(LevelTransition::Up {
            old_level,
            new_level,
        })
    } else if new_level < old_level {
        Some(LevelTransition::Down {
            old_level,
            new_level,
        })
    } else {
        None
    }
}

/// Applies an award to a profile and detects a level transition.
///
/// XP never drops below zero. A jump across several levels yields one transition
/// to the terminal level. Activity counters are bumped for message and voice
/// awards. The profile is left untouched if the algorithm is misconfigured.
///
/// # Arguments
/// - `profile` - Member profile to update
/// - `award` - Signed XP delta and its source
/// - `algorithm` - Guild leveling curve
///
/// # Returns
/// - `Ok(LevelChange)` - Old and new XP plus the transition, if any
/// - `Err(ConfigError)` - Algorithm cannot convert XP to a level
pub fn apply_award(
    profile: &mut Profile,
    award: XpAward,
    algorithm: &Algorithm,
) -> Result<LevelChange, ConfigError> {
    let old_xp = profile.xp;
    let new_xp = if award.delta >= 0 {
        old_xp.saturating_add(award.delta.unsigned_abs())
    } else {
        old_xp.saturating_sub(award.delta.unsigned_abs())
    };
    let new_level = algorithm.get_level_for_xp(new_xp)?;

    let change = LevelChange {
        old_xp,
        new_xp,
        transition: transition(profile.level, new_level),
    };

    profile.xp = new_xp;
    profile.level = new_level;
    match award.source {
        AwardSource::Message => profile.messages = profile.messages.saturating_add(1),
        AwardSource::Voice { minutes } => {
            profile.voice_minutes = profile.voice_minutes.saturating_add(minutes)
        }
        AwardSource::Admin => {}
    }

    Ok(change)
}

/// Administrative override setting a member's level directly.
///
/// XP is set to the exact threshold of the level so both fields stay consistent.
pub fn set_level(profile: &mut Profile, level: u64, algorithm: &Algorithm) -> LevelChange {
    let old_xp = profile.xp;
    let new_xp = algorithm.get_xp_for_level(level);

    let change = LevelChange {
        old_xp,
        new_xp,
        transition: transition(profile.level, level),
    };

    profile.xp = new_xp;
    profile.level = level;

    change
}
