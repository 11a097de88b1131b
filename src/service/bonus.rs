//! Effective award ranges with stacked bonuses.
//!
//! Every matching bonus adds to the base range: role bonuses for each distinct
//! role the member holds, a channel bonus for the channel and another for its
//! parent category, and the stream bonus for streaming voice members. The result
//! does not depend on the order bonuses are found in.

use std::collections::BTreeSet;

use crate::model::{activity::EventKind, settings::GuildSettings, xp_range::XpRange};

/// Event attributes that decide which bonuses apply.
#[derive(Debug, Clone, Copy)]
pub struct BonusInput<'a> {
    pub kind: EventKind,
    pub role_ids: &'a [u64],
    pub channel_id: u64,
    pub category_id: Option<u64>,
    /// Only consulted for voice events.
    pub streaming: bool,
}

/// Base range for an event kind before bonuses.
///
/// Messages use the guild's configured range; voice uses the fixed per-minute rate.
pub fn base_range(settings: &GuildSettings, kind: EventKind) -> XpRange {
    match kind {
        EventKind::Message => settings.xp,
        EventKind::Voice => XpRange::fixed(settings.voice_xp),
    }
}

/// Computes the effective award range for an event.
///
/// # Arguments
/// - `settings` - Guild settings holding the bonus rules
/// - `input` - Kind, roles, channel and streaming state of the event
///
/// # Returns
/// - `XpRange` - Base range plus the sum of every matching bonus
pub fn resolve_range(settings: &GuildSettings, input: BonusInput<'_>) -> XpRange {
    let role_bonuses = settings.role_bonus.for_kind(input.kind);
    let channel_bonuses = settings.channel_bonus.for_kind(input.kind);

    let distinct_roles: BTreeSet<u64> = input.role_ids.iter().copied().collect();
    let role_matches = distinct_roles
        .iter()
        .filter_map(|role_id| role_bonuses.get(role_id));

    let channel_matches = std::iter::once(input.channel_id)
        .chain(input.category_id.filter(|id| *id != input.channel_id))
        .filter_map(|channel_id| channel_bonuses.get(&channel_id));

    let stream_match = match input.kind {
        EventKind::Voice if input.streaming => settings.stream_bonus.as_ref(),
        _ => None,
    };

    role_matches
        .chain(channel_matches)
        .chain(stream_match)
        .fold(base_range(settings, input.kind), |range, bonus| {
            range.stacked(*bonus)
        })
}
