use super::*;
use crate::service::bonus::{base_range, resolve_range, BonusInput};

fn message_input(role_ids: &[u64], channel_id: u64) -> BonusInput<'_> {
    BonusInput {
        kind: EventKind::Message,
        role_ids,
        channel_id,
        category_id: None,
        streaming: false,
    }
}

/// Tests that role and channel bonuses stack onto the base range.
///
/// Expected: [3,6] + role [1,2] + channel [0,1] = [4,9]
#[test]
fn stacks_role_and_channel_bonus() {
    let mut settings = enabled_settings();
    settings.role_bonus.msg.insert(700, range(1, 2));
    settings.channel_bonus.msg.insert(800, range(0, 1));

    let effective = resolve_range(&settings, message_input(&[700], 800));

    assert_eq!(effective, range(4, 9));
}

/// Tests that every matching role bonus applies, in any order.
///
/// Expected: identical ranges for both role orders, each role counted once
#[test]
fn stacking_is_order_independent() {
    let mut settings = enabled_settings();
    settings.role_bonus.msg.insert(1, range(1, 1));
    settings.role_bonus.msg.insert(2, range(2, 5));

    let forward = resolve_range(&settings, message_input(&[1, 2], 9));
    let backward = resolve_range(&settings, message_input(&[2, 1, 2], 9));

    assert_eq!(forward, range(6, 12));
    assert_eq!(backward, forward);
}

/// Tests that the parent category's bonus stacks with the channel's.
///
/// Expected: [3,6] + channel [1,1] + category [2,2] = [6,9]
#[test]
fn category_bonus_stacks() {
    let mut settings = enabled_settings();
    settings.channel_bonus.msg.insert(800, range(1, 1));
    settings.channel_bonus.msg.insert(80, range(2, 2));

    let effective = resolve_range(
        &settings,
        BonusInput {
            category_id: Some(80),
            ..message_input(&[], 800)
        },
    );

    assert_eq!(effective, range(6, 9));
}

/// Tests that bonuses only apply to their own activity kind.
///
/// Expected: voice bonus ignored for messages, message bonus ignored for voice
#[test]
fn bonuses_are_kind_specific() {
    let mut settings = enabled_settings();
    settings.role_bonus.voice.insert(700, range(5, 5));
    settings.role_bonus.msg.insert(701, range(7, 7));

    let message = resolve_range(&settings, message_input(&[700], 1));
    let voice = resolve_range(
        &settings,
        BonusInput {
            kind: EventKind::Voice,
            ..message_input(&[701], 1)
        },
    );

    assert_eq!(message, XpRange::DEFAULT_MESSAGE);
    assert_eq!(voice, XpRange::fixed(settings.voice_xp));
}

/// Tests the stream bonus.
///
/// Expected: applied to streaming voice members only
#[test]
fn stream_bonus_applies_while_streaming() {
    let mut settings = enabled_settings();
    settings.stream_bonus = Some(range(1, 3));
    let voice = BonusInput {
        kind: EventKind::Voice,
        ..message_input(&[], 1)
    };

    let idle = resolve_range(&settings, voice);
    let streaming = resolve_range(
        &settings,
        BonusInput {
            streaming: true,
            ..voice
        },
    );
    let message = resolve_range(
        &settings,
        BonusInput {
            streaming: true,
            ..message_input(&[], 1)
        },
    );

    assert_eq!(idle, range(2, 2));
    assert_eq!(streaming, range(3, 5));
    assert_eq!(message, XpRange::DEFAULT_MESSAGE);
}

/// Tests the base ranges.
///
/// Expected: configured message range, fixed voice rate
#[test]
fn base_range_per_kind() {
    let settings = GuildSettings {
        xp: range(10, 20),
        voice_xp: 4,
        ..Default::default()
    };

    assert_eq!(base_range(&settings, EventKind::Message), range(10, 20));
    assert_eq!(base_range(&settings, EventKind::Voice), range(4, 4));
}
