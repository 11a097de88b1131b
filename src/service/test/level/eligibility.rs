use super::*;

/// Tests that an ordinary message in an enabled guild is accepted.
///
/// Expected: accepted
#[test]
fn accepts_ordinary_message() {
    let settings = enabled_settings();

    let eligibility = message_eligibility(&settings, &message_event(vec![], 1), true);

    assert!(eligibility.is_accepted());
}

/// Tests that a disabled guild never accepts activity.
///
/// Expected: disabled flag set
#[test]
fn disabled_guild_rejects() {
    let settings = GuildSettings::default();

    let eligibility = message_eligibility(&settings, &message_event(vec![], 1), true);

    assert!(eligibility.disabled);
    assert!(!eligibility.is_accepted());
}

/// Tests each ignore list.
///
/// Expected: ignored for ignored user, role, channel and parent category
#[test]
fn ignore_lists_reject() {
    let mut settings = enabled_settings();
    settings.ignored_users.insert(MEMBER_ID);
    assert!(message_eligibility(&settings, &message_event(vec![], 1), true).ignored);

    let mut settings = enabled_settings();
    settings.ignored_roles.insert(20);
    assert!(message_eligibility(&settings, &message_event(vec![20], 1), true).ignored);

    let mut settings = enabled_settings();
    settings.ignored_channels.insert(10);
    assert!(message_eligibility(&settings, &message_event(vec![], 10), true).ignored);

    let event = MessageEvent {
        category_id: Some(10),
        ..message_event(vec![], 11)
    };
    assert!(message_eligibility(&settings, &event, true).ignored);
}

/// Tests minimum length, command and cooldown checks.
///
/// Expected: each flag set by its own condition
#[test]
fn message_checks() {
    let settings = GuildSettings {
        min_length: 30,
        ..enabled_settings()
    };
    let short = message_event(vec![], 1);
    assert!(message_eligibility(&settings, &short, true).too_short);

    let command = MessageEvent {
        is_command: true,
        ..message_event(vec![], 1)
    };
    let settings = enabled_settings();
    assert!(message_eligibility(&settings, &command, true).command);

    let settings = GuildSettings {
        command_xp: true,
        ..enabled_settings()
    };
    assert!(message_eligibility(&settings, &command, true).is_accepted());
    assert!(message_eligibility(&settings, &command, false).cooling_down);
}

/// Tests the voice state toggles.
///
/// Expected: rejected only when both the toggle and the state are set
#[test]
fn voice_toggles_reject() {
    let muted = VoiceTick {
        muted: true,
        ..voice_tick(1)
    };

    let settings = enabled_settings();
    assert!(voice_eligibility(&settings, &muted).is_accepted());

    let settings = GuildSettings {
        ignore_muted: true,
        ..enabled_settings()
    };
    assert!(voice_eligibility(&settings, &muted).voice_state);
    assert!(voice_eligibility(&settings, &voice_tick(1)).is_accepted());

    let solo = VoiceTick {
        solo: true,
        ..voice_tick(1)
    };
    let settings = GuildSettings {
        ignore_solo: true,
        ..enabled_settings()
    };
    assert!(voice_eligibility(&settings, &solo).voice_state);
}
