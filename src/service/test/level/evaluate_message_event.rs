use super::*;

/// Tests that an accepted message earns XP within the effective range.
///
/// Expected: Ok(Some) with delta in [4, 9] for every draw
#[test]
fn awards_within_effective_range() {
    let mut settings = enabled_settings();
    settings.role_bonus.msg.insert(700, range(1, 2));
    settings.channel_bonus.msg.insert(800, range(0, 1));
    let event = message_event(vec![700], 800);
    let mut rng = StdRng::seed_from_u64(1);

    for _ in 0..200 {
        let award = evaluate_message_event(&settings, &event, Eligibility::default(), &mut rng)
            .unwrap()
            .unwrap();
        assert!((4..=9).contains(&award.delta));
        assert_eq!(award.source, AwardSource::Message);
    }
}

/// Tests that a rejected message earns nothing.
///
/// Expected: Ok(None) for each rejection reason
#[test]
fn rejected_message_earns_nothing() {
    let settings = enabled_settings();
    let event = message_event(vec![], 1);
    let mut rng = StdRng::seed_from_u64(1);
    let rejections = [
        Eligibility { disabled: true, ..Default::default() },
        Eligibility { ignored: true, ..Default::default() },
        Eligibility { too_short: true, ..Default::default() },
        Eligibility { command: true, ..Default::default() },
        Eligibility { cooling_down: true, ..Default::default() },
    ];

    for eligibility in rejections {
        let award = evaluate_message_event(&settings, &event, eligibility, &mut rng).unwrap();
        assert!(award.is_none());
    }
}

/// Tests that a misconfigured algorithm is surfaced before any award.
///
/// Expected: Err(ZeroBase)
#[test]
fn zero_base_fails_closed() {
    let settings = GuildSettings {
        algorithm: Algorithm::new(0, 2.0).unwrap(),
        ..enabled_settings()
    };
    let mut rng = StdRng::seed_from_u64(1);

    let result = evaluate_message_event(
        &settings,
        &message_event(vec![], 1),
        Eligibility::default(),
        &mut rng,
    );

    assert_eq!(result, Err(ConfigError::ZeroBase));
}
