use super::*;

/// Tests that voice XP is the per-minute rate times whole minutes.
///
/// Expected: 2 XP per minute * 5 minutes = 10
#[test]
fn awards_rate_times_minutes() {
    let settings = enabled_settings();
    let mut rng = StdRng::seed_from_u64(3);

    let award = evaluate_voice_tick(&settings, &voice_tick(5), Eligibility::default(), &mut rng)
        .unwrap()
        .unwrap();

    assert_eq!(award.delta, 10);
    assert_eq!(award.source, AwardSource::Voice { minutes: 5 });
}

/// Tests that voice bonuses stack onto the per-minute rate.
///
/// Expected: (2 + [1,3]) * 3 minutes lies in [9, 15]
#[test]
fn bonuses_stack_per_minute() {
    let mut settings = enabled_settings();
    settings.stream_bonus = Some(range(1, 3));
    let tick = VoiceTick {
        streaming: true,
        ..voice_tick(3)
    };
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..100 {
        let award = evaluate_voice_tick(&settings, &tick, Eligibility::default(), &mut rng)
            .unwrap()
            .unwrap();
        assert!((9..=15).contains(&award.delta));
        assert_eq!(award.delta % 3, 0);
    }
}

/// Tests that a tick covering no whole minute earns nothing.
///
/// Expected: Ok(None)
#[test]
fn zero_minutes_earn_nothing() {
    let settings = enabled_settings();
    let mut rng = StdRng::seed_from_u64(3);

    let award =
        evaluate_voice_tick(&settings, &voice_tick(0), Eligibility::default(), &mut rng).unwrap();

    assert!(award.is_none());
}

/// Tests that an ignored voice state earns nothing.
///
/// Expected: Ok(None)
#[test]
fn ignored_voice_state_earns_nothing() {
    let settings = enabled_settings();
    let mut rng = StdRng::seed_from_u64(3);
    let eligibility = Eligibility {
        voice_state: true,
        ..Default::default()
    };

    let award = evaluate_voice_tick(&settings, &voice_tick(4), eligibility, &mut rng).unwrap();

    assert!(award.is_none());
}
