use super::*;

/// Tests a level-up from a single award.
///
/// Expected: Up transition from 0 to 1 at 100 XP
#[test]
fn detects_level_up() {
    let mut profile = Profile {
        xp: 95,
        ..Default::default()
    };

    let change = apply_award(&mut profile, XpAward::message(5), &Algorithm::default()).unwrap();

    assert_eq!(
        change.transition,
        Some(LevelTransition::Up {
            old_level: 0,
            new_level: 1
        })
    );
    assert_eq!(profile.xp, 100);
    assert_eq!(profile.level, 1);
    assert_eq!(profile.messages, 1);
}

/// Tests a multi-level jump from an administrative grant.
///
/// Expected: one Up transition straight from 2 to 5
#[test]
fn multi_level_jump_reports_terminal_level() {
    let algorithm = Algorithm::default();
    let mut profile = Profile {
        xp: 400,
        level: 2,
        ..Default::default()
    };

    let change = apply_award(&mut profile, XpAward::admin_add(2100), &algorithm).unwrap();

    assert_eq!(
        change.transition,
        Some(LevelTransition::Up {
            old_level: 2,
            new_level: 5
        })
    );
    assert_eq!(profile.level, 5);
    assert_eq!(profile.messages, 0);
}

/// Tests that removing XP lowers the level without a level-up.
///
/// Expected: Down transition and XP floored at zero
#[test]
fn removal_levels_down_and_floors_at_zero() {
    let mut profile = Profile {
        xp: 450,
        level: 2,
        ..Default::default()
    };

    let change =
        apply_award(&mut profile, XpAward::admin_remove(10_000), &Algorithm::default()).unwrap();

    assert_eq!(
        change.transition,
        Some(LevelTransition::Down {
            old_level: 2,
            new_level: 0
        })
    );
    assert!(!change.transition.unwrap().is_level_up());
    assert_eq!(profile.xp, 0);
}

/// Tests an award that stays within the current level.
///
/// Expected: no transition, voice minutes counted
#[test]
fn no_transition_within_level() {
    let mut profile = Profile {
        xp: 100,
        level: 1,
        ..Default::default()
    };

    let change = apply_award(&mut profile, XpAward::voice(20, 10), &Algorithm::default()).unwrap();

    assert_eq!(change.transition, None);
    assert_eq!(change.old_xp, 100);
    assert_eq!(change.new_xp, 120);
    assert_eq!(profile.voice_minutes, 10);
}

/// Tests that a misconfigured algorithm leaves the profile untouched.
///
/// Expected: Err(ZeroBase) and unchanged profile
#[test]
fn zero_base_leaves_profile_untouched() {
    let mut profile = Profile {
        xp: 10,
        ..Default::default()
    };
    let before = profile.clone();
    let algorithm = Algorithm::new(0, 2.0).unwrap();

    let result = apply_award(&mut profile, XpAward::message(5), &algorithm);

    assert_eq!(result, Err(ConfigError::ZeroBase));
    assert_eq!(profile, before);
}
