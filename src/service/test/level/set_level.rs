use super::*;

/// Tests that a level override writes the matching XP threshold.
///
/// Expected: level 5 with 2500 XP and an Up transition
#[test]
fn sets_level_and_threshold_xp() {
    let algorithm = Algorithm::default();
    let mut profile = Profile {
        xp: 450,
        level: 2,
        ..Default::default()
    };

    let change = set_level(&mut profile, 5, &algorithm);

    assert_eq!(profile.level, 5);
    assert_eq!(profile.xp, 2500);
    assert_eq!(algorithm.get_level_for_xp(profile.xp).unwrap(), 5);
    assert_eq!(
        change.transition,
        Some(LevelTransition::Up {
            old_level: 2,
            new_level: 5
        })
    );
}

/// Tests lowering a level through the override.
///
/// Expected: Down transition
#[test]
fn lowering_level_reports_down() {
    let mut profile = Profile {
        xp: 2500,
        level: 5,
        ..Default::default()
    };

    let change = set_level(&mut profile, 1, &Algorithm::default());

    assert_eq!(profile.xp, 100);
    assert!(matches!(change.transition, Some(LevelTransition::Down { .. })));
}
