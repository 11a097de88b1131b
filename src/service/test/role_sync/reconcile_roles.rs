use super::*;

/// Tests a jump to level 5 without autoremove.
///
/// Expected: all five level roles added
#[test]
fn cumulative_roles_without_autoremove() {
    let config = five_level_roles(false);
    let hierarchy = open_hierarchy(&[101, 102, 103, 104, 105]);

    let diff = reconcile_roles(&member(5, 0, &[101, 102]), &config, &hierarchy);

    assert_eq!(diff.added, BTreeSet::from([103, 104, 105]));
    assert!(diff.removed.is_empty());

    let diff = reconcile_roles(&member(5, 0, &[]), &config, &hierarchy);
    assert_eq!(diff.added, BTreeSet::from([101, 102, 103, 104, 105]));
}

/// Tests a jump to level 5 with autoremove.
///
/// Expected: only the level-5 role kept, earlier level roles removed
#[test]
fn single_role_with_autoremove() {
    let config = five_level_roles(true);
    let hierarchy = open_hierarchy(&[101, 102, 103, 104, 105]);

    let diff = reconcile_roles(&member(5, 0, &[101, 102]), &config, &hierarchy);

    assert_eq!(diff.added, BTreeSet::from([105]));
    assert_eq!(diff.removed, BTreeSet::from([101, 102]));
}

/// Tests that the most recent threshold below the level wins with autoremove.
///
/// Expected: level 4 with roles at 1 and 3 keeps only the level-3 role
#[test]
fn autoremove_uses_highest_threshold_at_or_below_level() {
    let config = RoleConfig {
        level_roles: [(1, 101), (3, 103), (10, 110)].into_iter().collect(),
        autoremove: true,
        ..Default::default()
    };
    let hierarchy = open_hierarchy(&[101, 103, 110]);

    let diff = reconcile_roles(&member(4, 0, &[101, 110]), &config, &hierarchy);

    assert_eq!(diff.added, BTreeSet::from([103]));
    assert_eq!(diff.removed, BTreeSet::from([101, 110]));
}

/// Tests stacked prestige roles.
///
/// Expected: prestige 1, 2 and 3 roles all held at prestige 3
#[test]
fn stacked_prestige_roles() {
    let config = three_prestige_tiers(true);
    let hierarchy = open_hierarchy(&[901, 902, 903]);

    let diff = reconcile_roles(&member(0, 3, &[901]), &config, &hierarchy);

    assert_eq!(diff.added, BTreeSet::from([902, 903]));
    assert!(diff.removed.is_empty());
}

/// Tests non-stacked prestige roles.
///
/// Expected: only the prestige-3 role, prestige 1 and 2 roles removed
#[test]
fn single_prestige_role_without_stacking() {
    let config = three_prestige_tiers(false);
    let hierarchy = open_hierarchy(&[901, 902, 903]);

    let diff = reconcile_roles(&member(0, 3, &[901, 902]), &config, &hierarchy);

    assert_eq!(diff.added, BTreeSet::from([903]));
    assert_eq!(diff.removed, BTreeSet::from([901, 902]));
}

/// Tests that roles above the bot are skipped rather than failing.
///
/// Expected: manageable role added, the other skipped
#[test]
fn roles_above_ceiling_are_skipped() {
    let config = five_level_roles(false);
    let positions = HashMap::from([(101, 1), (102, 20)]);
    let hierarchy = RoleHierarchy::new(positions, Some(10));

    let diff = reconcile_roles(&member(2, 0, &[]), &config, &hierarchy);

    assert_eq!(diff.added, BTreeSet::from([101]));
    assert_eq!(diff.skipped, BTreeSet::from([102]));
}

/// Tests that roles unrelated to leveling are never removed.
///
/// Expected: empty diff for a member holding only unmanaged roles
#[test]
fn unmanaged_roles_are_kept() {
    let config = five_level_roles(true);
    let hierarchy = open_hierarchy(&[101]);

    let diff = reconcile_roles(&member(0, 0, &[5000, 6000]), &config, &hierarchy);

    assert!(diff.is_empty());
}

/// Tests that level roles above the member's level are removed.
///
/// Expected: level-5 role removed after dropping to level 2
#[test]
fn removes_roles_above_level() {
    let config = five_level_roles(false);
    let hierarchy = open_hierarchy(&[101, 102, 103, 104, 105]);

    let diff = reconcile_roles(&member(2, 0, &[101, 102, 105]), &config, &hierarchy);

    assert!(diff.added.is_empty());
    assert_eq!(diff.removed, BTreeSet::from([105]));
}
