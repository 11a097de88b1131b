use super::*;

fn roster() -> Vec<MemberRoleState> {
    (1..=4)
        .map(|member_id| MemberRoleState {
            member_id,
            level: member_id,
            prestige: 0,
            current_roles: BTreeSet::new(),
        })
        .collect()
}

/// Tests that one member's failure does not stop the pass.
///
/// Expected: every member attempted, one failure reported, others changed
#[tokio::test]
async fn failure_does_not_abort_roster() {
    let mutator = RecordingMutator::failing(&[2]);
    let service = RoleSyncService::new(&mutator);
    let hierarchy = open_hierarchy(&[101, 102, 103, 104, 105]);

    let report = service
        .reconcile_roster(GUILD_ID, &roster(), &five_level_roles(true), &hierarchy)
        .await;

    assert_eq!(report.processed, 4);
    assert_eq!(mutator.calls().len(), 4);
    assert_eq!(report.changed, 3);
    assert_eq!(report.roles_added, 3);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].member_id(), 2);
}

/// Tests the aggregate counts of a roster pass.
///
/// Expected: cumulative roles added per member and skips counted
#[tokio::test]
async fn counts_added_and_skipped_roles() {
    let mutator = RecordingMutator::default();
    let service = RoleSyncService::new(&mutator);
    let positions = HashMap::from([(101, 1), (102, 1), (103, 1), (104, 50)]);
    let hierarchy = RoleHierarchy::new(positions, Some(10));

    let report = service
        .reconcile_roster(GUILD_ID, &roster(), &five_level_roles(false), &hierarchy)
        .await;

    assert_eq!(report.processed, 4);
    assert_eq!(report.roles_added, 1 + 2 + 3 + 3);
    assert_eq!(report.roles_skipped, 1);
    assert!(report.failures.is_empty());
}
