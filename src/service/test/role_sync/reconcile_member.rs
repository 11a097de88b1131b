use super::*;

/// Tests that a member's changes go out as one batched call.
///
/// Expected: a single mutator call carrying every addition and removal
#[tokio::test]
async fn applies_one_batched_mutation() {
    let mutator = RecordingMutator::default();
    let service = RoleSyncService::new(&mutator);
    let config = five_level_roles(true);
    let hierarchy = open_hierarchy(&[101, 102, 103, 104, 105]);

    let diff = service
        .reconcile_member(GUILD_ID, &member(5, 0, &[101, 102]), &config, &hierarchy)
        .await
        .unwrap();

    let calls = mutator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], (GUILD_ID, diff));
}

/// Tests that a member already in sync triggers no call.
///
/// Expected: empty diff, no mutator call
#[tokio::test]
async fn skips_call_for_empty_diff() {
    let mutator = RecordingMutator::default();
    let service = RoleSyncService::new(&mutator);
    let hierarchy = open_hierarchy(&[105]);

    let diff = service
        .reconcile_member(GUILD_ID, &member(5, 0, &[105]), &five_level_roles(true), &hierarchy)
        .await
        .unwrap();

    assert!(diff.is_empty());
    assert!(mutator.calls().is_empty());
}

/// Tests that a rejected mutation is returned as an external failure.
///
/// Expected: Err(RoleMutation) for the member
#[tokio::test]
async fn returns_rejected_mutation() {
    let mutator = RecordingMutator::failing(&[MEMBER_ID]);
    let service = RoleSyncService::new(&mutator);
    let hierarchy = open_hierarchy(&[101]);

    let result = service
        .reconcile_member(GUILD_ID, &member(1, 0, &[]), &five_level_roles(false), &hierarchy)
        .await;

    assert!(matches!(
        result,
        Err(ExternalFailure::RoleMutation { member_id, .. }) if member_id == MEMBER_ID
    ));
}
