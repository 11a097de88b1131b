use super::*;

/// Tests migrating the legacy document into the current model.
///
/// Expected: Ok with guild settings and profile carried over
#[test]
fn migrates_legacy_document() {
    let db = migrate(legacy::legacy_document()).unwrap();

    let settings = &db.configs[&legacy::LEGACY_GUILD_ID];
    assert_eq!(db.schema_version, migration::CURRENT_VERSION);
    assert!(settings.enabled);
    assert_eq!(settings.algorithm.base, 120);
    assert_eq!(settings.algorithm.exponent, 2.5);
    assert_eq!(settings.xp, XpRange { min: 4, max: 8 });
    assert_eq!(settings.min_length, 5);
    assert_eq!(settings.cooldown, 45);
    assert_eq!(settings.notify_channel, Some(555000));
    assert_eq!(settings.prestige_tiers.len(), 2);
    assert_eq!(settings.prestige_tiers[0].role, 1001);
    assert_eq!(settings.role_bonus.msg[&700], XpRange { min: 1, max: 2 });
    assert_eq!(settings.channel_bonus.voice[&710], XpRange { min: 2, max: 4 });
    assert_eq!(settings.stream_bonus, Some(XpRange { min: 1, max: 3 }));

    let profile = &settings.users[&legacy::LEGACY_MEMBER_ID];
    assert_eq!(profile.xp, 2500);
    assert_eq!(profile.level, 5);
    assert_eq!(profile.prestige, 1);
    assert_eq!(profile.voice_minutes, 62);
}

/// Tests that migration is idempotent.
///
/// Expected: migrating the migrated document yields the same document
#[test]
fn migrating_twice_is_a_no_op() {
    for document in [legacy::legacy_document(), legacy::sparse_legacy_document()] {
        let once = migrate(document).unwrap();
        let twice = migrate(serde_json::to_value(&once).unwrap()).unwrap();

        assert_eq!(twice, once);
    }
}

/// Tests that missing legacy keys receive defaults.
///
/// Expected: defaults for every key the sparse document lacks
#[test]
fn sparse_document_uses_defaults() {
    let db = migrate(legacy::sparse_legacy_document()).unwrap();

    let settings = db.configs.values().next().unwrap();
    assert_eq!(settings.algorithm.base, 50);
    assert_eq!(settings.xp, XpRange::DEFAULT_MESSAGE);
    assert_eq!(settings.cooldown, 60);
    assert!(settings.prestige_tiers.is_empty());
    assert_eq!(settings.stream_bonus, None);
}

/// Tests that a migrated document violating a model invariant is rejected.
///
/// Expected: Err(Unreadable) for an inverted XP range
#[test]
fn rejects_invalid_ranges() {
    let document = json!({ "1": { "xp": [9, 2] } });

    let result = migrate(document);

    assert!(matches!(result, Err(MigrationError::Unreadable(_))));
}

/// Tests that documents from a newer release are rejected.
///
/// Expected: Err(UnsupportedVersion)
#[test]
fn rejects_future_version() {
    let document = json!({ "schema_version": migration::CURRENT_VERSION + 1, "configs": {} });

    assert!(matches!(
        migrate(document),
        Err(MigrationError::UnsupportedVersion { .. })
    ));
}
