use super::*;

fn populated_db() -> Db {
    let mut settings = GuildSettings {
        enabled: true,
        algorithm: Algorithm::new(120, 2.5).unwrap(),
        xp: XpRange::new(4, 8).unwrap(),
        stream_bonus: Some(XpRange::new(1, 3).unwrap()),
        notify_channel: Some(555),
        levelup_msg: Some("{mention} reached {level}".to_string()),
        prestige_tiers: vec![PrestigeTier {
            activation_level: 10,
            role: 1001,
            emoji: Some(Emoji::Custom(4242)),
        }],
        ..Default::default()
    };
    settings.level_roles.insert(5, 555);
    settings.ignored_channels.insert(10);
    settings.role_bonus.msg.insert(700, XpRange::new(1, 2).unwrap());
    settings.channel_bonus.voice.insert(710, XpRange::new(2, 4).unwrap());
    *settings.profile_mut(42) = Profile {
        xp: 2500,
        level: 5,
        prestige: 1,
        messages: 120,
        voice_minutes: 62,
    };

    let mut db = Db::default();
    db.global.cache_seconds = 30;
    db.configs.insert(900, settings);
    db
}

/// Tests that the document survives a JSON round trip unchanged.
///
/// Expected: deserialized document equals the original
#[test]
fn round_trips_through_json() {
    let db = populated_db();

    let text = serde_json::to_string(&db).unwrap();
    let restored: Db = serde_json::from_str(&text).unwrap();

    assert_eq!(restored, db);
}

/// Tests that missing guild fields fall back to defaults.
///
/// Expected: defaults for everything except the given key
#[test]
fn missing_fields_use_defaults() {
    let settings: GuildSettings = serde_json::from_value(serde_json::json!({ "cooldown": 5 })).unwrap();

    assert_eq!(settings.cooldown, 5);
    assert!(!settings.enabled);
    assert_eq!(settings.xp, XpRange::DEFAULT_MESSAGE);
    assert_eq!(settings.voice_xp, 2);
}

/// Tests lazy profile creation.
///
/// Expected: a zeroed profile inserted on first access
#[test]
fn profile_created_on_first_reference() {
    let mut settings = GuildSettings::default();
    assert!(settings.profile(7).is_none());

    settings.profile_mut(7).xp = 10;

    assert_eq!(settings.profile(7).unwrap().xp, 10);
}

/// Tests extracting role configuration from settings.
///
/// Expected: tier roles in tier order with flags copied
#[test]
fn role_config_copies_role_settings() {
    let mut settings = populated_db().configs.remove(&900).unwrap();
    settings.autoremove = true;

    let config = settings.role_config();

    assert_eq!(config.prestige_tiers, vec![1001]);
    assert_eq!(config.level_roles.get(&5), Some(&555));
    assert!(config.autoremove);
}
