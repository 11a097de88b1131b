//! v0 -> v1: wrap the legacy guild map into a versioned document.
//!
//! Legacy guild objects are rebuilt key by key under their current names. Only
//! recognized keys are read, so anything else the legacy file carried is dropped.

use serde_json::{json, Map, Value};

use crate::{MigrationError, MigrationTrait, VERSION_KEY};

pub struct Migration;

/// Legacy key -> current key, with the default used when the legacy key is absent.
fn renamed_fields() -> Vec<(&'static str, &'static str, Value)> {
    vec![
        ("enabled", "enabled", json!(true)),
        ("xp", "xp", json!([3, 6])),
        ("voicexp", "voice_xp", json!(2)),
        ("cooldown", "cooldown", json!(60)),
        ("length", "min_length", json!(0)),
        ("command_xp", "command_xp", json!(false)),
        ("ignoredchannels", "ignored_channels", json!([])),
        ("ignoredroles", "ignored_roles", json!([])),
        ("ignoredusers", "ignored_users", json!([])),
        ("muted", "ignore_muted", json!(false)),
        ("solo", "ignore_solo", json!(false)),
        ("deafened", "ignore_deafened", json!(false)),
        ("invisible", "ignore_invisible", json!(false)),
        ("rolebonuses", "role_bonus", json!({ "msg": {}, "voice": {} })),
        ("channelbonuses", "channel_bonus", json!({ "msg": {}, "voice": {} })),
        ("streambonus", "stream_bonus", Value::Null),
        ("levelroles", "level_roles", json!({})),
        ("prestige", "prestigelevel", json!(0)),
        ("prestigedata", "prestigedata", json!({})),
        ("stackprestigeroles", "stack_prestige_roles", json!(false)),
        ("autoremove", "autoremove", json!(false)),
        ("notify", "notify", json!(false)),
        ("notifydm", "notify_dm", json!(false)),
        ("mention", "notify_mention", json!(false)),
        ("notifylog", "notify_channel", Value::Null),
        ("levelup_msg", "levelup_msg", Value::Null),
        ("levelup_dm", "levelup_dm", Value::Null),
        ("role_awarded_msg", "role_awarded_msg", Value::Null),
        ("role_awarded_dm", "role_awarded_dm", Value::Null),
    ]
}

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m0001_flatten_legacy_guilds"
    }

    fn from_version(&self) -> u64 {
        0
    }

    fn up(&self, document: Value) -> Result<Value, MigrationError> {
        let Value::Object(legacy) = document else {
            return Err(MigrationError::invalid("$", "legacy document must be an object"));
        };

        let mut configs = Map::new();
        for (guild_id, guild) in legacy {
            if guild_id.parse::<u64>().is_err() {
                return Err(MigrationError::invalid(guild_id, "guild key must be a numeric id"));
            }
            let Value::Object(guild) = guild else {
                return Err(MigrationError::invalid(guild_id, "guild settings must be an object"));
            };

            configs.insert(guild_id.clone(), migrate_guild(&guild_id, guild)?);
        }

        Ok(json!({ VERSION_KEY: 1, "configs": configs }))
    }
}

fn migrate_guild(guild_id: &str, mut legacy: Map<String, Value>) -> Result<Value, MigrationError> {
    let mut guild = Map::new();

    let base = legacy.remove("base").unwrap_or(json!(100));
    let exponent = legacy.remove("exp").unwrap_or(json!(2.0));
    guild.insert("algorithm".to_string(), json!({ "base": base, "exponent": exponent }));

    for (old_key, new_key, default) in renamed_fields() {
        let value = match legacy.remove(old_key) {
            Some(Value::Null) | None => default,
            Some(value) => value,
        };
        guild.insert(new_key.to_string(), value);
    }

    // An empty list was how the legacy cog stored "no stream bonus"
    if guild
        .get("stream_bonus")
        .and_then(Value::as_array)
        .is_some_and(|range| range.is_empty())
    {
        guild.insert("stream_bonus".to_string(), Value::Null);
    }

    if let Some(emojis) = legacy.remove("emojis") {
        guild.insert("emojis".to_string(), emojis);
    }

    let users = match legacy.remove("users") {
        Some(Value::Object(users)) => users,
        None | Some(Value::Null) => Map::new(),
        Some(_) => {
            return Err(MigrationError::invalid(
                format!("{}.users", guild_id),
                "users must be an object keyed by member id",
            ))
        }
    };

    let mut profiles = Map::new();
    for (member_id, user) in users {
        let Value::Object(user) = user else {
            return Err(MigrationError::invalid(
                format!("{}.users.{}", guild_id, member_id),
                "profile must be an object",
            ));
        };
        profiles.insert(member_id, migrate_profile(&user));
    }
    guild.insert("users".to_string(), Value::Object(profiles));

    Ok(Value::Object(guild))
}

fn migrate_profile(user: &Map<String, Value>) -> Value {
    let counter = |key: &str| user.get(key).and_then(Value::as_u64).unwrap_or(0);
    let voice_seconds = user.get("voice").and_then(Value::as_f64).unwrap_or(0.0);

    json!({
        "xp": counter("xp"),
        "level": counter("level"),
        "prestige": counter("prestige"),
        "messages": counter("messages"),
        "voice_minutes": (voice_seconds.max(0.0) / 60.0).floor() as u64,
    })
}
