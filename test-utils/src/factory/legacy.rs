//! Legacy (schema version 0) settings documents.
//!
//! The legacy `settings.json` is an object keyed by guild id whose values use the
//! flat key names of the original cog (`base`, `exp`, `length`, `mention`,
//! `rolebonuses`, `prestige`, `prestigedata`, ...).

use serde_json::{json, Value};

/// Guild id used by the single-guild legacy factories.
pub const LEGACY_GUILD_ID: u64 = 900000000000000001;

/// Member id with a stored profile in the legacy factories.
pub const LEGACY_MEMBER_ID: u64 = 800000000000000001;

/// Creates a legacy guild configuration with every recognized key populated.
///
/// Also carries keys that have no equivalent in the current schema (`weekly`,
/// `starcooldown`, `usepics`, per-user `background`) so tests can assert they
/// are dropped.
///
/// # Returns
/// - `Value` - Legacy guild object
pub fn legacy_guild() -> Value {
    json!({
        "users": {
            LEGACY_MEMBER_ID.to_string(): {
                "xp": 2500,
                "level": 5,
                "prestige": 1,
                "messages": 120,
                "voice": 3720.5,
                "stars": 4,
                "background": "default",
                "full": true
            }
        },
        "levelroles": { "1": 111, "5": 555 },
        "ignoredchannels": [10],
        "ignoredroles": [20],
        "ignoredusers": [30],
        "prestige": 10,
        "prestigedata": {
            "2": { "role": 2002, "emoji": "<:star:4242>" },
            "1": { "role": 1001, "emoji": "\u{2b50}" }
        },
        "stackprestigeroles": true,
        "xp": [4, 8],
        "voicexp": 3,
        "rolebonuses": { "msg": { "700": [1, 2] }, "voice": {} },
        "channelbonuses": { "msg": {}, "voice": { "710": [2, 4] } },
        "streambonus": [1, 3],
        "cooldown": 45,
        "base": 120,
        "exp": 2.5,
        "length": 5,
        "starcooldown": 3600,
        "usepics": true,
        "autoremove": true,
        "muted": true,
        "solo": false,
        "deafened": true,
        "invisible": false,
        "notifylog": 555000,
        "notify": true,
        "notifydm": false,
        "mention": true,
        "weekly": { "on": false }
    })
}

/// Creates a legacy document holding a single fully populated guild.
///
/// # Returns
/// - `Value` - Legacy document keyed by `LEGACY_GUILD_ID`
pub fn legacy_document() -> Value {
    json!({ LEGACY_GUILD_ID.to_string(): legacy_guild() })
}

/// Creates a legacy document whose guild only sets a handful of keys.
///
/// Exercises the defaults every migration step fills in.
///
/// # Returns
/// - `Value` - Legacy document with a sparse guild object
pub fn sparse_legacy_document() -> Value {
    json!({
        LEGACY_GUILD_ID.to_string(): {
            "base": 50,
            "users": { LEGACY_MEMBER_ID.to_string(): { "xp": 10 } }
        }
    })
}
