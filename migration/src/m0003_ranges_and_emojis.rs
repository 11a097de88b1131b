//! v2 -> v3: structured XP ranges, tagged emojis and the global section.
//!
//! `[min, max]` pairs become `{min, max}` objects. Bonus entries whose range is
//! `[0, 0]` are removed since absence now means "no bonus", and a zero stream
//! bonus becomes `null`. Emoji values become `{"custom": id}` or
//! `{"unicode": text}`.

use serde_json::{json, Map, Value};

use crate::{configs_mut, guild_object, tag_emoji, MigrationError, MigrationTrait, VERSION_KEY};

pub struct Migration;

/// Global section added to documents that predate it.
fn default_global() -> Value {
    json!({ "cache_seconds": 0, "render_gifs": false })
}

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m0003_ranges_and_emojis"
    }

    fn from_version(&self) -> u64 {
        2
    }

    fn up(&self, mut document: Value) -> Result<Value, MigrationError> {
        for (guild_id, guild) in configs_mut(&mut document)?.iter_mut() {
            let guild = guild_object(guild_id, guild)?;
            let path = format!("configs.{}", guild_id);

            if let Some(xp) = guild.get_mut("xp") {
                *xp = to_range(&format!("{}.xp", path), xp)?.unwrap_or(json!({ "min": 0, "max": 0 }));
            }

            if let Some(stream) = guild.get_mut("stream_bonus") {
                let converted = match &*stream {
                    Value::Null => Value::Null,
                    other => to_range(&format!("{}.stream_bonus", path), other)?
                        .filter(|range| !is_zero_range(range))
                        .unwrap_or(Value::Null),
                };
                *stream = converted;
            }

            for bonus_key in ["role_bonus", "channel_bonus"] {
                let Some(Value::Object(bonus)) = guild.get_mut(bonus_key) else {
                    continue;
                };
                for kind in ["msg", "voice"] {
                    if let Some(Value::Object(entries)) = bonus.get_mut(kind) {
                        let converted = convert_bonus_entries(
                            &format!("{}.{}.{}", path, bonus_key, kind),
                            entries,
                        )?;
                        *entries = converted;
                    }
                }
            }

            if let Some(Value::Object(emojis)) = guild.get_mut("emojis") {
                let keys: Vec<String> = emojis.keys().cloned().collect();
                for key in keys {
                    match emojis.get(&key).and_then(tag_emoji) {
                        Some(tagged) => {
                            emojis.insert(key, tagged);
                        }
                        None => {
                            emojis.remove(&key);
                        }
                    }
                }
            }

            if let Some(Value::Array(tiers)) = guild.get_mut("prestige_tiers") {
                for tier in tiers.iter_mut() {
                    if let Some(emoji) = tier.get("emoji") {
                        let tagged = tag_emoji(emoji).unwrap_or(Value::Null);
                        tier["emoji"] = tagged;
                    }
                }
            }
        }

        let root = document
            .as_object_mut()
            .ok_or_else(|| MigrationError::invalid("$", "document root must be an object"))?;
        root.entry("global").or_insert_with(default_global);
        root.insert(VERSION_KEY.to_string(), json!(3));

        Ok(document)
    }
}

fn convert_bonus_entries(
    path: &str,
    entries: &Map<String, Value>,
) -> Result<Map<String, Value>, MigrationError> {
    let mut converted = Map::new();
    for (key, value) in entries {
        if let Some(range) = to_range(&format!("{}.{}", path, key), value)? {
            if !is_zero_range(&range) {
                converted.insert(key.clone(), range);
            }
        }
    }
    Ok(converted)
}

/// Converts a `[min, max]` pair to `{min, max}`.
///
/// Objects already in the new shape pass through; an empty array yields `None`.
fn to_range(path: &str, value: &Value) -> Result<Option<Value>, MigrationError> {
    match value {
        Value::Array(pair) if pair.is_empty() => Ok(None),
        Value::Array(pair) => match (
            pair.first().and_then(Value::as_u64),
            pair.get(1).and_then(Value::as_u64),
        ) {
            (Some(min), Some(max)) if pair.len() == 2 => Ok(Some(json!({ "min": min, "max": max }))),
            _ => Err(MigrationError::invalid(
                path,
                "XP range must be a pair of non-negative integers",
            )),
        },
        Value::Object(map) if map.contains_key("min") && map.contains_key("max") => {
            Ok(Some(value.clone()))
        }
        _ => Err(MigrationError::invalid(path, "expected an XP range")),
    }
}

fn is_zero_range(range: &Value) -> bool {
    range.get("min").and_then(Value::as_u64) == Some(0)
        && range.get("max").and_then(Value::as_u64) == Some(0)
}
