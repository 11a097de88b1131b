//! v1 -> v2: replace `prestigelevel` + `prestigedata` with ordered `prestige_tiers`.
//!
//! Every tier of a legacy guild shared one activation level. Tiers are ordered by
//! their numeric key; an activation level of zero meant prestige was disabled.

use serde_json::{json, Value};

use crate::{configs_mut, guild_object, MigrationError, MigrationTrait, VERSION_KEY};

pub struct Migration;

impl MigrationTrait for Migration {
    fn name(&self) -> &'static str {
        "m0002_prestige_tiers"
    }

    fn from_version(&self) -> u64 {
        1
    }

    fn up(&self, mut document: Value) -> Result<Value, MigrationError> {
        for (guild_id, guild) in configs_mut(&mut document)?.iter_mut() {
            let guild = guild_object(guild_id, guild)?;

            let activation_level = guild
                .remove("prestigelevel")
                .and_then(|v| v.as_u64())
                .unwrap_or(0);
            let data = guild.remove("prestigedata").unwrap_or(json!({}));

            let mut tiers = Vec::new();
            if activation_level > 0 {
                let Value::Object(data) = data else {
                    return Err(MigrationError::invalid(
                        format!("configs.{}.prestigedata", guild_id),
                        "expected an object keyed by prestige number",
                    ));
                };

                let mut numbered = Vec::with_capacity(data.len());
                for (number, tier) in data {
                    let number = number.parse::<u64>().map_err(|_| {
                        MigrationError::invalid(
                            format!("configs.{}.prestigedata.{}", guild_id, number),
                            "prestige number must be an integer",
                        )
                    })?;
                    let role = tier.get("role").and_then(Value::as_u64).ok_or_else(|| {
                        MigrationError::invalid(
                            format!("configs.{}.prestigedata.{}", guild_id, number),
                            "tier must reference a role id",
                        )
                    })?;
                    let emoji = tier.get("emoji").cloned().unwrap_or(Value::Null);
                    numbered.push((number, role, emoji));
                }
                numbered.sort_by_key(|(number, _, _)| *number);

                tiers = numbered
                    .into_iter()
                    .map(|(_, role, emoji)| {
                        json!({
                            "activation_level": activation_level,
                            "role": role,
                            "emoji": emoji,
                        })
                    })
                    .collect();
            }

            guild.insert("prestige_tiers".to_string(), Value::Array(tiers));
        }

        document[VERSION_KEY] = json!(2);
        Ok(document)
    }
}
