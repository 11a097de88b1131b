use crate::{MigrationError, MigrationTrait, Migrator, CURRENT_VERSION};
use serde_json::{json, Value};
use test_utils::factory::legacy::{self, LEGACY_GUILD_ID, LEGACY_MEMBER_ID};


/// Returns the migrated guild object for the legacy factory guild.
fn guild(document: &Value) -> &Value {
    &document["configs"][LEGACY_GUILD_ID.to_string()]
}
