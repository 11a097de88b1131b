use serde::{Deserialize, Serialize};

/// Progression state of one member in one guild.
///
/// `level` always equals the algorithm's level for `xp`, except directly after
/// an administrative override, which writes both fields together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    pub xp: u64,
    pub level: u64,
    pub prestige: u64,
    /// Accepted messages. Not used for progression.
    pub messages: u64,
    /// Credited voice minutes. Not used for progression.
    pub voice_minutes: u64,
}
