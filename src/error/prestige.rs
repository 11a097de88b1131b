use thiserror::Error;

/// Reasons a prestige promotion or override is refused.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrestigeError {
    /// The guild has no prestige tiers configured.
    #[error("Prestige levels have not been set")]
    NotConfigured,

    /// The member has not reached the next tier's activation level.
    #[error("Level {required} is required to prestige, member is level {current}")]
    LevelTooLow { required: u64, current: u64 },

    /// The member already holds the highest configured prestige.
    #[error("Member has already reached the highest prestige ({0})")]
    AlreadyMaxed(u64),

    /// An override targeted a prestige with no configured tier.
    #[error("Prestige level {0} does not exist")]
    UnknownTier(u64),
}
