use thiserror::Error;

/// A call against the Discord collaborator was rejected.
///
/// Failures are collected per member into reconciliation and activity reports;
/// one member's failure never aborts work for other members.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExternalFailure {
    /// Batched role membership edit for a member was rejected.
    #[error("Failed to update roles for member {member_id}: {reason}")]
    RoleMutation { member_id: u64, reason: String },

    /// Level-up notification could not be delivered.
    #[error("Failed to notify member {member_id}: {reason}")]
    Notification { member_id: u64, reason: String },
}

impl ExternalFailure {
    /// Member the failed call was made for.
    pub fn member_id(&self) -> u64 {
        match self {
            Self::RoleMutation { member_id, .. } | Self::Notification { member_id, .. } => {
                *member_id
            }
        }
    }
}
