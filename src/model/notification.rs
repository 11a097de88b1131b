//! Rendered level-up notices.

/// Where a level-up notice is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTarget {
    /// Direct message to the member.
    DirectMessage(u64),
    /// A guild text channel.
    Channel(u64),
}

/// A level-up notice ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelUpNotice {
    pub guild_id: u64,
    pub member_id: u64,
    pub target: NoticeTarget,
    pub content: String,
}

/// Member and guild names substituted into notice templates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoticeContext {
    pub member_id: u64,
    pub username: String,
    pub display_name: String,
    pub server: String,
    /// Channel the triggering activity happened in.
    pub origin_channel: Option<u64>,
}
