//! Emoji configuration values.

use serde::{Deserialize, Serialize};

/// An emoji as stored in guild settings.
///
/// Serialized externally tagged: `{"custom": 1234}` or `{"unicode": "⭐"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emoji {
    /// Guild custom emoji referenced by id.
    Custom(u64),
    /// Literal unicode emoji (or any literal text).
    Unicode(String),
}

impl Emoji {
    /// Parses user input into an emoji.
    ///
    /// Accepts custom emoji markup (`<:name:id>`, `<a:name:id>`) and bare numeric
    /// ids as custom emojis; anything else is kept as literal text.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        let custom_id = input
            .strip_prefix('<')
            .and_then(|rest| rest.strip_suffix('>'))
            .and_then(|inner| inner.rsplit(':').next())
            .and_then(|id| id.parse::<u64>().ok())
            .or_else(|| input.parse::<u64>().ok());

        match custom_id {
            Some(id) => Emoji::Custom(id),
            None => Emoji::Unicode(input.to_string()),
        }
    }

    fn unicode(text: &str) -> Self {
        Emoji::Unicode(text.to_string())
    }
}

impl std::fmt::Display for Emoji {
    /// Formats the emoji the way Discord renders it inside message content.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Emoji::Custom(id) => write!(f, "<:_:{}>", id),
            Emoji::Unicode(text) => f.write_str(text),
        }
    }
}

/// Emojis used to label each stat in level-up messages and profiles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Emojis {
    pub level: Emoji,
    pub trophy: Emoji,
    pub star: Emoji,
    pub chat: Emoji,
    pub mic: Emoji,
    pub bulb: Emoji,
    pub money: Emoji,
}

impl Default for Emojis {
    fn default() -> Self {
        Self {
            level: Emoji::unicode("\u{1f3c5}"),
            trophy: Emoji::unicode("\u{1f3c6}"),
            star: Emoji::unicode("\u{2b50}"),
            chat: Emoji::unicode("\u{1f4ac}"),
            mic: Emoji::unicode("\u{1f399}\u{fe0f}"),
            bulb: Emoji::unicode("\u{1f4a1}"),
            money: Emoji::unicode("\u{1f4b0}"),
        }
    }
}
