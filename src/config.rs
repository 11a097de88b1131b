use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_COMMAND_PREFIX: &str = "!";

/// File name of the current settings document inside the data directory.
pub const SETTINGS_FILE: &str = "LevelUp.json";

/// File name of the legacy settings document inside the data directory.
pub const LEGACY_SETTINGS_FILE: &str = "settings.json";

pub struct Config {
    pub discord_bot_token: String,

    /// Directory holding the settings documents.
    pub data_dir: PathBuf,

    /// Prefixes marking a message as a bot command.
    pub command_prefixes: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from a variable lookup.
    ///
    /// # Arguments
    /// - `lookup` - Returns the value of a variable, `None` when unset
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(AppError::ConfigErr)` - Missing token or empty prefix list
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let discord_bot_token = lookup("DISCORD_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DISCORD_BOT_TOKEN".to_string()))?;

        let data_dir = lookup("LEVELUP_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
            .into();

        let command_prefixes = match lookup("LEVELUP_COMMAND_PREFIXES") {
            Some(raw) => {
                let prefixes: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|prefix| !prefix.is_empty())
                    .map(str::to_string)
                    .collect();
                if prefixes.is_empty() {
                    return Err(ConfigError::InvalidEnvVar {
                        name: "LEVELUP_COMMAND_PREFIXES".to_string(),
                        reason: "at least one prefix is required".to_string(),
                    }
                    .into());
                }
                prefixes
            }
            None => vec![DEFAULT_COMMAND_PREFIX.to_string()],
        };

        Ok(Self {
            discord_bot_token,
            data_dir,
            command_prefixes,
        })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILE)
    }

    pub fn legacy_settings_path(&self) -> PathBuf {
        self.data_dir.join(LEGACY_SETTINGS_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    /// Tests defaults when only the token is set.
    ///
    /// Expected: data dir "data" and prefix "!"
    #[test]
    fn uses_defaults() {
        let config = Config::from_lookup(lookup(&[("DISCORD_BOT_TOKEN", "abc")])).unwrap();

        assert_eq!(config.discord_bot_token, "abc");
        assert_eq!(config.settings_path(), PathBuf::from("data").join("LevelUp.json"));
        assert_eq!(config.legacy_settings_path(), PathBuf::from("data").join("settings.json"));
        assert_eq!(config.command_prefixes, vec!["!".to_string()]);
    }

    /// Tests that the token is required.
    ///
    /// Expected: Err(MissingEnvVar)
    #[test]
    fn requires_token() {
        let result = Config::from_lookup(lookup(&[]));

        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::MissingEnvVar(name))) if name == "DISCORD_BOT_TOKEN"
        ));
    }

    /// Tests parsing the prefix list.
    ///
    /// Expected: trimmed prefixes, Err(InvalidEnvVar) when none remain
    #[test]
    fn parses_command_prefixes() {
        let config = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "abc"),
            ("LEVELUP_COMMAND_PREFIXES", " !, ?, "),
            ("LEVELUP_DATA_DIR", "/srv/levelup"),
        ]))
        .unwrap();
        assert_eq!(config.command_prefixes, vec!["!".to_string(), "?".to_string()]);
        assert_eq!(config.data_dir, PathBuf::from("/srv/levelup"));

        let result = Config::from_lookup(lookup(&[
            ("DISCORD_BOT_TOKEN", "abc"),
            ("LEVELUP_COMMAND_PREFIXES", " , "),
        ]));
        assert!(matches!(
            result,
            Err(AppError::ConfigErr(ConfigError::InvalidEnvVar { .. }))
        ));
    }
}
