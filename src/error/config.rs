use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Required environment variable is not set.
    ///
    /// The application requires this environment variable to be defined. Check the
    /// `.env.example` file for required configuration variables.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is set but could not be parsed.
    #[error("Invalid value for environment variable {name}: {reason}")]
    InvalidEnvVar { name: String, reason: String },

    /// Algorithm exponent outside of `(0, 10]`.
    #[error("Algorithm exponent must be greater than 0 and at most 10, got {0}")]
    InvalidExponent(f64),

    /// Algorithm base is zero while converting XP to a level.
    #[error("Algorithm base must be greater than 0 to compute levels")]
    ZeroBase,

    /// XP range with a lower bound above its upper bound.
    #[error("XP range minimum {min} is greater than maximum {max}")]
    InvalidXpRange { min: u64, max: u64 },

    /// Notification template references a placeholder that is not available.
    #[error("Invalid placeholder used: {{{0}}}")]
    InvalidTemplate(String),
}
