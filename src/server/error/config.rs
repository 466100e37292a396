use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing or empty.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    /// Environment variable is present but could not be parsed.
    #[error("Invalid value for {name}: {reason}")]
    InvalidEnvVar {
        /// Name of the offending variable.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}
