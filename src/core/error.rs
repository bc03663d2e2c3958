use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Host command failed: {0}")]
    HostCommand(String),

    #[error("Definition not registered on host: {0}")]
    MissingDefinition(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Config encode error: {0}")]
    TomlEncodeError(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
