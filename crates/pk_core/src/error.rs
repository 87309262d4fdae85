use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown config profile: {0}")]
    UnknownProfile(String),

    #[error("Keeper dive armed with invalid start/end position")]
    InvalidDiveEndpoints,

    #[error("Invalid lineup: expected {expected} takers, found {found}")]
    InvalidLineup { expected: usize, found: usize },

    #[error("Schema version mismatch: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Match did not finish within {0} ticks")]
    Unfinished(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Whether the tick loop can absorb this error and keep the match going.
    pub fn is_recoverable(&self) -> bool {
        match self {
            CoreError::InvalidDiveEndpoints => true,
            CoreError::InvalidLineup { .. } => true,
            CoreError::InvalidConfig(_) => false,
            CoreError::UnknownProfile(_) => false,
            CoreError::SchemaVersion { .. } => false,
            CoreError::Unfinished(_) => false,
            CoreError::Serialization(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;
