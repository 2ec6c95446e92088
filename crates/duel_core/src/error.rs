use thiserror::Error;

#[derive(Error, Debug)]
pub enum DuelError {
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unsupported schema version: found {found}, expected {expected}")]
    UnsupportedSchema { found: u8, expected: u8 },

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl DuelError {
    pub(crate) fn invalid_config(msg: impl Into<String>) -> Self {
        DuelError::InvalidConfig(msg.into())
    }

    pub(crate) fn unknown(kind: &'static str, value: &str) -> Self {
        DuelError::UnknownVariant { kind, value: value.to_string() }
    }

    /// Errors the caller can fix by editing its input and retrying.
    pub fn is_input_error(&self) -> bool {
        match self {
            DuelError::InvalidConfig(_) => true,
            DuelError::UnsupportedSchema { .. } => true,
            DuelError::UnknownVariant { .. } => true,
            DuelError::Json(err) => err.is_data() || err.is_syntax(),
            DuelError::Io(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, DuelError>;
