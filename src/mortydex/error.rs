use thiserror::Error;

#[derive(Error, Debug)]
pub enum DexError {
    #[error("Catalog fetch failed: {0}")]
    Fetch(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Character not found: {0}")]
    CharacterNotFound(u32),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Stored value could not be parsed: {0}")]
    StorageParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl DexError {
    /// True for failures talking to the remote catalog, where re-running the
    /// same command may succeed.
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, DexError::Fetch(_) | DexError::Http(_))
    }
}

pub type Result<T> = std::result::Result<T, DexError>;
