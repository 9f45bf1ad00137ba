use thiserror::Error;

/// Storage key holding the raw session token
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the JSON-encoded signed-in user
pub const USER_KEY: &str = "user";

/// Errors raised by a session storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Session storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session storage is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// String key/value store that outlives the process
///
/// Plays the part of browser local storage. Only the auth store writes to
/// it; views never touch it directly.
pub trait SessionStorage: Send + Sync {
    /// Reads a key
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a key, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a key; absent keys are not an error
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}
