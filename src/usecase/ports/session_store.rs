#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Message(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Message(message) => write!(f, "{message}"),
        }
    }
}

impl std::error::Error for StoreError {}

/// Key/value persistence for session data, values are JSON text.
pub trait SessionStore: Send + Sync {
    fn init(&self) -> Result<(), StoreError>;

    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}
