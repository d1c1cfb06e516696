use std::path::PathBuf;

use crate::infra::sqlite::queries::{kv_clear, kv_get, kv_remove, kv_set};
use crate::infra::sqlite::schema::init_db;
use crate::usecase::ports::session_store::{SessionStore, StoreError};

pub struct SqliteSessionStore {
    pub db_path: PathBuf,
}

impl SqliteSessionStore {
    pub fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }
}

impl SessionStore for SqliteSessionStore {
    fn init(&self) -> Result<(), StoreError> {
        init_db(&self.db_path).map_err(|err| StoreError::Message(err.to_string()))
    }

    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        kv_get(&self.db_path, key).map_err(|err| StoreError::Message(err.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        kv_set(&self.db_path, key, value).map_err(|err| StoreError::Message(err.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        kv_remove(&self.db_path, key).map_err(|err| StoreError::Message(err.to_string()))
    }

    fn clear(&self) -> Result<(), StoreError> {
        kv_clear(&self.db_path).map_err(|err| StoreError::Message(err.to_string()))
    }
}
