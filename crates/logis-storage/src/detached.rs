//! Store for contexts without persistent storage
//!
//! Reads find nothing and writes succeed without effect, so callers behave as
//! if no one is logged in.

use crate::traits::{StorageResult, TokenStore};

#[derive(Debug, Default, Clone, Copy)]
pub struct DetachedTokenStore;

impl TokenStore for DetachedTokenStore {
    fn get(&self, _key: &str) -> StorageResult<Option<String>> {
        Ok(None)
    }

    fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
        Ok(())
    }

    fn remove(&self, _key: &str) -> StorageResult<()> {
        Ok(())
    }
}
