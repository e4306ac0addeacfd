//! The client session: what a login leaves in the token store

use crate::traits::{StorageResult, TokenStore};
use tracing::debug;

/// Fixed key names in the token store
pub mod keys {
    pub const ACCESS_TOKEN: &str = "access_token";
    pub const REFRESH_TOKEN: &str = "refresh_token";
    pub const DISPLAY_NAME: &str = "display_name";

    pub const ALL: [&str; 3] = [ACCESS_TOKEN, REFRESH_TOKEN, DISPLAY_NAME];
}

/// Snapshot of the three session values
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub display_name: Option<String>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &self.access_token.as_ref().map(|_| "<set>"))
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<set>"))
            .field("display_name", &self.display_name)
            .finish()
    }
}

impl Session {
    /// Read a token key; an empty string counts as absent
    pub fn token(store: &dyn TokenStore, key: &str) -> StorageResult<Option<String>> {
        Ok(store.get(key)?.filter(|token| !token.is_empty()))
    }

    pub fn load(store: &dyn TokenStore) -> StorageResult<Self> {
        Ok(Self {
            access_token: Self::token(store, keys::ACCESS_TOKEN)?,
            refresh_token: Self::token(store, keys::REFRESH_TOKEN)?,
            display_name: store.get(keys::DISPLAY_NAME)?,
        })
    }

    /// Write the values that are set; unset values are left untouched
    pub fn save(&self, store: &dyn TokenStore) -> StorageResult<()> {
        for (key, value) in [
            (keys::ACCESS_TOKEN, &self.access_token),
            (keys::REFRESH_TOKEN, &self.refresh_token),
            (keys::DISPLAY_NAME, &self.display_name),
        ] {
            if let Some(value) = value {
                store.set(key, value)?;
            }
        }
        Ok(())
    }

    /// Remove all three keys
    pub fn clear(store: &dyn TokenStore) -> StorageResult<()> {
        for key in keys::ALL {
            store.remove(key)?;
        }
        debug!("Session cleared");
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryTokenStore;

    #[test]
    fn test_save_load_clear() {
        let store = MemoryTokenStore::new();
        let session = Session {
            access_token: Some("a".to_string()),
            refresh_token: Some("r".to_string()),
            display_name: Some("Awa".to_string()),
        };

        session.save(&store).unwrap();
        assert_eq!(Session::load(&store).unwrap(), session);
        assert!(session.is_authenticated());

        Session::clear(&store).unwrap();
        assert_eq!(Session::load(&store).unwrap(), Session::default());
        assert!(store.is_empty());
    }

    #[test]
    fn test_save_leaves_unset_values() {
        let store = MemoryTokenStore::with_entries([(keys::REFRESH_TOKEN, "r")]);
        Session {
            access_token: Some("new".to_string()),
            ..Default::default()
        }
        .save(&store)
        .unwrap();

        let loaded = Session::load(&store).unwrap();
        assert_eq!(loaded.access_token.as_deref(), Some("new"));
        assert_eq!(loaded.refresh_token.as_deref(), Some("r"));
    }

    #[test]
    fn test_clear_keeps_unrelated_keys() {
        let store = MemoryTokenStore::with_entries([
            (keys::ACCESS_TOKEN, "a"),
            (keys::DISPLAY_NAME, "n"),
            ("theme", "dark"),
        ]);
        Session::clear(&store).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("theme").unwrap().as_deref(), Some("dark"));
    }

    #[test]
    fn test_empty_tokens_count_as_absent() {
        let store = MemoryTokenStore::with_entries([
            (keys::ACCESS_TOKEN, ""),
            (keys::REFRESH_TOKEN, ""),
        ]);
        assert_eq!(Session::token(&store, keys::ACCESS_TOKEN).unwrap(), None);

        let session = Session::load(&store).unwrap();
        assert!(!session.is_authenticated());
        assert_eq!(session.refresh_token, None);
    }

    #[test]
    fn test_debug_hides_tokens() {
        let session = Session {
            access_token: Some("secret-token".to_string()),
            ..Default::default()
        };
        assert!(!format!("{:?}", session).contains("secret-token"));
    }
}
