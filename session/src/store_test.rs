use super::*;
use crate::storage::MemoryStorage;

fn sample_session() -> Session {
    Session {
        token: "T".to_owned(),
        admin: AdminIdentity(serde_json::json!({ "id": 1 })),
    }
}

// =============================================================
// read
// =============================================================

#[test]
fn read_empty_storage_is_none() {
    let store = SessionStore::new(MemoryStorage::new());
    assert_eq!(store.read(), None);
}

#[test]
fn read_requires_both_keys() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "T").expect("write");
    let store = SessionStore::new(storage.clone());
    assert_eq!(store.read(), None);

    storage.remove_item(TOKEN_KEY).expect("remove");
    storage.set_item(ADMIN_KEY, r#"{"id":1}"#).expect("write");
    assert_eq!(store.read(), None);
}

#[test]
fn read_ignores_corrupt_identity() {
    let storage = MemoryStorage::new();
    storage.set_item(TOKEN_KEY, "T").expect("write");
    storage.set_item(ADMIN_KEY, "{not json").expect("write");
    let store = SessionStore::new(storage);
    assert_eq!(store.read(), None);
}

// =============================================================
// write / clear
// =============================================================

#[test]
fn write_uses_two_key_layout() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.write(&sample_session()).expect("write");

    assert_eq!(storage.get_item(TOKEN_KEY).expect("read").as_deref(), Some("T"));
    assert_eq!(storage.get_item(ADMIN_KEY).expect("read").as_deref(), Some(r#"{"id":1}"#));
    assert_eq!(store.read(), Some(sample_session()));
}

#[test]
fn write_overwrites_previous_session() {
    let store = SessionStore::new(MemoryStorage::new());
    store.write(&sample_session()).expect("write");
    let next = Session {
        token: "U".to_owned(),
        admin: AdminIdentity(serde_json::json!({ "id": 2 })),
    };
    store.write(&next).expect("write");
    assert_eq!(store.read(), Some(next));
}

#[test]
fn clear_removes_both_keys() {
    let storage = MemoryStorage::new();
    let store = SessionStore::new(storage.clone());
    store.write(&sample_session()).expect("write");
    store.clear().expect("clear");

    assert!(storage.is_empty());
    assert_eq!(store.read(), None);
}

/// Shares a map with a `MemoryStorage` but refuses writes to `admin`.
struct AdminWriteFails(MemoryStorage);

impl KeyValueStorage for AdminWriteFails {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.0.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if key == ADMIN_KEY {
            return Err(StorageError::Unavailable("quota exceeded".to_owned()));
        }
        self.0.set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.0.remove_item(key)
    }
}

#[test]
fn failed_identity_write_never_pairs_new_token_with_old_identity() {
    let storage = MemoryStorage::new();
    SessionStore::new(storage.clone()).write(&sample_session()).expect("write");

    let failing = SessionStore::new(AdminWriteFails(storage.clone()));
    let next = Session {
        token: "U".to_owned(),
        admin: AdminIdentity(serde_json::json!({ "id": 2 })),
    };
    assert!(matches!(failing.write(&next), Err(StorageError::Unavailable(_))));

    assert!(!storage.contains_key(TOKEN_KEY));
    assert_eq!(SessionStore::new(storage).read(), None);
}
