//! Stored List Format
//!
//! How the list is written to its storage slot, the seed list, and the
//! load-or-seed policy run at startup.
//!
//! Writes always use the versioned envelope
//! `{"version":1,"items":[...]}`. Reads also accept the bare array written
//! by earlier releases. Records are decoded one by one: a field that is
//! missing, null or of the wrong type takes its default, and a record with
//! no usable id or title is dropped without touching the others.

use std::collections::HashSet;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use web_slot::{KeyValueStore, StorageError};

use crate::domain::{Status, Todo, TodoId};

/// Current envelope version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed list: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unexpected list shape: {0}")]
    Shape(String),
    #[error("unsupported list format version {0}")]
    UnsupportedVersion(u32),
    #[error("none of the {0} stored records is usable")]
    NoUsableRecords(usize),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

// ========================
// Record Shapes
// ========================

#[derive(Serialize)]
struct Envelope<'a> {
    version: u32,
    items: &'a [Todo],
}

#[derive(Deserialize)]
struct StoredTodo {
    id: TodoId,
    title: String,
    #[serde(default, deserialize_with = "or_default")]
    done: bool,
    #[serde(default, deserialize_with = "or_default")]
    status: Status,
    #[serde(default, deserialize_with = "or_default")]
    memo: String,
}

impl From<StoredTodo> for Todo {
    fn from(stored: StoredTodo) -> Self {
        Todo {
            id: stored.id,
            title: stored.title,
            done: stored.done,
            status: stored.status,
            memo: stored.memo,
        }
    }
}

/// Null, a wrong type or an unknown value reads as the default
fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(&value).unwrap_or_else(|e| {
        if !value.is_null() {
            log::warn!("[STORAGE] unreadable field value {} ({}), using default", value, e);
        }
        T::default()
    }))
}

// ========================
// Encode / Decode
// ========================

pub fn encode(items: &[Todo]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&Envelope {
        version: FORMAT_VERSION,
        items,
    })?)
}

pub fn decode(raw: &str) -> Result<Vec<Todo>, CodecError> {
    decode_records(raw).map(|decoded| decoded.items)
}

struct Decoded {
    items: Vec<Todo>,
    /// Records skipped for lacking a usable id or title
    dropped: usize,
}

fn decode_records(raw: &str) -> Result<Decoded, CodecError> {
    let records = match serde_json::from_str::<Value>(raw)? {
        Value::Array(records) => records,
        Value::Object(mut envelope) => {
            let version = envelope
                .get("version")
                .and_then(Value::as_u64)
                .ok_or_else(|| CodecError::Shape("envelope without a numeric version".to_string()))?;
            if version > u64::from(FORMAT_VERSION) {
                return Err(CodecError::UnsupportedVersion(u32::try_from(version).unwrap_or(u32::MAX)));
            }
            match envelope.remove("items") {
                Some(Value::Array(records)) => records,
                _ => return Err(CodecError::Shape("envelope without an items array".to_string())),
            }
        }
        other => return Err(CodecError::Shape(format!("expected an array or object, found {}", other))),
    };

    let total = records.len();
    let items: Vec<Todo> = records
        .into_iter()
        .enumerate()
        .filter_map(|(index, record)| match serde_json::from_value::<StoredTodo>(record) {
            Ok(stored) => Some(stored.into()),
            Err(e) => {
                log::warn!("[STORAGE] dropping record {}: {}", index, e);
                None
            }
        })
        .collect();

    if total > 0 && items.is_empty() {
        return Err(CodecError::NoUsableRecords(total));
    }
    Ok(Decoded {
        dropped: total - items.len(),
        items: repair_duplicate_ids(items),
    })
}

/// Give every repeated id after the first a fresh one above the current max
fn repair_duplicate_ids(mut items: Vec<Todo>) -> Vec<Todo> {
    let mut next = items.iter().map(|t| t.id).max().map_or(0, |max| max.saturating_add(1));
    let mut seen = HashSet::with_capacity(items.len());
    for todo in &mut items {
        if !seen.insert(todo.id) {
            log::warn!("[STORAGE] duplicate id {} ({:?}), reassigned to {}", todo.id, todo.title, next);
            todo.id = next;
            seen.insert(next);
            next = next.saturating_add(1);
        }
    }
    items
}

// ========================
// Seed + Load Policy
// ========================

/// The list a first visit starts with
pub fn seed_todos() -> Vec<Todo> {
    let todo = |id, title: &str, done, status, memo: &str| Todo {
        id,
        title: title.to_string(),
        done,
        status,
        memo: memo.to_string(),
    };
    vec![
        todo(1, "JavaScript 공부", true, Status::Closed, "배열 메서드 복습"),
        todo(2, "React 공부", false, Status::InProgress, "컴포넌트 props 실습"),
        todo(3, "바닐라 프로젝트", false, Status::NotStarted, ""),
        todo(4, "TypeScript 공부", false, Status::NotStarted, ""),
        todo(5, "Final 프로젝트", true, Status::Closed, "배포 확인"),
    ]
}

/// Slot an unreadable list is moved to before the seed replaces it
pub fn backup_key(key: &str) -> String {
    format!("{}.corrupt", key)
}

/// Where the startup list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    /// Decoded from the slot
    Stored,
    /// Slot was empty or unreadable storage; seed written
    Seeded,
    /// Slot held something undecodable; backed up, seed written
    Recovered,
}

#[derive(Debug)]
pub struct Loaded {
    pub items: Vec<Todo>,
    pub source: LoadSource,
}

/// Overwrite the slot with the whole list
pub fn save(backend: &dyn KeyValueStore, key: &str, items: &[Todo]) -> Result<(), PersistError> {
    backend.set(key, &encode(items)?)?;
    Ok(())
}

fn back_up(backend: &dyn KeyValueStore, key: &str, raw: &str) {
    let backup = backup_key(key);
    if let Err(e) = backend.set(&backup, raw) {
        log::warn!("[STORAGE] could not back up to `{}`: {}", backup, e);
    }
}

/// Read the list from `key`, falling back to the seed list.
///
/// After this returns the slot holds a readable list, unless the write
/// itself failed.
pub fn load_or_seed(backend: &dyn KeyValueStore, key: &str) -> Loaded {
    let source = match backend.get(key) {
        Ok(Some(raw)) => match decode_records(&raw) {
            Ok(Decoded { items, dropped }) => {
                log::info!("[STORAGE] loaded {} items from `{}`", items.len(), key);
                if dropped > 0 {
                    // The next save would lose the dropped records for good
                    back_up(backend, key, &raw);
                }
                return Loaded { items, source: LoadSource::Stored };
            }
            Err(e) => {
                log::warn!("[STORAGE] discarding unreadable `{}` ({} bytes): {}", key, raw.len(), e);
                back_up(backend, key, &raw);
                LoadSource::Recovered
            }
        },
        Ok(None) => LoadSource::Seeded,
        Err(e) => {
            log::warn!("[STORAGE] cannot read `{}`: {}", key, e);
            LoadSource::Seeded
        }
    };

    let items = seed_todos();
    if let Err(e) = save(backend, key, &items) {
        log::error!("[STORAGE] failed to write seed list to `{}`: {}", key, e);
    }
    Loaded { items, source }
}

#[cfg(test)]
mod tests {
    use super::*;
    use web_slot::MemoryStorage;

    const KEY: &str = "todoList";

    #[test]
    fn test_seed_list() {
        let seed = seed_todos();
        assert_eq!(seed.len(), 5);
        assert_eq!(seed.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        assert_eq!(seed[1].title, "React 공부");
        assert_eq!(seed[1].status, Status::InProgress);
        assert!(seed[0].done && seed[4].done);
    }

    #[test]
    fn test_encode_writes_envelope() {
        let json: serde_json::Value = serde_json::from_str(&encode(&seed_todos()[..1]).unwrap()).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["items"][0]["title"], "JavaScript 공부");
        assert_eq!(json["items"][0]["status"], "마감");
    }

    #[test]
    fn test_decode_round_trip_keeps_order() {
        let mut items = seed_todos();
        items.push(Todo::new(1_700_000_000_000, "Write tests"));
        items[2].memo = "  spaces kept \n".to_string();
        let decoded = decode(&encode(&items).unwrap()).unwrap();
        assert_eq!(decoded, items);
    }

    #[test]
    fn test_decode_legacy_array() {
        let raw = r#"[
            {"id":1,"title":"JavaScript 공부","done":true,"status":"마감","memo":"배열 메서드 복습"},
            {"id":1712345678901,"title":"new","done":false,"status":"시작 전","memo":""}
        ]"#;
        let items = decode(raw).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].status, Status::Closed);
        assert_eq!(items[1].id, 1712345678901);
    }

    #[test]
    fn test_decode_defaults_missing_fields() {
        let raw = r#"[{"id":9,"title":"bare"},{"id":10,"title":"nulls","memo":null,"status":"??"}]"#;
        let items = decode(raw).unwrap();
        assert_eq!(items[0], Todo::new(9, "bare"));
        assert_eq!(items[1].memo, "");
        assert_eq!(items[1].status, Status::NotStarted);
    }

    #[test]
    fn test_decode_keeps_blank_title() {
        // Titles are only validated when an item is created
        let items = decode(r#"[{"id":1,"title":"   "}]"#).unwrap();
        assert_eq!(items[0].title, "   ");
    }

    #[test]
    fn test_decode_repairs_duplicate_ids() {
        let raw = r#"[{"id":4,"title":"a"},{"id":2,"title":"b"},{"id":4,"title":"c"}]"#;
        let items = decode(raw).unwrap();
        assert_eq!(items.iter().map(|t| t.id).collect::<Vec<_>>(), vec![4, 2, 5]);
        assert_eq!(items[2].title, "c");
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(matches!(decode("not json"), Err(CodecError::Json(_))));
        assert!(matches!(decode(r#"{"items":"nope"}"#), Err(CodecError::Shape(_))));
        assert!(matches!(decode(r#"{"version":1,"items":{}}"#), Err(CodecError::Shape(_))));
        assert!(matches!(decode(r#""just a string""#), Err(CodecError::Shape(_))));
        assert!(matches!(decode(r#"[{"title":"no id"}]"#), Err(CodecError::NoUsableRecords(1))));
    }

    #[test]
    fn test_decode_null_done_is_false() {
        let items = decode(r#"[{"id":2,"title":"other","done":null}]"#).unwrap();
        assert_eq!(items, vec![Todo::new(2, "other")]);
    }

    #[test]
    fn test_decode_wrong_field_types_default() {
        let raw = r#"[{"id":1,"title":"x","status":3,"done":"yes","memo":["a"]}]"#;
        let items = decode(raw).unwrap();
        assert_eq!(items, vec![Todo::new(1, "x")]);
    }

    #[test]
    fn test_decode_drops_only_broken_records() {
        let raw = r#"{"version":1,"items":[
            {"id":1,"title":"mine","done":true,"status":"진행중","memo":"keep"},
            {"id":"two","title":"bad id"},
            {"id":3},
            "not a record",
            {"id":4,"title":"also mine"}
        ]}"#;
        let items = decode(raw).unwrap();
        assert_eq!(items.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["mine", "also mine"]);
        assert_eq!(items[0].status, Status::InProgress);
        assert_eq!(items[0].memo, "keep");
        assert!(items[0].done);
    }

    #[test]
    fn test_decode_rejects_newer_version() {
        let err = decode(r#"{"version":2,"items":[]}"#).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedVersion(2)));
    }

    #[test]
    fn test_load_absent_slot_writes_seed() {
        let storage = MemoryStorage::new();
        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.source, LoadSource::Seeded);
        assert_eq!(loaded.items, seed_todos());

        let raw = storage.get(KEY).unwrap().expect("seed written");
        assert_eq!(decode(&raw).unwrap(), seed_todos());
    }

    #[test]
    fn test_load_existing_slot() {
        let storage = MemoryStorage::new();
        let items = vec![Todo::new(42, "only one")];
        save(&storage, KEY, &items).unwrap();

        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.source, LoadSource::Stored);
        assert_eq!(loaded.items, items);
    }

    #[test]
    fn test_load_empty_list_is_not_reseeded() {
        let storage = MemoryStorage::new();
        save(&storage, KEY, &[]).unwrap();
        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.source, LoadSource::Stored);
        assert!(loaded.items.is_empty());
    }

    #[test]
    fn test_load_corrupt_slot_backs_up_and_seeds() {
        let storage = MemoryStorage::new();
        storage.set(KEY, "{broken").unwrap();

        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.source, LoadSource::Recovered);
        assert_eq!(loaded.items.len(), 5);
        assert_eq!(storage.get(&backup_key(KEY)).unwrap().as_deref(), Some("{broken"));
        assert!(decode(&storage.get(KEY).unwrap().unwrap()).is_ok());
    }

    #[test]
    fn test_load_keeps_list_with_one_bad_field() {
        let storage = MemoryStorage::new();
        let raw = r#"[{"id":1,"title":"mine","done":false,"status":"시작 전","memo":""},{"id":2,"title":"other","done":null}]"#;
        storage.set(KEY, raw).unwrap();

        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.source, LoadSource::Stored);
        assert_eq!(loaded.items.iter().map(|t| t.title.as_str()).collect::<Vec<_>>(), vec!["mine", "other"]);
        // Nothing was dropped, so nothing is backed up
        assert_eq!(storage.get(&backup_key(KEY)).unwrap(), None);
    }

    #[test]
    fn test_load_backs_up_when_records_dropped() {
        let storage = MemoryStorage::new();
        let raw = r#"[{"id":1,"title":"mine"},{"title":"no id"}]"#;
        storage.set(KEY, raw).unwrap();

        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.source, LoadSource::Stored);
        assert_eq!(loaded.items, vec![Todo::new(1, "mine")]);
        assert_eq!(storage.get(&backup_key(KEY)).unwrap().as_deref(), Some(raw));
    }

    #[test]
    fn test_load_unavailable_storage_seeds_in_memory() {
        let storage = MemoryStorage::unavailable();
        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.source, LoadSource::Seeded);
        assert_eq!(loaded.items, seed_todos());
    }

    #[test]
    fn test_load_with_failing_writes_still_seeds() {
        let storage = MemoryStorage::with_quota(4);
        let loaded = load_or_seed(&storage, KEY);
        assert_eq!(loaded.items.len(), 5);
        assert_eq!(storage.get(KEY).unwrap(), None);
    }
}
