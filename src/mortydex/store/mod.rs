//! # Storage Layer
//!
//! All user state lives in a flat key-value store, one JSON document per key.
//! The [`StorageBackend`] trait is the seam between the stores that give those
//! documents meaning ([`membership`], [`comments`]) and the place the bytes
//! actually go.
//!
//! ## Implementations
//!
//! - [`fs::FileBackend`]: production storage, one `<key>.json` file per key in
//!   the data directory, written atomically (tmp file + rename).
//! - [`memory::MemBackend`]: in-memory storage for tests.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── rickAndMorty_favorites.json          # {"version":1,"data":[1,2]}
//! ├── rickAndMorty_deletedCharacters.json  # {"version":1,"data":[7]}
//! ├── rickAndMorty_comments.json           # {"version":1,"data":[{...}]}
//! ├── rickAndMorty_filters.json            # {"version":1,"data":{"pending":..,"applied":..}}
//! └── config.json
//! ```
//!
//! Every value is wrapped in a versioned envelope. Bare values written before
//! the envelope existed still load. Anything that fails to read or parse
//! loads as the default value: stored state can be lost, but it can never
//! stop the application from starting.

use crate::error::{DexError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

pub mod comments;
pub mod fs;
pub mod membership;
pub mod memory;

/// Current format version written into every envelope.
pub const FORMAT_VERSION: u32 = 1;

/// Raw key-value I/O.
///
/// Methods take `&self`: the application is single-threaded and several
/// stores share one backend.
pub trait StorageBackend {
    /// Read the raw value for `key`. `Ok(None)` when nothing is stored.
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`. Must not leave a partially written value.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: StorageBackend + ?Sized> StorageBackend for &T {
    fn read(&self, key: &str) -> Result<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    version: u32,
    data: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Stored<T> {
    Versioned(Envelope<T>),
    Legacy(T),
}

/// Load the value stored under `key`, falling back to `T::default()` when it
/// is missing, unreadable or malformed.
pub fn load_or_default<S, T>(backend: &S, key: &str) -> T
where
    S: StorageBackend + ?Sized,
    T: DeserializeOwned + Default,
{
    match load(backend, key) {
        Ok(Some(value)) => value,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(key, error = %e, "ignoring stored value");
            T::default()
        }
    }
}

/// Load and decode the value under `key`.
pub fn load<S, T>(backend: &S, key: &str) -> Result<Option<T>>
where
    S: StorageBackend + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = backend.read(key)? else {
        return Ok(None);
    };
    decode(key, &raw).map(Some)
}

fn decode<T: DeserializeOwned>(key: &str, raw: &str) -> Result<T> {
    let stored: Stored<T> = serde_json::from_str(raw)
        .map_err(|e| DexError::StorageParse(format!("{}: {}", key, e)))?;
    match stored {
        Stored::Versioned(envelope) if envelope.version <= FORMAT_VERSION => Ok(envelope.data),
        Stored::Versioned(envelope) => Err(DexError::StorageParse(format!(
            "{}: unsupported format version {}",
            key, envelope.version
        ))),
        Stored::Legacy(value) => Ok(value),
    }
}

/// Encode `value` in the current envelope and write it under `key`.
pub fn save<S, T>(backend: &S, key: &str, value: &T) -> Result<()>
where
    S: StorageBackend + ?Sized,
    T: Serialize,
{
    let envelope = EnvelopeRef {
        version: FORMAT_VERSION,
        data: value,
    };
    let encoded = serde_json::to_string_pretty(&envelope)?;
    tracing::debug!(key, bytes = encoded.len(), "writing stored value");
    backend.write(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::memory::MemBackend;
    use super::*;

    #[test]
    fn missing_key_loads_default() {
        let backend = MemBackend::new();
        let value: Vec<u32> = load_or_default(&backend, "nothing");
        assert!(value.is_empty());
    }

    #[test]
    fn saved_value_is_wrapped_in_envelope() {
        let backend = MemBackend::new();
        save(&backend, "ids", &vec![3u32, 1]).unwrap();

        let raw = backend.read("ids").unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["version"], 1);
        assert_eq!(json["data"], serde_json::json!([3, 1]));

        let loaded: Vec<u32> = load_or_default(&backend, "ids");
        assert_eq!(loaded, vec![3, 1]);
    }

    #[test]
    fn bare_legacy_value_still_loads() {
        let backend = MemBackend::new();
        backend.write("ids", "[4, 5, 6]").unwrap();
        let loaded: Vec<u32> = load_or_default(&backend, "ids");
        assert_eq!(loaded, vec![4, 5, 6]);
    }

    #[test]
    fn corrupt_value_falls_back_to_default() {
        let backend = MemBackend::new();
        backend.write("ids", "{not json").unwrap();
        let loaded: Vec<u32> = load_or_default(&backend, "ids");
        assert!(loaded.is_empty());
        assert!(matches!(
            load::<_, Vec<u32>>(&backend, "ids"),
            Err(DexError::StorageParse(_))
        ));
    }

    #[test]
    fn newer_format_version_is_rejected() {
        let backend = MemBackend::new();
        backend
            .write("ids", r#"{"version": 99, "data": [1]}"#)
            .unwrap();
        let loaded: Vec<u32> = load_or_default(&backend, "ids");
        assert!(loaded.is_empty());
    }

    #[test]
    fn unreadable_backend_falls_back_to_default() {
        let backend = MemBackend::new();
        backend.write("ids", "[1]").unwrap();
        backend.set_simulate_read_error(true);
        let loaded: Vec<u32> = load_or_default(&backend, "ids");
        assert!(loaded.is_empty());
    }
}
