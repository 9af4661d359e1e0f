//! Request bodies kept as JSON under a service's `tests/fixtures/`.

use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde_json::Value;

pub struct Fixture;

impl Fixture {
    /// Read `path` relative to the crate under test. Panics with the resolved
    /// path when the file is missing or is not JSON.
    pub fn load(path: &str) -> Value {
        let full = Self::resolve(path);
        let text = std::fs::read_to_string(&full)
            .unwrap_or_else(|e| panic!("cannot read fixture {}: {e}", full.display()));
        serde_json::from_str(&text)
            .unwrap_or_else(|e| panic!("fixture {} is not valid JSON: {e}", full.display()))
    }

    /// Like [`Fixture::load`], decoded straight into a request type.
    pub fn load_as<T: DeserializeOwned>(path: &str) -> T {
        serde_json::from_value(Self::load(path))
            .unwrap_or_else(|e| panic!("fixture {path} does not match the target type: {e}"))
    }

    fn resolve(path: &str) -> PathBuf {
        match std::env::var_os("CARGO_MANIFEST_DIR") {
            Some(dir) => PathBuf::from(dir).join(path),
            None => PathBuf::from(path),
        }
    }
}
