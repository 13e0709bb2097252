use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TimesheetError;
use crate::infrastructure::config::APP_NAME;

/// Round-trips remembered UI values under string keys.
pub trait Persistence {
    fn load_value(&self, key: &str) -> Option<Value>;
    fn save_value(&mut self, key: &str, value: Value) -> Result<(), TimesheetError>;
}

/// Stored value for `key`, or `default` when absent or unreadable.
pub fn load_or<T: DeserializeOwned>(store: &dyn Persistence, key: &str, default: T) -> T {
    store
        .load_value(key)
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(default)
}

pub fn save<T: Serialize>(
    store: &mut dyn Persistence,
    key: &str,
    value: &T,
) -> Result<(), TimesheetError> {
    let value = serde_json::to_value(value)?;
    store.save_value(key, value)
}

#[derive(Default, Serialize, Deserialize)]
struct Slot {
    #[serde(default)]
    value: Option<Value>,
}

/// One confy file per key in the app's config directory.
#[derive(Default)]
pub struct ConfyStore;

impl Persistence for ConfyStore {
    fn load_value(&self, key: &str) -> Option<Value> {
        match confy::load::<Slot>(APP_NAME, key) {
            Ok(slot) => slot.value,
            Err(error) => {
                tracing::warn!(key, %error, "cannot load remembered value");
                None
            }
        }
    }

    fn save_value(&mut self, key: &str, value: Value) -> Result<(), TimesheetError> {
        confy::store(APP_NAME, key, Slot { value: Some(value) })?;
        tracing::debug!(key, "remembered value saved");
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: std::collections::HashMap<String, Value>,
}

#[cfg(test)]
impl Persistence for MemoryStore {
    fn load_value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }

    fn save_value(&mut self, key: &str, value: Value) -> Result<(), TimesheetError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
