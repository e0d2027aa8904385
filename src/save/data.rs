//! In-memory key/value store
//!
//! `SaveData` mirrors a player-prefs style API: typed getters and setters
//! keyed by string, plus existence checks and deletion. Entries keep their
//! insertion order so files are written in a stable order.

use bitcode::{Decode, Encode};
use std::cell::RefCell;
use std::rc::Rc;

use super::types::{KeyValuePair, SaveError, SaveValue};

/// Shared handle to a `SaveData`, as held by the registry and its consumers
pub type SaveDataHandle = Rc<RefCell<SaveData>>;

/// Ordered collection of unique keys
#[derive(Debug, Clone, Default, PartialEq, Encode, Decode)]
pub struct SaveData {
    key_value_pairs: Vec<KeyValuePair>,
}

impl SaveData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps this data in a fresh shared handle
    pub fn into_handle(self) -> SaveDataHandle {
        Rc::new(RefCell::new(self))
    }

    /// Builds from decoded pairs, keeping the first of any duplicated key
    pub fn from_pairs(pairs: impl IntoIterator<Item = KeyValuePair>) -> Self {
        let mut data = SaveData::new();
        for pair in pairs {
            if data.has_key(&pair.key) {
                log::warn!("Dropping duplicate save key: {}", pair.key);
                continue;
            }
            data.key_value_pairs.push(pair);
        }
        data
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.key_value_pairs.iter().position(|pair| pair.key == key)
    }

    fn find(&self, key: &str) -> Option<&SaveValue> {
        self.key_value_pairs
            .iter()
            .find(|pair| pair.key == key)
            .map(|pair| &pair.value)
    }

    /// Upsert: replaces the value in place, or appends a new pair
    fn set_value(&mut self, key: &str, value: SaveValue) {
        match self.position(key) {
            Some(index) => self.key_value_pairs[index].value = value,
            None => self.key_value_pairs.push(KeyValuePair {
                key: key.to_string(),
                value,
            }),
        }
    }

    /// Reads `key`, or stores `default` under it when absent.
    fn get_value<T, F>(&mut self, key: &str, default: T, convert: F) -> Result<T, SaveError>
    where
        T: Into<SaveValue> + Clone,
        F: FnOnce(&SaveValue) -> Option<T>,
    {
        match self.find(key) {
            Some(stored) => convert(stored).ok_or_else(|| SaveError::InvalidValue {
                key: key.to_string(),
                expected: default_kind(&default),
                found: stored.to_string(),
            }),
            None => {
                self.set_value(key, default.clone().into());
                Ok(default)
            }
        }
    }

    /// Returns the int stored under `key`
    ///
    /// When the key is missing, `default` is inserted and returned, so a
    /// later `has_key` is true. A whole-valued float reads as an int.
    pub fn get_int(&mut self, key: &str, default: i32) -> Result<i32, SaveError> {
        self.get_value(key, default, |stored| match stored {
            SaveValue::Int(v) => Some(*v),
            // Same result as reading the float's text form back from a file
            SaveValue::Float(v) => v.to_string().parse().ok(),
            SaveValue::String(s) => s.trim().parse().ok(),
        })
    }

    pub fn get_int_or_zero(&mut self, key: &str) -> Result<i32, SaveError> {
        self.get_int(key, 0)
    }

    /// Returns the float stored under `key`, inserting `default` when missing
    ///
    /// Stored ints widen to float.
    pub fn get_float(&mut self, key: &str, default: f32) -> Result<f32, SaveError> {
        self.get_value(key, default, |stored| match stored {
            SaveValue::Float(v) => Some(*v),
            SaveValue::Int(v) => Some(*v as f32),
            SaveValue::String(s) => s.trim().parse().ok(),
        })
    }

    pub fn get_float_or_zero(&mut self, key: &str) -> Result<f32, SaveError> {
        self.get_float(key, 0.0)
    }

    /// Returns the string form of whatever is stored under `key`
    pub fn get_string(&mut self, key: &str, default: &str) -> Result<String, SaveError> {
        self.get_value(key, default.to_string(), |stored| Some(stored.to_string()))
    }

    pub fn get_string_or_empty(&mut self, key: &str) -> Result<String, SaveError> {
        self.get_string(key, "")
    }

    pub fn set_int(&mut self, key: &str, value: i32) {
        self.set_value(key, SaveValue::Int(value));
    }

    pub fn set_float(&mut self, key: &str, value: f32) {
        self.set_value(key, SaveValue::Float(value));
    }

    pub fn set_string(&mut self, key: &str, value: &str) {
        self.set_value(key, SaveValue::String(value.to_string()));
    }

    pub fn has_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key`; does nothing if it isn't present
    pub fn delete_key(&mut self, key: &str) {
        if let Some(index) = self.position(key) {
            self.key_value_pairs.remove(index);
        }
    }

    /// Removes every key. Use with caution.
    pub fn delete_all(&mut self) {
        self.key_value_pairs.clear();
    }

    pub fn len(&self) -> usize {
        self.key_value_pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key_value_pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyValuePair> {
        self.key_value_pairs.iter()
    }
}

fn default_kind<T: Into<SaveValue> + Clone>(default: &T) -> &'static str {
    default.clone().into().kind()
}
