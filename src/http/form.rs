//! URL-encoded form body decoding
//!
//! Decodes `application/x-www-form-urlencoded` request bodies into a flat
//! key/value map. Presence and emptiness are distinct: `name=` carries the
//! key `name` with an empty value, while a body without the key does not
//! carry it at all. Validation built on this map must test key presence,
//! not value emptiness.

use std::collections::HashMap;

/// Decoded form body
#[derive(Debug, Clone, Default)]
pub struct FormBody {
    fields: HashMap<String, String>,
}

impl FormBody {
    /// Decode a raw request body; repeated keys keep the last value
    pub fn parse(bytes: &[u8]) -> Self {
        let fields = url::form_urlencoded::parse(bytes).into_owned().collect();
        Self { fields }
    }

    /// Value for a key, if the key was present in the body
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }
}
