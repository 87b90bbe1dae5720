//! Settings snapshot for one processing run
//!
//! The serialized shape mirrors the host's stored option record: option
//! names as keys and boolean options written as `"yes"` / `"no"`.

use serde::{Deserialize, Serialize};

use crate::error::{SettingsError, SettingsResult};

/// Immutable configuration for one `process` call
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq, uniffi::Record)]
#[serde(default)]
pub struct Settings {
    /// Content-type gate for posts (enforced by the caller)
    #[serde(with = "flag")]
    pub process_posts: bool,
    /// Content-type gate for pages (enforced by the caller)
    #[serde(with = "flag")]
    pub process_pages: bool,
    /// Replacement ceiling per `process` call, `0` means unlimited
    pub max_links: u32,
    /// Declared by the host but not enforced
    pub max_keywords_links: u32,
    /// Declared by the host but not enforced
    pub max_same_url: u32,
    #[serde(with = "flag")]
    pub case_sensitive: bool,
    /// Emit `target="_blank"` on inserted anchors
    #[serde(with = "flag")]
    pub open_in_new_window: bool,
    /// Suppress matches inside `h1`..`h6`
    #[serde(with = "flag")]
    pub exclude_headings: bool,
    /// Declared by the host but not enforced
    #[serde(with = "flag")]
    pub prevent_duplicates: bool,
    /// Documents never processed (checked by the caller)
    #[serde(rename = "ignored_posts")]
    pub ignored_post_ids: Vec<u64>,
    /// Phrases skipped even when present in the catalog
    #[serde(rename = "ignored_words")]
    pub ignored_phrases: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            process_posts: true,
            process_pages: true,
            max_links: 3,
            max_keywords_links: 1,
            max_same_url: 1,
            case_sensitive: true,
            open_in_new_window: true,
            exclude_headings: true,
            prevent_duplicates: true,
            ignored_post_ids: Vec::new(),
            ignored_phrases: Vec::new(),
        }
    }
}

impl Settings {
    #[must_use]
    pub const fn can_process_posts(&self) -> bool {
        self.process_posts
    }

    #[must_use]
    pub const fn can_process_pages(&self) -> bool {
        self.process_pages
    }

    #[must_use]
    pub fn is_post_excluded(&self, post_id: u64) -> bool {
        self.ignored_post_ids.contains(&post_id)
    }

    #[must_use]
    pub fn is_phrase_ignored(&self, phrase: &str) -> bool {
        self.ignored_phrases.iter().any(|p| p == phrase)
    }

    /// Replacement ceiling, `None` when unlimited
    #[must_use]
    pub const fn link_limit(&self) -> Option<usize> {
        match self.max_links {
            0 => None,
            n => Some(n as usize),
        }
    }

    #[must_use]
    pub const fn with_max_links(mut self, max_links: u32) -> Self {
        self.max_links = max_links;
        self
    }

    #[must_use]
    pub const fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    #[must_use]
    pub const fn with_open_in_new_window(mut self, open_in_new_window: bool) -> Self {
        self.open_in_new_window = open_in_new_window;
        self
    }

    #[must_use]
    pub const fn with_exclude_headings(mut self, exclude_headings: bool) -> Self {
        self.exclude_headings = exclude_headings;
        self
    }

    #[must_use]
    pub const fn with_process_posts(mut self, process_posts: bool) -> Self {
        self.process_posts = process_posts;
        self
    }

    #[must_use]
    pub const fn with_process_pages(mut self, process_pages: bool) -> Self {
        self.process_pages = process_pages;
        self
    }

    #[must_use]
    pub fn with_ignored_posts(mut self, ids: impl IntoIterator<Item = u64>) -> Self {
        self.ignored_post_ids = ids.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_ignored_phrases<S: Into<String>>(
        mut self,
        phrases: impl IntoIterator<Item = S>,
    ) -> Self {
        self.ignored_phrases = phrases.into_iter().map(Into::into).collect();
        self
    }

    /// Parse an option flag as stored by the host
    ///
    /// # Errors
    ///
    /// Returns an error for anything other than `yes` or `no`
    pub fn parse_flag(value: &str) -> SettingsResult<bool> {
        match value.trim().to_ascii_lowercase().as_str() {
            "yes" => Ok(true),
            "no" => Ok(false),
            _ => Err(SettingsError::invalid_flag(value)),
        }
    }

    /// Decode a settings snapshot from CBOR
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid settings record
    pub fn from_cbor(data: &[u8]) -> SettingsResult<Self> {
        serde_cbor::from_slice(data).map_err(|e| SettingsError::decode_failed(e.to_string()))
    }

    /// Encode the settings snapshot as CBOR
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_cbor(&self) -> SettingsResult<Vec<u8>> {
        serde_cbor::to_vec(self).map_err(|e| SettingsError::encode_failed(e.to_string()))
    }
}

/// `"yes"` / `"no"` option flags; plain booleans are accepted on input
mod flag {
    use core::fmt;

    use serde::{Deserializer, Serializer, de};

    use super::Settings;

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "yes" } else { "no" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        struct FlagVisitor;

        impl de::Visitor<'_> for FlagVisitor {
            type Value = bool;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("\"yes\", \"no\" or a boolean")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
                Ok(v)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
                Settings::parse_flag(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_any(FlagVisitor)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_cbor::Value;

    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert!(settings.can_process_posts());
        assert!(settings.can_process_pages());
        assert_eq!(settings.max_links, 3);
        assert_eq!(settings.link_limit(), Some(3));
        assert!(settings.case_sensitive);
        assert!(settings.open_in_new_window);
        assert!(settings.exclude_headings);
        assert!(settings.ignored_phrases.is_empty());
    }

    #[test]
    fn test_zero_max_links_is_unlimited() {
        assert_eq!(Settings::default().with_max_links(0).link_limit(), None);
    }

    #[test]
    fn test_parse_flag() {
        assert!(Settings::parse_flag("yes").unwrap());
        assert!(!Settings::parse_flag("No").unwrap());
        assert!(Settings::parse_flag("on").is_err());
    }

    #[test]
    fn test_ignored_lookups() {
        let settings = Settings::default()
            .with_ignored_posts([4, 9])
            .with_ignored_phrases(["seo audit"]);

        assert!(settings.is_post_excluded(9));
        assert!(!settings.is_post_excluded(5));
        assert!(settings.is_phrase_ignored("seo audit"));
        assert!(!settings.is_phrase_ignored("seo"));
    }

    #[test]
    fn test_decode_host_option_record() {
        let mut record = BTreeMap::new();
        record.insert(text("case_sensitive"), text("no"));
        record.insert(text("max_links"), Value::Integer(0));
        record.insert(text("exclude_headings"), Value::Bool(false));
        record.insert(
            text("ignored_words"),
            Value::Array(vec![text("lorem"), text("ipsum dolor")]),
        );
        let bytes = serde_cbor::to_vec(&Value::Map(record)).unwrap();

        let settings = Settings::from_cbor(&bytes).unwrap();
        assert!(!settings.case_sensitive);
        assert!(!settings.exclude_headings);
        assert_eq!(settings.link_limit(), None);
        assert_eq!(settings.ignored_phrases, vec!["lorem", "ipsum dolor"]);
        // untouched keys keep their defaults
        assert!(settings.open_in_new_window);
        assert_eq!(settings.max_keywords_links, 1);
    }

    #[test]
    fn test_flags_encode_as_yes_no() {
        let bytes = Settings::default().with_case_sensitive(false).to_cbor().unwrap();
        let Value::Map(record) = serde_cbor::from_slice::<Value>(&bytes).unwrap() else {
            panic!("settings should encode as a map");
        };

        assert_eq!(record.get(&text("case_sensitive")), Some(&text("no")));
        assert_eq!(record.get(&text("open_in_new_window")), Some(&text("yes")));
    }

    #[test]
    fn test_decode_rejects_bad_flag() {
        let mut record = BTreeMap::new();
        record.insert(text("process_pages"), text("sometimes"));
        let bytes = serde_cbor::to_vec(&Value::Map(record)).unwrap();

        let err = Settings::from_cbor(&bytes).unwrap_err();
        assert!(err.to_string().contains("sometimes"));
    }
}
