//! Keyword records and the ordered catalog handed to the processor

use serde::{Deserialize, Serialize};

use crate::error::{KeywordError, KeywordResult};

/// One configured linking rule: a literal phrase and the link it becomes
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq, uniffi::Record)]
pub struct Keyword {
    /// Storage id; irrelevant to processing
    #[serde(default)]
    pub id: Option<u64>,
    /// Literal text to match, multi-word phrases allowed
    #[serde(rename = "keyword")]
    pub phrase: String,
    /// Anchor `title` attribute
    pub title: String,
    /// Anchor `rel` attribute
    #[serde(rename = "rel")]
    pub relation: String,
    /// Anchor `href`
    #[serde(rename = "href")]
    pub target_url: String,
}

impl Keyword {
    #[must_use]
    pub fn new(
        phrase: impl Into<String>,
        title: impl Into<String>,
        relation: impl Into<String>,
        target_url: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            phrase: phrase.into(),
            title: title.into(),
            relation: relation.into(),
            target_url: target_url.into(),
        }
    }

    /// Build a keyword from a positional record `[phrase, title, rel, href]`
    ///
    /// Extra trailing fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the record has fewer than four fields
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> KeywordResult<Self> {
        const NAMES: [&str; 4] = ["keyword", "title", "rel", "href"];

        if fields.len() < NAMES.len() {
            return Err(KeywordError::missing_field(NAMES[fields.len()], fields.len()));
        }

        Ok(Self::new(
            fields[0].as_ref(),
            fields[1].as_ref(),
            fields[2].as_ref(),
            fields[3].as_ref(),
        ))
    }

    #[must_use]
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether the phrase can ever produce a match
    #[must_use]
    pub fn is_usable(&self) -> bool {
        !self.phrase.trim().is_empty()
    }
}

/// Immutable, ordered snapshot of the keyword list
///
/// Order matters: when two keywords match at the same offset the later one
/// wins.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeywordCatalog {
    keywords: Vec<Keyword>,
}

impl KeywordCatalog {
    #[must_use]
    pub const fn new(keywords: Vec<Keyword>) -> Self {
        Self { keywords }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyword> {
        self.keywords.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Keyword] {
        &self.keywords
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.keywords.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Decode a catalog snapshot from CBOR
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid catalog
    pub fn from_cbor(data: &[u8]) -> KeywordResult<Self> {
        serde_cbor::from_slice(data).map_err(|e| KeywordError::decode_failed(e.to_string()))
    }

    /// Encode the catalog snapshot as CBOR
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails
    pub fn to_cbor(&self) -> KeywordResult<Vec<u8>> {
        serde_cbor::to_vec(self).map_err(|e| KeywordError::encode_failed(e.to_string()))
    }
}

impl From<Vec<Keyword>> for KeywordCatalog {
    fn from(keywords: Vec<Keyword>) -> Self {
        Self::new(keywords)
    }
}

impl FromIterator<Keyword> for KeywordCatalog {
    fn from_iter<I: IntoIterator<Item = Keyword>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a KeywordCatalog {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fields() {
        let keyword = Keyword::from_fields(&[
            "non",
            "online marketing",
            "help",
            "https://linking.objav.digital/services/",
        ])
        .unwrap();

        assert_eq!(keyword.phrase, "non");
        assert_eq!(keyword.title, "online marketing");
        assert_eq!(keyword.relation, "help");
        assert_eq!(keyword.target_url, "https://linking.objav.digital/services/");
        assert_eq!(keyword.id, None);
    }

    #[test]
    fn test_from_fields_missing_href() {
        let err = Keyword::from_fields(&["non", "online marketing", "help"]).unwrap_err();
        assert!(matches!(err, KeywordError::MissingField { ref field, found: 3 } if field == "href"));
    }

    #[test]
    fn test_from_fields_empty_record() {
        let empty: [&str; 0] = [];
        let err = Keyword::from_fields(&empty).unwrap_err();
        assert!(err.to_string().contains("keyword"));
    }

    #[test]
    fn test_is_usable() {
        assert!(Keyword::new("seo", "", "", "/").is_usable());
        assert!(!Keyword::new("", "", "", "/").is_usable());
        assert!(!Keyword::new("   ", "", "", "/").is_usable());
    }

    #[test]
    fn test_catalog_preserves_order() {
        let catalog: KeywordCatalog = ["b", "a", "c"]
            .into_iter()
            .map(|p| Keyword::new(p, "", "", "/"))
            .collect();

        let phrases: Vec<&str> = catalog.iter().map(|k| k.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["b", "a", "c"]);
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_cbor_snapshot() {
        let catalog = KeywordCatalog::from(vec![
            Keyword::new("maximus", "ifocus agency", "help", "https://linking.objav.digital/about/")
                .with_id(7),
        ]);

        let bytes = catalog.to_cbor().unwrap();
        let decoded = KeywordCatalog::from_cbor(&bytes).unwrap();
        assert_eq!(decoded, catalog);
        assert_eq!(decoded.as_slice()[0].id, Some(7));
    }

    #[test]
    fn test_catalog_rejects_garbage() {
        assert!(KeywordCatalog::from_cbor(b"\xff\x00not cbor").is_err());
    }
}
