//! `UniFFI` bindings for the link processor
//!
//! Exposes the processor, the stripper and the content handler to other
//! platforms (PHP hosts via C, Python, Kotlin, Swift, etc.)
#![allow(clippy::missing_panics_doc)]

use std::sync::Mutex;

use crate::{
    error::LinkNestResult,
    handler::{ContentHandler, Document, HandlerOutcome},
    keyword::{Keyword, KeywordCatalog},
    processor::{self, ProcessOutcome, TextProcessor},
    settings::Settings,
    strip,
};

/// Rewrite `text` with the given settings and keywords
#[uniffi::export]
#[must_use]
pub fn process_text(settings: Settings, keywords: Vec<Keyword>, text: &str) -> ProcessOutcome {
    processor::process_text(&settings, &keywords, text)
}

/// Remove every anchor previously inserted by the processor
#[uniffi::export]
#[must_use]
pub fn strip_links(text: &str) -> String {
    strip::strip_links(text)
}

/// Run the strip/relink flow for one host document
#[uniffi::export]
#[must_use]
pub fn handle_document(
    settings: Settings,
    keywords: Vec<Keyword>,
    fingerprint: String,
    document: Document,
) -> HandlerOutcome {
    ContentHandler::new(settings, KeywordCatalog::from(keywords), fingerprint).run(document)
}

/// Decode CBOR settings and keyword snapshots, then rewrite `text`
///
/// # Errors
///
/// Returns an error if either snapshot cannot be decoded
#[uniffi::export]
pub fn process_snapshot(
    settings: Vec<u8>,
    keywords: Vec<u8>,
    text: &str,
) -> LinkNestResult<ProcessOutcome> {
    let settings = Settings::from_cbor(&settings)?;
    let keywords = KeywordCatalog::from_cbor(&keywords)?;
    Ok(processor::process_text(&settings, keywords.as_slice(), text))
}

/// Processor bound to one settings/keyword snapshot
#[derive(uniffi::Object)]
pub struct LinkProcessor {
    processor: Mutex<TextProcessor>,
}

#[uniffi::export]
impl LinkProcessor {
    #[uniffi::constructor]
    #[must_use]
    pub fn new(settings: Settings, keywords: Vec<Keyword>) -> Self {
        Self {
            processor: Mutex::new(TextProcessor::new(settings, keywords)),
        }
    }

    /// Rewrite `text`; see `has_changed` for whether anything was linked
    ///
    /// # Panics
    ///
    /// May panic if the mutex is poisoned
    pub fn process(&self, text: &str) -> String {
        let mut processor = self.processor.lock().unwrap();
        processor.process(text)
    }

    pub fn has_changed(&self) -> bool {
        let processor = self.processor.lock().unwrap();
        processor.has_changed()
    }

    pub fn replacements(&self) -> u32 {
        let processor = self.processor.lock().unwrap();
        u32::try_from(processor.replacements()).unwrap_or(u32::MAX)
    }

    pub fn keyword_count(&self) -> u32 {
        let processor = self.processor.lock().unwrap();
        u32::try_from(processor.keywords().len()).unwrap_or(u32::MAX)
    }
}
