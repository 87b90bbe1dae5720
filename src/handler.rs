//! Caller-side flow around the processor and stripper
//!
//! Decides, per document, whether stale links must be removed and whether
//! keywords must be re-linked, then applies that decision. Reading and
//! persisting documents stays with the host.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{keyword::KeywordCatalog, processor::TextProcessor, settings::Settings, strip::strip_links};

/// Kind of content a document holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, uniffi::Enum)]
pub enum ContentKind {
    Post,
    Page,
    /// Anything else; never processed
    Other,
}

/// A document as handed over by the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, uniffi::Record)]
pub struct Document {
    pub id: u64,
    pub kind: ContentKind,
    pub content: String,
    /// Settings fingerprint stored with the content when it was last linked
    pub fingerprint: Option<String>,
}

/// What the handler does with a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum ContentAction {
    /// Leave the content alone
    Skip,
    /// Remove inserted links only
    Strip,
    /// Remove inserted links, then link keywords again
    Relink,
}

/// Content to hand back to the host
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct HandlerOutcome {
    pub action: ContentAction,
    pub content: String,
    /// The content differs from what the host supplied and should be saved
    pub needs_update: bool,
    /// Fingerprint the document carries after the run; `None` once dropped
    pub fingerprint: Option<String>,
}

/// Applies the current settings and catalog to host documents
#[derive(Debug, Clone)]
pub struct ContentHandler {
    settings: Settings,
    keywords: KeywordCatalog,
    fingerprint: String,
}

impl ContentHandler {
    /// `fingerprint` identifies the current settings version, e.g. the time
    /// they were last changed
    #[must_use]
    pub fn new(settings: Settings, keywords: KeywordCatalog, fingerprint: impl Into<String>) -> Self {
        Self {
            settings,
            keywords,
            fingerprint: fingerprint.into(),
        }
    }

    #[must_use]
    pub fn plan(&self, document: &Document) -> ContentAction {
        let enabled = match document.kind {
            ContentKind::Post => self.settings.can_process_posts(),
            ContentKind::Page => self.settings.can_process_pages(),
            ContentKind::Other => return ContentAction::Skip,
        };

        if !enabled || self.settings.is_post_excluded(document.id) {
            ContentAction::Strip
        } else if document.fingerprint.as_deref() != Some(self.fingerprint.as_str()) {
            ContentAction::Relink
        } else {
            ContentAction::Skip
        }
    }

    /// Apply the planned action to `document`
    ///
    /// Stripping drops the stored fingerprint. The returned fingerprint is
    /// the current one only when the content is saved: on `Relink` that
    /// also needs at least one keyword linked, so a relink that only
    /// removes stale links saves nothing.
    #[must_use]
    pub fn run(&self, document: Document) -> HandlerOutcome {
        let action = self.plan(&document);
        debug!(id = document.id, ?action, "handling document");

        let (content, linked) = match action {
            ContentAction::Skip => {
                return HandlerOutcome {
                    action,
                    content: document.content,
                    needs_update: false,
                    fingerprint: document.fingerprint,
                };
            }
            ContentAction::Strip => (strip_links(&document.content), true),
            ContentAction::Relink => {
                let stripped = strip_links(&document.content);
                let mut processor = TextProcessor::new(self.settings.clone(), self.keywords.clone());
                let content = processor.process(&stripped);
                (content, processor.has_changed())
            }
        };

        let needs_update = linked && content != document.content;
        debug!(id = document.id, needs_update, "document handled");

        HandlerOutcome {
            action,
            content,
            needs_update,
            fingerprint: needs_update.then(|| self.fingerprint.clone()),
        }
    }
}
