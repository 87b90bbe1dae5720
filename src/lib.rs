#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

uniffi::setup_scaffolding!();

pub mod error;
pub mod ffi;
pub mod handler;
pub mod keyword;
pub mod markup;
pub mod processor;
pub mod settings;
pub mod strip;

// Re-export common types for convenience
pub use error::{
    KeywordError, KeywordResult, LinkNestError, LinkNestResult, SettingsError, SettingsResult,
};
pub use handler::{ContentAction, ContentHandler, ContentKind, Document, HandlerOutcome};
pub use keyword::{Keyword, KeywordCatalog};
pub use markup::MARKER_CLASS;
pub use processor::{ProcessOutcome, TextProcessor, process_text};
pub use settings::Settings;
pub use strip::strip_links;
