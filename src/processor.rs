//! Keyword-to-hyperlink text processor
//!
//! Works in two passes over raw markup:
//! - discovery: every eligible occurrence of every keyword, keyed by start
//!   offset (a later keyword overwrites an earlier one at the same offset)
//! - replacement: a fold over the occurrences in offset order, re-locating
//!   each one in the partially rewritten text and wrapping it in an anchor
//!
//! Text outside the replaced spans is copied byte-for-byte.

use std::{collections::BTreeMap, ops::ControlFlow};

use regex::{Regex, RegexBuilder};
use tracing::{debug, trace, warn};

use crate::{
    keyword::{Keyword, KeywordCatalog},
    markup::{check_boundary, render_anchor},
    settings::Settings,
};

/// Result of one `process` call
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Record)]
pub struct ProcessOutcome {
    pub text: String,
    pub changed: bool,
    pub replacements: u32,
}

/// A keyword together with its compiled match pattern
struct Matcher<'k> {
    keyword: &'k Keyword,
    pattern: Regex,
}

/// Fold state carried through the replacement phase
struct Rewrite {
    text: String,
    offset: usize,
    replacements: usize,
}

/// Rewrites keyword occurrences into anchors
#[derive(Debug, Clone)]
pub struct TextProcessor {
    settings: Settings,
    keywords: KeywordCatalog,
    replacements: usize,
}

impl TextProcessor {
    #[must_use]
    pub fn new(settings: Settings, keywords: impl Into<KeywordCatalog>) -> Self {
        Self {
            settings,
            keywords: keywords.into(),
            replacements: 0,
        }
    }

    #[must_use]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub const fn keywords(&self) -> &KeywordCatalog {
        &self.keywords
    }

    /// Whether the last `process` call replaced anything
    #[must_use]
    pub const fn has_changed(&self) -> bool {
        self.replacements > 0
    }

    /// Number of anchors inserted by the last `process` call
    #[must_use]
    pub const fn replacements(&self) -> usize {
        self.replacements
    }

    /// Rewrite `text`, returning it unchanged when nothing matches
    pub fn process(&mut self, text: &str) -> String {
        let (output, replacements) = self.rewrite(text);
        self.replacements = replacements;
        output
    }

    fn rewrite(&self, text: &str) -> (String, usize) {
        let matchers = self.matchers();
        let occurrences = self.discover(&matchers, text);

        if occurrences.is_empty() {
            debug!(keywords = matchers.len(), "no keyword occurrences found");
            return (text.to_string(), 0);
        }

        let limit = self.settings.link_limit();
        let start = Rewrite {
            text: text.to_string(),
            offset: 0,
            replacements: 0,
        };

        let folded = occurrences
            .iter()
            .try_fold(start, |state, (&position, &index)| {
                let state = self.replace_at(state, position, &matchers[index]);
                if limit.is_some_and(|max| state.replacements >= max) {
                    ControlFlow::Break(state)
                } else {
                    ControlFlow::Continue(state)
                }
            });

        let (rewrite, capped) = match folded {
            ControlFlow::Break(state) => (state, true),
            ControlFlow::Continue(state) => (state, false),
        };

        debug!(
            keywords = matchers.len(),
            occurrences = occurrences.len(),
            replacements = rewrite.replacements,
            capped,
            "processed text"
        );

        (rewrite.text, rewrite.replacements)
    }

    /// Compile a pattern for every keyword that is usable and not ignored
    fn matchers(&self) -> Vec<Matcher<'_>> {
        self.keywords
            .iter()
            .filter(|keyword| keyword.is_usable())
            .filter(|keyword| !self.settings.is_phrase_ignored(&keyword.phrase))
            .filter_map(|keyword| {
                let source = format!(r"\b{}\b", regex::escape(&keyword.phrase));
                match RegexBuilder::new(&source)
                    .case_insensitive(!self.settings.case_sensitive)
                    .build()
                {
                    Ok(pattern) => Some(Matcher { keyword, pattern }),
                    Err(err) => {
                        warn!(phrase = %keyword.phrase, error = %err, "skipping keyword with unusable pattern");
                        None
                    }
                }
            })
            .collect()
    }

    /// Map of start offset to matcher index, ordered by offset
    fn discover(&self, matchers: &[Matcher<'_>], text: &str) -> BTreeMap<usize, usize> {
        let mut occurrences = BTreeMap::new();

        for (index, matcher) in matchers.iter().enumerate() {
            let mut from = 0;
            while let Some((start, end)) = self.find_eligible(&matcher.pattern, text, from) {
                occurrences.insert(start, index);
                from = end;
            }
        }

        occurrences
    }

    /// First match at or after `from` that passes the boundary checks
    ///
    /// A rejected match does not consume its span; scanning resumes one
    /// character after its start.
    fn find_eligible(&self, pattern: &Regex, text: &str, mut from: usize) -> Option<(usize, usize)> {
        while from <= text.len() {
            let found = pattern.find_at(text, from)?;

            match check_boundary(text, found.end(), self.settings.exclude_headings) {
                None => return Some((found.start(), found.end())),
                Some(rejection) => {
                    trace!(
                        matched = found.as_str(),
                        position = found.start(),
                        reason = rejection.reason(),
                        "rejected candidate"
                    );
                    let step = text[found.start()..].chars().next().map_or(1, char::len_utf8);
                    from = found.start() + step;
                }
            }
        }

        None
    }

    /// Replace the first eligible match in the text from the shifted position on
    fn replace_at(&self, mut state: Rewrite, position: usize, matcher: &Matcher<'_>) -> Rewrite {
        let mut at = (position + state.offset).min(state.text.len());
        while !state.text.is_char_boundary(at) {
            at += 1;
        }

        let suffix = &state.text[at..];
        let Some((start, end)) = self.find_eligible(&matcher.pattern, suffix, 0) else {
            return state;
        };

        let anchor = render_anchor(
            matcher.keyword,
            &suffix[start..end],
            self.settings.open_in_new_window,
        );
        state.offset += anchor.len() - (end - start);
        state.replacements += 1;
        state.text.replace_range(at + start..at + end, &anchor);

        state
    }
}

/// Pure form of [`TextProcessor::process`]
#[must_use]
pub fn process_text(settings: &Settings, keywords: &[Keyword], text: &str) -> ProcessOutcome {
    let mut processor = TextProcessor::new(settings.clone(), keywords.to_vec());
    let text = processor.process(text);

    ProcessOutcome {
        text,
        changed: processor.has_changed(),
        replacements: u32::try_from(processor.replacements()).unwrap_or(u32::MAX),
    }
}
