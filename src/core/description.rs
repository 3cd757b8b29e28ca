//! # Description Processor
//!
//! Turns a raw, possibly missing description into something the About panel
//! can show without further checks.
//!
//! ```text
//! None / ""          → { SENTINEL, truncated: false, full: SENTINEL }
//! len <= limit       → { raw,      truncated: false, full: raw }
//! len >  limit       → { raw[..limit], truncated: true, full: raw }
//! ```
//!
//! Lengths are counted in chars so a cut never lands inside a code point.

use log::debug;

/// Default number of characters shown before "read more".
pub const DEFAULT_DESCRIPTION_LIMIT: usize = 300;

/// Shown in place of a missing description.
pub const NO_DESCRIPTION: &str = "No description available.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedDescription {
    /// What is displayed in place: the full text or its first `limit` chars.
    pub text: String,
    pub is_truncated: bool,
    /// The untruncated original, kept for the reveal.
    pub full_text: String,
}

impl ProcessedDescription {
    fn sentinel() -> Self {
        Self {
            text: NO_DESCRIPTION.to_string(),
            is_truncated: false,
            full_text: NO_DESCRIPTION.to_string(),
        }
    }
}

pub fn process_description(raw: Option<&str>, limit: usize) -> ProcessedDescription {
    let Some(raw) = raw.filter(|s| !s.is_empty()) else {
        return ProcessedDescription::sentinel();
    };

    match raw.char_indices().nth(limit) {
        Some((cut, _)) => ProcessedDescription {
            text: raw[..cut].to_string(),
            is_truncated: true,
            full_text: raw.to_string(),
        },
        None => ProcessedDescription {
            text: raw.to_string(),
            is_truncated: false,
            full_text: raw.to_string(),
        },
    }
}

/// Single-entry memo over [`process_description`].
///
/// Keeps the last input and its result; a call with the same input and limit
/// returns the cached value.
pub struct DescriptionMemo {
    limit: usize,
    cached: Option<(Option<String>, ProcessedDescription)>,
    recomputes: usize,
}

impl DescriptionMemo {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            cached: None,
            recomputes: 0,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn set_limit(&mut self, limit: usize) {
        if limit != self.limit {
            self.limit = limit;
            self.cached = None;
        }
    }

    pub fn get(&mut self, raw: Option<&str>) -> &ProcessedDescription {
        let hit = matches!(&self.cached, Some((key, _)) if key.as_deref() == raw);
        if !hit {
            self.cached = None;
        }

        let limit = self.limit;
        let recomputes = &mut self.recomputes;
        let (_, processed) = self.cached.get_or_insert_with(|| {
            *recomputes += 1;
            debug!(
                "Recomputing description (len={:?}, limit={})",
                raw.map(str::len),
                limit
            );
            (raw.map(str::to_string), process_description(raw, limit))
        });
        processed
    }

    /// How many times the processor actually ran.
    pub fn recomputes(&self) -> usize {
        self.recomputes
    }
}

impl Default for DescriptionMemo {
    fn default() -> Self {
        Self::new(DEFAULT_DESCRIPTION_LIMIT)
    }
}
