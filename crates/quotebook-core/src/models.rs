//! Data models for Quotebook
//!
//! Defines the core data structures: `Quote`, the identity used for
//! deduplication, and the `QuoteDraft` collected from user input.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A quote with its category
///
/// Field order matters: exported documents list `text` before `category`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Quote {
    /// The quote itself
    pub text: String,
    /// Free-form category label
    pub category: String,
}

impl Quote {
    /// Create a new quote
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Identity used when merging collections
    pub fn key(&self) -> QuoteKey {
        QuoteKey::new(&self.text, &self.category)
    }

    /// Check whether this quote belongs to `category` (case-insensitive)
    pub fn in_category(&self, category: &str) -> bool {
        normalize_category(&self.category) == normalize_category(category)
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.category)
    }
}

/// Deduplication identity of a quote
///
/// Text is compared exactly; category is compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuoteKey {
    text: String,
    category: String,
}

impl QuoteKey {
    fn new(text: &str, category: &str) -> Self {
        Self {
            text: text.to_string(),
            category: normalize_category(category),
        }
    }
}

/// Normalize a category for comparison
pub fn normalize_category(category: &str) -> String {
    category.to_lowercase()
}

/// Quotes a fresh store starts with when nothing has been saved yet
pub fn default_quotes() -> Vec<Quote> {
    vec![
        Quote::new("Success is not final, failure is not fatal.", "Motivation"),
        Quote::new("Stay hungry, stay foolish.", "Inspiration"),
    ]
}

/// Distinct categories in first-seen order
///
/// Categories differing only by case are listed once, using the spelling
/// that appeared first.
pub fn categories(quotes: &[Quote]) -> Vec<String> {
    let mut seen = HashSet::new();
    quotes
        .iter()
        .filter(|q| seen.insert(normalize_category(&q.category)))
        .map(|q| q.category.clone())
        .collect()
}

/// Candidate quote collected from user input
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteDraft {
    pub text: String,
    pub category: String,
}

/// Rejected user input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter both quote text and category (missing text)")]
    MissingText,
    #[error("Please enter both quote text and category (missing category)")]
    MissingCategory,
}

impl QuoteDraft {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Validate the draft and build a quote from its trimmed fields
    ///
    /// The draft is left untouched so the caller can show it again for
    /// correction.
    pub fn validate(&self) -> Result<Quote, ValidationError> {
        let text = self.text.trim();
        let category = self.category.trim();

        if text.is_empty() {
            return Err(ValidationError::MissingText);
        }
        if category.is_empty() {
            return Err(ValidationError::MissingCategory);
        }

        Ok(Quote::new(text, category))
    }
}
