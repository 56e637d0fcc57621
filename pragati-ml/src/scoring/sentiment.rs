//! Sentiment scoring
//!
//! A [`TextClassifier`] labels text with a polarity and confidence. The
//! [`SentimentScorer`] turns that into a signed scalar in [-1, 1] and
//! absorbs every classifier failure as a neutral 0.0.

use aho_corasick::{AhoCorasick, MatchKind};
use pragati_common::{Error, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Score above which text is labelled positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Score below which text is labelled negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarity {
    Positive,
    Negative,
    Neutral,
}

impl Polarity {
    /// Label a signed sentiment score
    pub fn from_score(score: f64) -> Self {
        if score > POSITIVE_THRESHOLD {
            Polarity::Positive
        } else if score < NEGATIVE_THRESHOLD {
            Polarity::Negative
        } else {
            Polarity::Neutral
        }
    }
}

/// Classifier output
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub polarity: Polarity,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

/// Pluggable text-classification capability
///
/// Constructed once per process and shared read-only.
pub trait TextClassifier: Send + Sync {
    fn classify(&self, text: &str) -> Result<Classification>;

    /// Identifier for logs
    fn name(&self) -> &str;
}

/// Maps text to a polarity scalar in [-1, 1]
#[derive(Clone)]
pub struct SentimentScorer {
    classifier: Arc<dyn TextClassifier>,
}

impl SentimentScorer {
    pub fn new(classifier: Arc<dyn TextClassifier>) -> Self {
        Self { classifier }
    }

    pub fn classifier_name(&self) -> &str {
        self.classifier.name()
    }

    /// Signed sentiment for `text`. Never fails: empty text and classifier
    /// errors both score 0.0.
    pub fn score(&self, text: &str) -> f64 {
        if text.trim().is_empty() {
            return 0.0;
        }

        match self.classifier.classify(text) {
            Ok(Classification {
                polarity,
                confidence,
            }) => {
                // NaN confidence counts as no signal
                let confidence = if confidence.is_nan() {
                    0.0
                } else {
                    confidence.clamp(0.0, 1.0)
                };
                match polarity {
                    Polarity::Positive => confidence,
                    Polarity::Negative => -confidence,
                    Polarity::Neutral => 0.0,
                }
            }
            Err(e) => {
                debug!(
                    "Classifier '{}' failed, scoring as neutral: {}",
                    self.classifier.name(),
                    e
                );
                0.0
            }
        }
    }
}

const POSITIVE_WORDS: &[&str] = &[
    "good", "great", "excellent", "love", "amazing", "wonderful", "happy", "fantastic",
    "awesome", "best", "thanks", "thank you", "appreciate", "helpful", "nice", "perfect",
    "glad", "well done", "brilliant", "congrats",
];

const NEGATIVE_WORDS: &[&str] = &[
    "bad", "terrible", "awful", "hate", "horrible", "worst", "sad", "angry",
    "disappointed", "poor", "broken", "annoying", "frustrated", "useless", "wrong",
    "blocked", "fail", "failed", "problem", "unfortunately",
];

/// Lexicon classifier used when no external model is configured
///
/// Counts whole-word hits against small positive and negative word lists.
pub struct LexiconClassifier {
    matcher: AhoCorasick,
    /// Patterns `0..positive_count` are positive, the rest negative
    positive_count: usize,
}

impl LexiconClassifier {
    pub fn new() -> Result<Self> {
        Self::with_lexicon(POSITIVE_WORDS, NEGATIVE_WORDS)
    }

    pub fn with_lexicon(positive: &[&str], negative: &[&str]) -> Result<Self> {
        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(positive.iter().chain(negative.iter()))
            .map_err(|e| Error::Model(format!("Failed to build sentiment lexicon: {e}")))?;

        Ok(Self {
            matcher,
            positive_count: positive.len(),
        })
    }

    fn is_word_boundary(text: &str, start: usize, end: usize) -> bool {
        let before = text[..start].chars().next_back();
        let after = text[end..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    }
}

impl TextClassifier for LexiconClassifier {
    fn classify(&self, text: &str) -> Result<Classification> {
        let (mut positive, mut negative) = (0usize, 0usize);
        for m in self.matcher.find_iter(text) {
            if !Self::is_word_boundary(text, m.start(), m.end()) {
                continue;
            }
            if m.pattern().as_usize() < self.positive_count {
                positive += 1;
            } else {
                negative += 1;
            }
        }

        let hits = positive + negative;
        if hits == 0 || positive == negative {
            return Ok(Classification {
                polarity: Polarity::Neutral,
                confidence: 1.0,
            });
        }

        let hits = hits as f64;
        let margin = positive.abs_diff(negative) as f64 / hits;
        let confidence = 0.5 + 0.5 * margin * (hits / (hits + 1.0));
        let polarity = if positive > negative {
            Polarity::Positive
        } else {
            Polarity::Negative
        };

        Ok(Classification {
            polarity,
            confidence,
        })
    }

    fn name(&self) -> &str {
        "lexicon"
    }
}
