//! Per-record feature extraction

use super::sentiment::SentimentScorer;
use crate::models::{FeatureVector, InteractionRecord};

/// Converts interaction records into fixed-width feature vectors
#[derive(Clone)]
pub struct FeatureExtractor {
    sentiment: SentimentScorer,
}

impl FeatureExtractor {
    pub fn new(sentiment: SentimentScorer) -> Self {
        Self { sentiment }
    }

    pub fn sentiment(&self) -> &SentimentScorer {
        &self.sentiment
    }

    /// One vector per record, in input order
    pub fn extract(&self, records: &[InteractionRecord]) -> Vec<FeatureVector> {
        records.iter().map(|r| self.extract_one(r)).collect()
    }

    pub fn extract_one(&self, record: &InteractionRecord) -> FeatureVector {
        let text = record.text.as_str();
        FeatureVector {
            text_length: text.chars().count() as f64,
            response_time: record.response_time_seconds,
            sentiment: self.sentiment.score(text),
            word_count: text.split_whitespace().count() as f64,
            question_mark_count: text.matches('?').count() as f64,
            exclamation_count: text.matches('!').count() as f64,
        }
    }
}
