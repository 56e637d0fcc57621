//! Collaboration scoring
//!
//! Reduces a batch of feature vectors to the four composite collaboration
//! scores. Batch-level arithmetic only: no state, no cross-batch learning.

use super::features::FeatureExtractor;
use crate::models::{clamp_score, CollaborationScores, FeatureVector, InteractionRecord};

/// Points lost per hour of mean response time
const RESPONSE_PENALTY_PER_HOUR: f64 = 10.0;
const SECONDS_PER_HOUR: f64 = 3600.0;
/// Mean word count that earns the full verbosity share of teamwork
const TEAMWORK_WORD_TARGET: f64 = 20.0;
const TEAMWORK_VERBOSITY_WEIGHT: f64 = 50.0;
const TEAMWORK_COMMUNICATION_WEIGHT: f64 = 0.5;

/// Computes composite collaboration scores from feature batches
#[derive(Debug, Clone, Copy, Default)]
pub struct CollaborationScorer;

impl CollaborationScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score a batch
    ///
    /// An empty batch returns [`CollaborationScores::NEUTRAL`] rather than a
    /// computed result.
    pub fn score(&self, features: &[FeatureVector]) -> CollaborationScores {
        if features.is_empty() {
            return CollaborationScores::NEUTRAL;
        }

        let n = features.len() as f64;
        let mean = |column: fn(&FeatureVector) -> f64| features.iter().map(column).sum::<f64>() / n;

        let avg_response_time = mean(|f| f.response_time);
        let response_time = clamp_score(
            100.0 - (avg_response_time / SECONDS_PER_HOUR) * RESPONSE_PENALTY_PER_HOUR,
        );

        let with_questions = features
            .iter()
            .filter(|f| f.question_mark_count > 0.0)
            .count() as f64;
        let helpfulness = clamp_score(with_questions / n * 100.0);

        let avg_sentiment = mean(|f| f.sentiment);
        let communication = clamp_score(50.0 + avg_sentiment * 50.0);

        let avg_word_count = mean(|f| f.word_count);
        let teamwork = clamp_score(
            (avg_word_count / TEAMWORK_WORD_TARGET) * TEAMWORK_VERBOSITY_WEIGHT
                + communication * TEAMWORK_COMMUNICATION_WEIGHT,
        );

        CollaborationScores {
            response_time: sanitize(response_time),
            helpfulness: sanitize(helpfulness),
            communication: sanitize(communication),
            teamwork: sanitize(teamwork),
        }
    }
}

/// `f64::clamp` passes NaN through; a NaN score can only come from NaN
/// inputs and is reported as the neutral midpoint.
fn sanitize(score: f64) -> f64 {
    if score.is_nan() {
        50.0
    } else {
        score
    }
}

/// Feature extraction followed by scoring, for one subject's batch
#[derive(Clone)]
pub struct CollaborationAnalyzer {
    extractor: FeatureExtractor,
    scorer: CollaborationScorer,
}

/// Features plus the scores computed from them
#[derive(Debug, Clone)]
pub struct CollaborationAnalysis {
    pub features: Vec<FeatureVector>,
    pub scores: CollaborationScores,
}

impl CollaborationAnalyzer {
    pub fn new(extractor: FeatureExtractor) -> Self {
        Self {
            extractor,
            scorer: CollaborationScorer::new(),
        }
    }

    pub fn extractor(&self) -> &FeatureExtractor {
        &self.extractor
    }

    pub fn analyze(&self, records: &[InteractionRecord]) -> CollaborationAnalysis {
        let features = self.extractor.extract(records);
        let scores = self.scorer.score(&features);
        CollaborationAnalysis { features, scores }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features(response_time: f64, sentiment: f64, words: f64, questions: f64) -> FeatureVector {
        FeatureVector {
            text_length: words * 5.0,
            response_time,
            sentiment,
            word_count: words,
            question_mark_count: questions,
            exclamation_count: 0.0,
        }
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn assert_in_bounds(scores: &CollaborationScores) {
        for value in [
            scores.response_time,
            scores.helpfulness,
            scores.communication,
            scores.teamwork,
        ] {
            assert!((0.0..=100.0).contains(&value), "out of bounds: {scores:?}");
        }
    }

    #[test]
    fn test_empty_batch_returns_neutral_defaults() {
        let scores = CollaborationScorer::new().score(&[]);
        assert_eq!(scores, CollaborationScores::NEUTRAL);
        assert_eq!(scores.response_time, 50.0);
        assert_eq!(scores.helpfulness, 50.0);
        assert_eq!(scores.communication, 50.0);
        assert_eq!(scores.teamwork, 50.0);
    }

    #[test]
    fn test_formulas() {
        let batch = vec![
            features(1800.0, 0.8, 10.0, 1.0),
            features(5400.0, 0.0, 30.0, 0.0),
        ];
        let scores = CollaborationScorer::new().score(&batch);

        // mean 3600s -> one hour -> 10 point penalty
        assert_close(scores.response_time, 90.0);
        // one of two records asks a question
        assert_close(scores.helpfulness, 50.0);
        // mean sentiment 0.4
        assert_close(scores.communication, 70.0);
        // mean 20 words -> 50, plus 70 * 0.5
        assert_close(scores.teamwork, 85.0);
    }

    #[test]
    fn test_instant_responses_score_full() {
        let scores = CollaborationScorer::new().score(&[features(0.0, 0.0, 4.0, 0.0)]);
        assert_close(scores.response_time, 100.0);
        assert_close(scores.helpfulness, 0.0);
        assert_close(scores.communication, 50.0);
        assert_close(scores.teamwork, 35.0);
    }

    #[test]
    fn test_slow_responses_saturate_at_zero() {
        // 1000 hours
        let scores = CollaborationScorer::new().score(&[features(3_600_000.0, 0.0, 1.0, 0.0)]);
        assert_close(scores.response_time, 0.0);

        let scores = CollaborationScorer::new().score(&[features(1e12, 0.0, 1.0, 0.0)]);
        assert_close(scores.response_time, 0.0);
    }

    #[test]
    fn test_extreme_values_are_clamped() {
        let batch = vec![
            features(0.0, 1.0, 500.0, 7.0),
            features(0.0, 1.0, 900.0, 3.0),
        ];
        let scores = CollaborationScorer::new().score(&batch);
        assert_close(scores.helpfulness, 100.0);
        assert_close(scores.communication, 100.0);
        assert_close(scores.teamwork, 100.0);

        let scores = CollaborationScorer::new().score(&[features(0.0, -1.0, 0.0, 0.0)]);
        assert_close(scores.communication, 0.0);
        assert_close(scores.teamwork, 0.0);
    }

    #[test]
    fn test_scores_always_in_bounds() {
        let scorer = CollaborationScorer::new();
        let samples = [0.0, 1.0, 59.0, 3600.0, 86_400.0, 1e9];
        let sentiments = [-1.0, -0.3, 0.0, 0.6, 1.0];
        for &rt in &samples {
            for &s in &sentiments {
                for words in [0.0, 3.0, 40.0, 1000.0] {
                    let batch = vec![features(rt, s, words, 0.0), features(rt / 2.0, -s, 1.0, 2.0)];
                    assert_in_bounds(&scorer.score(&batch));
                }
            }
        }
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let batch = vec![
            features(120.0, 0.25, 12.0, 1.0),
            features(60.0, -0.5, 3.0, 0.0),
        ];
        let scorer = CollaborationScorer::new();
        assert_eq!(scorer.score(&batch), scorer.score(&batch));
    }
}
