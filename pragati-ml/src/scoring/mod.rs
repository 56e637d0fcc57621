//! Scoring engine
//!
//! Data flows leaves-first: interaction records are turned into feature
//! vectors (sentiment included), reduced to collaboration scores, and fed
//! together with performance snapshots into prediction and recommendations.

pub mod collaboration;
pub mod features;
pub mod performance;
pub mod sentiment;
pub mod skills;

pub use collaboration::{CollaborationAnalysis, CollaborationAnalyzer, CollaborationScorer};
pub use features::FeatureExtractor;
pub use performance::{
    data_confidence, fit_samples, load_predictor, load_training_samples, trend, FitOptions,
    LinearRegressor, PerformancePredictor, RuleBasedPredictor, TrainedPredictor, TrainingSample,
    Trend,
};
pub use sentiment::{Classification, LexiconClassifier, Polarity, SentimentScorer, TextClassifier};
pub use skills::{assess_skills, SkillsAssessment};
