//! Performance prediction
//!
//! Two predictor strategies behind one trait, chosen at construction:
//! - [`RuleBasedPredictor`]: fixed bonus arithmetic, used when no model is trained
//! - [`TrainedPredictor`]: a [`LinearRegressor`] fitted on historical snapshots
//!
//! Both clamp to [0, 100].

use crate::models::{clamp_score, PerformanceSnapshot};
use pragati_common::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

const BASE_SCORE: f64 = 50.0;
const TASK_BONUS_PER_TASK: f64 = 2.0;
const TASK_BONUS_CAP: f64 = 30.0;
const POINTS_PER_BONUS_POINT: f64 = 50.0;
const POINTS_BONUS_CAP: f64 = 20.0;
const COLLABORATION_WEIGHT: f64 = 0.3;

/// Strategy interface for performance prediction
pub trait PerformancePredictor: Send + Sync {
    /// Predicted score in [0, 100]
    fn predict(&self, snapshot: &PerformanceSnapshot) -> f64;

    /// Short mode name for logs and diagnostics
    fn mode(&self) -> &'static str;
}

/// Deterministic fallback used when no trained model is available
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedPredictor;

impl PerformancePredictor for RuleBasedPredictor {
    fn predict(&self, snapshot: &PerformanceSnapshot) -> f64 {
        let tasks_bonus =
            (f64::from(snapshot.tasks_completed) * TASK_BONUS_PER_TASK).min(TASK_BONUS_CAP);
        let points_bonus =
            (f64::from(snapshot.achievement_points) / POINTS_PER_BONUS_POINT).min(POINTS_BONUS_CAP);
        let collaboration_bonus = snapshot.collaboration_score * COLLABORATION_WEIGHT;

        let score = clamp_score(BASE_SCORE + tasks_bonus + points_bonus + collaboration_bonus);
        if score.is_nan() {
            BASE_SCORE
        } else {
            score
        }
    }

    fn mode(&self) -> &'static str {
        "rule-based"
    }
}

/// Predictor backed by a fitted regression model
#[derive(Debug, Clone)]
pub struct TrainedPredictor {
    model: LinearRegressor,
    fallback: RuleBasedPredictor,
}

impl TrainedPredictor {
    pub fn new(model: LinearRegressor) -> Self {
        Self {
            model,
            fallback: RuleBasedPredictor,
        }
    }

    pub fn model(&self) -> &LinearRegressor {
        &self.model
    }
}

impl PerformancePredictor for TrainedPredictor {
    fn predict(&self, snapshot: &PerformanceSnapshot) -> f64 {
        let raw = self.model.predict(&snapshot.features());
        if !raw.is_finite() {
            warn!("Model produced non-finite prediction ({raw}), using rule-based score");
            return self.fallback.predict(snapshot);
        }
        clamp_score(raw)
    }

    fn mode(&self) -> &'static str {
        "trained"
    }
}

/// Load a trained predictor if a model path is configured
///
/// A missing or unreadable model is not fatal: the rule-based predictor is
/// returned and the reason logged.
pub fn load_predictor(model_path: Option<&Path>) -> Box<dyn PerformancePredictor> {
    let Some(path) = model_path else {
        info!("No model path configured, using rule-based performance predictor");
        return Box::new(RuleBasedPredictor);
    };

    match LinearRegressor::load(path) {
        Ok(model) => {
            info!(
                "Loaded performance model from {} (trained on {} samples)",
                path.display(),
                model.trained_samples
            );
            Box::new(TrainedPredictor::new(model))
        }
        Err(e) => {
            warn!(
                "Could not load performance model from {}: {}. Using rule-based predictor",
                path.display(),
                e
            );
            Box::new(RuleBasedPredictor)
        }
    }
}

/// Direction of a predicted score relative to current metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    Declining,
    Stable,
}

/// Fraction of snapshot fields that are nonzero, as a percentage
pub fn data_confidence(snapshot: &PerformanceSnapshot) -> f64 {
    let features = snapshot.features();
    let present = features.iter().filter(|v| **v != 0.0).count();
    present as f64 / features.len() as f64 * 100.0
}

/// Compare a prediction against a rough current-performance average
pub fn trend(predicted: f64, snapshot: &PerformanceSnapshot) -> Trend {
    let current_avg = (f64::from(snapshot.tasks_completed) * 2.0
        + snapshot.collaboration_score
        + snapshot.code_quality_score)
        / 4.0;

    if predicted > current_avg {
        Trend::Improving
    } else if predicted < current_avg {
        Trend::Declining
    } else {
        Trend::Stable
    }
}

/// Gradient descent settings for [`LinearRegressor::fit`]
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    pub learning_rate: f64,
    pub epochs: usize,
}

impl Default for FitOptions {
    fn default() -> Self {
        Self {
            learning_rate: 0.05,
            epochs: 2000,
        }
    }
}

/// Linear regression over standardized snapshot features
///
/// Features are standardized with the training means and standard
/// deviations, which are stored with the weights so a loaded model scales
/// inputs the same way it was trained.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub means: [f64; PerformanceSnapshot::WIDTH],
    pub scales: [f64; PerformanceSnapshot::WIDTH],
    pub weights: [f64; PerformanceSnapshot::WIDTH],
    pub bias: f64,
    #[serde(default)]
    pub trained_samples: usize,
}

type Row = [f64; PerformanceSnapshot::WIDTH];

impl LinearRegressor {
    /// Fit by batch gradient descent on mean squared error
    pub fn fit(samples: &[Row], targets: &[f64], options: FitOptions) -> Result<Self> {
        if samples.is_empty() {
            return Err(Error::Model("cannot fit on an empty training set".to_string()));
        }
        if samples.len() != targets.len() {
            return Err(Error::Model(format!(
                "{} samples but {} targets",
                samples.len(),
                targets.len()
            )));
        }
        if samples.iter().flatten().chain(targets).any(|v| !v.is_finite()) {
            return Err(Error::Model("training data contains non-finite values".to_string()));
        }

        let n = samples.len() as f64;
        let mut means = [0.0; PerformanceSnapshot::WIDTH];
        let mut scales = [1.0; PerformanceSnapshot::WIDTH];
        for col in 0..PerformanceSnapshot::WIDTH {
            let mean = samples.iter().map(|r| r[col]).sum::<f64>() / n;
            let variance = samples.iter().map(|r| (r[col] - mean).powi(2)).sum::<f64>() / n;
            means[col] = mean;
            // constant columns keep unit scale so they standardize to zero
            if variance > f64::EPSILON {
                scales[col] = variance.sqrt();
            }
        }

        let standardized: Vec<Row> = samples
            .iter()
            .map(|row| {
                let mut z = [0.0; PerformanceSnapshot::WIDTH];
                for col in 0..PerformanceSnapshot::WIDTH {
                    z[col] = (row[col] - means[col]) / scales[col];
                }
                z
            })
            .collect();

        let mut weights = [0.0; PerformanceSnapshot::WIDTH];
        let mut bias = targets.iter().sum::<f64>() / n;

        for _ in 0..options.epochs {
            let mut grad_w = [0.0; PerformanceSnapshot::WIDTH];
            let mut grad_b = 0.0;
            for (z, target) in standardized.iter().zip(targets) {
                let error = dot(&weights, z) + bias - target;
                for col in 0..PerformanceSnapshot::WIDTH {
                    grad_w[col] += error * z[col];
                }
                grad_b += error;
            }
            for col in 0..PerformanceSnapshot::WIDTH {
                weights[col] -= options.learning_rate * grad_w[col] / n;
            }
            bias -= options.learning_rate * grad_b / n;
        }

        if !weights.iter().all(|w| w.is_finite()) || !bias.is_finite() {
            return Err(Error::Model(
                "training diverged; lower the learning rate".to_string(),
            ));
        }

        Ok(Self {
            means,
            scales,
            weights,
            bias,
            trained_samples: samples.len(),
        })
    }

    pub fn predict(&self, row: &Row) -> f64 {
        let mut z = [0.0; PerformanceSnapshot::WIDTH];
        for col in 0..PerformanceSnapshot::WIDTH {
            z[col] = (row[col] - self.means[col]) / self.scales[col];
        }
        dot(&self.weights, &z) + self.bias
    }

    /// Write the model as JSON, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let model: LinearRegressor = serde_json::from_str(&content)?;
        if model.scales.iter().any(|s| *s == 0.0 || !s.is_finite()) {
            return Err(Error::Model(format!(
                "model at {} has invalid feature scales",
                path.display()
            )));
        }
        Ok(model)
    }
}

/// Labelled snapshot used for training
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingSample {
    #[serde(flatten)]
    pub snapshot: PerformanceSnapshot,
    /// Observed performance score
    pub score: f64,
}

/// Read a JSON array of [`TrainingSample`]s
pub fn load_training_samples(path: &Path) -> Result<Vec<TrainingSample>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Fit a model directly from labelled snapshots
pub fn fit_samples(samples: &[TrainingSample], options: FitOptions) -> Result<LinearRegressor> {
    let rows: Vec<Row> = samples.iter().map(|s| s.snapshot.features()).collect();
    let targets: Vec<f64> = samples.iter().map(|s| s.score).collect();
    LinearRegressor::fit(&rows, &targets, options)
}

fn dot(a: &Row, b: &Row) -> f64 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}
