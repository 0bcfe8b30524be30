use crate::error::{AppError, Result};
use crate::models::DamageLevel;
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Trait for classifiers over an assembled feature vector
pub trait Classifier: Send + Sync {
    /// Predict the class index
    fn predict(&self, features: &[f64]) -> Result<usize>;

    /// Predict the per-class probability distribution
    fn predict_proba(&self, features: &[f64]) -> Result<Array1<f64>>;

    /// Width of the feature vector the model was trained on
    fn n_features(&self) -> usize;

    /// Number of output classes
    fn n_classes(&self) -> usize;
}

/// Model provenance recorded with the trained artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Model name
    pub name: String,

    /// Model version
    pub version: String,

    /// Training timestamp
    pub trained_at: chrono::DateTime<chrono::Utc>,

    /// Number of training samples
    pub n_training_samples: usize,
}

/// Multinomial softmax linear model.
///
/// The serialized form is the weight matrix (`n_classes` × `n_features`)
/// and per-class bias the training environment exported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoftmaxModel {
    weights: Array2<f64>,
    bias: Array1<f64>,
    metadata: ModelMetadata,
}

impl SoftmaxModel {
    pub fn new(weights: Array2<f64>, bias: Array1<f64>, metadata: ModelMetadata) -> Result<Self> {
        if weights.nrows() != bias.len() {
            return Err(AppError::SchemaMismatch(format!(
                "model has {} weight rows but {} bias entries",
                weights.nrows(),
                bias.len()
            )));
        }
        if weights.nrows() < 2 {
            return Err(AppError::SchemaMismatch(
                "model must have at least two classes".to_string(),
            ));
        }
        Ok(Self {
            weights,
            bias,
            metadata,
        })
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    fn logits(&self, features: &[f64]) -> Result<Array1<f64>> {
        if features.len() != self.weights.ncols() {
            return Err(AppError::Inference(format!(
                "model expects {} features, got {}",
                self.weights.ncols(),
                features.len()
            )));
        }
        let x = Array1::from_vec(features.to_vec());
        Ok(self.weights.dot(&x) + &self.bias)
    }
}

impl Classifier for SoftmaxModel {
    fn predict(&self, features: &[f64]) -> Result<usize> {
        let proba = self.predict_proba(features)?;
        let (idx, _) = proba
            .iter()
            .enumerate()
            .fold((0, f64::NEG_INFINITY), |(best, max), (i, &p)| {
                if p > max {
                    (i, p)
                } else {
                    (best, max)
                }
            });
        Ok(idx)
    }

    fn predict_proba(&self, features: &[f64]) -> Result<Array1<f64>> {
        let logits = self.logits(features)?;

        // Max-subtracted softmax for numerical stability
        let max = logits.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let exp: Array1<f64> = logits.mapv(|z| (z - max).exp());
        let sum = exp.sum();
        if !sum.is_finite() || sum <= 0.0 {
            return Err(AppError::Inference(
                "softmax normalization produced a degenerate distribution".to_string(),
            ));
        }
        Ok(exp / sum)
    }

    fn n_features(&self) -> usize {
        self.weights.ncols()
    }

    fn n_classes(&self) -> usize {
        self.weights.nrows()
    }
}

/// Decodes a predicted class index into a damage label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelDecoder {
    classes: Vec<String>,
}

impl LabelDecoder {
    pub fn new(classes: Vec<String>) -> Self {
        Self { classes }
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Resolve a class index to its damage label
    pub fn decode(&self, index: usize) -> Result<DamageLevel> {
        let name = self.classes.get(index).ok_or_else(|| {
            AppError::Inference(format!(
                "class index {} out of range for {} classes",
                index,
                self.classes.len()
            ))
        })?;
        DamageLevel::from_str(name)
            .map_err(|_| AppError::Inference(format!("unknown damage label '{}'", name)))
    }
}
