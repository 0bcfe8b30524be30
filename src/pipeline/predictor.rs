use crate::artifacts::ArtifactBundle;
use crate::error::Result;
use crate::models::{Prediction, RawRecord};
use crate::pipeline::{align, assemble, encode_categoricals, Classifier, NumericPipeline};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Runs the full preprocessing/inference pipeline for one record.
///
/// Stateless request/response: artifacts are an immutable shared bundle
/// and each call is independent, so identical inputs yield identical
/// predictions.
#[derive(Debug, Clone)]
pub struct Predictor {
    bundle: Arc<ArtifactBundle>,
}

impl Predictor {
    pub fn new(bundle: Arc<ArtifactBundle>) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &ArtifactBundle {
        &self.bundle
    }

    /// Predict the damage category for one raw input record.
    pub fn predict(&self, record: &RawRecord) -> Result<Prediction> {
        let aligned = align(record);

        let numeric =
            NumericPipeline::new(&self.bundle.imputer, &self.bundle.scaler).transform(&aligned)?;
        let categorical = encode_categoricals(&aligned, self.bundle.imputer.columns());
        let features = assemble(&numeric, &categorical, &self.bundle.feature_schema);

        let proba = self.bundle.model.predict_proba(&features)?;
        let class_index = self.bundle.model.predict(&features)?;
        let label = self.bundle.labels.decode(class_index)?;
        let confidence = proba[class_index];

        let probabilities: BTreeMap<String, f64> = self
            .bundle
            .labels
            .classes()
            .iter()
            .zip(proba.iter())
            .map(|(class, &p)| (class.clone(), p))
            .collect();

        debug!(
            label = %label,
            confidence = confidence,
            n_features = features.len(),
            "Prediction computed"
        );

        Ok(Prediction::new(label, confidence).with_probabilities(probabilities))
    }
}
