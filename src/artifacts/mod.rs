/// Artifact loading
///
/// The training environment exports five serialized objects: numeric
/// imputer, numeric scaler, final feature-name list, trained classifier,
/// and label decoder. They are loaded once at startup into an immutable
/// bundle shared by reference across requests; the pipeline never touches
/// storage per call.

pub mod store;

pub use store::{load_artifact, ArtifactStore, FsArtifactStore};

use crate::config::ArtifactsConfig;
use crate::error::{AppError, Result};
use crate::pipeline::{
    Classifier, FeatureSchema, LabelDecoder, MeanImputer, SoftmaxModel, StandardScaler,
};
use tracing::info;

/// Immutable set of pre-fitted artifacts the pipeline runs against
#[derive(Debug, Clone)]
pub struct ArtifactBundle {
    pub imputer: MeanImputer,
    pub scaler: StandardScaler,
    pub feature_schema: FeatureSchema,
    pub model: SoftmaxModel,
    pub labels: LabelDecoder,
}

impl ArtifactBundle {
    /// Assemble a bundle, cross-checking that the artifacts agree on shape.
    pub fn new(
        imputer: MeanImputer,
        scaler: StandardScaler,
        feature_schema: FeatureSchema,
        model: SoftmaxModel,
        labels: LabelDecoder,
    ) -> Result<Self> {
        if imputer.columns() != scaler.columns() {
            return Err(AppError::SchemaMismatch(
                "imputer and scaler were fitted on different column sets".to_string(),
            ));
        }
        if model.n_features() != feature_schema.len() {
            return Err(AppError::SchemaMismatch(format!(
                "model expects {} features but the schema lists {}",
                model.n_features(),
                feature_schema.len()
            )));
        }
        if model.n_classes() != labels.len() {
            return Err(AppError::SchemaMismatch(format!(
                "model has {} classes but the decoder lists {}",
                model.n_classes(),
                labels.len()
            )));
        }
        for col in imputer.columns() {
            if !feature_schema.contains(col) {
                return Err(AppError::SchemaMismatch(format!(
                    "numeric column '{}' missing from the feature schema",
                    col
                )));
            }
        }
        Ok(Self {
            imputer,
            scaler,
            feature_schema,
            model,
            labels,
        })
    }

    /// Load every artifact from a store and assemble the bundle
    pub fn load(store: &dyn ArtifactStore, config: &ArtifactsConfig) -> Result<Self> {
        let imputer: MeanImputer = load_artifact(store, &config.imputer_file)?;
        let scaler: StandardScaler = load_artifact(store, &config.scaler_file)?;
        let feature_names: Vec<String> = load_artifact(store, &config.features_file)?;
        let model: SoftmaxModel = load_artifact(store, &config.model_file)?;
        let labels: LabelDecoder = load_artifact(store, &config.labels_file)?;

        let bundle = Self::new(
            imputer,
            scaler,
            FeatureSchema::new(feature_names),
            model,
            labels,
        )?;

        info!(
            n_features = bundle.feature_schema.len(),
            n_classes = bundle.labels.len(),
            model = %bundle.model.metadata().name,
            version = %bundle.model.metadata().version,
            "Artifact bundle loaded"
        );

        Ok(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ModelMetadata;
    use ndarray::{array, Array2};

    fn metadata() -> ModelMetadata {
        ModelMetadata {
            name: "softmax".to_string(),
            version: "1.0".to_string(),
            trained_at: chrono::Utc::now(),
            n_training_samples: 100,
        }
    }

    fn parts() -> (MeanImputer, StandardScaler, FeatureSchema, SoftmaxModel, LabelDecoder) {
        let cols = vec!["age_building".to_string(), "count_floors_pre_eq".to_string()];
        let imputer = MeanImputer::new(cols.clone(), vec![25.0, 2.0]).unwrap();
        let scaler = StandardScaler::new(cols, vec![25.0, 2.0], vec![10.0, 1.0]).unwrap();
        let schema = FeatureSchema::new(vec![
            "age_building".to_string(),
            "count_floors_pre_eq".to_string(),
            "roof_type_metal".to_string(),
        ]);
        let model = SoftmaxModel::new(
            Array2::zeros((3, 3)),
            array![0.0, 0.0, 0.0],
            metadata(),
        )
        .unwrap();
        let labels = LabelDecoder::new(vec![
            "low".to_string(),
            "medium".to_string(),
            "high".to_string(),
        ]);
        (imputer, scaler, schema, model, labels)
    }

    #[test]
    fn test_consistent_bundle_accepted() {
        let (imputer, scaler, schema, model, labels) = parts();
        assert!(ArtifactBundle::new(imputer, scaler, schema, model, labels).is_ok());
    }

    #[test]
    fn test_model_width_mismatch_rejected() {
        let (imputer, scaler, _, model, labels) = parts();
        let narrow = FeatureSchema::new(vec![
            "age_building".to_string(),
            "count_floors_pre_eq".to_string(),
        ]);
        let err = ArtifactBundle::new(imputer, scaler, narrow, model, labels).unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch(_)));
    }

    #[test]
    fn test_class_count_mismatch_rejected() {
        let (imputer, scaler, schema, model, _) = parts();
        let labels = LabelDecoder::new(vec!["low".to_string()]);
        let err = ArtifactBundle::new(imputer, scaler, schema, model, labels).unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch(_)));
    }

    #[test]
    fn test_numeric_column_must_be_in_schema() {
        let (imputer, scaler, _, model, labels) = parts();
        let schema = FeatureSchema::new(vec![
            "age_building".to_string(),
            "roof_type_metal".to_string(),
            "roof_type_concrete".to_string(),
        ]);
        let err = ArtifactBundle::new(imputer, scaler, schema, model, labels).unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch(_)));
    }
}
