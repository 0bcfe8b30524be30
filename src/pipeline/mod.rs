/// Preprocessing and inference pipeline
///
/// Maps a raw building record onto the exact numeric feature vector the
/// trained classifier expects:
/// - field-name alignment to the training-time schema
/// - numeric imputation and scaling with pre-fitted parameters
/// - per-request one-hot encoding of categorical fields
/// - reindexing to the final trained feature schema
/// - softmax classification with label decoding

pub mod align;
pub mod assemble;
pub mod categorical;
pub mod classifier;
pub mod numeric;
pub mod predictor;

pub use align::align;
pub use assemble::{assemble, FeatureSchema};
pub use categorical::encode_categoricals;
pub use classifier::{Classifier, LabelDecoder, ModelMetadata, SoftmaxModel};
pub use numeric::{MeanImputer, NumericPipeline, StandardScaler};
pub use predictor::Predictor;
