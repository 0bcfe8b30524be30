//! Earthquake building damage prediction service.
//!
//! A pre-trained multi-class classifier sits behind a small HTTP API: a
//! caller submits building structural attributes and receives a predicted
//! damage category with a confidence-derived certainty bucket. The core of
//! the crate is the preprocessing pipeline that maps raw user-facing
//! fields onto the exact feature vector the model was trained on; see
//! [`pipeline`].

pub mod api;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;

pub use artifacts::{ArtifactBundle, ArtifactStore, FsArtifactStore};
pub use error::{AppError, Result};
pub use models::{Certainty, DamageLevel, FieldValue, Prediction, RawRecord};
pub use pipeline::Predictor;
