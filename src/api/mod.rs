pub mod handlers;
pub mod routes;

pub use routes::*;

use crate::pipeline::Predictor;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub predictor: Arc<Predictor>,

    /// Hold-out accuracy reported alongside predictions
    pub reported_accuracy: f64,
}

impl AppState {
    pub fn new(predictor: Arc<Predictor>, reported_accuracy: f64) -> Self {
        Self {
            predictor,
            reported_accuracy,
        }
    }
}
