use crate::api::AppState;
use crate::error::Result;
use crate::models::{Certainty, DamageLevel, RawRecord};
use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use validator::Validate;

/// Health check endpoint
pub async fn health_check() -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Predict the damage category for a building
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>> {
    request.validate()?;

    let record = request.into_record();
    let prediction = state.predictor.predict(&record)?;

    Ok(Json(PredictResponse {
        damage_level: prediction.label,
        confidence: prediction.confidence,
        certainty: prediction.certainty(),
        model_accuracy: state.reported_accuracy,
        probabilities: prediction.probabilities,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct PredictRequest {
    /// Building age in years
    #[validate(range(min = 0.0, max = 200.0))]
    pub age: f64,

    /// Number of floors before the earthquake
    #[validate(range(min = 1.0, max = 10.0))]
    pub count_floors_pre_eq: f64,

    #[validate(length(min = 1))]
    pub foundation_type: String,

    #[validate(length(min = 1))]
    pub roof_type: String,

    #[validate(length(min = 1))]
    pub ground_floor_type: String,

    #[validate(length(min = 1))]
    pub position: String,

    #[validate(length(min = 1))]
    pub land_surface_condition: String,
}

impl PredictRequest {
    /// Lower the typed request into the raw key/value record the pipeline
    /// consumes. Field names match the UI-facing schema; the aligner maps
    /// them onto the training-time names.
    pub fn into_record(self) -> RawRecord {
        RawRecord::new()
            .with("age", self.age)
            .with("count_floors_pre_eq", self.count_floors_pre_eq)
            .with("foundation_type", self.foundation_type)
            .with("roof_type", self.roof_type)
            .with("ground_floor_type", self.ground_floor_type)
            .with("position", self.position)
            .with("land_surface_condition", self.land_surface_condition)
    }
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub damage_level: DamageLevel,
    pub confidence: f64,
    pub certainty: Certainty,
    pub model_accuracy: f64,
    pub probabilities: BTreeMap<String, f64>,
}

/// Minimal form page posting to the predict endpoint
pub async fn index() -> Html<&'static str> {
    Html(FORM_PAGE)
}

const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <title>Earthquake Building Damage Prediction</title>
</head>
<body>
  <h1>Earthquake Building Damage Prediction</h1>
  <p>Provide the building details for prediction.</p>
  <form id="predict-form">
    <fieldset>
      <legend>Structural Features</legend>
      <label>Building Age (years) <input name="age" type="number" min="0" max="200" value="20"></label>
      <label>Number of Floors <input name="count_floors_pre_eq" type="number" min="1" max="10" value="2"></label>
    </fieldset>
    <fieldset>
      <legend>Construction Details</legend>
      <label>Foundation Type
        <select name="foundation_type"><option>mud</option><option>cement</option><option>other</option></select>
      </label>
      <label>Roof Type
        <select name="roof_type"><option>bamboo</option><option>metal</option><option>concrete</option><option>other</option></select>
      </label>
      <label>Ground Floor Type
        <select name="ground_floor_type"><option>mud</option><option>cement</option><option>other</option></select>
      </label>
    </fieldset>
    <fieldset>
      <legend>Position &amp; Land</legend>
      <label>Building Position
        <select name="position"><option>attached</option><option>not_attached</option></select>
      </label>
      <label>Land Surface Condition
        <select name="land_surface_condition"><option>flat</option><option>slope</option><option>other</option></select>
      </label>
    </fieldset>
    <button type="submit">Predict</button>
  </form>
  <div id="result"></div>
  <script>
    document.getElementById('predict-form').addEventListener('submit', async (e) => {
      e.preventDefault();
      const data = Object.fromEntries(new FormData(e.target));
      data.age = Number(data.age);
      data.count_floors_pre_eq = Number(data.count_floors_pre_eq);
      const res = await fetch('/v1/predict', {
        method: 'POST',
        headers: {'Content-Type': 'application/json'},
        body: JSON.stringify(data),
      });
      const out = await res.json();
      const el = document.getElementById('result');
      if (!res.ok) {
        el.textContent = 'Prediction failed.';
        return;
      }
      el.innerHTML = '<h2>Prediction Result</h2>'
        + '<p>Predicted Damage Level: <strong>' + out.damage_level.toUpperCase() + '</strong></p>'
        + '<p>Model Certainty: ' + out.certainty + '</p>'
        + '<p>Overall Model Accuracy: ' + Math.round(out.model_accuracy * 100) + '%</p>'
        + '<p>Raw prediction confidence: ' + (out.confidence * 100).toFixed(2) + '%</p>';
    });
  </script>
  <hr>
  <small>All predictions are based on model estimation. Use as a guide, not a definitive assessment.</small>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{build_router, AppState};
    use crate::artifacts::ArtifactBundle;
    use crate::pipeline::{
        FeatureSchema, LabelDecoder, MeanImputer, ModelMetadata, Predictor, SoftmaxModel,
        StandardScaler,
    };
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use ndarray::{array, Array2};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn test_state() -> AppState {
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
            array![0.0, 0.3, 0.0],
            ModelMetadata {
                name: "softmax".to_string(),
                version: "1.0".to_string(),
                trained_at: chrono::Utc::now(),
                n_training_samples: 100,
            },
        )
        .unwrap();
        let labels = LabelDecoder::new(vec![
            "low".to_string(),
            "medium".to_string(),
            "high".to_string(),
        ]);
        let bundle =
            Arc::new(ArtifactBundle::new(imputer, scaler, schema, model, labels).unwrap());
        AppState::new(Arc::new(Predictor::new(bundle)), 0.76)
    }

    fn predict_body() -> String {
        serde_json::json!({
            "age": 20,
            "count_floors_pre_eq": 2,
            "foundation_type": "cement",
            "roof_type": "metal",
            "ground_floor_type": "cement",
            "position": "attached",
            "land_surface_condition": "flat"
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_predict_endpoint() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::post("/v1/predict")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(predict_body()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        let confidence = body["confidence"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&confidence));
        assert_eq!(body["model_accuracy"].as_f64().unwrap(), 0.76);
        assert!(body["probabilities"].as_object().unwrap().len() == 3);
    }

    #[tokio::test]
    async fn test_predict_rejects_out_of_range_age() {
        let app = build_router(test_state());
        let body = serde_json::json!({
            "age": 900,
            "count_floors_pre_eq": 2,
            "foundation_type": "cement",
            "roof_type": "metal",
            "ground_floor_type": "cement",
            "position": "attached",
            "land_surface_condition": "flat"
        });

        let response = app
            .oneshot(
                Request::post("/v1/predict")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_index_serves_form() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("predict-form"));
    }

    #[test]
    fn test_request_lowers_to_record() {
        let request = PredictRequest {
            age: 20.0,
            count_floors_pre_eq: 2.0,
            foundation_type: "cement".to_string(),
            roof_type: "metal".to_string(),
            ground_floor_type: "cement".to_string(),
            position: "attached".to_string(),
            land_surface_condition: "flat".to_string(),
        };

        let record = request.into_record();

        assert_eq!(record.len(), 7);
        assert!(record.contains("age"));
        assert_eq!(
            record.get("roof_type").and_then(|v| v.as_text()),
            Some("metal")
        );
    }
}
