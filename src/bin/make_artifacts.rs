//! Writes a self-consistent demo artifact set so the server can run
//! end-to-end without the original training environment.
//!
//! Usage: `make-artifacts [output-dir]` (defaults to ./data/artifacts)

use ndarray::{array, Array2};
use quake_damage_predictor::pipeline::{
    LabelDecoder, MeanImputer, ModelMetadata, SoftmaxModel, StandardScaler,
};
use std::path::PathBuf;

fn feature_names() -> Vec<String> {
    // Numeric columns first, then the one-hot columns training-time
    // drop-first encoding kept (reference categories: cement foundation,
    // bamboo roof, cement ground floor, attached position, flat land).
    [
        "age_building",
        "count_floors_pre_eq",
        "foundation_type_mud",
        "foundation_type_other",
        "roof_type_concrete",
        "roof_type_metal",
        "roof_type_other",
        "ground_floor_type_mud",
        "ground_floor_type_other",
        "position_not_attached",
        "land_surface_condition_other",
        "land_surface_condition_slope",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn demo_model() -> anyhow::Result<SoftmaxModel> {
    // Hand-set weights: older buildings, mud construction, and sloped land
    // push toward higher damage; concrete/metal construction pulls down.
    let weights: Array2<f64> = array![
        // low
        [-0.6, -0.3, -0.8, -0.2, 0.9, 0.6, -0.1, -0.7, -0.2, -0.1, -0.2, -0.5],
        // medium
        [0.1, 0.1, 0.2, 0.1, -0.2, -0.1, 0.1, 0.2, 0.1, 0.1, 0.1, 0.1],
        // high
        [0.5, 0.2, 0.6, 0.1, -0.7, -0.5, 0.0, 0.5, 0.1, 0.0, 0.1, 0.4],
    ];
    let bias = array![0.1, 0.2, -0.3];
    let metadata = ModelMetadata {
        name: "softmax-demo".to_string(),
        version: "1.0".to_string(),
        trained_at: chrono::Utc::now(),
        n_training_samples: 26_000,
    };
    Ok(SoftmaxModel::new(weights, bias, metadata)?)
}

fn main() -> anyhow::Result<()> {
    let out_dir: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "./data/artifacts".to_string())
        .into();
    std::fs::create_dir_all(&out_dir)?;

    let numeric_columns = vec!["age_building".to_string(), "count_floors_pre_eq".to_string()];

    let imputer = MeanImputer::new(numeric_columns.clone(), vec![26.0, 2.1])?;
    let scaler = StandardScaler::new(numeric_columns, vec![26.0, 2.1], vec![18.5, 0.9])?;
    let features = feature_names();
    let model = demo_model()?;
    let labels = LabelDecoder::new(vec![
        "low".to_string(),
        "medium".to_string(),
        "high".to_string(),
    ]);

    let files: Vec<(&str, Vec<u8>)> = vec![
        ("num_imputer.json", serde_json::to_vec_pretty(&imputer)?),
        ("scaler.json", serde_json::to_vec_pretty(&scaler)?),
        ("features.json", serde_json::to_vec_pretty(&features)?),
        ("model.json", serde_json::to_vec_pretty(&model)?),
        ("label_encoder.json", serde_json::to_vec_pretty(&labels)?),
    ];

    for (name, bytes) in files {
        let path = out_dir.join(name);
        std::fs::write(&path, bytes)?;
        println!("wrote {}", path.display());
    }

    Ok(())
}
