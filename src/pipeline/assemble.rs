use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Ordered list of feature names the model was trained on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureSchema(Vec<String>);

impl FeatureSchema {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }
}

/// Merge the numeric and categorical sub-tables and reindex to the final
/// trained feature schema.
///
/// Implemented as an explicit ordered lookup: for each expected column the
/// combined value is copied when present, else 0. Combined columns the
/// schema does not name (e.g. a category unseen during training) are
/// silently dropped. The output is therefore always schema-aligned in
/// name, order, and count.
pub fn assemble(
    numeric: &[(String, f64)],
    categorical: &[(String, f64)],
    schema: &FeatureSchema,
) -> Vec<f64> {
    let combined: BTreeMap<&str, f64> = numeric
        .iter()
        .chain(categorical.iter())
        .map(|(name, value)| (name.as_str(), *value))
        .collect();

    schema
        .names()
        .iter()
        .map(|name| combined.get(name.as_str()).copied().unwrap_or(0.0))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FeatureSchema {
        FeatureSchema::new(vec![
            "age_building".to_string(),
            "count_floors_pre_eq".to_string(),
            "roof_type_metal".to_string(),
            "roof_type_concrete".to_string(),
        ])
    }

    #[test]
    fn test_output_matches_schema_width() {
        let numeric = vec![
            ("age_building".to_string(), 0.5),
            ("count_floors_pre_eq".to_string(), -1.0),
        ];
        let categorical = vec![("roof_type_metal".to_string(), 1.0)];

        let row = assemble(&numeric, &categorical, &schema());

        assert_eq!(row.len(), schema().len());
        assert_eq!(row, vec![0.5, -1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_unseen_category_dropped_silently() {
        let categorical = vec![("roof_type_thatch".to_string(), 1.0)];

        let row = assemble(&[], &categorical, &schema());

        // Unknown column contributes nothing; everything else zero-fills.
        assert_eq!(row, vec![0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_empty_inputs_zero_fill() {
        let row = assemble(&[], &[], &schema());
        assert_eq!(row, vec![0.0; 4]);
    }

    #[test]
    fn test_schema_order_is_authoritative() {
        // Inputs arrive in an arbitrary order; the schema dictates the output.
        let numeric = vec![
            ("count_floors_pre_eq".to_string(), 2.0),
            ("age_building".to_string(), 1.0),
        ];

        let row = assemble(&numeric, &[], &schema());

        assert_eq!(row[0], 1.0);
        assert_eq!(row[1], 2.0);
    }
}
