use crate::models::RawRecord;

/// Legacy UI field names and their training-time equivalents
const FIELD_RENAMES: &[(&str, &str)] = &[("age", "age_building")];

/// Rename legacy/alternate field names to the canonical names the rest of
/// the pipeline expects. Absent fields are simply not renamed.
pub fn align(record: &RawRecord) -> RawRecord {
    let mut aligned = record.clone();
    for (from, to) in FIELD_RENAMES {
        aligned.rename(from, to);
    }
    aligned
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldValue;

    #[test]
    fn test_age_is_renamed() {
        let record = RawRecord::new().with("age", 20.0).with("roof_type", "metal");
        let aligned = align(&record);

        assert!(!aligned.contains("age"));
        assert_eq!(
            aligned.get("age_building").and_then(FieldValue::as_number),
            Some(20.0)
        );
        assert_eq!(
            aligned.get("roof_type").and_then(|v| v.as_text()),
            Some("metal")
        );
    }

    #[test]
    fn test_canonical_name_passes_through() {
        let record = RawRecord::new().with("age_building", 35.0);
        let aligned = align(&record);

        assert_eq!(
            aligned.get("age_building").and_then(FieldValue::as_number),
            Some(35.0)
        );
    }

    #[test]
    fn test_align_is_pure() {
        let record = RawRecord::new().with("age", 20.0);
        let _ = align(&record);

        // Input record untouched
        assert!(record.contains("age"));
    }
}
