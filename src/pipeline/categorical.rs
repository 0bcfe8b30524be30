use crate::models::RawRecord;

/// One-hot encode the categorical fields of a single record.
///
/// Every field outside the numeric column set whose value is string-typed
/// contributes one indicator column named `<field>_<value>` with value 1.
/// Only categories observed in this request are emitted; the training-time
/// drop-first reference category never appears in the final feature schema,
/// so the assembler discards it and its indicator group stays all-zeros.
pub fn encode_categoricals(record: &RawRecord, numeric_columns: &[String]) -> Vec<(String, f64)> {
    record
        .iter()
        .filter(|(field, _)| !numeric_columns.iter().any(|c| c.as_str() == field.as_str()))
        .filter_map(|(field, value)| {
            value
                .as_text()
                .map(|category| (format!("{}_{}", field, category), 1.0))
        })
        .collect()
}
