use crate::models::{AlignedFeatureVector, EncodedRecord, FeatureSchema};

/// Project an encoded record onto the schema
///
/// Output position `i` holds the value of `schema.columns()[i]`, or 0 when
/// the record did not produce that column. Encoded columns outside the
/// schema are dropped.
pub fn align_to_schema(encoded: &EncodedRecord, schema: &FeatureSchema) -> AlignedFeatureVector {
    let values = schema
        .columns()
        .iter()
        .map(|column| encoded.get(column).unwrap_or(0.0))
        .collect();

    AlignedFeatureVector::from_values(values)
}

/// Encoded columns the schema has no slot for (unseen categories)
pub fn dropped_columns<'a>(encoded: &'a EncodedRecord, schema: &FeatureSchema) -> Vec<&'a str> {
    let mut dropped: Vec<&str> = encoded
        .columns()
        .filter(|column| !schema.contains(column))
        .collect();
    dropped.sort_unstable();
    dropped
}
