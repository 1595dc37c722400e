use crate::models::{EncodedRecord, RawRecord};

/// Column name a categorical value is encoded under, e.g. `Contract_One year`
#[inline]
pub fn one_hot_column(field: &str, value: &str) -> String {
    format!("{}_{}", field, value)
}

/// One-hot encode a record
///
/// Numeric fields keep their own name and value. Each categorical field
/// yields exactly one indicator column `<field>_<value>` set to 1. Indicator
/// columns are written after the numeric ones, so a name collision resolves
/// to the indicator.
pub fn one_hot_encode(raw: &RawRecord) -> EncodedRecord {
    let mut encoded = EncodedRecord::new();

    for (name, value) in raw.numeric_fields() {
        encoded.insert(name.to_string(), value);
    }

    for (field, value) in raw.categorical_fields() {
        encoded.insert(one_hot_column(field, value), 1.0);
    }

    encoded
}
