use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use validator::Validate;

/// One customer's attributes as posted to `/predict`
///
/// Field names on the wire match the training data columns, which is also
/// what the one-hot column names are derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RawRecord {
    #[serde(deserialize_with = "deserialize_tenure")]
    pub tenure: u32,
    #[validate(range(min = 0.0))]
    #[serde(rename = "MonthlyCharges", deserialize_with = "deserialize_charge")]
    pub monthly_charges: f64,
    #[validate(range(min = 0.0))]
    #[serde(rename = "TotalCharges", deserialize_with = "deserialize_charge")]
    pub total_charges: f64,
    #[serde(rename = "InternetService")]
    pub internet_service: String,
    #[serde(rename = "OnlineSecurity")]
    pub online_security: String,
    #[serde(rename = "OnlineBackup")]
    pub online_backup: String,
    #[serde(rename = "TechSupport")]
    pub tech_support: String,
    #[serde(rename = "Contract")]
    pub contract: String,
    #[serde(rename = "PaymentMethod")]
    pub payment_method: String,
}

impl RawRecord {
    /// Numeric fields, keyed by their wire name
    pub fn numeric_fields(&self) -> [(&'static str, f64); 3] {
        [
            ("tenure", f64::from(self.tenure)),
            ("MonthlyCharges", self.monthly_charges),
            ("TotalCharges", self.total_charges),
        ]
    }

    /// Categorical fields, keyed by their wire name
    pub fn categorical_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("InternetService", self.internet_service.as_str()),
            ("OnlineSecurity", self.online_security.as_str()),
            ("OnlineBackup", self.online_backup.as_str()),
            ("TechSupport", self.tech_support.as_str()),
            ("Contract", self.contract.as_str()),
            ("PaymentMethod", self.payment_method.as_str()),
        ]
    }
}

/// Accepts a whole number of months as a JSON number (`12`, `12.0`) or a
/// numeric string (`"12"`). Fractions and negatives are rejected.
fn deserialize_tenure<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(TenureVisitor)
}

/// Accepts a JSON number or a numeric string (`"70.35"`). Sign is left to
/// the validator so negatives surface as a validation failure.
fn deserialize_charge<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(ChargeVisitor)
}

struct TenureVisitor;

impl<'de> Visitor<'de> for TenureVisitor {
    type Value = u32;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a non-negative whole number of months")
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<u32, E> {
        u32::try_from(n).map_err(|_| E::custom(format!("tenure out of range: {}", n)))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<u32, E> {
        u32::try_from(n).map_err(|_| E::invalid_value(Unexpected::Signed(n), &self))
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<u32, E> {
        if f.fract() == 0.0 && f >= 0.0 && f <= f64::from(u32::MAX) {
            Ok(f as u32)
        } else {
            Err(E::invalid_value(Unexpected::Float(f), &self))
        }
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<u32, E> {
        let trimmed = v.trim();
        if let Ok(n) = trimmed.parse::<u64>() {
            return self.visit_u64(n);
        }
        match trimmed.parse::<f64>() {
            Ok(f) if f.is_finite() => self.visit_f64(f),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

struct ChargeVisitor;

impl<'de> Visitor<'de> for ChargeVisitor {
    type Value = f64;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a number or numeric string")
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<f64, E> {
        Ok(n as f64)
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<f64, E> {
        Ok(n as f64)
    }

    fn visit_f64<E: de::Error>(self, f: f64) -> Result<f64, E> {
        Ok(f)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<f64, E> {
        match v.trim().parse::<f64>() {
            Ok(f) if f.is_finite() => Ok(f),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}
