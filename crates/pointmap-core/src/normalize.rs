//! Coercion of untyped upstream records into canonical points.
//!
//! Two record shapes are accepted:
//! - named fields: `{"lat": 10, "lon": 20, "count": 3}`
//! - positional triplets: `[10, 20, 3]`
//!
//! Records whose latitude or longitude is missing, non-numeric, non-finite or
//! out of range are dropped without error. A missing or unusable weight becomes
//! [`DEFAULT_WEIGHT`]; weights are never range-checked.

use pointmap_common::point::DEFAULT_WEIGHT;
use pointmap_common::{CanonicalSet, Point};
use serde_json::Value;
use tracing::debug;

/// Object key holding the weight when none is configured.
pub const DEFAULT_WEIGHT_FIELD: &str = "count";

/// Normalize with the default weight field.
pub fn normalize(raw: &Value) -> CanonicalSet {
    Normalizer::default().normalize(raw)
}

/// Record normalizer, parameterized by the object key used for the weight.
///
/// Upstream exports may carry several weight columns per object (for example
/// `count`, `w_presence`, `w_engagement`); triplets always take position 2.
#[derive(Debug, Clone)]
pub struct Normalizer {
    weight_field: String,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(DEFAULT_WEIGHT_FIELD)
    }
}

impl Normalizer {
    pub fn new(weight_field: impl Into<String>) -> Self {
        Self {
            weight_field: weight_field.into(),
        }
    }

    pub fn weight_field(&self) -> &str {
        &self.weight_field
    }

    /// Normalize a whole payload. Anything other than an array yields an empty set.
    pub fn normalize(&self, raw: &Value) -> CanonicalSet {
        let Some(records) = raw.as_array() else {
            debug!("Payload is not an array, treating as empty");
            return CanonicalSet::empty();
        };

        let set: CanonicalSet = records
            .iter()
            .filter_map(|record| self.normalize_record(record))
            .collect();

        debug!(
            total = records.len(),
            kept = set.len(),
            dropped = records.len() - set.len(),
            weight_field = %self.weight_field,
            "Normalized records"
        );

        set
    }

    /// Normalize a single record, `None` if it must be dropped.
    pub fn normalize_record(&self, record: &Value) -> Option<Point> {
        let (lat, lon, weight) = match record {
            Value::Object(fields) => (
                fields.get("lat"),
                fields.get("lon"),
                fields.get(self.weight_field.as_str()),
            ),
            Value::Array(items) => (items.first(), items.get(1), items.get(2)),
            _ => return None,
        };

        let lat = lat.and_then(coerce_number)?;
        let lon = lon.and_then(coerce_number)?;
        let weight = weight.and_then(coerce_number).unwrap_or(DEFAULT_WEIGHT);

        Point::new(lat, lon, weight)
    }
}

/// Read a JSON number, or a string holding one. Other values are not numbers.
fn coerce_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            s.parse::<f64>().ok()
        }
        _ => None,
    };
    number.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_number_variants() {
        assert_eq!(coerce_number(&json!(3)), Some(3.0));
        assert_eq!(coerce_number(&json!(-2.5)), Some(-2.5));
        assert_eq!(coerce_number(&json!(" 12.25 ")), Some(12.25));
        assert_eq!(coerce_number(&json!("")), None);
        assert_eq!(coerce_number(&json!("nan")), None);
        assert_eq!(coerce_number(&json!("inf")), None);
        assert_eq!(coerce_number(&json!("abc")), None);
        assert_eq!(coerce_number(&json!(null)), None);
        assert_eq!(coerce_number(&json!(true)), None);
    }

    #[test]
    fn test_scalar_record_dropped() {
        assert!(Normalizer::default().normalize_record(&json!(42)).is_none());
        assert!(Normalizer::default().normalize_record(&json!("10,20")).is_none());
    }

    #[test]
    fn test_short_triplet_dropped() {
        assert!(Normalizer::default().normalize_record(&json!([10])).is_none());
        assert!(Normalizer::default().normalize_record(&json!([])).is_none());
    }

    #[test]
    fn test_custom_weight_field() {
        let normalizer = Normalizer::new("w_engagement");
        let p = normalizer
            .normalize_record(&json!({"lat": 1, "lon": 2, "count": 9, "w_engagement": 3.5}))
            .unwrap();
        assert_eq!(p.weight(), 3.5);
    }
}
