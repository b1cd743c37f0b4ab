//! Common raw payloads for pointmap tests.
//!
//! Each fixture is the JSON text an upstream export would produce, so tests
//! exercise the same parsing path as real data.

use serde_json::Value;

/// Parse a fixture string. Fixtures are static and always valid JSON.
pub fn payload(json: &str) -> Value {
    serde_json::from_str(json).expect("fixture must be valid JSON")
}

/// Named-field records.
pub mod objects {
    /// One valid record and one with an impossible latitude.
    pub const ONE_VALID_ONE_BAD_LAT: &str =
        r#"[{"lat": 10, "lon": 20, "count": 3}, {"lat": 999, "lon": 0}]"#;

    /// Three cities with explicit counts.
    pub const CITIES: &str = r#"[
        {"lat": 51.5074, "lon": -0.1278, "count": 12},
        {"lat": 48.8566, "lon": 2.3522, "count": 7},
        {"lat": 40.7128, "lon": -74.0060, "count": 3}
    ]"#;

    /// Aggregated converter output with several weight columns.
    pub const AGGREGATED: &str = r#"[
        {"lat": 52.52, "lon": 13.405, "w_presence": 4.0, "w_engagement": 9.5, "recency": 0.8, "count": 4.0},
        {"lat": 41.902, "lon": 12.496, "w_presence": 1.0, "w_engagement": 2.1, "recency": 0.1, "count": 1.0}
    ]"#;

    /// Numbers encoded as strings, as some CSV-derived exports emit.
    pub const STRING_NUMBERS: &str = r#"[
        {"lat": "10.5", "lon": " 20.25 ", "count": "2"},
        {"lat": "", "lon": "5"},
        {"lat": "nan", "lon": "5"}
    ]"#;
}

/// Positional `[lat, lon, weight?]` records.
pub mod triplets {
    /// One record without a weight, one with.
    pub const DEFAULT_AND_EXPLICIT_WEIGHT: &str = "[[10, 20], [5, 5, 2]]";

    /// The same cities as [`super::objects::CITIES`].
    pub const CITIES: &str = r#"[
        [51.5074, -0.1278, 12],
        [48.8566, 2.3522, 7],
        [40.7128, -74.0060, 3]
    ]"#;

    /// Zero and negative weights.
    pub const NON_POSITIVE_WEIGHTS: &str = "[[1, 1, 0], [2, 2, -3.5]]";

    /// Numbers past the f64 range: an overflowing latitude, weight and longitude.
    pub const OVERFLOWING_NUMBERS: &str =
        r#"[[10, 20, 3], [1e400, 0], [5, 5, 1e400], [0, -1e999, 2]]"#;
}

/// Payloads that are not a list of records.
pub mod malformed {
    pub const OBJECT_ROOT: &str = r#"{"points": [[1, 2]]}"#;
    pub const TRUNCATED: &str = "[[1, 2], [3,";
    pub const NOT_JSON: &str = "<html>502 Bad Gateway</html>";
}
