//! Generators for synthetic raw point payloads.
//!
//! All generators are deterministic so assertions can be computed from the
//! same formulas the data was built with.

use serde_json::{json, Value};

/// Coordinates of the `i`-th generated point.
///
/// Latitudes sweep -80..80 and longitudes -170..170, both in range.
pub fn generated_coords(i: usize) -> (f64, f64, f64) {
    let lat = -80.0 + (i % 161) as f64;
    let lon = -170.0 + ((i * 7) % 341) as f64;
    let weight = 1.0 + (i % 5) as f64;
    (lat, lon, weight)
}

/// `count` named-field records.
pub fn object_records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                let (lat, lon, weight) = generated_coords(i);
                json!({"lat": lat, "lon": lon, "count": weight})
            })
            .collect(),
    )
}

/// `count` positional triplet records encoding the same points as
/// [`object_records`].
pub fn triplet_records(count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| {
                let (lat, lon, weight) = generated_coords(i);
                json!([lat, lon, weight])
            })
            .collect(),
    )
}

/// Records that must all be dropped by normalization.
pub fn invalid_records() -> Vec<Value> {
    vec![
        json!({"lat": 90.0001, "lon": 0}),
        json!({"lat": -91, "lon": 0}),
        json!({"lat": 0, "lon": 180.5}),
        json!({"lat": 0, "lon": -181}),
        json!({"lat": "nan", "lon": 0}),
        json!({"lat": 0, "lon": "-inf"}),
        json!({"lat": null, "lon": 0}),
        json!({"lon": 0}),
        json!([95, 10]),
        json!([10]),
        json!("10,20"),
        json!(null),
    ]
}

/// Valid records interleaved with every record from [`invalid_records`].
///
/// Returns the payload and the number of valid records it contains.
pub fn mixed_records(valid: usize) -> (Value, usize) {
    let invalid = invalid_records();
    let mut records = Vec::with_capacity(valid + invalid.len());
    let mut bad = invalid.into_iter();

    for i in 0..valid {
        let (lat, lon, weight) = generated_coords(i);
        records.push(json!({"lat": lat, "lon": lon, "count": weight}));
        if let Some(record) = bad.next() {
            records.push(record);
        }
    }
    records.extend(bad);

    (Value::Array(records), valid)
}
