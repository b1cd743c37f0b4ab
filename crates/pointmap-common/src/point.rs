//! Canonical point types.

use serde::Serialize;

pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;
pub const MIN_LON: f64 = -180.0;
pub const MAX_LON: f64 = 180.0;

/// Weight assigned to a record that carries no usable weight.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// A validated `(lat, lon, weight)` sample.
///
/// Latitude and longitude are finite and inside the world range; the weight is
/// finite but otherwise unchecked, so zero and negative weights are kept as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    lat: f64,
    lon: f64,
    weight: f64,
}

impl Point {
    /// Build a point, returning `None` when the coordinates are non-finite or
    /// out of range. A non-finite weight falls back to [`DEFAULT_WEIGHT`].
    pub fn new(lat: f64, lon: f64, weight: f64) -> Option<Self> {
        if !is_valid_lat_lon(lat, lon) {
            return None;
        }
        let weight = if weight.is_finite() {
            weight
        } else {
            DEFAULT_WEIGHT
        };
        Some(Self { lat, lon, weight })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// The `[lat, lon, weight]` triplet consumed by density renderers.
    pub fn as_triplet(&self) -> [f64; 3] {
        [self.lat, self.lon, self.weight]
    }
}

/// Finite latitude in [-90, 90] and finite longitude in [-180, 180].
pub fn is_valid_lat_lon(lat: f64, lon: f64) -> bool {
    lat.is_finite()
        && lon.is_finite()
        && (MIN_LAT..=MAX_LAT).contains(&lat)
        && (MIN_LON..=MAX_LON).contains(&lon)
}

/// Ordered set of canonical points, in input order minus dropped records.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CanonicalSet(Vec<Point>);

impl CanonicalSet {
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.0.iter()
    }
}

impl FromIterator<Point> for CanonicalSet {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CanonicalSet {
    type Item = &'a Point;
    type IntoIter = std::slice::Iter<'a, Point>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
