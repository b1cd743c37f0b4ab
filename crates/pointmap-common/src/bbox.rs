//! Geographic bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::point::{Point, MAX_LAT, MAX_LON, MIN_LAT, MIN_LON};

/// An axis-aligned geographic bounding box in degrees (EPSG:4326).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// The minimal box covering every point, or `None` for an empty slice.
    pub fn covering(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let seed = Self::new(first.lon(), first.lat(), first.lon(), first.lat());

        Some(rest.iter().fold(seed, |bbox, p| Self {
            min_lon: bbox.min_lon.min(p.lon()),
            min_lat: bbox.min_lat.min(p.lat()),
            max_lon: bbox.max_lon.max(p.lon()),
            max_lat: bbox.max_lat.max(p.lat()),
        }))
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Grow each side by `fraction` of the box's extent along that axis.
    ///
    /// A fraction of 0.15 adds 15% of the width to both the west and east
    /// edges, and 15% of the height to both the south and north edges.
    pub fn padded(&self, fraction: f64) -> Self {
        let dx = self.width() * fraction;
        let dy = self.height() * fraction;
        Self {
            min_lon: self.min_lon - dx,
            min_lat: self.min_lat - dy,
            max_lon: self.max_lon + dx,
            max_lat: self.max_lat + dy,
        }
    }

    /// Clamp the box to the valid longitude/latitude range.
    pub fn clamped_to_world(&self) -> Self {
        Self {
            min_lon: self.min_lon.clamp(MIN_LON, MAX_LON),
            min_lat: self.min_lat.clamp(MIN_LAT, MAX_LAT),
            max_lon: self.max_lon.clamp(MIN_LON, MAX_LON),
            max_lat: self.max_lat.clamp(MIN_LAT, MAX_LAT),
        }
    }

    /// True if the corners are finite, ordered, and inside the world range.
    pub fn is_valid(&self) -> bool {
        let finite = [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
            .iter()
            .all(|v| v.is_finite());

        finite
            && self.min_lon <= self.max_lon
            && self.min_lat <= self.max_lat
            && self.min_lon >= MIN_LON
            && self.max_lon <= MAX_LON
            && self.min_lat >= MIN_LAT
            && self.max_lat <= MAX_LAT
    }

    /// Check if a coordinate is contained within this bbox (edges inclusive).
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        lon >= self.min_lon && lon <= self.max_lon && lat >= self.min_lat && lat <= self.max_lat
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_covering_points() {
        let points = vec![
            Point::new(10.0, 20.0, 1.0).unwrap(),
            Point::new(-5.0, 30.0, 1.0).unwrap(),
            Point::new(2.0, -40.0, 1.0).unwrap(),
        ];
        let bbox = BoundingBox::covering(&points).unwrap();
        assert_eq!(bbox, BoundingBox::new(-40.0, -5.0, 30.0, 10.0));
    }

    #[test]
    fn test_padded_adds_fraction_per_side() {
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 20.0).padded(0.1);
        assert_eq!(bbox.min_lon, -1.0);
        assert_eq!(bbox.max_lon, 11.0);
        assert_eq!(bbox.min_lat, -2.0);
        assert_eq!(bbox.max_lat, 22.0);
    }
}
