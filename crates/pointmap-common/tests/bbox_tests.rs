//! Comprehensive tests for BoundingBox operations.

use pointmap_common::bbox::BoundingBox;
use pointmap_common::Point;

fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
    coords
        .iter()
        .map(|&(lat, lon)| Point::new(lat, lon, 1.0).unwrap())
        .collect()
}

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_lon, -180.0);
    assert_eq!(bbox.min_lat, -90.0);
    assert_eq!(bbox.max_lon, 180.0);
    assert_eq!(bbox.max_lat, 90.0);
}

#[test]
fn test_bbox_copy() {
    let bbox1 = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let bbox2 = bbox1;
    assert_eq!(bbox1, bbox2);
}

// ============================================================================
// covering tests
// ============================================================================

#[test]
fn test_covering_empty_is_none() {
    assert!(BoundingBox::covering(&[]).is_none());
}

#[test]
fn test_covering_single_point_is_zero_extent() {
    let bbox = BoundingBox::covering(&pts(&[(45.0, -120.0)])).unwrap();
    assert_eq!(bbox.width(), 0.0);
    assert_eq!(bbox.height(), 0.0);
    assert!(bbox.is_valid());
}

#[test]
fn test_covering_contains_every_point() {
    let points = pts(&[(10.0, 20.0), (-33.9, 151.2), (51.5, -0.1), (64.1, -21.9)]);
    let bbox = BoundingBox::covering(&points).unwrap();
    for p in &points {
        assert!(bbox.contains(p.lat(), p.lon()));
    }
    assert_eq!(bbox.min_lat, -33.9);
    assert_eq!(bbox.max_lat, 64.1);
    assert_eq!(bbox.min_lon, -21.9);
    assert_eq!(bbox.max_lon, 151.2);
}

// ============================================================================
// Dimension tests
// ============================================================================

#[test]
fn test_width_height() {
    let bbox = BoundingBox::new(-10.0, -5.0, 30.0, 15.0);
    assert_eq!(bbox.width(), 40.0);
    assert_eq!(bbox.height(), 20.0);
}

// ============================================================================
// padded / clamped tests
// ============================================================================

#[test]
fn test_padded_zero_fraction_is_identity() {
    let bbox = BoundingBox::new(1.0, 2.0, 3.0, 4.0);
    assert_eq!(bbox.padded(0.0), bbox);
}

#[test]
fn test_padded_fifteen_percent() {
    let bbox = BoundingBox::new(0.0, 0.0, 100.0, 40.0).padded(0.15);
    assert!((bbox.min_lon - (-15.0)).abs() < 1e-9);
    assert!((bbox.max_lon - 115.0).abs() < 1e-9);
    assert!((bbox.min_lat - (-6.0)).abs() < 1e-9);
    assert!((bbox.max_lat - 46.0).abs() < 1e-9);
}

#[test]
fn test_padded_zero_extent_stays_put() {
    let bbox = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
    assert_eq!(bbox.padded(0.5), bbox);
}

#[test]
fn test_clamped_to_world() {
    let bbox = BoundingBox::new(-200.0, -95.0, 190.0, 91.0).clamped_to_world();
    assert_eq!(bbox, BoundingBox::new(-180.0, -90.0, 180.0, 90.0));
    assert!(bbox.is_valid());
}

// ============================================================================
// Validity / containment tests
// ============================================================================

#[test]
fn test_inverted_bbox_is_invalid() {
    assert!(!BoundingBox::new(10.0, 10.0, 5.0, 5.0).is_valid());
}

#[test]
fn test_out_of_world_bbox_is_invalid() {
    assert!(!BoundingBox::new(-181.0, 0.0, 0.0, 10.0).is_valid());
    assert!(!BoundingBox::new(0.0, 0.0, f64::NAN, 10.0).is_valid());
}

#[test]
fn test_contains_edges_inclusive() {
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    assert!(bbox.contains(0.0, 0.0));
    assert!(bbox.contains(10.0, 10.0));
    assert!(!bbox.contains(10.1, 5.0));
    assert!(!bbox.contains(5.0, -0.1));
}
