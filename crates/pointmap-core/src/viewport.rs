//! Fit-to-data viewport computation.

use pointmap_common::{BoundingBox, CanonicalSet};
use tracing::debug;

use crate::surface::RenderSurface;

/// Margin added to each side of the data extent.
pub const DEFAULT_PAD_FRACTION: f64 = 0.15;

/// Padded region covering every point, or `None` when there are no points.
///
/// The region is clamped to the world range so padding near the poles or the
/// antimeridian still yields a valid box.
pub fn fit_bounds(points: &CanonicalSet, pad_fraction: f64) -> Option<BoundingBox> {
    BoundingBox::covering(points.points())
        .map(|bbox| bbox.padded(pad_fraction).clamped_to_world())
}

/// Compute the region and hand it to the surface. Empty sets leave the view alone.
pub fn apply_fit<S: RenderSurface + ?Sized>(
    surface: &mut S,
    points: &CanonicalSet,
    pad_fraction: f64,
) -> Option<BoundingBox> {
    let region = fit_bounds(points, pad_fraction)?;
    debug!(
        min_lon = region.min_lon,
        min_lat = region.min_lat,
        max_lon = region.max_lon,
        max_lat = region.max_lat,
        "Fitting view to data"
    );
    surface.fit_view(&region);
    Some(region)
}
