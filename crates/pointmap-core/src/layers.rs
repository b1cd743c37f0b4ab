//! Marker and density layer construction.
//!
//! Layers are rebuilt wholesale from the canonical set whenever a display
//! parameter changes. The radius is baked into every marker instruction at
//! build time, so a radius change always means a new marker layer.

use pointmap_common::{CanonicalSet, DisplayParameters};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::surface::{LayerHandle, RenderSurface};

/// Draw one circle marker at a position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerInstruction {
    pub lat: f64,
    pub lon: f64,
    pub radius: f64,
}

/// One draw instruction per canonical point.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarkerLayerSpec {
    pub markers: Vec<MarkerInstruction>,
}

impl MarkerLayerSpec {
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// A single weighted heat overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityLayerSpec {
    /// `[lat, lon, weight]` per point, weights unmodified.
    pub points: Vec<[f64; 3]>,
    pub radius: f64,
    pub blur: f64,
    /// Zoom level at which points reach full intensity.
    pub max_zoom: u8,
}

impl DensityLayerSpec {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Both layers derived from one canonical set.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedLayers {
    pub markers: MarkerLayerSpec,
    /// Absent when there are no points to draw.
    pub density: Option<DensityLayerSpec>,
}

pub fn build_marker_layer(points: &CanonicalSet, radius: f64) -> MarkerLayerSpec {
    MarkerLayerSpec {
        markers: points
            .iter()
            .map(|p| MarkerInstruction {
                lat: p.lat(),
                lon: p.lon(),
                radius,
            })
            .collect(),
    }
}

pub fn build_density_layer(
    points: &CanonicalSet,
    radius: f64,
    blur: f64,
    max_zoom: u8,
) -> DensityLayerSpec {
    DensityLayerSpec {
        points: points.iter().map(|p| p.as_triplet()).collect(),
        radius,
        blur,
        max_zoom,
    }
}

/// Build both layers from the current parameters.
pub fn derive_layers(
    points: &CanonicalSet,
    params: &DisplayParameters,
    max_zoom: u8,
) -> DerivedLayers {
    let markers = build_marker_layer(points, params.marker_radius());
    let density = (!points.is_empty()).then(|| {
        build_density_layer(points, params.heat_radius(), params.heat_blur(), max_zoom)
    });

    DerivedLayers { markers, density }
}

/// Handles of the layer instances currently registered with the surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LiveLayers {
    pub markers: Option<LayerHandle>,
    pub density: Option<LayerHandle>,
}

impl LiveLayers {
    /// Swap the registered layers for freshly derived ones.
    ///
    /// The old density layer is detached and removed before anything new is
    /// added, so the surface never holds two density layers. New layers start
    /// detached; visibility is applied afterwards by reconciliation.
    pub fn replace<S: RenderSurface + ?Sized>(&mut self, surface: &mut S, derived: &DerivedLayers) {
        if let Some(old) = self.density.take() {
            retire(surface, old);
        }
        if let Some(old) = self.markers.take() {
            retire(surface, old);
        }

        self.markers = Some(surface.add_marker_layer(&derived.markers));
        self.density = derived
            .density
            .as_ref()
            .map(|density| surface.add_density_layer(density));

        debug!(
            markers = derived.markers.len(),
            density_points = derived.density.as_ref().map_or(0, |d| d.len()),
            "Replaced layers"
        );
    }
}

fn retire<S: RenderSurface + ?Sized>(surface: &mut S, handle: LayerHandle) {
    if surface.is_attached(handle) {
        surface.detach(handle);
    }
    surface.remove_layer(handle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointmap_common::Point;

    fn set(points: &[(f64, f64, f64)]) -> CanonicalSet {
        points
            .iter()
            .map(|&(lat, lon, w)| Point::new(lat, lon, w).unwrap())
            .collect()
    }

    #[test]
    fn test_marker_radius_applied_uniformly() {
        let layer = build_marker_layer(&set(&[(1.0, 2.0, 1.0), (3.0, 4.0, 7.0)]), 6.5);
        assert_eq!(layer.len(), 2);
        assert!(layer.markers.iter().all(|m| m.radius == 6.5));
        assert_eq!(layer.markers[1].lat, 3.0);
        assert_eq!(layer.markers[1].lon, 4.0);
    }

    #[test]
    fn test_density_weights_pass_through() {
        let layer = build_density_layer(&set(&[(1.0, 2.0, -4.0), (3.0, 4.0, 0.0)]), 20.0, 10.0, 18);
        assert_eq!(layer.points, vec![[1.0, 2.0, -4.0], [3.0, 4.0, 0.0]]);
        assert_eq!(layer.radius, 20.0);
        assert_eq!(layer.blur, 10.0);
        assert_eq!(layer.max_zoom, 18);
    }

    #[test]
    fn test_derive_empty_set() {
        let derived = derive_layers(&CanonicalSet::empty(), &DisplayParameters::default(), 18);
        assert!(derived.markers.is_empty());
        assert!(derived.density.is_none());
    }

    #[test]
    fn test_build_density_tolerates_empty() {
        let layer = build_density_layer(&CanonicalSet::empty(), 25.0, 15.0, 18);
        assert!(layer.is_empty());
    }
}
