//! The abstract mapping surface the pipeline draws onto.

use std::collections::{BTreeMap, BTreeSet};

use pointmap_common::BoundingBox;
use serde::{Deserialize, Serialize};

use crate::layers::{DensityLayerSpec, MarkerLayerSpec};

/// Identifies a layer instance registered with a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerHandle(pub u64);

impl std::fmt::Display for LayerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "layer-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayerKind {
    Markers,
    Density,
}

/// Primitive operations of a mapping component.
///
/// Adding a layer registers it without showing it; `attach`/`detach` control
/// whether a registered layer is part of the visible view.
pub trait RenderSurface {
    fn add_marker_layer(&mut self, layer: &MarkerLayerSpec) -> LayerHandle;

    fn add_density_layer(&mut self, layer: &DensityLayerSpec) -> LayerHandle;

    fn remove_layer(&mut self, handle: LayerHandle);

    fn attach(&mut self, handle: LayerHandle);

    fn detach(&mut self, handle: LayerHandle);

    fn is_attached(&self, handle: LayerHandle) -> bool;

    fn fit_view(&mut self, region: &BoundingBox);
}

/// A layer held by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneLayer {
    Markers(MarkerLayerSpec),
    Density(DensityLayerSpec),
}

impl SceneLayer {
    pub fn kind(&self) -> LayerKind {
        match self {
            SceneLayer::Markers(_) => LayerKind::Markers,
            SceneLayer::Density(_) => LayerKind::Density,
        }
    }
}

/// One call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceCall {
    AddLayer { handle: LayerHandle, kind: LayerKind },
    RemoveLayer { handle: LayerHandle },
    Attach { handle: LayerHandle },
    Detach { handle: LayerHandle },
    FitView { region: BoundingBox },
}

/// An attached layer and its drawing instructions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachedLayer {
    pub handle: LayerHandle,
    #[serde(flatten)]
    pub layer: SceneLayer,
}

/// What is currently visible on a surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    pub view: Option<BoundingBox>,
    pub layers: Vec<AttachedLayer>,
}

/// In-memory surface that keeps the registered layers, the visible set and the
/// current view, and logs every call it receives.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    next_handle: u64,
    layers: BTreeMap<LayerHandle, SceneLayer>,
    attached: BTreeSet<LayerHandle>,
    view: Option<BoundingBox>,
    calls: Vec<SurfaceCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    /// Number of attach/detach calls in the log.
    pub fn visibility_call_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, SurfaceCall::Attach { .. } | SurfaceCall::Detach { .. }))
            .count()
    }

    pub fn view(&self) -> Option<BoundingBox> {
        self.view
    }

    pub fn layer(&self, handle: LayerHandle) -> Option<&SceneLayer> {
        self.layers.get(&handle)
    }

    pub fn live_layer_count(&self, kind: LayerKind) -> usize {
        self.layers.values().filter(|l| l.kind() == kind).count()
    }

    pub fn attached_layer_count(&self, kind: LayerKind) -> usize {
        self.attached
            .iter()
            .filter_map(|h| self.layers.get(h))
            .filter(|l| l.kind() == kind)
            .count()
    }

    pub fn scene(&self) -> Scene {
        Scene {
            view: self.view,
            layers: self
                .attached
                .iter()
                .filter_map(|&handle| {
                    self.layers.get(&handle).map(|layer| AttachedLayer {
                        handle,
                        layer: layer.clone(),
                    })
                })
                .collect(),
        }
    }

    fn register(&mut self, layer: SceneLayer) -> LayerHandle {
        self.next_handle += 1;
        let handle = LayerHandle(self.next_handle);
        self.calls.push(SurfaceCall::AddLayer {
            handle,
            kind: layer.kind(),
        });
        self.layers.insert(handle, layer);
        handle
    }
}

impl RenderSurface for RecordingSurface {
    fn add_marker_layer(&mut self, layer: &MarkerLayerSpec) -> LayerHandle {
        self.register(SceneLayer::Markers(layer.clone()))
    }

    fn add_density_layer(&mut self, layer: &DensityLayerSpec) -> LayerHandle {
        self.register(SceneLayer::Density(layer.clone()))
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.calls.push(SurfaceCall::RemoveLayer { handle });
        self.attached.remove(&handle);
        self.layers.remove(&handle);
    }

    fn attach(&mut self, handle: LayerHandle) {
        self.calls.push(SurfaceCall::Attach { handle });
        if self.layers.contains_key(&handle) {
            self.attached.insert(handle);
        }
    }

    fn detach(&mut self, handle: LayerHandle) {
        self.calls.push(SurfaceCall::Detach { handle });
        self.attached.remove(&handle);
    }

    fn is_attached(&self, handle: LayerHandle) -> bool {
        self.attached.contains(&handle)
    }

    fn fit_view(&mut self, region: &BoundingBox) {
        self.calls.push(SurfaceCall::FitView { region: *region });
        self.view = Some(*region);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_added_layer_starts_detached() {
        let mut surface = RecordingSurface::new();
        let handle = surface.add_marker_layer(&MarkerLayerSpec::default());
        assert!(!surface.is_attached(handle));
        assert!(surface.scene().layers.is_empty());
    }

    #[test]
    fn test_remove_drops_attachment() {
        let mut surface = RecordingSurface::new();
        let handle = surface.add_marker_layer(&MarkerLayerSpec::default());
        surface.attach(handle);
        surface.remove_layer(handle);
        assert!(!surface.is_attached(handle));
        assert_eq!(surface.live_layer_count(LayerKind::Markers), 0);
    }

    #[test]
    fn test_attach_unknown_handle_is_ignored() {
        let mut surface = RecordingSurface::new();
        surface.attach(LayerHandle(99));
        assert!(!surface.is_attached(LayerHandle(99)));
    }

    #[test]
    fn test_scene_serializes_with_kind_tag() {
        let mut surface = RecordingSurface::new();
        let handle = surface.add_marker_layer(&MarkerLayerSpec::default());
        surface.attach(handle);
        let json = serde_json::to_value(surface.scene()).unwrap();
        assert_eq!(json["layers"][0]["kind"], "markers");
        assert_eq!(json["layers"][0]["handle"], 1);
    }
}
