//! Point normalization and dual-layer synchronization.
//!
//! Raw JSON from a [`DatasetSource`] is normalized into a
//! [`CanonicalSet`](pointmap_common::CanonicalSet), cached in a
//! [`SessionState`], and turned into a marker layer and a density layer that a
//! [`RenderSurface`] draws. The [`Viewer`] owns all mutable state and re-runs the
//! derivation steps whenever a display parameter or toggle changes.

pub mod layers;
pub mod normalize;
pub mod session;
pub mod source;
pub mod stats;
pub mod surface;
pub mod viewport;
pub mod visibility;

pub use layers::{
    build_density_layer, build_marker_layer, derive_layers, DensityLayerSpec, DerivedLayers,
    LiveLayers, MarkerInstruction, MarkerLayerSpec,
};
pub use normalize::{normalize, Normalizer, DEFAULT_WEIGHT_FIELD};
pub use session::{
    ParamsUpdate, SessionState, TogglesUpdate, ViewSnapshot, Viewer, ViewerSettings,
    DEFAULT_MAX_ZOOM,
};
pub use source::{parse_payload, source_for, DatasetSource, FileSource, HttpSource};
pub use stats::{summarize, StatusLine};
pub use surface::{
    AttachedLayer, LayerHandle, LayerKind, RecordingSurface, RenderSurface, Scene, SceneLayer,
    SurfaceCall,
};
pub use viewport::{apply_fit, fit_bounds, DEFAULT_PAD_FRACTION};
pub use visibility::{reconcile, ReconcileOutcome};
