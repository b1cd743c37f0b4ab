//! Session state and the orchestrator that keeps layers, toggles and viewport
//! consistent with it.

use chrono::{DateTime, Utc};
use pointmap_common::{
    BoundingBox, CanonicalSet, DisplayParameters, PointMapResult, ToggleState, ViewSummary,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::layers::{derive_layers, LiveLayers};
use crate::normalize::Normalizer;
use crate::source::DatasetSource;
use crate::stats::{summarize, StatusLine};
use crate::surface::RenderSurface;
use crate::viewport::{apply_fit, DEFAULT_PAD_FRACTION};
use crate::visibility::{reconcile, ReconcileOutcome};

/// Default zoom at which density points reach full intensity.
pub const DEFAULT_MAX_ZOOM: u8 = 18;

/// Single-slot cache of the most recently loaded canonical set.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    points: CanonicalSet,
    loaded_at: Option<DateTime<Utc>>,
}

impl SessionState {
    pub fn points(&self) -> &CanonicalSet {
        &self.points
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Replace the cached set after a successful load.
    pub fn store(&mut self, points: CanonicalSet) {
        self.points = points;
        self.loaded_at = Some(Utc::now());
    }
}

/// Fixed settings for a viewer session.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub normalizer: Normalizer,
    pub pad_fraction: f64,
    pub max_zoom: u8,
    pub params: DisplayParameters,
    pub toggles: ToggleState,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            normalizer: Normalizer::default(),
            pad_fraction: DEFAULT_PAD_FRACTION,
            max_zoom: DEFAULT_MAX_ZOOM,
            params: DisplayParameters::default(),
            toggles: ToggleState::default(),
        }
    }
}

/// Partial display parameter change; absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct ParamsUpdate {
    pub marker_radius: Option<f64>,
    pub heat_radius: Option<f64>,
    pub heat_blur: Option<f64>,
}

/// Partial toggle change; absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct TogglesUpdate {
    pub show_markers: Option<bool>,
    pub show_density: Option<bool>,
}

/// Read-only view of the session for the status surface.
#[derive(Debug, Clone, Serialize)]
pub struct ViewSnapshot {
    pub status: StatusLine,
    pub message: String,
    pub summary: ViewSummary,
    pub params: DisplayParameters,
    pub toggles: ToggleState,
    pub loaded_at: Option<DateTime<Utc>>,
}

/// Owns the session state, the current controls, and the surface.
///
/// Every mutation re-runs the fixed derivation for that kind of change:
/// parameters rebuild layers and reconcile, toggles only reconcile, refit only
/// fits the viewport. The cached set is never re-fetched.
pub struct Viewer<S: RenderSurface> {
    surface: S,
    settings: ViewerSettings,
    session: SessionState,
    params: DisplayParameters,
    toggles: ToggleState,
    live: LiveLayers,
    status: StatusLine,
}

impl<S: RenderSurface> Viewer<S> {
    /// Create a viewer on an empty dataset. The (empty) marker layer is
    /// registered immediately so the controls work before any data arrives.
    pub fn new(surface: S, settings: ViewerSettings) -> Self {
        let mut viewer = Self {
            surface,
            params: settings.params,
            toggles: settings.toggles,
            settings,
            session: SessionState::default(),
            live: LiveLayers::default(),
            status: StatusLine::Idle,
        };
        viewer.rebuild_layers();
        viewer.reconcile_visibility();
        viewer
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn params(&self) -> DisplayParameters {
        self.params
    }

    pub fn toggles(&self) -> ToggleState {
        self.toggles
    }

    pub fn status(&self) -> &StatusLine {
        &self.status
    }

    pub fn live_layers(&self) -> LiveLayers {
        self.live
    }

    pub fn summary(&self) -> ViewSummary {
        summarize(self.session.points(), self.toggles)
    }

    pub fn snapshot(&self) -> ViewSnapshot {
        ViewSnapshot {
            message: self.status.message(),
            status: self.status.clone(),
            summary: self.summary(),
            params: self.params,
            toggles: self.toggles,
            loaded_at: self.session.loaded_at(),
        }
    }

    /// Mark a fetch as in flight.
    pub fn begin_load(&mut self) {
        self.status = StatusLine::Loading;
    }

    /// Fetch from `source` and apply the result.
    pub async fn load(&mut self, source: &dyn DatasetSource) {
        self.begin_load();
        info!(source = %source.location(), "Loading point data");
        let result = source.fetch().await;
        self.complete_load(result);
    }

    /// Apply the outcome of a fetch.
    ///
    /// On success the payload is normalized and cached, then layers, viewport,
    /// visibility and stats are derived in that order. On failure the status
    /// reports the error and the cached set is left as it was.
    pub fn complete_load(&mut self, result: PointMapResult<Value>) {
        let raw = match result {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "Failed to load point data");
                self.status = StatusLine::Failed {
                    message: e.to_string(),
                };
                return;
            }
        };

        let points = self.settings.normalizer.normalize(&raw);
        self.session.store(points);

        self.rebuild_layers();
        self.refit();
        self.reconcile_visibility();

        let summary = self.summary();
        self.status = StatusLine::Ready {
            count: summary.location_count,
        };
        info!(
            locations = summary.location_count,
            view = %summary.composite_label,
            "Point data loaded"
        );
    }

    pub fn set_marker_radius(&mut self, value: f64) -> PointMapResult<()> {
        self.update_params(ParamsUpdate {
            marker_radius: Some(value),
            ..Default::default()
        })
    }

    pub fn set_heat_radius(&mut self, value: f64) -> PointMapResult<()> {
        self.update_params(ParamsUpdate {
            heat_radius: Some(value),
            ..Default::default()
        })
    }

    pub fn set_heat_blur(&mut self, value: f64) -> PointMapResult<()> {
        self.update_params(ParamsUpdate {
            heat_blur: Some(value),
            ..Default::default()
        })
    }

    /// Apply a parameter change. All fields are validated before anything is
    /// changed; an invalid field leaves parameters and layers untouched.
    pub fn update_params(&mut self, update: ParamsUpdate) -> PointMapResult<()> {
        let mut params = self.params;
        if let Some(v) = update.marker_radius {
            params.set_marker_radius(v)?;
        }
        if let Some(v) = update.heat_radius {
            params.set_heat_radius(v)?;
        }
        if let Some(v) = update.heat_blur {
            params.set_heat_blur(v)?;
        }

        self.params = params;
        self.rebuild_layers();
        self.reconcile_visibility();
        Ok(())
    }

    pub fn set_show_markers(&mut self, show: bool) -> ReconcileOutcome {
        self.update_toggles(TogglesUpdate {
            show_markers: Some(show),
            ..Default::default()
        })
    }

    pub fn set_show_density(&mut self, show: bool) -> ReconcileOutcome {
        self.update_toggles(TogglesUpdate {
            show_density: Some(show),
            ..Default::default()
        })
    }

    pub fn update_toggles(&mut self, update: TogglesUpdate) -> ReconcileOutcome {
        if let Some(show) = update.show_markers {
            self.toggles.show_markers = show;
        }
        if let Some(show) = update.show_density {
            self.toggles.show_density = show;
        }
        self.reconcile_visibility()
    }

    /// Fit the view to the cached set. Does nothing when the set is empty.
    pub fn refit(&mut self) -> Option<BoundingBox> {
        apply_fit(
            &mut self.surface,
            self.session.points(),
            self.settings.pad_fraction,
        )
    }

    fn rebuild_layers(&mut self) {
        let derived = derive_layers(
            self.session.points(),
            &self.params,
            self.settings.max_zoom,
        );
        self.live.replace(&mut self.surface, &derived);
        debug!(
            marker_radius = self.params.marker_radius(),
            heat_radius = self.params.heat_radius(),
            heat_blur = self.params.heat_blur(),
            "Rebuilt layers"
        );
    }

    fn reconcile_visibility(&mut self) -> ReconcileOutcome {
        reconcile(
            self.toggles,
            &mut self.surface,
            self.live.markers,
            self.live.density,
        )
    }
}
