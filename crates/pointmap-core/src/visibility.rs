//! Applying the layer toggles to whatever layers currently exist.

use pointmap_common::ToggleState;
use serde::Serialize;
use tracing::debug;

use crate::surface::{LayerHandle, RenderSurface};

/// Attach/detach calls issued by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileOutcome {
    pub attached: usize,
    pub detached: usize,
}

impl ReconcileOutcome {
    pub fn is_noop(&self) -> bool {
        self.attached == 0 && self.detached == 0
    }
}

/// Bring the surface in line with `toggles`.
///
/// Only layers whose attachment differs from the wanted state are touched, so
/// repeating a call with unchanged toggles issues no surface mutations. A
/// missing density layer makes `show_density` a no-op.
pub fn reconcile<S: RenderSurface + ?Sized>(
    toggles: ToggleState,
    surface: &mut S,
    markers: Option<LayerHandle>,
    density: Option<LayerHandle>,
) -> ReconcileOutcome {
    let mut outcome = ReconcileOutcome::default();

    for (handle, wanted) in [
        (markers, toggles.show_markers),
        (density, toggles.show_density),
    ] {
        let Some(handle) = handle else { continue };

        match (surface.is_attached(handle), wanted) {
            (false, true) => {
                surface.attach(handle);
                outcome.attached += 1;
            }
            (true, false) => {
                surface.detach(handle);
                outcome.detached += 1;
            }
            _ => {}
        }
    }

    if !outcome.is_noop() {
        debug!(
            show_markers = toggles.show_markers,
            show_density = toggles.show_density,
            attached = outcome.attached,
            detached = outcome.detached,
            "Reconciled layer visibility"
        );
    }

    outcome
}
