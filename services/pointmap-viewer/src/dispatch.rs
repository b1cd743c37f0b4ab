//! Single-owner command loop around the viewer.
//!
//! The dispatcher task is the only code that touches the [`Viewer`]. Control
//! requests arrive as [`Command`]s and are applied one at a time, in order. The
//! startup fetch runs in its own task and reports back with
//! [`Command::LoadFinished`], so controls stay responsive while it is in flight.

use std::sync::Arc;

use pointmap_common::{BoundingBox, PointMapError, PointMapResult};
use pointmap_core::{
    DatasetSource, ParamsUpdate, RecordingSurface, Scene, TogglesUpdate, ViewSnapshot, Viewer,
};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

const COMMAND_BUFFER: usize = 64;

/// Status plus the drawing state, as returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct ViewerState {
    #[serde(flatten)]
    pub snapshot: ViewSnapshot,
    pub scene: Scene,
}

pub enum Command {
    State {
        reply: oneshot::Sender<ViewerState>,
    },
    UpdateParams {
        update: ParamsUpdate,
        reply: oneshot::Sender<PointMapResult<ViewerState>>,
    },
    UpdateToggles {
        update: TogglesUpdate,
        reply: oneshot::Sender<ViewerState>,
    },
    Refit {
        reply: oneshot::Sender<Option<BoundingBox>>,
    },
    LoadFinished(PointMapResult<Value>),
}

/// Cloneable handle for sending commands to the dispatcher.
#[derive(Clone)]
pub struct DispatchHandle {
    tx: mpsc::Sender<Command>,
}

impl DispatchHandle {
    pub async fn state(&self) -> PointMapResult<ViewerState> {
        self.request(|reply| Command::State { reply }).await
    }

    pub async fn update_params(&self, update: ParamsUpdate) -> PointMapResult<ViewerState> {
        self.request(|reply| Command::UpdateParams { update, reply })
            .await?
    }

    pub async fn update_toggles(&self, update: TogglesUpdate) -> PointMapResult<ViewerState> {
        self.request(|reply| Command::UpdateToggles { update, reply })
            .await
    }

    pub async fn refit(&self) -> PointMapResult<Option<BoundingBox>> {
        self.request(|reply| Command::Refit { reply }).await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> PointMapResult<T> {
        let (reply, response) = oneshot::channel();
        self.tx
            .send(command(reply))
            .await
            .map_err(|_| stopped())?;
        response.await.map_err(|_| stopped())
    }
}

fn stopped() -> PointMapError {
    PointMapError::Internal("viewer dispatcher has stopped".to_string())
}

/// Start the dispatcher and the one-time fetch from `source`.
///
/// The dispatcher runs until every [`DispatchHandle`] has been dropped.
pub fn spawn(
    mut viewer: Viewer<RecordingSurface>,
    source: Arc<dyn DatasetSource>,
) -> (DispatchHandle, JoinHandle<()>) {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);

    viewer.begin_load();
    let load_tx = tx.clone();
    tokio::spawn(async move {
        info!(source = %source.location(), "Loading point data");
        let result = source.fetch().await;
        if load_tx.send(Command::LoadFinished(result)).await.is_err() {
            warn!("Dispatcher stopped before the load finished");
        }
    });

    let task = tokio::spawn(run(viewer, rx));
    (DispatchHandle { tx }, task)
}

async fn run(mut viewer: Viewer<RecordingSurface>, mut rx: mpsc::Receiver<Command>) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::State { reply } => {
                reply.send(state_of(&viewer)).ok();
            }
            Command::UpdateParams { update, reply } => {
                debug!(?update, "Updating display parameters");
                let result = viewer.update_params(update).map(|()| state_of(&viewer));
                reply.send(result).ok();
            }
            Command::UpdateToggles { update, reply } => {
                debug!(?update, "Updating toggles");
                viewer.update_toggles(update);
                reply.send(state_of(&viewer)).ok();
            }
            Command::Refit { reply } => {
                reply.send(viewer.refit()).ok();
            }
            Command::LoadFinished(result) => {
                viewer.complete_load(result);
            }
        }
    }
    debug!("Viewer dispatcher stopped");
}

fn state_of(viewer: &Viewer<RecordingSurface>) -> ViewerState {
    ViewerState {
        snapshot: viewer.snapshot(),
        scene: viewer.surface().scene(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pointmap_core::{StatusLine, ViewerSettings};
    use std::time::Duration;
    use test_utils::fixtures::{self, objects};

    /// Returns a canned payload, or HTTP 500 when there is none.
    struct StaticSource(Option<&'static str>);

    #[async_trait]
    impl DatasetSource for StaticSource {
        async fn fetch(&self) -> PointMapResult<Value> {
            match self.0 {
                Some(json) => Ok(fixtures::payload(json)),
                None => Err(PointMapError::FetchFailed { status: 500 }),
            }
        }

        fn location(&self) -> String {
            "static".to_string()
        }
    }

    /// Never completes.
    struct HungSource;

    #[async_trait]
    impl DatasetSource for HungSource {
        async fn fetch(&self) -> PointMapResult<Value> {
            std::future::pending().await
        }

        fn location(&self) -> String {
            "hung".to_string()
        }
    }

    fn start(source: impl DatasetSource + 'static) -> DispatchHandle {
        let viewer = Viewer::new(RecordingSurface::new(), ViewerSettings::default());
        spawn(viewer, Arc::new(source)).0
    }

    /// Poll until the load has been applied.
    async fn settled(handle: &DispatchHandle) -> ViewerState {
        for _ in 0..100 {
            let state = handle.state().await.unwrap();
            if state.snapshot.status != StatusLine::Loading {
                return state;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("load did not finish");
    }

    #[tokio::test]
    async fn test_load_then_ready() {
        let handle = start(StaticSource(Some(objects::CITIES)));
        let state = settled(&handle).await;

        assert_eq!(state.snapshot.status, StatusLine::Ready { count: 3 });
        assert_eq!(state.scene.layers.len(), 2);
        assert!(state.scene.view.is_some());
    }

    #[tokio::test]
    async fn test_failed_load_reports_and_stays_interactive() {
        let handle = start(StaticSource(None));
        let state = settled(&handle).await;
        assert!(state.snapshot.status.is_failed());
        assert_eq!(state.snapshot.summary.location_count, 0);

        let state = handle
            .update_params(ParamsUpdate {
                marker_radius: Some(3.0),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(state.snapshot.params.marker_radius(), 3.0);
        assert!(state.snapshot.status.is_failed());
    }

    #[tokio::test]
    async fn test_controls_respond_while_loading() {
        let handle = start(HungSource);

        let state = handle
            .update_toggles(TogglesUpdate {
                show_markers: Some(false),
                show_density: None,
            })
            .await
            .unwrap();

        assert_eq!(state.snapshot.status, StatusLine::Loading);
        assert_eq!(state.snapshot.summary.composite_label.as_str(), "Heat");
        assert!(handle.refit().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_invalid_params_rejected() {
        let handle = start(StaticSource(Some(objects::CITIES)));
        settled(&handle).await;

        let err = handle
            .update_params(ParamsUpdate {
                heat_blur: Some(-1.0),
                ..Default::default()
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PointMapError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn test_refit_after_load() {
        let handle = start(StaticSource(Some(objects::CITIES)));
        settled(&handle).await;

        let region = handle.refit().await.unwrap().unwrap();
        assert!(region.contains(51.5074, -0.1278));
        assert!(region.contains(40.7128, -74.0060));
    }
}
