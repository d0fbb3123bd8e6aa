//! Map screen controller.
//!
//! Owns the session parameters of one map screen, turns every effective
//! parameter change into a full remount and tracks the screen state from the
//! signals posted by the current instance.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, timeout_at};
use wayfarer_core::session::{
    BridgeSignal, EmbeddedRuntime, InboundMessage, InstanceId, MapScreenState, OverlayView,
    SessionParameters,
};
use wayfarer_core::{Coordinates, Incident, Result, RouteType, TransportMode, WayfarerError};

use crate::bridge::{BridgeDelivery, MountHandle, RuntimeBridge};
use crate::content::ContentGenerator;

/// Callback invoked when the current instance reports ready.
pub type MapReadyCallback = Arc<dyn Fn(InstanceId) + Send + Sync>;

const ROUTE_ERROR_MESSAGE: &str = "The route could not be calculated.";

/// Controller behind a single map screen.
///
/// # State machine
///
/// - `open`, and any change that produces different parameters, remounts and
///   enters `Idle` (no destination) or `PreparingRoute`.
/// - A `ready` signal from the current instance enters `Ready`, or
///   `Navigating` when navigation is active.
/// - No `ready` before the readiness deadline enters `LoadFailed`; `reload`
///   is the way out.
pub struct MapScreenController {
    generator: Arc<ContentGenerator>,
    bridge: RuntimeBridge,
    params: Option<SessionParameters>,
    state: MapScreenState,
    route_error: Option<String>,
    readiness_timeout: Duration,
    deadline: Option<Instant>,
    on_ready: Option<MapReadyCallback>,
}

impl MapScreenController {
    /// Creates a controller for a screen that has not been opened yet.
    ///
    /// # Arguments
    ///
    /// * `generator` - Shared document generator
    /// * `runtime` - Embedded runtime hosting the documents of this screen
    /// * `readiness_timeout` - How long a mounted instance may take to report ready
    pub fn new(
        generator: Arc<ContentGenerator>,
        runtime: Arc<dyn EmbeddedRuntime>,
        readiness_timeout: Duration,
    ) -> Self {
        Self {
            generator,
            bridge: RuntimeBridge::new(runtime),
            params: None,
            state: MapScreenState::Idle,
            route_error: None,
            readiness_timeout,
            deadline: None,
            on_ready: None,
        }
    }

    /// Registers the host callback fired on every transition to ready.
    pub fn with_ready_callback(mut self, callback: MapReadyCallback) -> Self {
        self.on_ready = Some(callback);
        self
    }

    pub fn state(&self) -> &MapScreenState {
        &self.state
    }

    pub fn params(&self) -> Option<&SessionParameters> {
        self.params.as_ref()
    }

    pub fn route_error(&self) -> Option<&str> {
        self.route_error.as_deref()
    }

    pub fn current_instance(&self) -> Option<InstanceId> {
        self.bridge.current_instance()
    }

    pub fn is_open(&self) -> bool {
        self.params.is_some()
    }

    /// What the loading overlay should show for the current state.
    pub fn overlay(&self) -> OverlayView {
        match &self.state {
            MapScreenState::LoadFailed { reason } => OverlayView::Error {
                message: reason.clone(),
            },
            state if state.is_loading() => OverlayView::Spinner,
            _ => match &self.route_error {
                Some(message) => OverlayView::Error {
                    message: message.clone(),
                },
                None => OverlayView::Hidden,
            },
        }
    }

    /// Opens the screen with its initial parameters and mounts the first instance.
    ///
    /// # Errors
    ///
    /// Propagates generation and mount failures; a failed mount leaves the
    /// screen in `LoadFailed`.
    pub async fn open(&mut self, params: SessionParameters) -> Result<MountHandle> {
        tracing::info!(
            "[MapScreen] Opening map (destination: {}, incidents: {})",
            params.destination().is_some(),
            params.incidents().len()
        );
        self.mount(params).await
    }

    pub async fn select_destination(&mut self, destination: Coordinates) -> Result<Option<MountHandle>> {
        self.update(|params| params.with_destination(Some(destination)))
            .await
    }

    /// Clears the destination. Navigation stops with it.
    pub async fn clear_destination(&mut self) -> Result<Option<MountHandle>> {
        self.update(|params| params.with_destination(None).with_navigating(false))
            .await
    }

    pub async fn update_location(&mut self, location: Coordinates) -> Result<Option<MountHandle>> {
        self.update(|params| params.with_current_location(location))
            .await
    }

    pub async fn set_incidents(&mut self, incidents: Vec<Incident>) -> Result<Option<MountHandle>> {
        self.update(|params| params.with_incidents(incidents)).await
    }

    pub async fn set_route_type(&mut self, route_type: RouteType) -> Result<Option<MountHandle>> {
        self.update(|params| params.with_route_type(route_type))
            .await
    }

    pub async fn set_transport_mode(
        &mut self,
        transport_mode: TransportMode,
    ) -> Result<Option<MountHandle>> {
        self.update(|params| params.with_transport_mode(transport_mode))
            .await
    }

    /// Starts navigation towards the selected destination.
    ///
    /// # Errors
    ///
    /// `WayfarerError::Validation` when no destination is selected.
    pub async fn start_navigation(&mut self) -> Result<Option<MountHandle>> {
        let has_destination = self
            .params
            .as_ref()
            .is_some_and(|params| params.destination().is_some());
        if !has_destination {
            return Err(WayfarerError::validation(
                "Missing information: select a destination before starting navigation",
            ));
        }
        tracing::info!("[MapScreen] Starting navigation");
        self.update(|params| params.with_navigating(true)).await
    }

    pub async fn stop_navigation(&mut self) -> Result<Option<MountHandle>> {
        self.update(|params| params.with_navigating(false)).await
    }

    /// Remounts the current parameters, typically to recover from `LoadFailed`.
    pub async fn reload(&mut self) -> Result<MountHandle> {
        let Some(params) = self.params.clone() else {
            return Err(WayfarerError::validation("Map screen is not open"));
        };
        tracing::info!("[MapScreen] Reloading map");
        self.mount(params).await
    }

    /// Tears down the embedded instance when the screen goes away.
    pub async fn close(&mut self) {
        self.bridge.unmount().await;
        self.params = None;
        self.deadline = None;
        self.route_error = None;
        self.state = MapScreenState::Idle;
        tracing::info!("[MapScreen] Closed");
    }

    /// Applies a message posted by an embedded document.
    ///
    /// Returns the decoded signal, or `None` when the message came from a
    /// stale instance and was dropped.
    pub fn handle_inbound(&mut self, message: &InboundMessage) -> Option<BridgeSignal> {
        let signal = match self.bridge.receive(message) {
            BridgeDelivery::Signal(signal) => signal,
            BridgeDelivery::Stale => return None,
        };

        match &signal {
            BridgeSignal::Ready => self.mark_ready(message.instance),
            BridgeSignal::RouteFailed => {
                tracing::warn!("[MapScreen] Route calculation failed in {}", message.instance);
                self.route_error = Some(ROUTE_ERROR_MESSAGE.to_string());
            }
            BridgeSignal::Unknown(_) => {}
        }
        Some(signal)
    }

    /// Moves to `LoadFailed` if the current instance missed its readiness deadline.
    ///
    /// Returns `true` when this call performed the transition.
    pub fn check_readiness(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if self.state.is_loading() && now >= deadline => {
                self.fail_readiness();
                true
            }
            _ => false,
        }
    }

    /// Drains inbound messages until the current instance is ready or its
    /// readiness deadline passes.
    ///
    /// # Errors
    ///
    /// `WayfarerError::Bridge` if the inbound channel closes while waiting.
    pub async fn wait_for_ready(
        &mut self,
        inbound: &mut mpsc::Receiver<InboundMessage>,
    ) -> Result<MapScreenState> {
        while self.is_open() && self.state.is_loading() {
            let received = match self.deadline {
                Some(deadline) => timeout_at(deadline, inbound.recv()).await,
                None => Ok(inbound.recv().await),
            };

            match received {
                Ok(Some(message)) => {
                    self.handle_inbound(&message);
                }
                Ok(None) => {
                    return Err(WayfarerError::bridge(
                        "Inbound channel closed before the map was ready",
                    ));
                }
                Err(_) => {
                    self.check_readiness(Instant::now());
                }
            }
        }
        Ok(self.state.clone())
    }

    async fn update<F>(&mut self, change: F) -> Result<Option<MountHandle>>
    where
        F: FnOnce(SessionParameters) -> SessionParameters,
    {
        let Some(current) = self.params.as_ref() else {
            return Err(WayfarerError::validation("Map screen is not open"));
        };

        let next = change(current.clone());
        if &next == current {
            tracing::debug!("[MapScreen] Parameters unchanged, keeping current instance");
            return Ok(None);
        }

        self.mount(next).await.map(Some)
    }

    /// Renders `params` and swaps the mounted instance for the new document.
    ///
    /// `params` only becomes current once its document exists; a render
    /// failure leaves the screen exactly as it was.
    async fn mount(&mut self, params: SessionParameters) -> Result<MountHandle> {
        // 1. Render the new document before touching the mounted one
        let document = self.generator.generate(&params)?;
        let loading_state = if params.destination().is_some() {
            MapScreenState::PreparingRoute
        } else {
            MapScreenState::Idle
        };
        self.params = Some(params);

        // 2. Swap instances
        self.route_error = None;
        match self.bridge.mount(&document).await {
            Ok(handle) => {
                self.state = loading_state;
                // No deadline when the timeout does not fit in an Instant
                self.deadline = Instant::now().checked_add(self.readiness_timeout);
                tracing::debug!("[MapScreen] {} mounted, state {:?}", handle.instance(), self.state);
                Ok(handle)
            }
            Err(e) => {
                self.deadline = None;
                self.state = MapScreenState::LoadFailed {
                    reason: e.to_string(),
                };
                Err(e)
            }
        }
    }

    fn mark_ready(&mut self, instance: InstanceId) {
        let navigating = self
            .params
            .as_ref()
            .is_some_and(SessionParameters::is_navigating);

        // Only the first ready of an instance counts; a late one still recovers from LoadFailed
        let accepts = self.state.is_loading() || matches!(self.state, MapScreenState::LoadFailed { .. });
        if !accepts {
            tracing::debug!("[MapScreen] Duplicate ready from {}", instance);
            return;
        }

        self.deadline = None;
        self.state = if navigating {
            MapScreenState::Navigating
        } else {
            MapScreenState::Ready
        };
        tracing::info!("[MapScreen] {} ready, state {:?}", instance, self.state);

        if let Some(callback) = &self.on_ready {
            callback(instance);
        }
    }

    fn fail_readiness(&mut self) {
        let reason = format!(
            "The map did not finish loading within {} seconds.",
            self.readiness_timeout.as_secs()
        );
        tracing::warn!("[MapScreen] Readiness timeout for {:?}", self.current_instance());
        self.deadline = None;
        self.state = MapScreenState::LoadFailed { reason };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MapDocumentSettings;
    use async_trait::async_trait;
    use std::sync::Mutex;
    use wayfarer_core::session::Document;

    #[derive(Default)]
    struct CountingRuntime {
        loads: Mutex<Vec<InstanceId>>,
    }

    #[async_trait]
    impl EmbeddedRuntime for CountingRuntime {
        async fn load(&self, instance: InstanceId, _document: &Document) -> Result<()> {
            self.loads.lock().unwrap().push(instance);
            Ok(())
        }

        async fn unload(&self, _instance: InstanceId) -> Result<()> {
            Ok(())
        }
    }

    fn settings() -> MapDocumentSettings {
        MapDocumentSettings {
            api_key: "unit-key".to_string(),
            sdk_version: "6.23.0".to_string(),
            zoom: 13,
            route_padding: 50,
        }
    }

    fn paris() -> Coordinates {
        Coordinates::new(48.8566, 2.3522)
    }

    #[tokio::test]
    async fn test_oversized_timeout_mounts_without_deadline() {
        let runtime = Arc::new(CountingRuntime::default());
        let generator = Arc::new(ContentGenerator::new(settings()).unwrap());
        let mut screen =
            MapScreenController::new(generator, runtime.clone(), Duration::from_secs(u64::MAX));

        let handle = screen.open(SessionParameters::new(paris())).await.unwrap();
        assert!(screen.state().is_loading());
        assert!(!screen.check_readiness(Instant::now()));

        let (outbox, mut inbound) = mpsc::channel(4);
        outbox
            .send(InboundMessage::new(handle.instance(), "ready"))
            .await
            .unwrap();
        assert_eq!(
            screen.wait_for_ready(&mut inbound).await.unwrap(),
            MapScreenState::Ready
        );
    }

    #[tokio::test]
    async fn test_render_failure_keeps_previous_parameters() {
        // Renders without a destination, fails on the undefined name otherwise
        let generator = ContentGenerator::with_template_source(
            settings(),
            "{% if destination %}{{ not_in_context }}{% endif %}map",
        )
        .unwrap();
        let runtime = Arc::new(CountingRuntime::default());
        let mut screen =
            MapScreenController::new(Arc::new(generator), runtime.clone(), Duration::from_secs(20));

        let handle = screen.open(SessionParameters::new(paris())).await.unwrap();
        let err = screen
            .select_destination(Coordinates::new(45.764, 4.8357))
            .await
            .unwrap_err();

        assert!(matches!(err, WayfarerError::Template(_)));
        assert_eq!(screen.params(), Some(&SessionParameters::new(paris())));
        assert_eq!(screen.state(), &MapScreenState::Idle);
        assert_eq!(screen.current_instance(), Some(handle.instance()));
        assert_eq!(runtime.loads.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_first_render_leaves_screen_closed() {
        let generator =
            ContentGenerator::with_template_source(settings(), "{{ not_in_context }}").unwrap();
        let mut screen = MapScreenController::new(
            Arc::new(generator),
            Arc::new(CountingRuntime::default()),
            Duration::from_secs(20),
        );

        assert!(screen.open(SessionParameters::new(paris())).await.is_err());
        assert!(!screen.is_open());
        assert!(screen.current_instance().is_none());
    }
}
