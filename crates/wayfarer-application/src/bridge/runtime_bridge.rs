//! Runtime bridge.
//!
//! Owns the lifecycle of the single embedded document instance shown by a
//! map screen. Every mount tears down the previous instance and loads the new
//! document under a fresh [`InstanceId`]; inbound messages are accepted only
//! from the instance that is currently mounted.

use std::sync::Arc;

use wayfarer_core::session::{BridgeSignal, Document, EmbeddedRuntime, InboundMessage, InstanceId};
use wayfarer_core::{Result, WayfarerError};

/// Receipt for a successful mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MountHandle {
    instance: InstanceId,
}

impl MountHandle {
    pub fn instance(&self) -> InstanceId {
        self.instance
    }
}

/// Outcome of handing an inbound message to the bridge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BridgeDelivery {
    /// Message from the current instance, decoded.
    Signal(BridgeSignal),
    /// Message from a torn-down (or never mounted) instance; dropped.
    Stale,
}

/// Host-side owner of the embedded runtime instance.
pub struct RuntimeBridge {
    runtime: Arc<dyn EmbeddedRuntime>,
    current: Option<InstanceId>,
    /// Last generation handed out, mounted or not.
    last_issued: InstanceId,
}

impl RuntimeBridge {
    pub fn new(runtime: Arc<dyn EmbeddedRuntime>) -> Self {
        Self {
            runtime,
            current: None,
            last_issued: InstanceId::new(0),
        }
    }

    /// Currently mounted instance, if any.
    pub fn current_instance(&self) -> Option<InstanceId> {
        self.current
    }

    pub fn is_mounted(&self) -> bool {
        self.current.is_some()
    }

    /// Replaces the mounted instance with a new one built from `document`.
    ///
    /// # Arguments
    ///
    /// * `document` - Freshly generated map document
    ///
    /// # Returns
    ///
    /// A [`MountHandle`] naming the new instance.
    ///
    /// # Errors
    ///
    /// `WayfarerError::Bridge` if the runtime cannot load the document. The
    /// previous instance is torn down in either case, so after a failed mount
    /// nothing is mounted.
    pub async fn mount(&mut self, document: &Document) -> Result<MountHandle> {
        // 1. Tear down the previous instance
        self.teardown_current().await;

        // 2. Issue the next generation token
        let instance = self.last_issued.next();
        self.last_issued = instance;

        // 3. Load the new document
        self.runtime
            .load(instance, document)
            .await
            .map_err(|e| {
                tracing::error!("[MapBridge] Failed to load {}: {}", instance, e);
                WayfarerError::bridge(format!("Failed to load {instance}: {e}"))
            })?;

        self.current = Some(instance);
        tracing::info!(
            "[MapBridge] Mounted {} ({} bytes)",
            instance,
            document.len()
        );
        Ok(MountHandle { instance })
    }

    /// Tears down the mounted instance, if any.
    pub async fn unmount(&mut self) {
        self.teardown_current().await;
    }

    /// Filters and decodes a message posted by an embedded document.
    pub fn receive(&self, message: &InboundMessage) -> BridgeDelivery {
        if self.current != Some(message.instance) {
            tracing::debug!(
                "[MapBridge] Dropping message from stale {} (current: {:?})",
                message.instance,
                self.current
            );
            return BridgeDelivery::Stale;
        }

        let signal = BridgeSignal::decode(&message.payload);
        if let BridgeSignal::Unknown(payload) = &signal {
            tracing::warn!(
                "[MapBridge] Unrecognized signal from {}: {:?}",
                message.instance,
                payload
            );
        }
        BridgeDelivery::Signal(signal)
    }

    async fn teardown_current(&mut self) {
        let Some(previous) = self.current.take() else {
            return;
        };
        // A failed unload still retires the instance: its messages are dropped from now on
        if let Err(e) = self.runtime.unload(previous).await {
            tracing::warn!("[MapBridge] Failed to unload {}: {}", previous, e);
        } else {
            tracing::debug!("[MapBridge] Unloaded {}", previous);
        }
    }
}
