//! Embedded runtime seam.
//!
//! The host platform (a webview on mobile or desktop) implements
//! [`EmbeddedRuntime`]. The runtime is responsible for tagging every message
//! a document posts with the [`InstanceId`] it was loaded under.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// A self-contained, renderable map document (markup + script).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.html
    }

    pub fn into_string(self) -> String {
        self.html
    }

    pub fn len(&self) -> usize {
        self.html.len()
    }

    pub fn is_empty(&self) -> bool {
        self.html.is_empty()
    }
}

/// Generation token of one mounted document.
///
/// Tokens increase strictly with every mount performed by a bridge, so a
/// message carrying an older token always belongs to a torn-down instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InstanceId(u64);

impl InstanceId {
    pub fn new(generation: u64) -> Self {
        Self(generation)
    }

    pub fn generation(&self) -> u64 {
        self.0
    }

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "instance-{}", self.0)
    }
}

/// Raw message posted by an embedded document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Instance that posted the message.
    pub instance: InstanceId,
    /// Undecoded string payload.
    pub payload: String,
}

impl InboundMessage {
    pub fn new(instance: InstanceId, payload: impl Into<String>) -> Self {
        Self {
            instance,
            payload: payload.into(),
        }
    }
}

/// Browser-capable surface that executes generated documents.
///
/// At most one instance is loaded at a time; the bridge always unloads the
/// previous instance before loading the next one. Unloading must stop all of
/// the instance's pending work (route fetch, position watch).
#[async_trait]
pub trait EmbeddedRuntime: Send + Sync {
    /// Loads `document` as instance `instance`.
    async fn load(&self, instance: InstanceId, document: &Document) -> Result<()>;

    /// Tears down instance `instance`.
    async fn unload(&self, instance: InstanceId) -> Result<()>;
}
