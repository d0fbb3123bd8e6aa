//! Map document generation.
//!
//! Turns a [`SessionParameters`] snapshot into a self-contained HTML document
//! that drives the TomTom web SDK. Rendering is pure: the same parameters and
//! settings always produce the same document.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use wayfarer_core::config::RootConfig;
use wayfarer_core::session::{Document, READY_TAG, ROUTE_FAILED_TAG, SessionParameters};
use wayfarer_core::{Incident, Result, WayfarerError};

const TEMPLATE_NAME: &str = "map_document.html";
const TEMPLATE_SOURCE: &str = include_str!("templates/map_document.html");
const SDK_CDN_BASE: &str = "https://api.tomtom.com/maps-sdk-for-web/cdn/6.x";

/// Provider settings baked into every generated document.
#[derive(Debug, Clone, PartialEq)]
pub struct MapDocumentSettings {
    pub api_key: String,
    pub sdk_version: String,
    pub zoom: u8,
    pub route_padding: u32,
}

impl MapDocumentSettings {
    pub fn from_config(config: &RootConfig) -> Self {
        Self {
            api_key: config.provider.api_key.clone(),
            sdk_version: config.provider.sdk_version.clone(),
            zoom: config.map.zoom,
            route_padding: config.map.route_padding,
        }
    }

    fn sdk_base_url(&self) -> String {
        format!("{}/{}", SDK_CDN_BASE, self.sdk_version)
    }
}

#[derive(Serialize)]
struct DocumentContext<'a> {
    api_key: &'a str,
    sdk_base_url: String,
    zoom: u8,
    route_padding: u32,
    ready_tag: &'static str,
    route_failed_tag: &'static str,
    origin: [f64; 2],
    destination: Option<[f64; 2]>,
    route_type: String,
    travel_mode: String,
    incidents: Vec<IncidentView<'a>>,
    is_navigating: bool,
}

#[derive(Serialize)]
struct IncidentView<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(rename = "type")]
    kind: &'a str,
    position: [f64; 2],
    color: &'static str,
    description: &'a str,
}

impl<'a> From<&'a Incident> for IncidentView<'a> {
    fn from(incident: &'a Incident) -> Self {
        Self {
            id: incident.id.as_deref(),
            kind: &incident.kind,
            position: incident.position().lng_lat(),
            color: incident.marker_color(),
            description: &incident.description,
        }
    }
}

/// Renders map documents from session parameters.
pub struct ContentGenerator {
    env: Environment<'static>,
    settings: MapDocumentSettings,
}

impl ContentGenerator {
    /// Creates a generator with the template compiled once up front.
    ///
    /// # Errors
    ///
    /// `WayfarerError::Config` if the API key is blank or the SDK version
    /// contains characters that cannot appear in a CDN path, and
    /// `WayfarerError::Template` if the bundled template fails to compile.
    pub fn new(settings: MapDocumentSettings) -> Result<Self> {
        if settings.api_key.trim().is_empty() {
            return Err(WayfarerError::config("Map documents require a provider API key"));
        }
        if settings.sdk_version.is_empty()
            || !settings
                .sdk_version
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(WayfarerError::config(format!(
                "Invalid SDK version '{}'",
                settings.sdk_version
            )));
        }

        Self::with_template_source(settings, TEMPLATE_SOURCE)
    }

    /// Compiles `source` in place of the bundled template.
    pub(crate) fn with_template_source(
        settings: MapDocumentSettings,
        source: &'static str,
    ) -> Result<Self> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        env.add_template(TEMPLATE_NAME, source)
            .map_err(template_error)?;

        Ok(Self { env, settings })
    }

    pub fn from_config(config: &RootConfig) -> Result<Self> {
        Self::new(MapDocumentSettings::from_config(config))
    }

    pub fn settings(&self) -> &MapDocumentSettings {
        &self.settings
    }

    /// Generates the document for one parameter snapshot.
    ///
    /// Optional steps are left out of the document entirely: no route call
    /// without a destination, no incident helper without incidents and no
    /// position watch unless navigating.
    ///
    /// # Errors
    ///
    /// `WayfarerError::Template` if rendering fails.
    pub fn generate(&self, params: &SessionParameters) -> Result<Document> {
        let context = DocumentContext {
            api_key: &self.settings.api_key,
            sdk_base_url: self.settings.sdk_base_url(),
            zoom: self.settings.zoom,
            route_padding: self.settings.route_padding,
            ready_tag: READY_TAG,
            route_failed_tag: ROUTE_FAILED_TAG,
            origin: params.current_location().lng_lat(),
            destination: params.destination().map(|d| d.lng_lat()),
            route_type: params.route_type().to_string(),
            travel_mode: params.transport_mode().to_string(),
            incidents: params.incidents().iter().map(IncidentView::from).collect(),
            is_navigating: params.is_navigating(),
        };

        let template = self
            .env
            .get_template(TEMPLATE_NAME)
            .map_err(template_error)?;
        let html = template.render(&context).map_err(template_error)?;

        tracing::debug!(
            "[MapDocument] Generated {} bytes (destination: {}, incidents: {}, navigating: {})",
            html.len(),
            params.destination().is_some(),
            params.incidents().len(),
            params.is_navigating()
        );
        Ok(Document::new(html))
    }
}

fn template_error(err: minijinja::Error) -> WayfarerError {
    WayfarerError::template(err.to_string())
}
