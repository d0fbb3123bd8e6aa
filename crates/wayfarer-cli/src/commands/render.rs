use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use wayfarer_application::{ContentGenerator, resolve_location};
use wayfarer_core::config::RootConfig;
use wayfarer_core::location::LocationProvider;
use wayfarer_core::session::SessionParameters;
use wayfarer_core::{Coordinates, Incident, RouteType, TransportMode, WayfarerError};

pub struct RenderOptions {
    pub location: Option<(f64, f64)>,
    pub destination: Option<Coordinates>,
    pub incidents: Option<PathBuf>,
    pub route_type: RouteType,
    pub transport_mode: TransportMode,
    pub navigate: bool,
    pub out: Option<PathBuf>,
}

/// Position given on the command line; there is no device to ask otherwise.
struct ArgumentLocation(Option<Coordinates>);

#[async_trait]
impl LocationProvider for ArgumentLocation {
    async fn current_position(&self) -> wayfarer_core::Result<Coordinates> {
        self.0
            .ok_or_else(|| WayfarerError::internal("No position given on the command line"))
    }
}

pub async fn run(config: &RootConfig, options: RenderOptions) -> Result<()> {
    let provider = ArgumentLocation(
        options
            .location
            .map(|(lat, lon)| Coordinates::new(lat, lon)),
    );
    let fix = resolve_location(&provider, config.map.default_location()).await;
    if fix.is_fallback() {
        eprintln!(
            "Using default location {}, {}",
            fix.coordinates.latitude, fix.coordinates.longitude
        );
    }

    let incidents = match &options.incidents {
        Some(path) => read_incidents(path)?,
        None => Vec::new(),
    };

    let params = SessionParameters::new(fix.coordinates)
        .with_destination(options.destination)
        .with_incidents(incidents)
        .with_route_type(options.route_type)
        .with_transport_mode(options.transport_mode)
        .with_navigating(options.navigate);

    let generator = ContentGenerator::from_config(config)?;
    let document = generator.generate(&params)?;

    match &options.out {
        Some(path) => {
            std::fs::write(path, document.as_str())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Wrote {} bytes to {}", document.len(), path.display());
        }
        None => println!("{}", document.as_str()),
    }
    Ok(())
}

fn read_incidents(path: &Path) -> Result<Vec<Incident>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid incidents in {}", path.display()))
}

/// Parses `LAT,LON`.
pub fn parse_coordinates(value: &str) -> Result<Coordinates, String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{value}'"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("invalid latitude '{}'", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|_| format!("invalid longitude '{}'", lon.trim()))?;

    let coordinates = Coordinates::new(lat, lon);
    if !coordinates.is_finite() {
        return Err(format!("coordinates must be finite, got '{value}'"));
    }
    Ok(coordinates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_coordinates() {
        assert_eq!(
            parse_coordinates("45.7640, 4.8357").unwrap(),
            Coordinates::new(45.764, 4.8357)
        );
        assert_eq!(
            parse_coordinates("-33.8688,151.2093").unwrap(),
            Coordinates::new(-33.8688, 151.2093)
        );
        assert!(parse_coordinates("45.7640").is_err());
        assert!(parse_coordinates("north,4.8").is_err());
        assert!(parse_coordinates("inf,4.8").is_err());
    }

    #[test]
    fn test_read_incidents_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("incidents.json");
        std::fs::write(
            &path,
            r#"[{"type":"accident","latitude":48.85,"longitude":2.35,"description":"Crash"}]"#,
        )
        .unwrap();

        let incidents = read_incidents(&path).unwrap();
        assert_eq!(incidents.len(), 1);
        assert_eq!(incidents[0].kind, "accident");
    }
}
