use std::sync::Arc;

use anyhow::{Result, bail};
use wayfarer_application::SuggestionSearch;
use wayfarer_core::config::RootConfig;
use wayfarer_infrastructure::TomTomSearchClient;

pub async fn run(config: &RootConfig, query: &str) -> Result<()> {
    let client = TomTomSearchClient::new(&config.provider)?;
    let search = SuggestionSearch::new(Arc::new(client));

    let suggestions = match search.suggest(query).await {
        Ok(suggestions) => suggestions,
        Err(alert) => bail!("{}: {}", alert.title, alert.message),
    };

    if suggestions.is_empty() {
        println!("No results.");
        return Ok(());
    }

    for suggestion in &suggestions {
        let coordinates = search.select(suggestion);
        println!("{}", suggestion.address.freeform_address);
        println!(
            "    {} ({:.5}, {:.5})",
            suggestion.locality(),
            coordinates.latitude,
            coordinates.longitude
        );
    }
    Ok(())
}
