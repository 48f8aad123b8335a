use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use hearth_core::fetch::HttpFetcher;
use hearth_core::weather::WeatherClient;
use hearth_core::AppConfig;

pub async fn run(config: &AppConfig) -> Result<()> {
    let fetcher = Arc::new(HttpFetcher::new(Duration::from_secs(
        config.fetch.request_timeout_secs,
    ))?);
    let client = WeatherClient::new(fetcher, config.weather.clone());

    let report = client.current().await;

    if let Some(err) = &report.error {
        println!("Weather unavailable: {}", err);
        return Ok(());
    }

    println!("Weather for {}:", config.weather.city);
    if let Some(temp) = report.temp_f {
        println!("  Temperature: {}°F", temp);
    }
    if let Some(condition) = &report.condition {
        println!("  Conditions: {}", condition);
    }
    if let Some(wind) = report.wind_mph {
        println!("  Wind: {} mph", wind);
    }

    Ok(())
}
