use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::WeatherConfig;
use crate::fetch::Fetch;
use crate::Result;

/// Current-conditions snapshot with an explicit error slot. The dashboard
/// renders placeholders off `error` instead of the call failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub temp_f: Option<i32>,
    pub condition: Option<String>,
    pub wind_mph: Option<i32>,
    pub error: Option<String>,
}

impl WeatherReport {
    fn unavailable(reason: String) -> Self {
        Self {
            temp_f: None,
            condition: None,
            wind_mph: None,
            error: Some(reason),
        }
    }
}

#[derive(Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    current: CurrentConditions,
}

#[derive(Deserialize, Default)]
struct CurrentConditions {
    temperature_2m: Option<f64>,
    weather_code: Option<u32>,
    wind_speed_10m: Option<f64>,
}

/// WMO weather code to a short display label.
fn condition_label(code: u32) -> &'static str {
    match code {
        0 => "Clear",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 | 48 => "Fog",
        51 | 53 | 55 => "Drizzle",
        61 | 63 | 65 => "Rain",
        71 | 73 | 75 => "Snow",
        80 | 81 | 82 => "Showers",
        95 | 96 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Open-Meteo client for the configured coordinates.
pub struct WeatherClient {
    fetcher: Arc<dyn Fetch>,
    config: WeatherConfig,
}

impl WeatherClient {
    pub fn new(fetcher: Arc<dyn Fetch>, config: WeatherConfig) -> Self {
        Self { fetcher, config }
    }

    fn forecast_url(&self) -> String {
        format!(
            "https://api.open-meteo.com/v1/forecast?latitude={}&longitude={}&current=temperature_2m,weather_code,wind_speed_10m",
            self.config.latitude, self.config.longitude
        )
    }

    /// Fetch current conditions; failures come back inside the report.
    pub async fn current(&self) -> WeatherReport {
        match self.try_current().await {
            Ok(report) => report,
            Err(e) => {
                tracing::warn!("Weather fetch failed: {}", e);
                WeatherReport::unavailable(e.to_string())
            }
        }
    }

    async fn try_current(&self) -> Result<WeatherReport> {
        let body = self.fetcher.get_text(&self.forecast_url()).await?;
        let parsed: ForecastResponse = serde_json::from_str(&body)?;
        let current = parsed.current;

        Ok(WeatherReport {
            temp_f: current
                .temperature_2m
                .map(|celsius| (celsius * 9.0 / 5.0 + 32.0).round() as i32),
            condition: current
                .weather_code
                .map(|code| condition_label(code).to_string()),
            wind_mph: current
                .wind_speed_10m
                .map(|kmh| (kmh * 0.621371).round() as i32),
            error: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::StubFetcher;

    fn client(fetcher: StubFetcher) -> WeatherClient {
        WeatherClient::new(Arc::new(fetcher), WeatherConfig::default())
    }

    fn forecast_url() -> String {
        WeatherClient::new(
            Arc::new(StubFetcher::new()),
            WeatherConfig::default(),
        )
        .forecast_url()
    }

    #[test]
    fn condition_labels_cover_the_wmo_groups() {
        assert_eq!(condition_label(0), "Clear");
        assert_eq!(condition_label(2), "Partly Cloudy");
        assert_eq!(condition_label(48), "Fog");
        assert_eq!(condition_label(63), "Rain");
        assert_eq!(condition_label(82), "Showers");
        assert_eq!(condition_label(96), "Thunderstorm");
        assert_eq!(condition_label(42), "Unknown");
    }

    #[tokio::test]
    async fn converts_units_and_maps_condition() {
        let body = r#"{"current":{"temperature_2m":20.0,"weather_code":3,"wind_speed_10m":10.0}}"#;
        let fetcher = StubFetcher::new().with_body(&forecast_url(), body);

        let report = client(fetcher).current().await;

        assert_eq!(report.temp_f, Some(68));
        assert_eq!(report.condition.as_deref(), Some("Overcast"));
        assert_eq!(report.wind_mph, Some(6));
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn missing_fields_stay_none_without_erroring() {
        let body = r#"{"current":{"weather_code":0}}"#;
        let fetcher = StubFetcher::new().with_body(&forecast_url(), body);

        let report = client(fetcher).current().await;

        assert_eq!(report.temp_f, None);
        assert_eq!(report.condition.as_deref(), Some("Clear"));
        assert!(report.error.is_none());
    }

    #[tokio::test]
    async fn fetch_failure_lands_in_the_error_field() {
        let report = client(StubFetcher::new()).current().await;

        assert!(report.error.is_some());
        assert_eq!(report.temp_f, None);
        assert_eq!(report.condition, None);
    }
}
