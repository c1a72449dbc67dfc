use crate::core::{ResponseType, Transport};
use crate::domain::model::WeatherForecast;
use crate::utils::error::Result;

/// Relative path of the public forecast endpoint; the transport routes it to
/// `https://api.bmkg.go.id/publik/prakiraan-cuaca`.
pub const FORECAST_PATH: &str = "/api-bmkg/publik/prakiraan-cuaca";

pub struct WeatherClient<T: Transport> {
    transport: T,
}

impl<T: Transport> WeatherClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches the forecast for a level-4 region code (`adm4`, e.g. `35.78.01.1002`).
    ///
    /// The body is returned as received. Failures are logged and handed back
    /// untouched so the caller can offer a retry.
    pub async fn weather_by_region(&self, region_code: &str) -> Result<WeatherForecast> {
        tracing::debug!("Requesting forecast for adm4={}", region_code);

        match self.fetch(region_code).await {
            Ok(forecast) => {
                tracing::info!(
                    "Forecast for {} ({}): {} location(s), {} time step(s)",
                    region_code,
                    forecast.location.village,
                    forecast.entries.len(),
                    forecast.points().count()
                );
                Ok(forecast)
            }
            Err(e) => {
                tracing::error!("Failed to fetch forecast for {}: {}", region_code, e);
                Err(e)
            }
        }
    }

    async fn fetch(&self, region_code: &str) -> Result<WeatherForecast> {
        // Request the forecast as JSON, keyed by adm4
        let body = self
            .transport
            .get(FORECAST_PATH, &[("adm4", region_code)], ResponseType::Json)
            .await?
            .into_json()?;

        // Only the shape is checked; field values pass through as received
        Ok(serde_json::from_value(body)?)
    }
}
