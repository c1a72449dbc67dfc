//! Typed access to BMKG public data: the latest earthquake bulletin, village-level
//! weather forecasts, and a bundled catalog of East Java regions.
//!
//! ```no_run
//! use bmkg_feed::{EarthquakeClient, ReqwestTransport, WeatherClient};
//!
//! # async fn run() -> bmkg_feed::Result<()> {
//! let transport = ReqwestTransport::default();
//!
//! // `None` when there is no event or the bulletin could not be fetched.
//! let latest = EarthquakeClient::new(transport.clone()).latest_earthquake().await;
//!
//! // Errors are returned to the caller.
//! let forecast = WeatherClient::new(transport)
//!     .weather_by_region("35.78.01.1002")
//!     .await?;
//! # let _ = (latest, forecast);
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::AppConfig;

pub use adapters::{LocalStorage, ReqwestTransport};
pub use core::{
    catalog::RegionCatalog, earthquake::EarthquakeClient, weather::WeatherClient,
    EarthquakeReport, RegionDescriptor, WeatherForecast, WeatherPoint,
};
pub use utils::error::{BmkgError, Result};
