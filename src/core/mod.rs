pub mod catalog;
pub mod earthquake;
pub mod weather;

pub use crate::domain::model::{
    EarthquakeReport, ForecastEntry, Location, RegionDescriptor, WeatherForecast, WeatherPoint,
};
pub use crate::domain::ports::{
    ConfigProvider, Payload, ProxyRoute, ResponseType, Storage, Transport,
};
pub use crate::utils::error::Result;
