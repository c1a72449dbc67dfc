use crate::core::{EarthquakeReport, RegionDescriptor, WeatherForecast};
use crate::domain::model::PLACEHOLDER;
use crate::utils::error::{BmkgError, Result};
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

const REPORT_HEADERS: [&str; 11] = [
    "date",
    "time",
    "date_time",
    "magnitude",
    "depth",
    "latitude",
    "longitude",
    "region",
    "potential",
    "felt",
    "shakemap_url",
];

const FORECAST_HEADERS: [&str; 9] = [
    "adm4",
    "village",
    "local_datetime",
    "temperature",
    "humidity",
    "weather_desc",
    "wind_speed",
    "wind_direction",
    "image",
];

fn report_row(report: &EarthquakeReport) -> [&str; 11] {
    [
        report.date.as_str(),
        report.time.as_str(),
        report.date_time.as_str(),
        report.magnitude.as_str(),
        report.depth.as_str(),
        report.latitude.as_str(),
        report.longitude.as_str(),
        report.region.as_str(),
        report.potential.as_str(),
        report.felt.as_str(),
        report.shakemap_url.as_str(),
    ]
}

/// A forecast reading as text; anything but a number renders as the placeholder.
fn reading(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Number(n) => n.to_string(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn to_csv<I, R>(headers: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = R>,
    R: IntoIterator,
    R::Item: AsRef<[u8]>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| BmkgError::IoError(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| BmkgError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// `None` renders as an explicit "no data" value in every format.
pub fn render_earthquake(report: Option<&EarthquakeReport>, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&report)?),
        OutputFormat::Csv => to_csv(&REPORT_HEADERS, report.map(report_row)),
        OutputFormat::Table => {
            let Some(report) = report else {
                return Ok("No earthquake data available\n".to_string());
            };

            let mut out = String::new();
            for (label, value) in [
                "Date", "Time", "DateTime", "Magnitude", "Depth", "Latitude", "Longitude",
                "Region", "Potential", "Felt", "Shakemap",
            ]
            .iter()
            .zip(report_row(report))
            {
                let _ = writeln!(out, "{:<10} {}", label, value);
            }
            Ok(out)
        }
    }
}

pub fn render_forecast(forecast: &WeatherForecast, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(forecast)?),
        OutputFormat::Csv => to_csv(
            &FORECAST_HEADERS,
            forecast.points().map(|(location, point)| {
                [
                    location.adm4.clone(),
                    location.village.clone(),
                    point.local_datetime.clone(),
                    reading(&point.temperature),
                    reading(&point.humidity),
                    point.weather_desc.clone(),
                    reading(&point.wind_speed),
                    point.wind_direction.clone(),
                    point.image.clone(),
                ]
            }),
        ),
        OutputFormat::Table => {
            let location = &forecast.location;
            let mut out = String::new();
            let _ = writeln!(
                out,
                "{}, {}, {}, {} ({})",
                location.village,
                location.district,
                location.regency,
                location.province,
                location.adm4
            );

            for entry in &forecast.entries {
                for day in &entry.days {
                    let _ = writeln!(out);
                    for point in day {
                        let _ = writeln!(
                            out,
                            "{:<20} {:>4}°C {:>4}% {:>6} km/h {:<4} {}",
                            point.local_datetime,
                            reading(&point.temperature),
                            reading(&point.humidity),
                            reading(&point.wind_speed),
                            point.wind_direction,
                            point.weather_desc
                        );
                    }
                }
            }
            Ok(out)
        }
    }
}

pub fn render_regions(regions: &[&RegionDescriptor], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(regions)?),
        OutputFormat::Csv => to_csv(
            &["code", "name"],
            regions
                .iter()
                .map(|region| [region.code().unwrap_or("-"), region.name().unwrap_or("-")]),
        ),
        OutputFormat::Table => {
            let mut out = String::new();
            for region in regions {
                let _ = writeln!(
                    out,
                    "{:<8} {}",
                    region.code().unwrap_or("-"),
                    region.name().unwrap_or("-")
                );
            }
            Ok(out)
        }
    }
}
