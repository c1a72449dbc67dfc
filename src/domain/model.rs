use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Value used for any bulletin field the upstream document leaves out or empty.
pub const PLACEHOLDER: &str = "-";

/// Prefix that turns the bulletin's `Shakemap` filename into a full URL.
pub const SHAKEMAP_BASE_URL: &str = "https://data.bmkg.go.id/DataMKG/TEWS/";

/// The most recent seismic event, as published in `autogempa.xml`.
///
/// Every field is kept as the upstream text; BMKG does not guarantee a numeric
/// format (`"5.0"`, `"10 km"`, `"7.12 LS"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EarthquakeReport {
    pub date: String,
    pub time: String,
    pub date_time: String,
    pub magnitude: String,
    pub depth: String,
    pub latitude: String,
    pub longitude: String,
    pub region: String,
    pub potential: String,
    pub felt: String,
    pub shakemap_url: String,
}

impl EarthquakeReport {
    /// A report with every field set to [`PLACEHOLDER`].
    pub fn placeholder() -> Self {
        Self {
            date: PLACEHOLDER.to_string(),
            time: PLACEHOLDER.to_string(),
            date_time: PLACEHOLDER.to_string(),
            magnitude: PLACEHOLDER.to_string(),
            depth: PLACEHOLDER.to_string(),
            latitude: PLACEHOLDER.to_string(),
            longitude: PLACEHOLDER.to_string(),
            region: PLACEHOLDER.to_string(),
            potential: PLACEHOLDER.to_string(),
            felt: PLACEHOLDER.to_string(),
            shakemap_url: format!("{}{}", SHAKEMAP_BASE_URL, PLACEHOLDER),
        }
    }
}

/// Administrative identifiers attached to a forecast (`lokasi`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub adm4: String,
    #[serde(rename = "desa")]
    pub village: String,
    #[serde(rename = "kecamatan")]
    pub district: String,
    #[serde(rename = "kotkab")]
    pub regency: String,
    #[serde(rename = "provinsi")]
    pub province: String,
    /// Upstream fields not modelled above (`adm1`, `lat`, `lon`, `timezone`, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Location {
    /// IANA zone name, absent on some responses and `null` on others.
    pub fn timezone(&self) -> Option<&str> {
        self.extra.get("timezone").and_then(Value::as_str)
    }
}

/// One forecast time step (`cuaca[i][j]`).
///
/// Readings are kept as the raw JSON values: integers stay integers and a
/// `null` reading does not reject the forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherPoint {
    pub local_datetime: String,
    #[serde(rename = "t")]
    pub temperature: Value,
    #[serde(rename = "hu")]
    pub humidity: Value,
    pub weather_desc: String,
    #[serde(rename = "ws")]
    pub wind_speed: Value,
    #[serde(rename = "wd")]
    pub wind_direction: String,
    pub image: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeatherPoint {
    pub fn temperature_c(&self) -> Option<f64> {
        self.temperature.as_f64()
    }

    pub fn humidity_percent(&self) -> Option<f64> {
        self.humidity.as_f64()
    }

    pub fn wind_speed_kmh(&self) -> Option<f64> {
        self.wind_speed.as_f64()
    }
}

/// Forecast for one location: days in order, each with its time steps in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastEntry {
    #[serde(rename = "lokasi")]
    pub location: Location,
    #[serde(rename = "cuaca")]
    pub days: Vec<Vec<WeatherPoint>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Response of `publik/prakiraan-cuaca`, unchanged apart from typing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    #[serde(rename = "lokasi")]
    pub location: Location,
    #[serde(rename = "data")]
    pub entries: Vec<ForecastEntry>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WeatherForecast {
    /// Every time step with the location it belongs to, in upstream order.
    pub fn points(&self) -> impl Iterator<Item = (&Location, &WeatherPoint)> {
        self.entries.iter().flat_map(|entry| {
            entry
                .days
                .iter()
                .flatten()
                .map(move |point| (&entry.location, point))
        })
    }
}

/// One partition of the region catalog, kept exactly as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionDescriptor(pub Value);

impl RegionDescriptor {
    pub fn code(&self) -> Option<&str> {
        self.0.get("kode").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.0.get("nama").and_then(Value::as_str)
    }

    /// Every `kode` found anywhere inside the descriptor, depth first.
    pub fn codes(&self) -> Vec<&str> {
        let mut codes = Vec::new();
        collect_codes(&self.0, &mut codes);
        codes
    }
}

fn collect_codes<'a>(value: &'a Value, codes: &mut Vec<&'a str>) {
    match value {
        Value::Object(map) => {
            if let Some(code) = map.get("kode").and_then(Value::as_str) {
                codes.push(code);
            }
            for (key, child) in map {
                if key != "kode" {
                    collect_codes(child, codes);
                }
            }
        }
        Value::Array(items) => items.iter().for_each(|item| collect_codes(item, codes)),
        _ => {}
    }
}
