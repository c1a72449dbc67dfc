use crate::core::{ResponseType, Transport};
use crate::domain::model::{EarthquakeReport, PLACEHOLDER, SHAKEMAP_BASE_URL};
use crate::utils::error::Result;
use roxmltree::{Document, Node};

/// Relative path of the latest-event bulletin; the transport routes it to
/// `https://data.bmkg.go.id/DataMKG/TEWS/autogempa.xml`.
pub const EARTHQUAKE_PATH: &str = "/gempa-bmkg/DataMKG/TEWS/autogempa.xml";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportField {
    Date,
    Time,
    DateTime,
    Magnitude,
    Depth,
    Latitude,
    Longitude,
    Region,
    Potential,
    Felt,
    Shakemap,
}

/// Which bulletin tag feeds which report field.
pub const FIELD_TAGS: [(ReportField, &str); 11] = [
    (ReportField::Date, "Tanggal"),
    (ReportField::Time, "Jam"),
    (ReportField::DateTime, "DateTime"),
    (ReportField::Magnitude, "Magnitude"),
    (ReportField::Depth, "Kedalaman"),
    (ReportField::Latitude, "Lintang"),
    (ReportField::Longitude, "Bujur"),
    (ReportField::Region, "Wilayah"),
    (ReportField::Potential, "Potensi"),
    (ReportField::Felt, "Dirasakan"),
    (ReportField::Shakemap, "Shakemap"),
];

impl EarthquakeReport {
    fn with_field(mut self, field: ReportField, value: String) -> Self {
        match field {
            ReportField::Date => self.date = value,
            ReportField::Time => self.time = value,
            ReportField::DateTime => self.date_time = value,
            ReportField::Magnitude => self.magnitude = value,
            ReportField::Depth => self.depth = value,
            ReportField::Latitude => self.latitude = value,
            ReportField::Longitude => self.longitude = value,
            ReportField::Region => self.region = value,
            ReportField::Potential => self.potential = value,
            ReportField::Felt => self.felt = value,
            ReportField::Shakemap => self.shakemap_url = format!("{}{}", SHAKEMAP_BASE_URL, value),
        }
        self
    }
}

/// Concatenated text of the first descendant element named `tag`, or the
/// placeholder when that element is missing or has no text.
fn tag_text(node: Node<'_, '_>, tag: &str) -> String {
    let text: String = node
        .descendants()
        .skip(1)
        .find(|n| n.is_element() && n.has_tag_name(tag))
        .map(|element| {
            element
                .descendants()
                .filter(|n| n.is_text())
                .filter_map(|n| n.text())
                .collect()
        })
        .unwrap_or_default();

    if text.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        text
    }
}

/// First `gempa` element in document order whose parent is an `Infogempa`.
fn find_event<'a, 'input>(document: &'a Document<'input>) -> Option<Node<'a, 'input>> {
    document.descendants().find(|n| {
        n.is_element()
            && n.has_tag_name("gempa")
            && n.parent_element()
                .is_some_and(|parent| parent.has_tag_name("Infogempa"))
    })
}

/// Parses an `autogempa.xml` body.
///
/// `Ok(None)` means the document is well formed but carries no `Infogempa > gempa`
/// event. Missing tags never fail the parse; they become `"-"`.
pub fn parse_bulletin(xml: &str) -> Result<Option<EarthquakeReport>> {
    let document = Document::parse(xml)?;

    let Some(event) = find_event(&document) else {
        return Ok(None);
    };

    // Fold every mapped tag into a report that starts out all placeholders
    let report = FIELD_TAGS
        .iter()
        .fold(EarthquakeReport::placeholder(), |report, (field, tag)| {
            report.with_field(*field, tag_text(event, tag))
        });

    Ok(Some(report))
}

pub struct EarthquakeClient<T: Transport> {
    transport: T,
}

impl<T: Transport> EarthquakeClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Fetches the most recent event.
    ///
    /// Never fails: transport and parse faults are logged and reported as `None`,
    /// the same as a bulletin without an event.
    pub async fn latest_earthquake(&self) -> Option<EarthquakeReport> {
        match self.fetch().await {
            Ok(Some(report)) => {
                tracing::info!(
                    "Latest earthquake: M{} {} ({} {})",
                    report.magnitude,
                    report.region,
                    report.date,
                    report.time
                );
                Some(report)
            }
            Ok(None) => {
                tracing::info!("Bulletin has no Infogempa > gempa event");
                None
            }
            Err(e) => {
                tracing::error!("Failed to fetch earthquake bulletin: {}", e);
                None
            }
        }
    }

    async fn fetch(&self) -> Result<Option<EarthquakeReport>> {
        // Fetch the bulletin as plain text
        let body = self
            .transport
            .get(EARTHQUAKE_PATH, &[], ResponseType::Text)
            .await?
            .into_text()?;

        tracing::debug!("Received bulletin ({} bytes)", body.len());

        // Parse and map the event, if any
        parse_bulletin(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_BULLETIN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Infogempa>
  <gempa>
    <Tanggal>16 Okt 2026</Tanggal>
    <Jam>03:12:45 WIB</Jam>
    <DateTime>2026-10-15T20:12:45+00:00</DateTime>
    <point><coordinates>112.41,-8.94</coordinates></point>
    <Lintang>8.94 LS</Lintang>
    <Bujur>112.41 BT</Bujur>
    <Magnitude>5.1</Magnitude>
    <Kedalaman>10 km</Kedalaman>
    <Wilayah>Pusat gempa berada di laut 78 km BaratDaya Kab. Blitar</Wilayah>
    <Potensi>Gempa ini dirasakan untuk diteruskan pada masyarakat</Potensi>
    <Dirasakan>III Blitar, III Malang</Dirasakan>
    <Shakemap>20261016031245.mmi.jpg</Shakemap>
  </gempa>
</Infogempa>"#;

    #[test]
    fn test_all_tags_present() {
        let report = parse_bulletin(FULL_BULLETIN).unwrap().unwrap();

        assert_eq!(report.date, "16 Okt 2026");
        assert_eq!(report.time, "03:12:45 WIB");
        assert_eq!(report.date_time, "2026-10-15T20:12:45+00:00");
        assert_eq!(report.magnitude, "5.1");
        assert_eq!(report.depth, "10 km");
        assert_eq!(report.latitude, "8.94 LS");
        assert_eq!(report.longitude, "112.41 BT");
        assert_eq!(
            report.region,
            "Pusat gempa berada di laut 78 km BaratDaya Kab. Blitar"
        );
        assert_eq!(
            report.potential,
            "Gempa ini dirasakan untuk diteruskan pada masyarakat"
        );
        assert_eq!(report.felt, "III Blitar, III Malang");
        assert_eq!(
            report.shakemap_url,
            "https://data.bmkg.go.id/DataMKG/TEWS/20261016031245.mmi.jpg"
        );
    }

    #[test]
    fn test_partial_bulletin_uses_placeholders() {
        let xml = "<Infogempa><gempa><Tanggal>01 Jan 2024</Tanggal><Magnitude>5.0</Magnitude><Shakemap>x.jpg</Shakemap></gempa></Infogempa>";
        let report = parse_bulletin(xml).unwrap().unwrap();

        assert_eq!(report.date, "01 Jan 2024");
        assert_eq!(report.magnitude, "5.0");
        assert_eq!(report.shakemap_url, "https://data.bmkg.go.id/DataMKG/TEWS/x.jpg");
        for value in [
            &report.time,
            &report.date_time,
            &report.depth,
            &report.latitude,
            &report.longitude,
            &report.region,
            &report.potential,
            &report.felt,
        ] {
            assert_eq!(value, "-");
        }
    }

    #[test]
    fn test_each_missing_tag_only_affects_its_field() {
        let full = parse_bulletin(FULL_BULLETIN).unwrap().unwrap();

        for (field, tag) in FIELD_TAGS {
            let open = format!("<{}>", tag);
            let close = format!("</{}>", tag);
            let start = FULL_BULLETIN.find(&open).unwrap();
            let end = FULL_BULLETIN.find(&close).unwrap() + close.len();
            let xml = format!("{}{}", &FULL_BULLETIN[..start], &FULL_BULLETIN[end..]);

            let report = parse_bulletin(&xml).unwrap().unwrap();
            let expected = full.clone().with_field(field, PLACEHOLDER.to_string());
            assert_eq!(report, expected, "removing <{}>", tag);
        }
    }

    #[test]
    fn test_missing_shakemap_ends_in_placeholder() {
        let xml = "<Infogempa><gempa><Magnitude>4.2</Magnitude></gempa></Infogempa>";
        let report = parse_bulletin(xml).unwrap().unwrap();
        assert_eq!(report.shakemap_url, "https://data.bmkg.go.id/DataMKG/TEWS/-");
    }

    #[test]
    fn test_empty_tag_is_placeholder() {
        let xml = "<Infogempa><gempa><Dirasakan></Dirasakan><Jam/></gempa></Infogempa>";
        let report = parse_bulletin(xml).unwrap().unwrap();
        assert_eq!(report.felt, "-");
        assert_eq!(report.time, "-");
    }

    #[test]
    fn test_missing_root_path_is_none() {
        assert!(parse_bulletin("<Infogempa></Infogempa>").unwrap().is_none());
        assert!(parse_bulletin("<gempa><Magnitude>5.0</Magnitude></gempa>")
            .unwrap()
            .is_none());
        // gempa must be a direct child
        assert!(
            parse_bulletin("<Infogempa><wrap><gempa/></wrap></Infogempa>")
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_nested_root_is_found() {
        let xml = "<feed><Infogempa><gempa><Magnitude>6.0</Magnitude></gempa></Infogempa></feed>";
        let report = parse_bulletin(xml).unwrap().unwrap();
        assert_eq!(report.magnitude, "6.0");
    }

    #[test]
    fn test_event_is_first_gempa_in_document_order() {
        let xml = "<Infogempa><Infogempa><gempa><Magnitude>B</Magnitude></gempa></Infogempa><gempa><Magnitude>A</Magnitude></gempa></Infogempa>";
        let report = parse_bulletin(xml).unwrap().unwrap();
        assert_eq!(report.magnitude, "B");
    }

    #[test]
    fn test_first_matching_tag_wins() {
        let xml = "<Infogempa><gempa><Magnitude>5.0</Magnitude></gempa><gempa><Magnitude>7.0</Magnitude></gempa></Infogempa>";
        let report = parse_bulletin(xml).unwrap().unwrap();
        assert_eq!(report.magnitude, "5.0");
    }

    #[test]
    fn test_malformed_xml_is_an_error() {
        assert!(parse_bulletin("<Infogempa><gempa>").is_err());
        assert!(parse_bulletin("not xml at all").is_err());
    }
}
