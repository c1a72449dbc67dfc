use bmkg_feed::core::ProxyRoute;
use bmkg_feed::{EarthquakeClient, ReqwestTransport};
use httpmock::prelude::*;

const BULLETIN_PATH: &str = "/DataMKG/TEWS/autogempa.xml";

fn client_for(server: &MockServer) -> EarthquakeClient<ReqwestTransport> {
    let transport =
        ReqwestTransport::new(vec![ProxyRoute::new("/gempa-bmkg", server.base_url())]);
    EarthquakeClient::new(transport)
}

#[tokio::test]
async fn test_latest_earthquake_full_bulletin() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(BULLETIN_PATH);
        then.status(200)
            .header("Content-Type", "text/xml")
            .body(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<Infogempa>
  <gempa>
    <Tanggal>16 Okt 2026</Tanggal>
    <Jam>03:12:45 WIB</Jam>
    <DateTime>2026-10-15T20:12:45+00:00</DateTime>
    <Lintang>8.94 LS</Lintang>
    <Bujur>112.41 BT</Bujur>
    <Magnitude>5.1</Magnitude>
    <Kedalaman>10 km</Kedalaman>
    <Wilayah>Pusat gempa berada di laut 78 km BaratDaya Kab. Blitar</Wilayah>
    <Potensi>Tidak berpotensi tsunami</Potensi>
    <Dirasakan>III Blitar</Dirasakan>
    <Shakemap>20261016031245.mmi.jpg</Shakemap>
  </gempa>
</Infogempa>"#,
            );
    });

    let report = client_for(&server).latest_earthquake().await.unwrap();

    api_mock.assert();
    assert_eq!(report.date, "16 Okt 2026");
    assert_eq!(report.time, "03:12:45 WIB");
    assert_eq!(report.magnitude, "5.1");
    assert_eq!(report.depth, "10 km");
    assert_eq!(report.potential, "Tidak berpotensi tsunami");
    assert_eq!(report.felt, "III Blitar");
    assert_eq!(
        report.shakemap_url,
        "https://data.bmkg.go.id/DataMKG/TEWS/20261016031245.mmi.jpg"
    );
}

#[tokio::test]
async fn test_partial_bulletin_fills_placeholders() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(BULLETIN_PATH);
        then.status(200).body(
            "<Infogempa><gempa><Tanggal>01 Jan 2024</Tanggal><Magnitude>5.0</Magnitude><Shakemap>x.jpg</Shakemap></gempa></Infogempa>",
        );
    });

    let report = client_for(&server).latest_earthquake().await.unwrap();

    api_mock.assert();
    assert_eq!(report.date, "01 Jan 2024");
    assert_eq!(report.magnitude, "5.0");
    assert_eq!(report.time, "-");
    assert_eq!(report.region, "-");
    assert_eq!(report.shakemap_url, "https://data.bmkg.go.id/DataMKG/TEWS/x.jpg");
}

#[tokio::test]
async fn test_bulletin_without_event_is_none() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(BULLETIN_PATH);
        then.status(200).body("<Infogempa></Infogempa>");
    });

    assert!(client_for(&server).latest_earthquake().await.is_none());
    api_mock.assert();
}

#[tokio::test]
async fn test_server_error_is_none() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(BULLETIN_PATH);
        then.status(500);
    });

    assert!(client_for(&server).latest_earthquake().await.is_none());
    api_mock.assert();
}

#[tokio::test]
async fn test_malformed_body_is_none() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(BULLETIN_PATH);
        then.status(200).body("<html><body>Service Unavailable");
    });

    assert!(client_for(&server).latest_earthquake().await.is_none());
    api_mock.assert();
}

#[tokio::test]
async fn test_unreachable_upstream_is_none() {
    // nothing listens on port 1
    let transport =
        ReqwestTransport::new(vec![ProxyRoute::new("/gempa-bmkg", "http://127.0.0.1:1")]);

    assert!(EarthquakeClient::new(transport)
        .latest_earthquake()
        .await
        .is_none());
}

#[tokio::test]
async fn test_missing_route_is_none() {
    let transport = ReqwestTransport::new(vec![ProxyRoute::new(
        "/api-bmkg",
        "http://127.0.0.1:1",
    )]);

    assert!(EarthquakeClient::new(transport)
        .latest_earthquake()
        .await
        .is_none());
}
