use std::fs;

use serde_json::{json, Value};
use trip_core::build_itinerary;
use trip_publish::{publish, MarkerPatcher, PublishOutcome};
use trip_sheets::{read_workbook, ReadOptions};
use trip_tests::{page_with_marker, write_sheet};

#[test]
fn sheets_are_grouped_by_date_across_cities() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(
        dir.path(),
        "Venice",
        &["3-Jul-25,8:00,Breakfast at hotel,Hotel Danieli,,,"],
    )
    .unwrap();
    write_sheet(
        dir.path(),
        "Rome",
        &["3-Jul-25,19:00,Dinner,Trastevere,,,"],
    )
    .unwrap();

    // Venice sorts after Rome on disk, so read Venice first to keep the
    // encounter order explicit.
    let mut sheets = read_workbook(dir.path(), ReadOptions::default()).unwrap();
    sheets.reverse();

    let itinerary = build_itinerary(&sheets).unwrap();
    assert_eq!(itinerary.itinerary.len(), 1);

    let group = &itinerary.itinerary[0];
    assert_eq!(group.date, "July 3, 2025");
    assert_eq!(group.city, "Rome, Venice");
    let cities = group
        .activities
        .iter()
        .map(|activity| activity.city.as_str())
        .collect::<Vec<_>>();
    assert_eq!(cities, vec!["Venice", "Rome"]);
}

#[test]
fn missing_notes_column_is_named() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Venice.csv"),
        "Date,Time,Activity,Location,Directions,Transportation Details\n3-Jul-25,9:00,Lunch,Cafe,,\n",
    )
    .unwrap();

    let sheets = read_workbook(dir.path(), ReadOptions::default()).unwrap();
    let err = build_itinerary(&sheets).unwrap_err();
    assert_eq!(err.missing_columns(), ["notes".to_string()]);
}

#[test]
fn injects_full_record_into_page() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(
        dir.path(),
        "Venice",
        &[
            "2025-07-04 00:00:00,10:00,Take vaporetto to Murano,Venice to Murano,Walk to F.te Nove. Board line 4.1,Vaporetto line 4.1,\"Vaporetto ticket €9.50; Hold kids’ hands on board\"",
            "3-Jul-25,8:00,Arrive and check-in,Hotel (Castello),,,",
        ],
    )
    .unwrap();

    let page = dir.path().join("index.html");
    let fallback = dir.path().join("debug_output.json");
    fs::write(&page, page_with_marker()).unwrap();

    let sheets = read_workbook(dir.path(), ReadOptions::default()).unwrap();
    let itinerary = build_itinerary(&sheets).unwrap();
    let outcome = publish(&page, &fallback, &itinerary, &MarkerPatcher).unwrap();
    assert!(matches!(outcome, PublishOutcome::Patched { .. }));
    assert!(!fallback.exists());

    let html = fs::read_to_string(&page).unwrap();
    assert!(html.contains("renderItinerary(itineraryData);"));

    let start = html.find("const itineraryData = ").unwrap() + "const itineraryData = ".len();
    let end = html.rfind("};").unwrap() + 1;
    let embedded: Value = serde_json::from_str(&html[start..end]).unwrap();

    let dates = embedded["itinerary"]
        .as_array()
        .unwrap()
        .iter()
        .map(|group| group["date"].as_str().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(dates, vec!["July 3, 2025", "July 4, 2025"]);

    let arrival = &embedded["itinerary"][0]["activities"][0];
    assert_eq!(
        arrival["thingsToDo"],
        json!(["Arrive at Hotel (Castello).", "Complete check-in/out at Hotel (Castello)."])
    );
    assert_eq!(arrival["mapLink"], json!("https://maps.app.goo.gl/HotelCastello"));
    assert_eq!(arrival["type"], json!(["travel"]));
    assert_eq!(arrival["directions"], json!(["N/A"]));

    let ferry = &embedded["itinerary"][1]["activities"][0];
    assert_eq!(
        ferry["mapLink"],
        json!(["https://maps.app.goo.gl/Venice", "https://maps.app.goo.gl/Murano"])
    );
    assert_eq!(ferry["directions"], json!(["Walk to F", "te Nove", "Board line 4", "1"]));
    assert_eq!(ferry["transportation"], json!(["Vaporetto line 4", "1"]));
    assert_eq!(ferry["ticketsToBuy"], json!(["Vaporetto ticket €9"]));
    assert_eq!(
        ferry["costsAndNotes"],
        json!(["Vaporetto ticket €9", "50", "on board"])
    );
    assert_eq!(ferry["thingsToDo"], json!(["Travel to Venice to Murano."]));
    assert_eq!(ferry["type"], json!(["travel"]));
    assert_eq!(ferry["city"], json!("Venice"));
}

#[test]
fn page_without_marker_falls_back_to_json() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(dir.path(), "Venice", &["3-Jul-25,12:00,Lunch,Cafe,,,"]).unwrap();

    let page = dir.path().join("index.html");
    let fallback = dir.path().join("debug_output.json");
    fs::write(&page, "<html><body>static</body></html>").unwrap();

    let sheets = read_workbook(dir.path(), ReadOptions::default()).unwrap();
    let itinerary = build_itinerary(&sheets).unwrap();
    let outcome = publish(&page, &fallback, &itinerary, &MarkerPatcher).unwrap();

    match outcome {
        PublishOutcome::Fallback { path, reason } => {
            assert_eq!(path, fallback);
            assert!(reason.contains("marker"));
        }
        PublishOutcome::Patched { .. } => panic!("page has no marker"),
    }

    let saved: Value = serde_json::from_str(&fs::read_to_string(&fallback).unwrap()).unwrap();
    assert_eq!(saved["itinerary"][0]["activities"][0]["thingsToDo"], json!(["Enjoy lunch at Cafe."]));
    assert_eq!(
        fs::read_to_string(&page).unwrap(),
        "<html><body>static</body></html>"
    );
}

#[test]
fn missing_page_falls_back_to_json() {
    let dir = tempfile::tempdir().unwrap();
    write_sheet(dir.path(), "Venice", &["3-Jul-25,12:00,Lunch,Cafe,,,"]).unwrap();

    let sheets = read_workbook(dir.path(), ReadOptions::default()).unwrap();
    let itinerary = build_itinerary(&sheets).unwrap();
    let fallback = dir.path().join("debug_output.json");
    let outcome = publish(
        &dir.path().join("missing.html"),
        &fallback,
        &itinerary,
        &MarkerPatcher,
    )
    .unwrap();

    assert!(matches!(outcome, PublishOutcome::Fallback { .. }));
    assert!(fallback.exists());
}
