//! Integration tests for the itinerary model and its markup.

use chrono::NaiveDate;
use tripdoc::model::{Itinerary, TransportKind};
use tripdoc::render::{to_preview_markup, to_print_document};

#[test]
fn test_json_round_trip_preserves_edits() {
    let trip = Itinerary::default()
        .with_day_added()
        .with_day_updated(1, |d| d.morning = "Fort Kochi walk".to_string())
        .with_payment_updated(0, |p| {
            p.amount = "INR 25,000".to_string();
            p.due_date = NaiveDate::from_ymd_opt(2024, 6, 1);
        });

    let json = trip.to_json_pretty().unwrap();
    assert!(json.contains("\"due_date\": \"2024-06-01\""));
    let parsed = Itinerary::from_json(&json).unwrap();
    assert_eq!(parsed, trip);
}

#[test]
fn test_partial_json_uses_defaults() {
    let trip = Itinerary::from_json(
        r#"{
            "title": "Goa Weekend",
            "days": [
                { "title": "Day 1", "transports": [{ "kind": "train", "details": "Konkan Kanya" }] }
            ]
        }"#,
    )
    .unwrap();

    assert_eq!(trip.title, "Goa Weekend");
    assert_eq!(trip.travellers, 2);
    assert_eq!(trip.days.len(), 1);
    assert_eq!(trip.days[0].transports[0].kind, TransportKind::Train);
    assert_eq!(trip.days[0].morning, "");
}

#[test]
fn test_malformed_json_is_itinerary_error() {
    let err = Itinerary::from_json("{ \"title\": 5 }").unwrap_err();
    assert!(matches!(err, tripdoc::Error::Itinerary(_)));
}

#[test]
fn test_last_day_cannot_be_removed() {
    let trip = Itinerary::default().with_day_removed(0);
    assert_eq!(trip.days.len(), 1);

    let trip = Itinerary::default().with_day_added().with_day_removed(0);
    assert_eq!(trip.days.len(), 1);
    assert_eq!(trip.days[0].title, "Day 2");
}

#[test]
fn test_last_transport_cannot_be_removed() {
    let trip = Itinerary::default().with_transport_removed(0, 0);
    assert_eq!(trip.days[0].transports.len(), 1);

    let trip = Itinerary::default()
        .with_transport_added(0)
        .with_transport_removed(0, 0);
    assert_eq!(trip.days[0].transports.len(), 1);
    assert_eq!(trip.days[0].transports[0].kind, TransportKind::Unspecified);
}

#[test]
fn test_last_payment_cannot_be_removed() {
    let trip = Itinerary::default().with_payment_removed(0);
    assert_eq!(trip.payments.len(), 1);

    let trip = Itinerary::default()
        .with_payment_added()
        .with_payment_added()
        .with_payment_removed(1);
    assert_eq!(trip.payments.len(), 2);
}

#[test]
fn test_out_of_range_edits_are_ignored() {
    let original = Itinerary::default();
    let edited = original
        .clone()
        .with_day_updated(9, |d| d.title = "nope".to_string())
        .with_transport_updated(0, 9, |t| t.details = "nope".to_string())
        .with_transport_added(9)
        .with_payment_removed(9);
    assert_eq!(edited, original);
}

#[test]
fn test_markup_escapes_user_text() {
    let mut trip = Itinerary::default();
    trip.title = "<script>alert(1)</script>".to_string();
    trip.inclusions = "Breakfast\nAirport pickup & drop".to_string();

    let html = to_preview_markup(&trip);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("Breakfast<br>Airport pickup &amp; drop"));
}

#[test]
fn test_print_document_lists_every_day() {
    let trip = Itinerary::default().with_day_added().with_day_added();
    let html = to_print_document(&trip);
    assert_eq!(html.matches("class=\"border day\"").count(), 3);
}
