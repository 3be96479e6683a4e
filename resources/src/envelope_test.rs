use super::*;
use crate::entity::{Booking, Boat, Trip};
use serde_json::json;

fn trip(id: i64) -> Value {
    json!({ "id": id, "name": format!("Trip {id}"), "price": "150000.00" })
}

fn booking(id: i64, created_at: &str) -> Value {
    json!({
        "id": id,
        "trip": trip(id * 10),
        "status": "confirmed",
        "created_at": created_at
    })
}

fn ids<R: Resource>(items: &[R]) -> Vec<i64> {
    items.iter().map(Resource::id).collect()
}

// =============================================================
// classify
// =============================================================

#[test]
fn classify_discriminates_each_shape() {
    let bare = json!([trip(1)]);
    assert!(matches!(Envelope::classify(&bare, "trips"), Ok(Envelope::List(_))));

    let wrapped = json!({ "data": [trip(1)] });
    assert!(matches!(Envelope::classify(&wrapped, "trips"), Ok(Envelope::Wrapped(_))));

    let nested = json!({ "data": { "trips": [trip(1)] } });
    assert!(matches!(Envelope::classify(&nested, "trips"), Ok(Envelope::Nested(_))));

    let single = json!({ "data": trip(1) });
    assert!(matches!(Envelope::classify(&single, "trips"), Ok(Envelope::Single(_))));

    let bare_single = trip(1);
    assert!(matches!(Envelope::classify(&bare_single, "trips"), Ok(Envelope::Single(_))));
}

#[test]
fn classify_accepts_paginated_data_key() {
    let paginated = json!({ "data": { "current_page": 1, "data": [trip(1), trip(2)] } });
    let envelope = Envelope::classify(&paginated, "trips").expect("paginated");
    assert_eq!(envelope.into_items().len(), 2);
}

#[test]
fn classify_rejects_unknown_shapes() {
    for value in [
        json!({ "message": "Server Error" }),
        json!({ "data": { "total": 0 } }),
        json!({ "data": "nope" }),
        json!("text"),
        Value::Null,
    ] {
        assert_eq!(
            Envelope::classify(&value, "trips"),
            Err(EnvelopeError::UnrecognizedShape),
            "{value}"
        );
    }
}

// =============================================================
// normalize
// =============================================================

#[test]
fn every_shape_normalizes_to_the_same_list() {
    let expected = vec![1, 2];
    let shapes = [
        json!([booking(1, "2026-01-01"), booking(2, "2026-01-02")]),
        json!({ "data": [booking(1, "2026-01-01"), booking(2, "2026-01-02")] }),
        json!({ "data": { "bookings": [booking(1, "2026-01-01"), booking(2, "2026-01-02")] } }),
    ];
    for shape in &shapes {
        let bookings = normalize::<Booking>(shape).expect("normalize");
        assert_eq!(ids(&bookings), expected, "{shape}");
    }

    let single = normalize::<Booking>(&json!({ "data": booking(7, "2026-01-01") })).expect("single");
    assert_eq!(ids(&single), vec![7]);
}

#[test]
fn bookings_without_trip_are_dropped() {
    let value = json!({
        "data": {
            "bookings": [
                booking(1, "2026-01-01"),
                { "id": 2, "status": "pending" },
                { "id": 3, "trip": null },
                booking(4, "2026-01-04")
            ]
        }
    });
    let bookings = normalize::<Booking>(&value).expect("normalize");
    assert_eq!(ids(&bookings), vec![1, 4]);
    assert!(bookings.iter().all(|b| b.trip.is_some()));
}

#[test]
fn undecodable_entries_are_dropped_silently() {
    let value = json!([trip(1), { "name": "no id" }, "garbage", trip(3)]);
    let trips = normalize::<Trip>(&value).expect("normalize");
    assert_eq!(ids(&trips), vec![1, 3]);
}

#[test]
fn single_incomplete_entity_normalizes_to_empty_list() {
    let value = json!({ "data": { "id": 9, "trip": null } });
    assert!(normalize::<Booking>(&value).expect("normalize").is_empty());
}

#[test]
fn normalize_one_unwraps_detail_response() {
    let boat = normalize_one::<Boat>(&json!({
        "data": { "id": 5, "name": "Pinisi", "cabins": null, "assets": null }
    }))
    .expect("boat");
    assert_eq!(boat.id, 5);
    assert!(boat.cabins.is_empty());
}

#[test]
fn normalize_one_reports_incomplete_entity() {
    let err = normalize_one::<Booking>(&json!({ "id": 1 })).expect_err("missing trip");
    assert!(matches!(err, EnvelopeError::Entity(_)));
}

// =============================================================
// helpers
// =============================================================

#[test]
fn entity_id_reads_wrapped_or_bare_id() {
    assert_eq!(entity_id(&json!({ "data": { "id": "12" } })), Some(12));
    assert_eq!(entity_id(&json!({ "id": 3 })), Some(3));
    assert_eq!(entity_id(&json!({ "message": "ok" })), None);
}

#[test]
fn newest_first_sorts_strictly_descending() {
    let value = json!([
        booking(1, "2026-03-01T08:00:00Z"),
        booking(2, "2026-05-01T08:00:00Z"),
        booking(3, "2026-04-01 08:00:00"),
        booking(4, "2026-05-01T09:00:00Z")
    ]);
    let mut bookings = normalize::<Booking>(&value).expect("normalize");
    newest_first(&mut bookings);
    assert_eq!(ids(&bookings), vec![4, 2, 3, 1]);
    for pair in bookings.windows(2) {
        assert!(pair[0].created_at() > pair[1].created_at());
    }
}

#[test]
fn newest_first_puts_undated_last() {
    let value = json!([
        { "id": 1, "trip": trip(1) },
        booking(2, "2026-01-01")
    ]);
    let mut bookings = normalize::<Booking>(&value).expect("normalize");
    newest_first(&mut bookings);
    assert_eq!(ids(&bookings), vec![2, 1]);
}
