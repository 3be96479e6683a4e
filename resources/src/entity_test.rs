use super::*;
use serde_json::json;

// =============================================================
// ResourceKind
// =============================================================

#[test]
fn kind_parses_plural_and_singular_slugs() {
    assert_eq!("trips".parse::<ResourceKind>(), Ok(ResourceKind::Trip));
    assert_eq!("Booking".parse::<ResourceKind>(), Ok(ResourceKind::Booking));
    assert_eq!(" GALLERIES ".parse::<ResourceKind>(), Ok(ResourceKind::Gallery));
    assert_eq!("carousel".parse::<ResourceKind>(), Ok(ResourceKind::Carousel));
    assert_eq!(
        "cabins".parse::<ResourceKind>(),
        Err(UnknownResource("cabins".into()))
    );
}

#[test]
fn kind_display_round_trips_through_from_str() {
    for kind in ResourceKind::ALL {
        assert_eq!(kind.to_string().parse::<ResourceKind>(), Ok(kind));
        assert_eq!(kind.path(), format!("/api/{}", kind.slug()));
    }
}

#[test]
fn carousel_route_is_singular() {
    assert_eq!(ResourceKind::Carousel.route(), "/dashboard/carousel");
    assert_eq!(ResourceKind::Trip.route(), "/dashboard/trips");
}

#[test]
fn filter_column_is_a_declared_column() {
    for kind in ResourceKind::ALL {
        assert!(
            kind.columns().iter().any(|column| column.key == kind.filter_column()),
            "{kind}"
        );
    }
}

// =============================================================
// Lenient decoding
// =============================================================

#[test]
fn trip_accepts_string_encoded_numbers() {
    let trip: Trip = serde_json::from_value(json!({
        "id": "42",
        "name": "Komodo Liveaboard",
        "type": "open",
        "price": "1500000.00",
        "assets": null,
        "unknown": { "ignored": true }
    }))
    .expect("trip");
    assert_eq!(trip.id, 42);
    assert_eq!(trip.price, Some(1_500_000));
    assert_eq!(trip.trip_type.as_deref(), Some("open"));
    assert!(trip.assets.is_empty());
}

#[test]
fn money_rounds_fractional_amounts() {
    let hotel: Hotel = serde_json::from_value(json!({ "id": 1, "price": 99_999.6 })).expect("hotel");
    assert_eq!(hotel.price, Some(100_000));
}

#[test]
fn carousel_flag_accepts_integers_and_strings() {
    for (raw, expected) in [(json!(1), true), (json!(0), false), (json!("true"), true), (json!(null), false)] {
        let item: Carousel = serde_json::from_value(json!({ "id": 1, "is_active": raw })).expect("carousel");
        assert_eq!(item.is_active, expected);
    }
}

#[test]
fn timestamps_accept_sql_and_rfc3339() {
    let blog: Blog = serde_json::from_value(json!({
        "id": 1,
        "title": "Diving Season",
        "created_at": "2026-10-18 07:30:00",
        "updated_at": "2026-10-18T08:30:00.000000Z"
    }))
    .expect("blog");
    let created = blog.stamps.created_at.expect("created");
    let updated = blog.stamps.updated_at.expect("updated");
    assert!(updated > created);
}

#[test]
fn blog_author_accepts_user_alias() {
    let blog: Blog = serde_json::from_value(json!({
        "id": 3,
        "title": "Raja Ampat",
        "user": { "id": 1, "name": "Dewi", "email": "dewi@example.com" }
    }))
    .expect("blog");
    assert_eq!(blog.author.map(|author| author.name), Some("Dewi".to_owned()));
}

// =============================================================
// Records
// =============================================================

#[test]
fn booking_record_denormalizes_trip_and_customer() {
    let booking: Booking = serde_json::from_value(json!({
        "id": 7,
        "trip": {
            "id": 2,
            "name": "Komodo Sail",
            "price": 2_500_000,
            "assets": [{ "file_url": "/storage/komodo.jpg" }]
        },
        "user": { "name": "Budi", "email": "budi@example.com" },
        "pax": "2",
        "total_price": "5000000.00",
        "notes": "  "
    }))
    .expect("booking");
    let record = booking.to_record();
    assert_eq!(record.cell("trip"), Cell::Text("Komodo Sail".into()));
    assert_eq!(record.cell("customer"), Cell::Text("Budi".into()));
    assert_eq!(record.cell("pax"), Cell::Number(2));
    assert_eq!(record.cell("total_price").display(), "Rp5.000.000");
    assert_eq!(record.assets.len(), 1);
    assert_eq!(
        record.details,
        vec![
            ("Email".to_owned(), "budi@example.com".to_owned()),
            ("Trip price".to_owned(), "Rp2.500.000".to_owned()),
        ]
    );
}

#[test]
fn own_assets_leave_out_the_embedded_trip_files() {
    let detail = json!({
        "id": 7,
        "trip": { "id": 3, "name": "Komodo Sail", "assets": [{ "file_url": "/storage/trip.jpg" }] },
        "assets": [{ "file_url": "/storage/receipt.jpg" }]
    });
    let record = ResourceKind::Booking
        .decode_records(&json!([detail.clone()]))
        .expect("records")
        .remove(0);
    let shown: Vec<&str> = record.assets.iter().map(|a| a.file_url.as_str()).collect();
    assert_eq!(shown, ["/storage/trip.jpg", "/storage/receipt.jpg"]);

    let removable: Vec<String> = own_assets(&detail).into_iter().map(|a| a.file_url).collect();
    assert_eq!(removable, ["/storage/receipt.jpg"]);
}

#[test]
fn own_assets_skip_cabin_files_and_bad_entries() {
    let detail = json!({
        "id": 4,
        "name": "Pinisi",
        "cabins": [{ "name": "Master", "assets": [{ "file_url": "/storage/cabin.jpg" }] }],
        "assets": [{ "file_url": "/storage/boat.jpg" }, { "title": "no url" }]
    });
    let removable: Vec<String> = own_assets(&detail).into_iter().map(|a| a.file_url).collect();
    assert_eq!(removable, ["/storage/boat.jpg"]);
    assert!(own_assets(&json!({ "id": 1 })).is_empty());
}

#[test]
fn boat_record_lists_cabins_in_details() {
    let boat: Boat = serde_json::from_value(json!({
        "id": 4,
        "name": "Pinisi Lamborajo",
        "capacity": 12,
        "cabins": [
            { "name": "Master", "type": "private", "bed_type": "double", "max_capacity": 2, "price": "3000000" },
            { "name": "Deck" }
        ]
    }))
    .expect("boat");
    let record = boat.to_record();
    assert_eq!(record.cell("cabins"), Cell::Number(2));
    assert_eq!(
        record.details[0],
        ("Cabin Master".to_owned(), "private / double / 2 pax / Rp3.000.000".to_owned())
    );
    assert_eq!(record.details[1], ("Cabin Deck".to_owned(), String::new()));
}

#[test]
fn testimonial_message_cell_is_plain_excerpt() {
    let testimonial: Testimonial = serde_json::from_value(json!({
        "id": 1,
        "name": "Sari",
        "message": "<p>Amazing <strong>trip</strong>!</p>",
        "rating": 5
    }))
    .expect("testimonial");
    let record = testimonial.to_record();
    assert_eq!(record.cell("message"), Cell::Text("Amazing trip!".into()));
    assert_eq!(record.body_html.as_deref(), Some("<p>Amazing <strong>trip</strong>!</p>"));
}

#[test]
fn record_title_falls_back_to_id() {
    let hotel: Hotel = serde_json::from_value(json!({ "id": 11 })).expect("hotel");
    assert_eq!(hotel.to_record().title(), "#11");
    let hotel: Hotel = serde_json::from_value(json!({ "id": 11, "name": "Ayana" })).expect("hotel");
    assert_eq!(hotel.to_record().title(), "Ayana");
}

#[test]
fn decode_records_sorts_bookings_newest_first() {
    let value = json!({
        "data": [
            { "id": 1, "trip": { "id": 1, "name": "A" }, "created_at": "2026-01-01" },
            { "id": 2, "trip": { "id": 1, "name": "A" }, "created_at": "2026-03-01" },
            { "id": 3, "created_at": "2026-04-01" }
        ]
    });
    let records = ResourceKind::Booking.decode_records(&value).expect("records");
    let ids: Vec<i64> = records.iter().map(|record| record.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn decode_records_reports_unknown_shape() {
    assert_eq!(
        ResourceKind::Trip.decode_records(&json!({ "message": "Server Error" })),
        Err(EnvelopeError::UnrecognizedShape)
    );
}
