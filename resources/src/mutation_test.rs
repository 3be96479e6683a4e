use super::*;
use crate::api::{Method, RequestBody};
use crate::test_helpers::{MockTransport, client};
use serde_json::json;

fn valid_hotel() -> HotelForm {
    HotelForm {
        name: "Ayana Komodo".into(),
        address: "Labuan Bajo".into(),
        stars: Some(5),
        price: Some(2_500_000),
        description: "<p>Beachfront</p>".into(),
    }
}

// =============================================================
// Validation
// =============================================================

#[test]
fn blank_forms_report_required_fields() {
    let errors = TripForm::default().validate(Operation::Create);
    let fields: Vec<&str> = errors.keys().map(String::as_str).collect();
    assert_eq!(fields, vec!["duration", "name", "price", "type"]);
}

#[test]
fn hotel_stars_must_be_in_range() {
    let mut form = valid_hotel();
    assert!(form.validate(Operation::Create).is_empty());
    form.stars = Some(6);
    assert_eq!(
        form.validate(Operation::Create).get("stars").map(String::as_str),
        Some("Stars must be between 1 and 5.")
    );
}

#[test]
fn boat_cabins_are_validated_by_index() {
    let form = BoatForm {
        name: "Pinisi".into(),
        cabins: vec![
            CabinForm { name: "Master".into(), max_capacity: Some(2), ..CabinForm::default() },
            CabinForm { max_capacity: Some(0), ..CabinForm::default() },
        ],
        ..BoatForm::default()
    };
    let errors = form.validate(Operation::Create);
    assert!(errors.contains_key("cabins.1.name"));
    assert!(errors.contains_key("cabins.1.max_capacity"));
    assert!(!errors.contains_key("cabins.0.name"));
}

#[test]
fn user_password_required_only_on_create() {
    let form = UserForm {
        name: "Rina".into(),
        email: "rina@example.com".into(),
        ..UserForm::default()
    };
    assert!(form.validate(Operation::Create).contains_key("password"));
    assert!(form.validate(Operation::Update(3)).is_empty());

    let short = UserForm { password: Some("short".into()), ..form };
    assert!(short.validate(Operation::Update(3)).contains_key("password"));
}

#[test]
fn register_form_checks_confirmation_and_email() {
    let form = RegisterForm {
        name: "Rina".into(),
        email: "rina@".into(),
        password: "longenough".into(),
        password_confirmation: "different".into(),
    };
    let errors = form.validate();
    assert!(errors.contains_key("email"));
    assert!(errors.contains_key("password_confirmation"));
    assert!(!errors.contains_key("password"));
}

// =============================================================
// Form shapes
// =============================================================

#[test]
fn forms_serialize_only_declared_fields() {
    let form = AnyForm::from_json(
        ResourceKind::User,
        &json!({ "name": "Rina", "email": "r@example.com", "password": "", "is_admin": true }),
    )
    .expect("user form");
    assert_eq!(
        form.to_json().expect("json"),
        json!({ "name": "Rina", "email": "r@example.com", "role": "", "phone": "" })
    );
}

#[test]
fn from_json_accepts_string_inputs() {
    let form = AnyForm::from_json(
        ResourceKind::Carousel,
        &json!({ "title": "Slide", "order": "2", "is_active": "false" }),
    )
    .expect("carousel form");
    let AnyForm::Carousel(carousel) = form else {
        panic!("expected carousel form");
    };
    assert_eq!(carousel.order, Some(2));
    assert!(!carousel.is_active);
}

#[test]
fn edit_defaults_come_from_entity() {
    let entity = json!({
        "id": 12,
        "trip": { "id": 4, "name": "Komodo" },
        "user": { "id": 9, "name": "Budi" },
        "status": "confirmed",
        "pax": 3,
        "booking_date": "2026-11-02 00:00:00",
        "notes": null
    });
    let form = AnyForm::from_entity(ResourceKind::Booking, &entity).expect("booking form");
    assert_eq!(
        form,
        AnyForm::Booking(BookingForm {
            trip_id: Some(4),
            user_id: Some(9),
            status: "confirmed".into(),
            pax: Some(3),
            total_price: None,
            booking_date: "2026-11-02".into(),
            notes: String::new(),
        })
    );
}

#[test]
fn blank_forms_use_static_defaults() {
    assert!(matches!(AnyForm::blank(ResourceKind::Carousel), AnyForm::Carousel(CarouselForm { is_active: true, .. })));
    assert_eq!(AnyForm::blank(ResourceKind::Gallery).kind(), ResourceKind::Gallery);
}

#[test]
fn submit_guard_allows_one_in_flight() {
    let mut guard = SubmitGuard::default();
    assert!(guard.try_begin());
    assert!(!guard.try_begin());
    assert!(guard.is_submitting());
    guard.finish();
    assert!(guard.try_begin());
}

// =============================================================
// submit
// =============================================================

#[tokio::test]
async fn valid_edit_puts_once_and_navigates_to_list() {
    let api = client(MockTransport::new().ok(json!({ "data": { "id": 7 } })));
    let form = valid_hotel();
    let success = submit(&api, Operation::Update(7), &form, Vec::new())
        .await
        .expect("saved");

    let requests = api.transport().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::Put);
    assert_eq!(requests[0].path, "/api/hotels/7");
    assert_eq!(
        requests[0].body,
        RequestBody::Json(json!({
            "name": "Ayana Komodo",
            "address": "Labuan Bajo",
            "stars": 5,
            "price": 2_500_000,
            "description": "<p>Beachfront</p>"
        }))
    );
    assert_eq!(success.navigate_to, "/dashboard/hotels");
    assert_eq!(success.toast, Toast::success("Hotel updated."));
}

#[tokio::test]
async fn invalid_form_sends_nothing() {
    let api = client(MockTransport::new());
    let failure = submit(&api, Operation::Create, &HotelForm::default(), Vec::new())
        .await
        .expect_err("invalid");
    assert!(api.transport().requests().is_empty());
    assert_eq!(failure.toast.level, ToastLevel::Error);
    assert!(failure.field_errors.contains_key("name"));
}

#[tokio::test]
async fn create_uploads_files_against_new_id() {
    let api = client(
        MockTransport::new()
            .ok(json!({ "data": { "id": 31, "title": "Sunset" } }))
            .ok(json!({ "message": "ok" })),
    );
    let form = AnyForm::Gallery(GalleryForm { title: "Sunset".into(), description: String::new() });
    let file = Upload { file_name: "a.jpg".into(), mime: "image/jpeg".into(), bytes: vec![0xff] };
    let success = submit(&api, Operation::Create, &form, vec![file]).await.expect("saved");

    assert_eq!(success.id, Some(31));
    assert_eq!(success.navigate_to, "/dashboard/galleries");
    assert_eq!(
        api.transport().calls(),
        vec![
            (Method::Post, "/api/galleries".to_owned()),
            (Method::Post, "/api/assets/multiple".to_owned()),
        ]
    );
}

#[tokio::test]
async fn failed_upload_still_succeeds_with_warning() {
    let api = client(
        MockTransport::new()
            .ok(json!({ "id": 2 }))
            .status(500, json!({ "message": "disk full" })),
    );
    let file = Upload { file_name: "a.jpg".into(), mime: "image/jpeg".into(), bytes: vec![1] };
    let success = submit(&api, Operation::Update(2), &valid_hotel(), vec![file])
        .await
        .expect("record saved");
    assert_eq!(success.toast.level, ToastLevel::Warning);
}

#[tokio::test]
async fn server_validation_errors_surface_per_field() {
    let api = client(MockTransport::new().status(
        422,
        json!({ "message": "The name has already been taken.", "errors": { "name": ["The name has already been taken."] } }),
    ));
    let failure = submit(&api, Operation::Create, &valid_hotel(), Vec::new())
        .await
        .expect_err("422");
    assert_eq!(failure.toast, Toast::error("The name has already been taken."));
    assert_eq!(
        failure.field_errors.get("name").map(String::as_str),
        Some("The name has already been taken.")
    );
    assert_eq!(failure.redirect, None);
}

#[tokio::test]
async fn unauthorized_save_redirects_to_login() {
    let api = client(MockTransport::new().status(401, json!({ "message": "Unauthenticated." })));
    let failure = submit(&api, Operation::Update(1), &valid_hotel(), Vec::new())
        .await
        .expect_err("401");
    assert_eq!(failure.redirect, Some("/auth/login"));
}

#[test]
fn deleted_toast_pluralizes() {
    assert_eq!(deleted_toast(ResourceKind::Trip, 1), Toast::success("Trip deleted."));
    assert_eq!(deleted_toast(ResourceKind::Trip, 3), Toast::success("3 trips deleted."));
}
