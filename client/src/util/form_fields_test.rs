use super::*;
use resources::mutation::{BoatForm, TripForm};
use serde_json::json;

fn find<'a>(fields: &'a [Field], key: &str) -> &'a Field {
    fields.iter().find(|field| field.key == key).expect("field")
}

#[test]
fn labels_are_sentence_case() {
    assert_eq!(label("max_capacity"), "Max capacity");
    assert_eq!(label("name"), "Name");
    assert_eq!(label(""), "");
}

#[test]
fn blank_trip_gets_typed_inputs() {
    let fields = fields(&AnyForm::blank(ResourceKind::Trip)).expect("fields");
    assert_eq!(find(&fields, "price").input, FieldInput::Number);
    assert_eq!(find(&fields, "price").value, "");
    assert_eq!(find(&fields, "description").input, FieldInput::LongText);
    assert_eq!(find(&fields, "type").input, FieldInput::Text);
}

#[test]
fn inputs_convert_back_to_the_typed_form() {
    let mut fields = fields(&AnyForm::blank(ResourceKind::Trip)).expect("fields");
    set_value(&mut fields, "name", "Komodo".to_owned());
    set_value(&mut fields, "price", " 4500000 ".to_owned());

    let form = to_form(ResourceKind::Trip, &fields).expect("form");
    let AnyForm::Trip(trip) = form else {
        panic!("expected trip form");
    };
    assert_eq!(
        trip,
        TripForm {
            name: "Komodo".into(),
            price: Some(4_500_000),
            ..TripForm::default()
        }
    );
}

#[test]
fn carousel_flag_round_trips() {
    let fields = fields(&AnyForm::blank(ResourceKind::Carousel)).expect("fields");
    let active = find(&fields, "is_active");
    assert_eq!(active.input, FieldInput::Flag);
    assert_eq!(active.value, "true");
    assert_eq!(to_json(&fields).expect("json")["is_active"], json!(true));
}

#[test]
fn cabins_are_edited_as_json() {
    let mut fields = fields(&AnyForm::Boat(BoatForm::default())).expect("fields");
    assert_eq!(find(&fields, "cabins").input, FieldInput::Json);

    set_value(&mut fields, "cabins", r#"[{ "name": "Deluxe", "max_capacity": "2" }]"#.to_owned());
    let AnyForm::Boat(boat) = to_form(ResourceKind::Boat, &fields).expect("form") else {
        panic!("expected boat form");
    };
    assert_eq!(boat.cabins.len(), 1);
    assert_eq!(boat.cabins[0].max_capacity, Some(2));
}

#[test]
fn broken_json_names_the_field() {
    let mut fields = fields(&AnyForm::Boat(BoatForm::default())).expect("fields");
    set_value(&mut fields, "cabins", "[{".to_owned());
    let err = to_json(&fields).expect_err("invalid");
    assert_eq!(err.key, "cabins");
}

#[test]
fn user_form_always_offers_a_password_input() {
    let fields = fields(&AnyForm::blank(ResourceKind::User)).expect("fields");
    assert_eq!(find(&fields, "password").input, FieldInput::Password);

    let AnyForm::User(user) = to_form(ResourceKind::User, &fields).expect("form") else {
        panic!("expected user form");
    };
    assert_eq!(user.password, None);
}

#[test]
fn value_lookup_and_input_types() {
    let mut fields = fields(&AnyForm::blank(ResourceKind::Trip)).expect("fields");
    set_value(&mut fields, "name", "Raja Ampat".to_owned());
    assert_eq!(value_of(&fields, "name"), "Raja Ampat");
    assert_eq!(value_of(&fields, "missing"), "");
    assert_eq!(input_type(FieldInput::Number), "number");
    assert_eq!(input_type(FieldInput::LongText), "text");
}
