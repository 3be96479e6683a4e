//! Generic form inputs for any resource.
//!
//! DESIGN
//! ======
//! The edit page renders whatever fields the resource's form serializes.
//! Inputs hold strings; converting back goes through the form's lenient
//! decoders, so `"150000"` and `""` reach the typed form as `Some(150000)`
//! and `None`.

#[cfg(test)]
#[path = "form_fields_test.rs"]
mod form_fields_test;

use resources::{AnyForm, ResourceKind};
use serde_json::{Map, Value};

const NUMERIC_KEYS: &[&str] = &[
    "price",
    "total_price",
    "pax",
    "trip_id",
    "user_id",
    "capacity",
    "stars",
    "rating",
    "order",
    "max_capacity",
];

const LONG_TEXT_KEYS: &[&str] = &["description", "content", "message", "notes"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    LongText,
    Password,
    Date,
    Number,
    Flag,
    /// Nested lists such as boat cabins, edited as JSON.
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub key: String,
    pub label: String,
    pub input: FieldInput,
    pub value: String,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("{key}: {message}")]
pub struct FieldError {
    pub key: String,
    pub message: String,
}

/// `max_capacity` becomes `Max capacity`.
pub fn label(key: &str) -> String {
    let spaced = key.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn input_for(key: &str, value: &Value) -> FieldInput {
    match value {
        Value::Bool(_) => FieldInput::Flag,
        Value::Number(_) => FieldInput::Number,
        Value::Array(_) | Value::Object(_) => FieldInput::Json,
        Value::Null if NUMERIC_KEYS.contains(&key) => FieldInput::Number,
        _ if key == "password" => FieldInput::Password,
        _ if key.ends_with("_date") => FieldInput::Date,
        _ if LONG_TEXT_KEYS.contains(&key) => FieldInput::LongText,
        _ => FieldInput::Text,
    }
}

fn display(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => serde_json::to_string_pretty(value).unwrap_or_default(),
        other => other.to_string(),
    }
}

/// One input per serialized field, in key order.
///
/// # Errors
///
/// Returns the serialization error of the form.
pub fn fields(form: &AnyForm) -> Result<Vec<Field>, serde_json::Error> {
    let Value::Object(map) = form.to_json()? else {
        return Ok(Vec::new());
    };
    let mut out: Vec<Field> = map
        .iter()
        .map(|(key, value)| Field {
            key: key.clone(),
            label: label(key),
            input: input_for(key, value),
            value: display(value),
        })
        .collect();
    // Users omit a blank password from the body, but it is still an input.
    if matches!(form, AnyForm::User(_)) && !out.iter().any(|field| field.key == "password") {
        out.push(Field {
            key: "password".to_owned(),
            label: label("password"),
            input: FieldInput::Password,
            value: String::new(),
        });
    }
    Ok(out)
}

/// Request-shaped JSON from the current input values.
///
/// # Errors
///
/// Returns [`FieldError`] when a JSON input does not parse.
pub fn to_json(fields: &[Field]) -> Result<Value, FieldError> {
    let mut map = Map::new();
    for field in fields {
        let value = match field.input {
            FieldInput::Flag => Value::Bool(field.value == "true"),
            FieldInput::Number if field.value.trim().is_empty() => Value::Null,
            FieldInput::Number => Value::String(field.value.trim().to_owned()),
            FieldInput::Json if field.value.trim().is_empty() => Value::Array(Vec::new()),
            FieldInput::Json => serde_json::from_str(&field.value).map_err(|e| FieldError {
                key: field.key.clone(),
                message: e.to_string(),
            })?,
            FieldInput::Text | FieldInput::LongText | FieldInput::Password | FieldInput::Date => {
                Value::String(field.value.clone())
            }
        };
        map.insert(field.key.clone(), value);
    }
    Ok(Value::Object(map))
}

/// The typed form for `kind` built from the inputs.
///
/// # Errors
///
/// Returns [`FieldError`] for unparseable JSON inputs or values the form
/// rejects.
pub fn to_form(kind: ResourceKind, fields: &[Field]) -> Result<AnyForm, FieldError> {
    let value = to_json(fields)?;
    AnyForm::from_json(kind, &value).map_err(|e| FieldError {
        key: "form".to_owned(),
        message: e.to_string(),
    })
}

/// Replace the value of `key`.
pub fn set_value(fields: &mut [Field], key: &str, value: String) {
    if let Some(field) = fields.iter_mut().find(|field| field.key == key) {
        field.value = value;
    }
}

/// Current value of `key`, empty when absent.
pub fn value_of(fields: &[Field], key: &str) -> String {
    fields
        .iter()
        .find(|field| field.key == key)
        .map(|field| field.value.clone())
        .unwrap_or_default()
}

/// HTML `type` for single-line inputs.
pub fn input_type(input: FieldInput) -> &'static str {
    match input {
        FieldInput::Password => "password",
        FieldInput::Date => "date",
        FieldInput::Number => "number",
        FieldInput::Flag => "checkbox",
        FieldInput::Text | FieldInput::LongText | FieldInput::Json => "text",
    }
}
