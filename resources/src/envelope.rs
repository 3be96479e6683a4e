//! Response envelope normalization.
//!
//! DESIGN
//! ======
//! List endpoints answer in one of four shapes:
//!
//! 1. a bare array,
//! 2. `{ "data": [...] }`,
//! 3. `{ "data": { "<slug>": [...] } }` (also `{ "data": { "data": [...] } }`
//!    from paginated endpoints),
//! 4. a single object with an `id`, bare or under `data`.
//!
//! [`Envelope::classify`] discriminates the shape once, and [`normalize`]
//! turns whichever shape arrived into one canonical `Vec<R>`. Entries that
//! do not decode or lack a required relation are dropped, not reported.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::Deserialize;
use serde_json::Value;

use crate::entity::Resource;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum EnvelopeError {
    #[error("response has no list or entity payload")]
    UnrecognizedShape,
    #[error("entity payload could not be decoded: {0}")]
    Entity(String),
}

/// The envelope a response arrived in.
#[derive(Debug, PartialEq)]
pub enum Envelope<T> {
    List(Vec<T>),
    Wrapped(Vec<T>),
    Nested(Vec<T>),
    Single(T),
}

impl<T> Envelope<T> {
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::List(items) | Self::Wrapped(items) | Self::Nested(items) => items,
            Self::Single(item) => vec![item],
        }
    }
}

impl<'a> Envelope<&'a Value> {
    /// Discriminate the envelope of `value`, using `list_key` for shape 3.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError::UnrecognizedShape`] for scalars and for
    /// objects that carry neither a list nor an `id`.
    pub fn classify(value: &'a Value, list_key: &str) -> Result<Self, EnvelopeError> {
        match value {
            Value::Array(items) => Ok(Self::List(items.iter().collect())),
            Value::Object(map) => match map.get("data") {
                Some(Value::Array(items)) => Ok(Self::Wrapped(items.iter().collect())),
                Some(data @ Value::Object(inner)) => {
                    if let Some(Value::Array(items)) = inner.get(list_key).or_else(|| inner.get("data")) {
                        Ok(Self::Nested(items.iter().collect()))
                    } else if inner.contains_key("id") {
                        Ok(Self::Single(data))
                    } else {
                        Err(EnvelopeError::UnrecognizedShape)
                    }
                }
                _ if map.contains_key("id") => Ok(Self::Single(value)),
                _ => Err(EnvelopeError::UnrecognizedShape),
            },
            _ => Err(EnvelopeError::UnrecognizedShape),
        }
    }
}

/// Normalize any supported list response into canonical entities.
///
/// # Errors
///
/// Returns [`EnvelopeError::UnrecognizedShape`] when `value` is not one of
/// the supported envelopes. Individual bad entries never fail the call.
pub fn normalize<R: Resource>(value: &Value) -> Result<Vec<R>, EnvelopeError> {
    let items = Envelope::classify(value, R::KIND.slug())?.into_items();
    let received = items.len();
    let entities: Vec<R> = items
        .into_iter()
        .filter_map(|item| R::deserialize(item).ok())
        .filter(Resource::is_complete)
        .collect();
    let dropped = received - entities.len();
    if dropped > 0 {
        tracing::debug!(kind = %R::KIND, received, dropped, "dropped malformed list entries");
    }
    Ok(entities)
}

/// Normalize a detail (GET by id) response into one entity.
///
/// # Errors
///
/// Returns [`EnvelopeError::UnrecognizedShape`] for unsupported envelopes or
/// an empty list, and [`EnvelopeError::Entity`] when the payload is not a
/// valid, complete entity.
pub fn normalize_one<R: Resource>(value: &Value) -> Result<R, EnvelopeError> {
    let item = Envelope::classify(value, R::KIND.slug())?
        .into_items()
        .into_iter()
        .next()
        .ok_or(EnvelopeError::UnrecognizedShape)?;
    let entity = R::deserialize(item).map_err(|e| EnvelopeError::Entity(e.to_string()))?;
    if !entity.is_complete() {
        return Err(EnvelopeError::Entity(format!(
            "{} {} is missing a required relation",
            R::KIND.model_type(),
            entity.id()
        )));
    }
    Ok(entity)
}

/// Id of the record a create/update call answered with, if it sent one.
#[must_use]
pub fn entity_id(value: &Value) -> Option<i64> {
    value
        .get("data")
        .and_then(|data| data.get("id"))
        .or_else(|| value.get("id"))
        .and_then(crate::de::integer_from_value)
}

/// Stable sort, newest `created_at` first; undated entries go last.
pub fn newest_first<R: Resource>(items: &mut [R]) {
    items.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
}
