//! Create/update flow: form structs, validation, submission, toasts.
//!
//! DESIGN
//! ======
//! Each resource has a form struct whose serde shape *is* the request body:
//! only declared fields are sent. Edit forms are built from the entity the
//! detail endpoint returned; create forms start from `Default`.
//!
//! [`submit`] runs one mutation end to end: validate, exactly one PUT/POST,
//! then (only if files were picked) a second multipart request attaching
//! them to the saved record. It never refetches; the list page does that
//! when it is shown again.

#[cfg(test)]
#[path = "mutation_test.rs"]
mod mutation_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::{ApiClient, Transport, Upload};
use crate::de;
use crate::entity::{
    Blog, Boat, Booking, Cabin, Carousel, Gallery, Hotel, ResourceKind, Testimonial, Trip, User,
};
use crate::envelope::entity_id;
use crate::error::ApiError;
use crate::format::parse_timestamp;

/// Client-side validation messages keyed by field name.
pub type FormErrors = BTreeMap<String, String>;

// =============================================================================
// TOASTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Warning,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

/// Toast after `count` records of `kind` were deleted.
#[must_use]
pub fn deleted_toast(kind: ResourceKind, count: usize) -> Toast {
    if count == 1 {
        Toast::success(format!("{} deleted.", kind.singular()))
    } else {
        Toast::success(format!("{count} {} deleted.", kind.label().to_lowercase()))
    }
}

// =============================================================================
// FORM TRAIT
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Create,
    Update(i64),
}

/// A request body for one resource.
pub trait Form: Serialize {
    fn kind(&self) -> ResourceKind;

    /// Field errors; empty means the form may be submitted.
    fn validate(&self, op: Operation) -> FormErrors;
}

fn require(errors: &mut FormErrors, field: &str, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field.to_owned(), format!("{label} is required."));
    }
}

fn require_amount(errors: &mut FormErrors, field: &str, label: &str, value: Option<i64>) {
    match value {
        None => {
            errors.insert(field.to_owned(), format!("{label} is required."));
        }
        Some(amount) if amount < 0 => {
            errors.insert(field.to_owned(), format!("{label} cannot be negative."));
        }
        Some(_) => {}
    }
}

fn check_range(errors: &mut FormErrors, field: &str, label: &str, value: Option<i64>, min: i64, max: i64) {
    if let Some(value) = value {
        if !(min..=max).contains(&value) {
            errors.insert(field.to_owned(), format!("{label} must be between {min} and {max}."));
        }
    }
}

fn text(value: Option<&String>) -> String {
    value.cloned().unwrap_or_default()
}

// =============================================================================
// RESOURCE FORMS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "de::or_default")]
    pub trip_type: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub destination: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub description: String,
}

impl From<&Trip> for TripForm {
    fn from(trip: &Trip) -> Self {
        Self {
            name: trip.name.clone(),
            trip_type: text(trip.trip_type.as_ref()),
            destination: text(trip.destination.as_ref()),
            duration: text(trip.duration.as_ref()),
            price: trip.price,
            description: text(trip.description.as_ref()),
        }
    }
}

impl Form for TripForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Trip
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        require(&mut errors, "type", "Type", &self.trip_type);
        require(&mut errors, "duration", "Duration", &self.duration);
        require_amount(&mut errors, "price", "Price", self.price);
        errors
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingForm {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub trip_id: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub status: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub pax: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub total_price: Option<i64>,
    /// `YYYY-MM-DD`.
    #[serde(default, deserialize_with = "de::or_default")]
    pub booking_date: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub notes: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            trip_id: None,
            user_id: None,
            status: "pending".to_owned(),
            pax: Some(1),
            total_price: None,
            booking_date: String::new(),
            notes: String::new(),
        }
    }
}

impl From<&Booking> for BookingForm {
    fn from(booking: &Booking) -> Self {
        Self {
            trip_id: booking.trip.as_ref().map(|trip| trip.id),
            user_id: booking.user.as_ref().and_then(|user| user.id),
            status: text(booking.status.as_ref()),
            pax: booking.pax,
            total_price: booking.total_price,
            booking_date: booking
                .booking_date
                .map(|ts| ts.date().to_string())
                .unwrap_or_default(),
            notes: text(booking.notes.as_ref()),
        }
    }
}

impl Form for BookingForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Booking
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        if self.trip_id.is_none() {
            errors.insert("trip_id".to_owned(), "Trip is required.".to_owned());
        }
        require(&mut errors, "status", "Status", &self.status);
        match self.pax {
            Some(pax) if pax >= 1 => {}
            _ => {
                errors.insert("pax".to_owned(), "At least one participant is required.".to_owned());
            }
        }
        if !self.booking_date.trim().is_empty() && parse_timestamp(&self.booking_date).is_none() {
            errors.insert("booking_date".to_owned(), "Use the format YYYY-MM-DD.".to_owned());
        }
        errors
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub slug: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub content: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub status: String,
}

impl Default for BlogForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            status: "draft".to_owned(),
        }
    }
}

impl From<&Blog> for BlogForm {
    fn from(blog: &Blog) -> Self {
        Self {
            title: blog.title.clone(),
            slug: text(blog.slug.as_ref()),
            content: text(blog.content.as_ref()),
            status: text(blog.status.as_ref()),
        }
    }
}

impl Form for BlogForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Blog
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "title", "Title", &self.title);
        require(&mut errors, "content", "Content", &self.content);
        errors
    }
}

/// A cabin row inside the boat form. Existing cabins keep their id so the
/// backend updates them in place.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinForm {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, rename = "type", deserialize_with = "de::or_default")]
    pub cabin_type: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub bed_type: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub max_capacity: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<i64>,
}

impl From<&Cabin> for CabinForm {
    fn from(cabin: &Cabin) -> Self {
        Self {
            id: cabin.id,
            name: cabin.name.clone(),
            cabin_type: text(cabin.cabin_type.as_ref()),
            bed_type: text(cabin.bed_type.as_ref()),
            max_capacity: cabin.max_capacity,
            price: cabin.price,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoatForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub capacity: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub cabins: Vec<CabinForm>,
}

impl From<&Boat> for BoatForm {
    fn from(boat: &Boat) -> Self {
        Self {
            name: boat.name.clone(),
            description: text(boat.description.as_ref()),
            capacity: boat.capacity,
            cabins: boat.cabins.iter().map(CabinForm::from).collect(),
        }
    }
}

impl Form for BoatForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Boat
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        check_range(&mut errors, "capacity", "Capacity", self.capacity, 1, 500);
        for (index, cabin) in self.cabins.iter().enumerate() {
            require(&mut errors, &format!("cabins.{index}.name"), "Cabin name", &cabin.name);
            check_range(
                &mut errors,
                &format!("cabins.{index}.max_capacity"),
                "Cabin capacity",
                cabin.max_capacity,
                1,
                50,
            );
            if cabin.price.is_some_and(|price| price < 0) {
                errors.insert(format!("cabins.{index}.price"), "Cabin price cannot be negative.".to_owned());
            }
        }
        errors
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub address: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub stars: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub description: String,
}

impl From<&Hotel> for HotelForm {
    fn from(hotel: &Hotel) -> Self {
        Self {
            name: hotel.name.clone(),
            address: text(hotel.address.as_ref()),
            stars: hotel.stars,
            price: hotel.price,
            description: text(hotel.description.as_ref()),
        }
    }
}

impl Form for HotelForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Hotel
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        require(&mut errors, "address", "Address", &self.address);
        check_range(&mut errors, "stars", "Stars", self.stars, 1, 5);
        require_amount(&mut errors, "price", "Price", self.price);
        errors
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub description: String,
}

impl From<&Gallery> for GalleryForm {
    fn from(gallery: &Gallery) -> Self {
        Self {
            title: gallery.title.clone(),
            description: text(gallery.description.as_ref()),
        }
    }
}

impl Form for GalleryForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Gallery
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "title", "Title", &self.title);
        errors
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestimonialForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub message: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub rating: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub source: String,
}

impl Default for TestimonialForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            message: String::new(),
            rating: Some(5),
            source: String::new(),
        }
    }
}

impl From<&Testimonial> for TestimonialForm {
    fn from(testimonial: &Testimonial) -> Self {
        Self {
            name: testimonial.name.clone(),
            message: testimonial.message.clone(),
            rating: testimonial.rating,
            source: text(testimonial.source.as_ref()),
        }
    }
}

impl Form for TestimonialForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Testimonial
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        require(&mut errors, "message", "Message", &self.message);
        check_range(&mut errors, "rating", "Rating", self.rating, 1, 5);
        errors
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarouselForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub title: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub description: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub order: Option<i64>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_active: bool,
}

impl Default for CarouselForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            order: None,
            is_active: true,
        }
    }
}

impl From<&Carousel> for CarouselForm {
    fn from(item: &Carousel) -> Self {
        Self {
            title: item.title.clone(),
            description: text(item.description.as_ref()),
            order: item.order,
            is_active: item.is_active,
        }
    }
}

impl Form for CarouselForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Carousel
    }

    fn validate(&self, _op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "title", "Title", &self.title);
        if self.order.is_some_and(|order| order < 0) {
            errors.insert("order".to_owned(), "Order cannot be negative.".to_owned());
        }
        errors
    }
}

/// Password is only sent when set; an edit that leaves it blank keeps the
/// current one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserForm {
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub email: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub role: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "de::opt_text")]
    pub password: Option<String>,
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            role: text(user.role.as_ref()),
            phone: text(user.phone.as_ref()),
            password: None,
        }
    }
}

impl Form for UserForm {
    fn kind(&self) -> ResourceKind {
        ResourceKind::User
    }

    fn validate(&self, op: Operation) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        check_email(&mut errors, &self.email);
        let password = self.password.as_deref().filter(|p| !p.is_empty());
        match (op, password) {
            (Operation::Create, None) => {
                errors.insert("password".to_owned(), "Password is required.".to_owned());
            }
            (_, Some(password)) => check_password(&mut errors, password),
            (Operation::Update(_), None) => {}
        }
        errors
    }
}

fn check_email(errors: &mut FormErrors, email: &str) {
    let email = email.trim();
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.') && !domain.starts_with('.'));
    if !valid {
        errors.insert("email".to_owned(), "Enter a valid email address.".to_owned());
    }
}

fn check_password(errors: &mut FormErrors, password: &str) {
    if password.chars().count() < 8 {
        errors.insert("password".to_owned(), "Password must be at least 8 characters.".to_owned());
    }
}

// =============================================================================
// AUTH FORMS
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        check_email(&mut errors, &self.email);
        require(&mut errors, "password", "Password", &self.password);
        errors
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegisterForm {
    #[must_use]
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::new();
        require(&mut errors, "name", "Name", &self.name);
        check_email(&mut errors, &self.email);
        check_password(&mut errors, &self.password);
        if self.password != self.password_confirmation {
            errors.insert("password_confirmation".to_owned(), "Passwords do not match.".to_owned());
        }
        errors
    }
}

// =============================================================================
// ANY FORM
// =============================================================================

/// Kind-dispatched form for pages that edit any resource.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AnyForm {
    Trip(TripForm),
    Booking(BookingForm),
    Blog(BlogForm),
    Boat(BoatForm),
    Hotel(HotelForm),
    Gallery(GalleryForm),
    Testimonial(TestimonialForm),
    Carousel(CarouselForm),
    User(UserForm),
}

impl AnyForm {
    /// Static create defaults.
    #[must_use]
    pub fn blank(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Trip => Self::Trip(TripForm::default()),
            ResourceKind::Booking => Self::Booking(BookingForm::default()),
            ResourceKind::Blog => Self::Blog(BlogForm::default()),
            ResourceKind::Boat => Self::Boat(BoatForm::default()),
            ResourceKind::Hotel => Self::Hotel(HotelForm::default()),
            ResourceKind::Gallery => Self::Gallery(GalleryForm::default()),
            ResourceKind::Testimonial => Self::Testimonial(TestimonialForm::default()),
            ResourceKind::Carousel => Self::Carousel(CarouselForm::default()),
            ResourceKind::User => Self::User(UserForm::default()),
        }
    }

    /// Edit defaults from the entity object a detail endpoint returned.
    ///
    /// # Errors
    ///
    /// Returns the decode error when `entity` is not a `kind` record.
    pub fn from_entity(kind: ResourceKind, entity: &Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ResourceKind::Trip => Self::Trip(TripForm::from(&Trip::deserialize(entity)?)),
            ResourceKind::Booking => Self::Booking(BookingForm::from(&Booking::deserialize(entity)?)),
            ResourceKind::Blog => Self::Blog(BlogForm::from(&Blog::deserialize(entity)?)),
            ResourceKind::Boat => Self::Boat(BoatForm::from(&Boat::deserialize(entity)?)),
            ResourceKind::Hotel => Self::Hotel(HotelForm::from(&Hotel::deserialize(entity)?)),
            ResourceKind::Gallery => Self::Gallery(GalleryForm::from(&Gallery::deserialize(entity)?)),
            ResourceKind::Testimonial => {
                Self::Testimonial(TestimonialForm::from(&Testimonial::deserialize(entity)?))
            }
            ResourceKind::Carousel => Self::Carousel(CarouselForm::from(&Carousel::deserialize(entity)?)),
            ResourceKind::User => Self::User(UserForm::from(&User::deserialize(entity)?)),
        })
    }

    /// Form for `kind` from a request-shaped JSON object (CLI `--data`, or
    /// the string values of the web form inputs). Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns the decode error when a field has an unusable value.
    pub fn from_json(kind: ResourceKind, value: &Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            ResourceKind::Trip => Self::Trip(TripForm::deserialize(value)?),
            ResourceKind::Booking => Self::Booking(BookingForm::deserialize(value)?),
            ResourceKind::Blog => Self::Blog(BlogForm::deserialize(value)?),
            ResourceKind::Boat => Self::Boat(BoatForm::deserialize(value)?),
            ResourceKind::Hotel => Self::Hotel(HotelForm::deserialize(value)?),
            ResourceKind::Gallery => Self::Gallery(GalleryForm::deserialize(value)?),
            ResourceKind::Testimonial => Self::Testimonial(TestimonialForm::deserialize(value)?),
            ResourceKind::Carousel => Self::Carousel(CarouselForm::deserialize(value)?),
            ResourceKind::User => Self::User(UserForm::deserialize(value)?),
        })
    }

    /// The request body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the serialization error, which the plain form structs never
    /// produce in practice.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl Form for AnyForm {
    fn kind(&self) -> ResourceKind {
        match self {
            Self::Trip(_) => ResourceKind::Trip,
            Self::Booking(_) => ResourceKind::Booking,
            Self::Blog(_) => ResourceKind::Blog,
            Self::Boat(_) => ResourceKind::Boat,
            Self::Hotel(_) => ResourceKind::Hotel,
            Self::Gallery(_) => ResourceKind::Gallery,
            Self::Testimonial(_) => ResourceKind::Testimonial,
            Self::Carousel(_) => ResourceKind::Carousel,
            Self::User(_) => ResourceKind::User,
        }
    }

    fn validate(&self, op: Operation) -> FormErrors {
        match self {
            Self::Trip(form) => form.validate(op),
            Self::Booking(form) => form.validate(op),
            Self::Blog(form) => form.validate(op),
            Self::Boat(form) => form.validate(op),
            Self::Hotel(form) => form.validate(op),
            Self::Gallery(form) => form.validate(op),
            Self::Testimonial(form) => form.validate(op),
            Self::Carousel(form) => form.validate(op),
            Self::User(form) => form.validate(op),
        }
    }
}

// =============================================================================
// SUBMISSION
// =============================================================================

/// At most one submission in flight per form.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SubmitGuard {
    submitting: bool,
}

impl SubmitGuard {
    /// Returns `false` when a submission is already running.
    pub fn try_begin(&mut self) -> bool {
        !std::mem::replace(&mut self.submitting, true)
    }

    pub fn finish(&mut self) {
        self.submitting = false;
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MutationSuccess {
    pub toast: Toast,
    /// The resource's list route.
    pub navigate_to: &'static str,
    pub id: Option<i64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct MutationFailure {
    pub toast: Toast,
    pub field_errors: FormErrors,
    pub redirect: Option<&'static str>,
    /// The backend error, when the failure came from the server.
    pub error: Option<ApiError>,
}

impl MutationFailure {
    fn invalid(field_errors: FormErrors) -> Self {
        Self {
            toast: Toast::error("Please fix the highlighted fields."),
            field_errors,
            redirect: None,
            error: None,
        }
    }
}

impl From<ApiError> for MutationFailure {
    fn from(err: ApiError) -> Self {
        let field_errors = err
            .field_errors()
            .into_iter()
            .map(|(field, messages)| (field, messages.join(" ")))
            .collect();
        Self {
            toast: Toast::error(err.user_message()),
            field_errors,
            redirect: err.redirect(),
            error: Some(err),
        }
    }
}

/// Validate, save with exactly one POST/PUT, then attach `files`.
///
/// A failed upload does not fail the mutation: the record is saved, so the
/// result is a success with a warning toast.
///
/// # Errors
///
/// Returns [`MutationFailure`] for client-side validation errors (no
/// request is sent) or when the save request fails.
pub async fn submit<T, F>(
    client: &ApiClient<T>,
    op: Operation,
    form: &F,
    files: Vec<Upload>,
) -> Result<MutationSuccess, MutationFailure>
where
    T: Transport,
    F: Form + ?Sized,
{
    let kind = form.kind();
    let errors = form.validate(op);
    if !errors.is_empty() {
        return Err(MutationFailure::invalid(errors));
    }

    let (response, verb) = match op {
        Operation::Create => (client.create(kind, form).await, "created"),
        Operation::Update(id) => (client.update(kind, id, form).await, "updated"),
    };
    let response = response.map_err(|err| {
        tracing::warn!(%kind, ?op, error = %err, "save failed");
        MutationFailure::from(err)
    })?;
    let id = match op {
        Operation::Update(id) => Some(id),
        Operation::Create => entity_id(&response),
    };
    tracing::info!(%kind, ?op, ?id, "saved");

    let mut toast = Toast::success(format!("{} {verb}.", kind.singular()));
    if !files.is_empty() {
        match id {
            Some(id) => {
                if let Err(err) = client.upload_assets(kind, id, files).await {
                    tracing::warn!(%kind, id, error = %err, "asset upload failed");
                    toast = Toast::warning(format!(
                        "{} {verb}, but the files could not be uploaded. {}",
                        kind.singular(),
                        err.user_message()
                    ));
                }
            }
            None => {
                toast = Toast::warning(format!(
                    "{} {verb}, but the files could not be attached: the server returned no id.",
                    kind.singular()
                ));
            }
        }
    }

    Ok(MutationSuccess {
        toast,
        navigate_to: kind.route(),
        id,
    })
}
