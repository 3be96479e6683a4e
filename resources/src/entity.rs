//! Typed backend resources and their table projection.
//!
//! DESIGN
//! ======
//! Each entity mirrors one backend resource and is decoded leniently (see
//! `de`). Pages never render entities directly: [`Resource::to_record`]
//! projects an entity into a framework-neutral [`Record`] carrying typed
//! cells for the table and the denormalized detail panel content. This lets
//! one table implementation serve every resource.

#[cfg(test)]
#[path = "entity_test.rs"]
mod entity_test;

use std::fmt;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::OffsetDateTime;

use crate::de;
use crate::envelope::{self, EnvelopeError};
use crate::format::format_idr;
use crate::rich_text::plain_excerpt;
use crate::table::{Cell, Column, TableRow};

// =============================================================================
// RESOURCE TRAIT
// =============================================================================

/// A backend resource with a numeric id and a REST collection.
pub trait Resource: DeserializeOwned + Serialize + Clone + fmt::Debug {
    const KIND: ResourceKind;

    fn id(&self) -> i64;

    /// Presence check for required relations. Entries failing it are
    /// dropped by the normalizer.
    fn is_complete(&self) -> bool {
        true
    }

    fn created_at(&self) -> Option<OffsetDateTime>;

    fn to_record(&self) -> Record;
}

/// Every list resource exposed by the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Trip,
    Booking,
    Blog,
    Boat,
    Hotel,
    Gallery,
    Testimonial,
    Carousel,
    User,
}

impl ResourceKind {
    pub const ALL: [Self; 9] = [
        Self::Trip,
        Self::Booking,
        Self::Blog,
        Self::Boat,
        Self::Hotel,
        Self::Gallery,
        Self::Testimonial,
        Self::Carousel,
        Self::User,
    ];

    /// Plural slug; also the nested list key in `{ data: { <slug>: [...] } }`.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Trip => "trips",
            Self::Booking => "bookings",
            Self::Blog => "blogs",
            Self::Boat => "boats",
            Self::Hotel => "hotels",
            Self::Gallery => "galleries",
            Self::Testimonial => "testimonials",
            Self::Carousel => "carousels",
            Self::User => "users",
        }
    }

    /// REST collection path.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Trip => "/api/trips",
            Self::Booking => "/api/bookings",
            Self::Blog => "/api/blogs",
            Self::Boat => "/api/boats",
            Self::Hotel => "/api/hotels",
            Self::Gallery => "/api/galleries",
            Self::Testimonial => "/api/testimonials",
            Self::Carousel => "/api/carousels",
            Self::User => "/api/users",
        }
    }

    /// Dashboard list route the mutation flow navigates back to.
    #[must_use]
    pub fn route(self) -> &'static str {
        match self {
            Self::Trip => "/dashboard/trips",
            Self::Booking => "/dashboard/bookings",
            Self::Blog => "/dashboard/blogs",
            Self::Boat => "/dashboard/boats",
            Self::Hotel => "/dashboard/hotels",
            Self::Gallery => "/dashboard/galleries",
            Self::Testimonial => "/dashboard/testimonials",
            Self::Carousel => "/dashboard/carousel",
            Self::User => "/dashboard/users",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Trip => "Trips",
            Self::Booking => "Bookings",
            Self::Blog => "Blogs",
            Self::Boat => "Boats",
            Self::Hotel => "Hotels",
            Self::Gallery => "Galleries",
            Self::Testimonial => "Testimonials",
            Self::Carousel => "Carousel",
            Self::User => "Users",
        }
    }

    #[must_use]
    pub fn singular(self) -> &'static str {
        match self {
            Self::Trip => "Trip",
            Self::Booking => "Booking",
            Self::Blog => "Blog",
            Self::Boat => "Boat",
            Self::Hotel => "Hotel",
            Self::Gallery => "Gallery",
            Self::Testimonial => "Testimonial",
            Self::Carousel => "Carousel item",
            Self::User => "User",
        }
    }

    /// `model_type` sent with asset uploads to attach files to a record.
    #[must_use]
    pub fn model_type(self) -> &'static str {
        match self {
            Self::Trip => "trip",
            Self::Booking => "booking",
            Self::Blog => "blog",
            Self::Boat => "boat",
            Self::Hotel => "hotel",
            Self::Gallery => "gallery",
            Self::Testimonial => "testimonial",
            Self::Carousel => "carousel",
            Self::User => "user",
        }
    }

    #[must_use]
    pub fn columns(self) -> &'static [Column] {
        match self {
            Self::Trip => TRIP_COLUMNS,
            Self::Booking => BOOKING_COLUMNS,
            Self::Blog => BLOG_COLUMNS,
            Self::Boat => BOAT_COLUMNS,
            Self::Hotel => HOTEL_COLUMNS,
            Self::Gallery => GALLERY_COLUMNS,
            Self::Testimonial => TESTIMONIAL_COLUMNS,
            Self::Carousel => CAROUSEL_COLUMNS,
            Self::User => USER_COLUMNS,
        }
    }

    /// Column the table's search box filters on.
    #[must_use]
    pub fn filter_column(self) -> &'static str {
        match self {
            Self::Trip | Self::Boat | Self::Hotel | Self::Testimonial => "name",
            Self::Blog | Self::Gallery | Self::Carousel => "title",
            Self::Booking => "trip",
            Self::User => "email",
        }
    }

    /// Normalize a list response for this kind into table records.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the response matches no known envelope.
    pub fn decode_records(self, value: &Value) -> Result<Vec<Record>, EnvelopeError> {
        match self {
            Self::Trip => records::<Trip>(value),
            Self::Booking => {
                let mut bookings = envelope::normalize::<Booking>(value)?;
                envelope::newest_first(&mut bookings);
                Ok(bookings.iter().map(Resource::to_record).collect())
            }
            Self::Blog => records::<Blog>(value),
            Self::Boat => records::<Boat>(value),
            Self::Hotel => records::<Hotel>(value),
            Self::Gallery => records::<Gallery>(value),
            Self::Testimonial => records::<Testimonial>(value),
            Self::Carousel => records::<Carousel>(value),
            Self::User => records::<User>(value),
        }
    }

    /// Unwrap a detail response to the entity object itself.
    ///
    /// # Errors
    ///
    /// Returns [`EnvelopeError`] when the response matches no known envelope
    /// or holds an empty list.
    pub fn decode_detail(self, value: &Value) -> Result<Value, EnvelopeError> {
        envelope::Envelope::classify(value, self.slug())?
            .into_items()
            .into_iter()
            .next()
            .cloned()
            .ok_or(EnvelopeError::UnrecognizedShape)
    }
}

/// Files attached to the entity itself, read from its top-level `assets`.
///
/// Embedded trips and cabins carry their own files; those show up in a
/// [`Record`] for display but belong to another parent and are never offered
/// for removal here. Malformed entries are skipped.
pub fn own_assets(entity: &Value) -> Vec<Asset> {
    match entity.get("assets") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| Asset::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn records<R: Resource>(value: &Value) -> Result<Vec<Record>, EnvelopeError> {
    Ok(envelope::normalize::<R>(value)?
        .iter()
        .map(Resource::to_record)
        .collect())
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown resource `{0}`")]
pub struct UnknownResource(pub String);

impl FromStr for ResourceKind {
    type Err = UnknownResource;

    /// Accepts plural and singular slugs, case-insensitively.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == wanted || kind.model_type() == wanted)
            .ok_or_else(|| UnknownResource(raw.to_owned()))
    }
}

// =============================================================================
// RECORD
// =============================================================================

/// Framework-neutral projection of an entity for tables and detail panels.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub kind: ResourceKind,
    pub id: i64,
    pub cells: Vec<(&'static str, Cell)>,
    pub assets: Vec<Asset>,
    /// Rich text from the CMS. Must go through `rich_text::sanitize` before
    /// being rendered as HTML.
    pub body_html: Option<String>,
    pub author: Option<String>,
    /// Extra label/value lines for the expanded row.
    pub details: Vec<(String, String)>,
}

impl Record {
    fn new(kind: ResourceKind, id: i64) -> Self {
        Self {
            kind,
            id,
            cells: Vec::new(),
            assets: Vec::new(),
            body_html: None,
            author: None,
            details: Vec::new(),
        }
    }

    fn with(mut self, key: &'static str, cell: Cell) -> Self {
        self.cells.push((key, cell));
        self
    }

    fn with_stamps(self, stamps: &Timestamps) -> Self {
        self.with("created_at", stamps.created_at.map_or(Cell::Empty, Cell::Time))
            .with("updated_at", stamps.updated_at.map_or(Cell::Empty, Cell::Time))
    }

    /// Display title: the first text cell, or `#id`.
    #[must_use]
    pub fn title(&self) -> String {
        self.cells
            .iter()
            .find_map(|(_, cell)| match cell {
                Cell::Text(text) => Some(text.clone()),
                _ => None,
            })
            .unwrap_or_else(|| format!("#{}", self.id))
    }
}

impl TableRow for Record {
    fn row_id(&self) -> i64 {
        self.id
    }

    fn cell(&self, key: &str) -> Cell {
        self.cells
            .iter()
            .find(|(cell_key, _)| *cell_key == key)
            .map_or(Cell::Empty, |(_, cell)| cell.clone())
    }
}

// =============================================================================
// SHARED PIECES
// =============================================================================

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamps {
    #[serde(
        default,
        deserialize_with = "de::opt_timestamp",
        serialize_with = "de::ser_opt_timestamp"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        default,
        deserialize_with = "de::opt_timestamp",
        serialize_with = "de::ser_opt_timestamp"
    )]
    pub updated_at: Option<OffsetDateTime>,
}

/// A file attached to a record. Deleted through its own URL-keyed endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    pub file_url: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_external: bool,
}

/// Embedded user reference on bookings and blogs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

// =============================================================================
// TRIP
// =============================================================================

const TRIP_COLUMNS: &[Column] = &[
    Column::new("name", "Name"),
    Column::new("type", "Type"),
    Column::new("destination", "Destination"),
    Column::new("duration", "Duration"),
    Column::new("price", "Price"),
    Column::new("created_at", "Created"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, rename = "type")]
    pub trip_type: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for Trip {
    const KIND: ResourceKind = ResourceKind::Trip;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new(Self::KIND, self.id)
            .with("name", Cell::text(Some(self.name.as_str())))
            .with("type", Cell::text(self.trip_type.as_deref()))
            .with("destination", Cell::text(self.destination.as_deref()))
            .with("duration", Cell::text(self.duration.as_deref()))
            .with("price", self.price.map_or(Cell::Empty, Cell::Money))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record.body_html.clone_from(&self.description);
        record
    }
}

// =============================================================================
// BOOKING
// =============================================================================

const BOOKING_COLUMNS: &[Column] = &[
    Column::new("trip", "Trip"),
    Column::new("customer", "Customer"),
    Column::new("status", "Status"),
    Column::new("pax", "Pax"),
    Column::new("total_price", "Total"),
    Column::new("booking_date", "Trip date"),
    Column::new("created_at", "Booked"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    /// Required relation; bookings without a trip are dropped.
    #[serde(default)]
    pub trip: Option<Trip>,
    #[serde(default)]
    pub user: Option<UserSummary>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub pax: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub total_price: Option<i64>,
    #[serde(
        default,
        deserialize_with = "de::opt_timestamp",
        serialize_with = "de::ser_opt_timestamp"
    )]
    pub booking_date: Option<OffsetDateTime>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for Booking {
    const KIND: ResourceKind = ResourceKind::Booking;

    fn id(&self) -> i64 {
        self.id
    }

    fn is_complete(&self) -> bool {
        self.trip.is_some()
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let trip_name = self.trip.as_ref().map(|trip| trip.name.as_str());
        let customer = self.user.as_ref().map(|user| user.name.as_str());
        let mut record = Record::new(Self::KIND, self.id)
            .with("trip", Cell::text(trip_name))
            .with("customer", Cell::text(customer))
            .with("status", Cell::text(self.status.as_deref()))
            .with("pax", self.pax.map_or(Cell::Empty, Cell::Number))
            .with("total_price", self.total_price.map_or(Cell::Empty, Cell::Money))
            .with("booking_date", self.booking_date.map_or(Cell::Empty, Cell::Time))
            .with_stamps(&self.stamps);
        if let Some(email) = self.user.as_ref().and_then(|user| user.email.clone()) {
            record.details.push(("Email".to_owned(), email));
        }
        if let Some(trip) = &self.trip {
            if let Some(price) = trip.price {
                record.details.push(("Trip price".to_owned(), format_idr(price)));
            }
            record.assets.clone_from(&trip.assets);
        }
        if let Some(notes) = self.notes.as_deref().filter(|notes| !notes.trim().is_empty()) {
            record.details.push(("Notes".to_owned(), notes.to_owned()));
        }
        record.assets.extend(self.assets.iter().cloned());
        record
    }
}

// =============================================================================
// BLOG
// =============================================================================

const BLOG_COLUMNS: &[Column] = &[
    Column::new("title", "Title"),
    Column::new("author", "Author"),
    Column::new("status", "Status"),
    Column::new("created_at", "Published"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Blog {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default, alias = "user")]
    pub author: Option<UserSummary>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for Blog {
    const KIND: ResourceKind = ResourceKind::Blog;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let author = self.author.as_ref().map(|author| author.name.as_str());
        let mut record = Record::new(Self::KIND, self.id)
            .with("title", Cell::text(Some(self.title.as_str())))
            .with("author", Cell::text(author))
            .with("status", Cell::text(self.status.as_deref()))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record.body_html.clone_from(&self.content);
        record.author = self.author.as_ref().map(|author| match &author.email {
            Some(email) => format!("{} <{email}>", author.name),
            None => author.name.clone(),
        });
        if let Some(slug) = &self.slug {
            record.details.push(("Slug".to_owned(), slug.clone()));
        }
        record
    }
}

// =============================================================================
// BOAT / CABIN
// =============================================================================

const BOAT_COLUMNS: &[Column] = &[
    Column::new("name", "Name"),
    Column::new("capacity", "Capacity"),
    Column::new("cabins", "Cabins"),
    Column::new("created_at", "Created"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Boat {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub capacity: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub cabins: Vec<Cabin>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

/// A cabin belongs to exactly one boat and is edited through the boat form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cabin {
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, rename = "type")]
    pub cabin_type: Option<String>,
    #[serde(default)]
    pub bed_type: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub max_capacity: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<i64>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
}

impl Cabin {
    fn summary(&self) -> String {
        let mut parts = Vec::new();
        if let Some(kind) = &self.cabin_type {
            parts.push(kind.clone());
        }
        if let Some(bed) = &self.bed_type {
            parts.push(bed.clone());
        }
        if let Some(capacity) = self.max_capacity {
            parts.push(format!("{capacity} pax"));
        }
        if let Some(price) = self.price {
            parts.push(format_idr(price));
        }
        parts.join(" / ")
    }
}

impl Resource for Boat {
    const KIND: ResourceKind = ResourceKind::Boat;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let cabin_count = i64::try_from(self.cabins.len()).unwrap_or(i64::MAX);
        let mut record = Record::new(Self::KIND, self.id)
            .with("name", Cell::text(Some(self.name.as_str())))
            .with("capacity", self.capacity.map_or(Cell::Empty, Cell::Number))
            .with("cabins", Cell::Number(cabin_count))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record.body_html.clone_from(&self.description);
        for cabin in &self.cabins {
            record.details.push((format!("Cabin {}", cabin.name), cabin.summary()));
            record.assets.extend(cabin.assets.iter().cloned());
        }
        record
    }
}

// =============================================================================
// HOTEL
// =============================================================================

const HOTEL_COLUMNS: &[Column] = &[
    Column::new("name", "Name"),
    Column::new("address", "Address"),
    Column::new("stars", "Stars"),
    Column::new("price", "Price"),
    Column::new("created_at", "Created"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hotel {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub stars: Option<i64>,
    #[serde(default, deserialize_with = "de::opt_money")]
    pub price: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for Hotel {
    const KIND: ResourceKind = ResourceKind::Hotel;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new(Self::KIND, self.id)
            .with("name", Cell::text(Some(self.name.as_str())))
            .with("address", Cell::text(self.address.as_deref()))
            .with("stars", self.stars.map_or(Cell::Empty, Cell::Number))
            .with("price", self.price.map_or(Cell::Empty, Cell::Money))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record.body_html.clone_from(&self.description);
        record
    }
}

// =============================================================================
// GALLERY
// =============================================================================

const GALLERY_COLUMNS: &[Column] = &[
    Column::new("title", "Title"),
    Column::new("images", "Images"),
    Column::new("created_at", "Created"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gallery {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for Gallery {
    const KIND: ResourceKind = ResourceKind::Gallery;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let images = i64::try_from(self.assets.len()).unwrap_or(i64::MAX);
        let mut record = Record::new(Self::KIND, self.id)
            .with("title", Cell::text(Some(self.title.as_str())))
            .with("images", Cell::Number(images))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record.body_html.clone_from(&self.description);
        record
    }
}

// =============================================================================
// TESTIMONIAL
// =============================================================================

const TESTIMONIAL_COLUMNS: &[Column] = &[
    Column::new("name", "Name"),
    Column::new("rating", "Rating"),
    Column::unsortable("message", "Message"),
    Column::new("created_at", "Created"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Testimonial {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub message: String,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub rating: Option<i64>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for Testimonial {
    const KIND: ResourceKind = ResourceKind::Testimonial;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let excerpt = plain_excerpt(&self.message, 80);
        let mut record = Record::new(Self::KIND, self.id)
            .with("name", Cell::text(Some(self.name.as_str())))
            .with("rating", self.rating.map_or(Cell::Empty, Cell::Number))
            .with("message", Cell::text(Some(excerpt.as_str())))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record.body_html = Some(self.message.clone());
        if let Some(source) = &self.source {
            record.details.push(("Source".to_owned(), source.clone()));
        }
        record
    }
}

// =============================================================================
// CAROUSEL
// =============================================================================

const CAROUSEL_COLUMNS: &[Column] = &[
    Column::new("title", "Title"),
    Column::new("order", "Order"),
    Column::new("is_active", "Active"),
    Column::new("created_at", "Created"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Carousel {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "de::opt_i64")]
    pub order: Option<i64>,
    #[serde(default, deserialize_with = "de::flag")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for Carousel {
    const KIND: ResourceKind = ResourceKind::Carousel;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new(Self::KIND, self.id)
            .with("title", Cell::text(Some(self.title.as_str())))
            .with("order", self.order.map_or(Cell::Empty, Cell::Number))
            .with("is_active", Cell::Flag(self.is_active))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record.body_html.clone_from(&self.description);
        record
    }
}

// =============================================================================
// USER
// =============================================================================

const USER_COLUMNS: &[Column] = &[
    Column::new("name", "Name"),
    Column::new("email", "Email"),
    Column::new("role", "Role"),
    Column::new("phone", "Phone"),
    Column::new("created_at", "Joined"),
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "de::id")]
    pub id: i64,
    #[serde(default, deserialize_with = "de::or_default")]
    pub name: String,
    #[serde(default, deserialize_with = "de::or_default")]
    pub email: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "de::or_default")]
    pub assets: Vec<Asset>,
    #[serde(flatten)]
    pub stamps: Timestamps,
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::User;

    fn id(&self) -> i64 {
        self.id
    }

    fn created_at(&self) -> Option<OffsetDateTime> {
        self.stamps.created_at
    }

    fn to_record(&self) -> Record {
        let mut record = Record::new(Self::KIND, self.id)
            .with("name", Cell::text(Some(self.name.as_str())))
            .with("email", Cell::text(Some(self.email.as_str())))
            .with("role", Cell::text(self.role.as_deref()))
            .with("phone", Cell::text(self.phone.as_deref()))
            .with_stamps(&self.stamps);
        record.assets.clone_from(&self.assets);
        record
    }
}
