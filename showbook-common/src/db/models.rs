//! Database models
//!
//! Plain records returned by the repository functions. None of them carries a
//! connection; writes go through the `*Fields` payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Column values written by venue create and edit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Column values written by artist create and edit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// A booking of one artist at one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// A show joined with both sides of the association
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub show_id: i64,
    pub start_time: DateTime<Utc>,
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}

impl ShowListing {
    /// Upcoming iff the show starts at or after `now`
    pub fn is_upcoming(&self, now: &DateTime<Utc>) -> bool {
        self.start_time >= *now
    }
}

/// Id and display name, used for listings and select options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedRef {
    pub id: i64,
    pub name: String,
}

/// Search hit or listing entry with its own upcoming-show count
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub id: i64,
    pub name: String,
    pub upcoming_show_count: i64,
}

/// Venue listing row carrying its locality
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueLocalityRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub upcoming_show_count: i64,
}
