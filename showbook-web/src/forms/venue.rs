//! Venue create/edit form

use showbook_common::db::{Venue, VenueFields};

use super::{
    genre_list, optional_phone, optional_url, required_text, seeking_text, state_code,
    FormErrors, FormFields,
};

/// Raw venue form values, as submitted or prefilled from a stored venue
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_talent: bool,
    pub seeking_description: String,
}

impl VenueForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            address: fields.text("address"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            facebook_link: fields.text("facebook_link"),
            website_link: fields.text("website_link"),
            genres: fields.all("genres"),
            seeking_talent: fields.flag("seeking_talent"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    /// Prefill for the edit form
    pub fn from_venue(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            website_link: venue.website_link.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            seeking_talent: venue.seeking_talent,
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<VenueFields, FormErrors> {
        let mut errors = FormErrors::default();

        let fields = VenueFields {
            name: required_text(&mut errors, "name", &self.name),
            city: required_text(&mut errors, "city", &self.city),
            state: state_code(&mut errors, "state", &self.state),
            address: required_text(&mut errors, "address", &self.address),
            phone: optional_phone(&mut errors, "phone", &self.phone),
            image_link: optional_url(&mut errors, "image_link", &self.image_link),
            facebook_link: optional_url(&mut errors, "facebook_link", &self.facebook_link),
            website_link: optional_url(&mut errors, "website_link", &self.website_link),
            genres: genre_list(&mut errors, "genres", &self.genres),
            seeking_talent: self.seeking_talent,
            seeking_description: seeking_text(self.seeking_talent, &self.seeking_description),
        };

        errors.into_result(fields)
    }
}
