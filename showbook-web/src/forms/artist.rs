//! Artist create/edit form

use showbook_common::db::{Artist, ArtistFields};

use super::{
    genre_list, optional_phone, optional_url, required_text, seeking_text, state_code,
    FormErrors, FormFields,
};

/// Raw artist form values, as submitted or prefilled from a stored artist
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub facebook_link: String,
    pub website_link: String,
    pub genres: Vec<String>,
    pub seeking_venue: bool,
    pub seeking_description: String,
}

impl ArtistForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            name: fields.text("name"),
            city: fields.text("city"),
            state: fields.text("state"),
            phone: fields.text("phone"),
            image_link: fields.text("image_link"),
            facebook_link: fields.text("facebook_link"),
            website_link: fields.text("website_link"),
            genres: fields.all("genres"),
            seeking_venue: fields.flag("seeking_venue"),
            seeking_description: fields.text("seeking_description"),
        }
    }

    /// Prefill for the edit form
    pub fn from_artist(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            website_link: artist.website_link.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            seeking_venue: artist.seeking_venue,
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<ArtistFields, FormErrors> {
        let mut errors = FormErrors::default();

        let fields = ArtistFields {
            name: required_text(&mut errors, "name", &self.name),
            city: required_text(&mut errors, "city", &self.city),
            state: state_code(&mut errors, "state", &self.state),
            phone: optional_phone(&mut errors, "phone", &self.phone),
            image_link: optional_url(&mut errors, "image_link", &self.image_link),
            facebook_link: optional_url(&mut errors, "facebook_link", &self.facebook_link),
            website_link: optional_url(&mut errors, "website_link", &self.website_link),
            genres: genre_list(&mut errors, "genres", &self.genres),
            seeking_venue: self.seeking_venue,
            seeking_description: seeking_text(self.seeking_venue, &self.seeking_description),
        };

        errors.into_result(fields)
    }
}
