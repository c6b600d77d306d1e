//! Show create form

use showbook_common::db::NewShow;
use showbook_common::time::parse_form_timestamp;

use super::{positive_id, FormErrors, FormFields};

/// Raw show form values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            artist_id: fields.text("artist_id"),
            venue_id: fields.text("venue_id"),
            start_time: fields.text("start_time"),
        }
    }

    /// Check field shapes; whether the ids exist is checked against the store
    pub fn validate(&self) -> Result<NewShow, FormErrors> {
        let mut errors = FormErrors::default();

        let artist_id = positive_id(&mut errors, "artist_id", &self.artist_id);
        let venue_id = positive_id(&mut errors, "venue_id", &self.venue_id);

        let start_time = if self.start_time.trim().is_empty() {
            errors.add("start_time", "This field is required.");
            None
        } else {
            let parsed = parse_form_timestamp(&self.start_time);
            if parsed.is_none() {
                errors.add("start_time", "Not a valid date and time (use YYYY-MM-DD HH:MM).");
            }
            parsed
        };

        match start_time {
            Some(start_time) if errors.is_empty() => Ok(NewShow {
                artist_id,
                venue_id,
                start_time,
            }),
            _ => Err(errors),
        }
    }
}
