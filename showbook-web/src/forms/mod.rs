//! Form decoding and validation
//!
//! Bodies are decoded as ordered key/value pairs so multi-select fields
//! (`genres=Jazz&genres=Rock`) keep every value. Each form type turns the raw
//! values into the write payload the repositories expect, or into
//! [`FormErrors`] for re-rendering.

mod artist;
mod show;
mod venue;

pub use artist::ArtistForm;
pub use show::ShowForm;
pub use venue::VenueForm;

use once_cell::sync::Lazy;
use regex::Regex;
use showbook_common::catalog;
use std::collections::BTreeMap;

static PHONE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\(\d{3}\)\s?|\d{3}[-.\s]?)\d{3}[-.\s]?\d{4}$").expect("phone pattern is valid")
});

static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^https?://[^\s/$.?#][^\s]*$").expect("url pattern is valid"));

/// Decoded `application/x-www-form-urlencoded` body
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// First value submitted under `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// First value under `name`, trimmed; empty when absent
    pub fn text(&self, name: &str) -> String {
        self.get(name).map(str::trim).unwrap_or_default().to_string()
    }

    /// Every value submitted under `name`, in submission order
    pub fn all(&self, name: &str) -> Vec<String> {
        self.pairs
            .iter()
            .filter(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Checkbox semantics: absent is false
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.get(name).map(|v| v.trim().to_ascii_lowercase()).as_deref(),
            Some("y" | "yes" | "on" | "true" | "1")
        )
    }
}

/// Field-level validation messages, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormErrors {
    errors: BTreeMap<&'static str, Vec<String>>,
}

impl FormErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Messages for one field (empty when the field is valid)
    pub fn get(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Names of the fields that failed
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.keys().copied()
    }

    /// `Ok(value)` when no errors were recorded
    pub fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

fn required_text(errors: &mut FormErrors, field: &'static str, value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
    }
    value.to_string()
}

fn state_code(errors: &mut FormErrors, field: &'static str, value: &str) -> String {
    if value.trim().is_empty() {
        errors.add(field, "This field is required.");
        return String::new();
    }
    match catalog::normalize_state(value) {
        Some(code) => code.to_string(),
        None => {
            errors.add(field, "Not a valid choice.");
            value.trim().to_string()
        }
    }
}

fn optional_phone(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if !PHONE_PATTERN.is_match(value) {
        errors.add(field, "Invalid phone number (expected e.g. 555-555-5555).");
    }
    Some(value.to_string())
}

fn optional_url(errors: &mut FormErrors, field: &'static str, value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if !URL_PATTERN.is_match(value) {
        errors.add(field, "Invalid URL.");
    }
    Some(value.to_string())
}

/// Validate a multi-select genre list, collapsing duplicates
fn genre_list(errors: &mut FormErrors, field: &'static str, values: &[String]) -> Vec<String> {
    let mut genres: Vec<String> = Vec::with_capacity(values.len());
    for value in values.iter().map(|v| v.trim()).filter(|v| !v.is_empty()) {
        match catalog::lookup_genre(value) {
            Some(genre) => {
                if !genres.iter().any(|g| g == genre) {
                    genres.push(genre.to_string());
                }
            }
            None => errors.add(field, format!("'{}' is not a valid choice.", value)),
        }
    }
    if genres.is_empty() && errors.get(field).is_empty() {
        errors.add(field, "Select at least one genre.");
    }
    genres
}

/// Seeking descriptions only mean something while the flag is set
fn seeking_text(seeking: bool, value: &str) -> Option<String> {
    let value = value.trim();
    (seeking && !value.is_empty()).then(|| value.to_string())
}

fn positive_id(errors: &mut FormErrors, field: &'static str, value: &str) -> i64 {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, "This field is required.");
        return 0;
    }
    match value.parse::<i64>() {
        Ok(id) if id > 0 => id,
        _ => {
            errors.add(field, "Must be a positive whole number.");
            0
        }
    }
}
