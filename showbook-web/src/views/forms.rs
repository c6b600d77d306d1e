//! Create and edit form pages
//!
//! Forms always re-render with the submitted values so a failed validation
//! loses nothing the user typed.

use showbook_common::catalog::{GENRES, STATE_CODES};
use showbook_common::db::NamedRef;

use super::layout::{escape, page};
use crate::forms::{ArtistForm, FormErrors, ShowForm, VenueForm};

fn field_errors(errors: &FormErrors, name: &str) -> String {
    errors
        .get(name)
        .iter()
        .map(|message| format!(r#"<span class="field-error">{}</span>"#, escape(message)))
        .collect()
}

fn text_input(
    label: &str,
    name: &str,
    input_type: &str,
    value: &str,
    errors: &FormErrors,
) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
<input type="{input_type}" id="{name}" name="{name}" value="{value}">
{errors}"#,
        name = name,
        label = label,
        input_type = input_type,
        value = escape(value),
        errors = field_errors(errors, name),
    )
}

fn select_options<'a>(
    options: impl Iterator<Item = (String, &'a str)>,
    is_selected: impl Fn(&str) -> bool,
) -> String {
    options
        .map(|(value, label)| {
            let selected = if is_selected(value.as_str()) { " selected" } else { "" };
            format!(
                r#"<option value="{}"{}>{}</option>"#,
                escape(&value),
                selected,
                escape(label)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn state_select(value: &str, errors: &FormErrors) -> String {
    let options = select_options(
        STATE_CODES.iter().map(|code| (code.to_string(), *code)),
        |code| code.eq_ignore_ascii_case(value),
    );
    format!(
        r#"<label for="state">State</label>
<select id="state" name="state">
<option value="">Select a state</option>
{options}
</select>
{errors}"#,
        options = options,
        errors = field_errors(errors, "state"),
    )
}

fn genre_select(selected: &[String], errors: &FormErrors) -> String {
    let options = select_options(
        GENRES.iter().map(|genre| (genre.to_string(), *genre)),
        |genre| selected.iter().any(|s| s == genre),
    );
    format!(
        r#"<label for="genres">Genres <small>(Ctrl+Click to select multiple)</small></label>
<select id="genres" name="genres" multiple>
{options}
</select>
{errors}"#,
        options = options,
        errors = field_errors(errors, "genres"),
    )
}

fn seeking_inputs(flag_name: &str, label: &str, checked: bool, description: &str) -> String {
    format!(
        r#"<label class="checkbox"><input type="checkbox" name="{flag}" value="y"{checked}> {label}</label>
<label for="seeking_description">Seeking description</label>
<textarea id="seeking_description" name="seeking_description">{description}</textarea>"#,
        flag = flag_name,
        checked = if checked { " checked" } else { "" },
        label = label,
        description = escape(description),
    )
}

fn form_page(title: &str, action: &str, fields: &str, errors: &FormErrors) -> String {
    let summary = if errors.is_empty() {
        String::new()
    } else {
        r#"<div class="form-errors">Please correct the highlighted fields.</div>"#.to_string()
    };
    let body = format!(
        r#"<h1>{title}</h1>
{summary}
<form class="form" method="post" action="{action}">
{fields}
<button type="submit">{title}</button>
</form>"#,
        title = escape(title),
        summary = summary,
        action = escape(action),
        fields = fields,
    );
    page(title, None, &body)
}

/// Venue form; `action` is the create or edit submission path
pub fn venue_form(title: &str, action: &str, form: &VenueForm, errors: &FormErrors) -> String {
    let fields = [
        text_input("Name", "name", "text", &form.name, errors),
        text_input("City", "city", "text", &form.city, errors),
        state_select(&form.state, errors),
        text_input("Address", "address", "text", &form.address, errors),
        text_input("Phone", "phone", "tel", &form.phone, errors),
        genre_select(&form.genres, errors),
        text_input("Image link", "image_link", "url", &form.image_link, errors),
        text_input("Facebook link", "facebook_link", "url", &form.facebook_link, errors),
        text_input("Website link", "website_link", "url", &form.website_link, errors),
        seeking_inputs(
            "seeking_talent",
            "Looking for talent",
            form.seeking_talent,
            &form.seeking_description,
        ),
    ]
    .join("\n");

    form_page(title, action, &fields, errors)
}

/// Artist form; `action` is the create or edit submission path
pub fn artist_form(title: &str, action: &str, form: &ArtistForm, errors: &FormErrors) -> String {
    let fields = [
        text_input("Name", "name", "text", &form.name, errors),
        text_input("City", "city", "text", &form.city, errors),
        state_select(&form.state, errors),
        text_input("Phone", "phone", "tel", &form.phone, errors),
        genre_select(&form.genres, errors),
        text_input("Image link", "image_link", "url", &form.image_link, errors),
        text_input("Facebook link", "facebook_link", "url", &form.facebook_link, errors),
        text_input("Website link", "website_link", "url", &form.website_link, errors),
        seeking_inputs(
            "seeking_venue",
            "Looking for venues",
            form.seeking_venue,
            &form.seeking_description,
        ),
    ]
    .join("\n");

    form_page(title, action, &fields, errors)
}

fn reference_select(
    label: &str,
    name: &str,
    value: &str,
    choices: &[NamedRef],
    errors: &FormErrors,
) -> String {
    let options = select_options(
        choices
            .iter()
            .map(|choice| (choice.id.to_string(), choice.name.as_str())),
        |id| id == value,
    );
    format!(
        r#"<label for="{name}">{label}</label>
<select id="{name}" name="{name}">
<option value="">Select {label_lower}</option>
{options}
</select>
{errors}"#,
        name = name,
        label = label,
        label_lower = label.to_lowercase(),
        options = options,
        errors = field_errors(errors, name),
    )
}

/// Show form with artist and venue pickers
pub fn show_form(
    form: &ShowForm,
    errors: &FormErrors,
    artists: &[NamedRef],
    venues: &[NamedRef],
) -> String {
    let fields = [
        reference_select("Artist", "artist_id", &form.artist_id, artists, errors),
        reference_select("Venue", "venue_id", &form.venue_id, venues, errors),
        format!(
            r#"<label for="start_time">Start time <small>(YYYY-MM-DD HH:MM, UTC)</small></label>
<input type="text" id="start_time" name="start_time" value="{value}" placeholder="2035-04-01 20:00">
{errors}"#,
            value = escape(&form.start_time),
            errors = field_errors(errors, "start_time"),
        ),
    ]
    .join("\n");

    form_page("List a new show", "/shows/create", &fields, errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_venue_form_keeps_submitted_values_and_errors() {
        let form = VenueForm {
            name: "The \"Hop\"".to_string(),
            state: "ca".to_string(),
            genres: vec!["Jazz".to_string(), "Folk".to_string()],
            seeking_talent: true,
            ..Default::default()
        };
        let mut errors = FormErrors::default();
        errors.add("city", "This field is required.");

        let html = venue_form("List a new venue", "/venues/create", &form, &errors);
        assert!(html.contains(r#"value="The &quot;Hop&quot;""#));
        assert!(html.contains(r#"<option value="CA" selected>CA</option>"#));
        assert!(html.contains(r#"<option value="Jazz" selected>Jazz</option>"#));
        assert!(html.contains(r#"<option value="Folk" selected>Folk</option>"#));
        assert!(html.contains(r#"<option value="Blues">Blues</option>"#));
        assert!(html.contains(r#"name="seeking_talent" value="y" checked"#));
        assert!(html.contains("This field is required."));
    }

    #[test]
    fn test_show_form_preselects_reference() {
        let artists = vec![NamedRef {
            id: 4,
            name: "Guns N Petals".to_string(),
        }];
        let venues = vec![NamedRef {
            id: 1,
            name: "The Musical Hop".to_string(),
        }];
        let form = ShowForm {
            artist_id: "4".to_string(),
            ..Default::default()
        };

        let html = show_form(&form, &FormErrors::default(), &artists, &venues);
        assert!(html.contains(r#"<option value="4" selected>Guns N Petals</option>"#));
        assert!(html.contains(r#"<option value="1">The Musical Hop</option>"#));
        assert!(!html.contains("form-errors"));
    }
}
