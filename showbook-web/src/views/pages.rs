//! Read-only pages

use showbook_common::db::{NamedRef, ShowListing};
use showbook_common::time::{format_datetime, DisplayFormat};

use super::layout::{escape, image, page};
use super::models::{
    ArtistDetail, CounterpartShow, LocalityGroup, SearchResults, ShowPartition, VenueDetail,
};

/// Which directory a listing or search page belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    Venues,
    Artists,
}

impl Directory {
    fn path(self) -> &'static str {
        match self {
            Directory::Venues => "/venues",
            Directory::Artists => "/artists",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Directory::Venues => "Venues",
            Directory::Artists => "Artists",
        }
    }
}

pub fn home() -> String {
    let body = r#"<section class="hero">
<h1>Showbook</h1>
<p>Find venues and artists, and book the next show.</p>
<p><a href="/venues">Browse venues</a> · <a href="/artists">Browse artists</a> · <a href="/shows">See shows</a></p>
</section>"#;
    page("Home", None, body)
}

fn search_form(directory: Directory, term: &str) -> String {
    format!(
        r#"<form class="search" method="post" action="{path}/search">
<input type="search" name="search_term" value="{term}" placeholder="Find {what}">
<button type="submit">Search</button>
</form>"#,
        path = directory.path(),
        term = escape(term),
        what = directory.title().to_lowercase(),
    )
}

fn summary_item(directory: Directory, id: i64, name: &str, upcoming: Option<i64>) -> String {
    let count = upcoming
        .map(|n| format!(r#" <span class="count">{} upcoming</span>"#, n))
        .unwrap_or_default();
    format!(
        r#"<li><a href="{}/{}">{}</a>{}</li>"#,
        directory.path(),
        id,
        escape(name),
        count
    )
}

pub fn venues_index(groups: &[LocalityGroup]) -> String {
    let mut body = search_form(Directory::Venues, "");

    if groups.is_empty() {
        body.push_str(r#"<p class="empty">No venues listed yet.</p>"#);
    }

    for group in groups {
        body.push_str(&format!(
            "<h3>{}, {}</h3>\n<ul class=\"items\">\n",
            escape(&group.city),
            escape(&group.state)
        ));
        for venue in &group.venues {
            body.push_str(&summary_item(
                Directory::Venues,
                venue.id,
                &venue.name,
                Some(venue.upcoming_show_count),
            ));
            body.push('\n');
        }
        body.push_str("</ul>\n");
    }

    page("Venues", None, &body)
}

pub fn artists_index(artists: &[NamedRef]) -> String {
    let mut body = search_form(Directory::Artists, "");

    if artists.is_empty() {
        body.push_str(r#"<p class="empty">No artists listed yet.</p>"#);
    } else {
        body.push_str("<ul class=\"items\">\n");
        for artist in artists {
            body.push_str(&summary_item(Directory::Artists, artist.id, &artist.name, None));
            body.push('\n');
        }
        body.push_str("</ul>\n");
    }

    page("Artists", None, &body)
}

pub fn search_results(directory: Directory, results: &SearchResults) -> String {
    let mut body = search_form(directory, &results.search_term);

    body.push_str(&format!(
        "<h3>Number of search results for \"{}\": {}</h3>\n<ul class=\"items\">\n",
        escape(&results.search_term),
        results.count
    ));
    for hit in &results.data {
        body.push_str(&summary_item(
            directory,
            hit.id,
            &hit.name,
            Some(hit.upcoming_show_count),
        ));
        body.push('\n');
    }
    body.push_str("</ul>\n");

    page(&format!("Search {}", directory.title()), None, &body)
}

fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="genre">{}</span>"#, escape(g)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn optional_line(class: &str, value: Option<&str>) -> String {
    match value {
        Some(value) if !value.is_empty() => {
            format!(r#"<p class="{}">{}</p>"#, class, escape(value))
        }
        _ => String::new(),
    }
}

fn optional_link(label: &str, link: Option<&str>) -> String {
    match link {
        Some(link) if !link.is_empty() => format!(
            r#"<p><a href="{}" target="_blank" rel="noopener">{}</a></p>"#,
            escape(link),
            label
        ),
        _ => String::new(),
    }
}

fn seeking_block(seeking: bool, what: &str, description: Option<&str>) -> String {
    if !seeking {
        return format!(r#"<p class="not-seeking">Not currently seeking {}</p>"#, what);
    }
    let description = description
        .filter(|d| !d.is_empty())
        .map(escape)
        .unwrap_or_default();
    format!(
        r#"<div class="seeking"><p>Currently seeking {}</p><p>{}</p></div>"#,
        what, description
    )
}

fn show_cards(heading: &str, counterpart_path: &str, shows: &[CounterpartShow]) -> String {
    let mut out = format!("<h3>{} ({})</h3>\n<div class=\"shows\">\n", heading, shows.len());
    for show in shows {
        out.push_str(&format!(
            r#"<div class="show-card">{img}<a href="{path}/{id}">{name}</a><time datetime="{iso}">{when}</time></div>"#,
            img = image(show.image_link.as_deref(), &show.name),
            path = counterpart_path,
            id = show.id,
            name = escape(&show.name),
            iso = show.start_time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            when = format_datetime(&show.start_time, DisplayFormat::Medium),
        ));
        out.push('\n');
    }
    out.push_str("</div>\n");
    out
}

fn show_sections(counterpart_path: &str, shows: &ShowPartition) -> String {
    let mut out = show_cards("Upcoming Shows", counterpart_path, &shows.upcoming_shows);
    out.push_str(&show_cards("Past Shows", counterpart_path, &shows.past_shows));
    out
}

fn detail_actions(directory: Directory, id: i64, what: &str) -> String {
    format!(
        r#"<div class="actions">
<a class="button" href="{path}/{id}/edit">Edit</a>
<button class="delete-button" data-url="{path}/{id}" data-what="{what}">Delete</button>
</div>"#,
        path = directory.path(),
        id = id,
        what = what,
    )
}

/// `notice` is set right after the venue was listed
pub fn venue_detail(detail: &VenueDetail, notice: Option<&str>) -> String {
    let venue = &detail.venue;
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"subtitle\">ID: {}</p>\n<div class=\"genres\">{}</div>\n",
        escape(&venue.name),
        venue.id,
        genre_tags(&venue.genres)
    );
    body.push_str(&format!(
        r#"<p class="address">{}, {}, {}</p>"#,
        escape(&venue.address),
        escape(&venue.city),
        escape(&venue.state)
    ));
    body.push_str(&optional_line("phone", venue.phone.as_deref()));
    body.push_str(&optional_link("Website", venue.website_link.as_deref()));
    body.push_str(&optional_link("Facebook", venue.facebook_link.as_deref()));
    body.push_str(&seeking_block(
        venue.seeking_talent,
        "talent",
        venue.seeking_description.as_deref(),
    ));
    body.push_str(&image(venue.image_link.as_deref(), &venue.name));
    body.push('\n');
    body.push_str(&show_sections("/artists", &detail.shows));
    body.push_str(&detail_actions(Directory::Venues, venue.id, "venue"));

    page(&venue.name, notice, &body)
}

pub fn artist_detail(detail: &ArtistDetail, notice: Option<&str>) -> String {
    let artist = &detail.artist;
    let mut body = format!(
        "<h1>{}</h1>\n<p class=\"subtitle\">ID: {}</p>\n<div class=\"genres\">{}</div>\n",
        escape(&artist.name),
        artist.id,
        genre_tags(&artist.genres)
    );
    body.push_str(&format!(
        r#"<p class="address">{}, {}</p>"#,
        escape(&artist.city),
        escape(&artist.state)
    ));
    body.push_str(&optional_line("phone", artist.phone.as_deref()));
    body.push_str(&optional_link("Website", artist.website_link.as_deref()));
    body.push_str(&optional_link("Facebook", artist.facebook_link.as_deref()));
    body.push_str(&seeking_block(
        artist.seeking_venue,
        "performance venues",
        artist.seeking_description.as_deref(),
    ));
    body.push_str(&image(artist.image_link.as_deref(), &artist.name));
    body.push('\n');
    body.push_str(&show_sections("/venues", &detail.shows));
    body.push_str(&detail_actions(Directory::Artists, artist.id, "artist"));

    page(&artist.name, notice, &body)
}

pub fn shows_index(shows: &[ShowListing], notice: Option<&str>) -> String {
    let mut body = String::from("<h1>Shows</h1>\n");

    if shows.is_empty() {
        body.push_str(r#"<p class="empty">No shows listed yet.</p>"#);
    }

    body.push_str("<div class=\"shows\">\n");
    for show in shows {
        body.push_str(&format!(
            r#"<div class="show-card">{img}<time datetime="{iso}">{when}</time><a href="/artists/{artist_id}">{artist}</a> playing at <a href="/venues/{venue_id}">{venue}</a></div>"#,
            img = image(show.artist_image_link.as_deref(), &show.artist_name),
            iso = show.start_time.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            when = format_datetime(&show.start_time, DisplayFormat::Full),
            artist_id = show.artist_id,
            artist = escape(&show.artist_name),
            venue_id = show.venue_id,
            venue = escape(&show.venue_name),
        ));
        body.push('\n');
    }
    body.push_str("</div>\n");

    page("Shows", notice, &body)
}

pub fn not_found() -> String {
    page(
        "Not Found",
        None,
        r#"<h1>404</h1><p>Sorry, that page could not be found.</p><p><a href="/">Back home</a></p>"#,
    )
}

pub fn server_error() -> String {
    page(
        "Server Error",
        None,
        r#"<h1>500</h1><p>Sorry, something went wrong. Please try again.</p><p><a href="/">Back home</a></p>"#,
    )
}
