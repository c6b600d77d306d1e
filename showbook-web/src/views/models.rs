//! View data assembled from repository records
//!
//! Everything here is plain and serializable; "now" is always passed in so
//! the past/upcoming split is reproducible.

use chrono::{DateTime, Utc};
use serde::Serialize;
use showbook_common::db::{Artist, EntitySummary, ShowListing, Venue, VenueLocalityRow};

/// Venues sharing one (city, state) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<EntitySummary>,
}

/// Group venue rows by locality
///
/// Rows must already be ordered by state, then city; group order follows the
/// input and venues keep their order inside each group.
pub fn group_by_locality(rows: Vec<VenueLocalityRow>) -> Vec<LocalityGroup> {
    let mut groups: Vec<LocalityGroup> = Vec::new();

    for row in rows {
        let summary = EntitySummary {
            id: row.id,
            name: row.name,
            upcoming_show_count: row.upcoming_show_count,
        };

        match groups.last_mut() {
            Some(group) if group.city == row.city && group.state == row.state => {
                group.venues.push(summary);
            }
            _ => groups.push(LocalityGroup {
                city: row.city,
                state: row.state,
                venues: vec![summary],
            }),
        }
    }

    groups
}

/// Result page data for a name search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<EntitySummary>,
}

impl SearchResults {
    pub fn new(search_term: &str, data: Vec<EntitySummary>) -> Self {
        Self {
            search_term: search_term.to_string(),
            count: data.len(),
            data,
        }
    }
}

/// Which side of a show a detail page lists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Counterpart {
    /// Venue pages list the performing artists
    Artist,
    /// Artist pages list the venues played
    Venue,
}

/// One show as seen from a venue or artist detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CounterpartShow {
    pub show_id: i64,
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
    /// Serialized as ISO-8601
    pub start_time: DateTime<Utc>,
}

/// Shows split at "now"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowPartition {
    pub past_shows: Vec<CounterpartShow>,
    pub upcoming_shows: Vec<CounterpartShow>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// Split listings into past (`start_time < now`) and upcoming shows
pub fn partition_shows(
    listings: Vec<ShowListing>,
    now: &DateTime<Utc>,
    counterpart: Counterpart,
) -> ShowPartition {
    let (upcoming, past): (Vec<ShowListing>, Vec<ShowListing>) =
        listings.into_iter().partition(|show| show.is_upcoming(now));

    let convert = |shows: Vec<ShowListing>| -> Vec<CounterpartShow> {
        shows
            .into_iter()
            .map(|show| match counterpart {
                Counterpart::Artist => CounterpartShow {
                    show_id: show.show_id,
                    id: show.artist_id,
                    name: show.artist_name,
                    image_link: show.artist_image_link,
                    start_time: show.start_time,
                },
                Counterpart::Venue => CounterpartShow {
                    show_id: show.show_id,
                    id: show.venue_id,
                    name: show.venue_name,
                    image_link: show.venue_image_link,
                    start_time: show.start_time,
                },
            })
            .collect()
    };

    let past_shows = convert(past);
    let upcoming_shows = convert(upcoming);

    ShowPartition {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    }
}

/// Venue detail page data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    #[serde(flatten)]
    pub venue: Venue,
    #[serde(flatten)]
    pub shows: ShowPartition,
}

impl VenueDetail {
    pub fn assemble(venue: Venue, listings: Vec<ShowListing>, now: &DateTime<Utc>) -> Self {
        Self {
            venue,
            shows: partition_shows(listings, now, Counterpart::Artist),
        }
    }
}

/// Artist detail page data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    #[serde(flatten)]
    pub artist: Artist,
    #[serde(flatten)]
    pub shows: ShowPartition,
}

impl ArtistDetail {
    pub fn assemble(artist: Artist, listings: Vec<ShowListing>, now: &DateTime<Utc>) -> Self {
        Self {
            artist,
            shows: partition_shows(listings, now, Counterpart::Venue),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 20, 0, 0).unwrap()
    }

    fn listing(show_id: i64, start_time: DateTime<Utc>) -> ShowListing {
        ShowListing {
            show_id,
            start_time,
            venue_id: 1,
            venue_name: "The Musical Hop".to_string(),
            venue_image_link: None,
            artist_id: 4,
            artist_name: "Guns N Petals".to_string(),
            artist_image_link: Some("https://images.example.com/gnp.jpg".to_string()),
        }
    }

    fn locality_row(id: i64, name: &str, city: &str, state: &str, count: i64) -> VenueLocalityRow {
        VenueLocalityRow {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            upcoming_show_count: count,
        }
    }

    #[test]
    fn test_group_by_locality() {
        let groups = group_by_locality(vec![
            locality_row(1, "The Musical Hop", "San Francisco", "CA", 0),
            locality_row(3, "Park Square Live Music & Coffee", "San Francisco", "CA", 1),
            locality_row(2, "The Dueling Pianos Bar", "New York", "NY", 0),
        ]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].city, "San Francisco");
        assert_eq!(groups[0].venues.len(), 2);
        assert_eq!(groups[0].venues[1].upcoming_show_count, 1);
        assert_eq!(groups[1].state, "NY");
    }

    #[test]
    fn test_group_by_locality_empty() {
        assert!(group_by_locality(Vec::new()).is_empty());
    }

    #[test]
    fn test_partition_covers_every_show_once() {
        let listings = vec![
            listing(1, now() - Duration::days(400)),
            listing(2, now() - Duration::seconds(1)),
            listing(3, now()),
            listing(4, now() + Duration::days(30)),
        ];
        let total = listings.len();

        let partition = partition_shows(listings, &now(), Counterpart::Artist);

        assert_eq!(partition.past_shows_count + partition.upcoming_shows_count, total);
        assert_eq!(partition.past_shows_count, 2);
        // A show starting exactly now is upcoming
        assert_eq!(
            partition.upcoming_shows.iter().map(|s| s.show_id).collect::<Vec<_>>(),
            vec![3, 4]
        );
    }

    #[test]
    fn test_partition_uses_counterpart_side() {
        let artist_side = partition_shows(vec![listing(1, now())], &now(), Counterpart::Artist);
        assert_eq!(artist_side.upcoming_shows[0].id, 4);
        assert_eq!(artist_side.upcoming_shows[0].name, "Guns N Petals");

        let venue_side = partition_shows(vec![listing(1, now())], &now(), Counterpart::Venue);
        assert_eq!(venue_side.upcoming_shows[0].id, 1);
        assert_eq!(venue_side.upcoming_shows[0].image_link, None);
    }

    #[test]
    fn test_detail_serializes_iso_start_time() {
        let venue = Venue {
            id: 1,
            name: "The Musical Hop".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: None,
            image_link: None,
            facebook_link: None,
            website_link: None,
            genres: vec!["Jazz".to_string()],
            seeking_talent: false,
            seeking_description: None,
        };
        let start = Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap();
        let detail = VenueDetail::assemble(venue, vec![listing(1, start)], &now());

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["name"], "The Musical Hop");
        assert_eq!(value["past_shows_count"], 1);
        assert_eq!(value["past_shows"][0]["start_time"], "2019-05-21T21:30:00Z");
    }
}
