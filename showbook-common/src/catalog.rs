//! Fixed enumerations offered by the venue and artist forms

/// Two-letter state codes accepted for venue and artist localities
pub const STATE_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Genre tags offered by the multi-select genre field
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// Normalize a submitted state code, returning it only if it is recognized
pub fn normalize_state(input: &str) -> Option<&'static str> {
    let upper = input.trim().to_ascii_uppercase();
    STATE_CODES.iter().copied().find(|code| *code == upper)
}

/// Look up a genre tag by exact name
pub fn lookup_genre(input: &str) -> Option<&'static str> {
    let input = input.trim();
    GENRES.iter().copied().find(|genre| *genre == input)
}
