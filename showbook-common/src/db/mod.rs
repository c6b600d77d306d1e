//! Database schema and repository functions
//!
//! Repository functions take `&mut SqliteConnection`, which is either a pooled
//! connection (reads) or an open transaction (writes). The caller owns the
//! transaction boundary; nothing here holds on to a connection.

pub mod artists;
pub mod genres;
pub mod init;
pub mod models;
pub mod shows;
pub mod venues;

pub use init::*;
pub use models::*;

/// Literal, case-insensitive substring matcher for name search
///
/// Case is folded with Unicode lowercasing, so "café" finds "CAFÉ". No
/// character in the term is special. A blank term matches every name.
pub(crate) struct NameMatcher {
    folded_term: String,
}

impl NameMatcher {
    pub(crate) fn new(term: &str) -> Self {
        Self {
            folded_term: term.trim().to_lowercase(),
        }
    }

    pub(crate) fn matches(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.folded_term)
    }
}

/// Map an empty or whitespace-only optional string to NULL
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
