//! Movie - the single record type managed by the service.

use serde::{Deserialize, Serialize};

/// A movie record.
///
/// The `id` is supplied by the caller and is the natural key of the
/// collection. Missing fields in an inbound body fall back to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub summary: String,
    pub actors: Vec<String>,
}

impl Movie {
    /// Create a movie with the given id and title; other fields are empty.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Builder-style setter for the release year.
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    /// Builder-style setter for the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Builder-style setter for the actor list.
    pub fn with_actors<I, S>(mut self, actors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.actors = actors.into_iter().map(Into::into).collect();
        self
    }

    /// Overwrite the mutable fields with those of `other`. The id is kept.
    pub fn apply_update(&mut self, other: Movie) {
        self.title = other.title;
        self.year = other.year;
        self.summary = other.summary;
        self.actors = other.actors;
    }
}
