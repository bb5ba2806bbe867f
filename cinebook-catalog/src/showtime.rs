use std::collections::HashSet;
use std::fmt;
use serde::{Deserialize, Serialize};

use crate::seat::{SeatMap, SEAT_COUNT};
use crate::CatalogError;

/// Label identifying a screening, e.g. `"Showtime 1"` or `"2024-06-26 10:00"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShowtimeId(String);

impl ShowtimeId {
    pub fn new(label: impl Into<String>) -> Result<Self, CatalogError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CatalogError::InvalidShowtime(label));
        }
        Ok(Self(label))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShowtimeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ShowtimeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A scheduled screening with its seat layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Showtime {
    pub id: ShowtimeId,
    pub movie: String,
    pub formation: String,
    pub seats: SeatMap,
    pub max_tickets: usize,
    pub sold_tickets: usize,
}

impl Showtime {
    pub fn new(id: ShowtimeId, movie: impl Into<String>, formation: impl Into<String>) -> Self {
        Self {
            id,
            movie: movie.into(),
            formation: formation.into(),
            seats: SeatMap::new(),
            max_tickets: SEAT_COUNT,
            sold_tickets: 0,
        }
    }

    pub fn is_sold_out(&self) -> bool {
        self.sold_tickets >= self.max_tickets
    }
}

/// Catalog entry as it appears in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowtimeConfig {
    pub id: String,
    pub movie: String,
    pub formation: String,
    #[serde(default)]
    pub max_tickets: Option<usize>,
}

impl ShowtimeConfig {
    pub fn new(id: &str, movie: &str, formation: &str) -> Self {
        Self {
            id: id.to_string(),
            movie: movie.to_string(),
            formation: formation.to_string(),
            max_tickets: None,
        }
    }
}

/// Catalog used when configuration provides none.
pub fn default_catalog() -> Vec<ShowtimeConfig> {
    vec![
        ShowtimeConfig::new("Showtime 1", "Movie 1", "Formation 1"),
        ShowtimeConfig::new("Showtime 2", "Movie 2", "Formation 2"),
    ]
}

/// Builds the showtimes of a catalog, each with a fresh seat map.
///
/// `default_max_tickets` applies to entries without their own ceiling. Ceilings
/// are clamped to the seat count.
pub fn build_showtimes(
    entries: &[ShowtimeConfig],
    default_max_tickets: usize,
) -> Result<Vec<Showtime>, CatalogError> {
    let mut seen = HashSet::new();
    let mut showtimes = Vec::with_capacity(entries.len());

    for entry in entries {
        let id = ShowtimeId::new(entry.id.clone())?;
        if !seen.insert(id.clone()) {
            return Err(CatalogError::DuplicateShowtime(entry.id.clone()));
        }

        let mut showtime = Showtime::new(id, entry.movie.clone(), entry.formation.clone());
        showtime.max_tickets = entry.max_tickets.unwrap_or(default_max_tickets).min(SEAT_COUNT);
        showtimes.push(showtime);
    }

    Ok(showtimes)
}
