use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CatalogError;

/// Row letters of every auditorium, front to back.
pub const ROWS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Seats per row.
pub const SEATS_PER_ROW: u8 = 10;

/// Total seats in a showtime.
pub const SEAT_COUNT: usize = ROWS.len() * SEATS_PER_ROW as usize;

/// A seat position such as `C7`.
///
/// Only positions inside the fixed A-E / 1-10 grid can be constructed, so a
/// `SeatId` is always a valid key of a [`SeatMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeatId {
    row: char,
    number: u8,
}

impl SeatId {
    pub fn new(row: char, number: u8) -> Result<Self, CatalogError> {
        let row = row.to_ascii_uppercase();
        if !ROWS.contains(&row) || number == 0 || number > SEATS_PER_ROW {
            return Err(CatalogError::InvalidSeat(format!("{}{}", row, number)));
        }
        Ok(Self { row, number })
    }

    pub fn row(&self) -> char {
        self.row
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    /// Every seat of the grid in row-major order (A1..A10, B1.., E10).
    pub fn all() -> impl Iterator<Item = SeatId> {
        ROWS.into_iter().flat_map(|row| {
            (1..=SEATS_PER_ROW).map(move |number| SeatId { row, number })
        })
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.number)
    }
}

impl FromStr for SeatId {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let invalid = || CatalogError::InvalidSeat(s.to_string());
        let row = chars.next().ok_or_else(invalid)?;

        // Plain decimal only: `u8::from_str` would also take "+1" and "01".
        let digits = chars.as_str();
        if digits.is_empty()
            || digits.len() > 2
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let number: u8 = digits.parse().map_err(|_| invalid())?;
        SeatId::new(row, number).map_err(|_| invalid())
    }
}

impl Serialize for SeatId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SeatId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Per-showtime availability table. `true` means the seat can be booked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatMap {
    seats: BTreeMap<SeatId, bool>,
}

impl SeatMap {
    /// A fresh map with all 50 seats available.
    pub fn new() -> Self {
        Self {
            seats: SeatId::all().map(|seat| (seat, true)).collect(),
        }
    }

    pub fn is_available(&self, seat: SeatId) -> bool {
        self.seats.get(&seat).copied().unwrap_or(false)
    }

    /// Sets a seat's flag and returns the previous one.
    pub fn set_available(&mut self, seat: SeatId, available: bool) -> bool {
        self.seats.insert(seat, available).unwrap_or(false)
    }

    pub fn available_count(&self) -> usize {
        self.seats.values().filter(|available| **available).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SeatId, bool)> + '_ {
        self.seats.iter().map(|(seat, available)| (*seat, *available))
    }

    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }
}

impl Default for SeatMap {
    fn default() -> Self {
        Self::new()
    }
}
