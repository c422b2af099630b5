//! Seat identification and per-seat data storage.
//!
//! ## Seat
//!
//! Seats are numbered from 0 in turn order. Response cycles (blocks,
//! reimpeachments, coalition contests) always restart at seat 0.
//!
//! ## SeatMap
//!
//! Per-seat storage backed by a `Vec`, indexable by `Seat`. Construction and
//! cloning have fallible variants that report allocation failure instead of
//! aborting.

use std::collections::TryReserveError;
use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// A seat at the table (0-based).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Seat(pub u8);

impl Seat {
    /// The seat every response cycle starts from.
    pub const FIRST: Seat = Seat(0);

    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Get the raw seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The seat that acts after this one at a table of `seat_count`.
    #[must_use]
    pub const fn next(self, seat_count: u8) -> Seat {
        if self.0 + 1 >= seat_count {
            Seat(0)
        } else {
            Seat(self.0 + 1)
        }
    }

    /// Iterate over all seats at a table of `seat_count`.
    ///
    /// ```
    /// use parliament_engine::core::Seat;
    ///
    /// let seats: Vec<_> = Seat::all(3).collect();
    /// assert_eq!(seats, vec![Seat(0), Seat(1), Seat(2)]);
    /// ```
    pub fn all(seat_count: u8) -> impl Iterator<Item = Seat> {
        (0..seat_count).map(Seat)
    }
}

impl std::fmt::Display for Seat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// Per-seat data storage with O(1) access.
///
/// ```
/// use parliament_engine::core::{Seat, SeatMap};
///
/// let mut hand_sizes: SeatMap<u32> = SeatMap::with_value(3, 1);
/// hand_sizes[Seat(2)] += 1;
/// assert_eq!(hand_sizes[Seat(2)], 2);
/// assert_eq!(hand_sizes.iter().map(|(_, n)| n).sum::<u32>(), 4);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeatMap<T> {
    data: Vec<T>,
}

impl<T> SeatMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(seat_count: u8, factory: impl Fn(Seat) -> T) -> Self {
        Self {
            data: Seat::all(seat_count).map(factory).collect(),
        }
    }

    /// Like `new`, but reports allocation failure.
    pub fn try_new(seat_count: u8, factory: impl Fn(Seat) -> T) -> Result<Self, TryReserveError> {
        let mut data = Vec::new();
        data.try_reserve_exact(seat_count as usize)?;
        data.extend(Seat::all(seat_count).map(factory));
        Ok(Self { data })
    }

    /// Create a map with every entry set to the same value.
    pub fn with_value(seat_count: u8, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(seat_count, |_| value.clone())
    }

    /// Clone into freshly allocated storage, reporting allocation failure.
    pub fn try_clone(&self) -> Result<Self, TryReserveError>
    where
        T: Clone,
    {
        let mut data = Vec::new();
        data.try_reserve_exact(self.data.len())?;
        data.extend_from_slice(&self.data);
        Ok(Self { data })
    }

    #[must_use]
    pub fn seat_count(&self) -> usize {
        self.data.len()
    }

    /// Iterate over (Seat, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (Seat, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (Seat(i as u8), v))
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }
}

impl<T> Index<Seat> for SeatMap<T> {
    type Output = T;

    fn index(&self, seat: Seat) -> &Self::Output {
        &self.data[seat.index()]
    }
}

impl<T> IndexMut<Seat> for SeatMap<T> {
    fn index_mut(&mut self, seat: Seat) -> &mut Self::Output {
        &mut self.data[seat.index()]
    }
}
