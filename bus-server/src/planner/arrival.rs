//! Estimating when a trip reaches each of its stops.
//!
//! Datasets mostly carry only a departure time per trip, so the arrival at
//! stop `i` is estimated as `departure + i * dwell`. Callers go through
//! [`ArrivalEstimator`] so a dataset with real per-stop times can be used
//! without touching them.

use crate::domain::{ClockTime, Trip};

/// Maps a trip and stop index to the time the bus is there.
pub trait ArrivalEstimator {
    /// Time the trip reaches `trip.stops()[stop_index]`.
    fn arrival_at(&self, trip: &Trip, stop_index: usize) -> ClockTime;
}

/// Fixed minutes per stop from the trip's departure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDwell {
    pub dwell_mins: u32,
}

impl FixedDwell {
    pub fn new(dwell_mins: u32) -> Self {
        Self { dwell_mins }
    }
}

impl ArrivalEstimator for FixedDwell {
    fn arrival_at(&self, trip: &Trip, stop_index: usize) -> ClockTime {
        let index = u32::try_from(stop_index).unwrap_or(u32::MAX);
        trip.departure()
            .plus_minutes(index.saturating_mul(self.dwell_mins))
    }
}

/// Per-stop times from the dataset where a trip has them, otherwise a
/// fixed dwell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timetable {
    pub fallback: FixedDwell,
}

impl Timetable {
    pub fn new(fallback: FixedDwell) -> Self {
        Self { fallback }
    }
}

impl ArrivalEstimator for Timetable {
    fn arrival_at(&self, trip: &Trip, stop_index: usize) -> ClockTime {
        trip.stop_times()
            .and_then(|times| times.get(stop_index).copied())
            .unwrap_or_else(|| self.fallback.arrival_at(trip, stop_index))
    }
}

impl<E: ArrivalEstimator + ?Sized> ArrivalEstimator for &E {
    fn arrival_at(&self, trip: &Trip, stop_index: usize) -> ClockTime {
        (**self).arrival_at(trip, stop_index)
    }
}
