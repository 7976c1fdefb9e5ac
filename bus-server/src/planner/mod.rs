//! Trip planning over a network snapshot.
//!
//! Two query entry points share one arrival-time model:
//!
//! - [`UpcomingDepartureFinder`] lists buses due at a stop soon.
//! - [`ItineraryPlanner`] composes local paths and scheduled rides into
//!   ranked door-to-door options, with at most one transfer.
//!
//! Both are pure reads over a [`NetworkSnapshot`](crate::network::NetworkSnapshot).

mod arrival;
mod config;
mod itinerary;
mod rank;
mod upcoming;

pub use arrival::{ArrivalEstimator, FixedDwell, Timetable};
pub use config::PlannerConfig;
pub use itinerary::{ALREADY_THERE, ItineraryPlanner};
pub use rank::{deduplicate, rank_options};
pub use upcoming::{DepartureStatus, TripTimetable, UpcomingDeparture, UpcomingDepartureFinder};
