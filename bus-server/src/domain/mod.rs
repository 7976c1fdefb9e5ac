//! Domain types for the bus trip planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. Types enforce their invariants at construction
//! time, so code that receives them can trust their validity.

mod error;
mod id;
mod itinerary;
mod node;
mod route;
mod time;

pub use error::DomainError;
pub use id::{InvalidId, NodeId, RouteId, TripId};
pub use itinerary::{Leg, OptionCategory, RouteOption};
pub use node::{Edge, Mode, Node, NodeCategory};
pub use route::{Route, Trip};
pub use time::{ClockTime, MINUTES_PER_DAY, TimeError};
