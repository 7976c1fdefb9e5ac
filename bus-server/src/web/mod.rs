//! Web layer for the bus trip planner.
//!
//! Provides HTTP endpoints for browsing the network, listing upcoming buses
//! and planning trips, plus the HTML frontend.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
