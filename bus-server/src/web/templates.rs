//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::{ClockTime, Leg, Node, RouteOption};
use crate::network::LocationGraph;
use crate::planner::{DepartureStatus, UpcomingDeparture};

use super::dto::name_of;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the planning and upcoming-bus forms.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub places: Vec<PlaceView>,
    pub default_time: String,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Itinerary results fragment.
#[derive(Template)]
#[template(path = "plan_results.html")]
pub struct PlanResultsTemplate {
    pub from_name: String,
    pub to_name: String,
    pub departure: String,
    pub options: Vec<OptionView>,
}

/// Upcoming buses fragment.
#[derive(Template)]
#[template(path = "upcoming.html")]
pub struct UpcomingTemplate {
    pub location: String,
    pub current_time: String,
    pub buses: Vec<BusView>,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A selectable place in the forms.
#[derive(Debug, Clone)]
pub struct PlaceView {
    pub id: String,
    pub name: String,
}

impl PlaceView {
    pub fn from_node(node: &Node) -> Self {
        Self {
            id: node.id.to_string(),
            name: node.name.clone(),
        }
    }

    /// All places, sorted by name for the dropdowns.
    pub fn sorted(graph: &LocationGraph) -> Vec<Self> {
        let mut places: Vec<Self> = graph.nodes().iter().map(Self::from_node).collect();
        places.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        places
    }
}

/// Itinerary option view model.
#[derive(Debug, Clone)]
pub struct OptionView {
    pub label: String,
    pub category: String,
    pub arrival_time: String,
    pub duration_display: String,
    pub total_cost: u32,
    pub transfers: usize,
    pub legs: Vec<LegView>,
}

impl OptionView {
    pub fn from_option(option: &RouteOption, departure: ClockTime, graph: &LocationGraph) -> Self {
        Self {
            label: option.label.clone(),
            category: option.category.as_str().to_string(),
            arrival_time: option.arrival_time(departure).to_string(),
            duration_display: duration_display(option.total_time_mins),
            total_cost: option.total_cost,
            transfers: option.transfers,
            legs: option
                .legs
                .iter()
                .map(|l| LegView::from_leg(l, graph))
                .collect(),
        }
    }

    pub fn is_free(&self) -> bool {
        self.total_cost == 0
    }
}

/// One leg of an option, for display.
#[derive(Debug, Clone)]
pub struct LegView {
    pub mode: String,
    pub from_name: String,
    pub to_name: String,
    /// "08:05 → 08:20" for scheduled legs, empty for local ones.
    pub times: String,
    pub duration_mins: u32,
    pub route_id: String,
}

impl LegView {
    pub fn from_leg(leg: &Leg, graph: &LocationGraph) -> Self {
        let times = match (leg.departure, leg.arrival) {
            (Some(board), Some(alight)) => format!("{board} → {alight}"),
            _ => String::new(),
        };

        Self {
            mode: leg.mode.as_str().to_string(),
            from_name: name_of(graph, &leg.from),
            to_name: name_of(graph, &leg.to),
            times,
            duration_mins: leg.duration_mins,
            route_id: leg
                .route_id
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default(),
        }
    }

    pub fn is_scheduled(&self) -> bool {
        !self.times.is_empty()
    }
}

/// Upcoming bus view model.
#[derive(Debug, Clone)]
pub struct BusView {
    pub route_name: String,
    pub departure: String,
    pub minutes_until: u32,
    pub destination: String,
    pub status: String,
}

impl BusView {
    pub fn from_departure(bus: &UpcomingDeparture, graph: &LocationGraph) -> Self {
        Self {
            route_name: bus.route_name.clone(),
            departure: bus.departure.to_string(),
            minutes_until: bus.minutes_until,
            destination: name_of(graph, &bus.terminus),
            status: bus.status.as_str().to_string(),
        }
    }

    /// "now", "in 1 min", "in 12 mins".
    pub fn due_display(&self) -> String {
        match self.minutes_until {
            0 => "now".to_string(),
            1 => "in 1 min".to_string(),
            n => format!("in {n} mins"),
        }
    }

    pub fn is_arriving(&self) -> bool {
        self.status == DepartureStatus::Arriving.as_str()
    }
}

fn duration_display(mins: u32) -> String {
    let hours = mins / 60;
    let mins = mins % 60;

    if hours > 0 {
        format!("{}h {}m", hours, mins)
    } else {
        format!("{}m", mins)
    }
}
