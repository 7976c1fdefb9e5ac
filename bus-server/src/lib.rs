//! Bus trip planner server.
//!
//! A web application that answers: "which bus comes next, and what is the
//! quickest way from here to there?" over a city network of stops,
//! landmarks, local walking and rickshaw links, and scheduled bus routes.

pub mod cache;
pub mod config;
pub mod dataset;
pub mod domain;
pub mod network;
pub mod planner;
pub mod web;
