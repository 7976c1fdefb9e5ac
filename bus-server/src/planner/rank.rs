//! Option ranking for planner results.
//!
//! Orders itinerary options so the most useful appear first, and drops
//! options that repeat one already listed.

use std::collections::HashSet;

use crate::domain::{Leg, RouteOption};

/// Rank options by preference.
///
/// Options are ranked by:
/// 1. Total time (shorter is better)
/// 2. Total cost (cheaper is better)
/// 3. Number of transfers (fewer is better)
///
/// The sort is stable, so options equal on all three keep their input
/// order. Returns options sorted best-first.
pub fn rank_options(mut options: Vec<RouteOption>) -> Vec<RouteOption> {
    options.sort_by(|a, b| {
        // Primary: total time
        let time_cmp = a.total_time_mins.cmp(&b.total_time_mins);
        if time_cmp != std::cmp::Ordering::Equal {
            return time_cmp;
        }

        // Secondary: cost
        let cost_cmp = a.total_cost.cmp(&b.total_cost);
        if cost_cmp != std::cmp::Ordering::Equal {
            return cost_cmp;
        }

        // Tertiary: fewer transfers
        a.transfers.cmp(&b.transfers)
    });

    options
}

/// Drop options whose leg sequence repeats an earlier option's.
///
/// Keeps the first of each group and otherwise preserves order.
pub fn deduplicate(options: Vec<RouteOption>) -> Vec<RouteOption> {
    if options.len() <= 1 {
        return options;
    }

    let mut seen: HashSet<Vec<Leg>> = HashSet::with_capacity(options.len());
    options
        .into_iter()
        .filter(|option| seen.insert(option.legs.clone()))
        .collect()
}
