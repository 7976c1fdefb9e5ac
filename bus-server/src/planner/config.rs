//! Tuning parameters for departure lookup and itinerary planning.

use super::arrival::{FixedDwell, Timetable};

/// Configuration parameters for the departure finder and itinerary planner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerConfig {
    /// Assumed minutes a bus spends reaching each successive stop, used when
    /// a trip has no per-stop times.
    pub dwell_per_stop_mins: u32,

    /// How long after its estimated arrival a bus is still listed (minutes).
    /// Later than this it is assumed gone.
    pub grace_mins: u32,

    /// How far ahead departures are listed (minutes).
    pub horizon_mins: u32,

    /// Departures returned when the caller gives no limit.
    pub default_limit: usize,

    /// Upper bound on a caller-supplied limit.
    pub max_limit: usize,

    /// Departures due within this many minutes are tagged "soon".
    pub soon_threshold_mins: u32,

    /// Minimum time to change between two buses at the same stop (minutes).
    pub min_transfer_mins: u32,

    /// Maximum local travel time to reach a stop before boarding (minutes).
    /// Farther stops are not considered as transfer points.
    pub max_access_mins: u32,

    /// Maximum number of itinerary options returned.
    pub max_results: usize,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        dwell_per_stop_mins: u32,
        grace_mins: u32,
        horizon_mins: u32,
        default_limit: usize,
        max_limit: usize,
        soon_threshold_mins: u32,
        min_transfer_mins: u32,
        max_access_mins: u32,
        max_results: usize,
    ) -> Self {
        Self {
            dwell_per_stop_mins,
            grace_mins,
            horizon_mins,
            default_limit,
            max_limit,
            soon_threshold_mins,
            min_transfer_mins,
            max_access_mins,
            max_results,
        }
    }

    /// Resolve a caller-supplied departure limit.
    ///
    /// `None` gives the default; anything else is clamped to
    /// `1..=max_limit`, so a limit of zero still returns one departure.
    pub fn clamp_limit(&self, limit: Option<usize>) -> usize {
        limit
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }

    /// The arrival model the server uses: dataset stop times where present,
    /// fixed dwell otherwise.
    pub fn estimator(&self) -> Timetable {
        Timetable::new(FixedDwell::new(self.dwell_per_stop_mins))
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            dwell_per_stop_mins: 5,
            grace_mins: 30,
            horizon_mins: 120, // 2 hours
            default_limit: 5,
            max_limit: 20,
            soon_threshold_mins: 5,
            min_transfer_mins: 2,
            max_access_mins: 30,
            max_results: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PlannerConfig::default();

        assert_eq!(config.dwell_per_stop_mins, 5);
        assert_eq!(config.grace_mins, 30);
        assert_eq!(config.horizon_mins, 120);
        assert_eq!(config.default_limit, 5);
        assert_eq!(config.max_limit, 20);
        assert_eq!(config.soon_threshold_mins, 5);
        assert_eq!(config.min_transfer_mins, 2);
        assert_eq!(config.max_access_mins, 30);
        assert_eq!(config.max_results, 10);
    }

    #[test]
    fn custom_config() {
        let config = PlannerConfig::new(3, 10, 60, 4, 8, 2, 5, 15, 3);

        assert_eq!(config.dwell_per_stop_mins, 3);
        assert_eq!(config.grace_mins, 10);
        assert_eq!(config.horizon_mins, 60);
        assert_eq!(config.default_limit, 4);
        assert_eq!(config.max_limit, 8);
        assert_eq!(config.soon_threshold_mins, 2);
        assert_eq!(config.min_transfer_mins, 5);
        assert_eq!(config.max_access_mins, 15);
        assert_eq!(config.max_results, 3);
    }

    #[test]
    fn estimator_uses_configured_dwell() {
        let config = PlannerConfig {
            dwell_per_stop_mins: 3,
            ..PlannerConfig::default()
        };
        assert_eq!(config.estimator().fallback, FixedDwell::new(3));
    }

    #[test]
    fn limit_clamping() {
        let config = PlannerConfig::default();

        assert_eq!(config.clamp_limit(None), 5);
        assert_eq!(config.clamp_limit(Some(0)), 1);
        assert_eq!(config.clamp_limit(Some(7)), 7);
        assert_eq!(config.clamp_limit(Some(500)), 20);
    }
}
